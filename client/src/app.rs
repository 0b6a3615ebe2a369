//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_location,
};

use crate::components::app_header::AppHeader;
use crate::components::audio_player::AudioPlayer;
use crate::components::toast_stack::ToastStack;
use crate::components::tutor_overlay::TutorOverlay;
use crate::pages::{
    home::HomePage, library::LibraryPage, login::LoginPage, mind_maps::MindMapsPage, reader::ReaderPage,
};
use crate::state::{
    audio::AudioPlayerState, auth::AuthState, library::LibraryState, mind_maps::MindMapsState, tutor::TutorState,
    ui::UiState,
};
use crate::util::auth::load_session;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts, resolves the stored session once and
/// sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::pending());
    provide_context(auth);
    provide_context(RwSignal::new(UiState::default()));
    provide_context(RwSignal::new(TutorState::default()));
    provide_context(RwSignal::new(LibraryState::default()));
    provide_context(RwSignal::new(MindMapsState::default()));
    provide_context(RwSignal::new(AudioPlayerState::default()));

    Effect::new(move || load_session(auth));

    view! {
        <Stylesheet id="leptos" href="/pkg/lexdesk.css"/>
        <Title text="LexDesk"/>

        <Router>
            <Chrome/>
            <main class="app-main">
                <Routes fallback=|| "Página não encontrada.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("biblioteca") view=LibraryPage/>
                    <Route path=(StaticSegment("leitor"), ParamSegment("id")) view=ReaderPage/>
                    <Route path=StaticSegment("mapas") view=MindMapsPage/>
                </Routes>
            </main>
            <ToastStack/>
        </Router>
    }
}

/// Header and floating widgets, shown once a user is signed in and away from
/// the login screen.
#[component]
fn Chrome() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let visible = move || auth.with(|a| a.user.is_some()) && location.pathname.with(|p| p != "/login");

    view! {
        <Show when=visible>
            <AppHeader/>
            <TutorOverlay/>
            <AudioPlayer/>
        </Show>
    }
}
