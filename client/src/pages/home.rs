//! Landing page: first-visit onboarding, then the feature entry points.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use models::chat::TutorContext;

use crate::components::tutor_button::TutorButton;
use crate::state::auth::AuthState;
use crate::state::tutor::TutorState;
use crate::state::ui::{INTRO_STEPS, UiState};
use crate::util::auth::install_unauth_redirect;
use crate::util::{media, storage};

/// Onboarding slides as (title, body).
const INTRO_SLIDES: [(&str, &str); INTRO_STEPS] = [
    ("Bem-vindo ao LexDesk", "Seu espaço de estudos jurídicos: biblioteca, tutoria com IA e mapas mentais."),
    ("Professora IA", "Tire dúvidas por texto, voz ou imagem enquanto lê ou estuda qualquer área do Direito."),
    ("Organize o conteúdo", "Crie mapas mentais ou gere um a partir de um documento, e exporte quando quiser."),
];

/// Feature cards as (title, description, href).
const FEATURES: [(&str, &str, &str); 2] = [
    ("Biblioteca Jurídica", "Livros organizados por área, com leitura online.", "/biblioteca"),
    ("Mapas Mentais", "Estruture temas e gere mapas a partir de documentos.", "/mapas"),
];

fn intro_slide(step: usize) -> (&'static str, &'static str) {
    INTRO_SLIDES[step.min(INTRO_STEPS - 1)]
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let tutor = expect_context::<RwSignal<TutorState>>();
    install_unauth_redirect(auth, use_navigate());

    Effect::new(move || {
        if !storage::intro_seen() {
            ui.update(UiState::start_intro);
        }
    });

    let on_next = move |_| {
        if ui.try_update(UiState::next_intro_step).unwrap_or(false) {
            storage::mark_intro_seen();
        }
    };
    let on_skip = move |_| {
        ui.update(UiState::finish_intro);
        storage::mark_intro_seen();
    };

    view! {
        <Show
            when=move || !ui.with(|u| u.show_intro)
            fallback=move || {
                let step = move || ui.with(|u| u.intro_step);
                view! {
                    <div class="intro">
                        <h1 class="intro__title">{move || intro_slide(step()).0}</h1>
                        <p class="intro__body">{move || intro_slide(step()).1}</p>
                        <div class="intro__dots">
                            {(0..INTRO_STEPS)
                                .map(|i| view! { <span class="intro__dot" class:intro__dot--active=move || step() == i></span> })
                                .collect::<Vec<_>>()}
                        </div>
                        <div class="intro__actions">
                            <button class="btn" on:click=on_skip>"Pular"</button>
                            <button class="btn btn--primary" on:click=on_next>
                                {move || if step() + 1 >= INTRO_STEPS { "Começar" } else { "Próximo" }}
                            </button>
                        </div>
                    </div>
                }
            }
        >
            <div class="home-page">
                <h1 class="home-page__greeting">
                    "Olá, " {move || auth.with(AuthState::display_name)}
                </h1>
                <div class="home-page__features">
                    {FEATURES
                        .into_iter()
                        .map(|(title, description, href)| view! {
                            <a class="feature-card" href=href>
                                <h2>{title}</h2>
                                <p>{description}</p>
                            </a>
                        })
                        .collect::<Vec<_>>()}
                    <button
                        class="feature-card"
                        on:click=move |_| {
                            tutor.update(|t| t.open(TutorContext::default(), media::new_id(), media::now_ms()));
                        }
                    >
                        <h2>"Professora IA"</h2>
                        <p>"Converse com a tutora sobre qualquer tema."</p>
                    </button>
                </div>
                <TutorButton context=Signal::derive(TutorContext::default)/>
            </div>
        </Show>
    }
}
