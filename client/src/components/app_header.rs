//! Top navigation bar with the signed-in user's menu.

use leptos::prelude::*;

use crate::components::profile_dialog::ProfileDialog;
use crate::state::auth::AuthState;

#[component]
pub fn AppHeader() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let show_profile = RwSignal::new(false);

    let profile_label = move || {
        auth.with(|a| a.profile.as_ref().and_then(|p| p.profile_type).map(|t| t.label()))
    };

    view! {
        <header class="app-header toolbar">
            <a class="app-header__brand" href="/">"LexDesk"</a>
            <nav class="app-header__nav">
                <a href="/">"Início"</a>
                <a href="/biblioteca">"Biblioteca"</a>
                <a href="/mapas">"Mapas Mentais"</a>
            </nav>
            <span class="toolbar__spacer"></span>
            <Show when=move || auth.with(|a| a.user.is_some())>
                <button class="btn app-header__self" on:click=move |_| show_profile.set(true) title="Perfil">
                    {move || auth.with(AuthState::display_name)}
                    {move || profile_label().map(|l| view! { <span class="app-header__profile-type">{l}</span> })}
                </button>
                <button class="btn app-header__logout" on:click=move |_| crate::util::auth::sign_out(auth)>
                    "Sair"
                </button>
            </Show>
        </header>
        <Show when=move || show_profile.get()>
            <ProfileDialog on_close=Callback::new(move |()| show_profile.set(false))/>
        </Show>
    }
}
