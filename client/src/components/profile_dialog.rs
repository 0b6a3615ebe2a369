//! Profile dialog for viewing account details and renaming.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::components::toast_stack::notify;
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::state::ui::ToastKind;
use crate::state::ui::UiState;

#[component]
pub fn ProfileDialog(on_close: Callback<()>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let name = RwSignal::new(auth.with_untracked(AuthState::display_name));
    let busy = RwSignal::new(false);

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let value = name.get().trim().to_owned();
        if value.is_empty() || busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_profile(&value).await {
                Ok(()) => {
                    auth.update(|a| a.set_full_name(&value));
                    notify(ui, ToastKind::Success, "Perfil atualizado");
                    on_close.run(());
                }
                Err(e) => {
                    log::warn!("profile update failed: {e}");
                    notify(ui, ToastKind::Error, "Não foi possível atualizar o perfil");
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (value, ui);
    };

    let email = move || auth.with(|a| a.profile.as_ref().map(|p| p.email.clone()).unwrap_or_default());
    let profile_type = move || {
        auth.with(|a| a.profile.as_ref().and_then(|p| p.profile_type).map_or("Não informado", |t| t.label()))
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--profile" on:click=move |ev| ev.stop_propagation()>
                <h2>"Meu perfil"</h2>
                <div class="dialog__profile-row">
                    <span class="dialog__profile-label">"E-mail"</span>
                    <span class="dialog__profile-value">{email}</span>
                </div>
                <div class="dialog__profile-row">
                    <span class="dialog__profile-label">"Perfil"</span>
                    <span class="dialog__profile-value">{profile_type}</span>
                </div>
                <form class="dialog__form" on:submit=on_save>
                    <label class="dialog__profile-label" for="profile-name">"Nome"</label>
                    <input
                        id="profile-name"
                        class="login-input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <div class="dialog__actions">
                        <button class="btn" type="button" on:click=move |_| on_close.run(())>"Cancelar"</button>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>"Salvar"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
