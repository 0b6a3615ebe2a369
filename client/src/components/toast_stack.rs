//! Toast notifications rendered from `UiState`.

use leptos::prelude::*;

use crate::state::ui::{ToastKind, UiState};

/// Toasts disappear on their own after this long.
#[cfg(feature = "hydrate")]
const TOAST_TTL_MS: u32 = 4_000;

/// Queue a toast and schedule its removal.
pub fn notify(ui: RwSignal<UiState>, kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    let id = ui.try_update(|u| u.push_toast(kind, message)).unwrap_or_default();
    #[cfg(feature = "hydrate")]
    gloo_timers::callback::Timeout::new(TOAST_TTL_MS, move || ui.update(|u| u.dismiss_toast(id))).forget();
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="toast-stack" aria-live="polite">
            <For
                each=move || ui.with(|u| u.toasts.clone())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class="toast"
                            class:toast--success=toast.kind == ToastKind::Success
                            class:toast--error=toast.kind == ToastKind::Error
                            on:click=move |_| ui.update(|u| u.dismiss_toast(id))
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
