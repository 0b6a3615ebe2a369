//! Floating button that opens the tutor with the current page's context.

use leptos::prelude::*;

use models::chat::TutorContext;

use crate::state::tutor::TutorState;
use crate::util::media;

#[component]
pub fn TutorButton(#[prop(into)] context: Signal<TutorContext>) -> impl IntoView {
    let tutor = expect_context::<RwSignal<TutorState>>();

    let on_click = move |_| {
        let context = context.get_untracked();
        tutor.update(|t| t.open(context, media::new_id(), media::now_ms()));
    };

    view! {
        <Show when=move || !tutor.with(|t| t.is_open)>
            <button class="tutor-button" on:click=on_click title="Professora IA" aria-label="Abrir Professora IA">
                "🎓"
            </button>
        </Show>
    }
}
