//! Tutor chat overlay.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once at the app root and driven by `TutorState`. Pages open it
//! through `TutorButton` with their study context; the overlay owns the send,
//! voice and image flows and talks to the gateway through `net::api`.
//!
//! ERROR HANDLING
//! ==============
//! Tutor failures become the fallback assistant message. Microphone and
//! transcription failures are logged and shown as a toast; speech playback
//! failures are only logged.

use leptos::prelude::*;

use models::chat::Role;

#[cfg(feature = "hydrate")]
use crate::components::toast_stack::notify;
use crate::state::tutor::{Outgoing, TutorState, VoicePhase};
#[cfg(feature = "hydrate")]
use crate::state::ui::ToastKind;
use crate::state::ui::UiState;
use crate::util::markdown::render_markdown_html;
use crate::util::media;

/// Issue a tutor request for `outgoing`, if the state accepts it.
pub fn send(tutor: RwSignal<TutorState>, outgoing: Outgoing) {
    let Some(request) = tutor
        .try_update(|t| t.begin_send(outgoing, media::new_id(), media::now_ms()))
        .flatten()
    else {
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::ask_tutor(&request).await {
            Ok(reply) => {
                let speak = tutor.get_untracked().audio_enabled;
                tutor.update(|t| t.finish_send(reply.clone(), media::new_id(), media::now_ms()));
                if speak {
                    speak_reply(&reply).await;
                }
            }
            Err(e) => {
                log::error!("tutor request failed: {e}");
                tutor.update(|t| t.fail_send(media::new_id(), media::now_ms()));
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = request;
}

#[cfg(feature = "hydrate")]
async fn speak_reply(reply: &str) {
    match crate::net::api::synthesize(reply).await {
        Ok(Some(audio)) => media::play_speech(&audio),
        Ok(None) => {}
        Err(e) => log::warn!("speech synthesis failed: {e}"),
    }
}

#[cfg(feature = "hydrate")]
const MSG_MIC_UNAVAILABLE: &str = "Não foi possível acessar o microfone";
#[cfg(feature = "hydrate")]
const MSG_TRANSCRIPTION_FAILED: &str = "Não foi possível transcrever o áudio. Tente novamente.";

fn toggle_recording(tutor: RwSignal<TutorState>, ui: RwSignal<UiState>) {
    match tutor.get_untracked().voice {
        VoicePhase::Idle => {
            if !tutor.try_update(TutorState::begin_recording).unwrap_or(false) {
                return;
            }
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                if let Err(e) = media::start_recording().await {
                    log::warn!("voice recording unavailable: {e}");
                    tutor.update(|t| t.finish_transcription(None));
                    notify(ui, ToastKind::Error, MSG_MIC_UNAVAILABLE);
                }
            });
        }
        VoicePhase::Recording => {
            if !tutor.try_update(TutorState::stop_recording).unwrap_or(false) {
                return;
            }
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let text = match media::stop_recording().await {
                    Ok(audio) => crate::net::api::transcribe(audio)
                        .await
                        .inspect_err(|e| log::warn!("transcription failed: {e}")),
                    Err(e) => {
                        log::warn!("voice recording failed: {e}");
                        Err(e)
                    }
                };
                let failed = text.is_err();
                tutor.update(|t| t.finish_transcription(text.ok()));
                if failed {
                    notify(ui, ToastKind::Error, MSG_TRANSCRIPTION_FAILED);
                }
            });
        }
        VoicePhase::Transcribing => {}
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = ui;
}

/// The chat overlay itself. Renders nothing while closed.
#[component]
pub fn TutorOverlay() -> impl IntoView {
    let tutor = expect_context::<RwSignal<TutorState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let _ = tutor.with(|t| (t.messages.len(), t.loading));
        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send(tutor, Outgoing::Text);
        }
    };

    let on_image = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let Some(file) = media::selected_file(&ev) else {
                return;
            };
            leptos::task::spawn_local(async move {
                match media::read_file_data_url(&file).await {
                    Ok(url) => send(tutor, Outgoing::Image(url)),
                    Err(e) => log::warn!("image read failed: {e}"),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let voice_label = move || match tutor.with(|t| t.voice) {
        VoicePhase::Idle => "🎤",
        VoicePhase::Recording => "⏹",
        VoicePhase::Transcribing => "…",
    };

    view! {
        <Show when=move || tutor.with(|t| t.is_open)>
            <div class="tutor-overlay" role="dialog" aria-label="Professora IA">
                <header class="tutor-overlay__header">
                    <span class="tutor-overlay__title">"Professora IA"</span>
                    <button
                        class="btn tutor-overlay__audio"
                        class:tutor-overlay__audio--on=move || tutor.with(|t| t.audio_enabled)
                        on:click=move |_| tutor.update(TutorState::toggle_audio)
                        title="Ler respostas em voz alta"
                    >
                        {move || if tutor.with(|t| t.audio_enabled) { "🔊" } else { "🔇" }}
                    </button>
                    <button class="btn tutor-overlay__close" on:click=move |_| tutor.update(TutorState::close) title="Fechar">
                        "✕"
                    </button>
                </header>

                <div class="tutor-overlay__messages" node_ref=messages_ref>
                    <For
                        each=move || tutor.with(|t| t.messages.clone())
                        key=|msg| msg.id.clone()
                        children=move |msg| {
                            let is_assistant = msg.role == Role::Assistant;
                            view! {
                                <div class="tutor-message" class:tutor-message--assistant=is_assistant>
                                    {msg.image_data.map(|src| view! { <img class="tutor-message__image" src=src alt="Imagem enviada"/> })}
                                    {if is_assistant {
                                        let rendered = render_markdown_html(&msg.content);
                                        view! { <div class="tutor-message__markdown" inner_html=rendered></div> }.into_any()
                                    } else {
                                        view! { <span class="tutor-message__text">{msg.content}</span> }.into_any()
                                    }}
                                </div>
                            }
                        }
                    />
                    {move || tutor.with(|t| t.loading).then(|| view! { <div class="tutor-overlay__loading">"Pensando..."</div> })}
                </div>

                <Show when=move || tutor.with(|t| t.show_image_picker)>
                    <div class="tutor-overlay__picker">
                        <p>"Selecione uma captura da parte que você quer entender."</p>
                        <input type="file" accept="image/*" on:change=on_image/>
                    </div>
                </Show>

                <div class="tutor-overlay__input-row">
                    <Show when=move || tutor.with(|t| t.context.supports_image_explain())>
                        <button
                            class="btn tutor-overlay__explain"
                            disabled=move || tutor.with(|t| t.loading)
                            on:click=move |_| tutor.update(|t| t.show_image_picker = !t.show_image_picker)
                            title="Explicar esta parte"
                        >
                            "🖼"
                        </button>
                    </Show>
                    <textarea
                        class="tutor-overlay__input"
                        rows="2"
                        placeholder=move || tutor.with(|t| t.context.placeholder())
                        disabled=move || tutor.with(|t| t.loading)
                        prop:value=move || tutor.with(|t| t.input.clone())
                        on:input=move |ev| tutor.update(|t| t.input = event_target_value(&ev))
                        on:keydown=on_keydown
                    ></textarea>
                    <button
                        class="btn tutor-overlay__voice"
                        class:tutor-overlay__voice--recording=move || tutor.with(|t| t.voice == VoicePhase::Recording)
                        disabled=move || tutor.with(|t| t.voice == VoicePhase::Transcribing)
                        on:click=move |_| toggle_recording(tutor, ui)
                        title="Gravar pergunta"
                    >
                        {voice_label}
                    </button>
                    <button
                        class="btn btn--primary tutor-overlay__send"
                        disabled=move || !tutor.with(TutorState::can_send)
                        on:click=move |_| send(tutor, Outgoing::Text)
                    >
                        "Enviar"
                    </button>
                </div>
            </div>
        </Show>
    }
}
