//! Ambient-audio player: floating button, track dialog and now-playing pill.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AudioPlayerState` is the source of truth; every control updates the
//! state first and then mirrors it onto the single ambient audio element in
//! `util::media`.

use leptos::prelude::*;

use crate::state::audio::AudioPlayerState;
use crate::util::media;

#[component]
pub fn AudioPlayer() -> impl IntoView {
    let audio = expect_context::<RwSignal<AudioPlayerState>>();

    let play = move |id: u32| {
        let started = audio.try_update(|a| a.play_track(id).map(|t| (t, a.effective_volume())));
        if let Some((track, volume)) = started.flatten() {
            media::ambient_play(track.url, volume);
        }
    };
    let toggle_play = move |_| {
        audio.update(AudioPlayerState::toggle_play);
        media::ambient_set_playing(audio.with_untracked(|a| a.playing));
    };
    let stop = move |_| {
        audio.update(AudioPlayerState::stop);
        media::ambient_stop();
    };
    let toggle_mute = move |_| {
        audio.update(AudioPlayerState::toggle_mute);
        media::ambient_set_volume(audio.with_untracked(AudioPlayerState::effective_volume));
    };
    let on_volume = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev).parse::<f64>().unwrap_or(f64::NAN);
        audio.update(|a| a.set_volume(value));
        media::ambient_set_volume(audio.with_untracked(AudioPlayerState::effective_volume));
    };

    view! {
        <button
            class="audio-button"
            on:click=move |_| audio.update(|a| a.dialog_open = true)
            title="Sons relaxantes"
            aria-label="Sons relaxantes"
        >
            "🎵"
        </button>

        <Show when=move || audio.with(|a| a.playing)>
            <div class="audio-now-playing">
                "♪ "
                {move || audio.with(|a| a.current_track_name().unwrap_or_default())}
            </div>
        </Show>

        <Show when=move || audio.with(|a| a.dialog_open)>
            <div class="dialog-backdrop" on:click=move |_| audio.update(|a| a.dialog_open = false)>
                <div class="dialog dialog--audio" on:click=move |ev| ev.stop_propagation()>
                    <h2>"Sons para concentração"</h2>
                    <ul class="audio-tracks">
                        {move || {
                            let current = audio.with(|a| a.current);
                            audio
                                .with(|a| a.tracks.clone())
                                .into_iter()
                                .map(|track| {
                                    let active = current == Some(track.id);
                                    view! {
                                        <li>
                                            <button
                                                class="btn audio-tracks__item"
                                                class:audio-tracks__item--active=active
                                                on:click=move |_| play(track.id)
                                            >
                                                {track.name}
                                            </button>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </ul>
                    <div class="audio-controls">
                        <button
                            class="btn"
                            disabled=move || audio.with(|a| a.current.is_none())
                            on:click=toggle_play
                        >
                            {move || if audio.with(|a| a.playing) { "⏸" } else { "▶" }}
                        </button>
                        <button class="btn" disabled=move || audio.with(|a| a.current.is_none()) on:click=stop>
                            "⏹"
                        </button>
                        <button class="btn" on:click=toggle_mute>
                            {move || if audio.with(|a| a.muted) { "🔇" } else { "🔊" }}
                        </button>
                        <input
                            class="audio-controls__volume"
                            type="range"
                            min="0"
                            max="1"
                            step="0.05"
                            prop:value=move || audio.with(|a| a.volume).to_string()
                            on:input=on_volume
                        />
                    </div>
                    <div class="dialog__actions">
                        <button class="btn btn--primary" on:click=move |_| audio.update(|a| a.dialog_open = false)>
                            "Fechar"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
