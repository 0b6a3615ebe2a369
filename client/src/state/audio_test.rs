use super::*;

#[test]
fn default_has_six_tracks_at_half_volume() {
    let state = AudioPlayerState::default();
    assert_eq!(state.tracks.len(), 6);
    assert_eq!(state.volume, DEFAULT_VOLUME);
    assert!(!state.playing);
    assert!(state.current_track_name().is_none());
}

#[test]
fn play_track_selects_and_starts() {
    let mut state = AudioPlayerState::default();
    let track = state.play_track(3).unwrap();
    assert_eq!(track.name, "Floresta Noite");
    assert!(state.playing);
    assert_eq!(state.current_track_name(), Some("Floresta Noite"));
}

#[test]
fn play_unknown_track_leaves_state() {
    let mut state = AudioPlayerState::default();
    state.play_track(1);
    assert!(state.play_track(42).is_none());
    assert_eq!(state.current, Some(1));
}

#[test]
fn toggle_play_requires_a_track() {
    let mut state = AudioPlayerState::default();
    state.toggle_play();
    assert!(!state.playing);

    state.play_track(2);
    state.toggle_play();
    assert!(!state.playing);
    state.toggle_play();
    assert!(state.playing);
}

#[test]
fn stop_clears_track() {
    let mut state = AudioPlayerState::default();
    state.play_track(2);
    state.stop();
    assert!(!state.playing);
    assert!(state.current.is_none());
}

#[test]
fn set_volume_clamps() {
    let mut state = AudioPlayerState::default();
    state.set_volume(1.7);
    assert_eq!(state.volume, 1.0);
    state.set_volume(-0.2);
    assert_eq!(state.volume, 0.0);
    state.set_volume(f64::NAN);
    assert_eq!(state.volume, DEFAULT_VOLUME);
}

#[test]
fn mute_zeroes_effective_volume_and_restores_slider() {
    let mut state = AudioPlayerState::default();
    state.set_volume(0.8);
    state.toggle_mute();
    assert_eq!(state.effective_volume(), 0.0);
    assert_eq!(state.volume, 0.8);

    state.set_volume(0.3);
    assert_eq!(state.effective_volume(), 0.0);

    state.toggle_mute();
    assert_eq!(state.effective_volume(), 0.3);
}
