//! Ambient-audio player state.
//!
//! The native audio element is driven from this state by the player
//! component; nothing here touches the browser. Muting zeroes the effective
//! volume without moving the slider.

#[cfg(test)]
#[path = "audio_test.rs"]
mod audio_test;

pub const DEFAULT_VOLUME: f64 = 0.5;

/// A looping background track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: u32,
    pub name: &'static str,
    pub url: &'static str,
}

pub const TRACKS: [Track; 6] = [
    Track {
        id: 1,
        name: "Som da Alma",
        url: "https://commondatastorage.googleapis.com/codeskulptor-demos/DDR_assets/Sevish_-__nbsp_.mp3",
    },
    Track {
        id: 2,
        name: "Floresta Meia-Noite",
        url: "https://commondatastorage.googleapis.com/codeskulptor-assets/week7-brrring.m4a",
    },
    Track {
        id: 3,
        name: "Floresta Noite",
        url: "https://commondatastorage.googleapis.com/codeskulptor-demos/GalaxyInvaders/theme_01.mp3",
    },
    Track {
        id: 4,
        name: "Ambiente Sonoro",
        url: "https://commondatastorage.googleapis.com/codeskulptor-assets/sounddogs/soundtrack.mp3",
    },
    Track {
        id: 5,
        name: "Fundo Ambiente",
        url: "https://commondatastorage.googleapis.com/codeskulptor-demos/DDR_assets/Kangaroo_MusiQue_-_The_Neverwritten_Role_Playing_Game.mp3",
    },
    Track {
        id: 6,
        name: "Estudo dos Sonhos",
        url: "https://commondatastorage.googleapis.com/codeskulptor-assets/week7-button.m4a",
    },
];

#[derive(Clone, Debug)]
pub struct AudioPlayerState {
    pub tracks: Vec<Track>,
    pub current: Option<u32>,
    pub playing: bool,
    /// Slider position in `0.0..=1.0`.
    pub volume: f64,
    pub muted: bool,
    pub dialog_open: bool,
}

impl Default for AudioPlayerState {
    fn default() -> Self {
        Self {
            tracks: TRACKS.to_vec(),
            current: None,
            playing: false,
            volume: DEFAULT_VOLUME,
            muted: false,
            dialog_open: false,
        }
    }
}

impl AudioPlayerState {
    /// Select and start a track. Returns the track to load, or `None` for an unknown id.
    pub fn play_track(&mut self, id: u32) -> Option<Track> {
        let track = self.tracks.iter().copied().find(|t| t.id == id)?;
        self.current = Some(id);
        self.playing = true;
        Some(track)
    }

    /// Pause or resume the current track. No effect without one.
    pub fn toggle_play(&mut self) {
        if self.current.is_some() {
            self.playing = !self.playing;
        }
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.current = None;
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = if volume.is_nan() { DEFAULT_VOLUME } else { volume.clamp(0.0, 1.0) };
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Volume to apply to the audio element.
    #[must_use]
    pub fn effective_volume(&self) -> f64 {
        if self.muted { 0.0 } else { self.volume }
    }

    #[must_use]
    pub fn current_track(&self) -> Option<Track> {
        let id = self.current?;
        self.tracks.iter().copied().find(|t| t.id == id)
    }

    #[must_use]
    pub fn current_track_name(&self) -> Option<&'static str> {
        self.current_track().map(|t| t.name)
    }
}
