//! Tutor overlay conversation state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The overlay keeps its transcript in memory only. Each send snapshots the
//! recent history, appends the user's turn, and holds the send control
//! disabled until the gateway answers or fails.
//!
//! ERROR HANDLING
//! ==============
//! A failed send never surfaces the underlying error; the transcript gains a
//! fixed fallback reply and the overlay becomes usable again.

#[cfg(test)]
#[path = "tutor_test.rs"]
mod tutor_test;

use models::api::TutorRequest;
use models::chat::{ChatMessage, FALLBACK_REPLY, IMAGE_QUESTION, TutorContext, history_window};

/// Voice input lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoicePhase {
    #[default]
    Idle,
    Recording,
    Transcribing,
}

/// What the user is sending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outgoing {
    /// The current contents of the input box.
    Text,
    /// A selected image as a data URL.
    Image(String),
}

#[derive(Clone, Debug, Default)]
pub struct TutorState {
    pub is_open: bool,
    pub context: TutorContext,
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub loading: bool,
    /// Read replies aloud.
    pub audio_enabled: bool,
    pub voice: VoicePhase,
    pub show_image_picker: bool,
}

impl TutorState {
    /// Open the overlay for `context`, replacing any previous transcript with the greeting.
    pub fn open(&mut self, context: TutorContext, id: String, now_ms: i64) {
        let greeting = ChatMessage::assistant(id, context.greeting(), now_ms);
        self.context = context;
        self.messages = vec![greeting];
        self.input.clear();
        self.loading = false;
        self.voice = VoicePhase::Idle;
        self.show_image_picker = false;
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.show_image_picker = false;
    }

    /// Whether the send control is enabled.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Append the user's turn and mark a request in flight.
    ///
    /// Returns the gateway request to issue, or `None` when a request is
    /// already pending or there is nothing to send. History is taken before
    /// the new turn is appended.
    pub fn begin_send(&mut self, outgoing: Outgoing, id: String, now_ms: i64) -> Option<TutorRequest> {
        if self.loading {
            return None;
        }
        let (question, image_data) = match outgoing {
            Outgoing::Text => {
                let text = self.input.trim();
                if text.is_empty() {
                    return None;
                }
                (text.to_owned(), None)
            }
            Outgoing::Image(data_url) => {
                if data_url.is_empty() {
                    return None;
                }
                (IMAGE_QUESTION.to_owned(), Some(data_url))
            }
        };

        let history = history_window(&self.messages);
        self.messages.push(ChatMessage::user(id, question.clone(), now_ms, image_data.clone()));
        self.input.clear();
        self.loading = true;
        self.show_image_picker = false;

        Some(TutorRequest { context: self.context.clone(), question, image_data, history })
    }

    pub fn finish_send(&mut self, reply: String, id: String, now_ms: i64) {
        self.messages.push(ChatMessage::assistant(id, reply, now_ms));
        self.loading = false;
    }

    pub fn fail_send(&mut self, id: String, now_ms: i64) {
        self.finish_send(FALLBACK_REPLY.to_owned(), id, now_ms);
    }

    /// Start recording. Returns `false` when already recording or transcribing.
    pub fn begin_recording(&mut self) -> bool {
        if self.voice != VoicePhase::Idle {
            return false;
        }
        self.voice = VoicePhase::Recording;
        true
    }

    /// Stop recording and wait for the transcript. Returns `false` if not recording.
    pub fn stop_recording(&mut self) -> bool {
        if self.voice != VoicePhase::Recording {
            return false;
        }
        self.voice = VoicePhase::Transcribing;
        true
    }

    /// A non-empty transcript replaces the input box.
    pub fn finish_transcription(&mut self, text: Option<String>) {
        self.voice = VoicePhase::Idle;
        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            self.input = text;
        }
    }

    pub fn toggle_audio(&mut self) {
        self.audio_enabled = !self.audio_enabled;
    }
}
