//! Local UI chrome state: onboarding and toast notifications.
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of domain state (`tutor`,
//! `library`, `mind_maps`) so pages can surface outcomes without owning the
//! notification stack.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Toasts beyond this count push out the oldest.
pub const MAX_TOASTS: usize = 3;

/// Number of onboarding slides shown on first visit.
pub const INTRO_STEPS: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub show_intro: bool,
    pub intro_step: usize,
    pub toasts: Vec<Toast>,
    next_toast_id: u64,
}

impl UiState {
    pub fn start_intro(&mut self) {
        self.show_intro = true;
        self.intro_step = 0;
    }

    /// Advance the onboarding. Returns `true` once the last slide is passed.
    pub fn next_intro_step(&mut self) -> bool {
        if self.intro_step + 1 >= INTRO_STEPS {
            self.finish_intro();
            return true;
        }
        self.intro_step += 1;
        false
    }

    pub fn finish_intro(&mut self) {
        self.show_intro = false;
        self.intro_step = 0;
    }

    /// Queue a toast and return its id.
    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast { id, kind, message: message.into() });
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
        id
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }
}
