use std::time::{Duration, Instant};

use crate::common::GuestMessage;

use super::form::GuestbookForm;

/// How long the "copied" toast stays up.
pub const TOAST_DURATION: Duration = Duration::from_millis(1600);

/// Countdown tick.
pub const REPAINT_INTERVAL: Duration = Duration::from_secs(1);

/// Local state of the invitation window.
pub struct AppState {
    pub cover_open: bool,
    pub recipient: Option<String>,
    pub form: GuestbookForm,
    /// Guestbook entries as last listed, newest first.
    pub entries: Vec<GuestMessage>,
    toast_until: Option<Instant>,
    /// Blocking message shown when copying failed everywhere.
    pub manual_copy: Option<String>,
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new(recipient: Option<String>) -> Self {
        Self {
            cover_open: false,
            form: GuestbookForm::prefilled(recipient.as_deref()),
            recipient,
            entries: Vec::new(),
            toast_until: None,
            manual_copy: None,
            last_error: None,
        }
    }

    pub fn open_cover(&mut self) {
        self.cover_open = true;
    }

    pub fn set_entries(&mut self, entries: Vec<GuestMessage>) {
        self.entries = entries;
    }

    /// Show the toast from `now`; a toast already up is restarted.
    pub fn show_toast(&mut self, now: Instant) {
        self.toast_until = Some(now + TOAST_DURATION);
    }

    pub fn toast_visible(&self, now: Instant) -> bool {
        self.toast_until.is_some_and(|until| now < until)
    }

    /// Delay until the next redraw: the countdown tick, or sooner when a
    /// showing toast expires first.
    pub fn next_repaint(&self, now: Instant) -> Duration {
        match self.toast_until {
            Some(until) if now < until => REPAINT_INTERVAL.min(until - now),
            _ => REPAINT_INTERVAL,
        }
    }
}
