pub mod clipboard;
pub mod countdown;
pub mod greeting;

pub use clipboard::{
    ClipboardError, ClipboardSink, CopyOutcome, Osc52Clipboard, SystemClipboard, copy_text,
};
pub use countdown::{Countdown, parse_event_time};
pub use greeting::recipient_from_url;
