pub mod escape;
pub mod render;

pub use render::{
    EMPTY_PLACEHOLDER, count_label, format_time, pad2, render_greeting, render_guestbook,
};
