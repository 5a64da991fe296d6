pub mod clock;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use types::GuestMessage;
