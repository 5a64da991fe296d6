pub mod countdown;
pub mod cover;
pub mod gift;
pub mod guestbook;
