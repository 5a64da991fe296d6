mod app;
mod components;
pub mod form;
mod state;

pub use app::InvitationApp;
pub use form::GuestbookForm;
