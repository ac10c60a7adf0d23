// src/profile/mod.rs
pub mod form;
pub mod submitter;

pub use form::{Attachment, FormField, FormValue, ProfileForm};
pub use submitter::{ConsoleNotifier, Notifier, ProfileSubmitter};
