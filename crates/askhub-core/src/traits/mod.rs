//! Collaborator contracts implemented outside the auth core.

pub mod mailer;

pub use mailer::Mailer;
