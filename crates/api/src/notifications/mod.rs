//! Outbound notifications.
//!
//! Review submissions trigger a best-effort email to the site administrator.
//! Delivery runs on a spawned task; a failed send is logged and never
//! surfaces to the submitting client.

pub mod mailer;

pub use mailer::{EmailConfig, Mailer};
