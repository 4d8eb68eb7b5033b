//! Alert delivery and notification bookkeeping.

pub mod email;
pub mod seen;

pub use email::Mailer;
pub use seen::TtlSet;
