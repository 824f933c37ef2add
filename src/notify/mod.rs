mod email;
mod errors;
mod outbox;

pub use email::{EmailMessage, EmailNotifier};
pub use errors::NotifyError;
pub use outbox::OutboxTransport;

/// Delivers a fully built message. Implementations own the transport details.
pub trait MailTransport: Send + Sync + 'static {
    fn deliver(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}
