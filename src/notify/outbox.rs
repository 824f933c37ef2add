use std::fs::{create_dir_all, write};
use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use crate::notify::{EmailMessage, MailTransport, NotifyError};

/// Drops every message as an `.eml` file into a directory for a mail relay to pick up.
pub struct OutboxTransport {
    outbox_dir: PathBuf
}

impl OutboxTransport {
    pub fn new(outbox_dir: impl Into<PathBuf>) -> Self {
        Self { outbox_dir: outbox_dir.into() }
    }

    fn render(message: &EmailMessage) -> String {
        let mut headers = vec![
            format!("From: {}", message.from),
            format!("To: {}", message.to),
            format!("Subject: {}", message.subject),
            format!("Date: {}", Utc::now().to_rfc2822()),
        ];

        if let Some(attachment) = &message.attachment {
            headers.push(format!("X-Attachment: {}", attachment.display()));
        }

        headers.push("MIME-Version: 1.0".to_string());
        headers.push("Content-Type: text/plain; charset=utf-8".to_string());

        format!("{}\n\n{}\n", headers.join("\n"), message.body)
    }
}

impl MailTransport for OutboxTransport {
    fn deliver(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        create_dir_all(&self.outbox_dir).map_err(|error| NotifyError::io(&self.outbox_dir, error))?;

        let file_name = format!("{}-{}.eml", Utc::now().format("%Y%m%dT%H%M%S%.6f"), slug(&message.subject));
        let path = self.outbox_dir.join(file_name);

        write(&path, Self::render(message)).map_err(|error| NotifyError::io(&path, error))?;

        debug!("Queued message in {}", path.display());

        Ok(())
    }
}

fn slug(subject: &str) -> String {
    let mut slug = String::with_capacity(subject.len());

    for c in subject.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }

    slug.trim_end_matches('-').to_string()
}
