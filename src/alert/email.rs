//! SMTP delivery of blowout alerts.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::Result;
use crate::stats::types::GameSummary;

/// SMTP password for the sender account.
pub const SMTP_PASSWORD_ENV_VAR: &str = "POS_WATCH_SMTP_PASSWORD";

pub struct Mailer {
    transport: SmtpTransport,
    from: Mailbox,
    recipients: Vec<Mailbox>,
}

impl Mailer {
    /// Build a STARTTLS relay. The sender address doubles as the SMTP
    /// username; the password comes from `POS_WATCH_SMTP_PASSWORD` and is
    /// optional for relays that do not authenticate.
    pub fn new(smtp_host: &str, from: &str, recipients: &[String]) -> Result<Self> {
        let from: Mailbox = from.parse()?;
        let recipients = recipients
            .iter()
            .map(|r| r.parse())
            .collect::<std::result::Result<Vec<Mailbox>, _>>()?;

        let mut builder = SmtpTransport::starttls_relay(smtp_host)?;
        if let Ok(password) = std::env::var(SMTP_PASSWORD_ENV_VAR) {
            builder = builder.credentials(Credentials::new(from.email.to_string(), password));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            recipients,
        })
    }

    /// One alert naming both teams, their scores, and the inning.
    pub fn send_blowout_alert(&self, game: &GameSummary) -> Result<()> {
        let message = self.build_alert(game)?;
        self.transport.send(&message)?;
        Ok(())
    }

    fn build_alert(&self, game: &GameSummary) -> Result<Message> {
        let subject = format!("Blowout Alert: {} vs {}", game.home_name, game.away_name);
        let body = format!(
            "{} {}\n{} {}\nInning: {}",
            game.home_name,
            game.home_score,
            game.away_name,
            game.away_score,
            game.current_inning.unwrap_or(0),
        );

        let mut builder = Message::builder().from(self.from.clone()).subject(subject);
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }
        Ok(builder.body(body)?)
    }
}
