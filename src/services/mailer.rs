use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::Settings;

#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl Mailer {
    /// With no SMTP host or sender configured the mailer stays disabled:
    /// every send logs a warning and reports failure.
    pub fn new(settings: &Settings) -> Self {
        if settings.smtp_host.trim().is_empty() || settings.email_from.trim().is_empty() {
            return Mailer {
                transport: None,
                from: settings.email_from.clone(),
            };
        }

        let creds = Credentials::new(
            settings.smtp_username.clone(),
            settings.smtp_password.clone(),
        );

        // STARTTLS submission on the relay's configured port
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
            .map(|builder| builder.port(settings.smtp_port).credentials(creds).build());

        match transport {
            Ok(t) => Mailer {
                transport: Some(t),
                from: settings.email_from.clone(),
            },
            Err(e) => {
                tracing::warn!("smtp transport setup failed: {e}");
                Mailer {
                    transport: None,
                    from: settings.email_from.clone(),
                }
            }
        }
    }

    /// Best-effort delivery: failures are logged and reported as false, never
    /// retried.
    pub async fn send_email(&self, to: &str, subject: &str, body: &str) -> bool {
        let Some(transport) = &self.transport else {
            tracing::warn!("email disabled (SMTP_HOST/EMAIL_FROM not set), dropping alert for {to}");
            return false;
        };

        let from: Mailbox = match self.from.parse() {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("bad EMAIL_FROM address {}: {e}", self.from);
                return false;
            }
        };

        let to_mailbox: Mailbox = match to.parse() {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("bad recipient address {to}: {e}");
                return false;
            }
        };

        let message = match Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
        {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("error building email for {to}: {e}");
                return false;
            }
        };

        match transport.send(message).await {
            Ok(_) => {
                tracing::info!("email sent to {to}");
                true
            }
            Err(e) => {
                tracing::warn!("error sending email to {to}: {e}");
                false
            }
        }
    }

    /// SMS is not wired to a gateway; the message is only logged.
    pub fn send_sms(&self, phone: &str, message: &str) {
        tracing::info!("SMS to {phone}: {message}");
    }

    /// Email is the delivery channel; SMS goes out additionally when the
    /// owner left a phone number.
    pub async fn send_alert(&self, email: &str, phone: Option<&str>, message: &str) -> bool {
        let sent = self.send_email(email, "🚨 Trading Alert", message).await;

        if let Some(phone) = phone {
            self.send_sms(phone, message);
        }

        sent
    }
}
