use std::sync::Arc;

use tera::{Context, Tera};
use tracing::{info, warn};

use crate::domain::models::{booking::Booking, email::OutgoingEmail};
use crate::domain::ports::EmailService;
use crate::error::AppError;

pub const REJECTION_TEMPLATE: &str = "rejection.html";
pub const REJECTION_SUBJECT: &str = "Booking Request - Unable to Confirm";

pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(REJECTION_TEMPLATE, include_str!("../../templates/rejection.html"))?;
    Ok(tera)
}

/// Result of the best-effort email attached to a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent,
    Failed(String),
}

impl NotificationOutcome {
    pub fn warning(&self) -> Option<String> {
        match self {
            NotificationOutcome::Sent => None,
            NotificationOutcome::Failed(reason) => Some(format!("Requestor could not be notified: {}", reason)),
        }
    }
}

pub struct RejectionNotifier {
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
    venue_name: String,
    reply_to: Option<String>,
}

impl RejectionNotifier {
    pub fn new(
        email_service: Arc<dyn EmailService>,
        templates: Arc<Tera>,
        venue_name: String,
        reply_to: Option<String>,
    ) -> Self {
        Self { email_service, templates, venue_name, reply_to }
    }

    pub fn render(&self, booking: &Booking) -> Result<OutgoingEmail, AppError> {
        let mut context = Context::new();
        context.insert("user_name", &booking.name);
        context.insert("venue_name", &self.venue_name);
        context.insert("reason", booking.rejection_reason.as_deref().unwrap_or_default());
        context.insert("from_date", &booking.from_date.format("%B %-d, %Y").to_string());
        context.insert("to_date", &booking.to_date.format("%B %-d, %Y").to_string());
        context.insert("event_type", &booking.event_type);
        context.insert("guests", &booking.guests);
        context.insert("phone", &booking.phone);

        let html_body = self.templates.render(REJECTION_TEMPLATE, &context)
            .map_err(|e| AppError::Notification(format!("Template render error: {:?}", e)))?;

        Ok(OutgoingEmail {
            recipient: booking.email.clone(),
            subject: REJECTION_SUBJECT.to_string(),
            html_body,
            reply_to: self.reply_to.clone(),
        })
    }

    /// Never fails: a rendering or delivery error is folded into the outcome.
    pub async fn notify(&self, booking: &Booking) -> NotificationOutcome {
        let result = match self.render(booking) {
            Ok(email) => self.email_service.send(&email).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!("Rejection email sent to {}", booking.email);
                NotificationOutcome::Sent
            }
            Err(e) => {
                warn!("Rejection email for booking {} failed: {}", booking.id, e);
                NotificationOutcome::Failed(e.to_string())
            }
        }
    }
}
