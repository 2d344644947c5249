use std::sync::Arc;
use crate::domain::ports::{AdminAuthorizer, BookingRepository, EmailService};
use crate::domain::services::booking_service::BookingService;
use crate::domain::services::notification::RejectionNotifier;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub admin_auth: Arc<dyn AdminAuthorizer>,
    pub booking_service: Arc<BookingService>,
}

impl AppState {
    pub fn new(
        config: Config,
        booking_repo: Arc<dyn BookingRepository>,
        email_service: Arc<dyn EmailService>,
        admin_auth: Arc<dyn AdminAuthorizer>,
        templates: Arc<Tera>,
    ) -> Self {
        let notifier = RejectionNotifier::new(
            email_service,
            templates,
            config.venue_name,
            config.venue_contact_email,
        );
        let booking_service = Arc::new(BookingService::new(booking_repo, notifier));

        Self {
            admin_auth,
            booking_service,
        }
    }
}
