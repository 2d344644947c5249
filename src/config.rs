use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub admin_token: String,
    pub venue_name: String,
    pub venue_contact_email: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            admin_token: env::var("ADMIN_TOKEN").expect("ADMIN_TOKEN must be set"),
            venue_name: env::var("VENUE_NAME").unwrap_or_else(|_| "Our Venue".to_string()),
            venue_contact_email: env::var("VENUE_CONTACT_EMAIL").ok().filter(|v| !v.is_empty()),
        }
    }
}
