use venue_booking::{
    api::router::create_router,
    config::Config,
    domain::models::booking::{Booking, DateRange, NewBookingParams},
    domain::models::email::OutgoingEmail,
    domain::ports::{BookingRepository, EmailService},
    domain::services::notification::load_templates,
    error::AppError,
    infra::auth::static_token::StaticTokenAuthorizer,
    infra::repositories::sqlite_booking_repo::SqliteBookingRepo,
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_TOKEN: &str = "test-admin-token";

#[derive(Default)]
pub struct MockEmailService {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    pub attempts: Mutex<usize>,
    pub fail: AtomicBool,
}

#[allow(dead_code)]
impl MockEmailService {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), AppError> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Notification("SMTP relay unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub repo: Arc<SqliteBookingRepo>,
    pub email: Arc<MockEmailService>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            admin_token: ADMIN_TOKEN.to_string(),
            venue_name: "Lakeside Hall".to_string(),
            venue_contact_email: Some("owner@lakeside.test".to_string()),
        };

        let repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let email = Arc::new(MockEmailService::default());
        let templates = Arc::new(load_templates().expect("templates"));

        let state = Arc::new(AppState::new(
            config,
            repo.clone(),
            email.clone(),
            Arc::new(StaticTokenAuthorizer::new(ADMIN_TOKEN.to_string())),
            templates,
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            repo,
            email,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>, admin: bool) -> (u16, Value) {
        self.request_with(method, uri, body, admin, &[]).await
    }

    pub async fn request_with(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        admin: bool,
        headers: &[(&str, &str)],
    ) -> (u16, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        if admin {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    pub async fn request_raw(&self, method: &str, uri: &str, body: &str, admin: bool) -> (u16, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if admin {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN));
        }

        let response = self.router.clone().oneshot(builder.body(Body::from(body.to_string())).unwrap()).await.unwrap();
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    /// Inserts straight into the store, bypassing admission checks.
    pub async fn seed(&self, booking: Booking) -> Booking {
        self.repo.create(&booking).await.expect("seed booking")
    }
}

#[allow(dead_code)]
pub fn params(email: &str, from: &str, to: &str) -> NewBookingParams {
    NewBookingParams {
        name: "Guest".to_string(),
        email: email.to_string(),
        phone: "555-0199".to_string(),
        event_type: "Wedding".to_string(),
        guests: 150,
        dates: DateRange::new(from.parse().unwrap(), to.parse().unwrap()).unwrap(),
        check_in: "09:00".to_string(),
        check_out: "23:00".to_string(),
        message: None,
        source_address: Some("203.0.113.9".to_string()),
    }
}

#[allow(dead_code)]
pub fn booking_json(email: &str, from: &str, to: &str) -> Value {
    serde_json::json!({
        "name": "Meera",
        "email": email,
        "phone": "555-0142",
        "eventType": "Birthday",
        "guests": 40,
        "fromDate": from,
        "toDate": to,
        "checkIn": "10:00",
        "checkOut": "18:00",
        "message": "Need the garden area"
    })
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
