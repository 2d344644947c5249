use crate::domain::{models::booking::{Booking, BookingStatus, DateRange}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::{DateTime, Utc};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, name, email, phone, event_type, guests, from_date, to_date, check_in, check_out, message, status, source_address, created_at, confirmed_at, rejected_at, rejection_reason)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.name).bind(&booking.email).bind(&booking.phone)
            .bind(&booking.event_type).bind(booking.guests).bind(booking.from_date).bind(booking.to_date)
            .bind(&booking.check_in).bind(&booking.check_out).bind(&booking.message).bind(booking.status)
            .bind(&booking.source_address).bind(booking.created_at).bind(booking.confirmed_at)
            .bind(booking.rejected_at).bind(&booking.rejection_reason)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_recent_by_email(&self, email: &str, since: DateTime<Utc>) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE email = ? AND created_at >= ? ORDER BY created_at DESC LIMIT 1")
            .bind(email).bind(since)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_confirmed_overlap(&self, range: &DateRange, exclude_id: Option<&str>) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE status = 'confirmed' AND from_date <= ? AND to_date >= ? AND (? IS NULL OR id != ?)
             ORDER BY from_date ASC LIMIT 1"
        )
            .bind(range.to_date).bind(range.from_date).bind(exclude_id).bind(exclude_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_confirmed_ranges(&self) -> Result<Vec<DateRange>, AppError> {
        sqlx::query_as::<_, DateRange>("SELECT from_date, to_date FROM bookings WHERE status = 'confirmed' ORDER BY from_date ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, status: Option<BookingStatus>) -> Result<Vec<Booking>, AppError> {
        match status {
            Some(status) => sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE status = ? ORDER BY created_at DESC")
                .bind(status).fetch_all(&self.pool).await.map_err(AppError::Database),
            None => sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool).await.map_err(AppError::Database),
        }
    }

    async fn confirm_if_pending(&self, id: &str, confirmed_at: DateTime<Utc>) -> Result<Option<Booking>, AppError> {
        // SQLite serializes writers, so the overlap guard and the status flip
        // are evaluated against the same committed state.
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'confirmed', confirmed_at = ?
             WHERE id = ? AND status = 'pending'
             AND NOT EXISTS (
                 SELECT 1 FROM bookings AS other
                 WHERE other.status = 'confirmed' AND other.id != bookings.id
                 AND other.from_date <= bookings.to_date AND other.to_date >= bookings.from_date
             )
             RETURNING *"
        )
            .bind(confirmed_at).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn reject_if_pending(&self, id: &str, reason: &str, rejected_at: DateTime<Utc>) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'rejected', rejected_at = ?, rejection_reason = ?
             WHERE id = ? AND status = 'pending'
             RETURNING *"
        )
            .bind(rejected_at).bind(reason).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}
