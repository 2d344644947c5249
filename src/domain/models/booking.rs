use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Rejected => "rejected",
        }
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed) | (BookingStatus::Pending, BookingStatus::Rejected)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "rejected" => Ok(BookingStatus::Rejected),
            other => Err(AppError::Validation(format!("Unknown booking status: {}", other))),
        }
    }
}

/// Closed calendar-date interval. Both ends are reserved days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl DateRange {
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> Result<Self, AppError> {
        if from_date > to_date {
            return Err(AppError::Validation("fromDate must not be after toDate".into()));
        }
        Ok(Self { from_date, to_date })
    }

    /// Inclusive on both ends: ranges sharing a boundary day overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.from_date <= other.to_date && self.to_date >= other.from_date
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub guests: i32,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub check_in: String,
    pub check_out: String,
    pub message: Option<String>,
    pub status: BookingStatus,
    pub source_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

/// A candidate that already passed structural validation.
#[derive(Debug, Clone)]
pub struct NewBookingParams {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub guests: i32,
    pub dates: DateRange,
    pub check_in: String,
    pub check_out: String,
    pub message: Option<String>,
    pub source_address: Option<String>,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            email: normalize_email(&params.email),
            phone: params.phone,
            event_type: params.event_type,
            guests: params.guests,
            from_date: params.dates.from_date,
            to_date: params.dates.to_date,
            check_in: params.check_in,
            check_out: params.check_out,
            message: params.message,
            status: BookingStatus::Pending,
            source_address: params.source_address,
            created_at: Utc::now(),
            confirmed_at: None,
            rejected_at: None,
            rejection_reason: None,
        }
    }

    pub fn dates(&self) -> DateRange {
        DateRange {
            from_date: self.from_date,
            to_date: self.to_date,
        }
    }
}
