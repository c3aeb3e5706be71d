//! Visa application models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;
use visadesk_core::serde::deserialize_iso8601;

use crate::ids::{ApplicationId, UserId};
use crate::value_types::Email;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Approved and rejected are final decisions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "passportNumber is required"))]
    pub passport_number: String,
    #[serde(deserialize_with = "deserialize_iso8601")]
    pub passport_expiration_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_iso8601")]
    pub date_of_birth: DateTime<Utc>,
    #[validate(length(min = 1, message = "nationality is required"))]
    pub nationality: String,
    #[validate(length(min = 1, message = "gender is required"))]
    pub gender: String,
    #[validate(length(min = 1, message = "phoneNumber is required"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TravelInfo {
    #[validate(length(min = 1, message = "destination is required"))]
    pub destination: String,
    #[serde(deserialize_with = "deserialize_iso8601")]
    pub date: DateTime<Utc>,
    #[validate(length(min = 1, message = "purpose is required"))]
    pub purpose: String,
    pub travel_companions: Vec<String>,
    pub travel_dates: Vec<String>,
    pub travel_documents: Vec<String>,
    #[validate(length(min = 1, message = "travelBudget is required"))]
    pub travel_budget: String,
    #[validate(length(min = 1, message = "travelInsurance is required"))]
    pub travel_insurance: String,
    #[serde(deserialize_with = "deserialize_iso8601")]
    pub intended_arrival_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_iso8601")]
    pub intended_departure_date: DateTime<Utc>,
}

/// A submitted visa application.
///
/// `version` starts at 1 and increases by one on every status update.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub user_id: UserId,
    #[sqlx(json)]
    pub personal_info: PersonalInfo,
    #[sqlx(json)]
    pub travel_info: TravelInfo,
    pub status: ApplicationStatus,
    pub admin_notes: Option<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApplicationOwner {
    pub id: UserId,
    pub email: Email,
}

/// Application as returned by the admin listing. `owner` is null when the
/// owning identity can no longer be resolved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationWithOwner {
    #[serde(flatten)]
    pub application: Application,
    pub owner: Option<ApplicationOwner>,
}

/// Request body for `POST /applications`.
///
/// `status` and `adminNotes` are accepted so older clients keep working, but
/// a new application is always created `pending` with no notes.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationDto {
    #[validate(nested)]
    pub personal_info: PersonalInfo,
    #[validate(nested)]
    pub travel_info: TravelInfo,
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

/// Request body for `PATCH /admin/applications/{id}/status`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationStatusDto {
    pub status: ApplicationStatus,
    #[serde(default)]
    #[validate(length(max = 2000, message = "adminNotes must be at most 2000 characters"))]
    pub admin_notes: Option<String>,
    /// When set, the update only applies if the stored version still matches.
    #[serde(default)]
    #[validate(range(min = 1, message = "expectedVersion must be positive"))]
    pub expected_version: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_id: UserId,
    pub personal_info: PersonalInfo,
    pub travel_info: TravelInfo,
}

/// Storage-level status update.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    /// Left untouched when `None`.
    pub admin_notes: Option<String>,
    pub expected_version: Option<i32>,
}
