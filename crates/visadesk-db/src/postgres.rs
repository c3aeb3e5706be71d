//! PostgreSQL-backed repositories.

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use visadesk_core::AppError;
use visadesk_models::applications::{
    Application, ApplicationOwner, ApplicationWithOwner, NewApplication, StatusUpdate,
};
use visadesk_models::users::{NewUser, User};
use visadesk_models::{ApplicationId, Email, UserId};

use crate::repository::{ApplicationRepository, UserRepository};

const USER_COLUMNS: &str = "id, email, password, role, created_at, updated_at";

const APPLICATION_COLUMNS: &str = "id, user_id, personal_info, travel_info, status, \
     admin_notes, version, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(FromRow)]
struct ApplicationOwnerRow {
    #[sqlx(flatten)]
    application: Application,
    owner_email: Option<Email>,
}

impl From<ApplicationOwnerRow> for ApplicationWithOwner {
    fn from(row: ApplicationOwnerRow) -> Self {
        let owner = row.owner_email.map(|email| ApplicationOwner {
            id: row.application.user_id,
            email,
        });
        Self {
            application: row.application,
            owner,
        }
    }
}

#[async_trait]
impl UserRepository for PgStore {
    #[instrument(skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by ID")
            .map_err(AppError::database)
    }

    #[instrument(skip_all, fields(role = %user.role))]
    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password, role) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::email_taken();
            }
            AppError::database(anyhow!(e).context("Failed to insert user"))
        })
    }

    #[instrument(skip_all)]
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch users")
        .map_err(AppError::database)
    }
}

#[async_trait]
impl ApplicationRepository for PgStore {
    #[instrument(skip_all, fields(user_id = %application.user_id))]
    async fn insert(&self, application: NewApplication) -> Result<Application, AppError> {
        sqlx::query_as::<_, Application>(&format!(
            "INSERT INTO applications (user_id, personal_info, travel_info) \
             VALUES ($1, $2, $3) RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(application.user_id)
        .bind(Json(application.personal_info))
        .bind(Json(application.travel_info))
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert application")
        .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Application>, AppError> {
        sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications \
             WHERE user_id = $1 ORDER BY created_at, id"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch applications by owner")
        .map_err(AppError::database)
    }

    #[instrument(skip_all)]
    async fn find_all_with_owner(&self) -> Result<Vec<ApplicationWithOwner>, AppError> {
        let rows = sqlx::query_as::<_, ApplicationOwnerRow>(
            r#"
            SELECT a.id, a.user_id, a.personal_info, a.travel_info, a.status,
                   a.admin_notes, a.version, a.created_at, a.updated_at,
                   u.email AS owner_email
            FROM applications a
            LEFT JOIN users u ON u.id = a.user_id
            ORDER BY a.created_at, a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch applications")
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(ApplicationWithOwner::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ApplicationId) -> Result<Option<Application>, AppError> {
        sqlx::query_as::<_, Application>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch application by ID")
        .map_err(AppError::database)
    }

    #[instrument(skip(self, update), fields(status = %update.status))]
    async fn update_status(
        &self,
        id: ApplicationId,
        update: StatusUpdate,
    ) -> Result<Option<Application>, AppError> {
        let updated = sqlx::query_as::<_, Application>(&format!(
            "UPDATE applications \
             SET status = $2, \
                 admin_notes = COALESCE($3, admin_notes), \
                 version = version + 1, \
                 updated_at = NOW() \
             WHERE id = $1 AND ($4::INTEGER IS NULL OR version = $4) \
               AND (status <> $2 OR $3::TEXT IS NOT NULL) \
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(update.status)
        .bind(update.admin_notes.as_deref())
        .bind(update.expected_version)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update application status")
        .map_err(AppError::database)?;

        if updated.is_some() {
            return Ok(updated);
        }

        // Nothing matched: a missing row, a stale version, or a same-status
        // re-set without notes, which leaves the record as it is.
        match ApplicationRepository::find_by_id(self, id).await? {
            Some(current) => match update.expected_version {
                Some(expected) if expected != current.version => {
                    Err(AppError::version_conflict(anyhow!(
                        "Application was modified (expected version {}, found {})",
                        expected,
                        current.version
                    )))
                }
                _ => Ok(Some(current)),
            },
            None => Ok(None),
        }
    }
}
