use anyhow::anyhow;
use tracing::instrument;
use visadesk_config::TransitionPolicy;
use visadesk_core::AppError;
use visadesk_db::ApplicationRepository;
use visadesk_models::applications::{
    Application, ApplicationWithOwner, CreateApplicationDto, NewApplication, StatusUpdate,
    UpdateApplicationStatusDto,
};
use visadesk_models::{ApplicationId, UserId};

pub struct ApplicationService;

impl ApplicationService {
    /// Create an application owned by `owner`. It always starts `pending`,
    /// without notes, at version 1.
    #[instrument(skip(applications, dto))]
    pub async fn submit(
        applications: &dyn ApplicationRepository,
        owner: UserId,
        dto: CreateApplicationDto,
    ) -> Result<Application, AppError> {
        if dto.status.is_some() || dto.admin_notes.is_some() {
            tracing::debug!("Ignoring status/adminNotes supplied on submission");
        }

        let application = applications
            .insert(NewApplication {
                user_id: owner,
                personal_info: dto.personal_info,
                travel_info: dto.travel_info,
            })
            .await?;

        tracing::info!(application_id = %application.id, "Application submitted");
        Ok(application)
    }

    #[instrument(skip(applications))]
    pub async fn list_own(
        applications: &dyn ApplicationRepository,
        owner: UserId,
    ) -> Result<Vec<Application>, AppError> {
        applications.find_by_owner(owner).await
    }

    #[instrument(skip_all)]
    pub async fn list_all(
        applications: &dyn ApplicationRepository,
    ) -> Result<Vec<ApplicationWithOwner>, AppError> {
        applications.find_all_with_owner().await
    }

    /// Set the status (and notes, when given) of an application.
    ///
    /// Under [`TransitionPolicy::Strict`] an approved or rejected application
    /// cannot move to a different status, and the update is pinned to the
    /// version that was checked so a concurrent change surfaces as a
    /// `VersionConflict` rather than slipping past the terminal rule.
    #[instrument(skip(applications, dto), fields(status = %dto.status))]
    pub async fn transition(
        applications: &dyn ApplicationRepository,
        policy: TransitionPolicy,
        id: ApplicationId,
        dto: UpdateApplicationStatusDto,
    ) -> Result<Application, AppError> {
        let mut update = StatusUpdate {
            status: dto.status,
            admin_notes: dto.admin_notes,
            expected_version: dto.expected_version,
        };

        if policy == TransitionPolicy::Strict {
            let current = applications
                .find_by_id(id)
                .await?
                .ok_or_else(application_not_found)?;

            if let Some(expected) = update.expected_version
                && expected != current.version
            {
                return Err(AppError::version_conflict(anyhow!(
                    "Application was modified (expected version {}, found {})",
                    expected,
                    current.version
                )));
            }

            if current.status.is_terminal() && current.status != update.status {
                return Err(AppError::invalid_transition(anyhow!(
                    "Cannot change status from {} to {}",
                    current.status,
                    update.status
                )));
            }

            update.expected_version = Some(current.version);
        }

        let updated = applications
            .update_status(id, update)
            .await?
            .ok_or_else(application_not_found)?;

        tracing::info!(
            application_id = %updated.id,
            version = updated.version,
            "Application status updated"
        );
        Ok(updated)
    }
}

pub(crate) fn application_not_found() -> AppError {
    AppError::not_found(anyhow!("Application not found"))
}
