use anyhow::anyhow;
use tracing::instrument;
use visadesk_core::AppError;
use visadesk_db::UserRepository;
use visadesk_models::users::{CreateAdminDto, MeResponse, UserRole, UserView};
use visadesk_models::{Email, UserId};

pub struct UserService;

impl UserService {
    /// Profile of the identity behind a verified token. The identity may have
    /// been removed since the token was issued.
    #[instrument(skip(users))]
    pub async fn get_me(users: &dyn UserRepository, id: UserId) -> Result<MeResponse, AppError> {
        let user = users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        Ok(MeResponse {
            email: user.email,
            role: user.role,
        })
    }

    #[instrument(skip_all)]
    pub async fn create_admin(
        users: &dyn UserRepository,
        dto: CreateAdminDto,
    ) -> Result<UserView, AppError> {
        let email = Email::new(&dto.email).map_err(AppError::unprocessable)?;
        let user = users.create(email, &dto.password, UserRole::Admin).await?;
        tracing::info!(user_id = %user.id, "Admin identity created");
        Ok(UserView::from(&user))
    }

    #[instrument(skip_all)]
    pub async fn list_users(users: &dyn UserRepository) -> Result<Vec<UserView>, AppError> {
        let all = users.find_all().await?;
        Ok(all.iter().map(UserView::from).collect())
    }
}
