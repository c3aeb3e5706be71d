use anyhow::anyhow;
use tracing::instrument;
use visadesk_auth::create_access_token;
use visadesk_config::{JwtConfig, RegistrationConfig};
use visadesk_core::AppError;
use visadesk_db::UserRepository;
use visadesk_models::Email;
use visadesk_models::auth::{AuthResponse, LoginRequest, RegisterRequest};
use visadesk_models::users::{User, UserRole, UserView};

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all)]
    pub async fn register(
        users: &dyn UserRepository,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
        registration_config: &RegistrationConfig,
    ) -> Result<AuthResponse, AppError> {
        let email = Email::new(&dto.email).map_err(AppError::unprocessable)?;
        let role = dto.role.unwrap_or_default();

        if role == UserRole::Admin && !registration_config.allow_admin_self_registration {
            return Err(AppError::forbidden());
        }

        let user = users.create(email, &dto.password, role).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "Identity registered");

        Self::issue(&user, jwt_config)
    }

    /// Unknown email and wrong password fail identically and cost one bcrypt
    /// verification each.
    #[instrument(skip_all)]
    pub async fn login(
        users: &dyn UserRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let user = match Email::new(&dto.email) {
            Ok(email) => users.find_by_email(&email).await?,
            Err(_) => None,
        };

        let valid = users.validate_password(user.as_ref(), &dto.password)?;

        match user {
            Some(user) if valid => {
                tracing::info!(user_id = %user.id, "Login succeeded");
                Self::issue(&user, jwt_config)
            }
            _ => {
                tracing::debug!("Login rejected");
                Err(AppError::invalid_credentials())
            }
        }
    }

    fn issue(user: &User, jwt_config: &JwtConfig) -> Result<AuthResponse, AppError> {
        let access_token = create_access_token(user.id, &user.email, user.role, jwt_config)
            .map_err(|e| AppError::internal(anyhow!(e).context("Failed to issue session token")))?;

        Ok(AuthResponse {
            access_token,
            user: UserView::from(user),
        })
    }
}
