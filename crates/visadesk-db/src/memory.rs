//! In-process repositories for development (`STORAGE_BACKEND=memory`) and tests.
//!
//! Data lives for the lifetime of the process. Each write happens inside a
//! single write-lock section.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use visadesk_core::AppError;
use visadesk_models::applications::{
    Application, ApplicationOwner, ApplicationStatus, ApplicationWithOwner, NewApplication,
    StatusUpdate,
};
use visadesk_models::users::{NewUser, User};
use visadesk_models::{ApplicationId, Email, UserId};

use crate::repository::{ApplicationRepository, UserRepository};

#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<Vec<User>>>,
    applications: Arc<RwLock<Vec<Application>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == *email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::email_taken());
        }

        let now = Utc::now();
        let created = User {
            id: UserId::new(),
            email: user.email,
            password: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().await.clone())
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn insert(&self, application: NewApplication) -> Result<Application, AppError> {
        let now = Utc::now();
        let created = Application {
            id: ApplicationId::new(),
            user_id: application.user_id,
            personal_info: application.personal_info,
            travel_info: application.travel_info,
            status: ApplicationStatus::Pending,
            admin_notes: None,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        self.applications.write().await.push(created.clone());
        Ok(created)
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Application>, AppError> {
        let applications = self.applications.read().await;
        Ok(applications
            .iter()
            .filter(|a| a.user_id == owner)
            .cloned()
            .collect())
    }

    async fn find_all_with_owner(&self) -> Result<Vec<ApplicationWithOwner>, AppError> {
        let applications = self.applications.read().await.clone();
        let emails: HashMap<UserId, Email> = self
            .users
            .read()
            .await
            .iter()
            .map(|u| (u.id, u.email.clone()))
            .collect();

        Ok(applications
            .into_iter()
            .map(|application| {
                let owner = emails
                    .get(&application.user_id)
                    .map(|email| ApplicationOwner {
                        id: application.user_id,
                        email: email.clone(),
                    });
                ApplicationWithOwner { application, owner }
            })
            .collect())
    }

    async fn find_by_id(&self, id: ApplicationId) -> Result<Option<Application>, AppError> {
        let applications = self.applications.read().await;
        Ok(applications.iter().find(|a| a.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        update: StatusUpdate,
    ) -> Result<Option<Application>, AppError> {
        let mut applications = self.applications.write().await;
        let Some(application) = applications.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };

        if let Some(expected) = update.expected_version
            && expected != application.version
        {
            return Err(AppError::version_conflict(anyhow!(
                "Application was modified (expected version {}, found {})",
                expected,
                application.version
            )));
        }

        if update.status == application.status && update.admin_notes.is_none() {
            return Ok(Some(application.clone()));
        }

        application.status = update.status;
        if let Some(notes) = update.admin_notes {
            application.admin_notes = Some(notes);
        }
        application.version += 1;
        application.updated_at = Utc::now();

        Ok(Some(application.clone()))
    }
}
