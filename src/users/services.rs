use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::users::{dto::User, error::UserError, repo::UserRepository, validation::validate_user};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_users(&self) -> Result<Vec<User>, UserError> {
        self.repo.get_all().await
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<User, UserError> {
        self.repo.get_by_id(id).await
    }

    /// Validates, looks up the user name, then inserts.
    ///
    /// The lookup only short-circuits the common case. Two concurrent creates
    /// can both miss it; the table's unique constraint decides, and its
    /// `user_name` violation is reported the same way as a lookup hit.
    pub async fn create_user(&self, user: User) -> Result<User, UserError> {
        validate_user(&user)?;
        debug!(user_name = %user.user_name, "validated user");

        match self.repo.get_by_user_name(&user.user_name).await {
            Ok(existing) => {
                warn!(user_name = %user.user_name, existing_id = existing.id, "user name taken");
                return Err(UserError::AlreadyExists);
            }
            Err(UserError::NotFound) => {}
            Err(e) => return Err(e),
        }

        let created = match self.repo.create(&user).await {
            Err(UserError::Conflict("user_name")) => return Err(UserError::AlreadyExists),
            other => other?,
        };
        info!(user_id = created.id, user_name = %created.user_name, "user created");
        Ok(created)
    }

    pub async fn update_user(&self, user: User) -> Result<User, UserError> {
        validate_user(&user)?;
        let updated = self.repo.update(&user).await?;
        info!(user_id = updated.id, "user updated");
        Ok(updated)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UserError> {
        self.repo.delete(id).await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }
}
