use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::AppConfig;
use crate::db;
use crate::users::{
    repo::{PgUserRepository, UserRepository},
    services::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Loads config, connects, migrates and wires repository → service.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let pool = db::connect(&config.db).await?;
        db::migrate(&pool).await?;

        let repo = Arc::new(PgUserRepository::new(pool)) as Arc<dyn UserRepository>;
        Ok(Self::from_parts(UserService::new(repo), config))
    }

    pub fn from_parts(users: UserService, config: Arc<AppConfig>) -> Self {
        Self { users, config }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::users::repo::InMemoryUserRepository;

        let config = AppConfig::from_lookup(|_| None).expect("default config");
        let repo = Arc::new(InMemoryUserRepository::default()) as Arc<dyn UserRepository>;
        Self::from_parts(UserService::new(repo), Arc::new(config))
    }
}

impl FromRef<AppState> for UserService {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}
