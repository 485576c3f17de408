use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::users::{
    dto::User,
    error::UserError,
    repo_types::{department_column, UserRow},
};

/// Storage seam for the `users` table. Every method is one independent
/// statement; store errors are returned as-is apart from the not-found and
/// unique-violation translations done by `UserError::from`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, UserError>;
    async fn get_all(&self) -> Result<Vec<User>, UserError>;
    async fn get_by_id(&self, id: i64) -> Result<User, UserError>;
    async fn get_by_user_name(&self, user_name: &str) -> Result<User, UserError>;
    async fn update(&self, user: &User) -> Result<User, UserError>;
    /// Removing an id that has no row is not an error.
    async fn delete(&self, id: i64) -> Result<(), UserError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (user_name, first_name, last_name, email, user_status, department)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_name, first_name, last_name, email, user_status, department
            "#,
        )
        .bind(&user.user_name)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.user_status)
        .bind(department_column(user))
        .fetch_one(&self.db)
        .await?;
        debug!(user_id = row.id, "user row inserted");
        Ok(row.into())
    }

    async fn get_all(&self) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, user_name, first_name, last_name, email, user_status, department
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, user_name, first_name, last_name, email, user_status, department
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        row.map(User::from).ok_or(UserError::NotFound)
    }

    async fn get_by_user_name(&self, user_name: &str) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, user_name, first_name, last_name, email, user_status, department
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(&self.db)
        .await?;
        row.map(User::from).ok_or(UserError::NotFound)
    }

    async fn update(&self, user: &User) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
               SET user_name = $2, first_name = $3, last_name = $4,
                   email = $5, user_status = $6, department = $7
             WHERE id = $1
            RETURNING id, user_name, first_name, last_name, email, user_status, department
            "#,
        )
        .bind(user.id)
        .bind(&user.user_name)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.user_status)
        .bind(department_column(user))
        .fetch_optional(&self.db)
        .await?;
        row.map(User::from).ok_or(UserError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        debug!(
            user_id = id,
            rows = result.rows_affected(),
            "user delete executed"
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) use memory::{FailingUserRepository, InMemoryUserRepository};

#[cfg(test)]
mod memory {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;

    /// Mirrors the table's unique constraints so service and handler tests
    /// see the same conflicts the database would raise.
    #[derive(Default)]
    pub(crate) struct InMemoryUserRepository {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        rows: BTreeMap<i64, User>,
        last_id: i64,
    }

    impl Inner {
        fn check_unique(&self, user: &User) -> Result<(), UserError> {
            for other in self.rows.values().filter(|o| o.id != user.id) {
                if other.user_name == user.user_name {
                    return Err(UserError::Conflict("user_name"));
                }
                if other.email == user.email {
                    return Err(UserError::Conflict("email"));
                }
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, user: &User) -> Result<User, UserError> {
            let mut inner = self.inner.lock().unwrap();
            let stored = User {
                id: inner.last_id + 1,
                ..user.clone()
            };
            inner.check_unique(&stored)?;
            inner.last_id = stored.id;
            inner.rows.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn get_all(&self) -> Result<Vec<User>, UserError> {
            Ok(self.inner.lock().unwrap().rows.values().cloned().collect())
        }

        async fn get_by_id(&self, id: i64) -> Result<User, UserError> {
            let inner = self.inner.lock().unwrap();
            inner.rows.get(&id).cloned().ok_or(UserError::NotFound)
        }

        async fn get_by_user_name(&self, user_name: &str) -> Result<User, UserError> {
            let inner = self.inner.lock().unwrap();
            inner
                .rows
                .values()
                .find(|u| u.user_name == user_name)
                .cloned()
                .ok_or(UserError::NotFound)
        }

        async fn update(&self, user: &User) -> Result<User, UserError> {
            let mut inner = self.inner.lock().unwrap();
            if !inner.rows.contains_key(&user.id) {
                return Err(UserError::NotFound);
            }
            inner.check_unique(user)?;
            inner.rows.insert(user.id, user.clone());
            Ok(user.clone())
        }

        async fn delete(&self, id: i64) -> Result<(), UserError> {
            let mut inner = self.inner.lock().unwrap();
            inner.rows.remove(&id);
            Ok(())
        }
    }

    /// Every call fails the way an unreachable database does.
    pub(crate) struct FailingUserRepository;

    fn unavailable() -> UserError {
        UserError::Store(sqlx::Error::PoolTimedOut)
    }

    #[async_trait]
    impl UserRepository for FailingUserRepository {
        async fn create(&self, _: &User) -> Result<User, UserError> {
            Err(unavailable())
        }
        async fn get_all(&self) -> Result<Vec<User>, UserError> {
            Err(unavailable())
        }
        async fn get_by_id(&self, _: i64) -> Result<User, UserError> {
            Err(unavailable())
        }
        async fn get_by_user_name(&self, _: &str) -> Result<User, UserError> {
            Err(unavailable())
        }
        async fn update(&self, _: &User) -> Result<User, UserError> {
            Err(unavailable())
        }
        async fn delete(&self, _: i64) -> Result<(), UserError> {
            Err(unavailable())
        }
    }
}
