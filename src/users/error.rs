use thiserror::Error;

/// A required field that was empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} is required")]
pub struct ValidationError {
    pub field: &'static str,
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("user already exists")]
    AlreadyExists,

    /// Unique constraint violated in the store.
    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("user not found")]
    NotFound,

    #[error(transparent)]
    Store(sqlx::Error),
}

impl From<sqlx::Error> for UserError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => UserError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                let field = match db.constraint() {
                    Some(c) if c.contains("email") => "email",
                    _ => "user_name",
                };
                UserError::Conflict(field)
            }
            other => UserError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_wire_strings() {
        let missing = UserError::from(ValidationError { field: "email" });
        assert_eq!(missing.to_string(), "email is required");
        assert_eq!(UserError::AlreadyExists.to_string(), "user already exists");
        assert_eq!(
            UserError::Conflict("email").to_string(),
            "email already exists"
        );
        assert_eq!(UserError::NotFound.to_string(), "user not found");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            UserError::from(sqlx::Error::RowNotFound),
            UserError::NotFound
        ));
    }

    #[test]
    fn other_driver_errors_are_kept() {
        assert!(matches!(
            UserError::from(sqlx::Error::PoolTimedOut),
            UserError::Store(_)
        ));
    }
}
