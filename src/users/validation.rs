use crate::users::{dto::User, error::ValidationError};

/// Presence check on the required fields, in a fixed order. Only the first
/// empty field is reported.
pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    let required = [
        ("user_name", &user.user_name),
        ("first_name", &user.first_name),
        ("last_name", &user.last_name),
        ("email", &user.email),
        ("user_status", &user.user_status),
    ];
    match required.into_iter().find(|(_, value)| value.is_empty()) {
        Some((field, _)) => Err(ValidationError { field }),
        None => Ok(()),
    }
}
