use sqlx::FromRow;

use crate::users::dto::User;

/// Row of the `users` table. `department` is NULL when unset.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_status: String,
    pub department: Option<String>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            user_name: r.user_name,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            user_status: r.user_status,
            department: r.department.unwrap_or_default(),
        }
    }
}

/// Empty department is stored as NULL.
pub(crate) fn department_column(user: &User) -> Option<&str> {
    Some(user.department.as_str()).filter(|d| !d.is_empty())
}
