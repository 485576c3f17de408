use serde::{Deserialize, Serialize};

/// A user record as it travels over HTTP and through the service layer.
///
/// Missing string fields deserialize as empty so the validator can name
/// them; `id` is ignored on create and overwritten from the path on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub department: String,
}

#[cfg(test)]
impl User {
    pub(crate) fn sample(user_name: &str) -> Self {
        Self {
            id: 0,
            user_name: user_name.to_string(),
            first_name: "Test".into(),
            last_name: "User".into(),
            email: format!("{user_name}@example.com"),
            user_status: "A".into(),
            department: "IT".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_is_omitted_when_empty() {
        let user = User {
            department: String::new(),
            ..User::sample("nodept")
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("department").is_none());
        assert_eq!(json["user_name"], "nodept");
    }

    #[test]
    fn department_is_present_when_set() {
        let json = serde_json::to_value(User::sample("dept")).unwrap();
        assert_eq!(json["department"], "IT");
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let user: User = serde_json::from_str(r#"{"user_name":"only"}"#).unwrap();
        assert_eq!(user.id, 0);
        assert_eq!(user.user_name, "only");
        assert!(user.first_name.is_empty());
        assert!(user.department.is_empty());
    }
}
