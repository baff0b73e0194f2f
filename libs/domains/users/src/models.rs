use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Assigned by storage, never reused
    pub id: u32,
    pub name: String,
    /// Unique across all users, compared case-sensitively
    pub email: String,
    pub age: i32,
}

/// Fields of a user that does not have an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Body of `POST /users`. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1))]
    #[schema(example = "Alice")]
    pub name: String,

    #[validate(email)]
    #[schema(example = "alice@example.com")]
    pub email: String,

    #[validate(range(exclusive_min = 0, exclusive_max = 150))]
    #[schema(example = 30, minimum = 1, maximum = 149)]
    pub age: i32,
}

/// Body of `PUT /users/{id}`.
///
/// A missing or blank `name`/`email` leaves the stored value alone. `age` is
/// always written and defaults to 0 when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub age: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let valid = CreateUser {
            name: "Alice".into(),
            email: "a@x.com".into(),
            age: 30,
        };
        assert!(valid.validate().is_ok());

        for age in [0, -1, 150, 200] {
            let input = CreateUser { age, ..valid.clone() };
            assert!(input.validate().is_err(), "age {age}");
        }

        let input = CreateUser {
            email: "not-an-email".into(),
            ..valid.clone()
        };
        assert!(input.validate().is_err());

        let input = CreateUser {
            name: String::new(),
            ..valid
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_user_defaults() {
        let input: UpdateUser = serde_json::from_str(r#"{"email":"a2@x.com"}"#).unwrap();
        assert_eq!(input.name, None);
        assert_eq!(input.email.as_deref(), Some("a2@x.com"));
        assert_eq!(input.age, 0);
    }

    #[test]
    fn test_create_user_requires_age() {
        let result: Result<CreateUser, _> =
            serde_json::from_str(r#"{"name":"Alice","email":"a@x.com"}"#);
        assert!(result.is_err());
    }
}
