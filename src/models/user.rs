use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A planner account; timetables point at it through `user_id`
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// A validated registration with its password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(email: &str, name: &str, password_hash: String) -> Self {
        Self {
            email: normalize_email(email),
            name: name.trim().to_string(),
            password_hash,
        }
    }
}

/// Accounts are keyed by the trimmed, lowercased address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_normalizes_identity() {
        let user = NewUser::new("  Student@SNU.ac.kr ", " 김학생 ", "hash".to_string());
        assert_eq!(user.email, "student@snu.ac.kr");
        assert_eq!(user.name, "김학생");
    }

    #[test]
    fn test_response_omits_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "student@snu.ac.kr".to_string(),
            name: "김학생".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "student@snu.ac.kr");
    }
}
