use crate::models::domain::UserRole;

#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: i32,
    pub surname: String,
    pub firstname: String,
    pub birthdate: String,
    pub nickname: String,
    pub email: String,
    pub password: String,
    pub user_role: UserRole,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.firstname, self.surname, self.nickname)
    }
}

// The backend ships the password field, keep it out of logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("surname", &self.surname)
            .field("firstname", &self.firstname)
            .field("birthdate", &self.birthdate)
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("user_role", &self.user_role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user() -> User {
        User {
            user_id: 1,
            surname: "Doe".to_string(),
            firstname: "Jane".to_string(),
            birthdate: "1990-04-01".to_string(),
            nickname: "jd".to_string(),
            email: "jane@example.com".to_string(),
            password: "hunter2".to_string(),
            user_role: UserRole {
                user_role_id: 2,
                user_role: "PLAYER".to_string(),
            },
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(make_user().display_name(), "Jane Doe (jd)");
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", make_user());

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("jane@example.com"));
    }
}
