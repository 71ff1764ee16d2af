#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRole {
    pub user_role_id: i32,
    pub user_role: String,
}
