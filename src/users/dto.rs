use serde::Deserialize;

/// Request body for user registration. Any `id` or timestamp fields sent
/// along are ignored.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
