use serde::{Deserialize, Serialize};

/// Claims carried by the access token: the user's external identifier,
/// email and display name, valid for one hour. No refresh tokens exist.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub iat: usize,
    pub exp: usize,
}
