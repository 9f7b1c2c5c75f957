use serde::{Deserialize, Serialize};

/// Access-token claims minted by the external auth service. This service
/// only verifies them; it never issues or refreshes tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub role: String,
}
