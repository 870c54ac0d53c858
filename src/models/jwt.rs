use serde::{Deserialize, Serialize};

use crate::models::access::AccessTier;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub tier: AccessTier,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub tier: AccessTier,
    pub token: String,
}
