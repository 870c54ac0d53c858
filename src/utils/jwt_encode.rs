use jsonwebtoken::{decode, DecodingKey, EncodingKey, Header, Validation};

use crate::models::{access::AccessTier, jwt::Claims};

const SESSION_TTL_SECS: usize = 12 * 60 * 60;

pub fn jwt_encode(tier: AccessTier, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "admin".to_string(),
        tier,
        iat: now,
        exp: now + SESSION_TTL_SECS,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn jwt_decode(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_keeps_tier() {
        let token = jwt_encode(AccessTier::Local, "secret").unwrap();
        let claims = jwt_decode(&token, "secret").unwrap();
        assert_eq!(claims.tier, AccessTier::Local);
        assert!(claims.exp > claims.iat);
        assert!(jwt_decode(&token, "other").is_err());
    }
}
