use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const KIND_ACCESS: &str = "access";
pub const KIND_REFRESH: &str = "refresh";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    /// "access" or "refresh". The extractor only accepts access tokens.
    pub kind: String,
    pub exp: i64,
}

impl Claims {
    pub fn access(user_id: Uuid) -> Self {
        Self {
            sub: user_id,
            kind: KIND_ACCESS.to_string(),
            exp: (Utc::now() + Duration::minutes(15)).timestamp(),
        }
    }

    pub fn refresh(user_id: Uuid) -> Self {
        Self {
            sub: user_id,
            kind: KIND_REFRESH.to_string(),
            exp: (Utc::now() + Duration::days(7)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}
