//! Bearer token issuing and validation (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::user::UserId;

const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT claims embedded in access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub user_id: String,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issue an access token for `user_id`.
pub fn issue_access_token(
    user_id: UserId,
    jwt_secret: &str,
    expiry_secs: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        user_id: user_id.to_string(),
        token_type: ACCESS_TOKEN_TYPE.to_string(),
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };

    let encoding_key = EncodingKey::from_secret(jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
}

/// Validate a JWT and return the claims.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let validation = Validation::default();

    jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized)
}

/// Validate an access token and extract the user it was issued for.
pub fn user_id_from_token(token: &str, jwt_secret: &str) -> Result<UserId, AppError> {
    let claims = validate_token(token, jwt_secret)?;
    if claims.token_type != ACCESS_TOKEN_TYPE {
        return Err(AppError::Unauthorized);
    }
    claims.user_id.parse().map_err(|_| AppError::Unauthorized)
}
