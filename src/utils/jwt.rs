use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use rocket_okapi::request::OpenApiFromRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;

// Tokens are minted by the external identity provider; only `sub` is read
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: usize,
}

#[derive(Debug, OpenApiFromRequest)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

// Never rejects: anonymous callers simply have no user id
#[derive(Debug, OpenApiFromRequest)]
pub struct MaybeUser {
    pub user_id: Option<Uuid>,
}

pub fn generate_token(user_id: Uuid, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(24))
        .map(|at| at.timestamp())
        .unwrap_or(i64::MAX) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_token(token: &str, secret: &str) -> Option<Uuid> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    Uuid::parse_str(&token_data.claims.sub).ok()
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = match request.headers().get_one("Authorization") {
            Some(token) if token.starts_with("Bearer ") => token[7..].to_string(),
            _ => return Outcome::Error((Status::Unauthorized, ())),
        };

        // Without a configured secret nobody can be authenticated
        let secret = match request
            .rocket()
            .state::<AuthConfig>()
            .and_then(|auth| auth.jwt_secret.as_deref())
        {
            Some(secret) => secret,
            None => return Outcome::Error((Status::Unauthorized, ())),
        };

        match verify_token(&token, secret) {
            Some(user_id) => Outcome::Success(AuthenticatedUser { user_id }),
            None => {
                tracing::debug!("rejected bearer token");
                Outcome::Error((Status::Unauthorized, ()))
            }
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for MaybeUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let user_id = match AuthenticatedUser::from_request(request).await {
            Outcome::Success(user) => Some(user.user_id),
            _ => None,
        };
        Outcome::Success(MaybeUser { user_id })
    }
}
