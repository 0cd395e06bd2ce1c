use base64::{prelude::BASE64_STANDARD, Engine};
use uuid::Uuid;

/// The two halves of a bearer token: who it claims to be and the secret to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParts {
    pub user_id: Uuid,
    pub secret: String,
}

pub fn construct_token(user_id: &Uuid, secret: &str) -> String {
    BASE64_STANDARD.encode(format!("{user_id}.{secret}"))
}

pub fn extract_token_parts(token: &str) -> Option<TokenParts> {
    let decoded = BASE64_STANDARD.decode(token.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (id, secret) = decoded.split_once('.')?;
    if secret.is_empty() {
        return None;
    }
    Some(TokenParts {
        user_id: Uuid::parse_str(id).ok()?,
        secret: secret.to_string(),
    })
}
