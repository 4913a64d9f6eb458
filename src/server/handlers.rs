//! Route handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::debug;
use serde::Serialize;
use serde_json::{json, Value};

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::core::{ObjectValidator, ValidationIssue};
use crate::features::advisor::{select_response_with, Category};
use crate::features::personas::{catalog, is_valid_persona, PersonaProfile};
use crate::storage::{NewPersona, PersonaRecord};

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub category: Category,
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "storage": state.store.backend_name(),
    }))
}

/// `POST /api/personas`
pub async fn create_persona(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<PersonaRecord>)> {
    let value = parse_body(&body)?;
    let persona = NewPersona::from_json(&value).map_err(ApiError::Validation)?;
    if !is_valid_persona(&persona.persona_type) {
        debug!("Storing unrecognised persona type '{}'", persona.persona_type);
    }
    let record = state.store.save_persona(persona).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/personas/:user_id`
pub async fn list_personas(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Vec<PersonaRecord>>> {
    match parse_user_id(&raw_id).ok_or(ApiError::InvalidUserId)? {
        PathUserId::Id(user_id) => Ok(Json(state.store.personas_by_user(user_id).await?)),
        PathUserId::OutOfRange => {
            debug!("User id '{raw_id}' is out of range, nothing stored for it");
            Ok(Json(Vec::new()))
        }
    }
}

/// `GET /api/persona-types`
pub async fn persona_types() -> Json<Vec<PersonaProfile>> {
    Json(catalog())
}

/// `POST /api/chat`
pub async fn chat(body: Bytes) -> ApiResult<Json<ChatReply>> {
    let value = parse_body(&body)?;
    let mut v = ObjectValidator::new(&value);
    let message = v.string("message");
    let persona = v.string("personaType");
    let issues = v.into_issues();

    let (Some(message), Some(persona)) = (message, persona) else {
        return Err(ApiError::Validation(issues));
    };

    let reply = select_response_with(&message, &persona, &mut rand::rng());
    Ok(Json(ChatReply {
        reply: reply.text.to_string(),
        category: reply.source.category(),
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Decode a JSON body. An empty body counts as an empty object.
fn parse_body(body: &[u8]) -> ApiResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|e| {
        ApiError::Validation(vec![ValidationIssue::root(format!("Invalid JSON: {e}"))])
    })
}

/// A numeric user id taken from the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathUserId {
    Id(i64),
    /// Numeric, but too large for any stored user id
    OutOfRange,
}

/// Integer prefix of a path segment.
///
/// Leading whitespace and one sign are allowed, then at least one digit;
/// anything after the digits is ignored ("12abc" is 12). `None` means the
/// segment has no digits at all.
pub fn parse_user_id(raw: &str) -> Option<PathUserId> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }

    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }

    Some(
        trimmed[..sign_len + digits]
            .parse()
            .map_or(PathUserId::OutOfRange, PathUserId::Id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id_plain() {
        assert_eq!(parse_user_id("1"), Some(PathUserId::Id(1)));
        assert_eq!(parse_user_id("42"), Some(PathUserId::Id(42)));
        assert_eq!(parse_user_id("007"), Some(PathUserId::Id(7)));
    }

    #[test]
    fn test_parse_user_id_prefix() {
        assert_eq!(parse_user_id("12abc"), Some(PathUserId::Id(12)));
        assert_eq!(parse_user_id("3.9"), Some(PathUserId::Id(3)));
        assert_eq!(parse_user_id("  8"), Some(PathUserId::Id(8)));
        assert_eq!(parse_user_id("-5"), Some(PathUserId::Id(-5)));
        assert_eq!(parse_user_id("+5"), Some(PathUserId::Id(5)));
    }

    #[test]
    fn test_parse_user_id_rejects() {
        assert_eq!(parse_user_id("abc"), None);
        assert_eq!(parse_user_id(""), None);
        assert_eq!(parse_user_id("-"), None);
        assert_eq!(parse_user_id("+-1"), None);
    }

    #[test]
    fn test_parse_user_id_out_of_range() {
        assert_eq!(
            parse_user_id("99999999999999999999"),
            Some(PathUserId::OutOfRange)
        );
        assert_eq!(
            parse_user_id("-99999999999999999999x"),
            Some(PathUserId::OutOfRange)
        );
        assert_eq!(
            parse_user_id("9223372036854775807"),
            Some(PathUserId::Id(i64::MAX))
        );
    }

    #[test]
    fn test_parse_body_empty_is_object() {
        assert_eq!(parse_body(b"").unwrap(), json!({}));
        assert_eq!(parse_body(b"  \n").unwrap(), json!({}));
    }

    #[test]
    fn test_parse_body_malformed() {
        match parse_body(b"{not json") {
            Err(ApiError::Validation(issues)) => {
                assert_eq!(issues.len(), 1);
                assert!(issues[0].path.is_empty());
                assert!(issues[0].message.starts_with("Invalid JSON"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
