//! Persona selection records
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{ObjectValidator, ValidationIssue};

/// A selection as submitted by a client, before it has an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPersona {
    pub user_id: i64,
    /// Raw persona id; not restricted to the five archetypes
    pub persona_type: String,
    /// Client-supplied timestamp, stored as given
    pub timestamp: String,
}

impl NewPersona {
    /// Validate a JSON body, reporting every problem at once
    pub fn from_json(value: &Value) -> Result<NewPersona, Vec<ValidationIssue>> {
        let mut v = ObjectValidator::new(value);
        let user_id = v.integer("userId");
        let persona_type = v.string("personaType");
        let timestamp = v.string("timestamp");
        let issues = v.into_issues();

        match (user_id, persona_type, timestamp) {
            (Some(user_id), Some(persona_type), Some(timestamp)) if issues.is_empty() => {
                Ok(NewPersona {
                    user_id,
                    persona_type,
                    timestamp,
                })
            }
            _ => Err(issues),
        }
    }

    pub fn into_record(self, id: i64) -> PersonaRecord {
        PersonaRecord {
            id,
            user_id: self.user_id,
            persona_type: self.persona_type,
            timestamp: self.timestamp,
        }
    }
}

/// A stored selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaRecord {
    pub id: i64,
    pub user_id: i64,
    pub persona_type: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_valid() {
        let body = json!({
            "userId": 1,
            "personaType": "innovator",
            "timestamp": "2024-03-01T12:00:00.000Z"
        });
        let persona = NewPersona::from_json(&body).unwrap();
        assert_eq!(persona.user_id, 1);
        assert_eq!(persona.persona_type, "innovator");
        assert_eq!(persona.timestamp, "2024-03-01T12:00:00.000Z");
    }

    #[test]
    fn test_from_json_accepts_unknown_persona() {
        let body = json!({"userId": 3, "personaType": "banker", "timestamp": "now"});
        assert_eq!(NewPersona::from_json(&body).unwrap().persona_type, "banker");
    }

    #[test]
    fn test_from_json_reports_every_field() {
        let body = json!({"userId": "1", "timestamp": 5});
        let issues = NewPersona::from_json(&body).unwrap_err();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::new(&["userId"], "Expected integer, received string"),
                ValidationIssue::new(&["personaType"], "Required"),
                ValidationIssue::new(&["timestamp"], "Expected string, received integer"),
            ]
        );
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let issues = NewPersona::from_json(&json!("innovator")).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].path.is_empty());
    }

    #[test]
    fn test_record_uses_camel_case() {
        let record = NewPersona {
            user_id: 7,
            persona_type: "artist".to_string(),
            timestamp: "t".to_string(),
        }
        .into_record(12);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({"id": 12, "userId": 7, "personaType": "artist", "timestamp": "t"}));
    }
}
