//! Persona choices for pickers and request validation
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Derive ids and labels from `PersonaType` instead of a parallel table
//! - 1.0.0: Extracted from the terminal picker and the catalog endpoint

use super::PersonaType;

/// Validate a persona ID exists
pub fn is_valid_persona(id: &str) -> bool {
    PersonaType::parse(id).is_some()
}

/// Picker label for a persona, e.g. "The Innovator"
pub fn choice_label(persona: PersonaType) -> String {
    format!("The {}", persona.title())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_persona() {
        assert!(is_valid_persona("innovator"));
        assert!(is_valid_persona("artist"));
        assert!(!is_valid_persona("Artist"));
        assert!(!is_valid_persona("invalid"));
    }

    #[test]
    fn test_choices_match_catalog() {
        for persona in PersonaType::ALL {
            assert!(is_valid_persona(persona.id()));
            assert_eq!(choice_label(persona), format!("The {}", persona.title()));
        }
        assert_eq!(choice_label(PersonaType::Traditionalist), "The Traditionalist");
    }

    #[test]
    fn test_all_personas_have_unique_ids() {
        let mut ids: Vec<&str> = PersonaType::ALL.iter().map(PersonaType::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), PersonaType::ALL.len(), "Duplicate persona IDs found");
    }
}
