//! # Feature: Investor Personas
//!
//! The five investor archetypes a user can pick from: innovator, traditionalist,
//! adventurer, athlete and artist. Each carries the display title, description
//! and focus tags shown by the persona picker.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Added serialisable profile view for the catalog endpoint
//! - 1.0.0: Initial release with five archetypes

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::capitalize_first;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaType {
    Innovator,
    Traditionalist,
    Adventurer,
    Athlete,
    Artist,
}

impl PersonaType {
    /// All personas in picker order
    pub const ALL: [PersonaType; 5] = [
        PersonaType::Innovator,
        PersonaType::Traditionalist,
        PersonaType::Adventurer,
        PersonaType::Athlete,
        PersonaType::Artist,
    ];

    /// Parse a wire id. Matching is exact: "Innovator" is not a known persona.
    pub fn parse(id: &str) -> Option<PersonaType> {
        PersonaType::ALL.into_iter().find(|p| p.id() == id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            PersonaType::Innovator => "innovator",
            PersonaType::Traditionalist => "traditionalist",
            PersonaType::Adventurer => "adventurer",
            PersonaType::Athlete => "athlete",
            PersonaType::Artist => "artist",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PersonaType::Innovator => "Innovator",
            PersonaType::Traditionalist => "Traditionalist",
            PersonaType::Adventurer => "Adventurer",
            PersonaType::Athlete => "Athlete",
            PersonaType::Artist => "Artist",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PersonaType::Innovator => "Forward-thinking, tech-savvy, and always seeking the next big thing. You're interested in emerging markets and disruptive technologies.",
            PersonaType::Traditionalist => "Disciplined, methodical, and focused on long-term stability. You value consistency and proven investment strategies.",
            PersonaType::Adventurer => "Risk-taking, curious, and always seeking new horizons. You embrace volatility and are willing to explore unconventional investments.",
            PersonaType::Athlete => "Competitive, disciplined, and results-driven. You set clear financial goals and are determined to outperform the market.",
            PersonaType::Artist => "Creative, intuitive, and values-driven. You invest with both heart and mind, seeking companies that align with your personal philosophy.",
        }
    }

    /// Focus areas shown as tags on the persona card
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            PersonaType::Innovator => &["Tech Stocks", "Startups", "Web3"],
            PersonaType::Traditionalist => &["Blue Chips", "Dividend Stocks", "Bonds"],
            PersonaType::Adventurer => &["Cryptocurrencies", "NFTs", "Emerging Markets"],
            PersonaType::Athlete => &["Growth Stocks", "ETFs", "Performance Focused"],
            PersonaType::Artist => &["ESG Investing", "Creative Industries", "Impact Funds"],
        }
    }

    pub fn profile(&self) -> PersonaProfile {
        PersonaProfile {
            id: self.id(),
            title: self.title(),
            description: self.description(),
            tags: self.tags(),
        }
    }
}

impl fmt::Display for PersonaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Catalog entry as returned by the persona-types endpoint
#[derive(Debug, Clone, Serialize)]
pub struct PersonaProfile {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

/// Full catalog in picker order
pub fn catalog() -> Vec<PersonaProfile> {
    PersonaType::ALL.iter().map(PersonaType::profile).collect()
}

/// Heading form of any persona string, known or not ("athlete" -> "Athlete").
pub fn display_name(persona: &str) -> String {
    capitalize_first(persona)
}
