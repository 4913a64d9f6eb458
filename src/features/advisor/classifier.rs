//! Keyword classification of chat messages
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.0.0: Greeting detector and substring-based topic categories

use serde::Serialize;
use std::fmt;

/// Intent detected in a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Greeting,
    Stocks,
    Crypto,
    Etf,
    Risk,
    Strategy,
    None,
}

impl Category {
    /// Topic categories, i.e. everything a persona can have a scripted answer for
    pub const TOPICS: [Category; 5] = [
        Category::Stocks,
        Category::Crypto,
        Category::Etf,
        Category::Risk,
        Category::Strategy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Greeting => "greeting",
            Category::Stocks => "stocks",
            Category::Crypto => "crypto",
            Category::Etf => "etf",
            Category::Risk => "risk",
            Category::Strategy => "strategy",
            Category::None => "none",
        }
    }

    /// Substrings that put a lowercased message in this topic.
    ///
    /// Greeting has its own detector, see [`is_greeting`].
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Stocks => &["stock", "shares"],
            Category::Crypto => &["crypto", "bitcoin", "ethereum"],
            Category::Etf => &["etf", "exchange traded"],
            Category::Risk => &["risk", "volatile"],
            Category::Strategy => &["strategy", "plan"],
            Category::Greeting | Category::None => &[],
        }
    }

    /// Whether an already lowercased message mentions this topic
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Category::Greeting => is_greeting(lowered),
            Category::None => false,
            topic => topic.keywords().iter().any(|kw| lowered.contains(kw)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Greeting tokens matched anywhere in the message.
///
/// "hi " keeps its trailing space: "hi there" greets, "high risk" and
/// "historically" do not. A bare "hi" only greets as the whole message.
const GREETING_TOKENS: &[&str] = &["hello", "hi ", "hey"];

/// Greeting detector over an already lowercased message
pub fn is_greeting(lowered: &str) -> bool {
    lowered == "hi" || GREETING_TOKENS.iter().any(|token| lowered.contains(token))
}

/// Lowercased view of a message with its detected signals
#[derive(Debug, Clone)]
pub struct MessageSignals {
    lowered: String,
    greeting: bool,
}

impl MessageSignals {
    pub fn new(message: &str) -> Self {
        let lowered = message.to_lowercase();
        let greeting = is_greeting(&lowered);
        MessageSignals { lowered, greeting }
    }

    pub fn is_greeting(&self) -> bool {
        self.greeting
    }

    pub fn mentions(&self, category: Category) -> bool {
        category.matches(&self.lowered)
    }

    /// Every topic the message mentions, in [`Category::TOPICS`] order
    pub fn topics(&self) -> Vec<Category> {
        Category::TOPICS
            .into_iter()
            .filter(|topic| self.mentions(*topic))
            .collect()
    }
}
