//! # Feature: Persona Advisor
//!
//! Rule-based chat replies. A greeting check runs first and answers for every
//! persona. Otherwise each persona walks its own ordered list of
//! (topic, reply) rules and the first topic the message mentions wins.
//! Anything left over gets a generic reply drawn at random.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Injectable random source and reply provenance for tests and the API
//! - 1.0.0: Initial release with per-persona scripts

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::classifier::{Category, MessageSignals};
use crate::features::personas::PersonaType;

/// Greeting used when the persona is not one of the five archetypes
pub const DEFAULT_GREETING: &str = "Hello! How can I assist with your investment journey today?";

/// Fallback pool, drawn uniformly when no scripted rule applies
pub const GENERIC_REPLIES: [&str; 5] = [
    "That's an interesting perspective. Tell me more about your investment goals.",
    "I see. Have you considered how that fits into your overall financial plan?",
    "Thanks for sharing. What timeline are you considering for these investments?",
    "I understand. How does this align with your risk tolerance?",
    "Great point. What's your experience with this type of investment so far?",
];

/// A persona's greeting plus its topic rules in priority order
#[derive(Debug)]
pub struct PersonaScript {
    pub greeting: &'static str,
    pub rules: &'static [(Category, &'static str)],
}

impl PersonaScript {
    /// First rule whose topic the message mentions
    pub fn first_match(&self, signals: &MessageSignals) -> Option<(Category, &'static str)> {
        self.rules
            .iter()
            .find(|(topic, _)| signals.mentions(*topic))
            .copied()
    }

    /// Scripted reply for one topic, ignoring priority
    pub fn reply_for(&self, topic: Category) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|(t, _)| *t == topic)
            .map(|(_, reply)| *reply)
    }
}

static INNOVATOR: PersonaScript = PersonaScript {
    greeting: "Hello! As an Innovator, you're probably interested in emerging technologies and disruptive investments. How can I help you navigate the cutting edge of the market today?",
    rules: &[
        (Category::Stocks, "For an innovation-focused investor like you, consider tech companies working on AI, quantum computing, or biotech. These high-growth sectors align with your forward-thinking perspective."),
        (Category::Crypto, "Beyond just Bitcoin and Ethereum, you might explore layer-2 solutions, DeFi protocols, or specialized blockchain applications that are creating new paradigms. These align well with your innovator mindset."),
        (Category::Risk, "As an Innovator, you understand that breakthrough technologies come with higher risk. Consider balancing your portfolio with 60-70% disruptive tech and 30-40% more established companies that are still innovation-focused."),
        (Category::Strategy, "A solid innovation strategy includes staying informed on technological trends, following thought leaders in emerging tech, and diversifying across multiple cutting-edge sectors rather than focusing on a single technology."),
    ],
};

static TRADITIONALIST: PersonaScript = PersonaScript {
    greeting: "Greetings! For a Traditionalist like you, stability and proven strategies are key. What part of your investment portfolio would you like to discuss?",
    rules: &[
        (Category::Stocks, "For a Traditionalist investor, blue-chip stocks with strong dividend histories like Johnson & Johnson, Procter & Gamble, or Coca-Cola might be worth considering for their stability and reliability."),
        (Category::Etf, "Index ETFs that track the S&P 500 or total market funds would align well with your traditionalist approach. They offer broad market exposure with lower fees and proven long-term performance."),
        (Category::Risk, "Your traditionalist approach wisely acknowledges that managing risk is central to preserving wealth. A 60/40 split between stocks and bonds has historically provided good protection while allowing for growth."),
        (Category::Strategy, "A time-tested strategy for traditionalists includes dollar-cost averaging, reinvesting dividends, and periodic rebalancing to maintain your desired asset allocation. Consistency is your ally."),
    ],
};

static ADVENTURER: PersonaScript = PersonaScript {
    greeting: "Hey there! Ready for some investment adventures? As an Adventurer, you're comfortable with volatility. What exciting opportunities are you considering?",
    rules: &[
        (Category::Crypto, "As an Adventurer, you might enjoy exploring newer cryptocurrencies with unique use cases, but remember to only allocate funds you can afford to lose to these high-risk ventures."),
        (Category::Risk, "Your adventurous spirit embraces risk, but consider setting aside 20-30% in more stable investments as your 'home base' while you venture into more volatile opportunities with the rest."),
        (Category::Strategy, "For adventurous investors, a barbell strategy might work well - keeping significant portions in very safe assets and high-risk investments, with less in the middle. This lets you explore while maintaining some security."),
        (Category::Stocks, "Consider emerging market stocks or small-cap companies with high growth potential. These align with your adventurous approach, offering higher volatility but potentially greater returns."),
    ],
};

static ATHLETE: PersonaScript = PersonaScript {
    greeting: "Hi! With your Athlete mindset, you're focused on performance and results. What investment goals are you training for today?",
    rules: &[
        (Category::Stocks, "For an achievement-focused Athlete investor, growth stocks with strong momentum and companies consistently outperforming their sectors might be worth researching."),
        (Category::Etf, "Consider ETFs focused on sectors showing strong performance metrics or funds designed to outperform the market. Your athlete mindset appreciates measurable results."),
        (Category::Strategy, "A disciplined strategy suits your athletic approach - set clear performance benchmarks, regularly review your investments against these goals, and be willing to pivot quickly when certain positions underperform."),
        (Category::Risk, "Like athletic training, investment success requires balancing intensity with recovery. Consider allocating 70% to growth-focused investments and 30% to more conservative positions to manage overall portfolio risk."),
    ],
};

static ARTIST: PersonaScript = PersonaScript {
    greeting: "Hello! As an Artist investor, you value creativity and meaning in your portfolio. What values-driven investments are you contemplating?",
    rules: &[
        (Category::Stocks, "Companies with strong ESG profiles or in creative industries might resonate with your artistic values. Consider businesses that prioritize sustainability, ethical practices, or cultural contributions."),
        (Category::Etf, "There are several ETFs focused on sustainability, social impact, or creative industries that would align with your artistic values while providing diversification."),
        (Category::Strategy, "As an Artist investor, your strategy might prioritize companies whose values align with yours. Consider creating a values-based framework to evaluate potential investments beyond just financial metrics."),
        (Category::Risk, "Finding the balance between expression and security is key for Artist investors. Consider allocating a portion of your portfolio to impact investments that speak to you, while maintaining core positions in broader funds."),
    ],
};

/// The script a persona answers with
pub fn script(persona: PersonaType) -> &'static PersonaScript {
    match persona {
        PersonaType::Innovator => &INNOVATOR,
        PersonaType::Traditionalist => &TRADITIONALIST,
        PersonaType::Adventurer => &ADVENTURER,
        PersonaType::Athlete => &ATHLETE,
        PersonaType::Artist => &ARTIST,
    }
}

/// Which branch produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Greeting,
    Scripted(Category),
    Fallback,
}

impl ReplySource {
    /// Category reported to API clients ("none" for fallback replies)
    pub fn category(&self) -> Category {
        match self {
            ReplySource::Greeting => Category::Greeting,
            ReplySource::Scripted(topic) => *topic,
            ReplySource::Fallback => Category::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub text: &'static str,
    pub source: ReplySource,
}

/// Answer a chat message for a persona using the thread-local RNG.
///
/// `persona` is the raw persona id; unknown ids only ever get the default
/// greeting or a generic reply. Never fails and never returns an empty string.
pub fn select_response(message: &str, persona: &str) -> String {
    select_response_with(message, persona, &mut rand::rng())
        .text
        .to_string()
}

/// Answer a chat message, drawing fallback replies from `rng`.
pub fn select_response_with<R>(message: &str, persona: &str, rng: &mut R) -> Reply
where
    R: Rng + ?Sized,
{
    let signals = MessageSignals::new(message);
    let persona = PersonaType::parse(persona);

    if signals.is_greeting() {
        let text = persona.map_or(DEFAULT_GREETING, |p| script(p).greeting);
        return Reply {
            text,
            source: ReplySource::Greeting,
        };
    }

    if let Some((topic, text)) = persona.and_then(|p| script(p).first_match(&signals)) {
        return Reply {
            text,
            source: ReplySource::Scripted(topic),
        };
    }

    debug!("No scripted reply for persona {persona:?}, using generic pool");
    Reply {
        text: generic_reply(rng),
        source: ReplySource::Fallback,
    }
}

fn generic_reply<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    GENERIC_REPLIES
        .choose(rng)
        .copied()
        .unwrap_or(GENERIC_REPLIES[0])
}
