//! Heuristics for spotting reviews that look like placeholder or test content.
//!
//! Used by the admin cleanup tool to build a list of candidates for a human
//! to confirm. Pure functions only: nothing here touches storage, so the
//! rules can be exercised against literal strings.
//!
//! A review is flagged if any rule fires:
//!
//! | Rule | Applies to | Fires when |
//! |------|------------|------------|
//! | placeholder token | name or text | contains `test`, `demo`, `sample`, `fake`, `dummy`, `example` |
//! | test phrase | text | contains `test review`, `this is a test`, `testing`, ... |
//! | generic praise | text (≤ 100 chars) | contains `great work`, `amazing`, `excellent`, ... |
//! | too short | text | 1 to 20 characters |
//! | short praise | text (< 25 chars) | contains `good`, `great`, `nice`, `amazing` |
//!
//! False positives on short genuine praise are expected. Candidates are
//! always reviewed by the operator before deletion.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Texts up to this many characters are considered for the generic praise rule.
/// Longer reviews carry enough detail that a superlative alone is not suspicious.
pub const GENERIC_PRAISE_MAX_CHARS: usize = 100;

/// Texts up to this many characters are flagged as too short to be genuine.
pub const TOO_SHORT_MAX_CHARS: usize = 20;

/// Texts shorter than this are flagged if they contain a bland compliment.
pub const SHORT_PRAISE_LIMIT_CHARS: usize = 25;

static PLACEHOLDER_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)test|demo|sample|fake|dummy|example").expect("placeholder regex is valid")
});

static TEST_PHRASES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)test review|sample review|fake review|demo review|this is a test|testing|test message",
    )
    .expect("phrase regex is valid")
});

static GENERIC_PRAISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)great work|amazing|excellent|wonderful|fantastic")
        .expect("praise regex is valid")
});

static BLAND_COMPLIMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)good|great|nice|amazing").expect("compliment regex is valid"));

/// The rule that caused a review to be flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestSignal {
    PlaceholderToken,
    TestPhrase,
    GenericPraise,
    TooShort,
    ShortPraise,
}

impl TestSignal {
    pub fn describe(self) -> &'static str {
        match self {
            TestSignal::PlaceholderToken => "placeholder word in name or text",
            TestSignal::TestPhrase => "test phrase in text",
            TestSignal::GenericPraise => "generic praise",
            TestSignal::TooShort => "too short to be genuine",
            TestSignal::ShortPraise => "short bland compliment",
        }
    }
}

impl fmt::Display for TestSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Returns the first rule that flags this review, or `None` if it looks genuine.
pub fn classify(name: &str, text: &str) -> Option<TestSignal> {
    let len = text.chars().count();

    if PLACEHOLDER_TOKENS.is_match(name) || PLACEHOLDER_TOKENS.is_match(text) {
        return Some(TestSignal::PlaceholderToken);
    }
    if TEST_PHRASES.is_match(text) {
        return Some(TestSignal::TestPhrase);
    }
    if len <= GENERIC_PRAISE_MAX_CHARS && GENERIC_PRAISE.is_match(text) {
        return Some(TestSignal::GenericPraise);
    }
    if (1..=TOO_SHORT_MAX_CHARS).contains(&len) {
        return Some(TestSignal::TooShort);
    }
    if len < SHORT_PRAISE_LIMIT_CHARS && BLAND_COMPLIMENT.is_match(text) {
        return Some(TestSignal::ShortPraise);
    }

    None
}

/// True if the review resembles placeholder or test content.
pub fn is_test_like(name: &str, text: &str) -> bool {
    classify(name, text).is_some()
}
