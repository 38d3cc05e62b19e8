use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Anything that is neither a letter nor a number, marks included.
static SYMBOL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]").expect("symbol pattern is a valid regex"));

/// Password held as a secret so it never shows up in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn new(password: impl Into<String>) -> Self {
        Self(Secret::new(password.into()))
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }

    pub fn report(&self) -> PasswordRequirementReport {
        PasswordRequirementReport::evaluate(self.0.expose_secret())
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::empty()
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl From<Secret<String>> for Password {
    fn from(secret: Secret<String>) -> Self {
        Self(secret)
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

/// One of the five independent password rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRequirement {
    Length,
    Lower,
    Upper,
    Number,
    Symbol,
}

impl PasswordRequirement {
    pub const ALL: [PasswordRequirement; 5] = [
        Self::Length,
        Self::Lower,
        Self::Upper,
        Self::Number,
        Self::Symbol,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Length => "Must be at least 8 characters long.",
            Self::Lower => "Must include at least one lowercase letter.",
            Self::Upper => "Must include at least one capital letter.",
            Self::Number => "Must include at least one number.",
            Self::Symbol => "Must include at least one symbol (e.g., !@#$).",
        }
    }
}

/// Pass/fail per rule, recomputed from scratch on every change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordRequirementReport {
    pub length: bool,
    pub lower: bool,
    pub upper: bool,
    pub number: bool,
    pub symbol: bool,
}

impl PasswordRequirementReport {
    /// Every rule is evaluated independently; none short-circuits another.
    pub fn evaluate(password: &str) -> Self {
        Self {
            length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            lower: password.chars().any(char::is_lowercase),
            upper: password.chars().any(char::is_uppercase),
            number: password.chars().any(|c| c.is_ascii_digit()),
            symbol: SYMBOL_REGEX.is_match(password),
        }
    }

    pub fn is_met(&self, requirement: PasswordRequirement) -> bool {
        match requirement {
            PasswordRequirement::Length => self.length,
            PasswordRequirement::Lower => self.lower,
            PasswordRequirement::Upper => self.upper,
            PasswordRequirement::Number => self.number,
            PasswordRequirement::Symbol => self.symbol,
        }
    }

    /// Checklist in display order, for rendering live checkmarks.
    pub fn requirements(&self) -> impl Iterator<Item = (PasswordRequirement, bool)> + '_ {
        PasswordRequirement::ALL
            .into_iter()
            .map(|requirement| (requirement, self.is_met(requirement)))
    }

    pub fn is_acceptable(&self) -> bool {
        self.length && self.lower && self.upper && self.number && self.symbol
    }
}
