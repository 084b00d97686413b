//! Rule configuration
//!
//! The host framework owns configuration loading; this type is the crate's
//! contract for what can be configured. It is immutable for the lifetime of
//! a rule instance and carries serde derives so hosts can embed it in their
//! own configuration files.

use serde::{Deserialize, Serialize};

/// Language levels the rule can assume.
///
/// A compile-time assertion only exists from C++11 / C11 on, so the rule
/// stays silent unless at least one of these is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageOptions {
    /// Translation unit is compiled as C++11 or later
    pub cplusplus11: bool,
    /// Translation unit is compiled as C11 or later
    pub c11: bool,
}

impl Default for LanguageOptions {
    fn default() -> Self {
        Self {
            cplusplus11: true,
            c11: false,
        }
    }
}

impl LanguageOptions {
    /// C++11 or later
    pub fn cpp11() -> Self {
        Self {
            cplusplus11: true,
            c11: false,
        }
    }

    /// C11 or later
    pub fn c11() -> Self {
        Self {
            cplusplus11: false,
            c11: true,
        }
    }

    /// Neither level enabled; the rule never fires
    pub fn none() -> Self {
        Self {
            cplusplus11: false,
            c11: false,
        }
    }

    /// Whether the configured level has a compile-time assertion
    pub fn supports_static_assert(&self) -> bool {
        self.cplusplus11 || self.c11
    }
}

/// Configuration for the assert-to-static_assert rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Name of the runtime assertion macro to look for (case-sensitive)
    pub assert_macro: String,

    /// Keyword the macro name is rewritten to
    pub replacement: String,

    /// Language level of the translation unit
    pub language: LanguageOptions,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            assert_macro: "assert".to_string(),
            replacement: "static_assert".to_string(),
            language: LanguageOptions::default(),
        }
    }
}

impl RuleConfig {
    /// Set the assertion macro name
    pub fn with_assert_macro(mut self, name: &str) -> Self {
        self.assert_macro = name.to_string();
        self
    }

    /// Set the replacement keyword
    pub fn with_replacement(mut self, keyword: &str) -> Self {
        self.replacement = keyword.to_string();
        self
    }

    /// Set the language level
    pub fn with_language(mut self, language: LanguageOptions) -> Self {
        self.language = language;
        self
    }
}
