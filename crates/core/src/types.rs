//! Core types used throughout Model Console
//!
//! This module contains the fundamental types shared by the schema IR, the
//! form engine and the CLI: localization languages, ordered language sets,
//! field type tags and the identifier aliases handed out by the backend.

use crate::error::ConsoleError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

/// Backend identifier of a model record
pub type ModelId = String;

/// Backend identifier of an instance record
pub type InstanceId = String;

/// Opaque access role identifier
pub type RoleId = String;

/// Key of a field inside a model's (or instance's) `data` map
pub type FieldKey = String;

// ============================================================================
// Language
// ============================================================================

/// Localization languages supported by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Russian
    Ru,
    /// Kyrgyz
    Ky,
    /// English
    En,
    /// Uzbek
    Uz,
}

impl Language {
    /// Every language the console can localize into, in picker order
    pub const ALL: [Language; 4] = [Language::Ru, Language::Ky, Language::En, Language::Uz];

    /// Two-letter code used as the map key on the wire
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Ky => "ky",
            Language::En => "en",
            Language::Uz => "uz",
        }
    }

    /// Human-readable label shown in language pickers
    pub fn label(&self) -> &'static str {
        match self {
            Language::Ru => "Русский",
            Language::Ky => "Кыргызский",
            Language::En => "English",
            Language::Uz => "O'zbekcha",
        }
    }
}

impl FromStr for Language {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "ky" => Ok(Language::Ky),
            "en" => Ok(Language::En),
            "uz" => Ok(Language::Uz),
            other => Err(ConsoleError::UnknownLanguage(other.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// LanguageSet
// ============================================================================

/// Ordered, duplicate-free set of active languages
///
/// Order is the order in which languages were selected; it drives the order
/// of keys in every localized map built from the set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Language>", into = "Vec<Language>")]
pub struct LanguageSet(Vec<Language>);

impl LanguageSet {
    /// Create an empty language set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a set from any iterator, dropping repeated languages
    pub fn from_languages(languages: impl IntoIterator<Item = Language>) -> Self {
        let mut set = Self::new();
        for language in languages {
            set.insert(language);
        }
        set
    }

    /// Add a language; returns false if it was already present
    pub fn insert(&mut self, language: Language) -> bool {
        if self.0.contains(&language) {
            return false;
        }
        self.0.push(language);
        true
    }

    /// Remove a language; returns false if it was not present
    pub fn remove(&mut self, language: Language) -> bool {
        let before = self.0.len();
        self.0.retain(|l| *l != language);
        self.0.len() != before
    }

    /// Toggle a language on or off (checkbox semantics)
    pub fn toggle(&mut self, language: Language) {
        if !self.remove(language) {
            self.insert(language);
        }
    }

    pub fn contains(&self, language: Language) -> bool {
        self.0.contains(&language)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Language> + '_ {
        self.0.iter().copied()
    }

    /// Same languages, ignoring selection order
    pub fn same_members(&self, other: &LanguageSet) -> bool {
        self.len() == other.len() && other.iter().all(|l| self.contains(l))
    }

    /// Comma-separated codes, e.g. `ru, en`
    pub fn codes(&self) -> String {
        self.0
            .iter()
            .map(Language::code)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<Vec<Language>> for LanguageSet {
    fn from(languages: Vec<Language>) -> Self {
        Self::from_languages(languages)
    }
}

impl From<LanguageSet> for Vec<Language> {
    fn from(set: LanguageSet) -> Self {
        set.0
    }
}

impl FromIterator<Language> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = Language>>(iter: I) -> Self {
        Self::from_languages(iter)
    }
}

impl FromStr for LanguageSet {
    type Err = ConsoleError;

    /// Parse a comma-separated list such as `ru,en`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Language::from_str)
            .collect()
    }
}

impl std::fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.codes())
    }
}

// ============================================================================
// FieldType
// ============================================================================

/// Type tag of a model field
///
/// The backend stores the tag as a free string. Tags other than `string` and
/// `integer` are kept as `Unknown` so a corrupted schema still loads; such
/// fields can never be completed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Multilingual text, one string per active language
    String,
    /// A single non-negative integer
    Integer,
    /// Unrecognized tag as received
    Unknown(String),
}

impl FieldType {
    /// Wire name of the tag
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Unknown(tag) => tag,
        }
    }

    /// Whether the tag is one the form engine can render and validate
    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldType::Unknown(_))
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "string" => FieldType::String,
            "integer" => FieldType::Integer,
            _ => FieldType::Unknown(tag),
        }
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        FieldType::from(tag.to_string())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_language_serde_codes() {
        let json = serde_json::to_string(&Language::Ky).unwrap();
        assert_eq!(json, "\"ky\"");

        let parsed: Language = serde_json::from_str("\"uz\"").unwrap();
        assert_eq!(parsed, Language::Uz);

        assert!(serde_json::from_str::<Language>("\"de\"").is_err());
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        let err = "fr".parse::<Language>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_language_set_dedup_keeps_first_order() {
        let set = LanguageSet::from(vec![Language::En, Language::Ru, Language::En]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Language::En, Language::Ru]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_language_set_toggle() {
        let mut set = LanguageSet::from(vec![Language::Ru]);
        set.toggle(Language::Ky);
        assert!(set.contains(Language::Ky));
        set.toggle(Language::Ru);
        assert!(!set.contains(Language::Ru));
        assert_eq!(set.to_string(), "[ky]");
    }

    #[test]
    fn test_same_members_ignores_order() {
        let ru_en = LanguageSet::from(vec![Language::Ru, Language::En]);
        let en_ru = LanguageSet::from(vec![Language::En, Language::Ru]);
        assert_ne!(ru_en, en_ru);
        assert!(ru_en.same_members(&en_ru));
        assert!(!ru_en.same_members(&LanguageSet::from(vec![Language::Ru])));
        assert!(!ru_en.same_members(&LanguageSet::from(vec![Language::Ru, Language::Ky])));
    }

    #[test]
    fn test_language_set_parse() {
        let set: LanguageSet = "ru, en".parse().unwrap();
        assert_eq!(set.codes(), "ru, en");
        assert!("ru,xx".parse::<LanguageSet>().is_err());
    }

    #[test]
    fn test_language_set_serde() {
        let set: LanguageSet = serde_json::from_str(r#"["ru","ru","en"]"#).unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["ru","en"]"#);
    }

    #[test]
    fn test_field_type_tags() {
        assert_eq!(FieldType::from("string"), FieldType::String);
        assert_eq!(FieldType::from("integer"), FieldType::Integer);

        let unknown: FieldType = serde_json::from_str("\"date\"").unwrap();
        assert_eq!(unknown, FieldType::Unknown("date".to_string()));
        assert!(!unknown.is_supported());
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"date\"");
    }
}
