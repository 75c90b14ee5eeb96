//! Localized text maps
//!
//! `LocalizedText` is the per-language string map used for field display
//! names and for the values of `string` fields. Every constructor and
//! transform here keys the map by language, never by position.

use console_core::{Language, LanguageSet};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Map of language to text, in language-selection order
///
/// On the wire this is a JSON object keyed by language code. `null` entries
/// (as sent for not-yet-filled model values) deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<Language, Option<String>>",
    into = "IndexMap<Language, String>"
)]
pub struct LocalizedText(IndexMap<Language, String>);

impl LocalizedText {
    /// Create an empty map
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Default value for a set of languages: exactly one empty entry per language
    pub fn blank(languages: &LanguageSet) -> Self {
        Self(languages.iter().map(|l| (l, String::new())).collect())
    }

    /// Builder-style insert
    pub fn with(mut self, language: Language, text: impl Into<String>) -> Self {
        self.0.insert(language, text.into());
        self
    }

    pub fn get(&self, language: Language) -> Option<&str> {
        self.0.get(&language).map(String::as_str)
    }

    /// Set one language's text, leaving the others untouched
    pub fn insert(&mut self, language: Language, text: impl Into<String>) -> Option<String> {
        self.0.insert(language, text.into())
    }

    pub fn contains(&self, language: Language) -> bool {
        self.0.contains_key(&language)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Language, &str)> {
        self.0.iter().map(|(l, t)| (*l, t.as_str()))
    }

    /// Languages present as keys, in map order
    pub fn languages(&self) -> LanguageSet {
        self.0.keys().copied().collect()
    }

    /// Rebuild the map with keys exactly `languages`
    ///
    /// Shared languages keep their text, new languages get an empty string,
    /// languages missing from `languages` are dropped.
    pub fn reconciled(&self, languages: &LanguageSet) -> Self {
        Self(
            languages
                .iter()
                .map(|l| (l, self.0.get(&l).cloned().unwrap_or_default()))
                .collect(),
        )
    }

    /// True when the map is non-empty and no entry is blank after trimming
    pub fn is_complete(&self) -> bool {
        !self.0.is_empty() && self.0.values().all(|t| !t.trim().is_empty())
    }

    /// True when every language in `languages` has a non-blank entry
    pub fn is_complete_for(&self, languages: &LanguageSet) -> bool {
        !languages.is_empty()
            && languages
                .iter()
                .all(|l| self.get(l).is_some_and(|t| !t.trim().is_empty()))
    }

    /// Languages of `languages` whose entry is missing or blank
    pub fn missing_for(&self, languages: &LanguageSet) -> Vec<Language> {
        languages
            .iter()
            .filter(|l| self.get(*l).is_none_or(|t| t.trim().is_empty()))
            .collect()
    }

    /// Text for display: the requested language, else the first non-blank entry
    pub fn display(&self, preferred: Language) -> Option<&str> {
        self.get(preferred)
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.0.values().map(String::as_str).find(|t| !t.trim().is_empty()))
    }
}

impl From<IndexMap<Language, Option<String>>> for LocalizedText {
    fn from(map: IndexMap<Language, Option<String>>) -> Self {
        Self(
            map.into_iter()
                .map(|(l, t)| (l, t.unwrap_or_default()))
                .collect(),
        )
    }
}

impl From<LocalizedText> for IndexMap<Language, String> {
    fn from(text: LocalizedText) -> Self {
        text.0
    }
}

impl FromIterator<(Language, String)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (Language, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn langs(list: &[Language]) -> LanguageSet {
        LanguageSet::from_languages(list.iter().copied())
    }

    #[test]
    fn test_blank_has_exactly_active_languages() {
        let text = LocalizedText::blank(&langs(&[Language::Ru, Language::En]));
        assert_eq!(text.languages(), langs(&[Language::Ru, Language::En]));
        assert!(text.iter().all(|(_, t)| t.is_empty()));
    }

    #[test]
    fn test_reconcile_by_key() {
        let name = LocalizedText::new()
            .with(Language::Ru, "Имя")
            .with(Language::En, "Name");

        let reconciled = name.reconciled(&langs(&[Language::Ru, Language::Ky]));

        assert_eq!(
            reconciled,
            LocalizedText::new()
                .with(Language::Ru, "Имя")
                .with(Language::Ky, "")
        );
        assert!(!reconciled.contains(Language::En));
    }

    #[test]
    fn test_reconcile_does_not_use_positions() {
        // Reordering the set must not move text between languages
        let name = LocalizedText::new()
            .with(Language::Ru, "Имя")
            .with(Language::En, "Name");

        let reconciled = name.reconciled(&langs(&[Language::En, Language::Ru]));
        assert_eq!(reconciled.get(Language::En), Some("Name"));
        assert_eq!(reconciled.get(Language::Ru), Some("Имя"));
    }

    #[test]
    fn test_completeness() {
        let partial = LocalizedText::new()
            .with(Language::Ru, "Привет")
            .with(Language::En, "");
        assert!(!partial.is_complete());

        let whitespace = LocalizedText::new()
            .with(Language::Ru, "Привет")
            .with(Language::En, "   ");
        assert!(!whitespace.is_complete());

        let full = LocalizedText::new()
            .with(Language::Ru, "Привет")
            .with(Language::En, "Hi");
        assert!(full.is_complete());

        assert!(!LocalizedText::new().is_complete());
    }

    #[test]
    fn test_complete_for_and_missing() {
        let text = LocalizedText::new().with(Language::Ru, "Да");
        let expected = langs(&[Language::Ru, Language::Uz]);
        assert!(!text.is_complete_for(&expected));
        assert_eq!(text.missing_for(&expected), vec![Language::Uz]);
        assert!(text.is_complete_for(&langs(&[Language::Ru])));
    }

    #[test]
    fn test_null_entries_deserialize_as_blank() {
        let text: LocalizedText = serde_json::from_str(r#"{"ru": null, "en": "x"}"#).unwrap();
        assert_eq!(text.get(Language::Ru), Some(""));
        assert_eq!(serde_json::to_string(&text).unwrap(), r#"{"ru":"","en":"x"}"#);
    }

    #[test]
    fn test_display_falls_back() {
        let text = LocalizedText::new()
            .with(Language::Ru, "")
            .with(Language::En, "Colour");
        assert_eq!(text.display(Language::Ru), Some("Colour"));
        assert_eq!(text.display(Language::En), Some("Colour"));
    }

    fn language_set() -> impl Strategy<Value = LanguageSet> {
        proptest::sample::subsequence(Language::ALL.to_vec(), 0..=4)
            .prop_shuffle()
            .prop_map(LanguageSet::from)
    }

    proptest! {
        #[test]
        fn prop_blank_key_set_is_exact(set in language_set()) {
            let text = LocalizedText::blank(&set);
            prop_assert_eq!(text.languages(), set);
        }

        #[test]
        fn prop_reconcile_keeps_shared_text(old in language_set(), new in language_set()) {
            let source: LocalizedText = old
                .iter()
                .map(|l| (l, format!("text-{}", l.code())))
                .collect();
            let reconciled = source.reconciled(&new);

            prop_assert_eq!(reconciled.languages(), new.clone());
            for l in new.iter() {
                if old.contains(l) {
                    let expected = format!("text-{}", l.code());
                    prop_assert_eq!(reconciled.get(l), Some(expected.as_str()));
                } else {
                    prop_assert_eq!(reconciled.get(l), Some(""));
                }
            }
        }
    }
}
