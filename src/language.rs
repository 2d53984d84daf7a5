//! Deciding which `StringTable`s of a version resource to read.
//!
//! A `StringTable` is keyed by eight hex digits: a language identifier followed by a codepage,
//! e.g. `040904B0` for U.S. English in UTF-16. Resource compilers are inconsistent about the case
//! of the hex digits, so [`Whitelist`] compares keys case-insensitively.

use alloc::collections::BTreeSet;
use alloc::string::String;

/// Language neutral, UTF-16
pub const LANG_NEUTRAL_UNICODE: &str = "000004B0";
/// Language neutral, Windows-1252
pub const LANG_NEUTRAL_WESTERN: &str = "000004E4";
/// U.S. English, UTF-16
pub const LANG_EN_US_UNICODE: &str = "040904B0";
/// U.S. English, Windows-1252
pub const LANG_EN_US_WESTERN: &str = "040904E4";
/// U.K. English, UTF-16
pub const LANG_EN_GB_UNICODE: &str = "080904B0";
/// U.K. English, Windows-1252
pub const LANG_EN_GB_WESTERN: &str = "080904E4";

/// The tables read by [`Whitelist::default`]
pub const DEFAULT_LANGUAGES: &[&str] = &[
    LANG_NEUTRAL_UNICODE,
    LANG_NEUTRAL_WESTERN,
    LANG_EN_US_UNICODE,
    LANG_EN_US_WESTERN,
    LANG_EN_GB_UNICODE,
    LANG_EN_GB_WESTERN,
];

/// A membership test over `StringTable` keys.
pub trait LanguageFilter {
    /// Returns `true` if the table keyed `key` should be read
    fn is_whitelisted(&self, key: &str) -> bool;
}

impl<F> LanguageFilter for F
where
    F: Fn(&str) -> bool,
{
    fn is_whitelisted(&self, key: &str) -> bool {
        self(key)
    }
}

/// Reads every table regardless of its key.
#[derive(Debug, Copy, Clone, Default)]
pub struct AnyLanguage;

impl LanguageFilter for AnyLanguage {
    fn is_whitelisted(&self, _key: &str) -> bool {
        true
    }
}

/// A set of `StringTable` keys, compared without regard to ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitelist {
    keys: BTreeSet<String>,
}

impl Whitelist {
    /// A whitelist of exactly `keys`
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut whitelist = Whitelist {
            keys: BTreeSet::new(),
        };
        for key in keys {
            whitelist.insert(key.as_ref());
        }
        whitelist
    }

    /// Adds `key`; returns `false` if it was already present
    pub fn insert(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_ascii_uppercase())
    }

    /// Returns `true` if `key` is listed, ignoring ASCII case
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(&key.to_ascii_uppercase())
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no table will be read
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for Whitelist {
    /// Language neutral and English tables, in UTF-16 or Windows-1252
    fn default() -> Self {
        Whitelist::new(DEFAULT_LANGUAGES)
    }
}

impl LanguageFilter for Whitelist {
    fn is_whitelisted(&self, key: &str) -> bool {
        self.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::{AnyLanguage, DEFAULT_LANGUAGES, LanguageFilter, Whitelist};

    #[test]
    fn default_whitelist() {
        let whitelist = Whitelist::default();
        assert_eq!(whitelist.len(), DEFAULT_LANGUAGES.len());
        assert!(whitelist.is_whitelisted("040904B0"));
        assert!(whitelist.is_whitelisted("040904e4"));
        assert!(whitelist.is_whitelisted("000004b0"));
        // Italian
        assert!(!whitelist.is_whitelisted("041004B0"));
        assert!(!whitelist.is_whitelisted(""));
    }

    #[test]
    fn custom_whitelist() {
        let mut whitelist = Whitelist::new(["041004b0"]);
        assert!(whitelist.contains("041004B0"));
        assert!(!whitelist.contains("040904B0"));
        assert!(!whitelist.insert("041004B0"));
        assert!(whitelist.insert("040904B0"));
        assert_eq!(whitelist.len(), 2);
        assert!(Whitelist::new(core::iter::empty::<&str>()).is_empty());
    }

    #[test]
    fn closures_and_any() {
        let only_german = |key: &str| key.starts_with("0407");
        assert!(only_german.is_whitelisted("040704B0"));
        assert!(!only_german.is_whitelisted("040904B0"));
        assert!(AnyLanguage.is_whitelisted("deadbeef"));
    }
}
