//! Translations
//!
//! Every translatable entity owns a small, insertion-ordered list of
//! per-language variants. [`resolve`] picks the variant for the requested
//! language, falling back to the first-inserted one, and reports a missing
//! translation as a value rather than an error.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Placeholder shown when an entity has no translations at all.
pub const UNTITLED: &str = "Без названия";

/// Inline storage for an entity's translations (one per supported language).
pub type Translations<T> = SmallVec<[T; 3]>;

/// A per-language text variant.
pub trait Translated {
    /// Language code this variant is written in.
    fn language(&self) -> &str;
}

/// A translation that carries a display name.
pub trait Named: Translated {
    /// Display name in this variant's language.
    fn name(&self) -> &str;
}

/// Outcome of resolving a translation for a language.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a, T> {
    /// A variant in the requested language exists.
    Exact(&'a T),

    /// No variant in the requested language; this is the first-inserted one.
    Fallback(&'a T),

    /// The entity has no translations.
    Missing,
}

impl<T> Clone for Resolution<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Resolution<'_, T> {}

impl<'a, T> Resolution<'a, T> {
    /// The resolved variant, if any.
    pub fn get(self) -> Option<&'a T> {
        match self {
            Resolution::Exact(translation) | Resolution::Fallback(translation) => {
                Some(translation)
            }
            Resolution::Missing => None,
        }
    }

    /// Whether the requested language was matched exactly.
    pub fn is_exact(&self) -> bool {
        matches!(self, Resolution::Exact(_))
    }

    /// Whether the entity had nothing to resolve.
    pub fn is_missing(&self) -> bool {
        matches!(self, Resolution::Missing)
    }
}

impl<'a, T: Named> Resolution<'a, T> {
    /// Resolved name, or `None` when untranslated.
    pub fn name(self) -> Option<&'a str> {
        self.get().map(Named::name)
    }

    /// Resolved name, or [`UNTITLED`] when untranslated.
    pub fn name_or_untitled(self) -> &'a str {
        self.name().unwrap_or(UNTITLED)
    }
}

/// Pick the translation for `language`.
///
/// Scans in insertion order and returns the first exact match. Without a match
/// the first-inserted variant is returned as a fallback, and an empty list
/// yields [`Resolution::Missing`]. Unknown language codes simply never match.
pub fn resolve<'a, T: Translated>(translations: &'a [T], language: &str) -> Resolution<'a, T> {
    if let Some(exact) = translations.iter().find(|t| t.language() == language) {
        return Resolution::Exact(exact);
    }

    match translations.first() {
        Some(first) => Resolution::Fallback(first),
        None => Resolution::Missing,
    }
}

/// Find a language that appears more than once.
///
/// Storage forbids this, but fixtures and hand-built records are checked with
/// it before they are accepted.
pub fn duplicate_language<T: Translated>(translations: &[T]) -> Option<&str> {
    let mut seen = FxHashSet::default();

    translations
        .iter()
        .map(Translated::language)
        .find(|language| !seen.insert(*language))
}
