//! Card reference collaborator trait.
//!
//! Defines [`CardReference`], the only channel through which the parser
//! consults card data. The parser never opens storage of its own; callers
//! pass an implementation in explicitly.

use crate::format::Format;

/// Lookup operations over canonical card names and learned aliases.
///
/// Implementations are shared across concurrent parse requests, so every
/// method takes `&self`. [`add_alias`](CardReference::add_alias) must be an
/// idempotent insert-if-absent: re-recording an existing alias is a no-op.
///
/// # Usage
///
/// ```ignore
/// let name = reference.name_from_alias("lightning bolt", Format::Modern, false);
/// assert_eq!(name.as_deref(), Some("Lightning Bolt"));
/// ```
pub trait CardReference {
    /// Resolve an alias to a canonical card name legal in `format`.
    ///
    /// Comparison is case-insensitive. When `truncated` is set, an alias
    /// matches if its first `alias.chars().count()` characters equal `alias`.
    fn name_from_alias(&self, alias: &str, format: Format, truncated: bool) -> Option<String>;

    /// Card names legal in `format` whose length lies in `min_len..=max_len`.
    ///
    /// The returned order is stable and significant: fuzzy matching accepts
    /// the first acceptable candidate.
    fn names_in_range(&self, min_len: usize, max_len: usize, format: Format) -> Vec<String>;

    /// Returns `true` if `name` is a companion card.
    fn is_companion(&self, name: &str) -> bool;

    /// Record `alias` as another spelling of `name`, unless `alias` is already known.
    fn add_alias(&self, alias: &str, name: &str);
}

impl<T: CardReference + ?Sized> CardReference for &T {
    fn name_from_alias(&self, alias: &str, format: Format, truncated: bool) -> Option<String> {
        (**self).name_from_alias(alias, format, truncated)
    }

    fn names_in_range(&self, min_len: usize, max_len: usize, format: Format) -> Vec<String> {
        (**self).names_in_range(min_len, max_len, format)
    }

    fn is_companion(&self, name: &str) -> bool {
        (**self).is_companion(name)
    }

    fn add_alias(&self, alias: &str, name: &str) {
        (**self).add_alias(alias, name)
    }
}

impl<T: CardReference + ?Sized> CardReference for std::sync::Arc<T> {
    fn name_from_alias(&self, alias: &str, format: Format, truncated: bool) -> Option<String> {
        (**self).name_from_alias(alias, format, truncated)
    }

    fn names_in_range(&self, min_len: usize, max_len: usize, format: Format) -> Vec<String> {
        (**self).names_in_range(min_len, max_len, format)
    }

    fn is_companion(&self, name: &str) -> bool {
        (**self).is_companion(name)
    }

    fn add_alias(&self, alias: &str, name: &str) {
        (**self).add_alias(alias, name)
    }
}
