// crates/atlas-core/src/traits.rs
use crate::text::fold_key;

/// Lookup by human-typed name.
///
/// A type names itself once through [`NameMatch::name_str`] and may list
/// extra spellings (official or native forms) in [`NameMatch::alt_names`].
/// Comparison is on the [`fold_key`] form, so `"aland islands"` finds
/// `"Åland Islands"`.
///
/// ```rust
/// use atlas_core::traits::NameMatch;
///
/// struct Island { short: &'static str, long: &'static str }
/// impl NameMatch for Island {
///     fn name_str(&self) -> &str { self.short }
///     fn alt_names(&self) -> Vec<&str> { vec![self.long] }
/// }
///
/// let ax = Island { short: "Åland Islands", long: "Åland Islands (Finland)" };
/// assert!(ax.is_named("ALAND ISLANDS"));
/// assert!(ax.is_named("aland islands (finland)"));
/// assert!(!ax.is_named("finland"));
/// ```
pub trait NameMatch {
    /// The display name.
    fn name_str(&self) -> &str;

    /// Other accepted spellings for exact lookup. None by default.
    fn alt_names(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Exact match against the display name or any alternative.
    fn is_named(&self, query: &str) -> bool {
        let query = fold_key(query);
        if query.is_empty() {
            return false;
        }
        std::iter::once(self.name_str())
            .chain(self.alt_names())
            .any(|name| fold_key(name) == query)
    }
}
