// crates/atlas-core/src/text.rs
use std::cmp::Ordering;

/// Convert a string into a folded key suitable for matching and ordering.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Åland` -> `Aland`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use atlas_core::text::fold_key;
///
/// assert_eq!(fold_key("Åland Islands"), "aland islands");
/// assert_eq!(fold_key("Côte d'Ivoire"), "cote d'ivoire");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Case-insensitive substring test. Accents are significant: `ç` only
/// matches `ç`.
///
/// `needle` is expected to be lowercased already; the pipeline lowers the
/// search text once per query instead of once per record.
#[inline]
pub fn contains_lowered(haystack: &str, lowered_needle: &str) -> bool {
    lowered_needle.is_empty() || haystack.to_lowercase().contains(lowered_needle)
}

/// Locale-aware ordering of display names.
///
/// Names are compared on their folded form first, so `Åland Islands` sorts
/// next to `Albania` rather than after `Zimbabwe`. The raw strings break ties
/// to keep the order total.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold_key(a)
        .cmp(&fold_key(b))
        .then_with(|| a.cmp(b))
}

/// Format an integer with `,` thousands separators (`83240525` -> `83,240,525`).
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folding_strips_accents_and_case() {
        assert_eq!(fold_key("CURAÇAO"), "curacao");
        assert_eq!(fold_key("São Tomé"), "sao tome");
    }

    #[test]
    fn contains_ignores_case_but_not_accents() {
        assert!(contains_lowered("RÉUNION", "réun"));
        assert!(!contains_lowered("Réunion", "reun"));
        assert!(!contains_lowered("Russia", "ß"));
        assert!(contains_lowered("anything", ""));
        assert!(!contains_lowered("France", "spain"));
    }

    #[test]
    fn collation_places_accented_names_in_alphabet() {
        let mut names = vec!["Zambia", "Åland Islands", "Albania", "Austria"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(names, vec!["Åland Islands", "Albania", "Austria", "Zambia"]);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(83_240_525), "83,240,525");
    }
}
