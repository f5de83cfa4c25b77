// crates/atlas-core/src/pipeline.rs

//! The search → filter → sort → paginate pipeline.
//!
//! Every function here is pure: the inputs are the collection and the view
//! criteria, the output is a list of borrowed records in display order. Callers
//! own the state (see [`crate::app::Explorer`]).

use crate::model::Country;
use crate::text::{collate, contains_lowered};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Default number of cards per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// The five orderings offered by the sort selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// `a-z`: common name, ascending.
    #[default]
    #[serde(rename = "a-z")]
    NameAsc,
    /// `z-a`: common name, descending.
    #[serde(rename = "z-a")]
    NameDesc,
    /// `continent`: region, then common name.
    #[serde(rename = "continent")]
    Continent,
    /// `pop-high`: most populous first.
    #[serde(rename = "pop-high")]
    PopulationDesc,
    /// `pop-low`: least populous first.
    #[serde(rename = "pop-low")]
    PopulationAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::Continent,
        SortKey::PopulationDesc,
        SortKey::PopulationAsc,
    ];

    /// Wire name, as used by the sort selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "a-z",
            SortKey::NameDesc => "z-a",
            SortKey::Continent => "continent",
            SortKey::PopulationDesc => "pop-high",
            SortKey::PopulationAsc => "pop-low",
        }
    }

    /// Comparator for this key. Ties compare `Equal` so a stable sort keeps
    /// source order.
    pub fn compare(&self, a: &Country, b: &Country) -> Ordering {
        match self {
            SortKey::NameAsc => collate(a.name(), b.name()),
            SortKey::NameDesc => collate(b.name(), a.name()),
            SortKey::Continent => a
                .region()
                .cmp(b.region())
                .then_with(|| collate(a.name(), b.name())),
            SortKey::PopulationDesc => population(b).cmp(&population(a)),
            SortKey::PopulationAsc => population(a).cmp(&population(b)),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                format!("unknown sort key '{s}' (expected a-z|z-a|continent|pop-high|pop-low)")
            })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn population(c: &Country) -> u64 {
    c.population().unwrap_or(0)
}

/// Filter and ordering criteria for one pass of the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Criteria<'a> {
    pub search: &'a str,
    pub sort: SortKey,
    pub favorites_only: bool,
    pub favorites: &'a [String],
}

/// `true` if the lowercased search text occurs in the common name, the first
/// capital, or the region.
pub fn matches_search(country: &Country, lowered: &str) -> bool {
    lowered.is_empty()
        || contains_lowered(country.name(), lowered)
        || country
            .capital()
            .is_some_and(|cap| contains_lowered(cap, lowered))
        || contains_lowered(country.region(), lowered)
}

/// Search and favorites filter, in source order.
pub fn filter<'a>(
    countries: &'a [Country],
    search: &str,
    favorites_only: bool,
    favorites: &[String],
) -> Vec<&'a Country> {
    let lowered = search.trim().to_lowercase();
    let favs: HashSet<&str> = if favorites_only {
        favorites.iter().map(String::as_str).collect()
    } else {
        HashSet::new()
    };

    countries
        .iter()
        .filter(|c| !favorites_only || favs.contains(c.code()))
        .filter(|c| matches_search(c, &lowered))
        .collect()
}

/// Stable sort by `key`.
pub fn sort(items: &mut [&Country], key: SortKey) {
    items.sort_by(|a, b| key.compare(a, b));
}

/// The ordered visible subset for the given criteria.
pub fn visible<'a>(countries: &'a [Country], criteria: &Criteria<'_>) -> Vec<&'a Country> {
    let mut items = filter(
        countries,
        criteria.search,
        criteria.favorites_only,
        criteria.favorites,
    );
    sort(&mut items, criteria.sort);
    items
}

/// Number of pages for `total` items; `0` for an empty set.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// The slice of `items` shown on 1-based `page`.
///
/// Out-of-range pages (including `0`) yield an empty slice; clamping is the
/// caller's job.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size))
    else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Clamp a requested page into `1..=page_count` (or `1` when there are no pages).
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// Page numbers for the navigation control: at most `width` consecutive pages
/// around `current`.
pub fn page_window(current: usize, total: usize, width: usize) -> Vec<usize> {
    if total == 0 || width == 0 {
        return Vec::new();
    }
    if total <= width {
        return (1..=total).collect();
    }
    let current = clamp_page(current, total);
    let half = width / 2;
    let start = current.saturating_sub(half).max(1).min(total - width + 1);
    (start..start + width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{country, sample};

    fn codes(items: &[&Country]) -> Vec<String> {
        items.iter().map(|c| c.code.clone()).collect()
    }

    fn criteria(search: &str, sort: SortKey) -> Criteria<'_> {
        Criteria {
            search,
            sort,
            favorites_only: false,
            favorites: &[],
        }
    }

    #[test]
    fn search_matches_name_capital_or_region() {
        let c = sample();
        let by_name = filter(c.countries(), "germ", false, &[]);
        assert_eq!(codes(&by_name), vec!["DEU"]);

        let by_capital = filter(c.countries(), "TOKYO", false, &[]);
        assert_eq!(codes(&by_capital), vec!["JPN"]);

        let by_region = filter(c.countries(), "americas", false, &[]);
        assert_eq!(codes(&by_region), vec!["BRA"]);

        let accented = filter(c.countries(), "ÅLAND", false, &[]);
        assert_eq!(codes(&accented), vec!["ALA"]);
        assert!(filter(c.countries(), "aland", false, &[]).is_empty());
    }

    #[test]
    fn search_is_sound_and_complete() {
        let c = sample();
        for term in ["e", "an", "par", "x", "Europe", "ia", "ç", "ß", "å"] {
            let needle = term.to_lowercase();
            let hits = filter(c.countries(), term, false, &[]);
            for country in c.countries() {
                let expected = country.name().to_lowercase().contains(&needle)
                    || country
                        .capital()
                        .is_some_and(|cap| cap.to_lowercase().contains(&needle))
                    || country.region().to_lowercase().contains(&needle);
                let found = hits.iter().any(|h| h.code == country.code);
                assert_eq!(expected, found, "term {term:?}, country {}", country.code);
            }
        }
    }

    #[test]
    fn special_letters_do_not_match_their_transliteration() {
        let list = vec![
            country("FRA", "France", "Paris", "Europe", 1),
            country("RUS", "Russia", "Moscow", "Europe", 1),
            country("CUW", "Curaçao", "Willemstad", "Americas", 1),
        ];
        assert_eq!(codes(&filter(&list, "ç", false, &[])), vec!["CUW"]);
        assert_eq!(codes(&filter(&list, "CURAÇ", false, &[])), vec!["CUW"]);
        assert!(filter(&list, "ß", false, &[]).is_empty());
        assert!(filter(&list, "curacao", false, &[]).is_empty());
    }

    #[test]
    fn empty_or_blank_search_keeps_everything() {
        let c = sample();
        assert_eq!(filter(c.countries(), "", false, &[]).len(), c.len());
        assert_eq!(filter(c.countries(), "   ", false, &[]).len(), c.len());
    }

    #[test]
    fn favorites_only_keeps_members() {
        let c = sample();
        let favs = vec!["JPN".to_string(), "FRA".to_string()];
        let hits = filter(c.countries(), "", true, &favs);
        assert_eq!(codes(&hits), vec!["FRA", "JPN"]);

        let none = filter(c.countries(), "", true, &[]);
        assert!(none.is_empty());
    }

    #[test]
    fn name_ascending_is_non_decreasing() {
        let c = sample();
        let items = visible(c.countries(), &criteria("", SortKey::NameAsc));
        for pair in items.windows(2) {
            assert_ne!(collate(pair[0].name(), pair[1].name()), Ordering::Greater);
        }
        assert_eq!(items[0].code, "ALA");
    }

    #[test]
    fn name_descending_reverses_ascending() {
        let c = sample();
        let mut asc = codes(&visible(c.countries(), &criteria("", SortKey::NameAsc)));
        asc.reverse();
        let desc = codes(&visible(c.countries(), &criteria("", SortKey::NameDesc)));
        assert_eq!(asc, desc);
    }

    #[test]
    fn continent_sorts_by_region_then_name() {
        let c = sample();
        let items = visible(c.countries(), &criteria("", SortKey::Continent));
        assert_eq!(
            codes(&items),
            vec!["BRA", "ATA", "JPN", "ALA", "FRA", "DEU"]
        );
    }

    #[test]
    fn population_high_reversed_is_population_low() {
        let c = sample();
        let mut high = codes(&visible(c.countries(), &criteria("", SortKey::PopulationDesc)));
        high.reverse();
        let low = codes(&visible(c.countries(), &criteria("", SortKey::PopulationAsc)));
        assert_eq!(high, low);
        assert_eq!(low[0], "ATA");
    }

    #[test]
    fn population_ties_keep_source_order() {
        let list = vec![
            country("AAA", "Alpha", "", "X", 5),
            country("BBB", "Bravo", "", "X", 5),
            country("CCC", "Charlie", "", "X", 1),
        ];
        let mut items: Vec<&Country> = list.iter().collect();
        sort(&mut items, SortKey::PopulationDesc);
        assert_eq!(codes(&items), vec!["AAA", "BBB", "CCC"]);
        sort(&mut items, SortKey::PopulationAsc);
        assert_eq!(codes(&items), vec!["CCC", "AAA", "BBB"]);
    }

    #[test]
    fn sort_key_round_trips_wire_names() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert!("random".parse::<SortKey>().is_err());
        assert_eq!(SortKey::default(), SortKey::NameAsc);
    }

    #[test]
    fn pages_partition_the_filtered_set() {
        let items: Vec<usize> = (0..47).collect();
        for size in [1, 5, 20, 21, 47, 100] {
            let pages = page_count(items.len(), size);
            assert_eq!(pages, items.len().div_ceil(size));
            let joined: Vec<usize> = (1..=pages)
                .flat_map(|p| paginate(&items, p, size).iter().copied())
                .collect();
            assert_eq!(joined, items);
        }
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 0, 2).is_empty());
        assert!(paginate(&items, 3, 2).is_empty());
        assert_eq!(paginate(&items, 2, 2), &[3]);
        assert_eq!(page_count(0, 20), 0);
    }

    #[test]
    fn twenty_five_records_make_two_pages_of_twenty() {
        let list: Vec<Country> = (0..25)
            .map(|i| {
                let name = format!("Country {:02}", 24 - i);
                country(&format!("C{i:02}"), &name, "", "Europe", i as u64)
            })
            .collect();
        let items = visible(&list, &criteria("", SortKey::NameAsc));
        let pages = page_count(items.len(), 20);
        assert_eq!(pages, 2);

        let first = paginate(&items, 1, 20);
        assert_eq!(first.len(), 20);
        assert_eq!(first[0].name(), "Country 00");
        assert_eq!(first[19].name(), "Country 19");
        assert_eq!(paginate(&items, 2, 20).len(), 5);
        assert_eq!(page_window(1, pages, 7), vec![1, 2]);
    }

    #[test]
    fn page_window_slides_around_current() {
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(6, 10, 5), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(99, 10, 5), vec![6, 7, 8, 9, 10]);
        assert!(page_window(1, 0, 5).is_empty());
    }

    #[test]
    fn clamp_page_bounds() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(2, 0), 1);
    }
}
