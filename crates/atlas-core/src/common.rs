// crates/atlas-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the collection.
///
/// Returned by [`crate::Collection::stats`]; the counts reflect what the
/// loader kept after normalization. `favorites` is filled in by
/// [`crate::app::Explorer::stats`], which knows the favorites set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub countries: usize,
    pub regions: usize,
    /// Sum of all known populations.
    pub population: u64,
    pub favorites: usize,
}
