// crates/atlas-core/src/favorites.rs
use crate::store::KeyValueStore;
use tracing::{debug, warn};

/// Key under which the favorites list is persisted.
pub const FAVORITES_KEY: &str = "favorites";

/// The user's favorite country codes, persisted after every change.
///
/// Codes are kept upper case and compared ASCII case-insensitively. The list
/// behaves as a set: a code is never stored twice.
#[derive(Debug)]
pub struct Favorites<S: KeyValueStore> {
    store: S,
    ids: Vec<String>,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Open the store and read the persisted list.
    pub fn open(store: S) -> Self {
        let mut favorites = Favorites {
            store,
            ids: Vec::new(),
        };
        favorites.load();
        favorites
    }

    /// Re-read the persisted list. Absent or unreadable state yields an empty
    /// list; this never fails.
    pub fn load(&mut self) {
        self.ids = match self.store.get(FAVORITES_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<String>>(&text) {
                Ok(list) => dedup(list),
                Err(e) => {
                    warn!(error = %e, "stored favorites are unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read favorites, starting empty");
                Vec::new()
            }
        };
        debug!(count = self.ids.len(), "favorites loaded");
    }

    /// Persist the current list. Failures are logged and swallowed.
    pub fn save(&mut self) {
        let text = match serde_json::to_string(&self.ids) {
            Ok(t) => t,
            Err(e) => {
                warn!(error = %e, "could not serialize favorites");
                return;
            }
        };
        if let Err(e) = self.store.set(FAVORITES_KEY, &text) {
            warn!(error = %e, "could not persist favorites");
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Add `id` if absent, remove it if present, then persist. Returns the new
    /// membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now_favorite = match self.position(id) {
            Some(i) => {
                self.ids.remove(i);
                false
            }
            None => {
                self.ids.push(normalize(id));
                true
            }
        };
        debug!(id, now_favorite, "favorite toggled");
        self.save();
        now_favorite
    }

    /// Codes in the order they were added.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn position(&self, id: &str) -> Option<usize> {
        let id = id.trim();
        self.ids.iter().position(|f| f.eq_ignore_ascii_case(id))
    }
}

fn normalize(id: &str) -> String {
    id.trim().to_ascii_uppercase()
}

fn dedup(list: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(list.len());
    for id in list {
        let id = normalize(&id);
        if !id.is_empty() && !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
