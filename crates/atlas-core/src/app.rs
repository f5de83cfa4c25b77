// crates/atlas-core/src/app.rs

//! # Application state
//!
//! [`Explorer`] owns everything a front-end needs between two user events: the
//! loaded [`Collection`], the transient [`ViewState`], the persisted
//! [`Favorites`], the [`LoadState`] and the open detail view.
//!
//! Front-ends translate their events (search box input, sort selector,
//! favorites toggle, paging buttons, modal open/close) into [`Command`]s and
//! call [`Explorer::dispatch`]. The returned [`Redraw`] tells them which part
//! of the display is stale.
//!
//! ```
//! use atlas_core::app::{Command, Explorer, Redraw};
//! use atlas_core::render::BorderDisplay;
//! use atlas_core::store::MemoryStore;
//!
//! let mut explorer = Explorer::new(MemoryStore::new(), 20, BorderDisplay::Names);
//! assert_eq!(explorer.dispatch(Command::SetSearch("ger".into())), Redraw::Grid);
//! assert_eq!(explorer.dispatch(Command::SetSearch("ger".into())), Redraw::Nothing);
//! ```

use crate::common::Stats;
use crate::config::AtlasConfig;
use crate::error::{LoadError, RenderError};
use crate::favorites::Favorites;
use crate::loader::{Loader, Transport};
use crate::model::{Collection, Country};
use crate::pipeline::{self, Criteria, SortKey};
use crate::render::{html, BorderDisplay, CardView, DetailView, PageView, PAGE_WINDOW};
use crate::store::KeyValueStore;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Search, sort, favorites-only flag and current page. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search: String,
    pub sort: SortKey,
    pub favorites_only: bool,
    /// 1-based.
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            search: String::new(),
            sort: SortKey::default(),
            favorites_only: false,
            page: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Ready,
    /// The grid is replaced by an error panel with a retry control.
    Failed(LoadError),
}

/// What the last load read from, so [`Explorer::retry`] can repeat it.
#[derive(Debug, Clone)]
pub enum Source {
    Remote(Loader),
    Snapshot(PathBuf),
}

/// How the detail view was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Button,
    Backdrop,
    Escape,
}

/// A discrete user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetSearch(String),
    SetSort(SortKey),
    SetFavoritesOnly(bool),
    ToggleFavoritesOnly,
    ToggleFavorite(String),
    GoToPage(usize),
    NextPage,
    PreviousPage,
    OpenDetail(String),
    CloseDetail(CloseReason),
}

/// The part of the display a command made stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redraw {
    Nothing,
    /// Grid and page navigation.
    Grid,
    /// The detail view (opened, closed or changed).
    Detail,
    /// A single card; the detail view too if it shows the same country.
    Card(String),
}

/// The explorer state machine.
#[derive(Debug)]
pub struct Explorer<S: KeyValueStore> {
    collection: Collection,
    view: ViewState,
    favorites: Favorites<S>,
    load_state: LoadState,
    page_size: usize,
    borders: BorderDisplay,
    detail: Option<String>,
    source: Option<Source>,
}

impl<S: KeyValueStore> Explorer<S> {
    /// An empty explorer; favorites are read from `store` immediately.
    pub fn new(store: S, page_size: usize, borders: BorderDisplay) -> Self {
        Explorer {
            collection: Collection::default(),
            view: ViewState::default(),
            favorites: Favorites::open(store),
            load_state: LoadState::Idle,
            page_size: page_size.max(1),
            borders,
            detail: None,
            source: None,
        }
    }

    pub fn from_config(config: &AtlasConfig, store: S) -> Self {
        Self::new(store, config.page_size, config.borders)
    }

    /// Use an already loaded collection.
    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.collection = collection;
        self.load_state = LoadState::Ready;
        self
    }

    // ----- Accessors -----

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn favorites(&self) -> &Favorites<S> {
        &self.favorites
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn borders(&self) -> BorderDisplay {
        self.borders
    }

    /// Code of the country shown in the detail view, if open.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            favorites: self.favorites.len(),
            ..self.collection.stats()
        }
    }

    // ----- Loading -----

    /// Load from the network through `transport`.
    pub fn load_with<T: Transport + ?Sized>(&mut self, loader: Loader, transport: &T) -> Redraw {
        let result = loader.load(transport);
        self.source = Some(Source::Remote(loader));
        self.apply_load(result)
    }

    /// Load from a local snapshot file.
    pub fn load_snapshot(&mut self, path: impl Into<PathBuf>) -> Redraw {
        let path = path.into();
        let result = Loader::load_snapshot(&path);
        self.source = Some(Source::Snapshot(path));
        self.apply_load(result)
    }

    /// Repeat the last load. Without a previous load this does nothing.
    pub fn retry<T: Transport + ?Sized>(&mut self, transport: &T) -> Redraw {
        match self.source.take() {
            Some(Source::Remote(loader)) => {
                info!("retrying remote load");
                self.load_with(loader, transport)
            }
            Some(Source::Snapshot(path)) => {
                info!(path = %path.display(), "retrying snapshot load");
                self.load_snapshot(path)
            }
            None => Redraw::Nothing,
        }
    }

    fn apply_load(&mut self, result: Result<Vec<Country>, LoadError>) -> Redraw {
        match result {
            Ok(countries) => {
                self.collection = Collection::new(countries);
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "dataset unavailable");
                self.collection = Collection::default();
                self.load_state = LoadState::Failed(e);
            }
        }
        self.view.page = 1;
        Redraw::Grid
    }

    // ----- Commands -----

    pub fn dispatch(&mut self, command: Command) -> Redraw {
        debug!(?command, "dispatch");
        match command {
            Command::SetSearch(text) => {
                if text == self.view.search {
                    return Redraw::Nothing;
                }
                self.view.search = text;
                self.reset_page()
            }
            Command::SetSort(key) => {
                if key == self.view.sort {
                    return Redraw::Nothing;
                }
                self.view.sort = key;
                self.reset_page()
            }
            Command::SetFavoritesOnly(on) => {
                if on == self.view.favorites_only {
                    return Redraw::Nothing;
                }
                self.view.favorites_only = on;
                self.reset_page()
            }
            Command::ToggleFavoritesOnly => {
                self.view.favorites_only = !self.view.favorites_only;
                self.reset_page()
            }
            Command::ToggleFavorite(code) => self.toggle_favorite(&code),
            Command::GoToPage(page) => self.go_to_page(page),
            Command::NextPage => self.go_to_page(self.view.page.saturating_add(1)),
            Command::PreviousPage => self.go_to_page(self.view.page.saturating_sub(1)),
            Command::OpenDetail(code) => {
                self.detail = Some(code.trim().to_ascii_uppercase());
                Redraw::Detail
            }
            Command::CloseDetail(reason) => match self.detail.take() {
                Some(code) => {
                    debug!(code, ?reason, "detail closed");
                    Redraw::Detail
                }
                None => Redraw::Nothing,
            },
        }
    }

    fn reset_page(&mut self) -> Redraw {
        self.view.page = 1;
        Redraw::Grid
    }

    fn go_to_page(&mut self, page: usize) -> Redraw {
        let page = pipeline::clamp_page(page, self.page_count());
        if page == self.view.page {
            return Redraw::Nothing;
        }
        self.view.page = page;
        Redraw::Grid
    }

    fn toggle_favorite(&mut self, code: &str) -> Redraw {
        let Some(country) = self.collection.find_by_code(code) else {
            warn!(code, "cannot favorite unknown country");
            return Redraw::Nothing;
        };
        let code = country.code.clone();
        self.favorites.toggle(&code);
        if self.view.favorites_only {
            self.view.page = pipeline::clamp_page(self.view.page, self.page_count());
            Redraw::Grid
        } else {
            Redraw::Card(code)
        }
    }

    // ----- Views -----

    fn criteria(&self) -> Criteria<'_> {
        Criteria {
            search: &self.view.search,
            sort: self.view.sort,
            favorites_only: self.view.favorites_only,
            favorites: self.favorites.ids(),
        }
    }

    /// The filtered, sorted records.
    pub fn visible(&self) -> Vec<&Country> {
        pipeline::visible(self.collection.countries(), &self.criteria())
    }

    pub fn page_count(&self) -> usize {
        pipeline::page_count(self.visible().len(), self.page_size)
    }

    pub fn is_favorite(&self, code: &str) -> bool {
        self.favorites.is_favorite(code)
    }

    pub fn card(&self, code: &str) -> Option<CardView> {
        self.collection
            .find_by_code(code)
            .map(|c| CardView::new(c, self.is_favorite(&c.code)))
    }

    pub fn current_page(&self) -> PageView {
        let visible = self.visible();
        let page_count = pipeline::page_count(visible.len(), self.page_size);
        let page = pipeline::clamp_page(self.view.page, page_count);
        let items = pipeline::paginate(&visible, page, self.page_size)
            .iter()
            .map(|c| CardView::new(c, self.is_favorite(&c.code)))
            .collect();
        PageView {
            items,
            page,
            page_count,
            total: visible.len(),
            window: pipeline::page_window(page, page_count, PAGE_WINDOW),
        }
    }

    pub fn detail_view(&self, code: &str) -> Result<DetailView, RenderError> {
        let country = self
            .collection
            .find_by_code(code)
            .ok_or_else(|| RenderError::UnknownCountry(code.to_string()))?;
        DetailView::build(
            country,
            &self.collection,
            self.is_favorite(&country.code),
            self.borders,
        )
    }

    /// Grid markup, or the error panel when loading failed.
    pub fn grid_html(&self) -> String {
        match &self.load_state {
            LoadState::Failed(e) => html::render_error_panel(e),
            LoadState::Idle => r#"<p class="loading">Loading countries…</p>"#.to_string(),
            LoadState::Ready => html::render_grid(&self.current_page()),
        }
    }

    pub fn pagination_html(&self) -> String {
        match self.load_state {
            LoadState::Ready => html::render_pagination(&self.current_page()),
            _ => String::new(),
        }
    }

    /// Markup of the open detail view, `None` when closed.
    pub fn detail_html(&self) -> Option<String> {
        self.detail.as_deref().map(|code| {
            html::detail_panel(
                &self.collection,
                code,
                self.is_favorite(code),
                self.borders,
            )
        })
    }
}
