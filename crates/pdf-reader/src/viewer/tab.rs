use super::cache::{CacheKey, PageCache};
use super::controller::{RenderRequest, TabController};
use super::session::DocumentSession;
use crate::error::{ReaderError, Result};
use crate::format;
use crate::locale::{self, Language};
use image::RgbImage;
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Load,
    Render,
}

/// What the tab's display area currently shows.
#[derive(Debug, Clone)]
pub enum TabView {
    Empty,
    /// A document is attached but its first page has not arrived yet.
    Rendering,
    Page(Arc<RgbImage>),
    Failed(FailureKind, ReaderError),
}

pub enum RenderDispatch {
    Cached,
    Pending {
        generation: u64,
        request: RenderRequest,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Attached,
    Failed,
    Stale,
}

#[derive(Debug)]
pub struct Tab {
    id: TabId,
    pub controller: TabController,
    view: TabView,
    view_revision: u64,
    loading: Option<PathBuf>,
    load_generation: u64,
    render_generation: u64,
    cache: PageCache,
}

impl Tab {
    pub fn new(id: TabId) -> Self {
        Self {
            id,
            controller: TabController::new(),
            view: TabView::Empty,
            view_revision: 0,
            loading: None,
            load_generation: 0,
            render_generation: 0,
            cache: PageCache::default(),
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn view(&self) -> &TabView {
        &self.view
    }

    /// Bumped on every change of `view`, so presentation can cache textures.
    pub fn view_revision(&self) -> u64 {
        self.view_revision
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    fn set_view(&mut self, view: TabView) {
        self.view = view;
        self.view_revision += 1;
    }

    pub fn title(&self, lang: Language) -> String {
        match (self.controller.session(), &self.loading) {
            (Some(session), _) => format::tab_title(session.path()),
            (None, Some(path)) => format::tab_title(path),
            (None, None) => t!("tab.new_tab", locale = lang.tag()).into_owned(),
        }
    }

    /// Text shown over the display area, if any.
    pub fn overlay_text(&self, lang: Language) -> Option<String> {
        if self.loading.is_some() || matches!(self.view, TabView::Rendering) {
            return Some(t!("messages.loading", locale = lang.tag()).into_owned());
        }
        match &self.view {
            TabView::Rendering => None,
            TabView::Empty => Some(t!("messages.double_click_open", locale = lang.tag()).into_owned()),
            TabView::Page(_) => None,
            TabView::Failed(FailureKind::Load, error) => Some(
                t!(
                    "messages.load_failed",
                    locale = lang.tag(),
                    error = locale::describe_error(error, lang)
                )
                .into_owned(),
            ),
            TabView::Failed(FailureKind::Render, error) => Some(
                t!(
                    "messages.render_failed",
                    locale = lang.tag(),
                    error = locale::describe_error(error, lang)
                )
                .into_owned(),
            ),
        }
    }

    pub fn begin_load(&mut self, path: &Path) -> u64 {
        self.load_generation += 1;
        self.loading = Some(path.to_path_buf());
        self.load_generation
    }

    /// Applies a finished load. Results of superseded loads are dropped,
    /// which releases their session.
    pub fn finish_load(&mut self, generation: u64, result: Result<DocumentSession>) -> LoadOutcome {
        if generation != self.load_generation {
            return LoadOutcome::Stale;
        }
        self.loading = None;

        match result {
            Ok(session) => {
                self.cache.clear();
                drop(self.controller.attach(session));
                // invalidate renders still in flight for the replaced session
                self.render_generation += 1;
                self.set_view(TabView::Rendering);
                LoadOutcome::Attached
            }
            Err(error) => {
                log::warn!("Load failed in tab {}: {}", self.id.0, error);
                if !self.controller.has_document() {
                    self.set_view(TabView::Failed(FailureKind::Load, error));
                }
                LoadOutcome::Failed
            }
        }
    }

    pub fn begin_render(&mut self) -> Result<RenderDispatch> {
        let request = self.controller.render_request()?;
        self.render_generation += 1;

        if let Some(image) = self.cache.get_page(request.cache_key()) {
            log::debug!("Cache hit for page {} at {} dpi", request.page, request.dpi);
            self.set_view(TabView::Page(image));
            return Ok(RenderDispatch::Cached);
        }

        Ok(RenderDispatch::Pending {
            generation: self.render_generation,
            request,
        })
    }

    /// Applies a finished render. Returns false when a newer render has
    /// been dispatched since.
    pub fn finish_render(&mut self, generation: u64, key: CacheKey, result: Result<RgbImage>) -> bool {
        if generation != self.render_generation {
            log::debug!("Discarding stale render of page {}", key.page);
            return false;
        }

        match result {
            Ok(image) => {
                let image = Arc::new(image);
                self.cache.put_page(key, Arc::clone(&image));
                self.set_view(TabView::Page(image));
            }
            Err(error) => {
                log::warn!("Render of page {} failed: {}", key.page, error);
                self.set_view(TabView::Failed(FailureKind::Render, error));
            }
        }
        true
    }

    /// Releases the session and everything rendered from it.
    pub fn close(&mut self) {
        self.cache.clear();
        if let Some(session) = self.controller.close() {
            log::info!("Closed {}", session.path().display());
        }
        self.loading = None;
        self.load_generation += 1;
        self.render_generation += 1;
        self.set_view(TabView::Empty);
    }
}
