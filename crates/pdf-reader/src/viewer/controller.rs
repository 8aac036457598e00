use super::cache::CacheKey;
use super::session::{DocumentBackend, DocumentHandle, DocumentSession};
use crate::constants::*;
use crate::error::{ReaderError, Result};
use crate::format;
use crate::locale::Language;
use image::RgbImage;
use rust_i18n::t;
use std::path::Path;
use std::sync::Arc;

/// A render of one page at one resolution, detached from the controller so
/// it can run on a background thread.
#[derive(Clone)]
pub struct RenderRequest {
    handle: Arc<dyn DocumentHandle>,
    pub page: u16,
    pub dpi: u32,
}

impl RenderRequest {
    pub fn cache_key(&self) -> CacheKey {
        CacheKey {
            page: self.page,
            dpi: self.dpi,
        }
    }

    pub fn execute(&self) -> Result<RgbImage> {
        self.handle.render_page(self.page, self.dpi)
    }
}

impl std::fmt::Debug for RenderRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderRequest")
            .field("page", &self.page)
            .field("dpi", &self.dpi)
            .finish()
    }
}

/// Page and zoom state of one tab. `current_page` is 1-based and stays in
/// `[1, page_count]` while a session is attached.
#[derive(Debug)]
pub struct TabController {
    session: Option<DocumentSession>,
    current_page: u16,
    zoom: f32,
}

impl TabController {
    pub fn new() -> Self {
        Self {
            session: None,
            current_page: 1,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// Opens `path` and replaces the current session. On failure the
    /// controller is left untouched.
    pub fn open(&mut self, backend: &dyn DocumentBackend, path: &Path) -> Result<()> {
        let session = DocumentSession::open(backend, path)?;
        drop(self.attach(session));
        Ok(())
    }

    /// Installs an already opened session, resetting page and zoom.
    /// Returns the replaced session, if any.
    pub fn attach(&mut self, session: DocumentSession) -> Option<DocumentSession> {
        self.current_page = 1;
        self.zoom = DEFAULT_ZOOM;
        self.session.replace(session)
    }

    pub fn close(&mut self) -> Option<DocumentSession> {
        self.current_page = 1;
        self.session.take()
    }

    pub fn has_document(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DocumentSession> {
        self.session.as_ref()
    }

    pub fn page_count(&self) -> u16 {
        self.session.as_ref().map_or(0, DocumentSession::page_count)
    }

    pub fn current_page(&self) -> u16 {
        self.current_page
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    fn require_pages(&self) -> Result<u16> {
        match &self.session {
            Some(session) => Ok(session.page_count()),
            None => Err(ReaderError::NoDocument),
        }
    }

    fn move_to(&mut self, page: u16) -> Result<bool> {
        let total = self.require_pages()?;
        let target = page.clamp(1, total.max(1));
        if target == self.current_page {
            return Ok(false);
        }
        self.current_page = target;
        Ok(true)
    }

    pub fn next_page(&mut self) -> Result<bool> {
        self.move_to(self.current_page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Result<bool> {
        self.move_to(self.current_page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> Result<bool> {
        self.move_to(1)
    }

    pub fn last_page(&mut self) -> Result<bool> {
        let total = self.require_pages()?;
        self.move_to(total)
    }

    pub fn go_to_page(&mut self, page: i64) -> Result<()> {
        let total = self.require_pages()?;
        if page < 1 || page > i64::from(total) {
            return Err(ReaderError::OutOfRange { page, total });
        }
        self.current_page = page as u16;
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = if zoom.is_nan() {
            DEFAULT_ZOOM
        } else {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        };
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP_FACTOR);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = DEFAULT_ZOOM;
    }

    /// Truncated, so 1.25x renders at 187 dpi.
    pub fn effective_dpi(&self) -> u32 {
        (f64::from(BASE_DPI) * f64::from(self.zoom)) as u32
    }

    pub fn render_request(&self) -> Result<RenderRequest> {
        let session = self.session.as_ref().ok_or(ReaderError::NoDocument)?;
        Ok(RenderRequest {
            handle: session.handle(),
            page: self.current_page,
            dpi: self.effective_dpi(),
        })
    }

    pub fn render_current_page(&self) -> Result<RgbImage> {
        self.render_request()?.execute()
    }

    pub fn status_text(&self, lang: Language) -> String {
        let Some(session) = &self.session else {
            return t!("status.no_document", locale = lang.tag()).into_owned();
        };

        t!(
            "status.line",
            locale = lang.tag(),
            file = session.file_name(),
            page = self.current_page,
            total = session.page_count(),
            zoom = format::zoom_percent(self.zoom),
            size = format::format_file_size(session.file_size())
        )
        .into_owned()
    }
}

/// Parses page-entry text. Surrounding whitespace is ignored.
pub fn parse_page_input(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ReaderError::InvalidPageInput(trimmed.to_string()))
}

impl Default for TabController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::test_support::{FakeBackend, fake_pdf};

    fn opened(pages: u16) -> (TabController, tempfile::TempDir) {
        let (dir, path) = fake_pdf("doc.pdf", 2_048);
        let backend = FakeBackend::new().with_document(&path, pages);
        let mut controller = TabController::new();
        controller.open(&backend, &path).unwrap();
        (controller, dir)
    }

    #[test]
    fn test_last_then_next_is_unchanged() {
        let (mut controller, _dir) = opened(10);
        assert!(controller.last_page().unwrap());
        assert_eq!(controller.current_page(), 10);
        assert!(!controller.next_page().unwrap());
        assert_eq!(controller.current_page(), 10);
    }

    #[test]
    fn test_prev_on_first_page_is_unchanged() {
        let (mut controller, _dir) = opened(3);
        assert!(!controller.prev_page().unwrap());
        assert!(!controller.first_page().unwrap());
        assert_eq!(controller.current_page(), 1);
    }

    #[test]
    fn test_navigation_sequence_stays_in_bounds() {
        let (mut controller, _dir) = opened(4);
        let steps = [true, true, true, true, true, false, false, true, false, false, false, false];
        for forward in steps {
            if forward {
                controller.next_page().unwrap();
            } else {
                controller.prev_page().unwrap();
            }
            assert!((1..=4).contains(&controller.current_page()));
        }
    }

    #[test]
    fn test_single_page_document() {
        let (mut controller, _dir) = opened(1);
        assert!(!controller.next_page().unwrap());
        assert!(!controller.last_page().unwrap());
        assert_eq!(controller.current_page(), 1);
    }

    #[test]
    fn test_go_to_page_bounds() {
        let (mut controller, _dir) = opened(5);
        for page in [-3, 0, 6, 100] {
            assert_eq!(
                controller.go_to_page(page),
                Err(ReaderError::OutOfRange { page, total: 5 })
            );
        }
        for page in 1..=5 {
            controller.go_to_page(page).unwrap();
            assert_eq!(i64::from(controller.current_page()), page);
        }
    }

    #[test]
    fn test_navigation_without_document_fails() {
        let mut controller = TabController::new();
        assert_eq!(controller.next_page(), Err(ReaderError::NoDocument));
        assert_eq!(controller.prev_page(), Err(ReaderError::NoDocument));
        assert_eq!(controller.first_page(), Err(ReaderError::NoDocument));
        assert_eq!(controller.last_page(), Err(ReaderError::NoDocument));
        assert_eq!(controller.go_to_page(1), Err(ReaderError::NoDocument));
        assert_eq!(controller.page_count(), 0);
    }

    #[test]
    fn test_set_zoom_clamps() {
        let mut controller = TabController::new();
        controller.set_zoom(5.0);
        assert_eq!(controller.zoom(), 3.0);
        controller.set_zoom(0.1);
        assert_eq!(controller.zoom(), 0.5);
        controller.set_zoom(f32::NAN);
        assert_eq!(controller.zoom(), 1.0);
    }

    #[test]
    fn test_repeated_zoom_stays_in_bounds() {
        let mut controller = TabController::new();
        for _ in 0..20 {
            controller.zoom_in();
            assert!(controller.zoom() <= MAX_ZOOM);
        }
        assert_eq!(controller.zoom(), MAX_ZOOM);
        for _ in 0..40 {
            controller.zoom_out();
            assert!(controller.zoom() >= MIN_ZOOM);
        }
        assert_eq!(controller.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_zoom_in_then_out_round_trips() {
        let mut controller = TabController::new();
        for start in [0.6_f32, 1.0, 1.7, 2.3] {
            controller.set_zoom(start);
            controller.zoom_in();
            controller.zoom_out();
            assert!((controller.zoom() - start).abs() < 1e-5, "start {start}");
        }
    }

    #[test]
    fn test_reset_zoom() {
        let mut controller = TabController::new();
        controller.zoom_in();
        controller.reset_zoom();
        assert_eq!(controller.zoom(), DEFAULT_ZOOM);
    }

    #[test]
    fn test_open_resets_page_and_zoom() {
        let (mut controller, _dir) = opened(8);
        controller.go_to_page(6).unwrap();
        controller.set_zoom(2.5);

        let (_other_dir, other) = fake_pdf("other.pdf", 100);
        let backend = FakeBackend::new().with_document(&other, 3);
        controller.open(&backend, &other).unwrap();

        assert_eq!(controller.current_page(), 1);
        assert_eq!(controller.zoom(), DEFAULT_ZOOM);
        assert_eq!(controller.page_count(), 3);
    }

    #[test]
    fn test_open_releases_previous_session() {
        let (dir, first) = fake_pdf("first.pdf", 10);
        let second = dir.path().join("second.pdf");
        std::fs::write(&second, b"%PDF").unwrap();
        let backend = FakeBackend::new()
            .with_document(&first, 2)
            .with_document(&second, 2);

        let mut controller = TabController::new();
        controller.open(&backend, &first).unwrap();
        assert_eq!(backend.open_handles(), 1);
        controller.open(&backend, &second).unwrap();
        assert_eq!(backend.open_handles(), 1);
        drop(controller.close());
        assert_eq!(backend.open_handles(), 0);
    }

    #[test]
    fn test_missing_file_leaves_tab_empty() {
        let backend = FakeBackend::new();
        let mut controller = TabController::new();
        let result = controller.open(&backend, Path::new("missing.pdf"));
        assert_eq!(
            result,
            Err(ReaderError::NotFound("missing.pdf".into()))
        );
        assert!(!controller.has_document());
        assert!(matches!(
            controller.render_current_page(),
            Err(ReaderError::NoDocument)
        ));
    }

    #[test]
    fn test_failed_open_keeps_previous_state() {
        let (mut controller, dir) = opened(6);
        controller.go_to_page(4).unwrap();
        controller.set_zoom(2.0);

        let broken = dir.path().join("broken.pdf");
        std::fs::write(&broken, b"garbage").unwrap();
        let backend = FakeBackend::new();
        assert!(matches!(
            controller.open(&backend, &broken),
            Err(ReaderError::OpenError(_))
        ));

        assert_eq!(controller.current_page(), 4);
        assert_eq!(controller.zoom(), 2.0);
        assert_eq!(controller.page_count(), 6);
    }

    #[test]
    fn test_render_uses_zoomed_dpi() {
        let (mut controller, _dir) = opened(3);
        controller.go_to_page(2).unwrap();
        controller.set_zoom(2.0);

        let request = controller.render_request().unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.dpi, 300);

        let image = controller.render_current_page().unwrap();
        assert_eq!(image.dimensions(), (300, 2));
    }

    #[test]
    fn test_effective_dpi_truncates() {
        let mut controller = TabController::new();
        assert_eq!(controller.effective_dpi(), 150);
        controller.zoom_in();
        assert_eq!(controller.effective_dpi(), 187);
        controller.reset_zoom();
        controller.zoom_out();
        assert_eq!(controller.effective_dpi(), 120);
        controller.set_zoom(MAX_ZOOM);
        assert_eq!(controller.effective_dpi(), 450);
    }

    #[test]
    fn test_backend_render_failure_propagates() {
        let (dir, path) = fake_pdf("broken.pdf", 64);
        let backend = FakeBackend::new()
            .with_document(&path, 2)
            .with_failing_render(&path);
        let mut controller = TabController::new();
        controller.open(&backend, &path).unwrap();

        assert!(matches!(
            controller.render_current_page(),
            Err(ReaderError::RenderError(_))
        ));
        assert_eq!(controller.current_page(), 1);
        drop(dir);
    }

    #[test]
    fn test_parse_page_input() {
        assert_eq!(parse_page_input(" 7 "), Ok(7));
        assert_eq!(parse_page_input("-2"), Ok(-2));
        assert_eq!(
            parse_page_input(" abc "),
            Err(ReaderError::InvalidPageInput("abc".into()))
        );
        assert_eq!(
            parse_page_input(""),
            Err(ReaderError::InvalidPageInput(String::new()))
        );
    }

    #[test]
    fn test_status_text_without_document() {
        let controller = TabController::new();
        assert_eq!(controller.status_text(Language::English), "No document open");
        assert_eq!(controller.status_text(Language::Chinese), "未打开文档");
    }

    #[test]
    fn test_status_text_formats_all_fields() {
        let (mut controller, _dir) = opened(12);
        controller.go_to_page(3).unwrap();
        controller.zoom_in();

        assert_eq!(
            controller.status_text(Language::English),
            "doc.pdf  |  Page 3 / 12  |  Zoom: 125%  |  Size: 2.0 KB"
        );
        assert_eq!(
            controller.status_text(Language::Chinese),
            "doc.pdf  |  第 3 / 12 页  |  缩放: 125%  |  大小: 2.0 KB"
        );
    }
}
