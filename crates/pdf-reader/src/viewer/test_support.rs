use super::session::{DocumentBackend, DocumentHandle};
use crate::error::{ReaderError, Result};
use image::RgbImage;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory backend: registered paths open with a fixed page count, any
/// other existing file fails to parse. Renders are `dpi x page` pixels.
#[derive(Default)]
pub struct FakeBackend {
    documents: HashMap<PathBuf, u16>,
    failing_renders: HashSet<PathBuf>,
    open_handles: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: &Path, pages: u16) -> Self {
        self.documents.insert(path.to_path_buf(), pages);
        self
    }

    pub fn with_failing_render(mut self, path: &Path) -> Self {
        self.failing_renders.insert(path.to_path_buf());
        self
    }

    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }
}

impl DocumentBackend for FakeBackend {
    fn open(&self, path: &Path) -> Result<Arc<dyn DocumentHandle>> {
        let pages = *self
            .documents
            .get(path)
            .ok_or_else(|| ReaderError::OpenError("not a PDF".into()))?;
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeDocument {
            pages,
            fail_render: self.failing_renders.contains(path),
            open_handles: Arc::clone(&self.open_handles),
        }))
    }
}

struct FakeDocument {
    pages: u16,
    fail_render: bool,
    open_handles: Arc<AtomicUsize>,
}

impl DocumentHandle for FakeDocument {
    fn page_count(&self) -> u16 {
        self.pages
    }

    fn render_page(&self, page: u16, dpi: u32) -> Result<RgbImage> {
        if self.fail_render {
            return Err(ReaderError::RenderError("broken page".into()));
        }
        if page < 1 || page > self.pages {
            return Err(ReaderError::OutOfRange {
                page: i64::from(page),
                total: self.pages,
            });
        }
        Ok(RgbImage::new(dpi, u32::from(page)))
    }
}

impl Drop for FakeDocument {
    fn drop(&mut self) {
        self.open_handles.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn fake_pdf(name: &str, size: usize) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, vec![b'%'; size]).unwrap();
    (dir, path)
}
