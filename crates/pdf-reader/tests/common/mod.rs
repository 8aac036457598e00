use image::RgbImage;
use pdf_reader::{DocumentBackend, DocumentHandle, ReaderError, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const WAIT: Duration = Duration::from_secs(5);

/// Registered paths open with a fixed page count; renders are
/// `dpi x page` pixels, optionally after a delay.
#[derive(Default)]
pub struct MemoryBackend {
    documents: HashMap<PathBuf, u16>,
    broken: HashSet<PathBuf>,
    render_delay: Duration,
}

impl MemoryBackend {
    pub fn with_document(mut self, path: &Path, pages: u16) -> Self {
        self.documents.insert(path.to_path_buf(), pages);
        self
    }

    /// Opens fine but every render fails.
    pub fn with_broken_document(mut self, path: &Path, pages: u16) -> Self {
        self.broken.insert(path.to_path_buf());
        self.with_document(path, pages)
    }

    pub fn with_render_delay(mut self, delay: Duration) -> Self {
        self.render_delay = delay;
        self
    }
}

impl DocumentBackend for MemoryBackend {
    fn open(&self, path: &Path) -> Result<Arc<dyn DocumentHandle>> {
        let pages = *self
            .documents
            .get(path)
            .ok_or_else(|| ReaderError::OpenError("not a PDF".into()))?;
        Ok(Arc::new(MemoryDocument {
            pages,
            broken: self.broken.contains(path),
            render_delay: self.render_delay,
        }))
    }
}

struct MemoryDocument {
    pages: u16,
    broken: bool,
    render_delay: Duration,
}

impl DocumentHandle for MemoryDocument {
    fn page_count(&self) -> u16 {
        self.pages
    }

    fn render_page(&self, page: u16, dpi: u32) -> Result<RgbImage> {
        std::thread::sleep(self.render_delay);
        if self.broken {
            return Err(ReaderError::RenderError("damaged content stream".into()));
        }
        Ok(RgbImage::new(dpi, u32::from(page)))
    }
}

pub struct Fixture {
    pub dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }
}
