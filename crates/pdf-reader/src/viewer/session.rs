use crate::error::{ReaderError, Result};
use crate::format;
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Opens documents for rendering. Implementations are shared with
/// background tasks, so they must be thread-safe.
pub trait DocumentBackend: Send + Sync {
    fn open(&self, path: &Path) -> Result<Arc<dyn DocumentHandle>>;
}

/// One opened document. Resources are released when the last reference
/// is dropped.
pub trait DocumentHandle: Send + Sync {
    fn page_count(&self) -> u16;

    /// `page` is 1-based.
    fn render_page(&self, page: u16, dpi: u32) -> Result<RgbImage>;
}

#[derive(Clone)]
pub struct DocumentSession {
    path: PathBuf,
    page_count: u16,
    file_size: u64,
    handle: Arc<dyn DocumentHandle>,
}

impl std::fmt::Debug for DocumentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSession")
            .field("path", &self.path)
            .field("page_count", &self.page_count)
            .field("file_size", &self.file_size)
            .finish()
    }
}

impl DocumentSession {
    pub fn open(backend: &dyn DocumentBackend, path: &Path) -> Result<Self> {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => return Err(ReaderError::NotFound(path.to_path_buf())),
        };

        let handle = backend.open(path)?;
        let page_count = handle.page_count();

        log::info!("Opened {} ({} pages)", path.display(), page_count);

        Ok(Self {
            path: path.to_path_buf(),
            page_count,
            file_size: metadata.len(),
            handle,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        format::file_name(&self.path)
    }

    pub fn page_count(&self) -> u16 {
        self.page_count
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn handle(&self) -> Arc<dyn DocumentHandle> {
        Arc::clone(&self.handle)
    }
}
