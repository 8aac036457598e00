use super::session::{DocumentBackend, DocumentHandle};
use crate::constants::POINTS_PER_INCH;
use crate::error::{ReaderError, Result};
use crossbeam::channel::{self, Receiver, Sender};
use image::RgbImage;
use pdfium_render::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const WORKER_THREAD_NAME: &str = "pdfium-worker";

type Reply<T> = Sender<Result<T>>;

enum Command {
    Open {
        path: PathBuf,
        reply: Reply<(u64, u16)>,
    },
    Render {
        id: u64,
        page: u16,
        dpi: u32,
        reply: Reply<RgbImage>,
    },
    Close {
        id: u64,
    },
}

/// Pdfium is bound and used on a single worker thread; handles talk to it
/// over a channel.
#[derive(Clone)]
pub struct PdfiumBackend {
    commands: Sender<Command>,
}

impl PdfiumBackend {
    pub fn spawn(library_dir: Option<PathBuf>) -> Result<Self> {
        let (commands, receiver) = channel::unbounded();

        std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run_worker(library_dir, receiver))?;

        Ok(Self { commands })
    }

    fn request<T>(&self, build: impl FnOnce(Reply<T>) -> Command) -> Result<T> {
        let (reply, response) = channel::bounded(1);
        self.commands
            .send(build(reply))
            .map_err(|_| ReaderError::OpenError("PDF worker has stopped".into()))?;
        response
            .recv()
            .map_err(|_| ReaderError::OpenError("PDF worker has stopped".into()))?
    }
}

impl DocumentBackend for PdfiumBackend {
    fn open(&self, path: &Path) -> Result<Arc<dyn DocumentHandle>> {
        let path = path.to_path_buf();
        let (id, page_count) = self.request(|reply| Command::Open { path, reply })?;

        Ok(Arc::new(PdfiumDocument {
            id,
            page_count,
            backend: self.clone(),
        }))
    }
}

struct PdfiumDocument {
    id: u64,
    page_count: u16,
    backend: PdfiumBackend,
}

impl DocumentHandle for PdfiumDocument {
    fn page_count(&self) -> u16 {
        self.page_count
    }

    fn render_page(&self, page: u16, dpi: u32) -> Result<RgbImage> {
        if page < 1 || page > self.page_count {
            return Err(ReaderError::OutOfRange {
                page: i64::from(page),
                total: self.page_count,
            });
        }

        let id = self.id;
        self.backend
            .request(|reply| Command::Render {
                id,
                page,
                dpi,
                reply,
            })
            .map_err(|e| match e {
                ReaderError::OpenError(reason) => ReaderError::RenderError(reason),
                other => other,
            })
    }
}

impl Drop for PdfiumDocument {
    fn drop(&mut self) {
        let _ = self.backend.commands.send(Command::Close { id: self.id });
    }
}

fn library_candidates(library_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = library_dir {
        dirs.push(dir);
    }
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(dir);
    }

    dirs.into_iter()
        .map(|dir| PathBuf::from(Pdfium::pdfium_platform_library_name_at_path(&dir)))
        .collect()
}

fn bind_pdfium(library_dir: Option<PathBuf>) -> std::result::Result<Pdfium, String> {
    for candidate in library_candidates(library_dir) {
        if !candidate.exists() {
            continue;
        }
        match Pdfium::bind_to_library(&candidate) {
            Ok(bindings) => {
                log::info!("Bound PDFium at {}", candidate.display());
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => log::warn!("Failed to bind PDFium at {}: {}", candidate.display(), e),
        }
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| format!("PDFium library not found: {}", e))
}

fn run_worker(library_dir: Option<PathBuf>, receiver: Receiver<Command>) {
    let pdfium = match bind_pdfium(library_dir) {
        Ok(pdfium) => pdfium,
        Err(reason) => {
            log::error!("{}", reason);
            reject_all(&receiver, &reason);
            return;
        }
    };

    let mut documents: HashMap<u64, PdfDocument<'_>> = HashMap::new();
    let mut next_id: u64 = 1;

    for command in receiver.iter() {
        match command {
            Command::Open { path, reply } => {
                let result = pdfium
                    .load_pdf_from_file(&path, None)
                    .map_err(|e| ReaderError::OpenError(e.to_string()))
                    .map(|document| {
                        let id = next_id;
                        next_id += 1;
                        let page_count = document.pages().len();
                        documents.insert(id, document);
                        (id, page_count)
                    });
                let _ = reply.send(result);
            }
            Command::Render {
                id,
                page,
                dpi,
                reply,
            } => {
                let result = match documents.get(&id) {
                    Some(document) => render_page(document, page, dpi),
                    None => Err(ReaderError::NoDocument),
                };
                let _ = reply.send(result);
            }
            Command::Close { id } => {
                if documents.remove(&id).is_some() {
                    log::debug!("Closed document {}", id);
                }
            }
        }
    }
}

fn reject_all(receiver: &Receiver<Command>, reason: &str) {
    for command in receiver.iter() {
        match command {
            Command::Open { reply, .. } => {
                let _ = reply.send(Err(ReaderError::OpenError(reason.to_string())));
            }
            Command::Render { reply, .. } => {
                let _ = reply.send(Err(ReaderError::RenderError(reason.to_string())));
            }
            Command::Close { .. } => {}
        }
    }
}

fn render_page(document: &PdfDocument<'_>, page: u16, dpi: u32) -> Result<RgbImage> {
    let page = document
        .pages()
        .get(page - 1)
        .map_err(|e| ReaderError::RenderError(format!("Failed to get page: {}", e)))?;

    let scale = dpi as f32 / POINTS_PER_INCH;
    let config = PdfRenderConfig::new().scale_page_by_factor(scale);

    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| ReaderError::RenderError(format!("Failed to render bitmap: {}", e)))?;

    let width = bitmap.width().max(0) as u32;
    let height = bitmap.height().max(0) as u32;
    let pixels = bitmap.as_raw_bytes();

    Ok(bgra_to_rgb(&pixels, width, height))
}

/// Pdfium bitmaps are stored as BGRA.
fn bgra_to_rgb(pixels: &[u8], width: u32, height: u32) -> RgbImage {
    let mut rgb_image = RgbImage::new(width, height);
    let row_stride = if height > 0 {
        pixels.len() / height as usize
    } else {
        0
    };

    for (y, row) in pixels.chunks(row_stride.max(1)).take(height as usize).enumerate() {
        for (x, chunk) in row.chunks_exact(4).take(width as usize).enumerate() {
            rgb_image.put_pixel(x as u32, y as u32, image::Rgb([chunk[2], chunk[1], chunk[0]]));
        }
    }

    rgb_image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgra_conversion_swaps_channels() {
        let pixels = vec![10, 20, 30, 255, 1, 2, 3, 255];
        let image = bgra_to_rgb(&pixels, 2, 1);
        assert_eq!(image.get_pixel(0, 0).0, [30, 20, 10]);
        assert_eq!(image.get_pixel(1, 0).0, [3, 2, 1]);
    }

    #[test]
    fn test_bgra_conversion_skips_row_padding() {
        // one pixel per row, rows padded to 8 bytes
        let pixels = vec![1, 2, 3, 255, 0, 0, 0, 0, 4, 5, 6, 255, 0, 0, 0, 0];
        let image = bgra_to_rgb(&pixels, 1, 2);
        assert_eq!(image.get_pixel(0, 0).0, [3, 2, 1]);
        assert_eq!(image.get_pixel(0, 1).0, [6, 5, 4]);
    }

    #[test]
    fn test_empty_bitmap() {
        let image = bgra_to_rgb(&[], 0, 0);
        assert_eq!(image.dimensions(), (0, 0));
    }
}
