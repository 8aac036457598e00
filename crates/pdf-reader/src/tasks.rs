use crate::error::Result;
use crate::file_io;
use crate::viewer::cache::CacheKey;
use crate::viewer::controller::RenderRequest;
use crate::viewer::session::{DocumentBackend, DocumentSession};
use crate::viewer::tab::TabId;
use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use image::RgbImage;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

pub enum TaskResult {
    Loaded {
        tab: TabId,
        generation: u64,
        result: Result<DocumentSession>,
    },
    Rendered {
        tab: TabId,
        generation: u64,
        key: CacheKey,
        result: Result<RgbImage>,
    },
    Saved {
        destination: PathBuf,
        result: Result<u64>,
    },
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Runs slow work off the UI thread. Results come back over a channel and
/// are applied by whoever drains it.
pub struct TaskRunner {
    sender: Sender<TaskResult>,
    receiver: Receiver<TaskResult>,
    in_flight: usize,
    waker: Option<Waker>,
}

impl TaskRunner {
    pub fn new() -> Self {
        let (sender, receiver) = channel::unbounded();
        Self {
            sender,
            receiver,
            in_flight: 0,
            waker: None,
        }
    }

    /// Called from worker threads after each delivered result.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn spawn(&mut self, job: impl FnOnce() -> TaskResult + Send + 'static) {
        let sender = self.sender.clone();
        let waker = self.waker.clone();
        self.in_flight += 1;

        std::thread::spawn(move || {
            let _ = sender.send(job());
            if let Some(waker) = waker {
                waker();
            }
        });
    }

    pub fn spawn_load(
        &mut self,
        tab: TabId,
        generation: u64,
        backend: Arc<dyn DocumentBackend>,
        path: PathBuf,
    ) {
        log::debug!("Loading {} into tab {}", path.display(), tab.0);
        self.spawn(move || TaskResult::Loaded {
            tab,
            generation,
            result: DocumentSession::open(backend.as_ref(), &path),
        });
    }

    pub fn spawn_render(&mut self, tab: TabId, generation: u64, request: RenderRequest) {
        log::debug!("Rendering page {} at {} dpi", request.page, request.dpi);
        self.spawn(move || TaskResult::Rendered {
            tab,
            generation,
            key: request.cache_key(),
            result: request.execute(),
        });
    }

    pub fn spawn_save(&mut self, source: PathBuf, destination: PathBuf) {
        self.spawn(move || {
            let result = file_io::copy_document(&source, &destination);
            TaskResult::Saved {
                destination,
                result,
            }
        });
    }

    /// Results that have arrived so far, without blocking.
    pub fn drain(&mut self) -> Vec<TaskResult> {
        let results: Vec<_> = self.receiver.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(results.len());
        results
    }

    /// Blocks until the next result arrives or `deadline` passes.
    pub fn next_before(&mut self, deadline: Instant) -> Option<TaskResult> {
        let timeout = deadline.saturating_duration_since(Instant::now());
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(result)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}
