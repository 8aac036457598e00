use image::RgbImage;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub page: u16,
    pub dpi: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStats {
    pub cached_pages: usize,
    pub memory_mb: f32,
    pub total_rendered_pages: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

#[derive(Debug, Clone)]
struct CachedPage {
    data: Arc<RgbImage>,
    last_access: u64,
}

/// Rendered pages of one document, evicting the least recently used entry
/// once `capacity` is reached.
#[derive(Debug)]
pub struct PageCache {
    capacity: usize,
    pages: HashMap<CacheKey, CachedPage>,
    clock: u64,
    stats: CacheStats,
}

impl PageCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            pages: HashMap::new(),
            clock: 0,
            stats: CacheStats::default(),
        }
    }

    pub fn get_page(&mut self, key: CacheKey) -> Option<Arc<RgbImage>> {
        self.clock += 1;
        match self.pages.get_mut(&key) {
            Some(entry) => {
                entry.last_access = self.clock;
                self.stats.cache_hits += 1;
                Some(Arc::clone(&entry.data))
            }
            None => {
                self.stats.cache_misses += 1;
                None
            }
        }
    }

    pub fn put_page(&mut self, key: CacheKey, image: Arc<RgbImage>) {
        if self.capacity == 0 {
            return;
        }

        if !self.pages.contains_key(&key) && self.pages.len() >= self.capacity {
            self.evict_lru();
        }

        self.clock += 1;
        self.pages.insert(
            key,
            CachedPage {
                data: image,
                last_access: self.clock,
            },
        );
        self.stats.total_rendered_pages += 1;
        self.update_usage();
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .pages
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(&key, _)| key);

        if let Some(key) = oldest {
            self.pages.remove(&key);
            log::debug!(
                "Evicted page {} at {} dpi ({} hits, {} misses)",
                key.page,
                key.dpi,
                self.stats.cache_hits,
                self.stats.cache_misses
            );
        }
    }

    fn update_usage(&mut self) {
        let total_bytes: usize = self.pages.values().map(|entry| entry.data.len()).sum();
        self.stats.cached_pages = self.pages.len();
        self.stats.memory_mb = total_bytes as f32 / (1024.0 * 1024.0);
    }

    pub fn clear(&mut self) {
        if !self.pages.is_empty() {
            let stats = self.get_stats();
            log::debug!(
                "Clearing page cache: {} pages ({:.1}MB), {} renders, {} hits, {} misses",
                stats.cached_pages,
                stats.memory_mb,
                stats.total_rendered_pages,
                stats.cache_hits,
                stats.cache_misses
            );
        }
        self.pages.clear();
        self.update_usage();
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get_stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(crate::constants::PAGE_CACHE_CAPACITY)
    }
}
