//! iModel thumbnails with a bounded cache.
//!
//! The cache belongs to whoever owns the loader; there is no process-wide
//! instance. Entries are evicted least-recently-used once `capacity` is
//! exceeded and are treated as missing after `ttl`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use urlencoding::encode;

use crate::client::{ACCEPT_PNG, AccessToken, ApiRequest, Transport};

pub const DEFAULT_THUMBNAIL_CAPACITY: usize = 100;
pub const DEFAULT_THUMBNAIL_TTL: Duration = Duration::from_secs(10 * 60);

/// PNG bytes of one thumbnail. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    bytes: Arc<[u8]>,
}

impl Thumbnail {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:` URL for embedding in HTML.
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.bytes))
    }
}

struct CacheEntry {
    thumbnail: Thumbnail,
    stored_at: Instant,
}

pub struct ThumbnailCache {
    capacity: usize,
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
    /// Least recently used first.
    order: VecDeque<String>,
}

impl ThumbnailCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity,
            ttl,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&mut self, id: &str) -> Option<Thumbnail> {
        let expired = self.entries.get(id)?.stored_at.elapsed() >= self.ttl;
        if expired {
            self.entries.remove(id);
            self.forget(id);
            return None;
        }
        self.touch(id);
        self.entries.get(id).map(|entry| entry.thumbnail.clone())
    }

    pub fn insert(&mut self, id: &str, thumbnail: Thumbnail) {
        if self.capacity == 0 {
            return;
        }
        self.forget(id);
        self.order.push_back(id.to_string());
        self.entries.insert(
            id.to_string(),
            CacheEntry {
                thumbnail,
                stored_at: Instant::now(),
            },
        );
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn touch(&mut self, id: &str) {
        self.forget(id);
        self.order.push_back(id.to_string());
    }

    fn forget(&mut self, id: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == id) {
            self.order.remove(pos);
        }
    }
}

impl Default for ThumbnailCache {
    fn default() -> Self {
        Self::new(DEFAULT_THUMBNAIL_CAPACITY, DEFAULT_THUMBNAIL_TTL)
    }
}

/// Fetches small iModel thumbnails through the transport, cached.
pub struct ThumbnailLoader {
    transport: Arc<dyn Transport>,
    cache: Mutex<ThumbnailCache>,
}

impl ThumbnailLoader {
    pub fn new(transport: Arc<dyn Transport>, cache: ThumbnailCache) -> Self {
        Self {
            transport,
            cache: Mutex::new(cache),
        }
    }

    /// Thumbnail of `imodel_id`, or `None` if it could not be fetched.
    #[instrument(skip(self, token))]
    pub async fn load(&self, imodel_id: &str, token: &AccessToken) -> Option<Thumbnail> {
        if let Some(hit) = self.with_cache(|cache| cache.get(imodel_id)) {
            debug!("thumbnail cache hit");
            return Some(hit);
        }

        let request = ApiRequest::new(
            format!("imodels/{}/thumbnail", encode(imodel_id)),
            token.clone(),
        )
        .with_accept(ACCEPT_PNG)
        .with_query("size", "small");

        let bytes = match self.transport.get_bytes(request).await {
            Ok(bytes) if !bytes.is_empty() => bytes,
            Ok(_) => {
                debug!("iModel has no thumbnail");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch thumbnail");
                return None;
            }
        };

        let thumbnail = Thumbnail::new(bytes);
        self.with_cache(|cache| cache.insert(imodel_id, thumbnail.clone()));
        Some(thumbnail)
    }

    pub fn cached(&self) -> usize {
        self.with_cache(|cache| cache.len())
    }

    fn with_cache<R>(&self, f: impl FnOnce(&mut ThumbnailCache) -> R) -> R {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cache)
    }
}

#[cfg(test)]
#[path = "thumbnails_test.rs"]
mod thumbnails_test;
