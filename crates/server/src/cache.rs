//! In-memory single-flight preview cache.
//!
//! Concurrent requests for the same (source, box, page) share one render;
//! later identical requests reuse the finished preview. Keys carry the
//! source mtime, so entries for a rewritten source become unreachable and
//! age out by eviction. Failed renders are never cached.

use crate::metrics;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::{Mutex, OnceCell};
use vignette_core::{Preview, TargetBox};
use vignette_render::RenderError;

/// Cache key: resolved source identity plus the render parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub target: TargetBox,
    pub page: u32,
}

struct CacheInner {
    entries: HashMap<CacheKey, Arc<OnceCell<Preview>>>,
    order: VecDeque<CacheKey>,
}

/// Bounded single-flight preview cache.
pub struct PreviewCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

impl PreviewCache {
    /// Create a cache holding at most `capacity` previews.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    /// Return the cached preview for `key`, or run `render` to produce it.
    ///
    /// Concurrent callers with the same key await a single render. A
    /// failed render propagates its error to every waiter and leaves no
    /// cache entry behind, so a later request retries.
    pub async fn get_or_render<F, Fut>(
        &self,
        key: CacheKey,
        render: F,
    ) -> Result<Preview, RenderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Preview, RenderError>>,
    {
        let cell = {
            let mut inner = self.inner.lock().await;
            if let Some(cell) = inner.entries.get(&key) {
                metrics::CACHE_HITS.inc();
                cell.clone()
            } else {
                while inner.entries.len() >= self.capacity {
                    match inner.order.pop_front() {
                        Some(oldest) => {
                            inner.entries.remove(&oldest);
                        }
                        None => break,
                    }
                }
                let cell = Arc::new(OnceCell::new());
                inner.entries.insert(key.clone(), cell.clone());
                inner.order.push_back(key.clone());
                cell
            }
        };

        let result = cell.get_or_try_init(render).await.cloned();

        if result.is_err() {
            let mut inner = self.inner.lock().await;
            if let Some(existing) = inner.entries.get(&key)
                && Arc::ptr_eq(existing, &cell)
                && existing.get().is_none()
            {
                inner.entries.remove(&key);
                inner.order.retain(|k| k != &key);
            }
        }

        result
    }

    /// Number of cached entries, including in-flight renders.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vignette_core::{MediaType, SizePolicy};

    fn key(name: &str, page: u32) -> CacheKey {
        CacheKey {
            path: PathBuf::from(name),
            modified: None,
            target: SizePolicy::new(256, 256).resolve(None, None),
            page,
        }
    }

    fn preview() -> Preview {
        Preview::new(vec![1, 2, 3], MediaType::Png)
    }

    #[tokio::test]
    async fn identical_keys_render_once() {
        let cache = PreviewCache::new(8);
        let renders = AtomicUsize::new(0);

        for _ in 0..3 {
            let result = cache
                .get_or_render(key("a.png", 1), || async {
                    renders.fetch_add(1, Ordering::SeqCst);
                    Ok(preview())
                })
                .await;
            assert!(result.is_ok());
        }

        assert_eq!(renders.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_render() {
        let cache = Arc::new(PreviewCache::new(8));
        let renders = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let renders = renders.clone();
                tokio::spawn(async move {
                    cache
                        .get_or_render(key("a.png", 1), || async move {
                            renders.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                            Ok(preview())
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap().is_ok());
        }
        assert_eq!(renders.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = PreviewCache::new(8);

        let first = cache
            .get_or_render(key("a.png", 1), || async {
                Err(RenderError::Decode("corrupt".to_string()))
            })
            .await;
        assert!(first.is_err());
        assert!(cache.is_empty().await);

        let second = cache
            .get_or_render(key("a.png", 1), || async { Ok(preview()) })
            .await;
        assert!(second.is_ok());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn eviction_is_fifo_at_capacity() {
        let cache = PreviewCache::new(2);

        for name in ["a.png", "b.png", "c.png"] {
            cache
                .get_or_render(key(name, 1), || async { Ok(preview()) })
                .await
                .unwrap();
        }
        assert_eq!(cache.len().await, 2);

        // The oldest entry was evicted; rendering it again re-runs.
        let renders = AtomicUsize::new(0);
        cache
            .get_or_render(key("a.png", 1), || async {
                renders.fetch_add(1, Ordering::SeqCst);
                Ok(preview())
            })
            .await
            .unwrap();
        assert_eq!(renders.load(Ordering::SeqCst), 1);
    }
}
