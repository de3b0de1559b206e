use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::invoice::{InvoiceError, ViewCache};

struct CachedView {
  html: String,
  generation: u64,
  expires_at: Instant,
}

/// Process-local view cache used when no redis is configured.
#[derive(Clone)]
pub struct InMemoryViewCache {
  views: Arc<DashMap<String, CachedView>>,
  generations: Arc<DashMap<String, u64>>,
  ttl: Duration,
}

impl InMemoryViewCache {
  pub fn new(ttl: Duration) -> Self {
    Self {
      views: Arc::new(DashMap::new()),
      generations: Arc::new(DashMap::new()),
      ttl,
    }
  }

  pub fn len(&self) -> usize {
    self.views.len()
  }

  pub fn is_empty(&self) -> bool {
    self.views.is_empty()
  }

  fn current_generation(&self, path: &str) -> u64 {
    self.generations.get(path).map(|g| *g).unwrap_or(0)
  }
}

#[async_trait]
impl ViewCache for InMemoryViewCache {
  async fn get(&self, path: &str) -> Result<Option<String>, InvoiceError> {
    let generation = self.current_generation(path);
    let stale = match self.views.get(path) {
      Some(view) if view.generation == generation && view.expires_at > Instant::now() => {
        return Ok(Some(view.html.clone()));
      }
      Some(_) => true,
      None => false,
    };

    if stale {
      self.views.remove(path);
    }
    Ok(None)
  }

  async fn generation(&self, path: &str) -> Result<u64, InvoiceError> {
    Ok(self.current_generation(path))
  }

  async fn put(&self, path: &str, html: String, generation: u64) -> Result<bool, InvoiceError> {
    if self.current_generation(path) != generation {
      tracing::debug!(path, generation, "Skipping cache write for invalidated view");
      return Ok(false);
    }

    // A stale entry slipping in after this check never matches the bumped generation on read.
    self.views.insert(
      path.to_string(),
      CachedView {
        html,
        generation,
        expires_at: Instant::now() + self.ttl,
      },
    );
    Ok(true)
  }

  async fn invalidate(&self, path: &str) -> Result<(), InvoiceError> {
    *self.generations.entry(path.to_string()).or_insert(0) += 1;
    self.views.remove(path);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_put_get_invalidate() {
    let cache = InMemoryViewCache::new(Duration::from_secs(60));

    assert!(cache.get("/dashboard/invoices").await.unwrap().is_none());

    let generation = cache.generation("/dashboard/invoices").await.unwrap();
    assert!(
      cache
        .put("/dashboard/invoices", "<ul></ul>".to_string(), generation)
        .await
        .unwrap()
    );
    assert_eq!(
      cache.get("/dashboard/invoices").await.unwrap().as_deref(),
      Some("<ul></ul>")
    );

    cache.invalidate("/dashboard/invoices").await.unwrap();
    assert!(cache.get("/dashboard/invoices").await.unwrap().is_none());
    assert!(cache.is_empty());
  }

  #[tokio::test]
  async fn test_invalidate_leaves_other_paths() {
    let cache = InMemoryViewCache::new(Duration::from_secs(60));
    cache.put("/a", "a".to_string(), 0).await.unwrap();
    cache.put("/b", "b".to_string(), 0).await.unwrap();

    cache.invalidate("/a").await.unwrap();

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("/b").await.unwrap().as_deref(), Some("b"));
  }

  #[tokio::test]
  async fn test_expired_entries_are_misses() {
    let cache = InMemoryViewCache::new(Duration::ZERO);
    cache.put("/a", "a".to_string(), 0).await.unwrap();

    assert!(cache.get("/a").await.unwrap().is_none());
    assert!(cache.is_empty());
  }

  #[tokio::test]
  async fn test_render_started_before_invalidation_is_not_stored() {
    let cache = InMemoryViewCache::new(Duration::from_secs(60));
    let generation = cache.generation("/a").await.unwrap();

    cache.invalidate("/a").await.unwrap();

    assert!(!cache.put("/a", "old".to_string(), generation).await.unwrap());
    assert!(cache.get("/a").await.unwrap().is_none());

    let generation = cache.generation("/a").await.unwrap();
    assert_eq!(generation, 1);
    assert!(cache.put("/a", "new".to_string(), generation).await.unwrap());
    assert_eq!(cache.get("/a").await.unwrap().as_deref(), Some("new"));
  }
}
