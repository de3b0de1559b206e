use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::invoice::{InvoiceError, ViewCache};

/// Redis-backed view cache shared by every server instance.
#[derive(Clone)]
pub struct RedisViewCache {
  redis: ConnectionManager,
  key_prefix: String,
  ttl_seconds: u64,
}

impl RedisViewCache {
  pub fn new(redis: ConnectionManager, key_prefix: String, ttl_seconds: u64) -> Self {
    Self {
      redis,
      key_prefix,
      ttl_seconds,
    }
  }

  fn view_key(&self, path: &str, generation: u64) -> String {
    view_key(&self.key_prefix, path, generation)
  }

  fn generation_key(&self, path: &str) -> String {
    generation_key(&self.key_prefix, path)
  }
}

/// Views live under a generation-suffixed key, so a write tagged with an old
/// generation lands on a key no reader looks at anymore.
fn view_key(prefix: &str, path: &str, generation: u64) -> String {
  format!("{}{}#{}", prefix, path, generation)
}

fn generation_key(prefix: &str, path: &str) -> String {
  format!("{}{}:generation", prefix, path)
}

#[async_trait]
impl ViewCache for RedisViewCache {
  async fn get(&self, path: &str) -> Result<Option<String>, InvoiceError> {
    let generation = self.generation(path).await?;
    let mut conn = self.redis.clone();
    conn
      .get(self.view_key(path, generation))
      .await
      .map_err(|e| InvoiceError::Cache(format!("Redis GET failed for {}: {}", path, e)))
  }

  async fn generation(&self, path: &str) -> Result<u64, InvoiceError> {
    let mut conn = self.redis.clone();
    let generation: Option<u64> = conn
      .get(self.generation_key(path))
      .await
      .map_err(|e| {
        InvoiceError::Cache(format!("Redis GET generation failed for {}: {}", path, e))
      })?;
    Ok(generation.unwrap_or(0))
  }

  async fn put(&self, path: &str, html: String, generation: u64) -> Result<bool, InvoiceError> {
    if self.generation(path).await? != generation {
      tracing::debug!(path, generation, "Skipping cache write for invalidated view");
      return Ok(false);
    }

    let mut conn = self.redis.clone();
    conn
      .set_ex::<_, _, ()>(self.view_key(path, generation), html, self.ttl_seconds)
      .await
      .map_err(|e| InvoiceError::Cache(format!("Redis SET failed for {}: {}", path, e)))?;

    tracing::debug!(path, generation, ttl_seconds = self.ttl_seconds, "Cached view");
    Ok(true)
  }

  async fn invalidate(&self, path: &str) -> Result<(), InvoiceError> {
    let mut conn = self.redis.clone();
    let generation: u64 = conn
      .incr(self.generation_key(path), 1)
      .await
      .map_err(|e| InvoiceError::Cache(format!("Redis INCR failed for {}: {}", path, e)))?;

    // The previous view is unreachable now; drop it instead of waiting for its TTL.
    conn
      .del::<_, ()>(self.view_key(path, generation.saturating_sub(1)))
      .await
      .map_err(|e| InvoiceError::Cache(format!("Redis DEL failed for {}: {}", path, e)))
  }
}
