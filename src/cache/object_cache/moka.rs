use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::CacheConfig;

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// 每一项按写入时给定的 TTL 过期
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MokaCacheWrapper {
    pub fn new(config: &CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.memory.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, default ttl: {}s",
            config.memory.max_capacity, config.default_ttl
        );
        Self {
            inner,
            default_ttl: Duration::from_secs(config.default_ttl),
        }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(entry) => CacheResult::Found(entry.value),
            None => {
                debug!("Key not found in cache: {}", key);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl)
        };
        self.inner.insert(key, Entry { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{get_json, insert_json};
    use crate::config::MemoryConfig;

    fn make_cache() -> MokaCacheWrapper {
        MokaCacheWrapper::new(&CacheConfig {
            default_ttl: 60,
            memory: MemoryConfig { max_capacity: 100 },
        })
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = make_cache();
        cache.insert_raw("user:a".into(), "alice".into(), 0).await;
        assert_eq!(
            cache.get_raw("user:a").await,
            CacheResult::Found("alice".to_string())
        );

        cache.remove("user:a").await;
        assert_eq!(cache.get_raw("user:a").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let cache = make_cache();
        insert_json(&cache, "n".into(), &vec![1, 2, 3], 30).await;
        assert_eq!(get_json::<Vec<i32>>(&cache, "n").await, Some(vec![1, 2, 3]));

        // 类型不匹配的项会被清除
        assert_eq!(get_json::<String>(&cache, "n").await, None);
        assert_eq!(cache.get_raw("n").await, CacheResult::NotFound);
    }
}
