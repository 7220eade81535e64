use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    ttl: u64, // TTL in seconds
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        debug!(
            "RedisObjectCache created with prefix: '{}', TTL: {}s",
            redis_config.key_prefix, config.cache.default_ttl
        );

        let client = redis::Client::open(redis_config.url.clone())
            .expect("Failed to create Redis client. Check Redis URL in config.");

        // 测试 Redis 连接 - 使用同步连接进行简单测试
        match client.get_connection() {
            Ok(mut conn) => match redis::cmd("PING").query::<String>(&mut conn) {
                Ok(response) => {
                    debug!("Redis connection test successful: {}", response);
                }
                Err(e) => {
                    error!(
                        "Failed to ping Redis server: {}. Check Redis server status and URL: {}",
                        e, redis_config.url
                    );
                    return Err(format!("Redis ping failed: {e}"));
                }
            },
            Err(e) => {
                error!(
                    "Failed to ping Redis server: {}. Check Redis server status and URL: {}",
                    e, redis_config.url
                );
                return Err(format!("Redis ping failed: {e}"));
            }
        }

        Ok(Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
            ttl: config.cache.default_ttl,
        })
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        let client = &self.client;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult {
        let mut conn = match self.get_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Failed to get Redis connection: {}", e);
                return CacheResult::Error(e.to_string());
            }
        };

        match conn.get::<_, Option<String>>(self.make_key(key)).await {
            Ok(Some(value)) => {
                debug!("Successfully retrieved key: {}", key);
                CacheResult::Found(value)
            }
            Ok(None) => {
                debug!("Key not found in Redis: {}", key);
                CacheResult::NotFound
            }
            Err(e) => {
                warn!("Redis GET failed for key {}: {}", key, e);
                CacheResult::Error(e.to_string())
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let mut conn = match self.get_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Failed to get Redis connection: {}", e);
                return;
            }
        };

        let ttl = if ttl == 0 { self.ttl } else { ttl };
        let key = self.make_key(&key);
        if let Err(e) = conn.set_ex::<_, _, ()>(&key, value, ttl).await {
            warn!("Redis SETEX failed for key {}: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let mut conn = match self.get_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Failed to get Redis connection: {}", e);
                return;
            }
        };

        let key = self.make_key(key);
        if let Err(e) = conn.del::<_, ()>(&key).await {
            warn!("Redis DEL failed for key {}: {}", key, e);
        }
    }

    async fn invalidate_all(&self) {
        let mut conn = match self.get_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Failed to get Redis connection: {}", e);
                return;
            }
        };

        // 只清理带前缀的键，避免影响同库的其他应用
        let pattern = format!("{}*", self.key_prefix);
        let keys: Vec<String> = match conn.keys(&pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Redis KEYS failed for pattern {}: {}", pattern, e);
                return;
            }
        };

        if keys.is_empty() {
            return;
        }

        if let Err(e) = conn.del::<_, ()>(keys).await {
            warn!("Redis DEL failed while invalidating cache: {}", e);
        }
    }
}
