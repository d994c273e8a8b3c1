// Copyright 2025 hutch Project Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Redis-backed cache client for `hutch`.
//!
//! Entries live under `partition:segment:id` as JSON envelopes, with the TTL
//! handed to the server in milliseconds so expiry happens store-side. The
//! connection is a managed async connection that reconnects internally;
//! pooling, retry, and timeouts are whatever the `redis` crate provides.
//!
//! # Example
//!
//! ```no_run
//! use hutch::CacheBuilder;
//! use hutch_redis::{RedisCache, RedisClientConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> hutch::Result<()> {
//! let cache: RedisCache<String> = CacheBuilder::new("sessions")
//!     .with_client_config(RedisClientConfig {
//!         host: "cache.internal".to_string(),
//!         ..Default::default()
//!     })
//!     .build();
//!
//! cache.start().await?;
//! cache.set("users", "42", "alice".to_string()).await?;
//! # Ok(())
//! # }
//! ```

use std::{
    fmt::Debug,
    sync::atomic::{AtomicBool, Ordering},
};

use hutch::{Cache, CacheClient, CacheEntry, CacheKey, CacheValue, Error, Result};
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{Deserialize, Serialize};

/// A cache facade backed by [`RedisClient`].
pub type RedisCache<V> = Cache<V, RedisClient>;

/// Connection parameters for [`RedisClient`]. Caller-supplied fields
/// override the defaults (`#[serde(default)]` merges partial configs).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisClientConfig {
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Server password. Empty means no authentication.
    pub password: String,
    /// Logical database index.
    pub database: i64,
    /// Key prefix isolating this cache's entries from other users of the
    /// same server.
    pub partition: String,
}

impl Default for RedisClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: String::new(),
            database: 0,
            partition: "hutch".to_string(),
        }
    }
}

impl RedisClientConfig {
    fn url(&self) -> String {
        if self.password.is_empty() {
            format!("redis://{}:{}/{}", self.host, self.port, self.database)
        } else {
            format!("redis://:{}@{}:{}/{}", self.password, self.host, self.port, self.database)
        }
    }
}

/// Cache client over a managed async Redis connection.
pub struct RedisClient {
    conn: ConnectionManager,
    partition: String,
    ready: AtomicBool,
}

impl Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient")
            .field("partition", &self.partition)
            .field("ready", &self.ready)
            .finish()
    }
}

fn entry_key(partition: &str, key: &CacheKey) -> String {
    format!("{}:{}:{}", partition, key.segment(), key.id())
}

impl<V> CacheClient<V> for RedisClient
where
    V: CacheValue,
{
    type Config = RedisClientConfig;

    async fn open(config: Self::Config) -> Result<Self> {
        tracing::info!(
            host = %config.host,
            port = config.port,
            partition = %config.partition,
            "connecting to redis"
        );
        let client = redis::Client::open(config.url().as_str()).map_err(Error::store)?;
        let conn = ConnectionManager::new(client).await.map_err(Error::store)?;
        Ok(Self {
            conn,
            partition: config.partition,
            ready: AtomicBool::new(true),
        })
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    async fn close(&self) {
        // The managed connection tears down on drop; only the readiness
        // flag needs flipping here.
        self.ready.store(false, Ordering::Release);
    }

    async fn set(&self, key: &CacheKey, entry: CacheEntry<V>) -> Result<()> {
        let ttl_ms = entry.ttl().as_millis() as u64;
        let payload = serde_json::to_string(&entry).map_err(Error::store)?;
        let mut conn = self.conn.clone();
        let _: () = conn
            .pset_ex(entry_key(&self.partition, key), payload, ttl_ms)
            .await
            .map_err(Error::store)?;
        Ok(())
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry<V>>> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = conn.get(entry_key(&self.partition, key)).await.map_err(Error::store)?;
        match payload {
            Some(payload) => Ok(Some(serde_json::from_str(&payload).map_err(Error::store)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, key: &CacheKey) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(entry_key(&self.partition, key)).await.map_err(Error::store)?;
        Ok(())
    }
}
