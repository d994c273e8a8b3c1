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

use std::time::Duration;

use hutch::{Cache, CacheBuilder, CacheClient, CacheEntry, CacheKey, Error, MemoryCache, Result};

const SEGMENT: &str = "tests";
const KEY: &str = "ABC";
const MISSING_KEY: &str = "ABD";
const VALUE: i64 = 123;

fn cache() -> MemoryCache<i64> {
    CacheBuilder::new("tests").build()
}

#[test_log::test(tokio::test)]
async fn test_readiness_follows_lifecycle() {
    let cache = cache();
    assert!(!cache.is_ready());

    cache.start().await.unwrap();
    assert!(cache.is_ready());

    cache.stop().await;
    assert!(!cache.is_ready());
}

#[test_log::test(tokio::test)]
async fn test_start_twice_fails() {
    let cache = cache();
    cache.start().await.unwrap();
    assert!(matches!(cache.start().await, Err(Error::AlreadyStarted)));
}

#[test_log::test(tokio::test)]
async fn test_restart_after_stop() {
    let cache = cache();
    cache.start().await.unwrap();
    cache.stop().await;

    cache.start().await.unwrap();
    cache.set(SEGMENT, KEY, VALUE).await.unwrap();
    assert_eq!(cache.get(SEGMENT, KEY).await.unwrap(), VALUE);
}

#[test_log::test(tokio::test)]
async fn test_operations_before_start_fail() {
    let cache = cache();
    assert!(matches!(cache.set(SEGMENT, KEY, VALUE).await, Err(Error::NotStarted)));
    assert!(matches!(cache.get(SEGMENT, KEY).await, Err(Error::NotStarted)));
    assert!(matches!(cache.delete(SEGMENT, KEY).await, Err(Error::NotStarted)));
}

#[test_log::test(tokio::test)]
async fn test_set_get_delete_round_trip() {
    let cache = cache();
    cache.start().await.unwrap();

    cache.set(SEGMENT, KEY, VALUE).await.unwrap();
    assert_eq!(cache.get(SEGMENT, KEY).await.unwrap(), VALUE);

    cache.delete(SEGMENT, KEY).await.unwrap();
    assert!(matches!(cache.get(SEGMENT, KEY).await, Err(Error::NotFound(_))));
}

#[test_log::test(tokio::test)]
async fn test_get_missing_key_fails_not_found() {
    let cache = cache();
    cache.start().await.unwrap();

    cache.set(SEGMENT, KEY, VALUE).await.unwrap();
    match cache.get(SEGMENT, MISSING_KEY).await {
        Err(Error::NotFound(key)) => {
            assert_eq!(key.segment(), SEGMENT);
            assert_eq!(key.id(), MISSING_KEY);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_ttl_expires_entries() {
    let cache: MemoryCache<i64> = CacheBuilder::new("tests")
        .with_ttl(Duration::from_millis(10))
        .build();
    cache.start().await.unwrap();

    cache.set(SEGMENT, KEY, VALUE).await.unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(matches!(cache.get(SEGMENT, KEY).await, Err(Error::NotFound(_))));
}

#[test_log::test(tokio::test)]
async fn test_concurrent_start_loses_exactly_one() {
    let cache = cache();
    let (a, b) = tokio::join!(cache.start(), cache.start());
    assert!(a.is_ok() != b.is_ok(), "exactly one start must win: {a:?} {b:?}");
    let loser = if a.is_err() { a } else { b };
    assert!(matches!(loser, Err(Error::AlreadyStarted)));
    assert!(cache.is_ready());
}

#[test_log::test(tokio::test)]
async fn test_clones_share_lifecycle() {
    let cache = cache();
    let other = cache.clone();

    cache.start().await.unwrap();
    other.set(SEGMENT, KEY, VALUE).await.unwrap();
    assert_eq!(cache.get(SEGMENT, KEY).await.unwrap(), VALUE);

    other.stop().await;
    assert!(!cache.is_ready());
}

/// Mock client standing in for a misbehaving remote store.
#[derive(Debug)]
struct MockClient {
    ready: bool,
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    fail_open: bool,
    ready: bool,
}

fn broken_pipe() -> Error {
    Error::store(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "connection lost"))
}

impl CacheClient<i64> for MockClient {
    type Config = MockConfig;

    async fn open(config: Self::Config) -> Result<Self> {
        if config.fail_open {
            return Err(broken_pipe());
        }
        Ok(Self { ready: config.ready })
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn close(&self) {}

    async fn set(&self, _: &CacheKey, _: CacheEntry<i64>) -> Result<()> {
        Err(broken_pipe())
    }

    async fn get(&self, _: &CacheKey) -> Result<Option<CacheEntry<i64>>> {
        Err(broken_pipe())
    }

    async fn remove(&self, _: &CacheKey) -> Result<()> {
        Err(broken_pipe())
    }
}

fn mock_cache(config: MockConfig) -> Cache<i64, MockClient> {
    CacheBuilder::new("tests").with_client_config(config).build()
}

#[test_log::test(tokio::test)]
async fn test_open_failure_propagates_and_leaves_cache_restartable() {
    let cache = mock_cache(MockConfig {
        fail_open: true,
        ready: false,
    });

    assert!(matches!(cache.start().await, Err(Error::Store(_))));
    assert!(!cache.is_ready());

    // Not `AlreadyStarted`: the failed attempt released the slot.
    assert!(matches!(cache.start().await, Err(Error::Store(_))));
}

#[test_log::test(tokio::test)]
async fn test_client_that_never_becomes_ready() {
    let cache = mock_cache(MockConfig {
        fail_open: false,
        ready: false,
    });

    cache.start().await.unwrap();
    assert!(!cache.is_ready());
    assert!(matches!(cache.set(SEGMENT, KEY, VALUE).await, Err(Error::NotReady)));
    assert!(matches!(cache.get(SEGMENT, KEY).await, Err(Error::NotReady)));
    assert!(matches!(cache.delete(SEGMENT, KEY).await, Err(Error::NotReady)));
}

#[test_log::test(tokio::test)]
async fn test_store_errors_propagate_verbatim() {
    let cache = mock_cache(MockConfig {
        fail_open: false,
        ready: true,
    });
    cache.start().await.unwrap();

    for result in [
        cache.set(SEGMENT, KEY, VALUE).await,
        cache.get(SEGMENT, KEY).await.map(|_| ()),
        cache.delete(SEGMENT, KEY).await,
    ] {
        match result {
            Err(Error::Store(e)) => assert!(e.to_string().contains("connection lost")),
            other => panic!("expected Store error, got {other:?}"),
        }
    }
}
