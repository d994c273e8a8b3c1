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

use std::{borrow::Cow, fmt::Debug, marker::PhantomData, sync::Arc, time::Duration};

use parking_lot::Mutex;

use crate::{
    client::CacheClient,
    code::CacheValue,
    entry::CacheEntry,
    error::{Error, Result},
    key::CacheKey,
};

/// Default TTL applied to writes: `i32::MAX` milliseconds, effectively
/// forever.
pub const DEFAULT_TTL: Duration = Duration::from_millis(i32::MAX as u64);

/// Builder for [`Cache`]. Caller-supplied values override the defaults.
pub struct CacheBuilder<V, C>
where
    V: CacheValue,
    C: CacheClient<V>,
{
    name: Cow<'static, str>,
    ttl: Duration,
    config: C::Config,
    _marker: PhantomData<fn() -> V>,
}

impl<V, C> Debug for CacheBuilder<V, C>
where
    V: CacheValue,
    C: CacheClient<V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .field("config", &self.config)
            .finish()
    }
}

impl<V, C> CacheBuilder<V, C>
where
    V: CacheValue,
    C: CacheClient<V>,
{
    /// Create a builder with the default TTL and client configuration. The
    /// name tags every event the cache emits.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ttl: DEFAULT_TTL,
            config: C::Config::default(),
            _marker: PhantomData,
        }
    }

    /// Set the TTL applied to every write.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the client connection configuration.
    pub fn with_client_config(mut self, config: C::Config) -> Self {
        self.config = config;
        self
    }

    /// Build the cache. No connection is made until [`Cache::start`].
    pub fn build(self) -> Cache<V, C> {
        Cache {
            inner: Arc::new(CacheInner {
                name: self.name,
                ttl: self.ttl,
                config: self.config,
                state: Mutex::new(State::Uninitialized),
            }),
        }
    }
}

enum State<C> {
    Uninitialized,
    Starting,
    Ready(Arc<C>),
    Stopped,
}

struct CacheInner<V, C>
where
    V: CacheValue,
    C: CacheClient<V>,
{
    name: Cow<'static, str>,
    ttl: Duration,
    config: C::Config,
    state: Mutex<State<C>>,
}

/// Segmented key-value cache facade over a single [`CacheClient`] handle.
///
/// The facade validates connection state before every operation, namespaces
/// keys by segment, and applies the configured TTL on writes. It adds no
/// retry, backoff, or timeout layer; client errors propagate verbatim.
///
/// Cloning is shallow. All clones share the client handle and lifecycle
/// state.
pub struct Cache<V, C>
where
    V: CacheValue,
    C: CacheClient<V>,
{
    inner: Arc<CacheInner<V, C>>,
}

impl<V, C> Clone for Cache<V, C>
where
    V: CacheValue,
    C: CacheClient<V>,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V, C> Debug for Cache<V, C>
where
    V: CacheValue,
    C: CacheClient<V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.inner.name)
            .field("ttl", &self.inner.ttl)
            .finish()
    }
}

impl<V, C> Cache<V, C>
where
    V: CacheValue,
    C: CacheClient<V>,
{
    /// The name given at build time.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The TTL applied to every write.
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Open the underlying client with the configured options.
    ///
    /// Fails with [`Error::AlreadyStarted`] if a ready client already exists
    /// or another `start` is in flight. The `Starting` state is claimed
    /// atomically, so concurrent callers cannot double-initialize; the loser
    /// observes the claim and fails. Any connection error from the client
    /// propagates verbatim and leaves the cache restartable.
    pub async fn start(&self) -> Result<()> {
        {
            let mut state = self.inner.state.lock();
            match &*state {
                State::Starting => return Err(Error::AlreadyStarted),
                State::Ready(client) if client.is_ready() => return Err(Error::AlreadyStarted),
                _ => {}
            }
            *state = State::Starting;
        }

        tracing::info!(name = %self.inner.name, "starting cache client");

        match C::open(self.inner.config.clone()).await {
            Ok(client) => {
                *self.inner.state.lock() = State::Ready(Arc::new(client));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(name = %self.inner.name, error = %e, "cache client failed to start");
                *self.inner.state.lock() = State::Stopped;
                Err(e)
            }
        }
    }

    /// Tear the client down and clear the handle. No-op if never started.
    /// The cache can be started again afterwards.
    pub async fn stop(&self) {
        let client = {
            let mut state = self.inner.state.lock();
            match std::mem::replace(&mut *state, State::Stopped) {
                State::Ready(client) => Some(client),
                other => {
                    *state = other;
                    None
                }
            }
        };

        if let Some(client) = client {
            tracing::info!(name = %self.inner.name, "stopping cache client");
            client.close().await;
        }
    }

    /// Store `value` under `segment`/`id` with the configured TTL.
    pub async fn set(&self, segment: impl Into<String>, id: impl Into<String>, value: V) -> Result<()> {
        let client = self.client()?;
        let key = CacheKey::new(segment, id);
        tracing::debug!(name = %self.inner.name, %key, value = ?value, "set");
        client.set(&key, CacheEntry::new(value, self.inner.ttl)).await
    }

    /// Look `segment`/`id` up and unwrap the stored item.
    ///
    /// A miss fails with [`Error::NotFound`] rather than resolving empty.
    pub async fn get(&self, segment: impl Into<String>, id: impl Into<String>) -> Result<V> {
        let client = self.client()?;
        let key = CacheKey::new(segment, id);
        tracing::debug!(name = %self.inner.name, %key, "get");
        match client.get(&key).await? {
            Some(entry) => Ok(entry.into_item()),
            None => Err(Error::NotFound(key)),
        }
    }

    /// Remove `segment`/`id` from the store.
    pub async fn delete(&self, segment: impl Into<String>, id: impl Into<String>) -> Result<()> {
        let client = self.client()?;
        let key = CacheKey::new(segment, id);
        tracing::debug!(name = %self.inner.name, %key, "delete");
        client.remove(&key).await
    }

    /// Whether a client exists and reports ready. Never fails.
    pub fn is_ready(&self) -> bool {
        match &*self.inner.state.lock() {
            State::Ready(client) => client.is_ready(),
            _ => false,
        }
    }

    /// Connection-state precondition, evaluated at the top of every
    /// read/write operation.
    fn client(&self) -> Result<Arc<C>> {
        match &*self.inner.state.lock() {
            State::Ready(client) if client.is_ready() => Ok(client.clone()),
            State::Ready(_) => Err(Error::NotReady),
            _ => Err(Error::NotStarted),
        }
    }
}
