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

use std::{fmt::Debug, future::Future};

use crate::{code::CacheValue, entry::CacheEntry, error::Result, key::CacheKey};

/// The client seam between the facade and an underlying cache store.
///
/// Implementations own the connection, eviction, and persistence story; the
/// facade only checks [`CacheClient::is_ready`] before delegating, and
/// propagates client errors verbatim.
pub trait CacheClient<V>: Send + Sync + 'static + Sized
where
    V: CacheValue,
{
    /// Connection configuration for the client.
    type Config: Send + Sync + Clone + Debug + Default;

    /// Construct the client and establish its connection.
    #[must_use]
    fn open(config: Self::Config) -> impl Future<Output = Result<Self>> + Send;

    /// Whether the connection is established and usable.
    fn is_ready(&self) -> bool;

    /// Tear the connection down. Errors on teardown are the client's to log.
    fn close(&self) -> impl Future<Output = ()> + Send;

    /// Store an entry under the key, honoring the entry's TTL.
    fn set(&self, key: &CacheKey, entry: CacheEntry<V>) -> impl Future<Output = Result<()>> + Send;

    /// Look the key up. A miss is `Ok(None)`; the facade decides how misses
    /// surface to callers.
    #[must_use]
    fn get(&self, key: &CacheKey) -> impl Future<Output = Result<Option<CacheEntry<V>>>> + Send;

    /// Remove the key. Removing an absent key is not an error.
    fn remove(&self, key: &CacheKey) -> impl Future<Output = Result<()>> + Send;
}
