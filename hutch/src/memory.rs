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

use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    client::CacheClient,
    code::CacheValue,
    entry::CacheEntry,
    error::Result,
    key::CacheKey,
};

/// Configuration for [`MemoryClient`]. The in-process store has no
/// connection parameters; the struct exists so memory-backed caches deploy
/// through the same config layer as remote ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryClientConfig {}

/// In-process cache client backed by a map.
///
/// Honors entry TTLs by dropping expired entries lazily on lookup. No
/// eviction: the map grows until entries expire or are removed.
#[derive(Debug)]
pub struct MemoryClient<V> {
    entries: RwLock<HashMap<CacheKey, CacheEntry<V>>>,
    ready: AtomicBool,
}

impl<V> CacheClient<V> for MemoryClient<V>
where
    V: CacheValue,
{
    type Config = MemoryClientConfig;

    async fn open(_: Self::Config) -> Result<Self> {
        Ok(Self {
            entries: RwLock::new(HashMap::new()),
            ready: AtomicBool::new(true),
        })
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    async fn close(&self) {
        self.ready.store(false, Ordering::Release);
        self.entries.write().clear();
    }

    async fn set(&self, key: &CacheKey, entry: CacheEntry<V>) -> Result<()> {
        self.entries.write().insert(key.clone(), entry);
        Ok(())
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry<V>>> {
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.clone())),
            None => Ok(None),
        }
    }

    async fn remove(&self, key: &CacheKey) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}
