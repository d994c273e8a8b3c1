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

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Envelope persisted by cache clients: the cached item plus store-managed
/// metadata (stored-at stamp and TTL, both in epoch/interval milliseconds).
///
/// The facade unwraps `item` on lookup and discards the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<V> {
    item: V,
    stored: u64,
    ttl: u64,
}

impl<V> CacheEntry<V> {
    /// Wrap an item, stamping it with the current time and the given TTL.
    pub fn new(item: V, ttl: Duration) -> Self {
        Self {
            item,
            stored: unix_millis(),
            ttl: ttl.as_millis() as u64,
        }
    }

    /// The cached item.
    pub fn item(&self) -> &V {
        &self.item
    }

    /// Unwrap the cached item.
    pub fn into_item(self) -> V {
        self.item
    }

    /// Epoch milliseconds at which the item was stored.
    pub fn stored(&self) -> u64 {
        self.stored
    }

    /// Time-to-live applied at store time.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl)
    }

    /// Whether the entry has outlived its TTL.
    pub fn is_expired(&self) -> bool {
        unix_millis() >= self.stored.saturating_add(self.ttl)
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
