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

//! `hutch` is a segmented key-value cache facade.
//!
//! The facade owns a single [`CacheClient`] handle, namespaces keys by
//! segment, validates connection state before every operation, and applies a
//! configured TTL on writes. Storage itself (eviction, persistence,
//! replication, the wire protocol) belongs to the client implementation.
//!
//! The crate ships an in-memory client; remote clients plug in through the
//! [`CacheClient`] trait (see the `hutch-redis` crate).
//!
//! # Example
//!
//! ```
//! use hutch::{CacheBuilder, Error, MemoryCache};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> hutch::Result<()> {
//! let cache: MemoryCache<i64> = CacheBuilder::new("demo").build();
//!
//! cache.start().await?;
//! cache.set("tests", "ABC", 123).await?;
//! assert_eq!(cache.get("tests", "ABC").await?, 123);
//! cache.delete("tests", "ABC").await?;
//! assert!(matches!(cache.get("tests", "ABC").await, Err(Error::NotFound(_))));
//! cache.stop().await;
//! # Ok(())
//! # }
//! ```

mod cache;
mod client;
mod code;
mod entry;
mod error;
mod key;
mod memory;

pub use cache::{Cache, CacheBuilder, DEFAULT_TTL};
pub use client::CacheClient;
pub use code::CacheValue;
pub use entry::CacheEntry;
pub use error::{Error, Result};
pub use key::CacheKey;
pub use memory::{MemoryClient, MemoryClientConfig};

/// A cache facade backed by the in-memory client.
pub type MemoryCache<V> = Cache<V, MemoryClient<V>>;
