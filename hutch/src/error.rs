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

use crate::key::CacheKey;

/// Cache error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The cache has no client. `start` must succeed before any operation.
    #[error("cache has not been started")]
    NotStarted,
    /// A client exists but its connection is not established.
    #[error("cache client is not ready")]
    NotReady,
    /// `start` was called while a ready client already exists.
    #[error("cache has already been started")]
    AlreadyStarted,
    /// `get` found no entry under the key. Lookup misses are failures, not
    /// empty successes.
    #[error("no entry for key {0}")]
    NotFound(CacheKey),
    /// Any failure surfaced by the underlying client, passed through verbatim.
    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl Error {
    /// Wrap an underlying client failure.
    pub fn store(e: impl Into<anyhow::Error>) -> Self {
        Self::Store(e.into())
    }
}

/// Cache result.
pub type Result<T> = std::result::Result<T, Error>;
