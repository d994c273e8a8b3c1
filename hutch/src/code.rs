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

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Bounds for values storable in the cache.
///
/// Serde bounds let remote clients put the value on the wire; `Clone` lets
/// local clients hand out lookups without giving up the stored copy.
pub trait CacheValue: Send + Sync + 'static + Clone + Debug + Serialize + DeserializeOwned {}

impl<V> CacheValue for V where V: Send + Sync + 'static + Clone + Debug + Serialize + DeserializeOwned {}
