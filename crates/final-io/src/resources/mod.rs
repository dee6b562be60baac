// Copyright 2025 eraflo
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

//! Reference-counted resource caching.
//!
//! The [`ResourceManager`] maps each resource type to exactly one loader and
//! each file path to a loaded instance plus a reference count. Loading a path
//! twice returns the same instance; unloading it as many times as it was
//! loaded releases and evicts it.

mod error;
mod manager;
mod registry;

pub use error::ResourceError;
pub use manager::ResourceManager;
