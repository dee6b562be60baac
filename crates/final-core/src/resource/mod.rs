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

//! Provides the foundational traits and primitive types for the resource system.
//!
//! This module is the "common language" between the code that decodes files
//! into engine-ready data and the code that caches it. It has no knowledge of
//! how resources are stored or counted; that is the job of the
//! `ResourceManager` in `final-io`.
//!
//! The key pieces are:
//! - The [`Resource`] trait: implemented by every type a loader can produce.
//! - [`ResourceHandle`]: the shared handle handed out to callers.
//! - [`ResourceLoader`]: the format-specific decoder contract.

mod handle;
mod loader;

pub use handle::*;
pub use loader::*;

/// A type that can be loaded, cached and shared by the resource manager.
///
/// The supertraits keep resources free of borrowed data, so a cached resource
/// can live as long as the manager that owns it.
///
/// # Examples
///
/// ```
/// use final_core::resource::Resource;
///
/// struct ShaderProgram {
///     // ... native handle
/// }
///
/// impl Resource for ShaderProgram {
///     fn release(&self) {
///         // delete the program on the GPU
///     }
/// }
/// ```
pub trait Resource: Send + Sync + 'static {
    /// Called exactly once when the manager evicts the resource, either
    /// because its reference count reached zero or because the manager was
    /// cleared.
    ///
    /// Resources wrapping native objects (buffers, textures, sound sources)
    /// free them here. The default does nothing.
    fn release(&self) {}
}
