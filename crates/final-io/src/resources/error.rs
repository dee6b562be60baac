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

use std::{error::Error, path::PathBuf};
use thiserror::Error;

/// Errors raised by the [`ResourceManager`](super::ResourceManager).
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The path was empty or blank.
    #[error("resource path must not be empty")]
    InvalidPath,
    /// A loader for this resource type is already registered.
    #[error("a loader for `{0}` is already registered")]
    LoaderAlreadyRegistered(&'static str),
    /// No loader is registered for this resource type.
    #[error("no loader registered for `{0}`")]
    LoaderNotRegistered(&'static str),
    /// The loader failed; nothing was cached.
    #[error("failed to load '{path}': {source}")]
    LoadFailed {
        /// The resolved path that was being loaded.
        path: PathBuf,
        /// The loader's error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The path is already cached as a resource of another type.
    #[error("'{path}' is cached as `{cached}`, not `{requested}`")]
    TypeMismatch {
        /// The resolved path.
        path: PathBuf,
        /// The type the path is cached as.
        cached: &'static str,
        /// The type that was requested.
        requested: &'static str,
    },
    /// The handle does not belong to any entry of this manager.
    #[error("this `{0}` is not loaded by the resource manager")]
    NotLoaded(&'static str),
}
