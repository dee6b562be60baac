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

use super::Resource;
use std::{error::Error, path::Path};

/// A trait for types that can load a specific kind of resource from a file.
///
/// Each loader is specialized for a single resource type `R`, and the manager
/// accepts at most one loader per type. Loaders are plain decoders: they do not
/// cache anything and are called at most once per cached path.
pub trait ResourceLoader<R: Resource>: Send + Sync {
    /// Reads the file at `path` and converts it into an instance of `R`.
    ///
    /// # Returns
    /// The loaded resource, or a boxed, thread-safe error describing why the
    /// file could not be read or decoded.
    fn load(&self, path: &Path) -> Result<R, Box<dyn Error + Send + Sync>>;
}

impl<R, F> ResourceLoader<R> for F
where
    R: Resource,
    F: Fn(&Path) -> Result<R, Box<dyn Error + Send + Sync>> + Send + Sync,
{
    fn load(&self, path: &Path) -> Result<R, Box<dyn Error + Send + Sync>> {
        self(path)
    }
}
