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

use std::{
    any::{type_name, Any},
    collections::{hash_map::Entry, HashMap},
    path::{Path, PathBuf},
};

use final_core::{
    config::ResourcesConfig,
    resource::{Resource, ResourceHandle, ResourceLoader},
};
use final_telemetry::ScopedTimer;

use super::{registry::LoaderRegistry, ResourceError};

/// A cached handle with its type erased, so entries of every resource type can
/// share one map.
trait CachedResource: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
    fn release(&self);
}

impl<R: Resource> CachedResource for ResourceHandle<R> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        type_name::<R>()
    }

    fn release(&self) {
        Resource::release(&**self);
    }
}

struct CacheEntry {
    resource: Box<dyn CachedResource>,
    references: usize,
}

impl CacheEntry {
    fn handle<R: Resource>(&self) -> Option<&ResourceHandle<R>> {
        self.resource.as_any().downcast_ref::<ResourceHandle<R>>()
    }
}

/// Loads resources on demand and shares them by reference counting.
///
/// The manager is an ordinary value: create one, register the loaders the
/// application needs and pass it to whoever loads resources.
///
/// - One loader per resource type ([`ResourceManager::register_loader`]).
/// - One cache entry per resolved path. The first [`ResourceManager::load`]
///   of a path runs the loader; later ones return the same instance and bump
///   the count.
/// - [`ResourceManager::unload`] decrements the count of the entry the handle
///   belongs to. At zero the resource's [`Resource::release`] hook runs and
///   the entry is evicted.
///
/// ```
/// use final_core::resource::{Resource, ResourceHandle};
/// use final_io::ResourceManager;
/// use std::{error::Error, path::Path};
///
/// struct Script(String);
/// impl Resource for Script {}
///
/// fn load_script(path: &Path) -> Result<Script, Box<dyn Error + Send + Sync>> {
///     Ok(Script(path.display().to_string()))
/// }
///
/// let mut manager = ResourceManager::new();
/// manager.register_loader::<Script>(load_script).unwrap();
///
/// let a = manager.load::<Script>("intro.lua").unwrap();
/// let b = manager.load::<Script>("intro.lua").unwrap();
/// assert!(ResourceHandle::ptr_eq(&a, &b));
/// assert_eq!(manager.reference_count("intro.lua"), Some(2));
///
/// manager.unload(&a).unwrap();
/// manager.unload(&b).unwrap();
/// assert!(!manager.is_loaded("intro.lua"));
/// ```
#[derive(Default)]
pub struct ResourceManager {
    /// Directory relative paths are resolved against.
    root: Option<PathBuf>,
    loaders: LoaderRegistry,
    cache: HashMap<PathBuf, CacheEntry>,
}

impl ResourceManager {
    /// Creates a manager that resolves paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager that resolves relative paths against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let mut manager = Self::default();
        manager.root = Some(root.into());
        manager
    }

    /// Creates a manager from the `resources` section of the engine config.
    pub fn from_config(config: &ResourcesConfig) -> Self {
        match &config.root {
            Some(root) => Self::with_root(root.clone()),
            None => Self::new(),
        }
    }

    /// The directory relative paths are resolved against, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Registers the loader for resources of type `R`.
    ///
    /// # Errors
    /// [`ResourceError::LoaderAlreadyRegistered`] if `R` already has a loader.
    pub fn register_loader<R: Resource>(
        &mut self,
        loader: impl ResourceLoader<R> + 'static,
    ) -> Result<(), ResourceError> {
        self.loaders.register::<R>(loader)?;
        log::debug!("Registered resource loader for `{}`.", type_name::<R>());
        Ok(())
    }

    /// Returns `true` if a loader for `R` is registered.
    pub fn has_loader<R: Resource>(&self) -> bool {
        self.loaders.contains::<R>()
    }

    /// Loads the resource at `path`, or shares the cached instance.
    ///
    /// Every successful call must eventually be matched by an
    /// [`unload`](ResourceManager::unload) of the returned handle for the
    /// resource to be released.
    ///
    /// # Errors
    /// - [`ResourceError::InvalidPath`] for an empty path.
    /// - [`ResourceError::LoaderNotRegistered`] if `R` has no loader.
    /// - [`ResourceError::TypeMismatch`] if the path is cached as another type.
    /// - [`ResourceError::LoadFailed`] if the loader fails; nothing is cached.
    pub fn load<R: Resource>(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<ResourceHandle<R>, ResourceError> {
        let key = self.resolve(path.as_ref())?;
        let loader = self
            .loaders
            .get::<R>()
            .ok_or(ResourceError::LoaderNotRegistered(type_name::<R>()))?;

        let entry = match self.cache.entry(key) {
            Entry::Occupied(occupied) => {
                if occupied.get().handle::<R>().is_none() {
                    return Err(ResourceError::TypeMismatch {
                        path: occupied.key().clone(),
                        cached: occupied.get().resource.type_name(),
                        requested: type_name::<R>(),
                    });
                }
                log::trace!("Cache hit for '{}'.", occupied.key().display());
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => {
                let resource = {
                    let _timer = ScopedTimer::new(format!("Loading '{}'", vacant.key().display()));
                    loader
                        .load(vacant.key())
                        .map_err(|source| ResourceError::LoadFailed {
                            path: vacant.key().clone(),
                            source,
                        })?
                };
                log::debug!(
                    "Loaded `{}` from '{}'.",
                    type_name::<R>(),
                    vacant.key().display()
                );
                vacant.insert(CacheEntry {
                    resource: Box::new(ResourceHandle::new(resource)),
                    references: 0,
                })
            }
        };

        entry.references += 1;
        let handle = entry
            .handle::<R>()
            .cloned()
            .ok_or(ResourceError::NotLoaded(type_name::<R>()))?;
        log::trace!("`{}` now has {} reference(s).", type_name::<R>(), entry.references);
        Ok(handle)
    }

    /// Drops one reference to the entry `handle` was loaded from.
    ///
    /// The entry is found by identity, not by value. When its count reaches
    /// zero the resource is released and evicted; handles still held by the
    /// caller keep the data alive but the manager forgets it.
    ///
    /// # Errors
    /// [`ResourceError::NotLoaded`] if no entry holds this instance.
    pub fn unload<R: Resource>(&mut self, handle: &ResourceHandle<R>) -> Result<(), ResourceError> {
        let key = self
            .cache
            .iter()
            .find(|(_, entry)| {
                entry
                    .handle::<R>()
                    .is_some_and(|cached| ResourceHandle::ptr_eq(cached, handle))
            })
            .map(|(key, _)| key.clone())
            .ok_or(ResourceError::NotLoaded(type_name::<R>()))?;

        if let Entry::Occupied(mut occupied) = self.cache.entry(key) {
            let entry = occupied.get_mut();
            entry.references = entry.references.saturating_sub(1);
            if entry.references == 0 {
                let (path, entry) = occupied.remove_entry();
                entry.resource.release();
                log::debug!("Evicted `{}` ('{}').", type_name::<R>(), path.display());
            }
        }
        Ok(())
    }

    /// The reference count of the entry for `path`, if it is cached.
    pub fn reference_count(&self, path: impl AsRef<Path>) -> Option<usize> {
        let key = self.resolve(path.as_ref()).ok()?;
        self.cache.get(&key).map(|entry| entry.references)
    }

    /// Returns `true` if `path` is cached.
    pub fn is_loaded(&self, path: impl AsRef<Path>) -> bool {
        self.reference_count(path).is_some()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Number of registered loaders.
    pub fn loader_count(&self) -> usize {
        self.loaders.len()
    }

    /// Releases and evicts every cached entry regardless of its count.
    /// Loaders stay registered.
    pub fn clear(&mut self) {
        let evicted = self.cache.len();
        for (_, entry) in self.cache.drain() {
            entry.resource.release();
        }
        if evicted > 0 {
            log::debug!("Resource cache cleared ({evicted} entries).");
        }
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf, ResourceError> {
        let blank = path.as_os_str().is_empty()
            || path.to_str().is_some_and(|text| text.trim().is_empty());
        if blank {
            return Err(ResourceError::InvalidPath);
        }

        Ok(match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        })
    }
}

impl Drop for ResourceManager {
    fn drop(&mut self) {
        if !self.cache.is_empty() {
            log::warn!(
                "ResourceManager dropped with {} resource(s) still loaded.",
                self.cache.len()
            );
            self.clear();
        }
    }
}
