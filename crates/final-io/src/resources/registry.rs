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

//! Type-indexed storage of resource loaders.

use final_core::resource::{Resource, ResourceLoader};
use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
};

use super::ResourceError;

/// Holds at most one loader per resource type.
///
/// Each loader is stored as a `Box<dyn ResourceLoader<R>>`, erased behind
/// `dyn Any` and recovered with the type that registered it.
#[derive(Default)]
pub(crate) struct LoaderRegistry {
    loaders: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl LoaderRegistry {
    pub(crate) fn register<R: Resource>(
        &mut self,
        loader: impl ResourceLoader<R> + 'static,
    ) -> Result<(), ResourceError> {
        let type_id = TypeId::of::<R>();
        if self.loaders.contains_key(&type_id) {
            return Err(ResourceError::LoaderAlreadyRegistered(type_name::<R>()));
        }
        let boxed: Box<dyn ResourceLoader<R>> = Box::new(loader);
        self.loaders.insert(type_id, Box::new(boxed));
        Ok(())
    }

    pub(crate) fn get<R: Resource>(&self) -> Option<&dyn ResourceLoader<R>> {
        self.loaders
            .get(&TypeId::of::<R>())
            .and_then(|any| any.downcast_ref::<Box<dyn ResourceLoader<R>>>())
            .map(|boxed| &**boxed)
    }

    pub(crate) fn contains<R: Resource>(&self) -> bool {
        self.loaders.contains_key(&TypeId::of::<R>())
    }

    pub(crate) fn len(&self) -> usize {
        self.loaders.len()
    }
}
