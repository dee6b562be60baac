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
use std::{fmt, ops::Deref, sync::Arc};

/// A shared handle to a loaded resource.
///
/// Cloning a handle is cheap and never duplicates the resource. Every handle
/// returned by the manager for the same path points at the same instance, which
/// is what [`ResourceHandle::ptr_eq`] checks.
pub struct ResourceHandle<R: Resource>(Arc<R>);

impl<R: Resource> ResourceHandle<R> {
    /// Wraps a freshly loaded resource.
    pub fn new(resource: R) -> Self {
        Self(Arc::new(resource))
    }

    /// Returns `true` if both handles point to the same resource instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Number of live handles (including the one held by the cache, if any).
    pub fn handle_count(this: &Self) -> usize {
        Arc::strong_count(&this.0)
    }
}

impl<R: Resource> Clone for ResourceHandle<R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<R: Resource> Deref for ResourceHandle<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<R: Resource + fmt::Debug> fmt::Debug for ResourceHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceHandle").field(&*self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Blob(u32);
    impl Resource for Blob {}

    #[test]
    fn clones_share_the_instance() {
        let a = ResourceHandle::new(Blob(7));
        let b = a.clone();
        assert!(ResourceHandle::ptr_eq(&a, &b));
        assert_eq!(ResourceHandle::handle_count(&a), 2);
        assert_eq!(*b, Blob(7));
    }

    #[test]
    fn equal_values_are_not_the_same_instance() {
        let a = ResourceHandle::new(Blob(1));
        let b = ResourceHandle::new(Blob(1));
        assert!(!ResourceHandle::ptr_eq(&a, &b));
    }
}
