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

use super::{Component, ComponentKey, Entity};

/// Describes which entities a system is interested in.
///
/// An entity matches when it has every component listed with [`Aspect::all`],
/// none of those listed with [`Aspect::exclude`], and, if any were listed with
/// [`Aspect::one_of`], at least one of those. An empty aspect matches every
/// entity.
///
/// ```
/// use final_data::ecs::{Aspect, Component, Entity};
///
/// struct Position;
/// impl Component for Position {}
/// struct Frozen;
/// impl Component for Frozen {}
///
/// let movable = Aspect::new().all::<Position>().exclude::<Frozen>();
/// assert!(movable.matches(&Entity::new().with(Position)));
/// assert!(!movable.matches(&Entity::new().with(Position).with(Frozen)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aspect {
    all: Vec<ComponentKey>,
    exclude: Vec<ComponentKey>,
    one_of: Vec<ComponentKey>,
}

impl Aspect {
    /// An aspect that matches every entity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a `T` component.
    pub fn all<T: Component>(mut self) -> Self {
        push_unique(&mut self.all, ComponentKey::of::<T>());
        self
    }

    /// Rejects entities with a `T` component.
    pub fn exclude<T: Component>(mut self) -> Self {
        push_unique(&mut self.exclude, ComponentKey::of::<T>());
        self
    }

    /// Adds `T` to the set of which at least one component is required.
    pub fn one_of<T: Component>(mut self) -> Self {
        push_unique(&mut self.one_of, ComponentKey::of::<T>());
        self
    }

    /// Returns `true` if the entity satisfies the aspect.
    pub fn matches(&self, entity: &Entity) -> bool {
        self.all.iter().all(|k| entity.contains_key(*k))
            && !self.exclude.iter().any(|k| entity.contains_key(*k))
            && (self.one_of.is_empty() || self.one_of.iter().any(|k| entity.contains_key(*k)))
    }

    /// Returns `true` if the aspect places no constraint at all.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty() && self.exclude.is_empty() && self.one_of.is_empty()
    }
}

fn push_unique(keys: &mut Vec<ComponentKey>, key: ComponentKey) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    impl Component for A {}
    struct B;
    impl Component for B {}
    struct C;
    impl Component for C {}

    #[test]
    fn empty_aspect_matches_everything() {
        let aspect = Aspect::new();
        assert!(aspect.is_empty());
        assert!(aspect.matches(&Entity::new()));
        assert!(aspect.matches(&Entity::new().with(A).with(B)));
    }

    #[test]
    fn all_requires_every_component() {
        let aspect = Aspect::new().all::<A>().all::<B>();
        assert!(!aspect.matches(&Entity::new().with(A)));
        assert!(aspect.matches(&Entity::new().with(A).with(B)));
        assert!(aspect.matches(&Entity::new().with(A).with(B).with(C)));
    }

    #[test]
    fn exclude_rejects() {
        let aspect = Aspect::new().all::<A>().exclude::<C>();
        assert!(aspect.matches(&Entity::new().with(A)));
        assert!(!aspect.matches(&Entity::new().with(A).with(C)));
    }

    #[test]
    fn one_of_needs_at_least_one() {
        let aspect = Aspect::new().one_of::<B>().one_of::<C>();
        assert!(!aspect.matches(&Entity::new().with(A)));
        assert!(aspect.matches(&Entity::new().with(B)));
        assert!(aspect.matches(&Entity::new().with(C)));
    }

    #[test]
    fn repeated_keys_are_stored_once() {
        assert_eq!(Aspect::new().all::<A>().all::<A>(), Aspect::new().all::<A>());
    }
}
