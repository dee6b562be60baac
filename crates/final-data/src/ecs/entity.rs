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

use std::{any::Any, collections::HashMap, fmt};

use super::{Component, ComponentKey, EcsError};
use final_core::ecs::EntityId;

/// A uniquely identified bag of components.
///
/// An entity holds at most one component per concrete type. It can be built and
/// mutated freely on its own; once handed to a [`World`](super::World), all
/// structural changes go through the world so that systems are notified.
pub struct Entity {
    id: EntityId,
    components: HashMap<ComponentKey, Box<dyn Any + Send + Sync>>,
    /// Component keys in the order they were added.
    order: Vec<ComponentKey>,
}

impl Entity {
    /// Creates an empty entity with a fresh id.
    pub fn new() -> Self {
        Self::with_id(EntityId::new())
    }

    /// Creates an empty entity with the given id.
    pub fn with_id(id: EntityId) -> Self {
        Self {
            id,
            components: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Builder-style variant of [`Entity::add_component`].
    ///
    /// A component of a type already present replaces nothing: the new value is
    /// dropped and a warning is logged. Use [`Entity::try_with`] to get the
    /// error instead.
    pub fn with<T: Component>(mut self, component: T) -> Self {
        if let Err(e) = self.add_component(component) {
            log::warn!("Entity::with ignored a component: {e}");
        }
        self
    }

    /// Fallible builder-style variant of [`Entity::add_component`].
    ///
    /// # Errors
    /// [`EcsError::ComponentAlreadyPresent`] if a `T` is already attached.
    pub fn try_with<T: Component>(mut self, component: T) -> Result<Self, EcsError> {
        self.add_component(component)?;
        Ok(self)
    }

    /// The entity's unique id.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Attaches a component.
    ///
    /// # Errors
    /// [`EcsError::ComponentAlreadyPresent`] if a `T` is already attached.
    pub fn add_component<T: Component>(&mut self, component: T) -> Result<(), EcsError> {
        let key = ComponentKey::of::<T>();
        if self.components.contains_key(&key) {
            return Err(EcsError::ComponentAlreadyPresent {
                entity: self.id,
                component: key.name(),
            });
        }
        self.components.insert(key, Box::new(component));
        self.order.push(key);
        Ok(())
    }

    /// Detaches the component of type `T` and hands it back.
    ///
    /// # Errors
    /// [`EcsError::ComponentNotFound`] if no `T` is attached.
    pub fn remove_component<T: Component>(&mut self) -> Result<T, EcsError> {
        let key = ComponentKey::of::<T>();
        let not_found = || EcsError::ComponentNotFound {
            entity: self.id,
            component: key.name(),
        };
        let boxed = self.components.remove(&key).ok_or_else(not_found)?;
        self.order.retain(|k| *k != key);
        boxed.downcast::<T>().map(|c| *c).map_err(|_| not_found())
    }

    /// Returns `true` if a `T` is attached.
    pub fn contains<T: Component>(&self) -> bool {
        self.contains_key(ComponentKey::of::<T>())
    }

    /// Returns `true` if a component with this key is attached.
    pub fn contains_key(&self, key: ComponentKey) -> bool {
        self.components.contains_key(&key)
    }

    /// Returns the attached `T`, if any.
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components
            .get(&ComponentKey::of::<T>())
            .and_then(|c| c.downcast_ref::<T>())
    }

    /// Returns the attached `T` mutably, if any.
    ///
    /// Changing a component's value is not a structural change and does not
    /// affect which systems track the entity.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&ComponentKey::of::<T>())
            .and_then(|c| c.downcast_mut::<T>())
    }

    /// Keys of the attached components, in the order they were added.
    pub fn component_keys(&self) -> impl Iterator<Item = ComponentKey> + '_ {
        self.order.iter().copied()
    }

    /// Number of attached components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if no component is attached.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("components", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(u32);
    impl Component for Health {}

    #[derive(Debug, PartialEq)]
    struct Armor(u32);
    impl Component for Armor {}

    #[test]
    fn add_then_get() {
        let mut entity = Entity::new();
        entity.add_component(Health(10)).unwrap();

        assert!(entity.contains::<Health>());
        assert!(!entity.contains::<Armor>());
        assert_eq!(entity.get::<Health>(), Some(&Health(10)));
        assert_eq!(entity.len(), 1);
    }

    #[test]
    fn duplicate_component_type_is_rejected() {
        let mut entity = Entity::new();
        entity.add_component(Health(10)).unwrap();

        let err = entity.add_component(Health(20)).unwrap_err();
        assert!(matches!(err, EcsError::ComponentAlreadyPresent { entity: id, .. } if id == entity.id()));
        assert_eq!(entity.get::<Health>(), Some(&Health(10)), "Original value must survive");
    }

    #[test]
    fn try_with_reports_duplicates() {
        let entity = Entity::new().try_with(Health(1)).unwrap().try_with(Armor(2)).unwrap();
        assert_eq!(entity.len(), 2);

        let err = Entity::new()
            .try_with(Health(1))
            .and_then(|e| e.try_with(Health(2)))
            .unwrap_err();
        assert!(matches!(err, EcsError::ComponentAlreadyPresent { .. }));
    }

    #[test]
    fn with_keeps_the_first_duplicate() {
        let entity = Entity::new().with(Health(1)).with(Health(2));
        assert_eq!(entity.len(), 1);
        assert_eq!(entity.get::<Health>(), Some(&Health(1)));
    }

    #[test]
    fn remove_returns_the_value() {
        let mut entity = Entity::new().with(Health(3)).with(Armor(1));

        assert_eq!(entity.remove_component::<Health>(), Ok(Health(3)));
        assert!(!entity.contains::<Health>());
        assert_eq!(entity.len(), 1);
    }

    #[test]
    fn removing_a_missing_component_fails() {
        let mut entity = Entity::new();
        let err = entity.remove_component::<Armor>().unwrap_err();
        assert!(matches!(err, EcsError::ComponentNotFound { .. }));
    }

    #[test]
    fn get_mut_changes_the_value_in_place() {
        let mut entity = Entity::new().with(Health(5));
        entity.get_mut::<Health>().unwrap().0 += 1;
        assert_eq!(entity.get::<Health>(), Some(&Health(6)));
    }

    #[test]
    fn component_keys_follow_insertion_order() {
        let mut entity = Entity::new().with(Armor(0)).with(Health(0));
        let keys: Vec<_> = entity.component_keys().collect();
        assert_eq!(
            keys,
            vec![ComponentKey::of::<Armor>(), ComponentKey::of::<Health>()]
        );

        entity.remove_component::<Armor>().unwrap();
        entity.add_component(Armor(2)).unwrap();
        let keys: Vec<_> = entity.component_keys().collect();
        assert_eq!(
            keys,
            vec![ComponentKey::of::<Health>(), ComponentKey::of::<Armor>()]
        );
    }

    #[test]
    fn with_id_keeps_the_id() {
        let id = EntityId::new();
        let entity = Entity::with_id(id);
        assert_eq!(entity.id(), id);
        assert!(entity.is_empty());
    }
}
