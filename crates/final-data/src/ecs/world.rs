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

use std::{any::TypeId, collections::HashMap, ops::Deref};

use super::{
    Component, ComponentKey, EcsError, Entity, EntitySystem, SystemPhase, TrackedSystem,
    WorldEvent,
};
use final_core::{ecs::EntityId, event::EventBus};

/// The central container of the ECS: owns every entity and every system.
///
/// The world guarantees that after any call returns, each system tracks
/// exactly the live entities its predicate accepts. It does so eagerly: every
/// entity insertion or removal, every component addition or removal and every
/// system registration re-runs the membership check of the affected entities
/// against the affected systems.
///
/// ```
/// use final_data::ecs::{Aspect, Component, Entities, Entity, EntitySystem, World};
///
/// struct Velocity;
/// impl Component for Velocity {}
///
/// struct Movement;
/// impl EntitySystem for Movement {
///     fn aspect(&self) -> Aspect {
///         Aspect::new().all::<Velocity>()
///     }
///     fn process(&mut self, _entities: &mut Entities<'_>) {}
/// }
///
/// let mut world = World::new();
/// world.add_system(Movement).unwrap();
/// let id = world.add_entity(Entity::new()).unwrap();
/// assert_eq!(world.tracked_entities::<Movement>().unwrap().len(), 0);
///
/// world.add_component(id, Velocity).unwrap();
/// assert_eq!(world.tracked_entities::<Movement>().unwrap(), &[id]);
/// ```
#[derive(Default)]
pub struct World {
    entities: HashMap<EntityId, Entity>,
    /// Entity ids in insertion order.
    order: Vec<EntityId>,
    /// Systems in registration order.
    systems: Vec<TrackedSystem>,
    events: Option<EventBus<WorldEvent>>,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an event bus on which every structural change is published.
    pub fn with_event_bus(mut self, bus: EventBus<WorldEvent>) -> Self {
        self.events = Some(bus);
        self
    }

    /// The attached event bus, if any.
    pub fn event_bus(&self) -> Option<&EventBus<WorldEvent>> {
        self.events.as_ref()
    }

    // --- Entities ---

    /// Takes ownership of an entity and lets every system evaluate it.
    ///
    /// # Errors
    /// [`EcsError::EntityAlreadyExists`] if an entity with the same id is
    /// already owned by this world.
    pub fn add_entity(&mut self, entity: Entity) -> Result<EntityId, EcsError> {
        let id = entity.id();
        if self.entities.contains_key(&id) {
            return Err(EcsError::EntityAlreadyExists(id));
        }

        for system in &mut self.systems {
            system.add_or_remove_by_aspect(&entity, false);
        }

        log::debug!("Entity {id} added with {} component(s).", entity.len());
        self.entities.insert(id, entity);
        self.order.push(id);
        self.publish(WorldEvent::EntityAdded(id));
        Ok(id)
    }

    /// Removes an entity from every system and gives it back to the caller.
    ///
    /// # Errors
    /// [`EcsError::EntityNotFound`] if the world does not own the entity.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<Entity, EcsError> {
        let entity = self
            .entities
            .remove(&id)
            .ok_or(EcsError::EntityNotFound(id))?;
        self.order.retain(|other| *other != id);

        for system in &mut self.systems {
            system.add_or_remove_by_aspect(&entity, true);
        }

        log::debug!("Entity {id} removed.");
        self.publish(WorldEvent::EntityRemoved(id));
        Ok(entity)
    }

    /// Returns `true` if the world owns the entity.
    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Read access to an owned entity.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// A mutation guard for an owned entity.
    ///
    /// Adding or removing a component through the guard immediately updates
    /// every system's membership for that entity.
    ///
    /// # Errors
    /// [`EcsError::EntityNotFound`] if the world does not own the entity.
    pub fn entity_mut(&mut self, id: EntityId) -> Result<EntityMut<'_>, EcsError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(EcsError::EntityNotFound(id))?;
        Ok(EntityMut {
            entity,
            systems: &mut self.systems,
            events: self.events.as_ref(),
        })
    }

    /// Attaches a component to an owned entity. Shorthand for
    /// [`World::entity_mut`] followed by [`EntityMut::add_component`].
    pub fn add_component<T: Component>(
        &mut self,
        id: EntityId,
        component: T,
    ) -> Result<(), EcsError> {
        self.entity_mut(id)?.add_component(component)
    }

    /// Detaches a component from an owned entity and returns it.
    pub fn remove_component<T: Component>(&mut self, id: EntityId) -> Result<T, EcsError> {
        self.entity_mut(id)?.remove_component::<T>()
    }

    /// A component of an owned entity.
    pub fn get<T: Component>(&self, id: EntityId) -> Option<&T> {
        self.entities.get(&id)?.get::<T>()
    }

    /// A component of an owned entity, mutably. Value changes never affect
    /// system membership.
    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        self.entities.get_mut(&id)?.get_mut::<T>()
    }

    /// Ids of the owned entities, in insertion order.
    pub fn entity_ids(&self) -> &[EntityId] {
        &self.order
    }

    /// The owned entities, in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.order.iter().filter_map(move |id| self.entities.get(id))
    }

    /// Number of owned entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Removes every entity. Systems stay registered with empty lists.
    pub fn clear(&mut self) {
        for system in &mut self.systems {
            system.clear();
        }
        for id in self.order.drain(..) {
            self.entities.remove(&id);
            if let Some(bus) = &self.events {
                bus.publish(WorldEvent::EntityRemoved(id));
            }
        }
        log::debug!("World cleared.");
    }

    // --- Systems ---

    /// Registers a system and lets it evaluate every owned entity.
    ///
    /// # Errors
    /// [`EcsError::SystemAlreadyRegistered`] if a system of type `S` exists.
    pub fn add_system<S: EntitySystem>(&mut self, system: S) -> Result<(), EcsError> {
        if self.position_of::<S>().is_some() {
            return Err(EcsError::SystemAlreadyRegistered(std::any::type_name::<S>()));
        }

        let mut tracked = TrackedSystem::new(system);
        for entity in self.order.iter().filter_map(|id| self.entities.get(id)) {
            tracked.add_or_remove_by_aspect(entity, false);
        }

        let name = tracked.name();
        log::debug!(
            "System {name} registered, tracking {} entities.",
            tracked.tracked().len()
        );
        self.systems.push(tracked);
        self.publish(WorldEvent::SystemAdded(name));
        Ok(())
    }

    /// Unregisters the system of type `S` and returns it.
    ///
    /// # Errors
    /// [`EcsError::SystemNotFound`] if no system of type `S` is registered.
    pub fn remove_system<S: EntitySystem>(&mut self) -> Result<Box<S>, EcsError> {
        let not_found = || EcsError::SystemNotFound(std::any::type_name::<S>());
        let index = self.position_of::<S>().ok_or_else(not_found)?;

        let mut tracked = self.systems.remove(index);
        tracked.clear();
        let name = tracked.name();
        log::debug!("System {name} removed.");
        self.publish(WorldEvent::SystemRemoved(name));
        tracked.into_system::<S>().ok_or_else(not_found)
    }

    /// Returns `true` if a system of type `S` is registered.
    pub fn contains_system<S: EntitySystem>(&self) -> bool {
        self.position_of::<S>().is_some()
    }

    /// The registered system of type `S`.
    pub fn system<S: EntitySystem>(&self) -> Option<&S> {
        let index = self.position_of::<S>()?;
        self.systems[index].downcast_ref::<S>()
    }

    /// The registered system of type `S`, mutably.
    pub fn system_mut<S: EntitySystem>(&mut self) -> Option<&mut S> {
        let index = self.position_of::<S>()?;
        self.systems[index].downcast_mut::<S>()
    }

    /// Ids of the entities tracked by the system of type `S`.
    pub fn tracked_entities<S: EntitySystem>(&self) -> Option<&[EntityId]> {
        let index = self.position_of::<S>()?;
        Some(self.systems[index].tracked())
    }

    /// The registered systems, in registration order.
    pub fn systems(&self) -> impl Iterator<Item = &TrackedSystem> + '_ {
        self.systems.iter()
    }

    /// Number of registered systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Runs the system of type `S` once.
    ///
    /// # Errors
    /// [`EcsError::SystemNotFound`] if no system of type `S` is registered.
    pub fn process<S: EntitySystem>(&mut self) -> Result<(), EcsError> {
        let index = self
            .position_of::<S>()
            .ok_or(EcsError::SystemNotFound(std::any::type_name::<S>()))?;
        self.systems[index].run(&mut self.entities);
        Ok(())
    }

    /// Runs every system of the given phase once, in registration order.
    pub fn process_all(&mut self, phase: SystemPhase) {
        for system in self.systems.iter_mut().filter(|s| s.phase() == phase) {
            system.run(&mut self.entities);
        }
    }

    fn position_of<S: EntitySystem>(&self) -> Option<usize> {
        let type_id = TypeId::of::<S>();
        self.systems.iter().position(|s| s.system_type() == type_id)
    }

    fn publish(&self, event: WorldEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

/// Mutation guard over an entity owned by a [`World`].
///
/// Every successful structural change is followed, before the call returns, by
/// a membership re-evaluation of the entity against every registered system.
pub struct EntityMut<'w> {
    entity: &'w mut Entity,
    systems: &'w mut [TrackedSystem],
    events: Option<&'w EventBus<WorldEvent>>,
}

impl<'w> EntityMut<'w> {
    /// Attaches a component and notifies the systems.
    ///
    /// # Errors
    /// [`EcsError::ComponentAlreadyPresent`] if a `T` is already attached.
    pub fn add_component<T: Component>(&mut self, component: T) -> Result<(), EcsError> {
        self.entity.add_component(component)?;
        self.components_changed(ComponentKey::of::<T>());
        Ok(())
    }

    /// Detaches a component, notifies the systems and returns the component.
    ///
    /// # Errors
    /// [`EcsError::ComponentNotFound`] if no `T` is attached.
    pub fn remove_component<T: Component>(&mut self) -> Result<T, EcsError> {
        let component = self.entity.remove_component::<T>()?;
        self.components_changed(ComponentKey::of::<T>());
        Ok(component)
    }

    /// The attached `T` mutably, if any.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.entity.get_mut::<T>()
    }

    fn components_changed(&mut self, component: ComponentKey) {
        for system in self.systems.iter_mut() {
            system.add_or_remove_by_aspect(&*self.entity, false);
        }
        if let Some(bus) = self.events {
            bus.publish(WorldEvent::ComponentsChanged {
                entity: self.entity.id(),
                component,
            });
        }
    }
}

impl Deref for EntityMut<'_> {
    type Target = Entity;

    fn deref(&self) -> &Self::Target {
        &*self.entity
    }
}
