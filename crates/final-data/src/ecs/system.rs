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

//! Entity systems and the bookkeeping that keeps their entity lists current.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

use super::{Aspect, Component, Entity};
use final_core::ecs::EntityId;

/// The game loop phase a system runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SystemPhase {
    /// Simulation: input, physics, gameplay.
    #[default]
    Update,
    /// Presentation: anything that reads the final state of the frame.
    Render,
}

/// Type-erasure helpers implemented for every `'static` type.
///
/// This is what lets the world hand a registered system back as its concrete
/// type. It never needs to be implemented by hand.
pub trait AsAny: Any {
    /// Upcasts to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Upcasts to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Upcasts a boxed value to `Box<dyn Any>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A unit of per-frame logic that processes every entity matching a predicate.
///
/// At most one instance of a given system type can be registered in a world.
///
/// # Examples
///
/// ```
/// use final_data::ecs::{Aspect, Component, Entities, EntitySystem};
///
/// struct Velocity(f32);
/// impl Component for Velocity {}
///
/// #[derive(Default)]
/// struct MovementSystem {
///     processed: usize,
/// }
///
/// impl EntitySystem for MovementSystem {
///     fn aspect(&self) -> Aspect {
///         Aspect::new().all::<Velocity>()
///     }
///
///     fn process(&mut self, entities: &mut Entities<'_>) {
///         self.processed += entities.len();
///     }
/// }
/// ```
pub trait EntitySystem: AsAny {
    /// The component constraints of this system. Defaults to every entity.
    fn aspect(&self) -> Aspect {
        Aspect::new()
    }

    /// Decides whether the system should track `entity`.
    ///
    /// Override this instead of [`EntitySystem::aspect`] when membership cannot
    /// be expressed with component presence alone.
    fn is_match(&self, entity: &Entity) -> bool {
        self.aspect().matches(entity)
    }

    /// Called once per frame with the currently tracked entities.
    fn process(&mut self, entities: &mut Entities<'_>);

    /// The loop phase this system belongs to.
    fn phase(&self) -> SystemPhase {
        SystemPhase::Update
    }

    /// A readable name for logs and errors.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// The outcome of a membership re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// The entity started being tracked.
    Added,
    /// The entity stopped being tracked.
    Removed,
    /// Nothing changed.
    Unchanged,
}

/// A registered system together with the ordered list of entities it tracks.
pub struct TrackedSystem {
    system: Box<dyn EntitySystem>,
    type_id: TypeId,
    /// Tracked entities, in the order they started matching.
    tracked: Vec<EntityId>,
}

impl TrackedSystem {
    /// Wraps a system with an empty tracking list.
    pub fn new<S: EntitySystem>(system: S) -> Self {
        Self {
            system: Box::new(system),
            type_id: TypeId::of::<S>(),
            tracked: Vec::new(),
        }
    }

    /// The concrete type of the wrapped system.
    pub fn system_type(&self) -> TypeId {
        self.type_id
    }

    /// The wrapped system's name.
    pub fn name(&self) -> &'static str {
        self.system.name()
    }

    /// The wrapped system's phase.
    pub fn phase(&self) -> SystemPhase {
        self.system.phase()
    }

    /// The wrapped system as a trait object.
    pub fn system(&self) -> &dyn EntitySystem {
        &*self.system
    }

    /// The wrapped system as its concrete type.
    pub fn downcast_ref<S: EntitySystem>(&self) -> Option<&S> {
        (*self.system).as_any().downcast_ref::<S>()
    }

    /// The wrapped system as its concrete type, mutably.
    pub fn downcast_mut<S: EntitySystem>(&mut self) -> Option<&mut S> {
        (*self.system).as_any_mut().downcast_mut::<S>()
    }

    /// Ids of the tracked entities, in tracking order.
    pub fn tracked(&self) -> &[EntityId] {
        &self.tracked
    }

    /// Returns `true` if the entity is currently tracked.
    pub fn is_tracking(&self, id: EntityId) -> bool {
        self.tracked.contains(&id)
    }

    /// Re-evaluates whether `entity` belongs to this system.
    ///
    /// With `force_remove` the entity is dropped from the list if present and
    /// never added, which is what the world uses when the entity leaves it.
    /// Otherwise the entity is appended when it starts matching and removed
    /// when it stops.
    pub fn add_or_remove_by_aspect(&mut self, entity: &Entity, force_remove: bool) -> Membership {
        let id = entity.id();
        let position = self.tracked.iter().position(|tracked| *tracked == id);

        let membership = match position {
            Some(index) if force_remove || !self.system.is_match(entity) => {
                self.tracked.remove(index);
                Membership::Removed
            }
            None if !force_remove && self.system.is_match(entity) => {
                self.tracked.push(id);
                Membership::Added
            }
            _ => Membership::Unchanged,
        };

        if membership != Membership::Unchanged {
            log::trace!("{}: entity {id} {membership:?}.", self.name());
        }
        membership
    }

    /// Forgets every tracked entity.
    pub fn clear(&mut self) {
        self.tracked.clear();
    }

    /// Runs the system over its tracked entities.
    pub(crate) fn run(&mut self, store: &mut HashMap<EntityId, Entity>) {
        let mut entities = Entities {
            ids: &self.tracked,
            store,
        };
        self.system.process(&mut entities);
    }

    /// Consumes the wrapper and returns the system as its concrete type.
    pub(crate) fn into_system<S: EntitySystem>(self) -> Option<Box<S>> {
        self.system.into_any().downcast::<S>().ok()
    }
}

/// The view of its entities a system receives in [`EntitySystem::process`].
///
/// Iteration follows tracking order. Component values can be changed in place,
/// but components cannot be added or removed from here.
pub struct Entities<'a> {
    ids: &'a [EntityId],
    store: &'a mut HashMap<EntityId, Entity>,
}

impl<'a> Entities<'a> {
    /// Number of tracked entities.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the system tracks no entity.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids of the tracked entities.
    pub fn ids(&self) -> &[EntityId] {
        self.ids
    }

    /// The tracked entities, in tracking order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.ids.iter().filter_map(move |id| self.store.get(id))
    }

    /// Mutable access to the components of every tracked entity, in tracking order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = ComponentsMut<'_>> {
        let rank: HashMap<EntityId, usize> = self
            .ids
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index))
            .collect();

        let mut tracked: Vec<(usize, &mut Entity)> = self
            .store
            .iter_mut()
            .filter_map(|(id, entity)| rank.get(id).map(|index| (*index, entity)))
            .collect();
        tracked.sort_unstable_by_key(|(index, _)| *index);

        tracked
            .into_iter()
            .map(|(_, entity)| ComponentsMut { entity })
    }

    /// Any entity of the world, tracked by this system or not.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.store.get(&id)
    }

    /// A component of any entity of the world, mutably, tracked by this
    /// system or not. Value changes never affect system membership.
    pub fn get_component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        self.store.get_mut(&id)?.get_mut::<T>()
    }
}

/// Value-only mutable access to one entity's components.
pub struct ComponentsMut<'a> {
    entity: &'a mut Entity,
}

impl<'a> ComponentsMut<'a> {
    /// The entity's id.
    pub fn id(&self) -> EntityId {
        self.entity.id()
    }

    /// Returns `true` if a `T` is attached.
    pub fn contains<T: Component>(&self) -> bool {
        self.entity.contains::<T>()
    }

    /// The attached `T`, if any.
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.entity.get::<T>()
    }

    /// The attached `T` mutably, if any.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.entity.get_mut::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Velocity;
    impl Component for Velocity {}
    struct Sleeping;
    impl Component for Sleeping {}

    struct Movement;
    impl EntitySystem for Movement {
        fn aspect(&self) -> Aspect {
            Aspect::new().all::<Velocity>().exclude::<Sleeping>()
        }

        fn process(&mut self, _entities: &mut Entities<'_>) {}
    }

    #[test]
    fn tracks_iff_the_predicate_holds() {
        let mut tracked = TrackedSystem::new(Movement);
        let mut entity = Entity::new();

        assert_eq!(tracked.add_or_remove_by_aspect(&entity, false), Membership::Unchanged);
        assert!(!tracked.is_tracking(entity.id()));

        entity.add_component(Velocity).unwrap();
        assert_eq!(tracked.add_or_remove_by_aspect(&entity, false), Membership::Added);
        assert!(tracked.is_tracking(entity.id()));

        assert_eq!(tracked.add_or_remove_by_aspect(&entity, false), Membership::Unchanged);
        assert_eq!(tracked.tracked().len(), 1, "An entity is tracked once");

        entity.add_component(Sleeping).unwrap();
        assert_eq!(tracked.add_or_remove_by_aspect(&entity, false), Membership::Removed);
        assert!(!tracked.is_tracking(entity.id()));
    }

    #[test]
    fn forced_removal_drops_matching_entities() {
        let mut tracked = TrackedSystem::new(Movement);
        let entity = Entity::new().with(Velocity);

        tracked.add_or_remove_by_aspect(&entity, false);
        assert_eq!(tracked.add_or_remove_by_aspect(&entity, true), Membership::Removed);
        assert!(tracked.tracked().is_empty());
    }

    #[test]
    fn forced_removal_never_adds() {
        let mut tracked = TrackedSystem::new(Movement);
        let entity = Entity::new().with(Velocity);

        assert_eq!(tracked.add_or_remove_by_aspect(&entity, true), Membership::Unchanged);
        assert!(tracked.tracked().is_empty());
    }

    #[test]
    fn tracking_order_is_insertion_order() {
        let mut tracked = TrackedSystem::new(Movement);
        let first = Entity::new().with(Velocity);
        let second = Entity::new().with(Velocity);

        tracked.add_or_remove_by_aspect(&second, false);
        tracked.add_or_remove_by_aspect(&first, false);
        assert_eq!(tracked.tracked(), &[second.id(), first.id()]);
    }

    #[test]
    fn downcasts_to_the_concrete_system() {
        let tracked = TrackedSystem::new(Movement);
        assert!(tracked.downcast_ref::<Movement>().is_some());
        assert_eq!(tracked.system_type(), TypeId::of::<Movement>());
        assert_eq!(tracked.phase(), SystemPhase::Update);
        assert!(tracked.name().ends_with("Movement"));
        assert!(tracked.into_system::<Movement>().is_some());
    }
}
