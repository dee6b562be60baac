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

use super::ComponentKey;
use final_core::ecs::EntityId;

/// A structural change reported by a [`World`](super::World) that has an
/// event bus attached.
///
/// Events are published synchronously, after every system has been brought
/// up to date with the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldEvent {
    /// An entity was added to the world.
    EntityAdded(EntityId),
    /// An entity was removed from the world.
    EntityRemoved(EntityId),
    /// A component was added to or removed from an entity owned by the world.
    ComponentsChanged {
        /// The mutated entity.
        entity: EntityId,
        /// The component type that was added or removed.
        component: ComponentKey,
    },
    /// A system was registered. Carries the system name.
    SystemAdded(&'static str),
    /// A system was removed. Carries the system name.
    SystemRemoved(&'static str),
}
