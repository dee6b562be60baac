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

use final_core::ecs::EntityId;
use thiserror::Error;

/// Errors raised by invalid operations on entities, systems and worlds.
///
/// These are programmer errors: the call was wrong and retrying it unchanged
/// will fail again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    /// The world already owns an entity with this id.
    #[error("entity {0} already exists in the world")]
    EntityAlreadyExists(EntityId),
    /// No entity with this id is owned by the world.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),
    /// The entity already has a component of this type.
    #[error("entity {entity} already has a component of type `{component}`")]
    ComponentAlreadyPresent {
        /// The entity that was being mutated.
        entity: EntityId,
        /// The component type name.
        component: &'static str,
    },
    /// The entity has no component of this type.
    #[error("entity {entity} has no component of type `{component}`")]
    ComponentNotFound {
        /// The entity that was being mutated.
        entity: EntityId,
        /// The component type name.
        component: &'static str,
    },
    /// A system of this type is already registered.
    #[error("a system of type `{0}` is already registered")]
    SystemAlreadyRegistered(&'static str),
    /// No system of this type is registered.
    #[error("system `{0}` not found")]
    SystemNotFound(&'static str),
}
