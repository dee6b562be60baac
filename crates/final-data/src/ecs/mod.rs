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

//! Implements the engine's entity-component-system.
//!
//! The model is map based:
//!
//! - An [`Entity`] owns at most one component per concrete type.
//! - An [`EntitySystem`] declares which entities it cares about through an
//!   [`Aspect`] (or a custom predicate) and processes them once per frame.
//! - The [`World`] owns both and keeps every system's list of tracked entities
//!   consistent with its predicate after each structural change.
//!
//! Membership is re-evaluated with a linear scan over the registered systems
//! every time an entity is added, removed, or gains or loses a component.

mod aspect;
mod component;
mod components;
mod entity;
mod error;
mod event;
mod system;
mod world;

pub use aspect::Aspect;
pub use component::{Component, ComponentKey};
pub use components::*;
pub use entity::Entity;
pub use error::EcsError;
pub use event::WorldEvent;
pub use system::{
    AsAny, ComponentsMut, Entities, EntitySystem, Membership, SystemPhase, TrackedSystem,
};
pub use world::{EntityMut, World};

pub use final_core::ecs::EntityId;
