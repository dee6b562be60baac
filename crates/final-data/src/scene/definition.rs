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

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ecs::{EcsError, Entity, EntityId, Tag, Transform, World};

/// Errors raised while capturing, encoding or instantiating a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The world rejected one of the scene's entities.
    #[error("failed to instantiate scene: {0}")]
    Ecs(#[from] EcsError),
    /// The scene could not be encoded.
    #[error("failed to encode scene: {0}")]
    Encode(#[from] ron::Error),
    /// The text is not a valid scene definition.
    #[error("invalid scene definition: {0}")]
    Decode(#[from] ron::error::SpannedError),
}

/// One persisted component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentDefinition {
    /// A [`Tag`] component.
    Tag(Tag),
    /// A [`Transform`] component.
    Transform(Transform),
}

/// One persisted entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDefinition {
    /// The entity's id, preserved across save and load.
    pub id: EntityId,
    /// The entity's persisted components.
    pub components: Vec<ComponentDefinition>,
}

/// A named, serializable snapshot of the persistable part of a world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDefinition {
    /// The scene's name.
    pub name: String,
    /// Entities in world insertion order.
    pub entities: Vec<EntityDefinition>,
}

impl SceneDefinition {
    /// Creates an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
        }
    }

    /// Records every entity of `world` that carries at least one persistable
    /// component. Other components are skipped.
    pub fn capture(name: impl Into<String>, world: &World) -> Self {
        let entities = world
            .entities()
            .filter_map(|entity| {
                let mut components = Vec::new();
                if let Some(tag) = entity.get::<Tag>() {
                    components.push(ComponentDefinition::Tag(tag.clone()));
                }
                if let Some(transform) = entity.get::<Transform>() {
                    components.push(ComponentDefinition::Transform(*transform));
                }
                (!components.is_empty()).then(|| EntityDefinition {
                    id: entity.id(),
                    components,
                })
            })
            .collect::<Vec<_>>();

        log::debug!("Captured {} entities into a scene.", entities.len());
        Self {
            name: name.into(),
            entities,
        }
    }

    /// Adds every entity of the scene to `world`, keeping their ids, so that
    /// the world's systems start tracking them.
    ///
    /// Entities added before a failure stay in the world.
    ///
    /// # Errors
    /// [`SceneError::Ecs`] if an entity id is already owned by the world or an
    /// entity lists the same component twice.
    pub fn instantiate(&self, world: &mut World) -> Result<Vec<EntityId>, SceneError> {
        let mut ids = Vec::with_capacity(self.entities.len());
        for definition in &self.entities {
            let mut entity = Entity::with_id(definition.id);
            for component in &definition.components {
                match component {
                    ComponentDefinition::Tag(tag) => entity.add_component(tag.clone())?,
                    ComponentDefinition::Transform(t) => entity.add_component(*t)?,
                }
            }
            ids.push(world.add_entity(entity)?);
        }
        log::debug!("Instantiated scene '{}' ({} entities).", self.name, ids.len());
        Ok(ids)
    }

    /// Encodes the scene as pretty-printed RON.
    pub fn to_ron(&self) -> Result<String, SceneError> {
        let pretty = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Decodes a scene from RON text.
    pub fn from_ron(text: &str) -> Result<Self, SceneError> {
        Ok(ron::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Component;

    struct Velocity;
    impl Component for Velocity {}

    fn sample_world() -> (World, EntityId, EntityId) {
        let mut world = World::new();
        let player = world
            .add_entity(
                Entity::new()
                    .with(Tag::new("player"))
                    .with(Transform::from_position([1.0, 2.0, 3.0]))
                    .with(Velocity),
            )
            .unwrap();
        world.add_entity(Entity::new().with(Velocity)).unwrap();
        let camera = world
            .add_entity(Entity::new().with(Tag::new("camera")))
            .unwrap();
        (world, player, camera)
    }

    #[test]
    fn capture_keeps_only_persistable_entities() {
        let (world, player, camera) = sample_world();

        let scene = SceneDefinition::capture("level", &world);

        assert_eq!(scene.name, "level");
        let ids: Vec<_> = scene.entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![player, camera]);
        assert_eq!(
            scene.entities[0].components,
            vec![
                ComponentDefinition::Tag(Tag::new("player")),
                ComponentDefinition::Transform(Transform::from_position([1.0, 2.0, 3.0])),
            ]
        );
    }

    #[test]
    fn ron_round_trip_and_instantiate() {
        let (world, player, _) = sample_world();
        let scene = SceneDefinition::capture("level", &world);

        let text = scene.to_ron().unwrap();
        let decoded = SceneDefinition::from_ron(&text).unwrap();
        assert_eq!(decoded, scene);

        let mut fresh = World::new();
        let ids = decoded.instantiate(&mut fresh).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(fresh.get::<Tag>(player), Some(&Tag::new("player")));
        assert_eq!(
            fresh.get::<Transform>(player).map(|t| t.position),
            Some([1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn instantiating_twice_fails_on_duplicate_ids() {
        let (world, _, _) = sample_world();
        let scene = SceneDefinition::capture("level", &world);
        let mut target = World::new();
        scene.instantiate(&mut target).unwrap();

        let err = scene.instantiate(&mut target).unwrap_err();
        assert!(matches!(err, SceneError::Ecs(EcsError::EntityAlreadyExists(_))));
    }

    #[test]
    fn malformed_text_is_rejected() {
        let err = SceneDefinition::from_ron("(name: 3)").unwrap_err();
        assert!(matches!(err, SceneError::Decode(_)));
    }
}
