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

//! Sandbox binary: runs a handful of frames over a small world and loads a
//! couple of shared resources.

use anyhow::{Context, Result};
use final_core::EngineConfig;
use final_data::{
    ecs::{
        Aspect, Component, Entities, Entity, EntitySystem, SystemPhase, Tag, Transform, World,
    },
    scene::SceneDefinition,
};
use final_io::{
    loaders::{ShaderSource, ShaderSourceLoader, SoundClip, SoundLoader, Texture, TextureLoader},
    ResourceManager,
};
use final_telemetry::{logging, ScopedTimer};
use std::path::Path;

const FRAME_COUNT: usize = 5;

#[derive(Debug, Clone, Copy)]
struct Velocity([f32; 3]);
impl Component for Velocity {}

/// Integrates velocities into positions.
struct MovementSystem;

impl EntitySystem for MovementSystem {
    fn aspect(&self) -> Aspect {
        Aspect::new().all::<Transform>().all::<Velocity>()
    }

    fn process(&mut self, entities: &mut Entities<'_>) {
        for mut components in entities.iter_mut() {
            let Some(velocity) = components.get::<Velocity>().copied() else {
                continue;
            };
            if let Some(transform) = components.get_mut::<Transform>() {
                transform.translate(velocity.0);
            }
        }
    }
}

/// Logs where every tagged entity ended up.
struct ReportSystem;

impl EntitySystem for ReportSystem {
    fn aspect(&self) -> Aspect {
        Aspect::new().all::<Tag>().all::<Transform>()
    }

    fn process(&mut self, entities: &mut Entities<'_>) {
        for entity in entities.iter() {
            if let (Some(tag), Some(transform)) = (entity.get::<Tag>(), entity.get::<Transform>()) {
                log::debug!("{} is at {:?}", tag.name, transform.position);
            }
        }
    }

    fn phase(&self) -> SystemPhase {
        SystemPhase::Render
    }
}

fn load_config(dir: &Path) -> Result<EngineConfig> {
    let path = dir.join("sandbox.ron");
    if !path.exists() {
        return Ok(EngineConfig::default());
    }
    EngineConfig::load(&path).with_context(|| format!("reading {}", path.display()))
}

fn build_world() -> Result<World> {
    let mut world = World::new();
    world.add_system(MovementSystem)?;
    world.add_system(ReportSystem)?;

    world.add_entity(
        Entity::new()
            .with(Tag::new("runner"))
            .with(Transform::default())
            .with(Velocity([1.0, 0.0, 0.0])),
    )?;
    world.add_entity(
        Entity::new()
            .with(Tag::new("statue"))
            .with(Transform::from_position([0.0, 2.0, 0.0])),
    )?;
    let bird = world.add_entity(Entity::new().with(Tag::new("bird")).with(Transform::default()))?;

    // The bird takes off after creation; the movement system picks it up.
    world.add_component(bird, Velocity([0.0, 0.5, 0.0]))?;
    Ok(world)
}

fn load_resources(resources: &mut ResourceManager) -> Result<()> {
    resources.register_loader::<ShaderSource>(ShaderSourceLoader)?;
    resources.register_loader::<Texture>(TextureLoader)?;
    resources.register_loader::<SoundClip>(SoundLoader)?;

    let vertex = resources.load::<ShaderSource>("shaders/basic.vert")?;
    let fragment = resources.load::<ShaderSource>("shaders/basic.frag")?;
    let shared = resources.load::<ShaderSource>("shaders/basic.vert")?;
    log::info!(
        "Loaded {:?} and {:?} shaders, vertex shader referenced {} times.",
        vertex.stage,
        fragment.stage,
        resources.reference_count("shaders/basic.vert").unwrap_or(0)
    );

    for handle in [vertex, fragment, shared] {
        resources.unload(&handle)?;
    }
    log::info!("{} resource(s) still cached.", resources.len());
    Ok(())
}

fn main() -> Result<()> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut config = load_config(dir)?;
    if let Some(root) = config.resources.root.take() {
        config.resources.root = Some(dir.join(root));
    }
    logging::init(&config.logging);

    let mut world = build_world()?;
    {
        let _timer = ScopedTimer::new("frames");
        for frame in 0..FRAME_COUNT {
            log::trace!("Frame {frame}");
            world.process_all(SystemPhase::Update);
            world.process_all(SystemPhase::Render);
        }
    }

    let scene = SceneDefinition::capture("sandbox", &world);
    log::info!("Captured scene:\n{}", scene.to_ron()?);

    let mut resources = ResourceManager::from_config(&config.resources);
    load_resources(&mut resources)?;
    Ok(())
}
