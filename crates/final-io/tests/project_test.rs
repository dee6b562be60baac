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

use anyhow::Result;
use final_data::{
    ecs::{Entity, Tag, Transform, World},
    scene::SceneDefinition,
};
use final_io::{Project, ProjectError};
use tempfile::tempdir;

#[test]
fn test_project_round_trip_through_disk() -> Result<()> {
    // --- 1. Build a world and capture it ---
    let mut world = World::new();
    let hero = world.add_entity(
        Entity::new()
            .with(Tag::new("hero"))
            .with(Transform::from_position([4.0, 0.0, -2.0])),
    )?;
    let mut project = Project::new("demo");
    project.upsert_scene(SceneDefinition::capture("level-1", &world));

    // --- 2. Save it into a directory that does not exist yet ---
    let dir = tempdir()?;
    let location = dir.path().join("projects");
    let path = project.save(&location)?;
    assert_eq!(path, location.join("demo.feproj"));
    assert!(path.is_file());

    // --- 3. Load it back and rebuild the world ---
    let loaded = Project::load(&path)?;
    assert_eq!(loaded, project);

    let mut restored = World::new();
    loaded
        .scene("level-1")
        .expect("scene should be present")
        .instantiate(&mut restored)?;
    assert_eq!(restored.get::<Tag>(hero), Some(&Tag::new("hero")));
    assert_eq!(
        restored.get::<Transform>(hero).map(|t| t.position),
        Some([4.0, 0.0, -2.0])
    );
    Ok(())
}

#[test]
fn test_loading_garbage_fails() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.feproj");
    std::fs::write(&path, "{ not json")?;

    let err = Project::load(&path).unwrap_err();
    assert!(matches!(err, ProjectError::Json(_)));

    let err = Project::load(dir.path().join("missing.feproj")).unwrap_err();
    assert!(matches!(err, ProjectError::Io { .. }));
    Ok(())
}

#[test]
fn test_scenes_default_to_empty() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("bare.feproj");
    std::fs::write(&path, r#"{ "name": "bare" }"#)?;

    let project = Project::load(&path)?;
    assert_eq!(project, Project::new("bare"));
    Ok(())
}
