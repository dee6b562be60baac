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

//! Project files.
//!
//! A project is a named collection of scenes saved as pretty-printed JSON to
//! `<location>/<name>.feproj`.

use final_data::scene::SceneDefinition;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension of project files.
pub const PROJECT_EXTENSION: &str = "feproj";

/// Errors raised while saving or loading a [`Project`].
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The project name is empty, has surrounding whitespace or would escape
    /// the target directory.
    #[error("invalid project name '{0}'")]
    InvalidName(String),
    /// Reading or writing the file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid project document.
    #[error("invalid project file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A named collection of scenes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// The project name, also used as the file stem.
    pub name: String,
    /// The project's scenes.
    #[serde(default)]
    pub scenes: Vec<SceneDefinition>,
}

impl Project {
    /// Creates an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scenes: Vec::new(),
        }
    }

    /// Looks a scene up by name.
    pub fn scene(&self, name: &str) -> Option<&SceneDefinition> {
        self.scenes.iter().find(|scene| scene.name == name)
    }

    /// Adds a scene, replacing any scene with the same name in place.
    pub fn upsert_scene(&mut self, scene: SceneDefinition) {
        match self.scenes.iter_mut().find(|s| s.name == scene.name) {
            Some(existing) => *existing = scene,
            None => self.scenes.push(scene),
        }
    }

    /// The file this project is saved to inside `location`.
    pub fn file_path(&self, location: impl AsRef<Path>) -> PathBuf {
        location
            .as_ref()
            .join(format!("{}.{PROJECT_EXTENSION}", self.name))
    }

    /// Writes the project to `<location>/<name>.feproj`, creating `location`
    /// if needed, and returns the file path.
    pub fn save(&self, location: impl AsRef<Path>) -> Result<PathBuf, ProjectError> {
        let name = self.name.as_str();
        let invalid = name.trim() != name
            || name.is_empty()
            || name.contains(['/', '\\'])
            || name == "."
            || name == "..";
        if invalid {
            return Err(ProjectError::InvalidName(self.name.clone()));
        }

        let location = location.as_ref();
        std::fs::create_dir_all(location).map_err(|source| ProjectError::Io {
            path: location.to_path_buf(),
            source,
        })?;

        let path = self.file_path(location);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json).map_err(|source| ProjectError::Io {
            path: path.clone(),
            source,
        })?;

        log::info!("Project '{}' saved to '{}'.", self.name, path.display());
        Ok(path)
    }

    /// Reads a project file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let project: Self = serde_json::from_str(&text)?;
        log::debug!(
            "Project '{}' loaded ({} scene(s)).",
            project.name,
            project.scenes.len()
        );
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use final_data::{ecs::EntityId, scene::EntityDefinition};

    #[test]
    fn upsert_replaces_by_name() {
        let mut project = Project::new("game");
        project.upsert_scene(SceneDefinition::new("menu"));
        project.upsert_scene(SceneDefinition::new("level"));

        let mut menu = SceneDefinition::new("menu");
        menu.entities.push(EntityDefinition {
            id: EntityId::new(),
            components: Vec::new(),
        });
        project.upsert_scene(menu.clone());

        assert_eq!(project.scenes.len(), 2);
        assert_eq!(project.scenes[0], menu);
        assert!(project.scene("level").is_some());
        assert!(project.scene("credits").is_none());
    }

    #[test]
    fn file_path_uses_the_extension() {
        let project = Project::new("demo");
        assert_eq!(
            project.file_path("/tmp/projects"),
            PathBuf::from("/tmp/projects/demo.feproj")
        );
    }

    #[test]
    fn invalid_names_are_rejected() {
        let dir = std::env::temp_dir();
        for name in ["", "   ", "..", "a/b", " demo ", "demo\n"] {
            let err = Project::new(name).save(&dir).unwrap_err();
            assert!(matches!(err, ProjectError::InvalidName(_)), "{name:?}");
        }
    }
}
