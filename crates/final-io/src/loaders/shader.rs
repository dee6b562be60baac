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

use final_core::resource::{Resource, ResourceLoader};
use std::{
    error::Error,
    path::{Path, PathBuf},
};

/// The pipeline stage a shader source targets, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// `.vert`
    Vertex,
    /// `.frag`
    Fragment,
    /// `.geom`
    Geometry,
    /// `.comp`
    Compute,
}

impl ShaderStage {
    /// Maps a file extension to a stage.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "vert" => Some(Self::Vertex),
            "frag" => Some(Self::Fragment),
            "geom" => Some(Self::Geometry),
            "comp" => Some(Self::Compute),
            _ => None,
        }
    }
}

/// The source text of a shader stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// The file the source was read from.
    pub path: PathBuf,
    /// The stage, from the file extension.
    pub stage: ShaderStage,
    /// The source text.
    pub code: String,
}

impl Resource for ShaderSource {}

/// Reads `.vert`, `.frag`, `.geom` and `.comp` files as UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShaderSourceLoader;

impl ResourceLoader<ShaderSource> for ShaderSourceLoader {
    fn load(&self, path: &Path) -> Result<ShaderSource, Box<dyn Error + Send + Sync>> {
        let stage = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ShaderStage::from_extension)
            .ok_or_else(|| format!("unknown shader stage for '{}'", path.display()))?;
        let code = std::fs::read_to_string(path)?;

        Ok(ShaderSource {
            path: path.to_path_buf(),
            stage,
            code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_map_to_stages() {
        assert_eq!(ShaderStage::from_extension("vert"), Some(ShaderStage::Vertex));
        assert_eq!(ShaderStage::from_extension("FRAG"), Some(ShaderStage::Fragment));
        assert_eq!(ShaderStage::from_extension("comp"), Some(ShaderStage::Compute));
        assert_eq!(ShaderStage::from_extension("glsl"), None);
    }

    #[test]
    fn unknown_extension_fails_before_reading() {
        let err = ShaderSourceLoader
            .load(Path::new("does/not/exist.txt"))
            .unwrap_err();
        assert!(err.to_string().contains("unknown shader stage"));
    }
}
