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
use std::{error::Error, path::Path};

/// A decoded image in tightly packed RGBA8, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl Texture {
    /// The RGBA value of a pixel, if the coordinates are in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels
            .get(offset..offset + 4)
            .and_then(|rgba| rgba.try_into().ok())
    }
}

impl Resource for Texture {}

/// Decodes any image format supported by the `image` crate into a [`Texture`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureLoader;

impl ResourceLoader<Texture> for TextureLoader {
    fn load(&self, path: &Path) -> Result<Texture, Box<dyn Error + Send + Sync>> {
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Texture {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}
