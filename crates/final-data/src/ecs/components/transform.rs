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

use crate::ecs::Component;
use serde::{Deserialize, Serialize};

/// Position, orientation and scale of an entity in world space.
///
/// The rotation is a unit quaternion stored as `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation.
    pub position: [f32; 3],
    /// Orientation quaternion, `[x, y, z, w]`.
    pub rotation: [f32; 4],
    /// Per-axis scale.
    pub scale: [f32; 3],
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        position: [0.0; 3],
        rotation: [0.0, 0.0, 0.0, 1.0],
        scale: [1.0; 3],
    };

    /// An identity transform moved to `position`.
    pub fn from_position(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Moves the transform by `delta`.
    pub fn translate(&mut self, delta: [f32; 3]) {
        for (axis, d) in self.position.iter_mut().zip(delta) {
            *axis += d;
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_identity() {
        let t = Transform::default();
        assert_eq!(t, Transform::IDENTITY);
        assert_eq!(t.rotation, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(t.scale, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn translate_accumulates() {
        let mut t = Transform::from_position([1.0, 2.0, 3.0]);
        t.translate([0.1, -2.0, 0.5]);
        t.translate([0.2, 0.0, 0.0]);

        assert_relative_eq!(t.position[0], 1.3, epsilon = 1e-6);
        assert_relative_eq!(t.position[1], 0.0, epsilon = 1e-6);
        assert_relative_eq!(t.position[2], 3.5, epsilon = 1e-6);
        assert_eq!(t.scale, [1.0; 3], "Translation must not touch scale");
    }
}
