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

//! A stable, human-readable representation of a world's content.
//!
//! The live [`World`](crate::ecs::World) stores components as type-erased
//! values, which cannot be written to disk directly. A [`SceneDefinition`]
//! translates the components the engine knows about into plain serializable
//! data, decoupling scene files from the internal storage layout.

mod definition;

pub use definition::*;
