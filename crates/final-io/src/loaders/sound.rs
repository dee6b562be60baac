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
use hound::SampleFormat;
use std::{error::Error, path::Path, time::Duration};

/// Decoded 16-bit PCM audio, samples interleaved by channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundClip {
    /// Frames per second.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Interleaved samples.
    pub samples: Vec<i16>,
}

impl SoundClip {
    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        match self.channels {
            0 => 0,
            channels => self.samples.len() / channels as usize,
        }
    }

    /// Playback length.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }
}

impl Resource for SoundClip {}

/// Decodes 16-bit integer PCM `.wav` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundLoader;

impl ResourceLoader<SoundClip> for SoundLoader {
    fn load(&self, path: &Path) -> Result<SoundClip, Box<dyn Error + Send + Sync>> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(format!(
                "unsupported sample format in '{}': {} bit {:?}",
                path.display(),
                spec.bits_per_sample,
                spec.sample_format
            )
            .into());
        }

        let samples = reader.samples::<i16>().collect::<Result<Vec<_>, _>>()?;
        Ok(SoundClip {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            samples,
        })
    }
}
