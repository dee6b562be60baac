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
use final_core::resource::ResourceHandle;
use final_io::{
    loaders::{
        ShaderSource, ShaderSourceLoader, ShaderStage, SoundClip, SoundLoader, Texture,
        TextureLoader,
    },
    ResourceError, ResourceManager,
};
use std::path::Path;
use tempfile::tempdir;

fn manager(root: &Path) -> Result<ResourceManager> {
    let mut manager = ResourceManager::with_root(root);
    manager.register_loader::<ShaderSource>(ShaderSourceLoader)?;
    manager.register_loader::<Texture>(TextureLoader)?;
    manager.register_loader::<SoundClip>(SoundLoader)?;
    Ok(manager)
}

fn write_wav(path: &Path, bits_per_sample: u16, samples: &[i16]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 8_000,
        bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for sample in samples {
        if bits_per_sample == 8 {
            writer.write_sample(*sample as i8)?;
        } else {
            writer.write_sample(*sample)?;
        }
    }
    writer.finalize()?;
    Ok(())
}

#[test]
fn test_shader_source_is_loaded_with_its_stage() -> Result<()> {
    let dir = tempdir()?;
    std::fs::create_dir(dir.path().join("shaders"))?;
    std::fs::write(
        dir.path().join("shaders/basic.frag"),
        "void main() { gl_FragColor = vec4(1.0); }",
    )?;
    let mut manager = manager(dir.path())?;

    let shader = manager.load::<ShaderSource>("shaders/basic.frag")?;

    assert_eq!(shader.stage, ShaderStage::Fragment);
    assert!(shader.code.contains("gl_FragColor"));
    assert_eq!(shader.path, dir.path().join("shaders/basic.frag"));
    Ok(())
}

#[test]
fn test_missing_file_is_a_load_failure() -> Result<()> {
    let dir = tempdir()?;
    let mut manager = manager(dir.path())?;

    let err = manager.load::<ShaderSource>("missing.vert").unwrap_err();

    assert!(matches!(err, ResourceError::LoadFailed { .. }));
    assert!(manager.is_empty());
    Ok(())
}

#[test]
fn test_texture_is_decoded_to_rgba() -> Result<()> {
    let dir = tempdir()?;
    let mut image = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    image.put_pixel(1, 0, image::Rgba([0, 255, 0, 128]));
    image.save(dir.path().join("checker.png"))?;
    let mut manager = manager(dir.path())?;

    let texture = manager.load::<Texture>("checker.png")?;
    let again = manager.load::<Texture>("checker.png")?;

    assert!(ResourceHandle::ptr_eq(&texture, &again));
    assert_eq!((texture.width, texture.height), (2, 2));
    assert_eq!(texture.pixels.len(), 16);
    assert_eq!(texture.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(texture.pixel(1, 0), Some([0, 255, 0, 128]));
    assert_eq!(texture.pixel(2, 0), None);
    Ok(())
}

#[test]
fn test_sound_clip_is_decoded() -> Result<()> {
    let dir = tempdir()?;
    let samples = [0, 1_000, -1_000, i16::MAX, i16::MIN, 7];
    write_wav(&dir.path().join("beep.wav"), 16, &samples)?;
    let mut manager = manager(dir.path())?;

    let clip = manager.load::<SoundClip>("beep.wav")?;

    assert_eq!(clip.sample_rate, 8_000);
    assert_eq!(clip.channels, 2);
    assert_eq!(clip.samples, samples);
    assert_eq!(clip.frames(), 3);
    Ok(())
}

#[test]
fn test_unsupported_sound_format_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    write_wav(&dir.path().join("lofi.wav"), 8, &[1, 2, 3, 4])?;
    let mut manager = manager(dir.path())?;

    let err = manager.load::<SoundClip>("lofi.wav").unwrap_err();

    match err {
        ResourceError::LoadFailed { source, .. } => {
            assert!(source.to_string().contains("unsupported sample format"))
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}
