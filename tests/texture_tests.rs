//! Texture Binding Tests
//!
//! Tests for:
//! - Image decoding into linear float pixels
//! - PixelBuffer release semantics
//! - TextureBinding load/replace/release against a recording engine
//! - Fetched resource lifetime across synchronous and deferred uploads

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use marionette::assets::ResourceLoader;
use marionette::engine::{Engine, MaterialInstance, TextureId};
use marionette::errors::MarionetteError;
use marionette::resources::image::srgb_to_linear;
use marionette::resources::{
    PixelBuffer, PixelFormat, TextureBinding, TextureDescriptor, TextureFormat, decode_linear,
};
use marionette::settings::{ColorSpace, TextureSettings};

use common::{EngineCall, RecordingEngine, RecordingLoader, init_logging, png_rgb, png_rgba};

const MATERIALS: [MaterialInstance; 1] = [MaterialInstance(10)];

struct Fixture {
    engine: Arc<RecordingEngine>,
    loader: Arc<RecordingLoader>,
    dyn_loader: Arc<dyn ResourceLoader>,
    binding: TextureBinding,
}

fn fixture_with(engine: RecordingEngine, settings: TextureSettings) -> Fixture {
    init_logging();
    let engine = Arc::new(engine);
    let loader = Arc::new(
        RecordingLoader::new()
            .with_file("rgb.png", png_rgb(4, 2))
            .with_file("rgba.png", png_rgba(1, 1))
            .with_file("empty.png", Vec::new())
            .with_file("garbage.png", b"not a png".to_vec()),
    );
    let dyn_engine: Arc<dyn Engine> = engine.clone();
    let dyn_loader: Arc<dyn ResourceLoader> = loader.clone();
    Fixture {
        engine,
        loader,
        dyn_loader,
        binding: TextureBinding::new(dyn_engine, settings),
    }
}

fn fixture() -> Fixture {
    fixture_with(RecordingEngine::new(), TextureSettings::default())
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn decode_rgb_png_without_alpha() {
    let image = decode_linear(&png_rgb(4, 2), ColorSpace::Linear).unwrap();
    assert_eq!((image.width(), image.height(), image.channels()), (4, 2, 3));
    assert_eq!(image.pixels().len(), 4 * 2 * 3);
    assert_eq!(image.mip_level_count(), 3);

    let first = &image.pixels()[..3];
    assert!((first[0] - 1.0).abs() < 1e-6);
    assert!((first[1] - 128.0 / 255.0).abs() < 1e-6);
    assert!(first[2].abs() < 1e-6);
}

#[test]
fn decode_linearises_srgb_colour_but_not_alpha() {
    let image = decode_linear(&png_rgba(1, 1), ColorSpace::Srgb).unwrap();
    assert_eq!(image.channels(), 4);

    let px = image.pixels();
    assert!((px[0] - 1.0).abs() < 1e-6);
    assert!((px[3] - 128.0 / 255.0).abs() < 1e-6);

    let image = decode_linear(&png_rgb(1, 1), ColorSpace::Srgb).unwrap();
    assert!((image.pixels()[1] - srgb_to_linear(128.0 / 255.0)).abs() < 1e-6);
}

#[test]
fn decode_rejects_empty_and_corrupt_input() {
    assert!(matches!(
        decode_linear(&[], ColorSpace::Srgb),
        Err(MarionetteError::ImageDecodeError(_))
    ));
    assert!(matches!(
        decode_linear(&png_rgb(2, 2)[..16], ColorSpace::Srgb),
        Err(MarionetteError::ImageDecodeError(_))
    ));
}

// ============================================================================
// PixelBuffer
// ============================================================================

#[test]
fn pixel_buffer_release_fires_once() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let buffer = PixelBuffer::new(vec![0.0; 12], PixelFormat::Rgb, 2, 2)
        .with_release_callback(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    assert_eq!(buffer.byte_len(), 48);
    buffer.release();
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn pixel_buffer_drop_fires_release() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    {
        let _buffer = PixelBuffer::new(vec![0.0; 4], PixelFormat::Rgba, 1, 1)
            .with_release_callback(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
    }
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

// ============================================================================
// TextureBinding
// ============================================================================

#[test]
fn load_binds_rgb_texture_to_material() {
    let mut f = fixture();
    let id = f.binding.load("rgb.png", &f.dyn_loader, &MATERIALS).unwrap();

    assert_eq!(f.binding.current(), Some(id));
    assert_eq!(
        f.engine.calls(),
        vec![
            EngineCall::CreateTexture(TextureDescriptor {
                width: 4,
                height: 2,
                mip_levels: 3,
                format: TextureFormat::Rgb16F,
            }),
            EngineCall::SetImage {
                texture: id,
                level: 0,
                format: PixelFormat::Rgb,
                len: 24,
            },
            EngineCall::GenerateMipmaps(id),
            EngineCall::ParameterInt {
                material: MaterialInstance(10),
                name: "baseColorIndex".to_owned(),
                value: 0,
            },
            EngineCall::ParameterTexture {
                material: MaterialInstance(10),
                name: "baseColorMap".to_owned(),
                texture: id,
            },
        ]
    );
}

#[test]
fn load_rgba_uses_alpha_format_and_single_level() {
    let mut f = fixture();
    let id = f.binding.load("rgba.png", &f.dyn_loader, &MATERIALS).unwrap();

    let calls = f.engine.calls();
    assert_eq!(
        calls[0],
        EngineCall::CreateTexture(TextureDescriptor {
            width: 1,
            height: 1,
            mip_levels: 1,
            format: TextureFormat::Rgba16F,
        })
    );
    assert!(calls.contains(&EngineCall::SetImage {
        texture: id,
        level: 0,
        format: PixelFormat::Rgba,
        len: 4,
    }));
    assert!(!calls.contains(&EngineCall::GenerateMipmaps(id)));
}

#[test]
fn second_load_destroys_first_texture() {
    let mut f = fixture();
    let first = f.binding.load("rgb.png", &f.dyn_loader, &MATERIALS).unwrap();
    let second = f.binding.load("rgba.png", &f.dyn_loader, &MATERIALS).unwrap();

    assert_ne!(first, second);
    assert_eq!(f.engine.destroyed_textures(), vec![first]);
    assert_eq!(f.engine.live_textures(), 1);
    assert_eq!(f.binding.current(), Some(second));
    assert_eq!(f.loader.released().len(), 2);
}

#[test]
fn empty_image_fails_and_releases_resource() {
    let mut f = fixture();
    let err = f.binding.load("empty.png", &f.dyn_loader, &MATERIALS).unwrap_err();

    assert!(matches!(err, MarionetteError::ImageDecodeError(_)));
    assert_eq!(f.engine.created_textures(), 0);
    assert_eq!(f.binding.current(), None);

    let fetched: Vec<_> = f.loader.fetched().into_iter().map(|(_, id)| id).collect();
    assert_eq!(f.loader.released(), fetched);
}

#[test]
fn failed_load_still_releases_previous_texture() {
    let mut f = fixture();
    let first = f.binding.load("rgb.png", &f.dyn_loader, &MATERIALS).unwrap();
    assert!(f.binding.load("garbage.png", &f.dyn_loader, &MATERIALS).is_err());

    assert_eq!(f.engine.destroyed_textures(), vec![first]);
    assert_eq!(f.engine.live_textures(), 0);
    assert_eq!(f.binding.current(), None);
}

#[test]
fn fetch_failure_is_reported_as_decode_error() {
    let mut f = fixture();
    let err = f.binding.load("missing.png", &f.dyn_loader, &MATERIALS).unwrap_err();

    assert!(matches!(err, MarionetteError::ImageDecodeError(_)));
    assert!(f.loader.fetched().is_empty());
    assert!(f.loader.released().is_empty());
    assert!(f.engine.calls().is_empty());
}

#[test]
fn missing_material_creates_nothing() {
    let mut f = fixture();
    let err = f.binding.load("rgb.png", &f.dyn_loader, &[]).unwrap_err();

    assert_eq!(err, MarionetteError::MissingMaterial(0));
    assert_eq!(f.engine.created_textures(), 0);
    assert_eq!(f.loader.released().len(), 1);
}

#[test]
fn deferred_upload_holds_resource_until_engine_is_done() {
    let mut f = fixture_with(RecordingEngine::deferring_uploads(), TextureSettings::default());
    f.binding.load("rgb.png", &f.dyn_loader, &MATERIALS).unwrap();

    assert_eq!(f.loader.fetched().len(), 1);
    assert!(f.loader.released().is_empty());

    f.engine.complete_uploads();
    assert_eq!(f.loader.released().len(), 1);

    // Completing again releases nothing twice
    f.engine.complete_uploads();
    assert_eq!(f.loader.released().len(), 1);
}

#[test]
fn release_and_drop_destroy_exactly_once() {
    let mut f = fixture();
    let id = f.binding.load("rgb.png", &f.dyn_loader, &MATERIALS).unwrap();

    assert!(f.binding.release());
    assert!(!f.binding.release());
    assert_eq!(f.engine.destroyed_textures(), vec![id]);

    let id = f.binding.load("rgba.png", &f.dyn_loader, &MATERIALS).unwrap();
    let engine = Arc::clone(&f.engine);
    drop(f);
    assert_eq!(engine.destroyed_textures().last(), Some(&id));
    assert_eq!(engine.live_textures(), 0);
}

#[test]
fn settings_control_binding() {
    let settings = TextureSettings {
        material_instance: 1,
        color_parameter: "albedo".to_owned(),
        index_parameter: None,
        generate_mipmaps: false,
        ..TextureSettings::default()
    };
    let mut f = fixture_with(RecordingEngine::new(), settings);
    let materials = [MaterialInstance(10), MaterialInstance(11)];

    let id = f.binding.load("rgb.png", &f.dyn_loader, &materials).unwrap();
    let calls = f.engine.calls();

    assert!(!calls.iter().any(|c| matches!(c, EngineCall::GenerateMipmaps(_))));
    assert!(!calls.iter().any(|c| matches!(c, EngineCall::ParameterInt { .. })));
    assert_eq!(
        calls.last(),
        Some(&EngineCall::ParameterTexture {
            material: MaterialInstance(11),
            name: "albedo".to_owned(),
            texture: id,
        })
    );
    assert_eq!(
        f.binding.load("rgb.png", &f.dyn_loader, &materials[..1]),
        Err(MarionetteError::MissingMaterial(1))
    );
}

#[test]
fn texture_ids_come_from_engine() {
    let mut f = fixture();
    assert_eq!(
        f.binding.load("rgb.png", &f.dyn_loader, &MATERIALS),
        Ok(TextureId(1))
    );
}
