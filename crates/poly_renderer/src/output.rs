//! 24-bit image output.
//!
//! Colours are clamped to [0, 1] and truncated to 8 bits per channel. Rows
//! are emitted top to bottom, matching the world's buffer layout.

use std::path::Path;

use poly_math::Interval;
use thiserror::Error;

use crate::{Colour, World};

/// Errors that can occur while writing a rendered image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Image buffer holds {actual} pixels but the region needs {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Convert a colour to 8-bit RGB.
pub fn colour_to_rgb(colour: Colour) -> [u8; 3] {
    let channel = |x: f32| (255.0 * Interval::UNIT.clamp(x)) as u8;
    [channel(colour.x), channel(colour.y), channel(colour.z)]
}

/// Packed RGB bytes of the world's region, top row first.
pub fn to_rgb_bytes(world: &World) -> Vec<u8> {
    let pixels: Vec<[u8; 3]> = world.image().iter().copied().map(colour_to_rgb).collect();
    bytemuck::cast_slice(&pixels).to_vec()
}

/// Write the world's region as a 24-bit BMP file.
pub fn save_bmp(path: impl AsRef<Path>, world: &World) -> Result<(), OutputError> {
    let region = world.region();
    let expected = region.pixel_count();
    let actual = world.image().len();
    if actual != expected {
        return Err(OutputError::SizeMismatch { expected, actual });
    }

    let path = path.as_ref();
    image::save_buffer_with_format(
        path,
        &to_rgb_bytes(world),
        region.width(),
        region.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Bmp,
    )?;

    log::info!("Saved {}x{} image to {}", region.width(), region.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Region, ViewPlane};
    use crate::{AmbientLight, JitteredSampler, Matte, PinholeCamera, Sphere};
    use poly_math::Vec3;

    #[test]
    fn test_colour_to_rgb_clamps_and_truncates() {
        assert_eq!(colour_to_rgb(Colour::ZERO), [0, 0, 0]);
        assert_eq!(colour_to_rgb(Colour::ONE), [255, 255, 255]);
        assert_eq!(colour_to_rgb(Colour::new(-1.0, 2.0, 0.5)), [0, 255, 127]);
        assert_eq!(colour_to_rgb(Colour::new(0.999, 0.0039, 0.004)), [254, 0, 1]);
    }

    /// Red sphere above the view-plane centre, blue background below it.
    fn two_tone_world() -> World {
        let vp = ViewPlane::new(4, 6, 0);
        let sampler = JitteredSampler::from_seed(1, 1, 0).unwrap();
        let mut world = World::new(vp, Region::new(1, 4, 0, 6), 2, sampler)
            .unwrap()
            .with_background(Colour::new(0.0, 0.0, 1.0));
        let red = Matte::new(1.0, Colour::new(1.0, 0.0, 0.0)).unwrap();
        world.add_object(Sphere::new(Vec3::new(0.0, 30.0, 0.0), 25.0, red).unwrap());
        world.add_light(AmbientLight::new(Colour::ONE, 1.0).unwrap());

        let camera = PinholeCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y, 1.0).unwrap();
        camera.render_scene(&mut world).unwrap();
        world
    }

    #[test]
    fn test_bytes_are_row_major_top_first() {
        let world = two_tone_world();

        let bytes = to_rgb_bytes(&world);
        assert_eq!(bytes.len(), 3 * 3 * 6);
        // Row 0 looks up into the sphere, row 5 down past it.
        assert_eq!(&bytes[..3], &[255, 0, 0]);
        assert_eq!(&bytes[bytes.len() - 3..], &[0, 0, 255]);
    }

    #[test]
    fn test_bmp_round_trip_keeps_orientation() {
        let world = two_tone_world();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.bmp");
        save_bmp(&path, &world).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 6));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(decoded.get_pixel(2, 5).0, [0, 0, 255]);
        assert_eq!(decoded.into_raw(), to_rgb_bytes(&world));
    }
}
