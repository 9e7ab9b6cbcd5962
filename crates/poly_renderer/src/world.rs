//! The world: every piece of scene data a render needs, plus its output buffer.

use crate::error::{RenderError, RenderResult};
use crate::light::{AmbientLight, Light};
use crate::{Colour, JitteredSampler, Object};

/// View-plane resolution and the trace depth bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPlane {
    /// Horizontal resolution
    pub hres: u32,
    /// Vertical resolution
    pub vres: u32,
    pub max_depth: u32,
}

impl ViewPlane {
    pub fn new(hres: u32, vres: u32, max_depth: u32) -> Self {
        Self {
            hres,
            vres,
            max_depth,
        }
    }
}

/// The rectangle of the view plane rendered by one job.
///
/// Bounds are half-open: columns `start_col..end_col`, rows `start_row..end_row`,
/// with row 0 at the top of the view plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start_col: u32,
    pub end_col: u32,
    pub start_row: u32,
    pub end_row: u32,
}

impl Region {
    pub fn new(start_col: u32, end_col: u32, start_row: u32, end_row: u32) -> Self {
        Self {
            start_col,
            end_col,
            start_row,
            end_row,
        }
    }

    /// The whole view plane.
    pub fn full(view_plane: &ViewPlane) -> Self {
        Self::new(0, view_plane.hres, 0, view_plane.vres)
    }

    pub fn width(&self) -> u32 {
        self.end_col.saturating_sub(self.start_col)
    }

    pub fn height(&self) -> u32 {
        self.end_row.saturating_sub(self.start_row)
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Position of view-plane pixel (col, row) in the region's row-major buffer.
    pub fn index_of(&self, col: u32, row: u32) -> Option<usize> {
        let inside = (self.start_col..self.end_col).contains(&col)
            && (self.start_row..self.end_row).contains(&row);
        inside.then(|| {
            (row - self.start_row) as usize * self.width() as usize + (col - self.start_col) as usize
        })
    }

    fn fits(&self, view_plane: &ViewPlane) -> bool {
        self.width() > 0
            && self.height() > 0
            && self.end_col <= view_plane.hres
            && self.end_row <= view_plane.vres
    }
}

/// Owns objects, lights, the sampler and the output image for a render.
#[derive(Debug)]
pub struct World {
    background: Colour,
    view_plane: ViewPlane,
    sampler: JitteredSampler,
    objects: Vec<Object>,
    ambient: Option<AmbientLight>,
    lights: Vec<Light>,
    image: Vec<Colour>,
    region: Region,
    threads: u32,
    slab_size: u32,
}

impl World {
    /// Create an empty world rendering `region` with `threads` workers.
    ///
    /// Allocates the output buffer and fixes the slab size; neither changes afterwards.
    pub fn new(
        view_plane: ViewPlane,
        region: Region,
        threads: u32,
        sampler: JitteredSampler,
    ) -> RenderResult<Self> {
        if threads == 0 {
            return Err(RenderError::NoThreads);
        }
        if !region.fits(&view_plane) {
            return Err(RenderError::InvalidRegion {
                region,
                hres: view_plane.hres,
                vres: view_plane.vres,
            });
        }

        Ok(Self {
            background: Colour::ZERO,
            view_plane,
            sampler,
            objects: Vec::new(),
            ambient: None,
            lights: Vec::new(),
            image: vec![Colour::ZERO; region.pixel_count()],
            region,
            threads,
            slab_size: region.width() / threads,
        })
    }

    /// Set the colour returned for rays that hit nothing.
    pub fn with_background(mut self, background: Colour) -> Self {
        self.background = background;
        self
    }

    /// Add an object to the scene. Objects are tested in insertion order.
    pub fn add_object(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    /// Add a light.
    ///
    /// Ambient light goes to the single ambient slot, replacing any earlier one;
    /// every other light joins the direct list.
    pub fn add_light(&mut self, light: impl Into<Light>) {
        match light.into() {
            Light::Ambient(ambient) => {
                if self.ambient.replace(ambient).is_some() {
                    log::warn!("Replacing previously set ambient light");
                }
            }
            direct => self.lights.push(direct),
        }
    }

    pub fn background(&self) -> Colour {
        self.background
    }

    pub fn view_plane(&self) -> &ViewPlane {
        &self.view_plane
    }

    pub fn sampler(&self) -> &JitteredSampler {
        &self.sampler
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn ambient(&self) -> Option<&AmbientLight> {
        self.ambient.as_ref()
    }

    /// Direct lights, never containing ambient light.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn threads(&self) -> u32 {
        self.threads
    }

    /// Column span of one worker's slab.
    pub fn slab_size(&self) -> u32 {
        self.slab_size
    }

    /// Rendered colours, row-major over the region, top row first.
    pub fn image(&self) -> &[Colour] {
        &self.image
    }

    /// Colour of view-plane pixel (col, row), if it lies in the region.
    pub fn pixel(&self, col: u32, row: u32) -> Option<Colour> {
        self.region.index_of(col, row).map(|i| self.image[i])
    }

    /// Move the image buffer out so it can be written while the rest of the
    /// world is shared read-only. Must be paired with [`World::restore_image`].
    pub(crate) fn take_image(&mut self) -> Vec<Colour> {
        std::mem::take(&mut self.image)
    }

    pub(crate) fn restore_image(&mut self, image: Vec<Colour>) {
        debug_assert_eq!(image.len(), self.region.pixel_count());
        self.image = image;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Matte, PointLight, Sphere};
    use poly_math::Vec3;

    fn sampler() -> JitteredSampler {
        JitteredSampler::from_seed(4, 2, 42).unwrap()
    }

    #[test]
    fn test_world_allocates_region_buffer() {
        let vp = ViewPlane::new(100, 80, 5);
        let world = World::new(vp, Region::new(10, 50, 20, 80), 4, sampler()).unwrap();

        assert_eq!(world.image().len(), 40 * 60);
        assert_eq!(world.slab_size(), 10);
        assert_eq!(world.threads(), 4);
        assert_eq!(world.background(), Colour::ZERO);
    }

    #[test]
    fn test_slab_size_truncates() {
        let vp = ViewPlane::new(100, 100, 0);
        let world = World::new(vp, Region::full(&vp), 3, sampler()).unwrap();
        assert_eq!(world.slab_size(), 33);
    }

    #[test]
    fn test_rejects_bad_configuration() {
        let vp = ViewPlane::new(100, 100, 0);

        assert!(matches!(
            World::new(vp, Region::full(&vp), 0, sampler()),
            Err(RenderError::NoThreads)
        ));
        for region in [
            Region::new(10, 10, 0, 100),
            Region::new(50, 10, 0, 100),
            Region::new(0, 100, 0, 101),
        ] {
            assert!(matches!(
                World::new(vp, region, 1, sampler()),
                Err(RenderError::InvalidRegion { .. })
            ));
        }
    }

    #[test]
    fn test_region_index_is_relative() {
        let region = Region::new(10, 20, 5, 8);

        assert_eq!(region.index_of(10, 5), Some(0));
        assert_eq!(region.index_of(19, 5), Some(9));
        assert_eq!(region.index_of(10, 6), Some(10));
        assert_eq!(region.index_of(19, 7), Some(29));
        assert_eq!(region.index_of(20, 5), None);
        assert_eq!(region.index_of(9, 5), None);
        assert_eq!(region.index_of(10, 8), None);
    }

    #[test]
    fn test_lights_are_routed() {
        let vp = ViewPlane::new(10, 10, 0);
        let mut world = World::new(vp, Region::full(&vp), 1, sampler()).unwrap();

        world.add_light(PointLight::new(Vec3::Y, 1.0).unwrap());
        world.add_light(AmbientLight::new(Colour::ONE, 0.3).unwrap());
        world.add_light(PointLight::new(Vec3::X, 1.0).unwrap());
        world.add_light(AmbientLight::new(Colour::ONE, 0.5).unwrap());

        assert_eq!(world.lights().len(), 2);
        assert!(world.lights().iter().all(|l| matches!(l, Light::Point(_))));
        assert_eq!(world.ambient().unwrap().radiance(), Colour::splat(0.5));
    }

    #[test]
    fn test_objects_keep_order() {
        let vp = ViewPlane::new(10, 10, 0);
        let mut world = World::new(vp, Region::full(&vp), 1, sampler()).unwrap();
        let matte = Matte::new(0.5, Colour::ONE).unwrap();

        world.add_object(Sphere::new(Vec3::ZERO, 1.0, matte).unwrap());
        world.add_object(Sphere::new(Vec3::X, 2.0, matte).unwrap());

        let radii: Vec<f32> = world
            .objects()
            .iter()
            .map(|o| match o {
                Object::Sphere(s) => s.radius(),
            })
            .collect();
        assert_eq!(radii, vec![1.0, 2.0]);
    }
}
