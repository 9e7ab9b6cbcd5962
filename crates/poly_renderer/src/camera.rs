//! Pinhole camera and the multithreaded render loop.

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use crate::error::{RenderError, RenderResult};
use crate::slab::{generate_slabs, split_rows, Slab};
use crate::{Colour, Ray, Tracer, World};
use poly_math::{Vec2, Vec3};

/// Squared length below which a cross product is treated as zero.
const PARALLEL_EPSILON: f32 = 1e-10;

/// Pinhole camera looking from `eye` towards `lookat`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeCamera {
    eye: Vec3,
    lookat: Vec3,
    up: Vec3,
    /// Distance from the eye to the view plane
    distance: f32,

    // Orthonormal basis derived from eye, lookat and up
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl PinholeCamera {
    /// Create a camera and compute its basis.
    pub fn new(eye: Vec3, lookat: Vec3, up: Vec3, distance: f32) -> RenderResult<Self> {
        if !(distance.is_finite() && distance > 0.0) {
            return Err(RenderError::DegenerateCamera("view-plane distance must be positive"));
        }
        let (u, v, w) = compute_uvw(eye, lookat, up)?;

        Ok(Self {
            eye,
            lookat,
            up,
            distance,
            u,
            v,
            w,
        })
    }

    /// Move the eye, recomputing the basis.
    pub fn set_eye(&mut self, eye: Vec3) -> RenderResult<()> {
        self.reframe(eye, self.lookat, self.up)
    }

    /// Change the point looked at, recomputing the basis.
    pub fn set_lookat(&mut self, lookat: Vec3) -> RenderResult<()> {
        self.reframe(self.eye, lookat, self.up)
    }

    /// Change the up vector, recomputing the basis.
    pub fn set_up(&mut self, up: Vec3) -> RenderResult<()> {
        self.reframe(self.eye, self.lookat, up)
    }

    /// The camera is left untouched when the new frame is degenerate.
    fn reframe(&mut self, eye: Vec3, lookat: Vec3, up: Vec3) -> RenderResult<()> {
        (self.u, self.v, self.w) = compute_uvw(eye, lookat, up)?;
        self.eye = eye;
        self.lookat = lookat;
        self.up = up;
        Ok(())
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// The (u, v, w) basis: right, up and backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Direction through a point on the view plane, in pixel units from its centre.
    pub fn ray_direction(&self, p: Vec2) -> Vec3 {
        (p.x * self.u + p.y * self.v - self.distance * self.w).normalize()
    }

    /// Average colour of view-plane pixel (col, row) over the sampler's samples.
    pub fn render_pixel(&self, tracer: &Tracer<'_>, col: u32, row: u32) -> Colour {
        let world = tracer.world();
        let vp = world.view_plane();
        let sampler = world.sampler();
        let samples = sampler.samples_per_pixel();

        let half_width = 0.5 * vp.hres as f32;
        let half_height = 0.5 * vp.vres as f32;
        let key = u64::from(row) * u64::from(vp.hres) + u64::from(col);

        let mut colour = Colour::ZERO;
        for sp in sampler.cursor(key).take(samples as usize) {
            // Rows count downwards, the view plane's y axis upwards.
            let p = Vec2::new(
                col as f32 - half_width + sp.x,
                half_height - (row as f32 + sp.y),
            );
            let ray = Ray::new(self.eye, self.ray_direction(p));
            colour += tracer.trace_ray(&ray, 0);
        }

        colour / samples as f32
    }

    /// Render the world's region into its image buffer.
    ///
    /// Every slab gets its own worker thread on a pool built for this call;
    /// returns once every slab is finished. Each thread writes only the
    /// buffer segments of its own columns.
    pub fn render_scene(&self, world: &mut World) -> RenderResult<()> {
        let start = Instant::now();
        let region = *world.region();
        let threads = world.threads();
        let slabs = generate_slabs(&region, world.slab_size(), threads);

        log::info!(
            "Rendering {}x{} region with {} threads, {} spp",
            region.width(),
            region.height(),
            threads,
            world.sampler().samples_per_pixel()
        );

        let mut image = world.take_image();
        let result = {
            let world: &World = world;
            let segments = split_rows(&mut image, region.width(), &slabs);
            run_slabs(&slabs, segments, |slab, rows| self.render_slab(world, slab, rows))
        };
        world.restore_image(image);
        result?;

        log::info!("Rendered {} pixels in {:?}", region.pixel_count(), start.elapsed());
        Ok(())
    }

    /// Fill one slab. `rows` holds the slab's columns of each region row, top first.
    fn render_slab(&self, world: &World, slab: &Slab, rows: Vec<&mut [Colour]>) {
        if slab.is_empty() {
            return;
        }
        log::debug!("Slab {} started: columns {}..{}", slab.index, slab.start_col, slab.end_col);

        let tracer = Tracer::new(world);
        let region = world.region();
        for (row, pixels) in (region.start_row..region.end_row).zip(rows) {
            for (col, pixel) in (slab.start_col..slab.end_col).zip(pixels.iter_mut()) {
                *pixel = self.render_pixel(&tracer, col, row);
            }
        }

        log::debug!("Slab {} finished", slab.index);
    }
}

/// Run `render` once per slab, slab `i` on pool thread `i`.
///
/// The pool has exactly one thread per slab and each thread takes its slab's
/// rows from its own slot, so no slab waits behind another. Blocks until all
/// slabs are done.
fn run_slabs<'a, F>(
    slabs: &[Slab],
    segments: Vec<Vec<&'a mut [Colour]>>,
    render: F,
) -> RenderResult<()>
where
    F: Fn(&Slab, Vec<&'a mut [Colour]>) + Sync,
{
    if slabs.is_empty() {
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(slabs.len())
        .thread_name(|i| format!("poly-slab-{i}"))
        .build()?;

    let slots: Vec<Mutex<Vec<&'a mut [Colour]>>> = segments.into_iter().map(Mutex::new).collect();
    pool.broadcast(|ctx| {
        let index = ctx.index();
        if let (Some(slab), Some(slot)) = (slabs.get(index), slots.get(index)) {
            let rows = std::mem::take(&mut *slot.lock().unwrap_or_else(PoisonError::into_inner));
            render(slab, rows);
        }
    });
    Ok(())
}

/// Orthonormal basis for a camera at `eye` looking at `lookat`.
///
/// When `up` is (nearly) parallel to the view direction, the world axis least
/// aligned with the view direction stands in for it.
fn compute_uvw(eye: Vec3, lookat: Vec3, up: Vec3) -> RenderResult<(Vec3, Vec3, Vec3)> {
    if !(eye.is_finite() && lookat.is_finite() && up.is_finite()) {
        return Err(RenderError::DegenerateCamera("eye, lookat and up must be finite"));
    }
    let view = eye - lookat;
    if view.length_squared() < PARALLEL_EPSILON {
        return Err(RenderError::DegenerateCamera("eye and lookat coincide"));
    }

    let w = view.normalize();
    let mut u = up.normalize_or_zero().cross(w);
    if u.length_squared() < PARALLEL_EPSILON {
        let fallback = least_aligned_axis(w);
        log::warn!("Camera up {up} is parallel to the view direction, using {fallback} instead");
        u = fallback.cross(w);
    }
    let u = u.normalize();
    let v = w.cross(u);

    Ok((u, v, w))
}

fn least_aligned_axis(w: Vec3) -> Vec3 {
    let a = w.abs();
    if a.x <= a.y && a.x <= a.z {
        Vec3::X
    } else if a.y <= a.z {
        Vec3::Y
    } else {
        Vec3::Z
    }
}
