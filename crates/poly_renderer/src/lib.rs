//! Poly Renderer - multithreaded Whitted-style CPU ray tracing.
//!
//! A [`World`] owns the scene (objects, lights, sampler) and the output
//! buffer; a [`PinholeCamera`] splits the world's region into column slabs
//! and renders each slab on its own thread, tracing rays with a [`Tracer`].
//!
//! # Example
//!
//! ```ignore
//! use poly_renderer::*;
//!
//! let vp = ViewPlane::new(400, 300, 5);
//! let sampler = JitteredSampler::from_seed(9, 4, 42)?;
//! let mut world = World::new(vp, Region::full(&vp), 4, sampler)?;
//! world.add_object(Sphere::new(Vec3::ZERO, 30.0, Matte::new(0.5, Colour::Z)?)?);
//! world.add_light(PointLight::new(Vec3::new(0.0, 100.0, 0.0), 5.0)?);
//!
//! let camera = PinholeCamera::new(Vec3::new(0.0, 0.0, 300.0), Vec3::ZERO, Vec3::Y, 400.0)?;
//! camera.render_scene(&mut world)?;
//! save_bmp("render.bmp", &world)?;
//! ```

mod camera;
mod error;
mod hittable;
mod light;
mod material;
mod output;
mod sampler;
mod slab;
mod sphere;
mod tracer;
mod world;

pub use camera::PinholeCamera;
pub use error::{RenderError, RenderResult};
pub use hittable::{Hit, Object, ShadeRec};
pub use light::{AmbientLight, Light, PointLight};
pub use material::{Colour, LambertianBrdf, Material, Matte};
pub use output::{colour_to_rgb, save_bmp, to_rgb_bytes, OutputError};
pub use sampler::{JitteredSampler, SampleCursor};
pub use slab::{generate_slabs, Slab};
pub use sphere::{Sphere, EPSILON};
pub use tracer::Tracer;
pub use world::{Region, ViewPlane, World};

/// Re-export the math types used throughout the renderer.
pub use poly_math::{Interval, Ray, Vec2, Vec3};
