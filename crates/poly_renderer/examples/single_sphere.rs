//! Single sphere example.
//!
//! Renders one blue matte sphere under a point light and white ambient light,
//! then saves the result as a 24-bit BMP.

use poly_renderer::{
    save_bmp, AmbientLight, Colour, JitteredSampler, Matte, PinholeCamera, PointLight, Region,
    RenderResult, Sphere, Vec3, ViewPlane, World,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let threads = std::thread::available_parallelism().map_or(4, |n| n.get() as u32);

    let start = std::time::Instant::now();
    let (mut world, camera) = match build_scene(threads) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to build scene: {e}");
            std::process::exit(1);
        }
    };
    log::info!("Scene built in {:?}", start.elapsed());

    if let Err(e) = camera.render_scene(&mut world) {
        log::error!("Render failed: {e}");
        std::process::exit(1);
    }

    let filename = "single_sphere.bmp";
    if let Err(e) = save_bmp(filename, &world) {
        log::error!("Failed to save image: {e}");
        std::process::exit(1);
    }
}

fn build_scene(threads: u32) -> RenderResult<(World, PinholeCamera)> {
    let vp = ViewPlane::new(1000, 1000, 5);
    let sampler = JitteredSampler::from_seed(9, 1, 2020)?;
    let mut world = World::new(vp, Region::full(&vp), threads, sampler)?;

    world.add_object(Sphere::new(
        Vec3::new(0.0, 0.0, 150.0),
        30.0,
        Matte::new(0.5, Colour::new(0.0, 0.0, 1.0))?,
    )?);
    world.add_light(PointLight::new(Vec3::new(0.0, 100.0, 150.0), 5.0)?);
    world.add_light(AmbientLight::new(Colour::ONE, 0.3)?);

    let camera = PinholeCamera::new(
        Vec3::new(0.0, 60.0, 300.0), // eye
        Vec3::ZERO,                  // lookat
        Vec3::Y,                     // up
        400.0,
    )?;

    Ok((world, camera))
}
