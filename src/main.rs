use clap::Parser;
use glam::Vec3A;
use log::info;

mod cli;
mod logger;

use cli::{Args, Scene};
use logger::init_logger;

use lumina::camera::Camera;
use lumina::cube::Cube;
use lumina::hittable::HittableList;
use lumina::material::MaterialType;
use lumina::mesh::{MeshProxy, TriangleMesh};
use lumina::output::{save_image_as_exr, save_image_as_png, save_image_as_ppm, send_image_to_tev};
use lumina::random;
use lumina::sphere::Sphere;

/// Cover scene: a ground sphere, a 22x22 field of random small spheres,
/// and three large feature spheres.
fn scene_spheres() -> HittableList {
    let mut world = HittableList::new();

    let ground = MaterialType::Lambertian {
        albedo: Vec3A::new(0.5, 0.5, 0.5),
    };
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -1000.0, 0.0),
        1000.0,
        ground,
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f32();
            let center = Vec3A::new(
                a as f32 + 0.9 * random::random_f32(),
                0.2,
                b as f32 + 0.9 * random::random_f32(),
            );

            // Keep the field clear of the large metal sphere.
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random::random_color() * random::random_color();
                MaterialType::Lambertian { albedo }
            } else if choose_mat < 0.95 {
                let albedo = random::random_color_range(0.5, 1.0);
                let fuzz = random::random_f32_range(0.0, 0.5);
                MaterialType::metal(albedo, fuzz)
            } else {
                MaterialType::Dielectric {
                    refraction_index: 1.5,
                }
            };
            world.add(Box::new(Sphere::new(center, 0.2, material)));
        }
    }

    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 1.0, 0.0),
        1.0,
        MaterialType::Dielectric {
            refraction_index: 1.5,
        },
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(-4.0, 1.0, 0.0),
        1.0,
        MaterialType::Lambertian {
            albedo: Vec3A::new(0.4, 0.2, 0.1),
        },
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(4.0, 1.0, 0.0),
        1.0,
        MaterialType::metal(Vec3A::new(0.7, 0.6, 0.5), 0.0),
    )));

    world
}

/// Cube scene: diffuse, metal, and glass cubes on a ground sphere, lit by
/// an emissive panel overhead.
fn scene_cubes() -> HittableList {
    let mut world = HittableList::new();

    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -1000.5, 0.0),
        1000.0,
        MaterialType::Lambertian {
            albedo: Vec3A::new(0.6, 0.6, 0.6),
        },
    )));

    world.add(Box::new(Cube::new(
        Vec3A::new(-1.2, 0.0, 0.0),
        0.5,
        MaterialType::Lambertian {
            albedo: Vec3A::new(0.7, 0.3, 0.3),
        },
    )));
    world.add(Box::new(Cube::new(
        Vec3A::new(0.0, 0.0, 0.0),
        0.5,
        MaterialType::metal(Vec3A::new(0.8, 0.8, 0.9), 0.1),
    )));
    world.add(Box::new(Cube::new(
        Vec3A::new(1.2, 0.0, 0.0),
        0.5,
        MaterialType::Dielectric {
            refraction_index: 1.5,
        },
    )));

    // Light panel above the cubes.
    world.add(Box::new(Cube::new(
        Vec3A::new(0.0, 2.5, 0.0),
        0.6,
        MaterialType::DiffuseLight {
            emit: Vec3A::new(4.0, 4.0, 4.0),
        },
    )));

    world
}

/// Mesh scene: a metal tetrahedron supplied through the mesh-intersector
/// interface, next to a glass sphere.
fn scene_mesh() -> HittableList {
    let mut world = HittableList::new();

    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -1000.5, 0.0),
        1000.0,
        MaterialType::Lambertian {
            albedo: Vec3A::new(0.5, 0.6, 0.5),
        },
    )));

    let tetrahedron = TriangleMesh::new(
        vec![
            Vec3A::new(-0.8, -0.5, 0.0),
            Vec3A::new(0.8, -0.5, 0.0),
            Vec3A::new(0.0, -0.5, -1.2),
            Vec3A::new(0.0, 0.9, -0.4),
        ],
        vec![[0, 1, 3], [1, 2, 3], [2, 0, 3], [0, 2, 1]],
    );
    world.add(Box::new(MeshProxy::new(
        Box::new(tetrahedron),
        MaterialType::metal(Vec3A::new(0.8, 0.7, 0.4), 0.05),
    )));

    world.add(Box::new(Sphere::new(
        Vec3A::new(1.6, 0.0, -0.4),
        0.5,
        MaterialType::Dielectric {
            refraction_index: 1.5,
        },
    )));

    world
}

/// Camera for the cover shot.
fn camera_spheres(args: &Args) -> Camera {
    let mut camera = Camera::new();
    camera.image_width = args.width;
    camera.image_height = args.height;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    camera.vfov = 20.0;
    camera.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
    camera.lookat = Vec3A::new(0.0, 0.0, 0.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    camera.defocus_angle = 0.6;
    camera.focus_dist = 10.0;
    camera
}

/// Camera for the table-top cube and mesh scenes.
fn camera_tabletop(args: &Args) -> Camera {
    let mut camera = Camera::new();
    camera.image_width = args.width;
    camera.image_height = args.height;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    camera.vfov = 35.0;
    camera.lookfrom = Vec3A::new(3.0, 2.0, 5.0);
    camera.lookat = Vec3A::new(0.0, 0.2, 0.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    camera.defocus_angle = 0.0;
    camera.focus_dist = 6.0;
    camera
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());
    info!(
        "Lumina - Git Version {} ({})",
        env!("GIT_HASH"),
        env!("GIT_DATE")
    );

    if let Some(seed) = args.seed {
        random::reseed(seed);
        info!("Random generator seeded with {}", seed);
    }

    info!(
        "Image resolution: {}x{}, samples per pixel: {}",
        args.width, args.height, args.samples_per_pixel
    );

    let world = match args.scene {
        Scene::Spheres => scene_spheres(),
        Scene::Cubes => scene_cubes(),
        Scene::Mesh => scene_mesh(),
    };
    info!("Scene contains {} objects", world.len());

    let mut camera = match args.scene {
        Scene::Spheres => camera_spheres(&args),
        Scene::Cubes | Scene::Mesh => camera_tabletop(&args),
    };

    let image = camera.render(&world);

    if args.tev || args.tev_address.is_some() {
        let tev_address = args.tev_address.as_deref().unwrap_or("localhost:14158");
        send_image_to_tev(&image, tev_address, args.width, args.height);
    }

    if args.output.ends_with(".ppm") {
        if let Err(e) = save_image_as_ppm(&image, &args.output) {
            log::error!("Failed to write {}: {}", args.output, e);
            std::process::exit(1);
        }
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output, args.width, args.height);
    } else if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output, args.width, args.height);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .ppm, .png and .exr are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
