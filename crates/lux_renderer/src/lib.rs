//! Lux Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer: a camera casts jittered rays through every
//! pixel, each ray is traced through a list of surfaces, and the materials
//! it meets decide how light is attenuated and scattered.

mod camera;
mod color;
mod error;
mod hittable;
mod material;
mod ppm;
mod renderer;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use color::{linear_to_gamma, quantize, Color};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use ppm::write_ppm;
pub use renderer::{ray_color, render, render_pixel, sky_gradient, Image, SELF_INTERSECTION_EPSILON};
pub use sphere::Sphere;

/// Re-export common math types from lux_math
pub use lux_math::{Interval, Ray, Vec3};
