//! Spatial helpers for the spherical world

pub mod sphere;

pub use sphere::{
    is_on_surface, project_to_surface, random_surface_point, step_toward_on_surface,
    surface_normal, surface_offset, surface_point,
};
