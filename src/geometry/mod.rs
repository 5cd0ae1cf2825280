//! Tolerant geometric primitives shared by the whole cut pipeline.

pub use self::aabb::Aabb;
pub use self::plane::{Plane, PlaneSide};
pub use self::ray::{Ray, RayCrossing};
pub use self::tolerance::{PointOnEdge, Tolerances};

mod aabb;
mod plane;
mod ray;
mod tolerance;
