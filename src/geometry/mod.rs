mod aabb;

pub use aabb::*;
