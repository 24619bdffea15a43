// use crate::all::*;

// Eigen-like aliases.
pub type Vector2d = nalgebra::Vector2::<f64>;
pub type Matrix2d = nalgebra::Matrix2::<f64>;

// Frame numbers are whole and non-negative once they enter the engine.
pub type FrameNumber = u64;

// Screen-space point, y grows downwards.
pub type Pixel = Vector2d;
