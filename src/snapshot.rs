//! Read-only copies of particle positions, handed to the renderer after a tick.

use crate::vec2::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct SnapShot {
    pub tick: usize,
    pub time: f32,
    // To save memory, we store snapshots as f32; we only need f64 precision during the
    // integration.
    pub posits: Vec<(f32, f32)>,
    /// Shared by all particles.
    pub radius: f32,
    /// (width, height) of the domain the positions lie in.
    pub bounds: (f32, f32),
}

pub fn vec_to_f32(v: Vec2) -> (f32, f32) {
    (v.x as f32, v.y as f32)
}

impl SnapShot {
    pub fn new(tick: usize, time: f64, posits: &[Vec2], radius: f64, bounds: (f64, f64)) -> Self {
        Self {
            tick,
            time: time as f32,
            posits: posits.iter().copied().map(vec_to_f32).collect(),
            radius: radius as f32,
            bounds: (bounds.0 as f32, bounds.1 as f32),
        }
    }
}
