//! Aggregate properties of the particle field, for diagnostics.

use crate::vec2::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Mean of |ρ - ρ_target|, relative to the target when it's nonzero.
    pub error: f64,
}

/// Returns `None` for an empty field.
pub fn density_stats(densities: &[f64], target_density: f64) -> Option<DensityStats> {
    if densities.is_empty() {
        return None;
    }

    let (min, max) = densities
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), d| {
            (min.min(*d), max.max(*d))
        });

    let n = densities.len() as f64;
    let mean = densities.iter().sum::<f64>() / n;

    let mut error = densities
        .iter()
        .map(|d| (d - target_density).abs())
        .sum::<f64>()
        / n;

    if target_density != 0. {
        error /= target_density.abs();
    }

    Some(DensityStats {
        min,
        max,
        mean,
        error,
    })
}

/// Total kinetic energy, ½ m Σ |v|².
pub fn kinetic_energy(vels: &[Vec2], mass: f64) -> f64 {
    0.5 * mass * vels.iter().map(|v| v.magnitude_squared()).sum::<f64>()
}
