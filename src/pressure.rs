//! Equation of state, and the pressure-gradient force between particles.

use std::ops::AddAssign;

use crate::{config::SimParams, kernel::density_kernel_gradient, vec2::Vec2};

/// Counts of per-pair numeric edge cases hit while computing forces. These are handled in place
/// and never abort a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForceDiagnostics {
    /// Contributions dropped because a density we'd divide by was exactly 0.
    pub degenerate_divisions: usize,
    /// Pairs at zero distance, given a random direction.
    pub coincident_pairs: usize,
}

impl AddAssign for ForceDiagnostics {
    fn add_assign(&mut self, rhs: Self) {
        self.degenerate_divisions += rhs.degenerate_divisions;
        self.coincident_pairs += rhs.coincident_pairs;
    }
}

/// Linear equation of state. Negative below the target density.
pub fn density_to_pressure(density: f64, target_density: f64, pressure_multiplier: f64) -> f64 {
    (density - target_density) * pressure_multiplier
}

/// The mean of both particles' pressures; symmetric in its two densities.
pub fn shared_pressure(
    density_a: f64,
    density_b: f64,
    target_density: f64,
    pressure_multiplier: f64,
) -> f64 {
    let p_a = density_to_pressure(density_a, target_density, pressure_multiplier);
    let p_b = density_to_pressure(density_b, target_density, pressure_multiplier);
    (p_a + p_b) / 2.
}

/// The pressure force acting on particle `id_acted_on`, from all other particles.
/// `rand_dir` supplies a unit vector for particle pairs at the same position.
pub fn pressure_force<F>(
    id_acted_on: usize,
    posits: &[Vec2],
    densities: &[f64],
    params: &SimParams,
    rand_dir: &F,
) -> (Vec2, ForceDiagnostics)
where
    F: Fn() -> Vec2,
{
    let mut result = Vec2::new_zero();
    let mut diag = ForceDiagnostics::default();

    let posit_acted_on = posits[id_acted_on];
    let density_acted_on = densities[id_acted_on];

    for (i, posit_actor) in posits.iter().enumerate() {
        if i == id_acted_on {
            continue; // self-interaction.
        }

        let offset = *posit_actor - posit_acted_on;
        let dist = offset.magnitude();

        // Outside the support; skip before touching the RNG or densities.
        if dist > params.smoothing_radius {
            continue;
        }

        let dir = if dist == 0. {
            diag.coincident_pairs += 1;
            rand_dir()
        } else {
            offset / dist // Unit vec
        };

        let density_actor = densities[i];
        if density_actor == 0. {
            diag.degenerate_divisions += 1;
            continue;
        }

        let pressure = shared_pressure(
            density_actor,
            density_acted_on,
            params.target_density,
            params.pressure_multiplier,
        );
        let slope = density_kernel_gradient(params.smoothing_radius, dist);

        result += dir * pressure * slope * params.mass / density_actor;
    }

    (result, diag)
}
