//! The three passes of a tick. Each pass reads only arrays that no particle writes during that
//! pass, computes every particle's new values, then commits them. A pass finishes for all
//! particles before the next starts.

use crate::{
    boundary::resolve_boundary,
    config::SimParams,
    density::estimate_density,
    parallel::map_indexed,
    pressure::{pressure_force, ForceDiagnostics},
    vec2::Vec2,
};

/// Pass 1: apply gravity, predict each position, and sample density at the prediction. Density is
/// sampled against the current, not predicted, positions.
pub fn predict_and_sample_density(
    posits: &[Vec2],
    vels: &mut [Vec2],
    posits_predicted: &mut [Vec2],
    densities: &mut [f64],
    params: &SimParams,
    parallel: bool,
) {
    let out = map_indexed(posits.len(), parallel, |i| {
        let mut vel = vels[i];
        vel.y += params.gravity * params.dt;

        let predicted = posits[i] + vel * params.dt;
        let density = estimate_density(predicted, posits, params.mass, params.smoothing_radius);

        (vel, predicted, density)
    });

    for (i, (vel, predicted, density)) in out.into_iter().enumerate() {
        vels[i] = vel;
        posits_predicted[i] = predicted;
        densities[i] = density;
    }
}

/// Pass 2: accelerate each particle by its pressure force divided by its density. A particle
/// with zero density isn't accelerated, and is counted as a degenerate division.
pub fn apply_pressure<F>(
    posits: &[Vec2],
    densities: &[f64],
    vels: &mut [Vec2],
    params: &SimParams,
    parallel: bool,
    rand_dir: &F,
) -> ForceDiagnostics
where
    F: Fn() -> Vec2 + Sync,
{
    let out = map_indexed(posits.len(), parallel, |i| {
        let (force, mut diag) = pressure_force(i, posits, densities, params, rand_dir);

        let accel = if densities[i] == 0. {
            diag.degenerate_divisions += 1;
            Vec2::new_zero()
        } else {
            force / densities[i]
        };

        (vels[i] + accel * params.dt, diag)
    });

    let mut result = ForceDiagnostics::default();
    for (i, (vel, diag)) in out.into_iter().enumerate() {
        vels[i] = vel;
        result += diag;
    }

    result
}

/// Pass 3: move each particle by its velocity, then bounce it off any wall it crossed.
pub fn advance_posits(posits: &mut [Vec2], vels: &mut [Vec2], params: &SimParams, parallel: bool) {
    let out = map_indexed(posits.len(), parallel, |i| {
        let mut posit = posits[i] + vels[i] * params.dt;
        let mut vel = vels[i];

        resolve_boundary(
            &mut posit,
            &mut vel,
            params.radius,
            params.bounds,
            params.restitution,
        );

        (posit, vel)
    });

    for (i, (posit, vel)) in out.into_iter().enumerate() {
        posits[i] = posit;
        vels[i] = vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::density_kernel;

    fn params() -> SimParams {
        SimParams {
            particle_count: 2,
            mass: 1.,
            smoothing_radius: 2.,
            gravity: -10.,
            dt: 0.1,
            radius: 0.1,
            bounds: (100., 100.),
            restitution: 1.,
            ..Default::default()
        }
    }

    #[test]
    fn pass_1_predicts_and_samples_current_posits() {
        let params = params();
        let posits = [Vec2::new(50., 50.), Vec2::new(51., 50.)];
        let mut vels = [Vec2::new(0., 0.), Vec2::new(0., 0.)];
        let mut predicted = [Vec2::new_zero(); 2];
        let mut densities = [0.; 2];

        predict_and_sample_density(&posits, &mut vels, &mut predicted, &mut densities, &params, false);

        // v.y = -10 · 0.1; predicted moves by v · dt.
        assert_eq!(vels[0], Vec2::new(0., -1.));
        assert_eq!(predicted[0], Vec2::new(50., 49.9));

        // The sample point is offset by 0.1 from its own current position.
        let d_self = density_kernel(2., 0.1);
        let d_other = density_kernel(2., (1f64 + 0.01).sqrt());
        assert!((densities[0] - (d_self + d_other)).abs() < 1e-12);
    }

    #[test]
    fn pass_2_zero_density_not_accelerated() {
        let params = params();
        let posits = [Vec2::new(50., 50.), Vec2::new(50.5, 50.)];
        let densities = [0., 0.];
        let mut vels = [Vec2::new(1., 1.), Vec2::new(2., 2.)];

        let diag = apply_pressure(&posits, &densities, &mut vels, &params, false, &|| {
            Vec2::new(1., 0.)
        });

        assert_eq!(vels, [Vec2::new(1., 1.), Vec2::new(2., 2.)]);
        // One dropped neighbor term, and one dropped acceleration, per particle.
        assert_eq!(diag.degenerate_divisions, 4);
    }

    #[test]
    fn pass_3_moves_then_bounces() {
        let params = params();
        let mut posits = [Vec2::new(50., 50.), Vec2::new(0.15, 50.)];
        let mut vels = [Vec2::new(10., 0.), Vec2::new(-1., 0.)];

        advance_posits(&mut posits, &mut vels, &params, false);

        assert_eq!(posits[0], Vec2::new(51., 50.));
        assert_eq!(vels[0], Vec2::new(10., 0.));
        assert_eq!(posits[1].x, params.radius);
        assert_eq!(vels[1].x, 1.);
    }
}
