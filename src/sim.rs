//! The simulation context: owns the particle arrays and parameters, and runs one fixed step per
//! tick.

use std::{
    f64::consts::TAU,
    sync::{Mutex, PoisonError},
};

use log::{trace, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    boundary::resolve_boundary,
    config::{Config, FluidModel, SimParams},
    density::estimate_density,
    error::ConfigError,
    integrate::{advance_posits, apply_pressure, predict_and_sample_density},
    particle_creation::make_particles_grid,
    snapshot::SnapShot,
    vec2::Vec2,
};

/// What happened during one tick, beyond the particle state itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// 1-based index of the completed tick.
    pub tick: usize,
    pub degenerate_divisions: usize,
    pub coincident_pairs: usize,
}

/// Particle `i` is described by index `i` of each array. All arrays are `particle_count` long for
/// the life of the context.
pub struct SimContext {
    params: SimParams,
    model: FluidModel,
    parallel: bool,
    posits: Vec<Vec2>,
    /// Scratch; only meaningful within a tick.
    posits_predicted: Vec<Vec2>,
    vels: Vec<Vec2>,
    densities: Vec<f64>,
    /// Only used to pick a direction between coincident particles.
    rng: Mutex<StdRng>,
    tick: usize,
    time_elapsed: f64,
}

impl SimContext {
    /// Place particles at rest on a centered grid.
    pub fn new(cfg: &Config) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let sim = &cfg.sim;
        let mut posits = make_particles_grid(sim.particle_count, sim.radius, cfg.spacing, sim.bounds);
        let mut vels = vec![Vec2::new_zero(); sim.particle_count];

        // A grid too large for the domain would otherwise start outside it.
        for (posit, vel) in posits.iter_mut().zip(vels.iter_mut()) {
            resolve_boundary(posit, vel, sim.radius, sim.bounds, sim.restitution);
        }

        let mut result = Self::from_particles(sim.clone(), posits, vels, cfg.rng_seed)?;
        result.model = cfg.fluid_model;
        result.parallel = sim.particle_count >= cfg.parallel_threshold;

        Ok(result)
    }

    /// Build from explicit particle state. Runs sequentially, with the SPH model.
    pub fn from_particles(
        params: SimParams,
        posits: Vec<Vec2>,
        vels: Vec<Vec2>,
        rng_seed: u64,
    ) -> Result<Self, ConfigError> {
        params.validate()?;

        for (name, len) in [("positions", posits.len()), ("velocities", vels.len())] {
            if len != params.particle_count {
                return Err(ConfigError::ArrayLen {
                    name,
                    expected: params.particle_count,
                    actual: len,
                });
            }
        }

        let densities = posits
            .iter()
            .map(|p| estimate_density(*p, &posits, params.mass, params.smoothing_radius))
            .collect();

        Ok(Self {
            posits_predicted: posits.clone(),
            posits,
            vels,
            densities,
            params,
            model: FluidModel::Sph,
            parallel: false,
            rng: Mutex::new(StdRng::seed_from_u64(rng_seed)),
            tick: 0,
            time_elapsed: 0.,
        })
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Advance by one fixed time step.
    pub fn step(&mut self) -> TickReport {
        let p = &self.params;

        predict_and_sample_density(
            &self.posits,
            &mut self.vels,
            &mut self.posits_predicted,
            &mut self.densities,
            p,
            self.parallel,
        );

        let mut result = TickReport {
            tick: self.tick + 1,
            ..Default::default()
        };

        if self.model == FluidModel::Sph {
            let rng = &self.rng;
            let rand_dir = || {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                Vec2::from_angle(rng.random_range(0. ..TAU))
            };

            let diag = apply_pressure(
                &self.posits,
                &self.densities,
                &mut self.vels,
                p,
                self.parallel,
                &rand_dir,
            );

            result.degenerate_divisions = diag.degenerate_divisions;
            result.coincident_pairs = diag.coincident_pairs;
        }

        advance_posits(&mut self.posits, &mut self.vels, p, self.parallel);

        self.tick += 1;
        self.time_elapsed += p.dt;

        if result.degenerate_divisions > 0 {
            warn!(
                "Tick {}: {} pressure terms dropped on zero density",
                result.tick, result.degenerate_divisions
            );
        }
        if result.coincident_pairs > 0 {
            trace!(
                "Tick {}: {} coincident particle pairs given a random direction",
                result.tick,
                result.coincident_pairs
            );
        }

        result
    }

    /// Track a new drawable area. Particles outside it are brought back in on the next tick.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ConfigError> {
        self.params.validate_bounds((width, height))?;
        self.params.bounds = (width, height);
        Ok(())
    }

    pub fn snapshot(&self) -> SnapShot {
        SnapShot::new(
            self.tick,
            self.time_elapsed,
            &self.posits,
            self.params.radius,
            self.params.bounds,
        )
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn posits(&self) -> &[Vec2] {
        &self.posits
    }

    pub fn posits_predicted(&self) -> &[Vec2] {
        &self.posits_predicted
    }

    pub fn vels(&self) -> &[Vec2] {
        &self.vels
    }

    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn time_elapsed(&self) -> f64 {
        self.time_elapsed
    }
}
