//! Simulation parameters and the start-of-run configuration.

use std::{fs, path::Path};

use bincode::{Decode, Encode};

use crate::error::{ConfigError, SimError};

#[derive(Clone, Copy, Debug, PartialEq, Default, Encode, Decode)]
pub enum FluidModel {
    /// Density, pressure, and gravity.
    #[default]
    Sph,
    /// Gravity and wall bounces only; no pressure force.
    Ballistic,
}

/// Physical parameters, shared by all particles. Distances are in pixels, time in seconds.
#[derive(Clone, Debug, PartialEq, Encode, Decode)]
pub struct SimParams {
    pub particle_count: usize,
    pub mass: f64,
    /// For rendering, and wall collisions.
    pub radius: f64,
    /// Kernel support.
    pub smoothing_radius: f64,
    pub target_density: f64,
    pub pressure_multiplier: f64,
    /// Acceleration along y. Negative is down.
    pub gravity: f64,
    pub dt: f64,
    /// Velocity retained on a wall bounce. 1 is perfectly elastic.
    pub restitution: f64,
    /// (width, height), with the origin at the lower left.
    pub bounds: (f64, f64),
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            particle_count: 800,
            mass: 1.,
            radius: 4.,
            smoothing_radius: 35.,
            // Close to the density of the initial grid at the default spacing.
            target_density: 3.0e-4,
            pressure_multiplier: 2.0e4,
            gravity: -200.,
            dt: 1. / 60.,
            restitution: 1.,
            bounds: (1_024., 576.),
        }
    }
}

fn positive(val: f64, err: fn(f64) -> ConfigError) -> Result<(), ConfigError> {
    // Written this way so NaN fails too.
    if val > 0. && val.is_finite() {
        Ok(())
    } else {
        Err(err(val))
    }
}

fn finite(val: f64, name: &'static str) -> Result<(), ConfigError> {
    if val.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(name))
    }
}

impl SimParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::ParticleCount(self.particle_count));
        }

        positive(self.mass, ConfigError::Mass)?;
        positive(self.radius, ConfigError::Radius)?;
        positive(self.smoothing_radius, ConfigError::SmoothingRadius)?;
        positive(self.dt, ConfigError::DeltaTime)?;

        if !(0. ..=1.).contains(&self.restitution) {
            return Err(ConfigError::Restitution(self.restitution));
        }

        finite(self.target_density, "target density")?;
        finite(self.pressure_multiplier, "pressure multiplier")?;
        finite(self.gravity, "gravity")?;

        self.validate_bounds(self.bounds)
    }

    /// Both sides must fit a whole particle.
    pub fn validate_bounds(&self, bounds: (f64, f64)) -> Result<(), ConfigError> {
        let (width, height) = bounds;
        let min = 2. * self.radius;

        if width >= min && height >= min && width.is_finite() && height.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::Bounds {
                width,
                height,
                radius: self.radius,
            })
        }
    }
}

#[derive(Clone, Debug, PartialEq, Encode, Decode)]
pub struct Config {
    pub sim: SimParams,
    /// Gap between neighboring particle edges, in the initial grid.
    pub spacing: f64,
    pub num_ticks: usize,
    /// Hand a snapshot to the renderer every this many ticks.
    pub render_ratio: usize,
    /// Triangle fan segments per rendered disk.
    pub disk_segments: usize,
    pub rng_seed: u64,
    /// Run passes on the thread pool at or above this particle count.
    pub parallel_threshold: usize,
    pub fluid_model: FluidModel,
    /// Where rendered frames go. Empty to skip rendering.
    pub frame_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sim: Default::default(),
            spacing: 4.,
            num_ticks: 600,
            render_ratio: 6,
            disk_segments: 100,
            rng_seed: 0,
            parallel_threshold: 256,
            fluid_model: Default::default(),
            frame_dir: "frames".to_owned(),
        }
    }
}

impl Config {
    /// Bouncing balls: no fluid forces, and lossy wall collisions.
    pub fn bouncing() -> Self {
        Self {
            sim: SimParams {
                radius: 10.,
                // -0.5 px per frame², at 60 frames per second.
                gravity: -1_800.,
                restitution: 0.8,
                ..Default::default()
            },
            spacing: 10.,
            fluid_model: FluidModel::Ballistic,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sim.validate()?;

        if !(self.spacing >= 0. && self.spacing.is_finite()) {
            return Err(ConfigError::Spacing(self.spacing));
        }
        if self.render_ratio == 0 {
            return Err(ConfigError::RenderRatio);
        }

        Ok(())
    }

    /// Load the config.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let bytes = fs::read(path)?;
        let (result, _len): (Self, usize) =
            bincode::decode_from_slice(&bytes, bincode::config::standard())?;

        result.validate()?;
        Ok(result)
    }

    pub fn save(&self, path: &Path) -> Result<(), SimError> {
        let bytes = bincode::encode_to_vec(self, bincode::config::standard())?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
