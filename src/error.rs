//! Configuration and run-time errors.

use std::io;

use thiserror::Error;

/// A parameter the simulation can't run with. Reported before any tick runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle count must be positive (got {0})")]
    ParticleCount(usize),
    #[error("particle mass must be positive (got {0})")]
    Mass(f64),
    #[error("particle radius must be positive (got {0})")]
    Radius(f64),
    #[error("smoothing radius must be positive (got {0})")]
    SmoothingRadius(f64),
    #[error("time step must be positive (got {0})")]
    DeltaTime(f64),
    #[error("restitution must be in [0, 1] (got {0})")]
    Restitution(f64),
    #[error("bounds ({width}, {height}) can't contain a particle of radius {radius}")]
    Bounds { width: f64, height: f64, radius: f64 },
    #[error("{0} must be finite")]
    NonFinite(&'static str),
    #[error("particle spacing must be non-negative (got {0})")]
    Spacing(f64),
    #[error("render ratio must be positive")]
    RenderRatio,
    #[error("expected {expected} particles, but {name} has {actual}")]
    ArrayLen {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("config file: {0}")]
    Io(#[from] io::Error),
    #[error("unable to decode config: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("unable to encode config: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("render failed: {0}")]
    Render(String),
}
