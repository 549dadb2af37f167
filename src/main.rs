//! A 2D fluid of discrete particles, using Smoothed Particle Hydrodynamics (SPH).
//!
//! Each tick estimates density at every particle from its neighbors, derives pressure from the
//! deviation from a target density, and integrates the pressure force and gravity, bouncing
//! particles off the walls of the domain. All pairs are considered; there's no spatial
//! partitioning.

use std::{path::PathBuf, process};

use log::{error, info, warn};

use crate::{
    config::Config,
    render::{NullSink, PngSink, RenderSink},
};

mod boundary;
mod config;
mod density;
mod error;
mod integrate;
mod kernel;
mod parallel;
mod particle_creation;
mod pressure;
mod properties;
mod render;
mod sim;
mod snapshot;
mod vec2;

const SAVE_FILE: &str = "config.sph";

fn main() {
    env_logger::init();

    let path = PathBuf::from(SAVE_FILE);

    let cfg = if path.exists() {
        match Config::load(&path) {
            Ok(cfg) => {
                info!("Loaded config from {SAVE_FILE}");
                cfg
            }
            Err(e) => {
                error!("Unable to load {SAVE_FILE}: {e}");
                process::exit(1);
            }
        }
    } else {
        let cfg = Config::default();
        if let Err(e) = cfg.save(&path) {
            warn!("Unable to save the default config: {e}");
        }
        cfg
    };

    let mut sink: Box<dyn RenderSink> = if cfg.frame_dir.is_empty() {
        Box::new(NullSink)
    } else {
        let (w, h) = cfg.sim.bounds;
        match PngSink::new(
            PathBuf::from(&cfg.frame_dir),
            (w.round() as u32, h.round() as u32),
            cfg.disk_segments,
        ) {
            Ok(sink) => Box::new(sink),
            Err(e) => {
                error!("Unable to set up rendering: {e}");
                process::exit(1);
            }
        }
    };

    if let Err(e) = render::run(&cfg, sink.as_mut()) {
        error!("{e}");
        process::exit(1);
    }
}
