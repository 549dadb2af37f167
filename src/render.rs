//! This module drives the simulation from a fixed-interval tick source, and hands position
//! snapshots to a renderer.

use std::{
    f32::consts::TAU,
    fs,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use log::{debug, info};
use plotters::{
    element::Polygon,
    prelude::{BitMapBackend, Color, IntoDrawingArea, RGBColor},
};

use crate::{
    config::Config,
    error::SimError,
    properties::{density_stats, kinetic_energy},
    sim::SimContext,
    snapshot::SnapShot,
};

const BACKGROUND_COLOR: RGBColor = RGBColor(0, 0, 0);
const PARTICLE_COLOR: RGBColor = RGBColor(0, 0, 255);

const MIN_DISK_SEGMENTS: usize = 3;

/// Consumes snapshots after each rendered tick. Drawing never feeds back into the simulation.
pub trait RenderSink {
    fn draw(&mut self, snapshot: &SnapShot) -> Result<(), SimError>;

    /// The current drawable (width, height), if this sink has one. The simulation bounds track
    /// it.
    fn viewport(&self) -> Option<(f64, f64)> {
        None
    }
}

/// Discards snapshots; for headless runs.
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw(&mut self, _snapshot: &SnapShot) -> Result<(), SimError> {
        Ok(())
    }
}

/// Vertices of a triangle fan approximating a disk: the center, then `segments + 1` rim points,
/// with the last repeating the first.
pub fn disk_fan(center: (f32, f32), radius: f32, segments: usize) -> Vec<(f32, f32)> {
    let segments = segments.max(MIN_DISK_SEGMENTS);

    let mut result = Vec::with_capacity(segments + 2);
    result.push(center);

    for i in 0..=segments {
        let θ = TAU * i as f32 / segments as f32;
        result.push((center.0 + radius * θ.cos(), center.1 + radius * θ.sin()));
    }

    result
}

/// A disk's rim in image pixels. The fan's rim, drawn as a filled polygon, covers the same area
/// as its triangles. y is flipped against the height of the snapshot's domain.
fn pixel_rim(center: (f32, f32), snapshot: &SnapShot, segments: usize) -> Vec<(i32, i32)> {
    let height = snapshot.bounds.1;

    disk_fan(center, snapshot.radius, segments)
        .into_iter()
        .skip(1)
        .map(|(x, y)| (x.round() as i32, (height - y).round() as i32))
        .collect()
}

/// Writes one PNG per snapshot. Image pixels map 1:1 to simulation units, with +y up.
pub struct PngSink {
    dir: PathBuf,
    size: (u32, u32),
    segments: usize,
}

impl PngSink {
    pub fn new(dir: PathBuf, size: (u32, u32), segments: usize) -> Result<Self, SimError> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            size,
            segments,
        })
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> SimError {
    SimError::Render(e.to_string())
}

impl RenderSink for PngSink {
    fn draw(&mut self, snapshot: &SnapShot) -> Result<(), SimError> {
        let path = self.dir.join(format!("frame_{:05}.png", snapshot.tick));
        let root = BitMapBackend::new(&path, self.size).into_drawing_area();
        root.fill(&BACKGROUND_COLOR).map_err(render_err)?;

        for posit in &snapshot.posits {
            let rim = pixel_rim(*posit, snapshot, self.segments);
            root.draw(&Polygon::new(rim, PARTICLE_COLOR.filled()))
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;

        Ok(())
    }

    fn viewport(&self) -> Option<(f64, f64)> {
        Some((self.size.0 as f64, self.size.1 as f64))
    }
}

/// Fires at a fixed interval; cooperative, on the calling thread.
pub struct TickSource {
    interval: Duration,
    next: Instant,
}

impl TickSource {
    /// `dt` is in seconds, rounded to whole milliseconds.
    pub fn new(dt: f64) -> Self {
        let ms = (dt * 1_000.).round().max(1.) as u64;
        Self {
            interval: Duration::from_millis(ms),
            next: Instant::now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until the next tick is due. If we've fallen behind, fire immediately, and restart
    /// the schedule from now instead of bursting to catch up.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
            self.next += self.interval;
        } else {
            self.next = now + self.interval;
        }
    }
}

fn hand_off(ctx: &SimContext, sink: &mut dyn RenderSink) -> Result<(), SimError> {
    let snapshot = ctx.snapshot();
    debug!(
        "Rendering tick {} (t = {:.3}s), {} particles",
        snapshot.tick,
        snapshot.time,
        snapshot.posits.len()
    );
    sink.draw(&snapshot)
}

/// Entry point to our tick and render loop. Each tick completes fully before its snapshot is
/// drawn, and before the next tick starts.
pub fn run(cfg: &Config, sink: &mut dyn RenderSink) -> Result<SimContext, SimError> {
    let mut ctx = SimContext::new(cfg)?;
    let mut ticks = TickSource::new(cfg.sim.dt);

    info!(
        "Running {} particles for {} ticks at {:?} per tick. Model: {:?}",
        cfg.sim.particle_count,
        cfg.num_ticks,
        ticks.interval(),
        cfg.fluid_model
    );

    hand_off(&ctx, sink)?;

    for _ in 0..cfg.num_ticks {
        ticks.wait();

        if let Some((width, height)) = sink.viewport() {
            if (width, height) != ctx.params().bounds {
                ctx.resize(width, height)?;
                info!("Bounds now {width} x {height}");
            }
        }

        let report = ctx.step();

        if report.tick % cfg.render_ratio == 0 {
            hand_off(&ctx, sink)?;

            if let Some(stats) = density_stats(ctx.densities(), ctx.params().target_density) {
                info!(
                    "t: {}, ρ mean: {:.3e} min: {:.3e} max: {:.3e} err: {:.2}%, KE: {:.3e}",
                    report.tick,
                    stats.mean,
                    stats.min,
                    stats.max,
                    stats.error * 100.,
                    kinetic_energy(ctx.vels(), ctx.params().mass),
                );
            }
        }
    }

    info!("Run complete after {:.2}s simulated.", ctx.time_elapsed());
    Ok(ctx)
}
