//! Primary vertex smearing over the target volume
use rand::distributions::{Distribution, Uniform};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::config::ConfigError;
use crate::data::VertexPoint;

/// Target geometry in mm
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// Half width in x
    pub delta_x: f64,
    /// Half width in y
    pub delta_y: f64,
    /// Position of the target centre along z
    pub z_position: f64,
    /// Target thickness along z
    pub thickness: f64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            delta_x: 10.0,
            delta_y: 20.0,
            z_position: 0.0,
            thickness: 0.35,
        }
    }
}

impl TargetConfig {
    /// Check that all extents are finite and non-negative, and that the
    /// resulting sampling ranges do not overflow
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extents = [
            ("delta_x", self.delta_x),
            ("delta_y", self.delta_y),
            ("thickness", self.thickness),
        ];
        for (name, value) in extents {
            if !value.is_finite() || value < 0. {
                return Err(ConfigError::BadTarget { name, value });
            }
        }
        if !self.z_position.is_finite() {
            return Err(ConfigError::BadTarget {
                name: "z_position",
                value: self.z_position,
            });
        }
        let [x, y, z] = self.ranges();
        check_range("delta_x", self.delta_x, x)?;
        check_range("delta_y", self.delta_y, y)?;
        check_range("thickness", self.thickness, z)?;
        Ok(())
    }

    fn ranges(&self) -> [(f64, f64); 3] {
        let half_thickness = self.thickness / 2.;
        [
            (-self.delta_x, self.delta_x),
            (-self.delta_y, self.delta_y),
            (
                self.z_position - half_thickness,
                self.z_position + half_thickness,
            ),
        ]
    }
}

// `Uniform::new_inclusive` divides the width by the largest sample below 1
fn check_range(
    name: &'static str,
    value: f64,
    (low, high): (f64, f64),
) -> Result<(), ConfigError> {
    let width = (high - low) / (1. - f64::EPSILON);
    if low.is_finite() && high.is_finite() && width.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::BadTarget { name, value })
    }
}

/// Draws one vertex per event, uniformly distributed inside the target
///
/// The default generator is the thread-local one, so samplers on
/// different threads draw independently.
#[derive(Debug, Clone)]
pub struct VertexSampler<R = ThreadRng> {
    rng: R,
    x: Uniform<f64>,
    y: Uniform<f64>,
    z: Uniform<f64>,
}

impl VertexSampler<ThreadRng> {
    pub fn new(config: &TargetConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl VertexSampler<StdRng> {
    /// Sampler producing a reproducible sequence of vertices
    pub fn seeded(config: &TargetConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> VertexSampler<R> {
    pub fn with_rng(config: &TargetConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let [(x_low, x_high), (y_low, y_high), (z_low, z_high)] = config.ranges();
        Ok(Self {
            rng,
            x: Uniform::new_inclusive(x_low, x_high),
            y: Uniform::new_inclusive(y_low, y_high),
            z: Uniform::new_inclusive(z_low, z_high),
        })
    }

    /// Draw the next vertex
    pub fn sample(&mut self) -> VertexPoint {
        VertexPoint {
            x: self.x.sample(&mut self.rng),
            y: self.y.sample(&mut self.rng),
            z: self.z.sample(&mut self.rng),
        }
    }
}
