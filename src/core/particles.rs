//! Decorative particle field.
//!
//! A batch of [`ParticleDescriptor`]s is generated once when the background
//! is mounted and never regenerated, so the layout stays stable for the
//! lifetime of the owning component.  Motion is a pure function of elapsed
//! time, see [`ParticleDescriptor::sample`].

use std::f64::consts::TAU;
use std::ops::Range;

use rand::Rng;

/// Size range, in abstract units (the renderer maps these to glyphs).
pub const SIZE_RANGE: Range<f64> = 2.0..6.0;
/// Length of one motion cycle, seconds.
pub const DURATION_RANGE: Range<f64> = 10.0..20.0;
/// Start delay, seconds.
pub const DELAY_RANGE: Range<f64> = 0.0..5.0;

/// Vertical float amplitude for [`AnimationVariant::Variant1`], in percent.
const FLOAT_AMPLITUDE: f64 = 3.0;
/// Orbit radius for [`AnimationVariant::Variant2`], in percent.
const DRIFT_RADIUS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleShape {
    Circle,
    Square,
    Triangle,
}

impl ParticleShape {
    pub const ALL: [ParticleShape; 3] = [Self::Circle, Self::Square, Self::Triangle];
}

/// Which pre-declared motion pattern a particle follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationVariant {
    /// Float up and down.
    Variant1,
    /// Drift around a small circle.
    Variant2,
    /// Pulse in place.
    Variant3,
}

impl AnimationVariant {
    pub const ALL: [AnimationVariant; 3] = [Self::Variant1, Self::Variant2, Self::Variant3];
}

/// One decorative background shape.  Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleDescriptor {
    /// Horizontal position, percent of the field width, in `[0, 100)`.
    pub x_percent: f64,
    /// Vertical position, percent of the field height, in `[0, 100)`.
    pub y_percent: f64,
    pub size: f64,
    pub duration_secs: f64,
    pub delay_secs: f64,
    pub shape: ParticleShape,
    pub variant: AnimationVariant,
}

/// Where and how a particle should be drawn at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub x_percent: f64,
    pub y_percent: f64,
    /// Size multiplier, `1.0` at rest.
    pub scale: f64,
    /// `0.0..=1.0`.
    pub opacity: f64,
}

impl ParticleDescriptor {
    /// Fraction of the current motion cycle at `elapsed_secs`, in `[0, 1)`.
    pub fn phase(&self, elapsed_secs: f64) -> f64 {
        let t = elapsed_secs.max(0.0) + self.delay_secs;
        (t / self.duration_secs).rem_euclid(1.0)
    }

    /// Sample this particle's motion pattern at `elapsed_secs`.
    pub fn sample(&self, elapsed_secs: f64) -> ParticleFrame {
        let angle = self.phase(elapsed_secs) * TAU;
        let mut frame = ParticleFrame {
            x_percent: self.x_percent,
            y_percent: self.y_percent,
            scale: 1.0,
            opacity: 0.6,
        };
        match self.variant {
            AnimationVariant::Variant1 => {
                frame.y_percent -= FLOAT_AMPLITUDE * angle.sin();
            }
            AnimationVariant::Variant2 => {
                frame.x_percent += DRIFT_RADIUS * angle.cos();
                frame.y_percent += DRIFT_RADIUS * angle.sin();
            }
            AnimationVariant::Variant3 => {
                let wave = 0.5 + 0.5 * angle.sin();
                frame.scale = 0.5 + wave;
                frame.opacity = 0.3 + 0.7 * wave;
            }
        }
        frame.x_percent = frame.x_percent.clamp(0.0, 99.999);
        frame.y_percent = frame.y_percent.clamp(0.0, 99.999);
        frame
    }
}

/// Generate `count` independently sampled particles from `rng`.
pub fn generate_with<R: Rng>(count: usize, rng: &mut R) -> Vec<ParticleDescriptor> {
    (0..count)
        .map(|_| ParticleDescriptor {
            x_percent: rng.gen_range(0.0..100.0),
            y_percent: rng.gen_range(0.0..100.0),
            size: rng.gen_range(SIZE_RANGE),
            duration_secs: rng.gen_range(DURATION_RANGE),
            delay_secs: rng.gen_range(DELAY_RANGE),
            shape: ParticleShape::ALL[rng.gen_range(0..ParticleShape::ALL.len())],
            variant: AnimationVariant::ALL[rng.gen_range(0..AnimationVariant::ALL.len())],
        })
        .collect()
}

/// Generate `count` particles from the thread-local random source.
pub fn generate(count: usize) -> Vec<ParticleDescriptor> {
    generate_with(count, &mut rand::thread_rng())
}
