use std::f32::consts::PI;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use isostitch_geom::Vec3;
use serde::{Deserialize, Serialize};

/// Scalar field sampled at world positions. Implementations must be pure:
/// the same position always yields the same density, from any thread.
pub trait DensityField: Send + Sync {
    fn density(&self, p: Vec3) -> f32;
}

impl<F> DensityField for F
where
    F: Fn(Vec3) -> f32 + Send + Sync,
{
    #[inline]
    fn density(&self, p: Vec3) -> f32 {
        self(p)
    }
}

/// `density = y - height`; the surface is the horizontal plane at `height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneField {
    pub height: f32,
}

impl DensityField for PlaneField {
    #[inline]
    fn density(&self, p: Vec3) -> f32 {
        p.y - self.height
    }
}

/// Signed distance to a sphere, positive outside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereField {
    pub center: Vec3,
    pub radius: f32,
}

impl DensityField for SphereField {
    #[inline]
    fn density(&self, p: Vec3) -> f32 {
        p.distance(self.center) - self.radius
    }
}

/// Product of six `sin(pi * perlin2d)` terms over every ordered axis pair.
/// Values land in `[0, 1]`.
pub struct PerlinProductField {
    noise: FastNoiseLite,
    seed_offset: f32,
}

impl PerlinProductField {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(1.0));
        Self {
            noise,
            seed_offset: seed as f32,
        }
    }

    #[inline]
    fn term(&self, a: f32, b: f32) -> f32 {
        let n = self
            .noise
            .get_noise_2d(a + self.seed_offset, b + self.seed_offset);
        let n01 = ((n + 1.0) * 0.5).clamp(0.0, 1.0);
        (PI * n01).sin().max(0.0)
    }
}

impl DensityField for PerlinProductField {
    fn density(&self, p: Vec3) -> f32 {
        let x = p.x;
        let y = p.y + 1.0;
        let z = p.z + 2.0;
        self.term(x, y)
            * self.term(x, z)
            * self.term(y, z)
            * self.term(y, x)
            * self.term(z, x)
            * self.term(z, y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fractal {
    #[serde(default = "default_octaves")]
    pub octaves: i32,
    #[serde(default = "default_persistence")]
    pub persistence: f32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
}
fn default_octaves() -> i32 {
    4
}
fn default_persistence() -> f32 {
    0.5
}
fn default_lacunarity() -> f32 {
    2.0
}
fn default_scale() -> f32 {
    1.5
}
impl Default for Fractal {
    fn default() -> Self {
        Self {
            octaves: default_octaves(),
            persistence: default_persistence(),
            lacunarity: default_lacunarity(),
            scale: default_scale(),
        }
    }
}

/// Fractal OpenSimplex2 noise in `[0, 1]`, optionally biased downward with
/// height so the field reads as terrain.
pub struct LayeredNoiseField {
    noise: FastNoiseLite,
    fractal: Fractal,
    vertical_gradient: f32,
    ground_level: f32,
}

impl LayeredNoiseField {
    pub fn new(seed: i32, fractal: Fractal, vertical_gradient: f32, ground_level: f32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        Self {
            noise,
            fractal,
            vertical_gradient,
            ground_level,
        }
    }
}

impl DensityField for LayeredNoiseField {
    fn density(&self, p: Vec3) -> f32 {
        let n = fractal3(&self.noise, p.x, p.y, p.z, &self.fractal);
        let base = (n + 1.0) * 0.5;
        (base - self.vertical_gradient * (p.y - self.ground_level)).clamp(0.0, 1.0)
    }
}

fn fractal3(noise: &FastNoiseLite, x: f32, y: f32, z: f32, fractal: &Fractal) -> f32 {
    let mut amp = 1.0_f32;
    let mut freq = 1.0_f32 / fractal.scale.max(0.0001);
    let mut sum = 0.0_f32;
    let mut max_amp = 0.0_f32;
    for _ in 0..fractal.octaves.max(1) {
        sum += noise.get_noise_3d(x * freq, y * freq, z * freq) * amp;
        max_amp += amp;
        amp *= fractal.persistence;
        freq *= fractal.lacunarity;
    }
    if max_amp > 0.0 { sum / max_amp } else { sum }
}

/// Field selection as it appears under `[field]` in the config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConfig {
    Plane {
        #[serde(default)]
        height: f32,
    },
    Sphere {
        #[serde(default)]
        center: [f32; 3],
        #[serde(default = "default_radius")]
        radius: f32,
    },
    PerlinProduct {
        #[serde(default)]
        seed: i32,
    },
    Layered {
        #[serde(default)]
        seed: i32,
        #[serde(default)]
        vertical_gradient: f32,
        #[serde(default)]
        ground_level: f32,
        #[serde(default)]
        fractal: Fractal,
    },
}
fn default_radius() -> f32 {
    1.0
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig::PerlinProduct { seed: 0 }
    }
}

impl FieldConfig {
    /// Replaces the seed of noise-backed fields; analytic fields are unchanged.
    pub fn with_seed(self, new_seed: i32) -> Self {
        match self {
            FieldConfig::PerlinProduct { .. } => FieldConfig::PerlinProduct { seed: new_seed },
            FieldConfig::Layered {
                fractal,
                vertical_gradient,
                ground_level,
                ..
            } => FieldConfig::Layered {
                seed: new_seed,
                fractal,
                vertical_gradient,
                ground_level,
            },
            other => other,
        }
    }

    pub fn build(&self) -> Box<dyn DensityField> {
        match *self {
            FieldConfig::Plane { height } => Box::new(PlaneField { height }),
            FieldConfig::Sphere { center, radius } => Box::new(SphereField {
                center: Vec3::from(center),
                radius,
            }),
            FieldConfig::PerlinProduct { seed } => Box::new(PerlinProductField::new(seed)),
            FieldConfig::Layered {
                seed,
                fractal,
                vertical_gradient,
                ground_level,
            } => Box::new(LayeredNoiseField::new(
                seed,
                fractal,
                vertical_gradient,
                ground_level,
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldConfig::Plane { .. } => "plane",
            FieldConfig::Sphere { .. } => "sphere",
            FieldConfig::PerlinProduct { .. } => "perlin_product",
            FieldConfig::Layered { .. } => "layered",
        }
    }
}
