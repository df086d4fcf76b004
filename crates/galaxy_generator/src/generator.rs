use std::f32::consts::TAU;

use bevy::color::Mix;
use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::{StdRng, ThreadRng};

use crate::{GalaxyError, GalaxyParams};

/// Output of one generation: parallel per-particle positions and colors.
///
/// Index `i` in both sequences describes the same particle. Colors are sRGB
/// components in `[0, 1]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleBuffer {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

impl ParticleBuffer {
    fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions as `x, y, z, x, y, z, ...`.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as `r, g, b, r, g, b, ...`.
    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Galaxy generator bound to a random source.
///
/// Production use draws from the thread-local generator; tests and
/// reproducible runs use [`GalaxyGenerator::seeded`].
pub struct GalaxyGenerator<R = ThreadRng> {
    rng: R,
}

impl GalaxyGenerator<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for GalaxyGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl GalaxyGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> GalaxyGenerator<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, params: &GalaxyParams) -> Result<ParticleBuffer, GalaxyError> {
        generate(params, &mut self.rng)
    }
}

/// Builds a spiral galaxy point cloud.
///
/// Every particle draws its radius first, then a magnitude and a sign for
/// each of the x, y and z jitter offsets, in that order.
pub fn generate<R: Rng + ?Sized>(
    params: &GalaxyParams,
    rng: &mut R,
) -> Result<ParticleBuffer, GalaxyError> {
    params.validate()?;

    let mut buffer = ParticleBuffer::with_capacity(params.count);
    let branches = params.branches as usize;

    for i in 0..params.count {
        let radius = rng.random::<f32>() * params.radius;
        let spin_angle = radius * params.spin;
        let branch_angle = (i % branches) as f32 / branches as f32 * TAU;

        let offset = vec3(
            jitter(rng, params),
            jitter(rng, params),
            jitter(rng, params),
        );

        let angle = branch_angle + spin_angle;
        let position = vec3(angle.cos() * radius, 0.0, angle.sin() * radius) + offset;
        buffer.positions.push(position.to_array());

        // radius < params.radius, so the factor stays in [0, 1)
        let mixed = params
            .inside_color
            .mix(&params.outside_color, radius / params.radius);
        buffer.colors.push([mixed.red, mixed.green, mixed.blue]);
    }

    Ok(buffer)
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, params: &GalaxyParams) -> f32 {
    let magnitude = rng.random::<f32>().powf(params.randomness_power) * params.randomness;
    if rng.random_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn flat_params(count: usize) -> GalaxyParams {
        GalaxyParams {
            count,
            radius: 10.0,
            branches: 2,
            spin: 0.0,
            randomness: 0.0,
            randomness_power: 1.0,
            inside_color: Srgba::WHITE,
            outside_color: Srgba::BLACK,
            ..default()
        }
    }

    #[test]
    fn buffer_sizes_match_count() {
        let params = GalaxyParams {
            count: 1000,
            ..default()
        };
        let buffer = GalaxyGenerator::seeded(1).generate(&params).unwrap();
        assert_eq!(buffer.len(), 1000);
        assert_eq!(buffer.colors.len(), 1000);
        assert_eq!(buffer.flat_positions().len(), 3000);
        assert_eq!(buffer.flat_colors().len(), 3000);
    }

    #[test]
    fn zero_count_yields_empty_buffer() {
        let params = GalaxyParams {
            count: 0,
            ..default()
        };
        let buffer = GalaxyGenerator::new().generate(&params).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.colors.is_empty());
    }

    #[test]
    fn colors_stay_in_unit_range() {
        let params = GalaxyParams {
            count: 5000,
            ..default()
        };
        let buffer = GalaxyGenerator::seeded(7).generate(&params).unwrap();
        for color in buffer.flat_colors() {
            assert!((0.0..=1.0).contains(color), "{color} out of range");
        }
    }

    #[test]
    fn same_seed_same_buffer() {
        let params = GalaxyParams {
            count: 2000,
            ..default()
        };
        let a = GalaxyGenerator::seeded(42).generate(&params).unwrap();
        let b = GalaxyGenerator::seeded(42).generate(&params).unwrap();
        assert_eq!(a, b);

        let c = GalaxyGenerator::seeded(43).generate(&params).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn free_function_matches_generator() {
        let params = GalaxyParams {
            count: 100,
            ..default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        let a = generate(&params, &mut rng).unwrap();
        let b = GalaxyGenerator::from_rng(StdRng::seed_from_u64(9))
            .generate(&params)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_params_rejected_before_drawing() {
        let params = GalaxyParams {
            branches: 0,
            ..default()
        };
        let err = GalaxyGenerator::seeded(0).generate(&params).unwrap_err();
        assert!(matches!(
            err,
            GalaxyError::InvalidParameter {
                name: "branches",
                ..
            }
        ));

        let params = GalaxyParams {
            radius: 0.0,
            ..default()
        };
        assert!(GalaxyGenerator::seeded(0).generate(&params).is_err());
    }

    #[test]
    fn particles_spread_evenly_over_arms() {
        let branches = 5;
        let count = 10_003;
        let params = GalaxyParams {
            count,
            branches,
            spin: 0.0,
            randomness: 0.0,
            ..default()
        };
        let buffer = GalaxyGenerator::seeded(3).generate(&params).unwrap();

        let arm_width = TAU / branches as f32;
        let mut per_arm = vec![0usize; branches as usize];
        for (i, [x, _, z]) in buffer.positions.iter().enumerate() {
            let arm = i % branches as usize;
            let r = x.hypot(*z);
            let expected_angle = arm as f32 * arm_width;
            assert!((x - expected_angle.cos() * r).abs() < 1e-4, "particle {i}");
            assert!((z - expected_angle.sin() * r).abs() < 1e-4, "particle {i}");
            per_arm[arm] += 1;
        }

        let expected = count / branches as usize;
        assert_eq!(per_arm.iter().sum::<usize>(), count);
        for (arm, n) in per_arm.into_iter().enumerate() {
            // the remainder goes to the first arms
            let extra = usize::from(arm < count % branches as usize);
            assert_eq!(n, expected + extra, "arm {arm}");
        }
    }

    #[test]
    fn radius_bounds_without_jitter() {
        let buffer = GalaxyGenerator::seeded(11)
            .generate(&flat_params(1000))
            .unwrap();
        for [x, y, z] in &buffer.positions {
            assert_eq!(y.abs(), 0.0);
            assert!(x.hypot(*z) < 10.0 + 1e-4);
        }
    }

    #[test]
    fn jitter_bounded_by_randomness() {
        let randomness = 0.3;
        let params = GalaxyParams {
            count: 5000,
            randomness,
            randomness_power: 2.0,
            ..flat_params(0)
        };
        let buffer = GalaxyGenerator::seeded(5).generate(&params).unwrap();
        for [x, y, z] in &buffer.positions {
            assert!(y.abs() <= randomness);
            assert!(x.hypot(*z) <= 10.0 + randomness * 2f32.sqrt() + 1e-4);
        }
        assert!(buffer.positions.iter().any(|p| p[1] > 0.0));
        assert!(buffer.positions.iter().any(|p| p[1] < 0.0));
    }

    #[test]
    fn negative_randomness_still_bounded() {
        let params = GalaxyParams {
            count: 500,
            randomness: -0.5,
            ..flat_params(0)
        };
        let buffer = GalaxyGenerator::seeded(8).generate(&params).unwrap();
        assert!(buffer.positions.iter().all(|p| p[1].abs() <= 0.5));
    }

    #[test]
    fn two_arm_scenario_without_jitter() {
        let buffer = GalaxyGenerator::seeded(21)
            .generate(&flat_params(4))
            .unwrap();

        for (i, ([x, y, z], color)) in buffer.positions.iter().zip(&buffer.colors).enumerate() {
            let r = x.hypot(*z);
            assert!(r < 10.0);
            assert_eq!(*y, 0.0);

            let expected_angle = (i % 2) as f32 * PI;
            assert!((x - expected_angle.cos() * r).abs() < 1e-4);
            assert!((z - expected_angle.sin() * r).abs() < 1e-4);

            let grey = 1.0 - r / 10.0;
            for c in color {
                assert!((c - grey).abs() < 1e-4, "{c} vs {grey}");
            }
        }
    }

    #[test]
    fn spin_twists_with_distance() {
        let params = GalaxyParams {
            spin: 1.0,
            branches: 1,
            ..flat_params(200)
        };
        let buffer = GalaxyGenerator::seeded(2).generate(&params).unwrap();
        for [x, _, z] in &buffer.positions {
            let r = x.hypot(*z);
            let expected = vec2(r.cos(), r.sin()) * r;
            assert!((expected.x - x).abs() < 1e-3);
            assert!((expected.y - z).abs() < 1e-3);
        }
    }
}
