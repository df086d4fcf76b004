use bevy::prelude::*;

use crate::GalaxyError;

/// Parameter snapshot for one galaxy generation.
#[derive(Resource, Clone, PartialEq, Debug)]
pub struct GalaxyParams {
    pub count: usize,
    /// Point size in world units.
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    /// Radians of twist per unit of radius.
    pub spin: f32,
    /// Scale of the per-axis jitter.
    pub randomness: f32,
    /// Higher values pull the jitter towards zero.
    pub randomness_power: f32,
    pub inside_color: Srgba,
    pub outside_color: Srgba,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Srgba::rgb_u8(0xff, 0x60, 0x30),
            outside_color: Srgba::rgb_u8(0x1b, 0x39, 0x84),
        }
    }
}

impl GalaxyParams {
    /// Most particles a mesh with 32-bit indices can address, at four
    /// vertices per particle.
    pub const COUNT_LIMIT: usize = (u32::MAX / 4) as usize;

    /// Lower bounds of the editable ranges.
    pub const MIN: Self = Self {
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 2,
        spin: -5.0,
        randomness: -5.0,
        randomness_power: 1.0,
        inside_color: Srgba::BLACK,
        outside_color: Srgba::BLACK,
    };
    /// Upper bounds of the editable ranges.
    pub const MAX: Self = Self {
        count: 1_000_000,
        size: 0.1,
        radius: 20.0,
        branches: 20,
        spin: 5.0,
        randomness: 5.0,
        randomness_power: 10.0,
        inside_color: Srgba::WHITE,
        outside_color: Srgba::WHITE,
    };
    /// Editing increments. Colors have no step.
    pub const STEP: Self = Self {
        count: 100,
        size: 0.001,
        radius: 0.01,
        branches: 1,
        spin: 0.01,
        randomness: 0.01,
        randomness_power: 0.001,
        inside_color: Srgba::NONE,
        outside_color: Srgba::NONE,
    };

    /// Checks the constraints the generator relies on.
    ///
    /// The editable ranges in [`Self::MIN`] and [`Self::MAX`] are narrower than
    /// what is accepted here.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.count > Self::COUNT_LIMIT {
            return Err(GalaxyError::invalid(
                "count",
                format!("must be at most {}, got {}", Self::COUNT_LIMIT, self.count),
            ));
        }
        if self.branches < 1 {
            return Err(GalaxyError::invalid("branches", "must be at least 1"));
        }
        check_positive("radius", self.radius)?;
        check_positive("size", self.size)?;
        check_positive("randomness_power", self.randomness_power)?;
        check_finite("spin", self.spin)?;
        check_finite("randomness", self.randomness)?;
        check_color("inside_color", self.inside_color)?;
        check_color("outside_color", self.outside_color)?;
        Ok(())
    }
}

fn check_finite(name: &'static str, value: f32) -> Result<(), GalaxyError> {
    if !value.is_finite() {
        return Err(GalaxyError::invalid(name, format!("{value} is not finite")));
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f32) -> Result<(), GalaxyError> {
    check_finite(name, value)?;
    if value <= 0.0 {
        return Err(GalaxyError::invalid(
            name,
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(())
}

fn check_color(name: &'static str, color: Srgba) -> Result<(), GalaxyError> {
    let in_range = [color.red, color.green, color.blue]
        .iter()
        .all(|c| (0.0..=1.0).contains(c));
    if !in_range {
        return Err(GalaxyError::invalid(
            name,
            format!("components must lie in [0, 1], got {}", color.to_hex()),
        ));
    }
    Ok(())
}
