use std::str::FromStr;

use crate::foundation::error::VizError;

/// Monotone curve mapping transition progress in `[0, 1]` onto `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Cubic ease-out.
    OutCubic,
}

impl Ease {
    /// Map progress `t`; values outside `[0, 1]` are clamped first.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InOutQuad => in_out(t, 2),
            Self::InOutCubic => in_out(t, 3),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

fn in_out(t: f64, power: i32) -> f64 {
    let k = f64::from(1 << (power - 1));
    if t < 0.5 {
        k * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

impl FromStr for Ease {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "in_out_quad" => Ok(Self::InOutQuad),
            "in_out_cubic" => Ok(Self::InOutCubic),
            "out_cubic" => Ok(Self::OutCubic),
            other => Err(VizError::validation(format!("unknown ease '{other}'"))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
