use crate::foundation::error::{VizError, VizResult};

/// Parse a timing string such as `"3s"`, `"1.5s"`, `"500ms"` or a bare `"2"` into seconds.
pub fn parse_duration(text: &str) -> VizResult<f64> {
    let t = text.trim();
    let (number, scale) = if let Some(ms) = t.strip_suffix("ms") {
        (ms, 1e-3)
    } else if let Some(s) = t.strip_suffix('s') {
        (s, 1.0)
    } else {
        (t, 1.0)
    };
    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| VizError::validation(format!("malformed duration '{text}'")))?;
    check_secs(value * scale).map_err(|_| {
        VizError::validation(format!("duration '{text}' must be finite and >= 0"))
    })
}

pub(crate) fn check_secs(secs: f64) -> VizResult<f64> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(VizError::validation(format!(
            "duration {secs} must be finite and >= 0"
        )));
    }
    Ok(secs)
}

/// A duration as written in a script: seconds, or a timing string.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    /// Plain number of seconds.
    Secs(f64),
    /// Timing string such as `"2s"`.
    Text(String),
}

impl DurationValue {
    /// Validated seconds.
    pub fn secs(&self) -> VizResult<f64> {
        match self {
            Self::Secs(s) => check_secs(*s),
            Self::Text(t) => parse_duration(t),
        }
    }
}

impl From<f64> for DurationValue {
    fn from(secs: f64) -> Self {
        Self::Secs(secs)
    }
}

impl From<&str> for DurationValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// Serde adapter accepting either a number of seconds or a timing string.
pub(crate) fn de_secs<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;
    DurationValue::deserialize(deserializer)?
        .secs()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[path = "../../tests/unit/script/duration.rs"]
mod tests;
