//! Tunable constants of the particle field.
//!
//! Defaults reproduce the portfolio page exactly: 80 particles, radius in
//! [0.5, 2.5), speed in [-0.25, 0.25), opacity in [0.2, 0.7), links under
//! 100 px at up to 0.15 alpha, all in the orange accent.

use crate::color::{Rgb8, ACCENT};
use crate::error::FieldError;
use crate::params::{json_type_name, param_bool, param_f64, param_string, param_usize};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default number of particles.
pub const DEFAULT_COUNT: usize = 80;
/// Default smallest particle radius in pixels.
pub const DEFAULT_SIZE_MIN: f64 = 0.5;
/// Default largest particle radius in pixels (exclusive).
pub const DEFAULT_SIZE_MAX: f64 = 2.5;
/// Default bound on each velocity component in pixels per frame.
pub const DEFAULT_MAX_SPEED: f64 = 0.25;
/// Default lowest particle opacity.
pub const DEFAULT_OPACITY_MIN: f64 = 0.2;
/// Default highest particle opacity (exclusive).
pub const DEFAULT_OPACITY_MAX: f64 = 0.7;
/// Default connection threshold in pixels. Pairs at exactly this distance are not linked.
pub const DEFAULT_LINK_DISTANCE: f64 = 100.0;
/// Default alpha of a zero-length connection.
pub const DEFAULT_LINK_ALPHA: f64 = 0.15;
/// Default connection stroke width in pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Largest accepted particle count. Link scanning is quadratic in this.
pub const MAX_COUNT: usize = 100_000;
/// Largest accepted particle radius in pixels.
pub const MAX_SIZE: f64 = 1e4;
/// Largest accepted connection stroke width in pixels.
pub const MAX_LINE_WIDTH: f64 = 64.0;
/// Largest accepted connection threshold in pixels.
pub const MAX_LINK_DISTANCE: f64 = 1e5;

/// Parameters of a [`ParticleField`](crate::field::ParticleField).
///
/// Use [`Default`] for the values the page ships with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Number of particles, fixed for the lifetime of the field.
    pub count: usize,
    pub size_min: f64,
    pub size_max: f64,
    /// Each velocity component is drawn from [-max_speed, max_speed).
    pub max_speed: f64,
    pub opacity_min: f64,
    pub opacity_max: f64,
    /// Pairs closer than this (strictly) are connected.
    pub link_distance: f64,
    /// Alpha of a connection at distance 0, fading linearly to 0 at `link_distance`.
    pub link_alpha: f64,
    pub line_width: f64,
    /// Whether each particle is also paired with itself, drawing a zero-length
    /// line at full `link_alpha`. On by default for parity with the page.
    pub self_links: bool,
    pub color: Rgb8,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            size_min: DEFAULT_SIZE_MIN,
            size_max: DEFAULT_SIZE_MAX,
            max_speed: DEFAULT_MAX_SPEED,
            opacity_min: DEFAULT_OPACITY_MIN,
            opacity_max: DEFAULT_OPACITY_MAX,
            link_distance: DEFAULT_LINK_DISTANCE,
            link_alpha: DEFAULT_LINK_ALPHA,
            line_width: DEFAULT_LINE_WIDTH,
            self_links: true,
            color: ACCENT,
        }
    }
}

impl FieldConfig {
    /// Builds a config from a JSON params object, falling back to defaults for
    /// missing or mistyped keys, then validates it.
    ///
    /// `null` is treated as an empty object. Any other non-object value is a
    /// `FieldError::ParamTypeMismatch`.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        match params {
            Value::Object(_) | Value::Null => {}
            other => {
                return Err(FieldError::ParamTypeMismatch {
                    name: "params".into(),
                    expected: "object".into(),
                    got: json_type_name(other).into(),
                })
            }
        }
        let color = param_string(params, "color", &ACCENT.to_hex());
        let config = Self {
            count: param_usize(params, "count", DEFAULT_COUNT),
            size_min: param_f64(params, "size_min", DEFAULT_SIZE_MIN),
            size_max: param_f64(params, "size_max", DEFAULT_SIZE_MAX),
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED),
            opacity_min: param_f64(params, "opacity_min", DEFAULT_OPACITY_MIN),
            opacity_max: param_f64(params, "opacity_max", DEFAULT_OPACITY_MAX),
            link_distance: param_f64(params, "link_distance", DEFAULT_LINK_DISTANCE),
            link_alpha: param_f64(params, "link_alpha", DEFAULT_LINK_ALPHA),
            line_width: param_f64(params, "line_width", DEFAULT_LINE_WIDTH),
            self_links: param_bool(params, "self_links", true),
            color: Rgb8::from_hex(&color)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges, signs and upper bounds.
    ///
    /// Ranges may be degenerate (`min == max`) but not inverted. `count`,
    /// `size_max`, `line_width` and `link_distance` are capped at
    /// [`MAX_COUNT`], [`MAX_SIZE`], [`MAX_LINE_WIDTH`] and [`MAX_LINK_DISTANCE`].
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.count > MAX_COUNT {
            return Err(FieldError::InvalidParam(format!(
                "count must be at most {MAX_COUNT}, got {}",
                self.count
            )));
        }
        check_range("size", self.size_min, self.size_max)?;
        check_at_most("size_max", self.size_max, MAX_SIZE)?;
        check_range("opacity", self.opacity_min, self.opacity_max)?;
        check_at_most("opacity_max", self.opacity_max, 1.0)?;
        check_non_negative("max_speed", self.max_speed)?;
        check_non_negative("link_alpha", self.link_alpha)?;
        check_at_most("link_alpha", self.link_alpha, 1.0)?;
        check_non_negative("line_width", self.line_width)?;
        check_at_most("line_width", self.line_width, MAX_LINE_WIDTH)?;
        if !(self.link_distance > 0.0 && self.link_distance.is_finite()) {
            return Err(FieldError::InvalidParam(format!(
                "link_distance must be positive, got {}",
                self.link_distance
            )));
        }
        check_at_most("link_distance", self.link_distance, MAX_LINK_DISTANCE)?;
        Ok(())
    }

    /// Current parameter values as a JSON object, in the shape `from_json` reads.
    pub fn to_json(&self) -> Value {
        json!({
            "count": self.count,
            "size_min": self.size_min,
            "size_max": self.size_max,
            "max_speed": self.max_speed,
            "opacity_min": self.opacity_min,
            "opacity_max": self.opacity_max,
            "link_distance": self.link_distance,
            "link_alpha": self.link_alpha,
            "line_width": self.line_width,
            "self_links": self.self_links,
            "color": self.color.to_hex(),
        })
    }

    /// Schema describing every parameter, its type, range and default.
    pub fn param_schema() -> Value {
        json!({
            "count": {
                "type": "integer",
                "min": 0,
                "max": MAX_COUNT,
                "default": DEFAULT_COUNT,
                "description": "Number of particles, fixed for the lifetime of the field"
            },
            "size_min": {
                "type": "f64",
                "min": 0.0,
                "max": MAX_SIZE,
                "default": DEFAULT_SIZE_MIN,
                "description": "Smallest particle radius in pixels"
            },
            "size_max": {
                "type": "f64",
                "min": 0.0,
                "max": MAX_SIZE,
                "default": DEFAULT_SIZE_MAX,
                "description": "Largest particle radius in pixels (exclusive)"
            },
            "max_speed": {
                "type": "f64",
                "min": 0.0,
                "default": DEFAULT_MAX_SPEED,
                "description": "Bound on each velocity component, pixels per frame"
            },
            "opacity_min": {
                "type": "f64",
                "min": 0.0,
                "max": 1.0,
                "default": DEFAULT_OPACITY_MIN,
                "description": "Lowest particle fill opacity"
            },
            "opacity_max": {
                "type": "f64",
                "min": 0.0,
                "max": 1.0,
                "default": DEFAULT_OPACITY_MAX,
                "description": "Highest particle fill opacity (exclusive)"
            },
            "link_distance": {
                "type": "f64",
                "min": 0.0,
                "max": MAX_LINK_DISTANCE,
                "default": DEFAULT_LINK_DISTANCE,
                "description": "Pairs strictly closer than this are connected"
            },
            "link_alpha": {
                "type": "f64",
                "min": 0.0,
                "max": 1.0,
                "default": DEFAULT_LINK_ALPHA,
                "description": "Alpha of a zero-length connection, fading to 0 at link_distance"
            },
            "line_width": {
                "type": "f64",
                "min": 0.0,
                "max": MAX_LINE_WIDTH,
                "default": DEFAULT_LINE_WIDTH,
                "description": "Connection stroke width in pixels"
            },
            "self_links": {
                "type": "boolean",
                "default": true,
                "description": "Pair each particle with itself (zero-length line at full link_alpha)"
            },
            "color": {
                "type": "string",
                "default": ACCENT.to_hex(),
                "description": "Accent color for lines and particles, #rrggbb"
            }
        })
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<(), FieldError> {
    check_non_negative(&format!("{name}_min"), min)?;
    if !(min <= max && max.is_finite()) {
        return Err(FieldError::InvalidParam(format!(
            "{name}_min ({min}) must not exceed {name}_max ({max})"
        )));
    }
    Ok(())
}

fn check_at_most(name: &str, value: f64, max: f64) -> Result<(), FieldError> {
    if value <= max {
        Ok(())
    } else {
        Err(FieldError::InvalidParam(format!(
            "{name} must be at most {max}, got {value}"
        )))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), FieldError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(FieldError::InvalidParam(format!(
            "{name} must be a finite non-negative number, got {value}"
        )))
    }
}
