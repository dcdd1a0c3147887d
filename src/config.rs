//! Runtime settings
//!
//! Defaults mirror the geometry and timing the visualizer has always used:
//! a 25-unit node radius, ~60 layout updates per second and a 0.1 easing
//! factor. Values can be overridden from the command line.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Slowest and fastest driver speeds the UI allows
pub const MIN_STEP_INTERVAL: Duration = Duration::from_millis(50);
pub const MAX_STEP_INTERVAL: Duration = Duration::from_millis(2000);

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Smoothing factor must lie in (0, 1]
    SmoothingOutOfRange(f64),
    /// Geometry values must be finite and positive
    InvalidGeometry { field: &'static str, value: f64 },
    /// Timer intervals must be non-zero
    ZeroInterval(&'static str),
    /// Command-line value could not be parsed
    InvalidArgument { flag: String, value: String },
    /// Flag given without its value
    MissingValue(String),
    /// Unrecognized flag or positional argument
    UnknownArgument(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SmoothingOutOfRange(v) => {
                write!(f, "Smoothing factor {} is outside (0, 1]", v)
            }
            ConfigError::InvalidGeometry { field, value } => {
                write!(f, "Invalid {}: {} (must be positive)", field, value)
            }
            ConfigError::ZeroInterval(field) => write!(f, "{} must be non-zero", field),
            ConfigError::InvalidArgument { flag, value } => {
                write!(f, "Invalid value '{}' for {}", value, flag)
            }
            ConfigError::MissingValue(flag) => write!(f, "Missing value for {}", flag),
            ConfigError::UnknownArgument(arg) => write!(f, "Unknown argument '{}'", arg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Geometry and timing consumed by the layout engine and driver loop
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub node_radius: f64,
    /// Horizontal slots never grow wider than twice this distance
    pub min_node_distance: f64,
    /// Fraction of the remaining distance covered per layout pass
    pub smoothing_factor: f64,
    /// Residual distance below which a node snaps onto its target
    pub snap_threshold: f64,
    /// Minimum time between two layout recomputations
    pub frame_interval: Duration,
    /// How often the UI asks the layout engine for an update
    pub layout_update_interval: Duration,
    /// Time between two driver steps while playing
    pub step_interval: Duration,
    /// Entries kept by the in-memory log
    pub log_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            node_radius: 25.0,
            min_node_distance: 100.0,
            smoothing_factor: 0.1,
            snap_threshold: 1.0,
            frame_interval: Duration::from_millis(16),
            layout_update_interval: Duration::from_millis(16),
            step_interval: Duration::from_millis(500),
            log_capacity: 500,
        }
    }
}

impl Settings {
    /// Canvas margin kept free on every side
    pub fn margin(&self) -> f64 {
        self.node_radius * 2.0
    }

    /// Level spacing used by the fallback layout
    pub fn fallback_spacing(&self) -> f64 {
        self.node_radius * 4.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(ConfigError::SmoothingOutOfRange(self.smoothing_factor));
        }
        for (field, value) in [
            ("node radius", self.node_radius),
            ("minimum node distance", self.min_node_distance),
            ("snap threshold", self.snap_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidGeometry { field, value });
            }
        }
        if self.frame_interval.is_zero() {
            return Err(ConfigError::ZeroInterval("frame interval"));
        }
        if self.layout_update_interval.is_zero() {
            return Err(ConfigError::ZeroInterval("layout update interval"));
        }
        if self.step_interval.is_zero() {
            return Err(ConfigError::ZeroInterval("step interval"));
        }
        Ok(())
    }

    /// Step interval clamped to the range the speed control allows
    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.step_interval = interval.clamp(MIN_STEP_INTERVAL, MAX_STEP_INTERVAL);
        self
    }
}

/// Parsed command line: `[ALGORITHM] [N] [--speed MS] [--smoothing F] [--log FILE]`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliOptions {
    pub algorithm: Option<String>,
    pub n: Option<i64>,
    pub settings: Settings,
    pub log_path: Option<PathBuf>,
    pub help: bool,
}

impl CliOptions {
    /// Parse arguments, excluding the program name
    pub fn parse<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut opts = CliOptions::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => opts.help = true,
                "--speed" | "--smoothing" | "--log" => {
                    let value = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                    opts.apply_flag(&arg, value)?;
                }
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownArgument(arg));
                }
                _ if opts.algorithm.is_none() && arg.parse::<i64>().is_err() => {
                    opts.algorithm = Some(arg);
                }
                _ if opts.n.is_none() => {
                    let n = arg.parse().map_err(|_| ConfigError::InvalidArgument {
                        flag: "N".to_string(),
                        value: arg.clone(),
                    })?;
                    opts.n = Some(n);
                }
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        opts.settings.validate()?;
        Ok(opts)
    }

    fn apply_flag(&mut self, flag: &str, value: String) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidArgument {
            flag: flag.to_string(),
            value: value.clone(),
        };
        match flag {
            "--speed" => {
                let ms: u64 = value.parse().map_err(|_| invalid())?;
                self.settings = self
                    .settings
                    .clone()
                    .with_step_interval(Duration::from_millis(ms));
            }
            "--smoothing" => {
                self.settings.smoothing_factor = value.parse().map_err(|_| invalid())?;
            }
            "--log" => self.log_path = Some(PathBuf::from(value)),
            _ => return Err(ConfigError::UnknownArgument(flag.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.margin(), 50.0);
        assert_eq!(settings.fallback_spacing(), 100.0);
    }

    #[test]
    fn test_smoothing_bounds() {
        let mut settings = Settings::default();
        settings.smoothing_factor = 0.0;
        assert_eq!(
            settings.validate(),
            Err(ConfigError::SmoothingOutOfRange(0.0))
        );
        settings.smoothing_factor = 1.0;
        assert!(settings.validate().is_ok());
        settings.smoothing_factor = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_step_interval_is_clamped() {
        let settings = Settings::default().with_step_interval(Duration::from_millis(1));
        assert_eq!(settings.step_interval, MIN_STEP_INTERVAL);
        let settings = Settings::default().with_step_interval(Duration::from_secs(60));
        assert_eq!(settings.step_interval, MAX_STEP_INTERVAL);
    }

    #[test]
    fn test_parse_positionals_and_flags() {
        let opts = CliOptions::parse(["hanoi", "4", "--speed", "250", "--log", "run.log"]).unwrap();
        assert_eq!(opts.algorithm.as_deref(), Some("hanoi"));
        assert_eq!(opts.n, Some(4));
        assert_eq!(opts.settings.step_interval, Duration::from_millis(250));
        assert_eq!(opts.log_path, Some(PathBuf::from("run.log")));
        assert!(!opts.help);
    }

    #[test]
    fn test_parse_number_only() {
        let opts = CliOptions::parse(["-3"]).unwrap();
        assert_eq!(opts.algorithm, None);
        assert_eq!(opts.n, Some(-3));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            CliOptions::parse(["--speed"]),
            Err(ConfigError::MissingValue("--speed".into()))
        );
        assert_eq!(
            CliOptions::parse(["--fast"]),
            Err(ConfigError::UnknownArgument("--fast".into()))
        );
        assert_eq!(
            CliOptions::parse(["gcd", "ten"]),
            Err(ConfigError::InvalidArgument {
                flag: "N".into(),
                value: "ten".into()
            })
        );
        assert_eq!(
            CliOptions::parse(["--smoothing", "2"]),
            Err(ConfigError::SmoothingOutOfRange(2.0))
        );
    }
}
