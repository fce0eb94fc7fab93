//! Elapsed-duration rendering
//!
//! Durations are rendered with two decimal places in a fixed unit, or with
//! a unit picked automatically from the magnitude: below a microsecond in
//! nanoseconds, below a millisecond in microseconds, below a second in
//! milliseconds, below three minutes in seconds, and in minutes beyond
//! that.

use stacklog_errors::StacklogError;

/// Unit in which an elapsed duration is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Pick a unit from the magnitude of the value
    Auto,
    /// Nanoseconds (`ns`)
    Nanos,
    /// Microseconds (`mks`)
    Micros,
    /// Milliseconds (`ms`)
    Millis,
    /// Seconds (`s`)
    Secs,
    /// Minutes (`min`)
    Mins,
}

impl Unit {
    /// All units, including `Auto`
    pub const ALL: [Unit; 6] = [
        Unit::Auto,
        Unit::Nanos,
        Unit::Micros,
        Unit::Millis,
        Unit::Secs,
        Unit::Mins,
    ];

    /// The parse token for this unit
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Auto => "auto",
            Unit::Nanos => "ns",
            Unit::Micros => "mks",
            Unit::Millis => "ms",
            Unit::Secs => "s",
            Unit::Mins => "min",
        }
    }

    fn pick(secs: f64) -> Unit {
        if secs < 1e-6 {
            Unit::Nanos
        } else if secs < 1e-3 {
            Unit::Micros
        } else if secs < 1.0 {
            Unit::Millis
        } else if secs < 180.0 {
            Unit::Secs
        } else {
            Unit::Mins
        }
    }

    fn render(self, secs: f64) -> String {
        match self {
            Unit::Auto => Unit::pick(secs).render(secs),
            Unit::Nanos => format!("{:8.2} ns", secs * 1e9),
            Unit::Micros => format!("{:8.2} mks", secs * 1e6),
            Unit::Millis => format!("{:8.2} ms", secs * 1e3),
            Unit::Secs => format!("{:8.2} s", secs),
            Unit::Mins => format!("{:8.2} min", secs / 60.0),
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = StacklogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Unit::Auto),
            "ns" => Ok(Unit::Nanos),
            "mks" => Ok(Unit::Micros),
            "ms" => Ok(Unit::Millis),
            "s" => Ok(Unit::Secs),
            "min" => Ok(Unit::Mins),
            other => Err(StacklogError::UnknownUnit {
                unit: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render `secs` in `unit` with two decimal places and no leading padding
pub fn format_time(unit: Unit, secs: f64) -> String {
    unit.render(secs).trim_start().to_string()
}
