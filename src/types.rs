use std::fmt;
use std::str::FromStr;

/// Which swarm the node joins.
///
/// The launched training script distinguishes two variants and expects the
/// tag as a single-letter answer on its input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwarmVariant {
    A,
    B,
}

impl Default for SwarmVariant {
    fn default() -> Self {
        SwarmVariant::A
    }
}

impl fmt::Display for SwarmVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwarmVariant::A => write!(f, "A"),
            SwarmVariant::B => write!(f, "B"),
        }
    }
}

impl FromStr for SwarmVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(SwarmVariant::A),
            "b" => Ok(SwarmVariant::B),
            other => Err(format!("invalid swarm variant: {other} (expected \"A\" or \"B\")")),
        }
    }
}

/// Model size in billions of parameters.
///
/// The training script only accepts a fixed set of sizes, so this is an enum
/// rather than a free-form number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamBillions {
    Half,
    OneAndHalf,
    Seven,
    ThirtyTwo,
    SeventyTwo,
}

impl Default for ParamBillions {
    fn default() -> Self {
        ParamBillions::Seven
    }
}

impl fmt::Display for ParamBillions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamBillions::Half => write!(f, "0.5"),
            ParamBillions::OneAndHalf => write!(f, "1.5"),
            ParamBillions::Seven => write!(f, "7"),
            ParamBillions::ThirtyTwo => write!(f, "32"),
            ParamBillions::SeventyTwo => write!(f, "72"),
        }
    }
}

impl FromStr for ParamBillions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0.5" => Ok(ParamBillions::Half),
            "1.5" => Ok(ParamBillions::OneAndHalf),
            "7" => Ok(ParamBillions::Seven),
            "32" => Ok(ParamBillions::ThirtyTwo),
            "72" => Ok(ParamBillions::SeventyTwo),
            other => Err(format!(
                "invalid parameter count: {other} (expected one of 0.5, 1.5, 7, 32, 72)"
            )),
        }
    }
}

/// On/off flag persisted as `enabled`/`disabled` in the config record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Enabled,
    Disabled,
}

impl Flag {
    /// The answer character the training script expects for this flag.
    pub fn answer(&self) -> &'static str {
        match self {
            Flag::Enabled => "Y",
            Flag::Disabled => "N",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Enabled => write!(f, "enabled"),
            Flag::Disabled => write!(f, "disabled"),
        }
    }
}

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "enabled" | "true" | "yes" | "y" => Ok(Flag::Enabled),
            "disabled" | "false" | "no" | "n" => Ok(Flag::Disabled),
            other => Err(format!("invalid flag: {other} (expected \"enabled\" or \"disabled\")")),
        }
    }
}
