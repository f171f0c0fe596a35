use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Container extent used when a configured extent cannot be resolved.
pub const DEFAULT_CONTAINER_EXTENT: u32 = 400;

/// Size of the surrounding application viewport, used to resolve `vh`/`vw` extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmbientViewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtentError {
    #[error("malformed container extent {0:?}: expected digits with an optional px, vh, vw or % unit")]
    Malformed(String),
    #[error("container extent {0}% is relative to a parent size that is not known")]
    RelativeToParent(u32),
    #[error("container extent {0:?} is relative to the viewport, but no ambient viewport was given")]
    NoAmbientViewport(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthUnit {
    Px,
    Vh,
    Vw,
    Percent,
}

impl LengthUnit {
    fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Vh => "vh",
            Self::Vw => "vw",
            Self::Percent => "%",
        }
    }
}

/// A CSS-like length: an unsigned integer with an optional unit (`px` when omitted).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CssLength {
    pub value: u32,
    pub unit: LengthUnit,
}

impl FromStr for CssLength {
    type Err = ExtentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits_end = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (digits, suffix) = s.split_at(digits_end);
        let malformed = || ExtentError::Malformed(s.to_string());

        let unit = match suffix {
            "" | "px" => LengthUnit::Px,
            "vh" => LengthUnit::Vh,
            "vw" => LengthUnit::Vw,
            "%" => LengthUnit::Percent,
            _ => return Err(malformed()),
        };
        if digits.is_empty() {
            return Err(malformed());
        }
        let value = digits.parse::<u32>().map_err(|_| malformed())?;
        Ok(Self { value, unit })
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl CssLength {
    pub fn resolve(&self, ambient: Option<AmbientViewport>) -> Result<u32, ExtentError> {
        let relative_to = |dim: fn(&AmbientViewport) -> u32| -> Result<u32, ExtentError> {
            let ambient = ambient.ok_or_else(|| ExtentError::NoAmbientViewport(self.to_string()))?;
            let px = self.value as u64 * dim(&ambient) as u64 / 100;
            Ok(px.min(u32::MAX as u64) as u32)
        };
        match self.unit {
            LengthUnit::Px => Ok(self.value),
            LengthUnit::Vh => relative_to(|a| a.height),
            LengthUnit::Vw => relative_to(|a| a.width),
            LengthUnit::Percent => Err(ExtentError::RelativeToParent(self.value)),
        }
    }
}

/// The configured height of the scroll container.
///
/// With `feature = "serde"`, this deserializes from either a number or a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ContainerExtent {
    Pixels(u32),
    /// A CSS-like length such as `"480"`, `"480px"`, `"50vh"` or `"30vw"`.
    Css(String),
}

impl ContainerExtent {
    pub fn resolve(&self, ambient: Option<AmbientViewport>) -> Result<u32, ExtentError> {
        match self {
            Self::Pixels(px) => Ok(*px),
            Self::Css(s) => s.parse::<CssLength>()?.resolve(ambient),
        }
    }

    /// Resolves the extent, falling back to [`DEFAULT_CONTAINER_EXTENT`] when it cannot be.
    pub fn resolve_or_default(&self, ambient: Option<AmbientViewport>) -> u32 {
        match self.resolve(ambient) {
            Ok(px) => px,
            Err(_err) => {
                vwarn!(error = %_err, fallback = DEFAULT_CONTAINER_EXTENT, "unresolvable container extent");
                DEFAULT_CONTAINER_EXTENT
            }
        }
    }
}

impl Default for ContainerExtent {
    fn default() -> Self {
        Self::Pixels(DEFAULT_CONTAINER_EXTENT)
    }
}

impl From<u32> for ContainerExtent {
    fn from(px: u32) -> Self {
        Self::Pixels(px)
    }
}

impl From<&str> for ContainerExtent {
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for ContainerExtent {
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}
