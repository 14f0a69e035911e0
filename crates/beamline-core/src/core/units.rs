use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Units accepted when reading or converting a [`Length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Kilometer,
    Meter,
    Centimeter,
    Millimeter,
    Micrometer,
}

impl LengthUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Kilometer => "km",
            LengthUnit::Meter => "m",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Millimeter => "mm",
            LengthUnit::Micrometer => "um",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("Invalid numeric magnitude '{0}'")]
    InvalidNumber(String),
    #[error("Unknown length unit '{0}'")]
    UnknownUnit(String),
}

impl FromStr for LengthUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Ok(LengthUnit::Kilometer)
            }
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(LengthUnit::Meter),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(LengthUnit::Centimeter)
            }
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(LengthUnit::Millimeter)
            }
            "um" | "µm" | "micrometer" | "micrometers" | "micron" | "microns" => {
                Ok(LengthUnit::Micrometer)
            }
            other => Err(UnitError::UnknownUnit(other.to_string())),
        }
    }
}

/// A longitudinal distance, stored internally in metres.
///
/// This is the quantity type used for every position and length handled by the
/// placement resolver. It supports addition and subtraction with other lengths,
/// multiplication and division by plain scalars, and total comparison through
/// `PartialOrd`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    pub const fn meters(value: f64) -> Self {
        Self(value)
    }

    pub fn centimeters(value: f64) -> Self {
        Self::new(value, LengthUnit::Centimeter)
    }

    pub fn millimeters(value: f64) -> Self {
        Self::new(value, LengthUnit::Millimeter)
    }

    /// Creates a length from a magnitude expressed in `unit`.
    ///
    /// Sub-metre units divide rather than multiply so that decimal literals
    /// such as `10 cm` land on the nearest double of `0.1 m`.
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        match unit {
            LengthUnit::Kilometer => Self(value * 1.0e3),
            LengthUnit::Meter => Self(value),
            LengthUnit::Centimeter => Self(value / 1.0e2),
            LengthUnit::Millimeter => Self(value / 1.0e3),
            LengthUnit::Micrometer => Self(value / 1.0e6),
        }
    }

    pub fn as_meters(self) -> f64 {
        self.0
    }

    /// Returns the magnitude of this length expressed in `unit`.
    pub fn to(self, unit: LengthUnit) -> f64 {
        match unit {
            LengthUnit::Kilometer => self.0 / 1.0e3,
            LengthUnit::Meter => self.0,
            LengthUnit::Centimeter => self.0 * 1.0e2,
            LengthUnit::Millimeter => self.0 * 1.0e3,
            LengthUnit::Micrometer => self.0 * 1.0e6,
        }
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Whether `self` and `other` differ by no more than `tolerance`.
    pub fn approx_eq(self, other: Length, tolerance: Length) -> bool {
        (self - other).abs() <= tolerance
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(precision) = f.precision() {
            write!(f, "{:.*} m", precision, self.0)
        } else {
            write!(f, "{} m", self.0)
        }
    }
}

impl FromStr for Length {
    type Err = UnitError;

    /// Parses literals such as `"1.5"`, `"1.5 m"`, `"35cm"` or `"1e-3 km"`.
    ///
    /// A bare number is read as metres.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_alphabetic())
            .last()
            .map_or(trimmed.len(), |(i, _)| i);
        let (magnitude, unit) = trimmed.split_at(split);
        let magnitude = magnitude.trim();
        let value: f64 = magnitude
            .parse()
            .map_err(|_| UnitError::InvalidNumber(magnitude.to_string()))?;
        let unit = if unit.is_empty() {
            LengthUnit::Meter
        } else {
            unit.parse()?
        };
        Ok(Length::new(value, unit))
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        iter.fold(Length::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_convert_to_meters() {
        assert_eq!(Length::meters(2.0).as_meters(), 2.0);
        assert_eq!(Length::centimeters(50.0).as_meters(), 0.5);
        assert_eq!(Length::millimeters(250.0).as_meters(), 0.25);
        assert_eq!(Length::new(1.0, LengthUnit::Kilometer).as_meters(), 1000.0);
    }

    #[test]
    fn arithmetic_operators_behave_like_scalars() {
        let a = Length::meters(3.0);
        let b = Length::meters(1.0);
        assert_eq!(a + b, Length::meters(4.0));
        assert_eq!(a - b, Length::meters(2.0));
        assert_eq!(a / 2.0, Length::meters(1.5));
        assert_eq!(a * 2.0, Length::meters(6.0));
        assert_eq!(-b, Length::meters(-1.0));
        assert!(b < a);
        let total: Length = [a, b, b].into_iter().sum();
        assert_eq!(total, Length::meters(5.0));
    }

    #[test]
    fn to_reports_magnitude_in_requested_unit() {
        assert_eq!(Length::meters(1.5).to(LengthUnit::Centimeter), 150.0);
        assert_eq!(Length::meters(0.002).to(LengthUnit::Millimeter), 2.0);
    }

    #[test]
    fn from_str_parses_bare_numbers_as_meters() {
        assert_eq!("1.5".parse::<Length>(), Ok(Length::meters(1.5)));
        assert_eq!("  4 ".parse::<Length>(), Ok(Length::meters(4.0)));
        assert_eq!("1e2".parse::<Length>(), Ok(Length::meters(100.0)));
    }

    #[test]
    fn from_str_parses_units_with_and_without_space() {
        assert_eq!("35 cm".parse::<Length>(), Ok(Length::centimeters(35.0)));
        assert_eq!("35cm".parse::<Length>(), Ok(Length::centimeters(35.0)));
        assert_eq!("2 m".parse::<Length>(), Ok(Length::meters(2.0)));
        assert_eq!("1e-3km".parse::<Length>(), Ok(Length::meters(1.0)));
    }

    #[test]
    fn from_str_rejects_unknown_units_and_bad_numbers() {
        assert_eq!(
            "3 furlongs".parse::<Length>(),
            Err(UnitError::UnknownUnit("furlongs".to_string()))
        );
        assert_eq!(
            "abc m".parse::<Length>(),
            Err(UnitError::InvalidNumber("abc".to_string()))
        );
        assert!(matches!(
            "1.2.3 m".parse::<Length>(),
            Err(UnitError::InvalidNumber(_))
        ));
    }

    #[test]
    fn unit_symbols_parse_back_to_the_same_unit() {
        for unit in [
            LengthUnit::Kilometer,
            LengthUnit::Meter,
            LengthUnit::Centimeter,
            LengthUnit::Millimeter,
            LengthUnit::Micrometer,
        ] {
            assert_eq!(unit.to_string().parse::<LengthUnit>(), Ok(unit));
        }
        assert_eq!("microns".parse::<LengthUnit>(), Ok(LengthUnit::Micrometer));
    }

    #[test]
    fn approx_eq_respects_tolerance() {
        let tol = Length::meters(1e-6);
        assert!(Length::meters(1.0).approx_eq(Length::meters(1.0 + 1e-9), tol));
        assert!(!Length::meters(1.0).approx_eq(Length::meters(1.001), tol));
    }

    #[test]
    fn display_includes_unit_and_honours_precision() {
        assert_eq!(format!("{}", Length::meters(2.5)), "2.5 m");
        assert_eq!(format!("{:.3}", Length::meters(2.5)), "2.500 m");
    }
}
