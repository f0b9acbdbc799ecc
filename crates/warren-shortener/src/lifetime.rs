use crate::error::ShortenerError;
use jiff::SignedDuration;
use std::fmt::Display;
use std::str::FromStr;

const SECONDS_PER_HOUR: i64 = 3_600;
const MAX_HOURS: i64 = i64::MAX / SECONDS_PER_HOUR;

/// How long a shortened URL stays resolvable, in whole hours.
///
/// Always non-negative. Zero is allowed and means the link expires as soon as
/// the clock moves past its creation second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Lifetime {
    hours: i64,
}

impl Lifetime {
    pub fn from_hours(hours: i64) -> Result<Self, ShortenerError> {
        if hours < 0 {
            return Err(ShortenerError::invalid(format!(
                "expiration time must be a non-negative number of hours, got {hours}"
            )));
        }
        if hours > MAX_HOURS {
            return Err(ShortenerError::invalid(format!(
                "expiration time of {hours} hours is too large"
            )));
        }
        Ok(Self { hours })
    }

    pub fn hours(&self) -> i64 {
        self.hours
    }

    /// The lifetime in seconds. Cannot overflow thanks to the bound in
    /// [`Lifetime::from_hours`].
    pub fn as_seconds(&self) -> i64 {
        self.hours * SECONDS_PER_HOUR
    }

    pub fn as_duration(&self) -> SignedDuration {
        SignedDuration::from_secs(self.as_seconds())
    }
}

impl TryFrom<i64> for Lifetime {
    type Error = ShortenerError;

    fn try_from(hours: i64) -> Result<Self, Self::Error> {
        Self::from_hours(hours)
    }
}

/// Parses a decimal hour count such as `"24"`. Surrounding whitespace is
/// ignored; fractions, units and empty input are rejected.
impl FromStr for Lifetime {
    type Err = ShortenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ShortenerError::invalid("expiration time is required"));
        }
        let hours = trimmed.parse::<i64>().map_err(|e| {
            ShortenerError::invalid(format!(
                "expiration time '{trimmed}' is not an integer: {e}"
            ))
        })?;
        Self::from_hours(hours)
    }
}

impl Display for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h", self.hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_zero_and_positive_hours() {
        assert_eq!(Lifetime::from_hours(0).unwrap().as_seconds(), 0);
        assert_eq!(Lifetime::from_hours(1).unwrap().as_seconds(), 3_600);
        assert_eq!(
            Lifetime::from_hours(24).unwrap().as_duration(),
            SignedDuration::from_hours(24)
        );
    }

    #[test]
    fn rejects_negative_hours() {
        assert!(matches!(
            Lifetime::from_hours(-1),
            Err(ShortenerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_hours_that_overflow_seconds() {
        assert!(Lifetime::from_hours(MAX_HOURS).is_ok());
        assert!(matches!(
            Lifetime::from_hours(MAX_HOURS + 1),
            Err(ShortenerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn parses_numeric_strings() {
        assert_eq!("24".parse::<Lifetime>().unwrap().hours(), 24);
        assert_eq!(" 5 ".parse::<Lifetime>().unwrap().hours(), 5);
        assert_eq!("0".parse::<Lifetime>().unwrap().hours(), 0);
    }

    #[test]
    fn rejects_malformed_strings() {
        for raw in ["", "   ", "abc", "1.5", "-3", "12h"] {
            assert!(
                matches!(
                    raw.parse::<Lifetime>(),
                    Err(ShortenerError::InvalidArgument(_))
                ),
                "{raw:?} should be rejected"
            );
        }
    }
}
