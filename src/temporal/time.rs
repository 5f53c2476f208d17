use crate::error::Error;

/// The time-of-day component of a [`DateTime`](crate::DateTime).
///
/// This is not a fifth precision variant: a bare time is not a temporal
/// literal in this crate. `Time` exists so that a `DateTime` can be built
/// from and taken apart into its civil components.
///
/// The fractional second is optional and carries millisecond resolution.
/// A time without a fraction is a distinct value from the same time with a
/// fraction of `.000`, and the two print differently and hash differently.
/// Leap seconds are not modeled: the second field tops out at `59`.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Time {
    hour: i8,
    minute: i8,
    second: i8,
    millisecond: Option<i16>,
}

impl Time {
    /// Creates a new `Time` from its component hour, minute and second
    /// values, with no fractional second.
    ///
    /// # Errors
    ///
    /// This returns an error when the hour is outside `0..=23` or the
    /// minute or second is outside `0..=59`.
    #[inline]
    pub fn new(hour: i8, minute: i8, second: i8) -> Result<Time, Error> {
        if !(0..=23).contains(&hour) {
            return Err(Error::invalid_field("hour", hour, 0, 23));
        }
        if !(0..=59).contains(&minute) {
            return Err(Error::invalid_field("minute", minute, 0, 59));
        }
        if !(0..=59).contains(&second) {
            return Err(Error::invalid_field("second", second, 0, 59));
        }
        Ok(Time { hour, minute, second, millisecond: None })
    }

    /// Creates a new `Time` in a `const` context, with no fractional
    /// second.
    ///
    /// # Panics
    ///
    /// This panics when [`Time::new`] would return an error.
    #[inline]
    pub const fn constant(hour: i8, minute: i8, second: i8) -> Time {
        if hour < 0 || hour > 23 {
            panic!("invalid hour");
        }
        if minute < 0 || minute > 59 {
            panic!("invalid minute");
        }
        if second < 0 || second > 59 {
            panic!("invalid second");
        }
        Time { hour, minute, second, millisecond: None }
    }

    /// Returns `00:00:00.000`, the start-of-day bound used by widening.
    #[inline]
    pub const fn start_of_day() -> Time {
        Time { hour: 0, minute: 0, second: 0, millisecond: Some(0) }
    }

    /// Returns `23:59:59.999`, the end-of-day bound used by widening.
    #[inline]
    pub const fn end_of_day() -> Time {
        Time { hour: 23, minute: 59, second: 59, millisecond: Some(999) }
    }

    /// Returns the hour, exactly as constructed.
    #[inline]
    pub fn hour(self) -> i8 {
        self.hour
    }

    /// Returns the minute, exactly as constructed.
    #[inline]
    pub fn minute(self) -> i8 {
        self.minute
    }

    /// Returns the second, exactly as constructed.
    #[inline]
    pub fn second(self) -> i8 {
        self.second
    }

    /// Returns the fractional second in milliseconds, if one was given.
    #[inline]
    pub fn millisecond(self) -> Option<i16> {
        self.millisecond
    }

    /// Returns a new `Time` with the fractional second replaced by the
    /// given value, or removed entirely when `None` is given.
    ///
    /// # Errors
    ///
    /// This returns an error when the millisecond is outside `0..=999`.
    #[inline]
    pub fn with_millisecond(
        self,
        millisecond: Option<i16>,
    ) -> Result<Time, Error> {
        if let Some(ms) = millisecond {
            if !(0..=999).contains(&ms) {
                return Err(Error::invalid_field("millisecond", ms, 0, 999));
            }
        }
        Ok(Time { millisecond, ..self })
    }

    /// Returns a new `Time` with the hour replaced by the given value.
    #[inline]
    pub fn with_hour(self, hour: i8) -> Result<Time, Error> {
        Time::new(hour, self.minute, self.second)?;
        Ok(Time { hour, ..self })
    }

    /// Returns a new `Time` with the minute replaced by the given value.
    #[inline]
    pub fn with_minute(self, minute: i8) -> Result<Time, Error> {
        Time::new(self.hour, minute, self.second)?;
        Ok(Time { minute, ..self })
    }

    /// Returns a new `Time` with the second replaced by the given value.
    #[inline]
    pub fn with_second(self, second: i8) -> Result<Time, Error> {
        Time::new(self.hour, self.minute, second)?;
        Ok(Time { second, ..self })
    }

    /// The number of milliseconds into the day, with an absent fraction
    /// counting as zero.
    pub(crate) fn to_millis_of_day(self) -> i64 {
        i64::from(self.hour) * 3_600_000
            + i64::from(self.minute) * 60_000
            + i64::from(self.second) * 1_000
            + i64::from(self.millisecond.unwrap_or(0))
    }

    /// The inverse of `to_millis_of_day`.
    ///
    /// `had_fraction` restores whether the value carries an explicit
    /// fractional second; a non-zero sub-second remainder always does.
    pub(crate) fn from_millis_of_day(
        millis: i64,
        had_fraction: bool,
    ) -> Time {
        debug_assert!((0..86_400_000).contains(&millis));
        let ms = (millis % 1_000) as i16;
        let seconds = millis / 1_000;
        let millisecond = if had_fraction || ms != 0 { Some(ms) } else { None };
        Time {
            hour: (seconds / 3_600) as i8,
            minute: (seconds / 60 % 60) as i8,
            second: (seconds % 60) as i8,
            millisecond,
        }
    }
}

impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        crate::fmt::printer::print_time(self, f)
    }
}

impl core::fmt::Debug for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Time({self})")
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Time {
    fn arbitrary(g: &mut quickcheck::Gen) -> Time {
        use quickcheck::Arbitrary;

        Time {
            hour: (u8::arbitrary(g) % 24) as i8,
            minute: (u8::arbitrary(g) % 60) as i8,
            second: (u8::arbitrary(g) % 60) as i8,
            millisecond: Option::<u16>::arbitrary(g)
                .map(|ms| (ms % 1_000) as i16),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct() {
        let t = Time::new(8, 30, 15).unwrap();
        assert_eq!((8, 30, 15, None), (
            t.hour(),
            t.minute(),
            t.second(),
            t.millisecond(),
        ));
        assert!(Time::new(24, 0, 0).unwrap_err().is_invalid_field());
        assert!(Time::new(0, 60, 0).unwrap_err().is_invalid_field());
        assert!(Time::new(0, 0, 60).unwrap_err().is_invalid_field());
        assert!(Time::new(0, 0, 0)
            .unwrap()
            .with_millisecond(Some(1_000))
            .unwrap_err()
            .is_invalid_field());
    }

    #[test]
    fn fraction_is_significant() {
        let plain = Time::constant(8, 30, 15);
        let zero = plain.with_millisecond(Some(0)).unwrap();
        assert_ne!(plain, zero);
        assert_eq!(plain, zero.with_millisecond(None).unwrap());
    }

    #[test]
    fn millis_of_day_roundtrip() {
        let t = Time::constant(23, 59, 59).with_millisecond(Some(999)).unwrap();
        assert_eq!(86_399_999, t.to_millis_of_day());
        assert_eq!(t, Time::from_millis_of_day(86_399_999, true));
        // No fraction in, no fraction out, provided the remainder is zero.
        let t = Time::constant(8, 30, 15);
        assert_eq!(t, Time::from_millis_of_day(t.to_millis_of_day(), false));
    }
}
