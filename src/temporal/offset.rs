use crate::error::Error;

/// A fixed offset from UTC, in signed minutes.
///
/// This is the only timezone concept this crate models. There is no
/// timezone database and no daylight saving logic: a [`DateTime`] either
/// asserts a fixed numeric offset or asserts nothing at all.
///
/// The magnitude is limited to `18:00` in either direction, matching the
/// widest offset a conforming literal can carry.
///
/// A zero offset prints as `Z`, and `+00:00` parses to the same value; the
/// two spellings are indistinguishable after parsing.
///
/// [`DateTime`]: crate::DateTime
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Offset {
    minutes: i16,
}

impl Offset {
    /// The minimum representable offset, `-18:00`.
    pub const MIN: Offset = Offset::constant(-Offset::LIMIT);

    /// The maximum representable offset, `+18:00`.
    pub const MAX: Offset = Offset::constant(Offset::LIMIT);

    /// The offset of UTC itself, printed as `Z`.
    pub const UTC: Offset = Offset::constant(0);

    const LIMIT: i16 = 18 * 60;

    /// Creates a new `Offset` from a number of signed minutes east of UTC.
    ///
    /// # Errors
    ///
    /// This returns an error when the magnitude exceeds 18 hours.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::Offset;
    ///
    /// let offset = Offset::from_minutes(-5 * 60)?;
    /// assert_eq!(offset.to_string(), "-05:00");
    /// assert!(Offset::from_minutes(19 * 60).is_err());
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    #[inline]
    pub fn from_minutes(minutes: i16) -> Result<Offset, Error> {
        if minutes.unsigned_abs() > Offset::LIMIT as u16 {
            return Err(Error::invalid_field(
                "offset",
                minutes,
                -Offset::LIMIT,
                Offset::LIMIT,
            ));
        }
        Ok(Offset { minutes })
    }

    /// Creates a new `Offset` in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`Offset::from_minutes`] would return an error.
    #[inline]
    pub const fn constant(minutes: i16) -> Offset {
        if minutes < -Offset::LIMIT || minutes > Offset::LIMIT {
            panic!("invalid offset");
        }
        Offset { minutes }
    }

    /// Returns this offset as a number of signed minutes east of UTC.
    #[inline]
    pub fn minutes(self) -> i16 {
        self.minutes
    }

    /// Returns true when this is the zero offset.
    #[inline]
    pub fn is_utc(self) -> bool {
        self.minutes == 0
    }
}

impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        crate::fmt::printer::print_offset(self, f)
    }
}

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Offset({self})")
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Offset {
    fn arbitrary(g: &mut quickcheck::Gen) -> Offset {
        use quickcheck::Arbitrary;

        let magnitude = (u16::arbitrary(g) % (Offset::LIMIT as u16 + 1)) as i16;
        let minutes = if bool::arbitrary(g) { magnitude } else { -magnitude };
        Offset { minutes }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn construct() {
        assert_eq!(0, Offset::UTC.minutes());
        assert_eq!(-300, Offset::from_minutes(-300).unwrap().minutes());
        assert_eq!(1080, Offset::MAX.minutes());
        assert!(Offset::from_minutes(1081).unwrap_err().is_invalid_field());
        assert!(Offset::from_minutes(-1081).unwrap_err().is_invalid_field());
    }

    #[test]
    fn display() {
        assert_eq!("Z", Offset::UTC.to_string());
        assert_eq!("+01:00", Offset::constant(60).to_string());
        assert_eq!("-05:30", Offset::constant(-330).to_string());
        assert_eq!("+18:00", Offset::MAX.to_string());
    }
}
