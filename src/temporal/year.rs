use crate::{
    error::Error,
    hash::CanonicalBytes,
    temporal::{Date, Precision},
    util::common::{MAX_YEAR, MIN_YEAR},
};

/// A temporal literal with year precision.
///
/// A `Year` commits to nothing finer than the calendar year: `2023` is not
/// January 1st of 2023, it is the whole year. The value is never coerced
/// into a specific instant. To get at the instants a `Year` could denote,
/// widen it with [`Year::earliest`] and [`Year::latest`], which produce the
/// first and last [`Date`] of the year.
///
/// # Comparisons
///
/// `Year` implements `Eq` and `Ord`; years order chronologically. Comparing
/// a `Year` against a value of a different precision is a separate operation
/// on [`Temporal`](crate::Temporal), see [`Temporal::compare`](crate::Temporal::compare).
///
/// # Example
///
/// ```
/// use fhir_temporal::{Date, Year};
///
/// let year: Year = "2023".parse()?;
/// assert_eq!(year.year(), 2023);
/// assert_eq!(year.earliest(), Date::new(2023, 1, 1)?);
/// assert_eq!(year.latest(), Date::new(2023, 12, 31)?);
///
/// # Ok::<(), fhir_temporal::Error>(())
/// ```
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Year {
    year: i16,
}

impl Year {
    /// The minimum representable year, `0001`.
    pub const MIN: Year = Year::constant(MIN_YEAR);

    /// The maximum representable year, `9999`.
    pub const MAX: Year = Year::constant(MAX_YEAR);

    /// Creates a new `Year` from its component year value.
    ///
    /// # Errors
    ///
    /// This returns an error unless the year is in the range `1..=9999`.
    /// FHIR literals carry a four digit unsigned year, so year zero and
    /// negative years do not exist here.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::Year;
    ///
    /// assert_eq!(Year::new(2023)?.year(), 2023);
    /// assert!(Year::new(0).is_err());
    /// assert!(Year::new(10_000).is_err());
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    #[inline]
    pub fn new(year: i16) -> Result<Year, Error> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::invalid_field("year", year, MIN_YEAR, MAX_YEAR));
        }
        Ok(Year { year })
    }

    /// Creates a new `Year` in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`Year::new`] would return an error.
    #[inline]
    pub const fn constant(year: i16) -> Year {
        if year < MIN_YEAR || year > MAX_YEAR {
            panic!("invalid year");
        }
        Year { year }
    }

    /// Returns the year value, exactly as constructed.
    #[inline]
    pub fn year(self) -> i16 {
        self.year
    }

    /// Returns the precision tag of this value: [`Precision::Year`].
    #[inline]
    pub fn precision(self) -> Precision {
        Precision::Year
    }

    /// Widens this year to the earliest [`Date`] it could denote, which is
    /// January 1st of this year.
    #[inline]
    pub fn earliest(self) -> Date {
        Date::new_unchecked(self.year, 1, 1)
    }

    /// Widens this year to the latest [`Date`] it could denote, which is
    /// December 31st of this year.
    #[inline]
    pub fn latest(self) -> Date {
        Date::new_unchecked(self.year, 12, 31)
    }

    /// Returns a copy of this value with the given number of years added.
    ///
    /// The number may be negative. Adding zero returns this value unchanged.
    ///
    /// # Errors
    ///
    /// This fails when the resulting year falls outside `1..=9999`.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::Year;
    ///
    /// let year = Year::new(2023)?;
    /// assert_eq!(year.checked_add_years(3)?, Year::new(2026)?);
    /// assert!(Year::new(9999)?.checked_add_years(1).is_err());
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    #[inline]
    pub fn checked_add_years(self, years: i64) -> Result<Year, Error> {
        if years == 0 {
            return Ok(self);
        }
        let sum = i64::from(self.year)
            .checked_add(years)
            .ok_or_else(|| Error::out_of_range("years"))?;
        if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&sum) {
            return Err(Error::out_of_range("years"));
        }
        Ok(Year { year: sum as i16 })
    }

    /// Returns a new `Year` with the year replaced by the given value.
    ///
    /// This revalidates the value, exactly like [`Year::new`].
    #[inline]
    pub fn with_year(self, year: i16) -> Result<Year, Error> {
        Year::new(year)
    }

    /// Returns the canonical byte encoding of this value.
    ///
    /// See [`CanonicalBytes`] for the encoding contract.
    pub fn canonical_bytes(self) -> CanonicalBytes {
        let mut enc = CanonicalBytes::for_precision(Precision::Year);
        enc.put_i32(i32::from(self.year));
        enc
    }
}

impl core::hash::Hash for Year {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write(self.canonical_bytes().as_bytes());
    }
}

impl core::fmt::Display for Year {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        crate::fmt::printer::print_year(self, f)
    }
}

impl core::fmt::Debug for Year {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Year({self})")
    }
}

impl core::str::FromStr for Year {
    type Err = Error;

    fn from_str(string: &str) -> Result<Year, Error> {
        crate::fmt::parse_year(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Year {
    fn arbitrary(g: &mut quickcheck::Gen) -> Year {
        use quickcheck::Arbitrary;

        let year = (u16::arbitrary(g) % (MAX_YEAR as u16)) + 1;
        Year { year: year as i16 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct() {
        assert_eq!(2023, Year::new(2023).unwrap().year());
        assert_eq!(1, Year::MIN.year());
        assert_eq!(9999, Year::MAX.year());
        assert!(Year::new(0).is_err());
        assert!(Year::new(-2023).is_err());
        assert!(Year::new(10_000).is_err());
    }

    #[test]
    fn widen() {
        let year = Year::constant(2023);
        assert_eq!(Date::constant(2023, 1, 1), year.earliest());
        assert_eq!(Date::constant(2023, 12, 31), year.latest());
    }

    #[test]
    fn arithmetic() {
        let year = Year::constant(2023);
        assert_eq!(Year::constant(2024), year.checked_add_years(1).unwrap());
        assert_eq!(Year::constant(2000), year.checked_add_years(-23).unwrap());
        assert!(Year::MAX.checked_add_years(1).unwrap_err().is_out_of_range());
        assert!(Year::MIN.checked_add_years(-1).unwrap_err().is_out_of_range());
        assert!(year.checked_add_years(i64::MAX).unwrap_err().is_out_of_range());
    }

    #[test]
    fn ordering() {
        assert!(Year::constant(2022) < Year::constant(2023));
        assert_eq!(Year::constant(2023), Year::constant(2023));
    }
}
