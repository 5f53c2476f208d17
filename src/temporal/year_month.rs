use crate::{
    error::Error,
    hash::CanonicalBytes,
    temporal::{Date, Precision, Year},
    util::common::{days_in_month, MAX_YEAR, MIN_YEAR},
};

/// A temporal literal with year-month precision.
///
/// A `YearMonth` commits to a calendar month of a specific year and nothing
/// finer: `2023-02` is the whole of February 2023, not any day within it.
/// Widening with [`YearMonth::earliest`] and [`YearMonth::latest`] produces
/// the first and last [`Date`] of the month; narrowing with
/// [`YearMonth::to_year`] drops the month.
///
/// # Example
///
/// ```
/// use fhir_temporal::{Date, YearMonth};
///
/// let ym: YearMonth = "2024-02".parse()?;
/// assert_eq!(ym.month(), 2);
/// // 2024 is a leap year, and the month length table knows it.
/// assert_eq!(ym.latest(), Date::new(2024, 2, 29)?);
///
/// # Ok::<(), fhir_temporal::Error>(())
/// ```
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct YearMonth {
    year: i16,
    month: i8,
}

impl YearMonth {
    /// The minimum representable year-month, `0001-01`.
    pub const MIN: YearMonth = YearMonth::constant(MIN_YEAR, 1);

    /// The maximum representable year-month, `9999-12`.
    pub const MAX: YearMonth = YearMonth::constant(MAX_YEAR, 12);

    /// Creates a new `YearMonth` from its component year and month values.
    ///
    /// # Errors
    ///
    /// This returns an error when the year is outside `1..=9999` or the
    /// month is outside `1..=12`. Validation is all or nothing: no value
    /// exists unless every field is legal.
    #[inline]
    pub fn new(year: i16, month: i8) -> Result<YearMonth, Error> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::invalid_field("year", year, MIN_YEAR, MAX_YEAR));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_field("month", month, 1, 12));
        }
        Ok(YearMonth { year, month })
    }

    /// Creates a new `YearMonth` in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`YearMonth::new`] would return an error.
    #[inline]
    pub const fn constant(year: i16, month: i8) -> YearMonth {
        if year < MIN_YEAR || year > MAX_YEAR {
            panic!("invalid year");
        }
        if month < 1 || month > 12 {
            panic!("invalid month");
        }
        YearMonth { year, month }
    }

    /// Returns the year value, exactly as constructed.
    #[inline]
    pub fn year(self) -> i16 {
        self.year
    }

    /// Returns the month value, exactly as constructed.
    #[inline]
    pub fn month(self) -> i8 {
        self.month
    }

    /// Returns the precision tag of this value: [`Precision::YearMonth`].
    #[inline]
    pub fn precision(self) -> Precision {
        Precision::YearMonth
    }

    /// Narrows this value to year precision, dropping the month.
    ///
    /// Narrowing is lossy and cannot fail.
    #[inline]
    pub fn to_year(self) -> Year {
        Year::constant(self.year)
    }

    /// Widens this value to the earliest [`Date`] it could denote, which is
    /// the first day of the month.
    #[inline]
    pub fn earliest(self) -> Date {
        Date::new_unchecked(self.year, self.month, 1)
    }

    /// Widens this value to the latest [`Date`] it could denote, which is
    /// the last day of the month, leap years included.
    #[inline]
    pub fn latest(self) -> Date {
        Date::new_unchecked(
            self.year,
            self.month,
            days_in_month(self.year, self.month),
        )
    }

    /// Returns a copy of this value with the given number of years added.
    ///
    /// The number may be negative. Adding zero returns this value unchanged.
    ///
    /// # Errors
    ///
    /// This fails when the resulting year falls outside `1..=9999`.
    #[inline]
    pub fn checked_add_years(self, years: i64) -> Result<YearMonth, Error> {
        if years == 0 {
            return Ok(self);
        }
        let years = years.checked_mul(12).ok_or_else(|| {
            Error::out_of_range("years")
        })?;
        self.add_months(years, "years")
    }

    /// Returns a copy of this value with the given number of months added.
    ///
    /// The number may be negative, and month arithmetic carries into the
    /// year: `2023-11` plus three months is `2024-02`. Adding zero returns
    /// this value unchanged.
    ///
    /// # Errors
    ///
    /// This fails when the resulting year falls outside `1..=9999`.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::YearMonth;
    ///
    /// let ym = YearMonth::new(2023, 11)?;
    /// assert_eq!(ym.checked_add_months(3)?, YearMonth::new(2024, 2)?);
    /// assert_eq!(ym.checked_add_months(-11)?, YearMonth::new(2022, 12)?);
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    #[inline]
    pub fn checked_add_months(self, months: i64) -> Result<YearMonth, Error> {
        if months == 0 {
            return Ok(self);
        }
        self.add_months(months, "months")
    }

    fn add_months(
        self,
        months: i64,
        what: &'static str,
    ) -> Result<YearMonth, Error> {
        let total = (i64::from(self.year) * 12 + i64::from(self.month) - 1)
            .checked_add(months)
            .ok_or_else(|| Error::out_of_range(what))?;
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) + 1;
        if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
            return Err(Error::out_of_range(what));
        }
        Ok(YearMonth { year: year as i16, month: month as i8 })
    }

    /// Returns a new `YearMonth` with the year replaced by the given value.
    ///
    /// The whole value is revalidated.
    #[inline]
    pub fn with_year(self, year: i16) -> Result<YearMonth, Error> {
        YearMonth::new(year, self.month)
    }

    /// Returns a new `YearMonth` with the month replaced by the given value.
    ///
    /// The whole value is revalidated.
    #[inline]
    pub fn with_month(self, month: i8) -> Result<YearMonth, Error> {
        YearMonth::new(self.year, month)
    }

    /// Returns the canonical byte encoding of this value.
    ///
    /// See [`CanonicalBytes`] for the encoding contract.
    pub fn canonical_bytes(self) -> CanonicalBytes {
        let mut enc = CanonicalBytes::for_precision(Precision::YearMonth);
        enc.put_i32(i32::from(self.year));
        enc.put_u8(self.month as u8);
        enc
    }
}

impl core::hash::Hash for YearMonth {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write(self.canonical_bytes().as_bytes());
    }
}

impl core::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        crate::fmt::printer::print_year_month(self, f)
    }
}

impl core::fmt::Debug for YearMonth {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "YearMonth({self})")
    }
}

impl core::str::FromStr for YearMonth {
    type Err = Error;

    fn from_str(string: &str) -> Result<YearMonth, Error> {
        crate::fmt::parse_year_month(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for YearMonth {
    fn arbitrary(g: &mut quickcheck::Gen) -> YearMonth {
        use quickcheck::Arbitrary;

        let year = crate::temporal::Year::arbitrary(g).year();
        let month = (u8::arbitrary(g) % 12 + 1) as i8;
        YearMonth { year, month }
    }
}
