use crate::{
    error::Error,
    hash::CanonicalBytes,
    temporal::{DateTime, Precision, Time, Year, YearMonth},
    util::common::{
        days_in_month, from_epoch_day, saturate_day_in_month, to_epoch_day,
        MAX_EPOCH_DAY, MAX_YEAR, MIN_EPOCH_DAY, MIN_YEAR,
    },
};

/// A temporal literal with full date precision.
///
/// A `Date` corresponds to a triple of year, month and day in the proleptic
/// Gregorian calendar. Every `Date` is guaranteed to be valid: `2023-02-29`
/// and `2023-11-31` cannot be represented.
///
/// A `Date` still does not denote an instant. It spans a whole day, and
/// deliberately asserts no timezone offset: widening with
/// [`Date::earliest`] and [`Date::latest`] produces the bounding
/// [`DateTime`]s `T00:00:00.000` and `T23:59:59.999` with no offset.
///
/// # Arithmetic
///
/// Month and year arithmetic follows ordinary calendar semantics: the day
/// is clamped to the last valid day of the target month rather than rolling
/// over.
///
/// ```
/// use fhir_temporal::Date;
///
/// let d = Date::new(2023, 1, 31)?;
/// assert_eq!(d.checked_add_months(1)?, Date::new(2023, 2, 28)?);
///
/// let d = Date::new(2024, 1, 31)?;
/// assert_eq!(d.checked_add_months(1)?, Date::new(2024, 2, 29)?);
///
/// # Ok::<(), fhir_temporal::Error>(())
/// ```
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Date {
    year: i16,
    month: i8,
    day: i8,
}

impl Date {
    /// The minimum representable date, `0001-01-01`.
    pub const MIN: Date = Date::constant(MIN_YEAR, 1, 1);

    /// The maximum representable date, `9999-12-31`.
    pub const MAX: Date = Date::constant(MAX_YEAR, 12, 31);

    /// Creates a new `Date` from its component year, month and day values.
    ///
    /// # Errors
    ///
    /// This returns an error when the given year-month-day does not
    /// correspond to a valid date. Namely, all of the following must be
    /// true:
    ///
    /// * The year must be in the range `1..=9999`.
    /// * The month must be in the range `1..=12`.
    /// * The day must be at least `1` and at most the number of days in the
    ///   corresponding month. So for example, `2024-02-29` is valid but
    ///   `2023-02-29` is not.
    ///
    /// Validation is all or nothing: on error, no value exists.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::{Date, ErrorKind};
    ///
    /// let d = Date::new(2024, 2, 29)?;
    /// assert_eq!((d.year(), d.month(), d.day()), (2024, 2, 29));
    ///
    /// let err = Date::new(2023, 2, 29).unwrap_err();
    /// assert!(matches!(
    ///     err.kind(),
    ///     ErrorKind::InvalidField { name: "day", given: 29, max: 28, .. },
    /// ));
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    #[inline]
    pub fn new(year: i16, month: i8, day: i8) -> Result<Date, Error> {
        let ym = YearMonth::new(year, month)?;
        let max_day = days_in_month(ym.year(), ym.month());
        if !(1..=max_day).contains(&day) {
            return Err(Error::invalid_field("day", day, 1, max_day));
        }
        Ok(Date { year, month, day })
    }

    /// Creates a new `Date` in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`Date::new`] would return an error.
    #[inline]
    pub const fn constant(year: i16, month: i8, day: i8) -> Date {
        if year < MIN_YEAR || year > MAX_YEAR {
            panic!("invalid year");
        }
        if month < 1 || month > 12 {
            panic!("invalid month");
        }
        if day < 1 || day > days_in_month(year, month) {
            panic!("invalid day");
        }
        Date { year, month, day }
    }

    /// Creates a `Date` from fields that are already known to be valid.
    ///
    /// Callers must uphold the same invariants as `Date::new`.
    #[inline]
    pub(crate) fn new_unchecked(year: i16, month: i8, day: i8) -> Date {
        debug_assert!(Date::new(year, month, day).is_ok());
        Date { year, month, day }
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

    /// Returns the day value, exactly as constructed.
    #[inline]
    pub fn day(self) -> i8 {
        self.day
    }

    /// Returns the number of days in this date's month, accounting for leap
    /// years.
    #[inline]
    pub fn days_in_month(self) -> i8 {
        days_in_month(self.year, self.month)
    }

    /// Returns the precision tag of this value: [`Precision::Date`].
    #[inline]
    pub fn precision(self) -> Precision {
        Precision::Date
    }

    /// Narrows this value to year-month precision, dropping the day.
    ///
    /// Narrowing is lossy and cannot fail.
    #[inline]
    pub fn to_year_month(self) -> YearMonth {
        YearMonth::constant(self.year, self.month)
    }

    /// Narrows this value to year precision, dropping the month and day.
    #[inline]
    pub fn to_year(self) -> Year {
        Year::constant(self.year)
    }

    /// Widens this date to the earliest [`DateTime`] it could denote:
    /// `T00:00:00.000` on this date, with no offset asserted.
    #[inline]
    pub fn earliest(self) -> DateTime {
        DateTime::from_parts(self, Time::start_of_day())
    }

    /// Widens this date to the latest [`DateTime`] it could denote:
    /// `T23:59:59.999` on this date, with no offset asserted.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::Date;
    ///
    /// let dt = Date::new(2023, 7, 14)?.latest();
    /// assert_eq!(dt.to_string(), "2023-07-14T23:59:59.999");
    /// assert_eq!(dt.offset(), None);
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    #[inline]
    pub fn latest(self) -> DateTime {
        DateTime::from_parts(self, Time::end_of_day())
    }

    /// Returns a copy of this date with the given number of years added.
    ///
    /// The day is clamped to the length of the target month, so adding one
    /// year to `2024-02-29` gives `2025-02-28`. Adding zero returns this
    /// value unchanged.
    ///
    /// # Errors
    ///
    /// This fails when the resulting year falls outside `1..=9999`.
    #[inline]
    pub fn checked_add_years(self, years: i64) -> Result<Date, Error> {
        if years == 0 {
            return Ok(self);
        }
        let year = i64::from(self.year)
            .checked_add(years)
            .ok_or_else(|| Error::out_of_range("years"))?;
        if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
            return Err(Error::out_of_range("years"));
        }
        let year = year as i16;
        let day = saturate_day_in_month(year, self.month, self.day);
        Ok(Date { year, month: self.month, day })
    }

    /// Returns a copy of this date with the given number of months added.
    ///
    /// Month arithmetic carries into the year, and the day is clamped to
    /// the length of the target month rather than rolling over. Adding zero
    /// returns this value unchanged.
    ///
    /// # Errors
    ///
    /// This fails when the resulting year falls outside `1..=9999`.
    #[inline]
    pub fn checked_add_months(self, months: i64) -> Result<Date, Error> {
        if months == 0 {
            return Ok(self);
        }
        let ym = self.to_year_month().checked_add_months(months)?;
        let day = saturate_day_in_month(ym.year(), ym.month(), self.day);
        Ok(Date { year: ym.year(), month: ym.month(), day })
    }

    /// Returns a copy of this date with the given number of days added.
    ///
    /// Day arithmetic is exact. Adding zero returns this value unchanged.
    ///
    /// # Errors
    ///
    /// This fails when the resulting date falls outside
    /// `0001-01-01..=9999-12-31`.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::Date;
    ///
    /// let d = Date::new(2023, 2, 28)?;
    /// assert_eq!(d.checked_add_days(1)?, Date::new(2023, 3, 1)?);
    /// assert_eq!(d.checked_add_days(365)?, Date::new(2024, 2, 28)?);
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    #[inline]
    pub fn checked_add_days(self, days: i64) -> Result<Date, Error> {
        if days == 0 {
            return Ok(self);
        }
        let sum = i64::from(self.to_epoch_day())
            .checked_add(days)
            .ok_or_else(|| Error::out_of_range("days"))?;
        if !(i64::from(MIN_EPOCH_DAY)..=i64::from(MAX_EPOCH_DAY))
            .contains(&sum)
        {
            return Err(Error::out_of_range("days"));
        }
        Ok(Date::from_epoch_day(sum as i32))
    }

    /// Returns a new `Date` with the year replaced by the given value.
    ///
    /// The whole value is revalidated: changing the year of `2024-02-29` to
    /// a common year fails rather than producing February 29th of a year
    /// that doesn't have one.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::Date;
    ///
    /// let d = Date::new(2024, 2, 29)?;
    /// assert!(d.with_year(2023).is_err());
    /// assert_eq!(d.with_year(2028)?, Date::new(2028, 2, 29)?);
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    #[inline]
    pub fn with_year(self, year: i16) -> Result<Date, Error> {
        Date::new(year, self.month, self.day)
    }

    /// Returns a new `Date` with the month replaced by the given value.
    ///
    /// The whole value is revalidated.
    #[inline]
    pub fn with_month(self, month: i8) -> Result<Date, Error> {
        Date::new(self.year, month, self.day)
    }

    /// Returns a new `Date` with the day replaced by the given value.
    ///
    /// The whole value is revalidated.
    #[inline]
    pub fn with_day(self, day: i8) -> Result<Date, Error> {
        Date::new(self.year, self.month, day)
    }

    /// Returns the canonical byte encoding of this value.
    ///
    /// See [`CanonicalBytes`] for the encoding contract.
    pub fn canonical_bytes(self) -> CanonicalBytes {
        let mut enc = CanonicalBytes::for_precision(Precision::Date);
        enc.put_i32(i32::from(self.year));
        enc.put_u8(self.month as u8);
        enc.put_u8(self.day as u8);
        enc
    }

    pub(crate) fn to_epoch_day(self) -> i32 {
        to_epoch_day(self.year, self.month, self.day)
    }

    pub(crate) fn from_epoch_day(epoch_day: i32) -> Date {
        let (year, month, day) = from_epoch_day(epoch_day);
        Date { year, month, day }
    }
}

impl core::hash::Hash for Date {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write(self.canonical_bytes().as_bytes());
    }
}

impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        crate::fmt::printer::print_date(self, f)
    }
}

impl core::fmt::Debug for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Date({self})")
    }
}

impl core::str::FromStr for Date {
    type Err = Error;

    fn from_str(string: &str) -> Result<Date, Error> {
        crate::fmt::parse_date(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Date {
    fn arbitrary(g: &mut quickcheck::Gen) -> Date {
        use quickcheck::Arbitrary;

        let ym = YearMonth::arbitrary(g);
        let max_day = days_in_month(ym.year(), ym.month());
        let day = (u8::arbitrary(g) % (max_day as u8) + 1) as i8;
        Date { year: ym.year(), month: ym.month(), day }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct() {
        let d = Date::new(2023, 7, 14).unwrap();
        assert_eq!((2023, 7, 14), (d.year(), d.month(), d.day()));
        assert!(Date::new(2024, 2, 29).is_ok());
        assert!(Date::new(2023, 2, 29).unwrap_err().is_invalid_field());
        assert!(Date::new(2023, 11, 31).unwrap_err().is_invalid_field());
        assert!(Date::new(2023, 0, 1).unwrap_err().is_invalid_field());
        assert!(Date::new(2023, 1, 0).unwrap_err().is_invalid_field());
    }

    #[test]
    fn narrow_transitive() {
        let d = Date::constant(2023, 7, 14);
        assert_eq!(Year::constant(2023), d.to_year_month().to_year());
        assert_eq!(d.to_year(), d.to_year_month().to_year());
    }

    #[test]
    fn add_months_clamps() {
        let d = Date::constant(2023, 1, 31);
        assert_eq!(
            Date::constant(2023, 2, 28),
            d.checked_add_months(1).unwrap()
        );
        let d = Date::constant(2024, 1, 31);
        assert_eq!(
            Date::constant(2024, 2, 29),
            d.checked_add_months(1).unwrap()
        );
        // Clamping is not undone by the inverse operation.
        let d = Date::constant(2023, 3, 31);
        let back = d
            .checked_add_months(1)
            .unwrap()
            .checked_add_months(-1)
            .unwrap();
        assert_eq!(Date::constant(2023, 3, 30), back);
    }

    #[test]
    fn add_years_clamps() {
        let d = Date::constant(2024, 2, 29);
        assert_eq!(
            Date::constant(2025, 2, 28),
            d.checked_add_years(1).unwrap()
        );
        assert_eq!(
            Date::constant(2028, 2, 29),
            d.checked_add_years(4).unwrap()
        );
    }

    #[test]
    fn add_days() {
        let d = Date::constant(2023, 12, 31);
        assert_eq!(Date::constant(2024, 1, 1), d.checked_add_days(1).unwrap());
        assert_eq!(
            Date::constant(2023, 1, 1),
            d.checked_add_days(-364).unwrap()
        );
        assert!(Date::MAX.checked_add_days(1).unwrap_err().is_out_of_range());
        assert!(Date::MIN.checked_add_days(-1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn add_zero_is_identity() {
        let d = Date::constant(2023, 1, 31);
        assert_eq!(d, d.checked_add_years(0).unwrap());
        assert_eq!(d, d.checked_add_months(0).unwrap());
        assert_eq!(d, d.checked_add_days(0).unwrap());
    }

    #[test]
    fn out_of_range() {
        assert!(Date::constant(9999, 1, 31)
            .checked_add_months(12)
            .unwrap_err()
            .is_out_of_range());
        assert!(Date::constant(1, 1, 1)
            .checked_add_years(-1)
            .unwrap_err()
            .is_out_of_range());
    }

    #[test]
    fn with_field_revalidates() {
        let d = Date::constant(2024, 2, 29);
        assert!(d.with_year(2023).unwrap_err().is_invalid_field());
        let d = Date::constant(2023, 1, 31);
        assert!(d.with_month(2).unwrap_err().is_invalid_field());
        assert_eq!(Date::constant(2023, 1, 15), d.with_day(15).unwrap());
    }

    #[test]
    fn ordering() {
        assert!(Date::constant(2023, 1, 1) < Date::constant(2023, 1, 2));
        assert!(Date::constant(2023, 1, 2) < Date::constant(2023, 2, 1));
        assert!(Date::constant(2023, 2, 1) < Date::constant(2024, 1, 1));
    }

    quickcheck::quickcheck! {
        fn prop_add_days_then_sub(d: Date, days: i16) -> bool {
            let days = i64::from(days);
            match d.checked_add_days(days) {
                Err(_) => true,
                Ok(sum) => sum.checked_add_days(-days).unwrap() == d,
            }
        }

        fn prop_epoch_day_roundtrip(d: Date) -> bool {
            Date::from_epoch_day(d.to_epoch_day()) == d
        }
    }
}
