use crate::{
    error::Error,
    hash::CanonicalBytes,
    temporal::{Date, Offset, Precision, Time, Year, YearMonth},
    util::common::{MAX_EPOCH_DAY, MIN_EPOCH_DAY},
};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A temporal literal with full date-time precision.
///
/// A `DateTime` is a civil date, a time of day, an optional fractional
/// second with millisecond resolution, and an optional fixed [`Offset`]
/// from UTC. It is the finest precision in the family, and the only one
/// permitted to assert an offset: day precision and coarser never carry
/// timezone information.
///
/// # Optional components are significant
///
/// A `DateTime` without a fractional second is a distinct value from the
/// same instant spelled with `.000`, and a `DateTime` without an offset is
/// distinct from one with `Z`. Equality, ordering, the canonical hash and
/// the printed form all preserve these distinctions. Chronological
/// comparison that looks through them is
/// [`Temporal::compare`](crate::Temporal::compare).
///
/// # Example
///
/// ```
/// use fhir_temporal::{DateTime, Offset};
///
/// let dt: DateTime = "2023-07-14T08:30:15.250-05:00".parse()?;
/// assert_eq!(dt.hour(), 8);
/// assert_eq!(dt.millisecond(), Some(250));
/// assert_eq!(dt.offset(), Some(Offset::from_minutes(-300)?));
/// assert_eq!(dt.to_string(), "2023-07-14T08:30:15.250-05:00");
///
/// # Ok::<(), fhir_temporal::Error>(())
/// ```
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct DateTime {
    date: Date,
    time: Time,
    offset: Option<Offset>,
}

impl DateTime {
    /// The minimum representable date-time, `0001-01-01T00:00:00`.
    pub const MIN: DateTime = DateTime::constant(1, 1, 1, 0, 0, 0);

    /// The maximum representable date-time without a fractional second,
    /// `9999-12-31T23:59:59`.
    pub const MAX: DateTime = DateTime::constant(9999, 12, 31, 23, 59, 59);

    /// Creates a new `DateTime` from its component values, with no
    /// fractional second and no offset.
    ///
    /// Use [`DateTime::with_millisecond`] and [`DateTime::with_offset`] to
    /// attach the optional components.
    ///
    /// # Errors
    ///
    /// This returns an error when any field is out of range, under exactly
    /// the same rules as [`Date::new`] and [`Time::new`].
    #[inline]
    pub fn new(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
    ) -> Result<DateTime, Error> {
        let date = Date::new(year, month, day)?;
        let time = Time::new(hour, minute, second)?;
        Ok(DateTime { date, time, offset: None })
    }

    /// Creates a new `DateTime` in a `const` context, with no fractional
    /// second and no offset.
    ///
    /// # Panics
    ///
    /// This panics when [`DateTime::new`] would return an error.
    #[inline]
    pub const fn constant(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
    ) -> DateTime {
        DateTime {
            date: Date::constant(year, month, day),
            time: Time::constant(hour, minute, second),
            offset: None,
        }
    }

    /// Creates a new `DateTime` from a [`Date`] and a [`Time`], with no
    /// offset.
    ///
    /// Both parts are already valid by construction, so this cannot fail.
    #[inline]
    pub fn from_parts(date: Date, time: Time) -> DateTime {
        DateTime { date, time, offset: None }
    }

    /// Returns the date component.
    #[inline]
    pub fn date(self) -> Date {
        self.date
    }

    /// Returns the time component.
    #[inline]
    pub fn time(self) -> Time {
        self.time
    }

    /// Returns the offset, if one is asserted.
    #[inline]
    pub fn offset(self) -> Option<Offset> {
        self.offset
    }

    /// Returns the year value, exactly as constructed.
    #[inline]
    pub fn year(self) -> i16 {
        self.date.year()
    }

    /// Returns the month value, exactly as constructed.
    #[inline]
    pub fn month(self) -> i8 {
        self.date.month()
    }

    /// Returns the day value, exactly as constructed.
    #[inline]
    pub fn day(self) -> i8 {
        self.date.day()
    }

    /// Returns the hour, exactly as constructed.
    #[inline]
    pub fn hour(self) -> i8 {
        self.time.hour()
    }

    /// Returns the minute, exactly as constructed.
    #[inline]
    pub fn minute(self) -> i8 {
        self.time.minute()
    }

    /// Returns the second, exactly as constructed.
    #[inline]
    pub fn second(self) -> i8 {
        self.time.second()
    }

    /// Returns the fractional second in milliseconds, if one was given.
    #[inline]
    pub fn millisecond(self) -> Option<i16> {
        self.time.millisecond()
    }

    /// Returns the precision tag of this value: [`Precision::DateTime`].
    #[inline]
    pub fn precision(self) -> Precision {
        Precision::DateTime
    }

    /// Narrows this value to date precision, dropping the time and offset.
    ///
    /// Narrowing is lossy and cannot fail.
    #[inline]
    pub fn to_date(self) -> Date {
        self.date
    }

    /// Narrows this value to year-month precision.
    #[inline]
    pub fn to_year_month(self) -> YearMonth {
        self.date.to_year_month()
    }

    /// Narrows this value to year precision.
    #[inline]
    pub fn to_year(self) -> Year {
        self.date.to_year()
    }

    /// Returns a new `DateTime` with the offset replaced by the given
    /// value, or removed entirely when `None` is given.
    ///
    /// An [`Offset`] is valid by construction, so this cannot fail.
    #[inline]
    pub fn with_offset(self, offset: Option<Offset>) -> DateTime {
        DateTime { offset, ..self }
    }

    /// Returns a new `DateTime` with the fractional second replaced by the
    /// given value, or removed entirely when `None` is given.
    ///
    /// # Errors
    ///
    /// This returns an error when the millisecond is outside `0..=999`.
    #[inline]
    pub fn with_millisecond(
        self,
        millisecond: Option<i16>,
    ) -> Result<DateTime, Error> {
        let time = self.time.with_millisecond(millisecond)?;
        Ok(DateTime { time, ..self })
    }

    /// Returns a new `DateTime` with the year replaced by the given value.
    ///
    /// The whole value is revalidated, so changing the year of a February
    /// 29th to a common year fails.
    #[inline]
    pub fn with_year(self, year: i16) -> Result<DateTime, Error> {
        let date = self.date.with_year(year)?;
        Ok(DateTime { date, ..self })
    }

    /// Returns a new `DateTime` with the month replaced by the given value.
    #[inline]
    pub fn with_month(self, month: i8) -> Result<DateTime, Error> {
        let date = self.date.with_month(month)?;
        Ok(DateTime { date, ..self })
    }

    /// Returns a new `DateTime` with the day replaced by the given value.
    #[inline]
    pub fn with_day(self, day: i8) -> Result<DateTime, Error> {
        let date = self.date.with_day(day)?;
        Ok(DateTime { date, ..self })
    }

    /// Returns a new `DateTime` with the hour replaced by the given value.
    #[inline]
    pub fn with_hour(self, hour: i8) -> Result<DateTime, Error> {
        let time = self.time.with_hour(hour)?;
        Ok(DateTime { time, ..self })
    }

    /// Returns a new `DateTime` with the minute replaced by the given
    /// value.
    #[inline]
    pub fn with_minute(self, minute: i8) -> Result<DateTime, Error> {
        let time = self.time.with_minute(minute)?;
        Ok(DateTime { time, ..self })
    }

    /// Returns a new `DateTime` with the second replaced by the given
    /// value.
    #[inline]
    pub fn with_second(self, second: i8) -> Result<DateTime, Error> {
        let time = self.time.with_second(second)?;
        Ok(DateTime { time, ..self })
    }

    /// Returns a copy of this value with the given number of years added.
    ///
    /// The day is clamped to the length of the target month. The time and
    /// offset are unchanged. Adding zero returns this value unchanged.
    ///
    /// # Errors
    ///
    /// This fails when the resulting year falls outside `1..=9999`.
    #[inline]
    pub fn checked_add_years(self, years: i64) -> Result<DateTime, Error> {
        let date = self.date.checked_add_years(years)?;
        Ok(DateTime { date, ..self })
    }

    /// Returns a copy of this value with the given number of months added,
    /// clamping the day to the target month. The time and offset are
    /// unchanged.
    #[inline]
    pub fn checked_add_months(self, months: i64) -> Result<DateTime, Error> {
        let date = self.date.checked_add_months(months)?;
        Ok(DateTime { date, ..self })
    }

    /// Returns a copy of this value with the given number of days added.
    /// The time and offset are unchanged.
    #[inline]
    pub fn checked_add_days(self, days: i64) -> Result<DateTime, Error> {
        let date = self.date.checked_add_days(days)?;
        Ok(DateTime { date, ..self })
    }

    /// Returns a copy of this value with the given number of hours added.
    ///
    /// Time arithmetic is civil: it rolls over into the date, and a day is
    /// always exactly 24 hours. The offset is unchanged.
    ///
    /// # Errors
    ///
    /// This fails when the resulting date falls outside the supported
    /// range.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::DateTime;
    ///
    /// let dt: DateTime = "2023-12-31T23:00:00".parse()?;
    /// assert_eq!(
    ///     dt.checked_add_hours(2)?.to_string(),
    ///     "2024-01-01T01:00:00",
    /// );
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    #[inline]
    pub fn checked_add_hours(self, hours: i64) -> Result<DateTime, Error> {
        let millis = hours
            .checked_mul(3_600_000)
            .ok_or_else(|| Error::out_of_range("hours"))?;
        self.checked_add_millis(millis, "hours")
    }

    /// Returns a copy of this value with the given number of minutes
    /// added, rolling over into the date as needed.
    #[inline]
    pub fn checked_add_minutes(self, minutes: i64) -> Result<DateTime, Error> {
        let millis = minutes
            .checked_mul(60_000)
            .ok_or_else(|| Error::out_of_range("minutes"))?;
        self.checked_add_millis(millis, "minutes")
    }

    /// Returns a copy of this value with the given number of seconds
    /// added, rolling over into the date as needed.
    #[inline]
    pub fn checked_add_seconds(self, seconds: i64) -> Result<DateTime, Error> {
        let millis = seconds
            .checked_mul(1_000)
            .ok_or_else(|| Error::out_of_range("seconds"))?;
        self.checked_add_millis(millis, "seconds")
    }

    /// Returns a copy of this value with the given number of milliseconds
    /// added, rolling over into the date as needed.
    ///
    /// When the result has a non-zero sub-second component, it carries an
    /// explicit fractional second even if this value had none.
    #[inline]
    pub fn checked_add_milliseconds(
        self,
        milliseconds: i64,
    ) -> Result<DateTime, Error> {
        self.checked_add_millis(milliseconds, "milliseconds")
    }

    fn checked_add_millis(
        self,
        millis: i64,
        what: &'static str,
    ) -> Result<DateTime, Error> {
        if millis == 0 {
            return Ok(self);
        }
        let total = i64::from(self.date.to_epoch_day()) * MILLIS_PER_DAY
            + self.time.to_millis_of_day();
        let total = total
            .checked_add(millis)
            .ok_or_else(|| Error::out_of_range(what))?;
        let days = total.div_euclid(MILLIS_PER_DAY);
        if !(i64::from(MIN_EPOCH_DAY)..=i64::from(MAX_EPOCH_DAY))
            .contains(&days)
        {
            return Err(Error::out_of_range(what));
        }
        let time = Time::from_millis_of_day(
            total.rem_euclid(MILLIS_PER_DAY),
            self.time.millisecond().is_some(),
        );
        Ok(DateTime {
            date: Date::from_epoch_day(days as i32),
            time,
            offset: self.offset,
        })
    }

    /// Returns the canonical byte encoding of this value.
    ///
    /// See [`CanonicalBytes`] for the encoding contract.
    pub fn canonical_bytes(self) -> CanonicalBytes {
        let mut enc = CanonicalBytes::for_precision(Precision::DateTime);
        enc.put_i32(i32::from(self.date.year()));
        enc.put_u8(self.date.month() as u8);
        enc.put_u8(self.date.day() as u8);
        enc.put_u8(self.time.hour() as u8);
        enc.put_u8(self.time.minute() as u8);
        enc.put_u8(self.time.second() as u8);
        enc.put_optional_i16(self.time.millisecond());
        enc.put_optional_i16(self.offset.map(|o| o.minutes()));
        enc
    }

    /// The instant this value denotes, as milliseconds since the Unix
    /// epoch, with an absent fraction counting as zero and an absent
    /// offset counting as UTC.
    pub(crate) fn to_epoch_millis(self) -> i64 {
        let civil = i64::from(self.date.to_epoch_day()) * MILLIS_PER_DAY
            + self.time.to_millis_of_day();
        let offset = i64::from(self.offset.map_or(0, |o| o.minutes()));
        civil - offset * 60_000
    }
}

impl core::hash::Hash for DateTime {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write(self.canonical_bytes().as_bytes());
    }
}

impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        crate::fmt::printer::print_datetime(self, f)
    }
}

impl core::fmt::Debug for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "DateTime({self})")
    }
}

impl core::str::FromStr for DateTime {
    type Err = Error;

    fn from_str(string: &str) -> Result<DateTime, Error> {
        crate::fmt::parse_datetime(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for DateTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> DateTime {
        use quickcheck::Arbitrary;

        DateTime {
            date: Date::arbitrary(g),
            time: Time::arbitrary(g),
            offset: Option::<Offset>::arbitrary(g),
        }
    }
}
