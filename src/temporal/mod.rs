/*!
Partial precision temporal values and the operations that relate them.

The four value types in this module form a precision ladder. Each one
commits to exactly the calendar fields its precision names and nothing
finer:

* [`Year`] is a calendar year, `2023`.
* [`YearMonth`] is a month of a year, `2023-07`.
* [`Date`] is a civil day, `2023-07-14`.
* [`DateTime`] is a day plus a time, an optional millisecond fraction
  and an optional UTC [`Offset`], `2023-07-14T08:30:15.250-05:00`.

[`Temporal`] is the sum of the four, for code that handles a literal of
any precision uniformly. Every value is valid by construction, prints
back to exactly the text it parsed from, and exposes a canonical byte
encoding for content hashing via `canonical_bytes`.

Moving along the ladder is always explicit. Narrowing (`to_year`,
`to_year_month`, `to_date`) drops fields and cannot fail. Widening
(`earliest`, `latest`) resolves a coarse value to the bounds of the
interval it denotes, so `Year::latest` knows about leap years and
`Temporal::latest` lands on a `23:59:59.999` date-time.
*/

pub use self::{
    date::Date, datetime::DateTime, offset::Offset, time::Time, year::Year,
    year_month::YearMonth,
};

use core::cmp::Ordering;

use crate::{error::Error, hash::CanonicalBytes};

mod date;
mod datetime;
mod offset;
mod time;
mod year;
mod year_month;

/// The precision of a temporal value.
///
/// Precisions are ordered from coarsest to finest, so
/// `Precision::Year < Precision::DateTime`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Precision {
    /// A calendar year, like `2023`.
    Year,
    /// A month of a calendar year, like `2023-07`.
    YearMonth,
    /// A civil date, like `2023-07-14`.
    Date,
    /// A date with a time of day, like `2023-07-14T08:30:15`.
    DateTime,
}

impl Precision {
    /// The leading discriminant byte of the canonical encoding.
    pub(crate) fn marker(self) -> u8 {
        match self {
            Precision::Year => 1,
            Precision::YearMonth => 2,
            Precision::Date => 3,
            Precision::DateTime => 4,
        }
    }
}

impl core::fmt::Display for Precision {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let name = match *self {
            Precision::Year => "year",
            Precision::YearMonth => "year-month",
            Precision::Date => "date",
            Precision::DateTime => "date-time",
        };
        f.write_str(name)
    }
}

/// A unit of time usable with [`Temporal::checked_add`].
///
/// Not every unit applies to every precision. A unit finer than the
/// value it is applied to is rejected with an
/// [`ErrorKind::UnsupportedUnit`](crate::ErrorKind::UnsupportedUnit)
/// error rather than silently widening the value.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Unit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let name = match *self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
            Unit::Millisecond => "millisecond",
        };
        f.write_str(name)
    }
}

/// A temporal literal of any precision.
///
/// This is the type to use when the precision of a value is data rather
/// than something the program knows up front, which is the common case
/// when the values come from parsed text. [`Temporal::from_str`] detects
/// the precision from the shape of its input:
///
/// ```
/// use fhir_temporal::{Precision, Temporal};
///
/// let t: Temporal = "2023-07".parse()?;
/// assert_eq!(t.precision(), Precision::YearMonth);
///
/// # Ok::<(), fhir_temporal::Error>(())
/// ```
///
/// # Equality and ordering
///
/// The derived `Eq` and `Ord` are structural: values of different
/// precision are never equal, and coarser precisions order before finer
/// ones regardless of the calendar. Chronological comparison across
/// precisions, which can fail, is [`Temporal::compare`].
///
/// # Hashing
///
/// `Hash` feeds the canonical byte encoding to the hasher, so equal
/// values hash equally and values of different precision that share
/// fields, like `2023` and `2023-01`, never collide by construction.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Temporal {
    Year(Year),
    YearMonth(YearMonth),
    Date(Date),
    DateTime(DateTime),
}

impl Temporal {
    /// Returns the precision of this value.
    #[inline]
    pub fn precision(self) -> Precision {
        match self {
            Temporal::Year(_) => Precision::Year,
            Temporal::YearMonth(_) => Precision::YearMonth,
            Temporal::Date(_) => Precision::Date,
            Temporal::DateTime(_) => Precision::DateTime,
        }
    }

    /// Narrows this value to the given precision by dropping fields.
    ///
    /// Narrowing to this value's own precision, or to a finer one, is a
    /// no-op. Narrowing never invents data and cannot fail.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::{Precision, Temporal};
    ///
    /// let t: Temporal = "2023-07-14T08:30:15".parse()?;
    /// let ym = t.narrow_to(Precision::YearMonth);
    /// assert_eq!(ym.to_string(), "2023-07");
    /// // Narrowing is monotone: once at year precision, it stays there.
    /// assert_eq!(ym.narrow_to(Precision::Year).to_string(), "2023");
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    pub fn narrow_to(self, precision: Precision) -> Temporal {
        if precision >= self.precision() {
            return self;
        }
        match (self, precision) {
            (Temporal::YearMonth(ym), Precision::Year) => ym.to_year().into(),
            (Temporal::Date(d), Precision::Year) => d.to_year().into(),
            (Temporal::Date(d), Precision::YearMonth) => {
                d.to_year_month().into()
            }
            (Temporal::DateTime(dt), Precision::Year) => dt.to_year().into(),
            (Temporal::DateTime(dt), Precision::YearMonth) => {
                dt.to_year_month().into()
            }
            (Temporal::DateTime(dt), Precision::Date) => dt.to_date().into(),
            // The guard above already returned for these.
            (t, _) => t,
        }
    }

    /// Widens this value to the earliest [`DateTime`] it could denote.
    ///
    /// For a [`Year`] this is January 1st at `00:00:00.000`, and so on
    /// down the ladder. A `DateTime` without a fractional second widens
    /// to itself at `.000`; one with a fraction is already exact and is
    /// returned unchanged. The offset, when present, is preserved.
    pub fn earliest(self) -> DateTime {
        match self {
            Temporal::Year(y) => y.earliest().earliest(),
            Temporal::YearMonth(ym) => ym.earliest().earliest(),
            Temporal::Date(d) => d.earliest(),
            Temporal::DateTime(dt) => match dt.millisecond() {
                Some(_) => dt,
                // 0..=999 never fails validation.
                None => dt.with_millisecond(Some(0)).unwrap(),
            },
        }
    }

    /// Widens this value to the latest [`DateTime`] it could denote.
    ///
    /// The counterpart of [`Temporal::earliest`]: December 31st for a
    /// year, the last day of the month for a year-month, `23:59:59.999`
    /// for anything without a time, and `.999` for a date-time without a
    /// fraction.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::Temporal;
    ///
    /// let t: Temporal = "2024-02".parse()?;
    /// assert_eq!(t.latest().to_string(), "2024-02-29T23:59:59.999");
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    pub fn latest(self) -> DateTime {
        match self {
            Temporal::Year(y) => y.latest().latest(),
            Temporal::YearMonth(ym) => ym.latest().latest(),
            Temporal::Date(d) => d.latest(),
            Temporal::DateTime(dt) => match dt.millisecond() {
                Some(_) => dt,
                None => dt.with_millisecond(Some(999)).unwrap(),
            },
        }
    }

    /// Returns a copy of this value with `amount` of the given unit
    /// added, at this value's own precision.
    ///
    /// Arithmetic never changes precision: adding a month to a
    /// [`YearMonth`] yields a `YearMonth`. A unit finer than this
    /// value's precision is an error, since honoring it would require
    /// inventing the missing fields.
    ///
    /// # Errors
    ///
    /// This fails with an unsupported unit error when the unit does not
    /// apply to this precision, and with a range error when the result
    /// leaves the representable calendar.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::{Temporal, Unit};
    ///
    /// let t: Temporal = "2023-01-31".parse()?;
    /// assert_eq!(t.checked_add(1, Unit::Month)?.to_string(), "2023-02-28");
    /// assert!(t.checked_add(1, Unit::Hour).is_err());
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    pub fn checked_add(self, amount: i64, unit: Unit) -> Result<Temporal, Error> {
        match self {
            Temporal::Year(y) => match unit {
                Unit::Year => Ok(y.checked_add_years(amount)?.into()),
                _ => Err(Error::unsupported_unit(unit, self.precision())),
            },
            Temporal::YearMonth(ym) => match unit {
                Unit::Year => Ok(ym.checked_add_years(amount)?.into()),
                Unit::Month => Ok(ym.checked_add_months(amount)?.into()),
                _ => Err(Error::unsupported_unit(unit, self.precision())),
            },
            Temporal::Date(d) => match unit {
                Unit::Year => Ok(d.checked_add_years(amount)?.into()),
                Unit::Month => Ok(d.checked_add_months(amount)?.into()),
                Unit::Day => Ok(d.checked_add_days(amount)?.into()),
                _ => Err(Error::unsupported_unit(unit, self.precision())),
            },
            Temporal::DateTime(dt) => match unit {
                Unit::Year => Ok(dt.checked_add_years(amount)?.into()),
                Unit::Month => Ok(dt.checked_add_months(amount)?.into()),
                Unit::Day => Ok(dt.checked_add_days(amount)?.into()),
                Unit::Hour => Ok(dt.checked_add_hours(amount)?.into()),
                Unit::Minute => Ok(dt.checked_add_minutes(amount)?.into()),
                Unit::Second => Ok(dt.checked_add_seconds(amount)?.into()),
                Unit::Millisecond => {
                    Ok(dt.checked_add_milliseconds(amount)?.into())
                }
            },
        }
    }

    /// Compares two values chronologically, across precisions.
    ///
    /// Each value denotes an interval of instants, with a coarse value
    /// covering its whole span and an exact date-time covering a single
    /// millisecond. Two values are ordered when their intervals do not
    /// overlap, and equal when their intervals coincide. When the
    /// intervals partially overlap, as for `2023` against `2023-07`, no
    /// honest answer exists and an error is returned instead of a guess.
    ///
    /// For the purposes of this resolution only, a missing offset is
    /// read as UTC and a missing fraction as the span of its second.
    /// The values themselves are not changed.
    ///
    /// # Example
    ///
    /// ```
    /// use core::cmp::Ordering;
    ///
    /// use fhir_temporal::Temporal;
    ///
    /// let year: Temporal = "2023".parse()?;
    /// let month: Temporal = "2024-06".parse()?;
    /// assert_eq!(year.compare(&month)?, Ordering::Less);
    ///
    /// let inside: Temporal = "2023-07".parse()?;
    /// assert!(year.compare(&inside).unwrap_err().is_incomparable());
    ///
    /// # Ok::<(), fhir_temporal::Error>(())
    /// ```
    pub fn compare(&self, other: &Temporal) -> Result<Ordering, Error> {
        if self == other {
            return Ok(Ordering::Equal);
        }
        let (lhs_start, lhs_end) = self.interval_millis();
        let (rhs_start, rhs_end) = other.interval_millis();
        if lhs_start == rhs_start && lhs_end == rhs_end {
            return Ok(Ordering::Equal);
        }
        if lhs_end < rhs_start {
            return Ok(Ordering::Less);
        }
        if rhs_end < lhs_start {
            return Ok(Ordering::Greater);
        }
        Err(Error::incomparable(self.precision(), other.precision()))
    }

    /// The inclusive interval of instants this value denotes, in
    /// milliseconds since the Unix epoch.
    fn interval_millis(&self) -> (i64, i64) {
        (self.earliest().to_epoch_millis(), self.latest().to_epoch_millis())
    }

    /// Returns the canonical byte encoding of this value.
    ///
    /// See [`CanonicalBytes`] for the encoding contract.
    pub fn canonical_bytes(self) -> CanonicalBytes {
        match self {
            Temporal::Year(y) => y.canonical_bytes(),
            Temporal::YearMonth(ym) => ym.canonical_bytes(),
            Temporal::Date(d) => d.canonical_bytes(),
            Temporal::DateTime(dt) => dt.canonical_bytes(),
        }
    }
}

impl From<Year> for Temporal {
    #[inline]
    fn from(year: Year) -> Temporal {
        Temporal::Year(year)
    }
}

impl From<YearMonth> for Temporal {
    #[inline]
    fn from(ym: YearMonth) -> Temporal {
        Temporal::YearMonth(ym)
    }
}

impl From<Date> for Temporal {
    #[inline]
    fn from(date: Date) -> Temporal {
        Temporal::Date(date)
    }
}

impl From<DateTime> for Temporal {
    #[inline]
    fn from(dt: DateTime) -> Temporal {
        Temporal::DateTime(dt)
    }
}

impl core::hash::Hash for Temporal {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write(self.canonical_bytes().as_bytes());
    }
}

impl core::fmt::Display for Temporal {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Temporal::Year(ref y) => y.fmt(f),
            Temporal::YearMonth(ref ym) => ym.fmt(f),
            Temporal::Date(ref d) => d.fmt(f),
            Temporal::DateTime(ref dt) => dt.fmt(f),
        }
    }
}

impl core::str::FromStr for Temporal {
    type Err = Error;

    fn from_str(string: &str) -> Result<Temporal, Error> {
        crate::fmt::parse_temporal(string)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Temporal {
    fn arbitrary(g: &mut quickcheck::Gen) -> Temporal {
        use quickcheck::Arbitrary;

        match u8::arbitrary(g) % 4 {
            0 => Temporal::Year(Year::arbitrary(g)),
            1 => Temporal::YearMonth(YearMonth::arbitrary(g)),
            2 => Temporal::Date(Date::arbitrary(g)),
            _ => Temporal::DateTime(DateTime::arbitrary(g)),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn t(string: &str) -> Temporal {
        string.parse().unwrap()
    }

    #[test]
    fn precision_detection() {
        assert_eq!(Precision::Year, t("2023").precision());
        assert_eq!(Precision::YearMonth, t("2023-07").precision());
        assert_eq!(Precision::Date, t("2023-07-14").precision());
        assert_eq!(
            Precision::DateTime,
            t("2023-07-14T08:30:15").precision()
        );
        assert_eq!(
            Precision::DateTime,
            t("2023-07-14T08:30:15.250-05:00").precision()
        );
    }

    #[test]
    fn narrow() {
        let dt = t("2023-07-14T08:30:15.250Z");
        assert_eq!(t("2023-07-14"), dt.narrow_to(Precision::Date));
        assert_eq!(t("2023-07"), dt.narrow_to(Precision::YearMonth));
        assert_eq!(t("2023"), dt.narrow_to(Precision::Year));
        // Narrowing to a finer precision is a no-op.
        assert_eq!(t("2023"), t("2023").narrow_to(Precision::DateTime));
    }

    #[test]
    fn narrow_is_transitive() {
        let dt = t("2024-02-29T12:00:00");
        assert_eq!(
            dt.narrow_to(Precision::Date).narrow_to(Precision::Year),
            dt.narrow_to(Precision::Year),
        );
    }

    #[test]
    fn widen() {
        assert_eq!(
            "2023-01-01T00:00:00.000",
            t("2023").earliest().to_string()
        );
        assert_eq!(
            "2023-12-31T23:59:59.999",
            t("2023").latest().to_string()
        );
        assert_eq!(
            "2024-02-29T23:59:59.999",
            t("2024-02").latest().to_string()
        );
        assert_eq!(
            "2023-07-14T08:30:15.000",
            t("2023-07-14T08:30:15").earliest().to_string()
        );
        // An exact date-time is its own bound.
        assert_eq!(
            "2023-07-14T08:30:15.250Z",
            t("2023-07-14T08:30:15.250Z").latest().to_string()
        );
    }

    #[test]
    fn add_dispatch() {
        assert_eq!(t("2024"), t("2023").checked_add(1, Unit::Year).unwrap());
        assert_eq!(
            t("2023-02-28"),
            t("2023-01-31").checked_add(1, Unit::Month).unwrap()
        );
        assert_eq!(
            t("2024-01-01T01:00:00"),
            t("2023-12-31T23:00:00").checked_add(2, Unit::Hour).unwrap()
        );
        let err = t("2023").checked_add(1, Unit::Month).unwrap_err();
        assert!(err.is_unsupported_unit());
        let err = t("2023-07-14").checked_add(1, Unit::Second).unwrap_err();
        assert!(err.is_unsupported_unit());
        assert!(t("9999")
            .checked_add(1, Unit::Year)
            .unwrap_err()
            .is_out_of_range());
    }

    #[test]
    fn compare_points() {
        assert_eq!(
            Ordering::Less,
            t("2023-07-14T08:30:15.000Z")
                .compare(&t("2023-07-14T08:30:15.001Z"))
                .unwrap()
        );
        // The same instant spelled with different offsets is equal.
        assert_eq!(
            Ordering::Equal,
            t("2023-07-14T08:00:00.000Z")
                .compare(&t("2023-07-14T09:00:00.000+01:00"))
                .unwrap()
        );
    }

    #[test]
    fn compare_disjoint_intervals() {
        assert_eq!(Ordering::Less, t("2023").compare(&t("2024-06")).unwrap());
        assert_eq!(
            Ordering::Greater,
            t("2023-08").compare(&t("2023-07-31")).unwrap()
        );
        assert_eq!(
            Ordering::Less,
            t("2023-07-14T23:59:59.999")
                .compare(&t("2023-07-15"))
                .unwrap()
        );
    }

    #[test]
    fn compare_overlap_is_incomparable() {
        let err = t("2023").compare(&t("2023-07")).unwrap_err();
        assert!(err.is_incomparable());
        assert!(t("2023-07-14")
            .compare(&t("2023-07-14T08:30:15"))
            .unwrap_err()
            .is_incomparable());
        // A second-precision value spans its fraction, so an instant
        // inside it is neither before nor after.
        assert!(t("2023-07-14T08:30:15")
            .compare(&t("2023-07-14T08:30:15.250"))
            .unwrap_err()
            .is_incomparable());
    }

    #[test]
    fn compare_identical_intervals() {
        assert_eq!(Ordering::Equal, t("2023").compare(&t("2023")).unwrap());
        // Same span, different precision.
        assert_eq!(
            Ordering::Equal,
            t("2023-07").compare(&t("2023-07")).unwrap()
        );
    }

    #[test]
    fn structural_order_is_precision_first() {
        assert!(t("2023") < t("2023-01"));
        assert!(t("9999") < t("0001-01"));
    }

    quickcheck::quickcheck! {
        fn prop_compare_is_antisymmetric(a: Temporal, b: Temporal) -> bool {
            match (a.compare(&b), b.compare(&a)) {
                (Ok(x), Ok(y)) => x == y.reverse(),
                (Err(_), Err(_)) => true,
                _ => false,
            }
        }

        fn prop_earliest_not_after_latest(t: Temporal) -> bool {
            t.earliest().to_epoch_millis() <= t.latest().to_epoch_millis()
        }

        fn prop_narrow_preserves_lead_fields(dt: DateTime) -> bool {
            let t = Temporal::from(dt);
            match t.narrow_to(Precision::YearMonth) {
                Temporal::YearMonth(ym) => {
                    ym.year() == dt.year() && ym.month() == dt.month()
                }
                _ => false,
            }
        }
    }
}
