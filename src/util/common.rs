/*!
The one and only copy of this crate's calendar logic.

The leap year rule, the month length table and the conversions between a
civil date and a count of days since the Unix epoch all live here. The
validator, the widening routines and the arithmetic routines are all
required to go through these functions. Keeping a single copy is what
guarantees that, say, `Date::checked_add_months` and `YearMonth::latest`
can never disagree about how long February is.

# Algorithms

The epoch day conversions are adapted from Howard Hinnant's civil calendar
algorithms:

- https://howardhinnant.github.io/date_algorithms.html
*/

/// The minimum supported year.
///
/// FHIR temporal literals are four ASCII digits with no sign, so year zero
/// and negative years are unrepresentable.
pub(crate) const MIN_YEAR: i16 = 1;

/// The maximum supported year.
pub(crate) const MAX_YEAR: i16 = 9999;

/// The number of days since the Unix epoch for `0001-01-01`.
pub(crate) const MIN_EPOCH_DAY: i32 = -719_162;

/// The number of days since the Unix epoch for `9999-12-31`.
pub(crate) const MAX_EPOCH_DAY: i32 = 2_932_896;

/// Returns true if and only if the given year is a leap year.
///
/// A year is a leap year when it is divisible by 4, unless it is also
/// divisible by 100 and not by 400.
#[inline]
pub(crate) const fn is_leap_year(year: i16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the given year and month.
///
/// This correctly returns `29` when the year is a leap year and the month is
/// February. When the given month is invalid, this returns `0`.
#[inline]
pub(crate) const fn days_in_month(year: i16, month: i8) -> i8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Saturates the given day in the month.
///
/// That is, if the day exceeds the maximum number of days in the given year
/// and month, then this returns the maximum. Otherwise, it returns the day
/// given. This is the clamping rule used by month and year arithmetic:
/// `2023-01-31` plus one month is `2023-02-28`, never a rollover into March.
#[inline]
pub(crate) fn saturate_day_in_month(year: i16, month: i8, day: i8) -> i8 {
    day.min(days_in_month(year, month))
}

/// Converts a valid civil date to the number of days since the Unix epoch.
///
/// Callers must only hand this a date that has already been validated. The
/// result is always in `MIN_EPOCH_DAY..=MAX_EPOCH_DAY`.
pub(crate) fn to_epoch_day(year: i16, month: i8, day: i8) -> i32 {
    let year = i32::from(year) - i32::from(month <= 2);
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month = i32::from(month);
    let day_of_year =
        (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5
            + i32::from(day)
            - 1;
    let day_of_era =
        year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Converts a number of days since the Unix epoch back to a civil date.
///
/// Callers must only hand this a value in `MIN_EPOCH_DAY..=MAX_EPOCH_DAY`.
pub(crate) fn from_epoch_day(epoch_day: i32) -> (i16, i8, i8) {
    let days = epoch_day + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days - era * 146_097;
    let year_of_era = (day_of_era - day_of_era / 1_460 + day_of_era / 36_524
        - day_of_era / 146_096)
        / 365;
    let year = year_of_era + era * 400;
    let day_of_year =
        day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let mp = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = year + i32::from(month <= 2);
    (year as i16, month as i8, day as i8)
}
