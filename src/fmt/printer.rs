use crate::temporal::{Date, DateTime, Offset, Time, Year, YearMonth};

// Printing is the exact inverse of parsing: fixed width zero padded
// fields, and optional components only when the value carries them. The
// fraction always prints with three digits, since the value does not
// remember how many digits its input used.

pub(crate) fn print_year(
    year: &Year,
    f: &mut core::fmt::Formatter,
) -> core::fmt::Result {
    write!(f, "{:04}", year.year())
}

pub(crate) fn print_year_month(
    ym: &YearMonth,
    f: &mut core::fmt::Formatter,
) -> core::fmt::Result {
    write!(f, "{:04}-{:02}", ym.year(), ym.month())
}

pub(crate) fn print_date(
    date: &Date,
    f: &mut core::fmt::Formatter,
) -> core::fmt::Result {
    write!(f, "{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

pub(crate) fn print_time(
    time: &Time,
    f: &mut core::fmt::Formatter,
) -> core::fmt::Result {
    write!(f, "{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())?;
    if let Some(millisecond) = time.millisecond() {
        write!(f, ".{millisecond:03}")?;
    }
    Ok(())
}

pub(crate) fn print_offset(
    offset: &Offset,
    f: &mut core::fmt::Formatter,
) -> core::fmt::Result {
    if offset.is_utc() {
        return f.write_str("Z");
    }
    let sign = if offset.minutes() < 0 { '-' } else { '+' };
    let magnitude = offset.minutes().unsigned_abs();
    write!(f, "{sign}{:02}:{:02}", magnitude / 60, magnitude % 60)
}

pub(crate) fn print_datetime(
    dt: &DateTime,
    f: &mut core::fmt::Formatter,
) -> core::fmt::Result {
    print_date(&dt.date(), f)?;
    f.write_str("T")?;
    print_time(&dt.time(), f)?;
    if let Some(offset) = dt.offset() {
        print_offset(&offset, f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::temporal::{Date, DateTime, Offset, Year, YearMonth};

    #[test]
    fn zero_padding() {
        assert_eq!("0001", Year::constant(1).to_string());
        assert_eq!("0042-03", YearMonth::constant(42, 3).to_string());
        assert_eq!("0999-01-05", Date::constant(999, 1, 5).to_string());
        assert_eq!(
            "2023-01-02T03:04:05",
            DateTime::constant(2023, 1, 2, 3, 4, 5).to_string()
        );
    }

    #[test]
    fn fraction_prints_three_digits() {
        let dt = DateTime::constant(2023, 7, 14, 8, 30, 15)
            .with_millisecond(Some(7))
            .unwrap();
        assert_eq!("2023-07-14T08:30:15.007", dt.to_string());
    }

    #[test]
    fn zero_offset_prints_zulu() {
        let dt = DateTime::constant(2023, 7, 14, 8, 30, 15)
            .with_offset(Some(Offset::UTC));
        assert_eq!("2023-07-14T08:30:15Z", dt.to_string());
    }
}
