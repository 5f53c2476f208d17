use crate::{
    error::Error,
    fmt::Parsed,
    temporal::{Date, DateTime, Offset, Temporal, Year, YearMonth},
};

/// A parser for partial precision temporal literals.
///
/// All parsing routines work on a prefix of their input and report the
/// unparsed remainder via [`Parsed`]. Whether trailing input is acceptable
/// is the caller's decision, not the parser's.
#[derive(Debug)]
pub(crate) struct Parser {
    /// There are currently no configuration options for this parser.
    _priv: (),
}

impl Parser {
    /// Create a new parser with the default configuration.
    pub(crate) const fn new() -> Parser {
        Parser { _priv: () }
    }

    /// Parses a temporal literal of any precision.
    ///
    /// The precision is decided by how far the input extends: a separator
    /// commits the parser to the next level, and anything else ends the
    /// literal. So `2023-07` is a year-month, while `2023` followed by
    /// arbitrary non-separator input is a year with that input remaining.
    pub(crate) fn parse_temporal<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Temporal>, Error> {
        let Parsed { value: year, input } = self.parse_year(input)?;
        if !input.starts_with(b"-") {
            return Ok(Parsed { value: Temporal::Year(year), input });
        }
        let Parsed { value: month, input } =
            self.parse_two_digits(&input[1..], "a two digit month")?;
        if !input.starts_with(b"-") {
            let value =
                Temporal::YearMonth(YearMonth::new(year.year(), month)?);
            return Ok(Parsed { value, input });
        }
        let Parsed { value: day, input } =
            self.parse_two_digits(&input[1..], "a two digit day")?;
        if !matches!(input.first(), Some(&(b'T' | b't'))) {
            let value = Temporal::Date(Date::new(year.year(), month, day)?);
            return Ok(Parsed { value, input });
        }
        let Parsed { value, input } =
            self.parse_time_onto(year.year(), month, day, &input[1..])?;
        trace!("parsed date-time literal {value}");
        Ok(Parsed { value: Temporal::DateTime(value), input })
    }

    /// Parses and validates the leading four digit year.
    ///
    /// The year is always judged first: an out-of-range year reports as
    /// such no matter how mangled the rest of the input is.
    pub(crate) fn parse_year<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Year>, Error> {
        let Parsed { value: year, input } = self.parse_year_digits(input)?;
        Ok(Parsed { value: Year::new(year)?, input })
    }

    pub(crate) fn parse_year_month<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, YearMonth>, Error> {
        let Parsed { value: year, input } = self.parse_year(input)?;
        let input =
            self.expect(input, b'-', "a '-' between year and month")?;
        let Parsed { value: month, input } =
            self.parse_two_digits(input, "a two digit month")?;
        Ok(Parsed { value: YearMonth::new(year.year(), month)?, input })
    }

    pub(crate) fn parse_date<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Date>, Error> {
        let Parsed { value: year, input } = self.parse_year(input)?;
        let input =
            self.expect(input, b'-', "a '-' between year and month")?;
        let Parsed { value: month, input } =
            self.parse_two_digits(input, "a two digit month")?;
        let input = self.expect(input, b'-', "a '-' between month and day")?;
        let Parsed { value: day, input } =
            self.parse_two_digits(input, "a two digit day")?;
        Ok(Parsed { value: Date::new(year.year(), month, day)?, input })
    }

    pub(crate) fn parse_datetime<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, DateTime>, Error> {
        let Parsed { value: date, input } = self.parse_date(input)?;
        let Some(&(b'T' | b't')) = input.first() else {
            return Err(Error::malformed("a 'T' between date and time"));
        };
        self.parse_time_onto(
            date.year(),
            date.month(),
            date.day(),
            &input[1..],
        )
    }

    /// Parses the `hh:mm:ss[.fff][Z|±hh:mm]` tail after the `T` separator.
    ///
    /// Once the separator has committed to a time, the whole time is
    /// mandatory. Only the fraction and offset are optional.
    fn parse_time_onto<'i>(
        &self,
        year: i16,
        month: i8,
        day: i8,
        input: &'i [u8],
    ) -> Result<Parsed<'i, DateTime>, Error> {
        let Parsed { value: hour, input } =
            self.parse_two_digits(input, "a two digit hour")?;
        let input =
            self.expect(input, b':', "a ':' between hour and minute")?;
        let Parsed { value: minute, input } =
            self.parse_two_digits(input, "a two digit minute")?;
        let input =
            self.expect(input, b':', "a ':' between minute and second")?;
        let Parsed { value: second, input } =
            self.parse_two_digits(input, "a two digit second")?;
        let Parsed { value: millisecond, input } =
            self.parse_fraction(input)?;
        let Parsed { value: offset, input } = self.parse_offset(input)?;
        let value = DateTime::new(year, month, day, hour, minute, second)?
            // The fraction digits are at most three, so the range check
            // cannot fail here.
            .with_millisecond(millisecond)?
            .with_offset(offset);
        Ok(Parsed { value, input })
    }

    fn parse_year_digits<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, i16>, Error> {
        if input.len() < 4 || !input[..4].iter().all(u8::is_ascii_digit) {
            return Err(Error::malformed("a four digit year"));
        }
        let mut year: i16 = 0;
        for &byte in &input[..4] {
            year = year * 10 + i16::from(byte - b'0');
        }
        Ok(Parsed { value: year, input: &input[4..] })
    }

    fn parse_two_digits<'i>(
        &self,
        input: &'i [u8],
        expected: &'static str,
    ) -> Result<Parsed<'i, i8>, Error> {
        if input.len() < 2 || !input[..2].iter().all(u8::is_ascii_digit) {
            return Err(Error::malformed(expected));
        }
        let value = ((input[0] - b'0') * 10 + (input[1] - b'0')) as i8;
        Ok(Parsed { value, input: &input[2..] })
    }

    /// Parses an optional `.fff` fractional second with one to three
    /// digits. Short fractions scale up, so `.2` is 200 milliseconds.
    fn parse_fraction<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Option<i16>>, Error> {
        if !input.starts_with(b".") {
            return Ok(Parsed { value: None, input });
        }
        let input = &input[1..];
        let digits =
            input.iter().take_while(|byte| byte.is_ascii_digit()).count();
        if digits == 0 {
            return Err(Error::malformed(
                "at least one fractional second digit",
            ));
        }
        if digits > 3 {
            return Err(Error::malformed(
                "at most three fractional second digits",
            ));
        }
        let mut millis: i16 = 0;
        for &byte in &input[..digits] {
            millis = millis * 10 + i16::from(byte - b'0');
        }
        for _ in digits..3 {
            millis *= 10;
        }
        Ok(Parsed { value: Some(millis), input: &input[digits..] })
    }

    /// Parses an optional `Z` or `±hh:mm` offset.
    fn parse_offset<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Option<Offset>>, Error> {
        let Some(&first) = input.first() else {
            return Ok(Parsed { value: None, input });
        };
        let sign = match first {
            b'Z' | b'z' => {
                return Ok(Parsed {
                    value: Some(Offset::UTC),
                    input: &input[1..],
                });
            }
            b'+' => 1,
            b'-' => -1,
            _ => return Ok(Parsed { value: None, input }),
        };
        let Parsed { value: hours, input } =
            self.parse_two_digits(&input[1..], "a two digit offset hour")?;
        let input = self.expect(
            input,
            b':',
            "a ':' between offset hour and minute",
        )?;
        let Parsed { value: minutes, input } =
            self.parse_two_digits(input, "a two digit offset minute")?;
        if !(0..=59).contains(&minutes) {
            return Err(Error::invalid_field("offset minute", minutes, 0, 59));
        }
        let total = sign * (i16::from(hours) * 60 + i16::from(minutes));
        Ok(Parsed { value: Some(Offset::from_minutes(total)?), input })
    }

    fn expect<'i>(
        &self,
        input: &'i [u8],
        byte: u8,
        expected: &'static str,
    ) -> Result<&'i [u8], Error> {
        if input.first() != Some(&byte) {
            return Err(Error::malformed(expected));
        }
        Ok(&input[1..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Prefix parsing is what distinguishes the parser from the `FromStr`
    // entry points: the remainder is reported, not rejected.
    #[test]
    fn parses_prefix() {
        let parser = Parser::new();
        let Parsed { value, input } =
            parser.parse_temporal(b"2023-07 and the rest").unwrap();
        assert_eq!(Temporal::YearMonth(YearMonth::constant(2023, 7)), value);
        assert_eq!(&b" and the rest"[..], input);
    }

    #[test]
    fn separator_commits_to_next_level() {
        let parser = Parser::new();
        // No separator: the year ends the literal.
        let Parsed { value, input } = parser.parse_temporal(b"2023*07").unwrap();
        assert_eq!(Temporal::Year(Year::constant(2023)), value);
        assert_eq!(&b"*07"[..], input);
        // A separator demands a well formed month.
        assert!(parser.parse_temporal(b"2023-x7").unwrap_err().is_malformed());
    }

    #[test]
    fn offset_is_not_confused_with_more_date() {
        let parser = Parser::new();
        let Parsed { value, input } =
            parser.parse_temporal(b"2023-07-14T08:30:15-05:00").unwrap();
        let Temporal::DateTime(dt) = value else {
            panic!("expected a date-time, got {value:?}");
        };
        assert_eq!(Some(-300), dt.offset().map(Offset::minutes));
        assert!(input.is_empty());
    }
}
