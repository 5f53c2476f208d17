/*!
Parsing and printing of temporal literal text.

The text format is the `YYYY[-MM[-DDThh:mm:ss[.fff][Z|±hh:mm]]]` family:
a four digit year, optionally extended one precision level at a time. The
precision of a parsed value is decided entirely by how much of the ladder
the input climbs, and printing a value produces exactly the text it was
parsed from. In particular, a fractional second and an offset only print
when the value carries them.

Parsing happens through the `FromStr` implementations on the value types.
Parsing into [`Temporal`] detects the precision; parsing into one of the
concrete types additionally demands that exact precision:

```
use fhir_temporal::{Temporal, Year, YearMonth};

let ym: YearMonth = "2023-07".parse()?;
assert_eq!(ym.to_string(), "2023-07");

// A year-month is not a year.
assert!("2023-07".parse::<Year>().is_err());
assert_eq!("2023-07".parse::<Temporal>()?, Temporal::YearMonth(ym));

# Ok::<(), fhir_temporal::Error>(())
```
*/

use crate::{
    error::Error,
    temporal::{Date, DateTime, Temporal, Year, YearMonth},
};

pub(crate) mod printer;

mod parser;
#[cfg(feature = "serde")]
mod serde;

static PARSER: parser::Parser = parser::Parser::new();

pub(crate) fn parse_year(string: &str) -> Result<Year, Error> {
    PARSER.parse_year(string.as_bytes())?.into_full("no input after the year")
}

pub(crate) fn parse_year_month(string: &str) -> Result<YearMonth, Error> {
    PARSER
        .parse_year_month(string.as_bytes())?
        .into_full("no input after the month")
}

pub(crate) fn parse_date(string: &str) -> Result<Date, Error> {
    PARSER.parse_date(string.as_bytes())?.into_full("no input after the day")
}

pub(crate) fn parse_datetime(string: &str) -> Result<DateTime, Error> {
    PARSER
        .parse_datetime(string.as_bytes())?
        .into_full("no input after the date-time")
}

pub(crate) fn parse_temporal(string: &str) -> Result<Temporal, Error> {
    PARSER
        .parse_temporal(string.as_bytes())?
        .into_full("no input after the literal")
}

/// The result of parsing a value out of a slice of bytes.
///
/// This carries the remaining unparsed input alongside the value, so that a
/// literal can be recognized as a prefix of a larger string without knowing
/// ahead of time where it ends.
#[derive(Debug)]
pub(crate) struct Parsed<'i, V> {
    /// The value parsed.
    pub(crate) value: V,
    /// The remaining unparsed input.
    pub(crate) input: &'i [u8],
}

impl<'i, V> Parsed<'i, V> {
    /// Ensures that the parsed value consumed the entire input, and treats
    /// anything left over as malformed.
    fn into_full(self, expected: &'static str) -> Result<V, Error> {
        if self.input.is_empty() {
            return Ok(self.value);
        }
        Err(Error::malformed(expected))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::temporal::{Offset, Precision};

    fn t(string: &str) -> Temporal {
        string.parse().unwrap()
    }

    #[test]
    fn precision_ladder() {
        assert_eq!(Precision::Year, t("2023").precision());
        assert_eq!(Precision::YearMonth, t("2023-07").precision());
        assert_eq!(Precision::Date, t("2023-07-14").precision());
        assert_eq!(
            Precision::DateTime,
            t("2023-07-14T08:30:15").precision()
        );
    }

    #[test]
    fn roundtrip() {
        for string in [
            "0001",
            "9999",
            "2023-07",
            "2024-02-29",
            "2023-07-14T08:30:15",
            "2023-07-14T08:30:15.250",
            "2023-07-14T08:30:15.250Z",
            "2023-07-14T08:30:15Z",
            "2023-07-14T08:30:15.007-05:00",
            "2023-07-14T08:30:15+14:00",
        ] {
            assert_eq!(string, t(string).to_string());
        }
    }

    #[test]
    fn malformed_text() {
        for string in [
            "",
            "abcd",
            "202",
            "20x3",
            "2023-",
            "2023-7",
            "2023-07-",
            "2023-07-1",
            "2023-07-14T",
            "2023-07-14T08",
            "2023-07-14T08:30",
            "2023-07-14T08.30.15",
            "2023-07-14T08:30:15.",
            "2023-07-14T08:30:15.2500",
            "2023-07-14T08:30:15+05",
            "2023-07-14T08:30:15+0500",
        ] {
            let err = string.parse::<Temporal>().unwrap_err();
            assert!(err.is_malformed(), "expected malformed for {string:?}");
        }
    }

    #[test]
    fn trailing_input_is_malformed() {
        assert!("2023x".parse::<Temporal>().unwrap_err().is_malformed());
        assert!("2023-07 ".parse::<Temporal>().unwrap_err().is_malformed());
        assert!("2023-07-14T08:30:15Zx"
            .parse::<Temporal>()
            .unwrap_err()
            .is_malformed());
    }

    // A field that tokenizes fine but is numerically out of range is a
    // different failure from malformed text.
    #[test]
    fn invalid_fields() {
        use crate::ErrorKind;

        let err = "2023-13".parse::<Temporal>().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InvalidField { name: "month", given: 13, .. },
        ));
        let err = "2023-02-30".parse::<Temporal>().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InvalidField { name: "day", given: 30, max: 28, .. },
        ));
        let err = "0000".parse::<Temporal>().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InvalidField { name: "year", given: 0, .. },
        ));
        let err = "2023-07-14T24:00:00".parse::<Temporal>().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InvalidField { name: "hour", given: 24, .. },
        ));
        let err = "2023-07-14T08:30:15+19:00".parse::<Temporal>().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InvalidField { name: "offset", .. },
        ));
        assert!("2023-07-14T08:30:15+05:75"
            .parse::<Temporal>()
            .unwrap_err()
            .is_invalid_field());
    }

    // The leading four digits are always judged as a year first. Even when
    // the rest of the input is garbage, an out-of-range year reports as an
    // invalid field, not as malformed text.
    #[test]
    fn year_is_validated_before_the_remainder() {
        use crate::ErrorKind;

        for string in ["0000-x7", "0000-", "0000-13", "0000T"] {
            let err = string.parse::<Temporal>().unwrap_err();
            assert!(
                matches!(
                    err.kind(),
                    ErrorKind::InvalidField { name: "year", given: 0, .. },
                ),
                "for {string:?}, got: {err}",
            );
        }
        assert!("0000-".parse::<YearMonth>().unwrap_err().is_invalid_field());
        assert!("0000-x7".parse::<Date>().unwrap_err().is_invalid_field());
    }

    #[test]
    fn fraction_scaling() {
        let short: DateTime = "2023-07-14T08:30:15.2".parse().unwrap();
        assert_eq!(Some(200), short.millisecond());
        let medium: DateTime = "2023-07-14T08:30:15.25".parse().unwrap();
        assert_eq!(Some(250), medium.millisecond());
        let full: DateTime = "2023-07-14T08:30:15.250".parse().unwrap();
        assert_eq!(Some(250), full.millisecond());
        // The parsed text is not remembered, so one digit prints as three.
        assert_eq!("2023-07-14T08:30:15.200", short.to_string());
    }

    #[test]
    fn offsets() {
        let dt: DateTime = "2023-07-14T08:30:15Z".parse().unwrap();
        assert_eq!(Some(Offset::UTC), dt.offset());
        // Lowercase designators are accepted on input only.
        let dt: DateTime = "2023-07-14t08:30:15z".parse().unwrap();
        assert_eq!("2023-07-14T08:30:15Z", dt.to_string());
        // An explicit zero offset is indistinguishable from Zulu.
        let dt: DateTime = "2023-07-14T08:30:15+00:00".parse().unwrap();
        assert_eq!("2023-07-14T08:30:15Z", dt.to_string());
        let dt: DateTime = "2023-07-14T08:30:15-05:30".parse().unwrap();
        assert_eq!(Some(-330), dt.offset().map(Offset::minutes));
    }

    #[test]
    fn typed_parsing_is_exact() {
        assert!("2023".parse::<Year>().is_ok());
        assert!("2023-07".parse::<Year>().unwrap_err().is_malformed());
        assert!("2023".parse::<YearMonth>().unwrap_err().is_malformed());
        assert!("2023-07-14".parse::<YearMonth>().unwrap_err().is_malformed());
        assert!("2023-07-14".parse::<Date>().is_ok());
        assert!("2023-07-14T08:30:15".parse::<Date>().unwrap_err().is_malformed());
        assert!("2023-07-14".parse::<DateTime>().unwrap_err().is_malformed());
    }
}
