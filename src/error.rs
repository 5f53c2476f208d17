use alloc::sync::Arc;

use crate::temporal::{Precision, Unit};

/// An error that can occur in this crate.
///
/// Every fallible operation in this crate returns this one error type.
/// An error is always terminal for the operation that produced it: a failed
/// construction or parse yields no value at all, and nothing is retried
/// internally.
///
/// Unlike some datetime crates, the underlying [`ErrorKind`] is public and
/// can be inspected via [`Error::kind`]. Callers surfacing validation
/// failures to users usually want the offending field name and value, and
/// hiding them behind predicates alone makes that needlessly awkward.
///
/// # Example
///
/// ```
/// use fhir_temporal::{ErrorKind, Temporal};
///
/// let err = "2023-02-30".parse::<Temporal>().unwrap_err();
/// assert!(matches!(
///     err.kind(),
///     ErrorKind::InvalidField { name: "day", given: 30, .. },
/// ));
/// ```
#[derive(Clone)]
pub struct Error {
    /// The kind is behind an `Arc` so that an `Error` is one word, cheap to
    /// clone and cheap to move through deep `?` chains.
    kind: Arc<ErrorKind>,
}

/// The underlying kind of an [`Error`].
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input could not be tokenized into the canonical
    /// `YYYY[-MM[-DDThh:mm:ss[.fff][Z|±hh:mm]]]` layout.
    ///
    /// This is only used for structural failures. A field that is present
    /// and well formed but out of its legal range reports
    /// [`ErrorKind::InvalidField`] instead.
    MalformedText {
        /// A static description of what the tokenizer expected to find.
        expected: &'static str,
    },
    /// A field was syntactically present but numerically out of its legal
    /// range.
    InvalidField {
        /// The name of the offending field, e.g. `"month"`.
        name: &'static str,
        /// The out-of-range value that was given.
        given: i64,
        /// The minimum legal value for the field.
        min: i64,
        /// The maximum legal value for the field. For `"day"`, this is the
        /// length of the specific month being validated.
        max: i64,
    },
    /// An otherwise valid arithmetic result fell outside the supported year
    /// span of `1..=9999`.
    OutOfRange {
        /// The unit of arithmetic that overflowed, e.g. `"years"`.
        what: &'static str,
    },
    /// Two values were compared chronologically, but their widened instant
    /// ranges overlap without either containing the other's bound, so no
    /// ordering between them can be asserted.
    IncomparablePrecision {
        /// The precision of the left hand side.
        lhs: Precision,
        /// The precision of the right hand side.
        rhs: Precision,
    },
    /// A unit of arithmetic was requested that is finer than the precision
    /// of the value carries. For example, adding days to a year-month value.
    UnsupportedUnit {
        /// The requested unit.
        unit: Unit,
        /// The precision of the value the unit was applied to.
        precision: Precision,
    },
}

impl Error {
    /// Returns the underlying kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns true when this error came from tokenizing malformed input.
    pub fn is_malformed(&self) -> bool {
        matches!(*self.kind, ErrorKind::MalformedText { .. })
    }

    /// Returns true when this error came from a field value outside its
    /// legal range.
    ///
    /// # Example
    ///
    /// ```
    /// use fhir_temporal::Date;
    ///
    /// assert!(Date::new(2023, 2, 29).unwrap_err().is_invalid_field());
    /// assert!("2023-02-29".parse::<Date>().unwrap_err().is_invalid_field());
    /// ```
    pub fn is_invalid_field(&self) -> bool {
        matches!(*self.kind, ErrorKind::InvalidField { .. })
    }

    /// Returns true when this error came from an arithmetic result outside
    /// the supported year span.
    pub fn is_out_of_range(&self) -> bool {
        matches!(*self.kind, ErrorKind::OutOfRange { .. })
    }

    /// Returns true when this error came from a chronological comparison
    /// that could not be resolved.
    pub fn is_incomparable(&self) -> bool {
        matches!(*self.kind, ErrorKind::IncomparablePrecision { .. })
    }

    /// Returns true when this error came from applying a unit of arithmetic
    /// to a value whose precision does not carry that unit.
    pub fn is_unsupported_unit(&self) -> bool {
        matches!(*self.kind, ErrorKind::UnsupportedUnit { .. })
    }

    pub(crate) fn malformed(expected: &'static str) -> Error {
        ErrorKind::MalformedText { expected }.into()
    }

    pub(crate) fn invalid_field(
        name: &'static str,
        given: impl Into<i64>,
        min: impl Into<i64>,
        max: impl Into<i64>,
    ) -> Error {
        ErrorKind::InvalidField {
            name,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        }
        .into()
    }

    pub(crate) fn out_of_range(what: &'static str) -> Error {
        ErrorKind::OutOfRange { what }.into()
    }

    pub(crate) fn incomparable(lhs: Precision, rhs: Precision) -> Error {
        ErrorKind::IncomparablePrecision { lhs, rhs }.into()
    }

    pub(crate) fn unsupported_unit(unit: Unit, precision: Precision) -> Error {
        ErrorKind::UnsupportedUnit { unit, precision }.into()
    }
}

impl From<ErrorKind> for Error {
    #[cold]
    #[inline(never)]
    fn from(kind: ErrorKind) -> Error {
        Error { kind: Arc::new(kind) }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.kind, f)
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error").field("kind", &self.kind).finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            MalformedText { expected } => {
                write!(f, "malformed temporal literal: expected {expected}")
            }
            InvalidField { name, given, min, max } => write!(
                f,
                "field '{name}' with value {given} is not in the \
                 required range of {min}..={max}",
            ),
            OutOfRange { what } => write!(
                f,
                "result of {what} arithmetic exceeds the supported \
                 year range of 1..=9999",
            ),
            IncomparablePrecision { lhs, rhs } => write!(
                f,
                "cannot order a {lhs} value against a {rhs} value: \
                 their instant ranges overlap",
            ),
            UnsupportedUnit { unit, precision } => write!(
                f,
                "unit '{unit}' is not supported by a value with \
                 {precision} precision",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    // The size of `Error` isn't an API guarantee, but growing it beyond one
    // word should be a deliberate decision. This is the speed bump.
    #[test]
    fn error_size() {
        assert_eq!(
            core::mem::size_of::<usize>(),
            core::mem::size_of::<Error>()
        );
    }

    #[test]
    fn error_messages() {
        let err = Error::invalid_field("month", 13, 1, 12);
        assert_eq!(
            "field 'month' with value 13 is not in the \
             required range of 1..=12",
            err.to_string(),
        );

        let err = Error::malformed("a four digit year");
        assert_eq!(
            "malformed temporal literal: expected a four digit year",
            err.to_string(),
        );

        let err = Error::out_of_range("years");
        assert_eq!(
            "result of years arithmetic exceeds the supported \
             year range of 1..=9999",
            err.to_string(),
        );
    }
}
