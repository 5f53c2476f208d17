/*!
The canonical byte encoding of a temporal value.

This is the identity of a value in content addressed contexts: one marker
byte naming the precision tag, followed by the fixed width big endian
encoding of each field the precision carries, in declared order. Optional
fields (the fractional second and the offset of a date-time) are encoded
as a presence byte followed by their fixed width value, which keeps the
encoding injective: no two distinct values, at any two precisions, share
an encoding, and two equal values always encode identically.

The crate makes no promise about which hashing algorithm is applied on top
of these bytes. That is the consumer's business.
*/

use crate::temporal::Precision;

/// The canonical byte encoding of a temporal value.
///
/// This is a small fixed capacity buffer on the stack. Construct one via
/// `canonical_bytes` on any of the value types or on
/// [`Temporal`](crate::Temporal), and feed [`CanonicalBytes::as_bytes`] to
/// whatever content addressing layer sits above this crate.
///
/// Equality on this type is equality of the encoded bytes, which by
/// construction coincides with equality of the values that produced them.
///
/// # Example
///
/// ```
/// use fhir_temporal::{Date, Year};
///
/// let date = Date::new(2023, 7, 14)?;
/// assert_eq!(
///     date.canonical_bytes().as_bytes(),
///     &[3, 0, 0, 0x07, 0xe7, 7, 14],
/// );
///
/// // A bare year never encodes like any date, even one in that year.
/// let year = Year::new(2023)?;
/// assert_ne!(year.canonical_bytes(), date.canonical_bytes());
///
/// # Ok::<(), fhir_temporal::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct CanonicalBytes {
    /// The encoded bytes. Only `0..self.len` is meaningful.
    bytes: [u8; CanonicalBytes::CAPACITY],
    /// The number of bytes used in `bytes`.
    len: u8,
}

impl CanonicalBytes {
    /// The size of the largest possible encoding: a date-time with both a
    /// fractional second and an offset.
    ///
    /// marker + year(4) + month + day + hour + minute + second
    /// + fraction presence + fraction(2) + offset presence + offset(2)
    const CAPACITY: usize = 16;

    /// Creates a new encoding holding just the marker byte for the given
    /// precision tag.
    pub(crate) fn for_precision(precision: Precision) -> CanonicalBytes {
        let mut enc = CanonicalBytes {
            bytes: [0; CanonicalBytes::CAPACITY],
            len: 0,
        };
        enc.put_u8(precision.marker());
        enc
    }

    /// Returns the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    pub(crate) fn put_u8(&mut self, byte: u8) {
        self.bytes[usize::from(self.len)] = byte;
        self.len += 1;
    }

    pub(crate) fn put_i16(&mut self, value: i16) {
        for byte in value.to_be_bytes() {
            self.put_u8(byte);
        }
    }

    pub(crate) fn put_i32(&mut self, value: i32) {
        for byte in value.to_be_bytes() {
            self.put_u8(byte);
        }
    }

    /// Encodes an optional field as a presence byte followed by its value.
    pub(crate) fn put_optional_i16(&mut self, value: Option<i16>) {
        match value {
            None => self.put_u8(0),
            Some(value) => {
                self.put_u8(1);
                self.put_i16(value);
            }
        }
    }
}

impl Eq for CanonicalBytes {}

impl PartialEq for CanonicalBytes {
    fn eq(&self, other: &CanonicalBytes) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl core::hash::Hash for CanonicalBytes {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write(self.as_bytes());
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl core::fmt::Debug for CanonicalBytes {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("CanonicalBytes(")?;
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use alloc::{collections::BTreeSet, vec::Vec};

    use crate::temporal::{Date, DateTime, Offset, Temporal, Year, YearMonth};

    #[test]
    fn year_encoding() {
        let year = Year::constant(2023);
        assert_eq!(year.canonical_bytes().as_bytes(), &[1, 0, 0, 0x07, 0xe7]);
    }

    #[test]
    fn datetime_encoding() {
        let dt = DateTime::constant(2023, 7, 14, 8, 30, 15);
        assert_eq!(
            dt.canonical_bytes().as_bytes(),
            &[4, 0, 0, 0x07, 0xe7, 7, 14, 8, 30, 15, 0, 0],
        );

        let dt = dt
            .with_millisecond(Some(250))
            .unwrap()
            .with_offset(Some(Offset::constant(-300)));
        assert_eq!(
            dt.canonical_bytes().as_bytes(),
            &[
                4, 0, 0, 0x07, 0xe7, 7, 14, 8, 30, 15, // fields
                1, 0x00, 0xfa, // fraction, present
                1, 0xfe, 0xd4, // offset, present, -300 minutes
            ],
        );
    }

    // Two constructions of the same logical value must encode identically,
    // and any two values differing in precision tag or any field must not
    // collide. Exhaustive over a small slice of the value space.
    #[test]
    fn no_collisions_across_precisions() {
        let mut seen = BTreeSet::new();
        let mut values = Vec::new();
        for year in [1, 1999, 2023, 2024, 9999] {
            values.push(Temporal::from(Year::constant(year)));
            for month in 1..=12 {
                values.push(Temporal::from(YearMonth::constant(year, month)));
                values.push(Temporal::from(Date::constant(year, month, 1)));
                values.push(Temporal::from(Date::constant(year, month, 28)));
            }
            let dt = DateTime::constant(year, 2, 28, 23, 59, 59);
            values.push(Temporal::from(dt));
            values.push(Temporal::from(dt.with_millisecond(Some(0)).unwrap()));
            values.push(Temporal::from(
                dt.with_offset(Some(Offset::UTC)),
            ));
            values.push(Temporal::from(
                dt.with_offset(Some(Offset::constant(60))),
            ));
        }
        for value in &values {
            let bytes = value.canonical_bytes().as_bytes().to_vec();
            // Re-encoding is deterministic.
            assert_eq!(bytes, value.canonical_bytes().as_bytes());
            assert!(seen.insert(bytes), "collision for {value}");
        }
    }
}
