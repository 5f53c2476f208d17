/*!
Partial precision temporal literals for clinical data interchange.

FHIR `date` and `dateTime` elements carry exactly as much precision as the
record holder actually knows: a birth year, a month of onset, a calendar
day, or a full timestamp with an optional fraction and UTC offset. This
crate models each precision as its own value type, plus a [`Temporal`] sum
over all of them, with validated construction, precision detecting text
parsing, precision preserving arithmetic and a canonical byte encoding for
content hashing.

The precision of a value is part of the value. `2023` is the whole year,
not January 1st, and it never silently becomes anything finer:

```
use fhir_temporal::{Precision, Temporal, Unit};

let t: Temporal = "2023-07".parse()?;
assert_eq!(t.precision(), Precision::YearMonth);

// Arithmetic stays at the value's precision.
assert_eq!(t.checked_add(7, Unit::Month)?.to_string(), "2024-02");
// Units finer than the precision are rejected rather than guessed at.
assert!(t.checked_add(1, Unit::Day).is_err());
// Widening to the bounds of the denoted interval is explicit.
assert_eq!(t.latest().to_string(), "2023-07-31T23:59:59.999");

# Ok::<(), fhir_temporal::Error>(())
```

When the precision is known statically, use the concrete types
[`Year`], [`YearMonth`], [`Date`] and [`DateTime`] instead; their
`FromStr` implementations demand their exact precision.

# Crate features

* **std** (enabled by default) - Implements `std::error::Error` for
[`Error`]. Disabling it makes the crate `no_std`, but `alloc` is always
required.
* **serde** - Serializes and deserializes every value type as its literal
text.
* **logging** - Emits trace level messages via the `log` crate during
parsing. Mostly useful for debugging this crate itself.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

// Dynamic memory allocation is only used for error values, which keeps the
// error type one word wide. Everything else lives on the stack.
extern crate alloc;

pub use crate::{
    error::{Error, ErrorKind},
    hash::CanonicalBytes,
    temporal::{
        Date, DateTime, Offset, Precision, Temporal, Time, Unit, Year,
        YearMonth,
    },
};

#[macro_use]
mod logging;

mod error;
mod fmt;
mod hash;
pub mod temporal;
mod util;
