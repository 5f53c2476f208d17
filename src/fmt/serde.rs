/*!
Serde support for the temporal value types.

This module is enabled by the `serde` crate feature. Every value type
serializes to its literal text form and deserializes from it, so a
[`Temporal`] field in JSON looks exactly like a FHIR `dateTime` element:

```
use fhir_temporal::{Precision, Temporal};

#[derive(serde::Deserialize, serde::Serialize)]
struct Observation {
    effective: Temporal,
}

let got: Observation = serde_json::from_str(
    r#"{"effective":"2023-07"}"#,
)?;
assert_eq!(got.effective.precision(), Precision::YearMonth);
assert_eq!(
    serde_json::to_string(&got)?,
    r#"{"effective":"2023-07"}"#,
);

# Ok::<(), Box<dyn std::error::Error>>(())
```

Deserializing into a concrete type like [`Date`] demands that exact
precision, just like its `FromStr` implementation.
*/

use serde::{de, ser};

use crate::temporal::{Date, DateTime, Temporal, Year, YearMonth};

macro_rules! text_serde {
    ($ty:ident, $expecting:expr) => {
        impl ser::Serialize for $ty {
            #[inline]
            fn serialize<S: ser::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> de::Deserialize<'de> for $ty {
            #[inline]
            fn deserialize<D: de::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<$ty, D::Error> {
                struct Visitor;

                impl<'de> de::Visitor<'de> for Visitor {
                    type Value = $ty;

                    fn expecting(
                        &self,
                        f: &mut core::fmt::Formatter,
                    ) -> core::fmt::Result {
                        f.write_str($expecting)
                    }

                    #[inline]
                    fn visit_str<E: de::Error>(
                        self,
                        value: &str,
                    ) -> Result<$ty, E> {
                        value.parse().map_err(de::Error::custom)
                    }
                }

                deserializer.deserialize_str(Visitor)
            }
        }
    };
}

text_serde!(Year, "a year string");
text_serde!(YearMonth, "a year-month string");
text_serde!(Date, "a date string");
text_serde!(DateTime, "a date-time string");
text_serde!(Temporal, "a temporal literal string of any precision");
