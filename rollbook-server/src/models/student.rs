//! Student record model

use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of `student_record`, and the body of `POST /add_record`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StudentRecord {
    #[serde(deserialize_with = "lax_i64")]
    pub roll_number: i64,
    pub name: String,
}

impl StudentRecord {
    pub fn new(roll_number: i64, name: impl Into<String>) -> Self {
        Self {
            roll_number,
            name: name.into(),
        }
    }
}

/// Accept an integer, an integer-valued string (`"101"`), or a whole-number
/// float (`102.0`). Anything else, booleans included, is a type error.
fn lax_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LaxI64;

    impl<'de> Visitor<'de> for LaxI64 {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a valid integer")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
            if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim()
                .parse::<i64>()
                .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(LaxI64)
}

/// Acknowledgement returned after a successful insert.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddRecordResponse {
    pub status: String,
    pub message: String,
}

impl AddRecordResponse {
    pub fn added() -> Self {
        Self {
            status: "success".to_owned(),
            message: "Record added.".to_owned(),
        }
    }
}
