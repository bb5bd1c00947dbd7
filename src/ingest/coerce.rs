//! # Value Coercer
//!
//! Produces one `Scalar` of a target dtype from one probed value, or fails
//! with `IngestError::IncompatibleValue`.
//!
//! ## Numeric Targets
//!
//! Conversion paths are tried in strict order; the first that succeeds wins:
//!
//! ```text
//! 1. custom_repr           -> widen / narrow / parse to target
//! 2. matching native       (native_int for Int, native_float for Float)
//! 3. other native numeric  -> narrow (float -> int) or widen (int -> float)
//! 4. IncompatibleValue
//! ```
//!
//! A present hook that fails falls through to the next path.
//!
//! ## Other Targets
//!
//! - Str: always succeeds through `native_text`.
//! - Object: always succeeds; the datum is cloned, which for custom values
//!   takes one more share of the `Arc`.
//! - Bool/Date/Datetime: `custom_repr` when it yields a matching primitive,
//!   then the relevant native accessor. No string fallback.

use crate::error::IngestError;
use crate::types::{Dtype, Primitive, Scalar};
use eyre::Result;
use tracing::trace;

use super::probe::Capabilities;

pub fn coerce(caps: &Capabilities<'_>, target: Dtype) -> Result<Scalar, IngestError> {
    match target {
        Dtype::Int => coerce_int(caps),
        Dtype::Float => coerce_float(caps),
        Dtype::Str => Ok(Scalar::Str(caps.native_text())),
        Dtype::Object => Ok(Scalar::Object(caps.value().clone())),
        Dtype::Bool => coerce_bool(caps),
        Dtype::Date => first_success(caps, target, [caps.native_date()]).map(Scalar::Date),
        Dtype::Datetime => {
            first_success(caps, target, [caps.native_datetime()]).map(Scalar::Datetime)
        }
    }
}

fn coerce_int(caps: &Capabilities<'_>) -> Result<Scalar, IngestError> {
    let mut last_error = None;

    if let Some(repr) = caps.custom_repr() {
        match repr.and_then(primitive_to_int) {
            Ok(i) => return Ok(Scalar::Int(i)),
            Err(e) => note_failure(&mut last_error, Dtype::Int, "custom_repr", e),
        }
    }
    if let Some(native) = caps.native_int() {
        match native {
            Ok(i) => return Ok(Scalar::Int(i)),
            Err(e) => note_failure(&mut last_error, Dtype::Int, "native_int", e),
        }
    }
    if let Some(native) = caps.native_float() {
        match native.and_then(narrow_float) {
            Ok(i) => return Ok(Scalar::Int(i)),
            Err(e) => note_failure(&mut last_error, Dtype::Int, "native_float", e),
        }
    }

    Err(IngestError::incompatible(caps.value(), Dtype::Int, last_error))
}

fn coerce_float(caps: &Capabilities<'_>) -> Result<Scalar, IngestError> {
    let mut last_error = None;

    if let Some(repr) = caps.custom_repr() {
        match repr.and_then(primitive_to_float) {
            Ok(f) => return Ok(Scalar::Float(f)),
            Err(e) => note_failure(&mut last_error, Dtype::Float, "custom_repr", e),
        }
    }
    if let Some(native) = caps.native_float() {
        match native {
            Ok(f) => return Ok(Scalar::Float(f)),
            Err(e) => note_failure(&mut last_error, Dtype::Float, "native_float", e),
        }
    }
    if let Some(native) = caps.native_int() {
        match native {
            Ok(i) => return Ok(Scalar::Float(i as f64)),
            Err(e) => note_failure(&mut last_error, Dtype::Float, "native_int", e),
        }
    }

    Err(IngestError::incompatible(caps.value(), Dtype::Float, last_error))
}

fn coerce_bool(caps: &Capabilities<'_>) -> Result<Scalar, IngestError> {
    let from_repr = match caps.custom_repr() {
        Some(Ok(Primitive::Bool(b))) => Some(Ok(b)),
        Some(Err(e)) => Some(Err(e)),
        _ => None,
    };
    first_success(caps, Dtype::Bool, [from_repr, caps.native_bool()]).map(Scalar::Bool)
}

fn first_success<T, const N: usize>(
    caps: &Capabilities<'_>,
    target: Dtype,
    paths: [Option<Result<T>>; N],
) -> Result<T, IngestError> {
    let mut last_error = None;
    for path in paths.into_iter().flatten() {
        match path {
            Ok(v) => return Ok(v),
            Err(e) => note_failure(&mut last_error, target, "native accessor", e),
        }
    }
    Err(IngestError::incompatible(caps.value(), target, last_error))
}

fn note_failure(slot: &mut Option<String>, target: Dtype, path: &str, error: eyre::Report) {
    trace!(%target, path, error = %error, "conversion path failed, trying next");
    *slot = Some(format!("{}: {}", path, error));
}

fn primitive_to_int(p: Primitive) -> Result<i64> {
    match p {
        Primitive::Int(i) => Ok(i),
        Primitive::Bool(b) => Ok(b as i64),
        Primitive::Float(f) => narrow_float(f),
        Primitive::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| eyre::eyre!("cannot parse '{}' as integer: {}", s, e)),
    }
}

fn primitive_to_float(p: Primitive) -> Result<f64> {
    match p {
        Primitive::Float(f) => Ok(f),
        Primitive::Int(i) => Ok(i as f64),
        Primitive::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
        Primitive::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| eyre::eyre!("cannot parse '{}' as float: {}", s, e)),
    }
}

/// Truncates toward zero; non-finite and out-of-range floats fail.
fn narrow_float(f: f64) -> Result<i64> {
    if !f.is_finite() {
        eyre::bail!("cannot narrow non-finite float {} to integer", f);
    }
    let truncated = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        eyre::bail!("float {} out of integer range", f);
    }
    Ok(truncated as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::probe;
    use crate::types::{CustomValue, Datum};
    use std::sync::Arc;

    struct Hooks {
        repr: Option<Primitive>,
        int: Option<i64>,
        float: Option<f64>,
        failing_repr: bool,
    }

    impl Hooks {
        fn none() -> Self {
            Hooks {
                repr: None,
                int: None,
                float: None,
                failing_repr: false,
            }
        }
    }

    impl CustomValue for Hooks {
        fn custom_repr(&self) -> Option<Result<Primitive>> {
            if self.failing_repr {
                return Some(Err(eyre::eyre!("repr exploded")));
            }
            self.repr.clone().map(Ok)
        }

        fn to_int(&self) -> Option<Result<i64>> {
            self.int.map(Ok)
        }

        fn to_float(&self) -> Option<Result<f64>> {
            self.float.map(Ok)
        }

        fn repr(&self) -> String {
            "hooks".to_string()
        }
    }

    fn coerce_datum(value: &Datum, target: Dtype) -> Result<Scalar, IngestError> {
        coerce(&probe(value), target)
    }

    #[test]
    fn custom_repr_beats_native_conversion() {
        let value = Datum::object(Hooks {
            repr: Some(Primitive::Int(10)),
            int: Some(1),
            ..Hooks::none()
        });
        assert_eq!(coerce_datum(&value, Dtype::Int).unwrap(), Scalar::Int(10));
    }

    #[test]
    fn failing_custom_repr_falls_through_to_native() {
        let value = Datum::object(Hooks {
            int: Some(4),
            failing_repr: true,
            ..Hooks::none()
        });
        assert_eq!(coerce_datum(&value, Dtype::Int).unwrap(), Scalar::Int(4));
    }

    #[test]
    fn int_target_narrows_native_float() {
        let value = Datum::object(Hooks {
            float: Some(2.9),
            ..Hooks::none()
        });
        assert_eq!(coerce_datum(&value, Dtype::Int).unwrap(), Scalar::Int(2));
    }

    #[test]
    fn float_target_widens_native_int() {
        let value = Datum::object(Hooks {
            int: Some(2),
            ..Hooks::none()
        });
        assert_eq!(coerce_datum(&value, Dtype::Float).unwrap(), Scalar::Float(2.0));
    }

    #[test]
    fn numeric_target_without_any_path_is_incompatible() {
        let value = Datum::object(Hooks::none());
        let err = coerce_datum(&value, Dtype::Int).unwrap_err();
        assert_eq!(
            err,
            IngestError::IncompatibleValue {
                value: "hooks".to_string(),
                target: Dtype::Int,
                reason: None,
            }
        );
    }

    #[test]
    fn failure_reason_records_last_failed_path() {
        let value = Datum::object(Hooks {
            failing_repr: true,
            ..Hooks::none()
        });
        match coerce_datum(&value, Dtype::Float).unwrap_err() {
            IngestError::IncompatibleValue { reason, .. } => {
                assert!(reason.unwrap().contains("repr exploded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn string_primitive_is_parsed_for_numeric_targets() {
        let value = Datum::object(Hooks {
            repr: Some(Primitive::Str(" 12 ".into())),
            ..Hooks::none()
        });
        assert_eq!(coerce_datum(&value, Dtype::Int).unwrap(), Scalar::Int(12));
        assert_eq!(coerce_datum(&value, Dtype::Float).unwrap(), Scalar::Float(12.0));
    }

    #[test]
    fn native_string_is_not_numeric() {
        let value = Datum::Str("12".into());
        assert!(coerce_datum(&value, Dtype::Int).is_err());
        assert_eq!(
            coerce_datum(&value, Dtype::Str).unwrap(),
            Scalar::Str("12".into())
        );
    }

    #[test]
    fn non_finite_floats_do_not_narrow() {
        assert!(coerce_datum(&Datum::Float(f64::NAN), Dtype::Int).is_err());
        assert!(coerce_datum(&Datum::Float(f64::INFINITY), Dtype::Int).is_err());
        assert!(coerce_datum(&Datum::Float(1e300), Dtype::Int).is_err());
    }

    #[test]
    fn object_target_shares_ownership() {
        let obj = Arc::new(Hooks::none());
        let value = Datum::from(Arc::clone(&obj));
        let stored = coerce_datum(&value, Dtype::Object).unwrap();

        assert_eq!(Arc::strong_count(&obj), 3);
        assert!(stored.as_object().unwrap().same_object(&value));
        drop(stored);
        assert_eq!(Arc::strong_count(&obj), 2);
    }

    #[test]
    fn bool_target_has_no_string_fallback() {
        assert_eq!(
            coerce_datum(&Datum::Bool(true), Dtype::Bool).unwrap(),
            Scalar::Bool(true)
        );
        assert!(coerce_datum(&Datum::Str("true".into()), Dtype::Bool).is_err());
        assert!(coerce_datum(&Datum::Int(1), Dtype::Bool).is_err());
    }

    #[test]
    fn temporal_targets_accept_each_other() {
        assert_eq!(
            coerce_datum(&Datum::Date(2), Dtype::Datetime).unwrap(),
            Scalar::Datetime(2 * 86_400_000_000)
        );
        assert_eq!(
            coerce_datum(&Datum::Datetime(86_400_000_001), Dtype::Date).unwrap(),
            Scalar::Date(1)
        );
        assert!(coerce_datum(&Datum::Str("2024-01-01".into()), Dtype::Date).is_err());
    }
}
