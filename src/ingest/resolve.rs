//! # Column Type Resolver
//!
//! Computes the dtype of a column over one batch of values and coerces the
//! batch to it. Resolution is pure: it never touches column storage, so the
//! caller can stage the outcome and commit it atomically.
//!
//! ## Algorithm
//!
//! ```text
//! for value in batch (input order):
//!     Null                 -> stored as null, dtype untouched
//!     dtype unresolved     -> dtype = explicit_hint | native_category | Str
//!     dtype == Str         -> native_text, no hint or repr probing
//!     coerce(value, dtype):
//!         ok               -> keep
//!         err, numeric     -> promote: dtype = Str, rows so far -> text
//!         err, terminal    -> IncompatibleValue, batch aborted
//! ```
//!
//! On promotion, rows already coerced in the batch are rewritten from their
//! scalars with `Scalar::to_text`, exactly as the builder rewrites rows
//! committed by earlier batches. The stored text therefore does not depend on
//! how rows were split across calls. The failing row and every later row are
//! rendered with `native_text`.
//!
//! `Resolution::promoted_from` carries the dtype the column had before, so the
//! builder knows previously committed scalars must be rewritten as text too.

use crate::error::IngestError;
use crate::types::{Datum, Dtype, Scalar};
use tracing::debug;

use super::coerce::coerce;
use super::probe::probe;

/// Outcome of resolving one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Dtype after the batch, or None if the column has still only seen nulls.
    pub dtype: Option<Dtype>,
    /// Coerced batch, one entry per input value.
    pub scalars: Vec<Option<Scalar>>,
    /// Numeric dtype the column was promoted away from, if any.
    pub promoted_from: Option<Dtype>,
}

/// Resolves `values` against the column's `current` dtype.
pub fn resolve_batch(current: Option<Dtype>, values: &[Datum]) -> Result<Resolution, IngestError> {
    let mut dtype = current;
    let mut promoted_from = None;
    let mut scalars: Vec<Option<Scalar>> = Vec::with_capacity(values.len());

    for (row, value) in values.iter().enumerate() {
        if value.is_null() {
            scalars.push(None);
            continue;
        }

        let caps = probe(value);
        let target = *dtype.get_or_insert_with(|| caps.candidate_dtype());

        if target == Dtype::Str {
            scalars.push(Some(Scalar::Str(caps.native_text())));
            continue;
        }

        match coerce(&caps, target) {
            Ok(scalar) => scalars.push(Some(scalar)),
            Err(err) => match target.promoted() {
                Some(promoted) => {
                    debug!(
                        from = %target,
                        to = %promoted,
                        row,
                        cause = %err,
                        "promoting column"
                    );
                    promoted_from.get_or_insert(target);
                    dtype = Some(promoted);
                    rewrite_as_text(&mut scalars);
                    scalars.push(Some(Scalar::Str(caps.native_text())));
                }
                None => return Err(err),
            },
        }
    }

    // Nothing committed before this batch was numeric.
    if current.is_none() {
        promoted_from = None;
    }

    Ok(Resolution {
        dtype,
        scalars,
        promoted_from,
    })
}

fn rewrite_as_text(scalars: &mut [Option<Scalar>]) {
    for scalar in scalars.iter_mut().flatten() {
        *scalar = Scalar::Str(scalar.to_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomValue, Primitive};
    use eyre::Result;

    struct IntHintNoNumeric(i64);

    impl CustomValue for IntHintNoNumeric {
        fn dtype_hint(&self) -> Option<Dtype> {
            Some(Dtype::Int)
        }

        fn repr(&self) -> String {
            self.0.to_string()
        }
    }

    struct IntHintPlusOne(i64);

    impl CustomValue for IntHintPlusOne {
        fn dtype_hint(&self) -> Option<Dtype> {
            Some(Dtype::Int)
        }

        fn custom_repr(&self) -> Option<Result<Primitive>> {
            Some(Ok(Primitive::Int(self.0 + 1)))
        }
    }

    struct ObjectHint;

    impl CustomValue for ObjectHint {
        fn dtype_hint(&self) -> Option<Dtype> {
            Some(Dtype::Object)
        }
    }

    fn strs(values: &[&str]) -> Vec<Option<Scalar>> {
        values.iter().map(|s| Some(Scalar::Str(s.to_string()))).collect()
    }

    #[test]
    fn first_value_hint_decides_dtype() {
        let values = vec![Datum::object(IntHintPlusOne(1)), Datum::object(IntHintPlusOne(2))];
        let res = resolve_batch(None, &values).unwrap();
        assert_eq!(res.dtype, Some(Dtype::Int));
        assert_eq!(res.scalars, vec![Some(Scalar::Int(2)), Some(Scalar::Int(3))]);
        assert_eq!(res.promoted_from, None);
    }

    #[test]
    fn native_category_decides_without_hint() {
        let values = vec![Datum::Float(1.5), Datum::Int(2)];
        let res = resolve_batch(None, &values).unwrap();
        assert_eq!(res.dtype, Some(Dtype::Float));
        assert_eq!(
            res.scalars,
            vec![Some(Scalar::Float(1.5)), Some(Scalar::Float(2.0))]
        );
    }

    #[test]
    fn numeric_failure_promotes_whole_batch() {
        let values = vec![
            Datum::Int(7),
            Datum::object(IntHintNoNumeric(8)),
            Datum::Int(9),
        ];
        let res = resolve_batch(None, &values).unwrap();
        assert_eq!(res.dtype, Some(Dtype::Str));
        assert_eq!(res.scalars, strs(&["7", "8", "9"]));
        assert_eq!(res.promoted_from, None);
    }

    #[test]
    fn promotion_rewrites_coerced_rows_from_their_scalars() {
        let values = vec![Datum::object(IntHintPlusOne(1)), Datum::object(IntHintNoNumeric(8))];
        let res = resolve_batch(None, &values).unwrap();
        assert_eq!(res.dtype, Some(Dtype::Str));
        assert_eq!(res.scalars, strs(&["2", "8"]));
    }

    #[test]
    fn promotion_against_committed_dtype_is_reported() {
        let values = vec![Datum::Str("x".into())];
        let res = resolve_batch(Some(Dtype::Float), &values).unwrap();
        assert_eq!(res.dtype, Some(Dtype::Str));
        assert_eq!(res.promoted_from, Some(Dtype::Float));
    }

    #[test]
    fn string_columns_skip_hints() {
        let values = vec![Datum::object(IntHintPlusOne(1))];
        let res = resolve_batch(Some(Dtype::Str), &values).unwrap();
        let text = res.scalars[0].as_ref().unwrap().as_str().unwrap().to_string();
        assert!(text.contains("object at 0x"));
    }

    #[test]
    fn terminal_dtype_failure_is_an_error() {
        let values = vec![Datum::Bool(true), Datum::Int(3)];
        let err = resolve_batch(None, &values).unwrap_err();
        assert!(err.is_incompatible_value());

        let err = resolve_batch(Some(Dtype::Date), &[Datum::Float(1.0)]).unwrap_err();
        assert!(err.is_incompatible_value());
    }

    #[test]
    fn object_hint_makes_object_column() {
        let values = vec![Datum::object(ObjectHint), Datum::Int(4)];
        let res = resolve_batch(None, &values).unwrap();
        assert_eq!(res.dtype, Some(Dtype::Object));
        assert_eq!(res.scalars[1], Some(Scalar::Object(Datum::Int(4))));
    }

    #[test]
    fn nulls_do_not_resolve_or_promote() {
        let res = resolve_batch(None, &[Datum::Null, Datum::Null]).unwrap();
        assert_eq!(res.dtype, None);
        assert_eq!(res.scalars, vec![None, None]);

        let values = vec![Datum::Null, Datum::Int(1), Datum::object(IntHintNoNumeric(2))];
        let res = resolve_batch(None, &values).unwrap();
        assert_eq!(res.dtype, Some(Dtype::Str));
        assert_eq!(
            res.scalars,
            vec![None, Some(Scalar::Str("1".into())), Some(Scalar::Str("2".into()))]
        );
    }
}
