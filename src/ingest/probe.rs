//! # Conversion Protocol Adapter
//!
//! `probe` inspects one datum and exposes, as a `Capabilities` view, which
//! conversion paths the value supports. Nothing is converted while probing:
//! the accessors call the underlying hook only when the coercer asks for it.
//!
//! ## Native Accessor Table
//!
//! | Datum | int | float | bool | date | datetime |
//! |-------|-----|-------|------|------|----------|
//! | Bool | 0/1 | - | yes | - | - |
//! | Int | yes | - | - | - | - |
//! | Float | - | yes | - | - | - |
//! | Str | - | - | - | - | - |
//! | Date | - | - | - | yes | midnight |
//! | Datetime | - | - | - | truncated | yes |
//! | Custom | `to_int` | `to_float` | `to_bool` | `to_date` | `to_datetime` |
//!
//! Every datum has a textual form, so `native_text` is not optional.

use crate::parsing::{date_to_datetime, datetime_to_date};
use crate::types::{datum_text, Datum, Dtype, Primitive};
use eyre::Result;

/// Capability view over one borrowed datum.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities<'v> {
    value: &'v Datum,
    /// Dtype declared by the value itself. Always wins over `native_category`.
    pub explicit_hint: Option<Dtype>,
    /// Dtype implied by the value's native variant.
    pub native_category: Option<Dtype>,
}

pub fn probe(value: &Datum) -> Capabilities<'_> {
    let explicit_hint = match value {
        Datum::Custom(obj) => obj.dtype_hint(),
        _ => None,
    };
    let native_category = match value {
        Datum::Bool(_) => Some(Dtype::Bool),
        Datum::Int(_) => Some(Dtype::Int),
        Datum::Float(_) => Some(Dtype::Float),
        Datum::Str(_) => Some(Dtype::Str),
        Datum::Date(_) => Some(Dtype::Date),
        Datum::Datetime(_) => Some(Dtype::Datetime),
        Datum::Null | Datum::Custom(_) => None,
    };
    Capabilities {
        value,
        explicit_hint,
        native_category,
    }
}

impl<'v> Capabilities<'v> {
    pub fn value(&self) -> &'v Datum {
        self.value
    }

    /// Dtype a column takes when this value is the first one it sees.
    ///
    /// A value without hint or native category still renders as text, so it
    /// resolves to string.
    pub fn candidate_dtype(&self) -> Dtype {
        self.explicit_hint
            .or(self.native_category)
            .unwrap_or(Dtype::Str)
    }

    pub fn custom_repr(&self) -> Option<Result<Primitive>> {
        match self.value {
            Datum::Custom(obj) => obj.custom_repr(),
            _ => None,
        }
    }

    pub fn native_int(&self) -> Option<Result<i64>> {
        match self.value {
            Datum::Int(i) => Some(Ok(*i)),
            Datum::Bool(b) => Some(Ok(*b as i64)),
            Datum::Custom(obj) => obj.to_int(),
            _ => None,
        }
    }

    pub fn native_float(&self) -> Option<Result<f64>> {
        match self.value {
            Datum::Float(f) => Some(Ok(*f)),
            Datum::Custom(obj) => obj.to_float(),
            _ => None,
        }
    }

    pub fn native_bool(&self) -> Option<Result<bool>> {
        match self.value {
            Datum::Bool(b) => Some(Ok(*b)),
            Datum::Custom(obj) => obj.to_bool(),
            _ => None,
        }
    }

    pub fn native_date(&self) -> Option<Result<i32>> {
        match self.value {
            Datum::Date(d) => Some(Ok(*d)),
            Datum::Datetime(t) => Some(
                datetime_to_date(*t).ok_or_else(|| eyre::eyre!("datetime {} out of date range", t)),
            ),
            Datum::Custom(obj) => obj.to_date(),
            _ => None,
        }
    }

    pub fn native_datetime(&self) -> Option<Result<i64>> {
        match self.value {
            Datum::Datetime(t) => Some(Ok(*t)),
            Datum::Date(d) => Some(
                date_to_datetime(*d).ok_or_else(|| eyre::eyre!("date {} out of datetime range", d)),
            ),
            Datum::Custom(obj) => obj.to_datetime(),
            _ => None,
        }
    }

    pub fn native_text(&self) -> String {
        datum_text(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomValue;

    struct Hinted;

    impl CustomValue for Hinted {
        fn dtype_hint(&self) -> Option<Dtype> {
            Some(Dtype::Float)
        }

        fn to_int(&self) -> Option<Result<i64>> {
            Some(Ok(3))
        }

        fn repr(&self) -> String {
            "hinted".to_string()
        }
    }

    #[test]
    fn native_values_report_their_category() {
        assert_eq!(probe(&Datum::Int(1)).native_category, Some(Dtype::Int));
        assert_eq!(probe(&Datum::Float(1.0)).native_category, Some(Dtype::Float));
        assert_eq!(probe(&Datum::Str("a".into())).native_category, Some(Dtype::Str));
        assert_eq!(probe(&Datum::Bool(true)).native_category, Some(Dtype::Bool));
        assert_eq!(probe(&Datum::Date(0)).native_category, Some(Dtype::Date));
        assert_eq!(probe(&Datum::Datetime(0)).native_category, Some(Dtype::Datetime));
        assert_eq!(probe(&Datum::Null).native_category, None);
    }

    #[test]
    fn native_values_never_carry_a_hint() {
        assert!(probe(&Datum::Int(1)).explicit_hint.is_none());
    }

    #[test]
    fn hint_wins_candidate_selection() {
        let value = Datum::object(Hinted);
        let caps = probe(&value);
        assert_eq!(caps.explicit_hint, Some(Dtype::Float));
        assert_eq!(caps.native_category, None);
        assert_eq!(caps.candidate_dtype(), Dtype::Float);
    }

    #[test]
    fn custom_without_hint_is_a_string_candidate() {
        struct Blank;
        impl CustomValue for Blank {}

        let value = Datum::object(Blank);
        assert_eq!(probe(&value).candidate_dtype(), Dtype::Str);
    }

    #[test]
    fn custom_hooks_surface_as_accessors() {
        let value = Datum::object(Hinted);
        let caps = probe(&value);
        assert_eq!(caps.native_int().unwrap().unwrap(), 3);
        assert!(caps.native_float().is_none());
        assert!(caps.custom_repr().is_none());
        assert_eq!(caps.native_text(), "hinted");
    }

    #[test]
    fn bool_is_int_convertible() {
        let value = Datum::Bool(true);
        assert_eq!(probe(&value).native_int().unwrap().unwrap(), 1);
    }

    #[test]
    fn temporal_accessors_widen_and_truncate() {
        let date = Datum::Date(1);
        assert_eq!(
            probe(&date).native_datetime().unwrap().unwrap(),
            86_400_000_000
        );

        let datetime = Datum::Datetime(86_400_000_000 + 5);
        assert_eq!(probe(&datetime).native_date().unwrap().unwrap(), 1);
    }
}
