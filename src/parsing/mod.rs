//! # Literal Parsing
//!
//! Textual forms for the temporal dtypes. Dates and datetimes enter the engine
//! either as native datums (already encoded) or through these parsers when a
//! caller builds datums from text; rendering back to text is used whenever a
//! temporal value lands in a string column.
//!
//! ```ignore
//! use colinfer::parsing::{parse_date, format_date};
//!
//! let days = parse_date("2024-01-15")?;
//! assert_eq!(format_date(days), "2024-01-15");
//! ```

mod temporal;

pub use temporal::{
    date_to_datetime, datetime_to_date, days_from_ymd, format_date, format_datetime, parse_date,
    parse_datetime, parse_time, ymd_from_days,
};
