pub mod time;

pub use time::{TimeColumn, TimeKind, normalize_time_column, parse_datetime};
