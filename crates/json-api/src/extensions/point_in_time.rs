//! The optional `at` query parameter used to evaluate catalog availability.

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait PointInTimeExt {
    /// Parsed `at`, or the current time when the parameter is absent.
    fn into_point_in_time(self) -> Result<Timestamp, StatusError>;
}

impl PointInTimeExt for QueryParam<String, false> {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError> {
        parse_at(self.into_inner(), Timestamp::now)
    }
}

fn parse_at(
    raw: Option<String>,
    now: impl FnOnce() -> Timestamp,
) -> Result<Timestamp, StatusError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(now()),
        Some(value) => value
            .parse::<Timestamp>()
            .or_400("could not parse \"at\" query parameter"),
    }
}
