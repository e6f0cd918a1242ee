// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job ids and the dispatch timestamp embedded in them.
//!
//! A jid is the controller's local wall-clock time at dispatch, rendered as
//! `YYYYMMDDhhmmssffffff` (microsecond resolution). Lexicographic order of
//! well-formed ids is therefore chronological order.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use thiserror::Error;

crate::define_name! {
    /// Globally orderable job identifier.
    pub struct JobId;
}

/// Width of a well-formed jid.
pub const JID_LEN: usize = 20;

const JID_FORMAT: &str = "%Y%m%d%H%M%S%6f";
const START_TIME_FORMAT: &str = "%Y, %b %d %H:%M:%S%.6f";

/// Errors decoding a jid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JidError {
    #[error("malformed job id {0:?}: expected {JID_LEN} digits encoding a timestamp")]
    Malformed(String),
}

impl JobId {
    /// Encode a dispatch instant as a jid.
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Self::new(at.format(JID_FORMAT).to_string())
    }

    /// Decode the dispatch timestamp embedded in this id.
    pub fn start_time(&self) -> Result<JobTime, JidError> {
        decode(self.as_str()).map(JobTime).ok_or_else(|| JidError::Malformed(self.to_string()))
    }
}

fn decode(jid: &str) -> Option<NaiveDateTime> {
    if jid.len() != JID_LEN || !jid.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let field = |range: std::ops::Range<usize>| jid[range].parse::<u32>().ok();
    let year = jid[0..4].parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?)?;
    date.and_hms_micro_opt(field(8..10)?, field(10..12)?, field(12..14)?, field(14..20)?)
}

/// Dispatch time decoded from a jid.
///
/// Displays (and serializes) as `2013, Sep 16 12:55:24.463507`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobTime(NaiveDateTime);

impl JobTime {
    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl std::fmt::Display for JobTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(START_TIME_FORMAT))
    }
}

impl Serialize for JobTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
#[path = "jid_tests.rs"]
mod tests;
