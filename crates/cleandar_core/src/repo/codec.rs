//! JSON form of the persisted journal state.
//!
//! Layout:
//!
//! ```json
//! { "version": 1, "records": { "2024-03-05": { "date": "2024-03-05", "note": "pay bills" } } }
//! ```
//!
//! Only `records` (and `version`) are read; other top-level keys written by
//! earlier clients are ignored.

use super::snapshot_repo::{RepoError, RepoResult};
use crate::model::date_key::DateKey;
use crate::model::day_record::DayRecord;
use crate::store::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct PersistedState {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    records: BTreeMap<String, DayRecord>,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

/// Serializes `snapshot` to pretty-printed JSON.
pub fn encode_snapshot(snapshot: &Snapshot) -> RepoResult<String> {
    let state = PersistedState {
        version: FORMAT_VERSION,
        records: snapshot
            .iter()
            .map(|record| (record.date.to_string(), record.clone()))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&state)?)
}

/// Parses JSON produced by [`encode_snapshot`].
///
/// # Errors
/// - `Codec` for malformed JSON or invalid record fields.
/// - `InvalidData` for unsupported versions or a key that disagrees with
///   its record's `date`.
pub fn decode_snapshot(text: &str) -> RepoResult<Snapshot> {
    let state: PersistedState = serde_json::from_str(text)?;
    if state.version > FORMAT_VERSION {
        return Err(RepoError::InvalidData(format!(
            "snapshot format version {} is newer than supported {FORMAT_VERSION}",
            state.version
        )));
    }

    let mut records = Vec::with_capacity(state.records.len());
    for (key, record) in state.records {
        let parsed_key = DateKey::parse(&key)
            .map_err(|err| RepoError::InvalidData(format!("record key: {err}")))?;
        if parsed_key != record.date {
            return Err(RepoError::InvalidData(format!(
                "record key `{key}` does not match its date `{}`",
                record.date
            )));
        }
        records.push(record);
    }

    Ok(records.into_iter().collect())
}
