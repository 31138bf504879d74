//! Legacy schema migration applied to raw profile JSON before deserialization.
//!
//! Older education records carry a single `graduation_date`. They are split
//! into `start_date` / `end_date` once, on load; the next save persists the
//! new shape and the legacy key is gone for good.

use serde_json::{Map, Value};
use tracing::debug;

/// Years subtracted from the graduation year to synthesize a start date.
const DEGREE_YEARS: i32 = 4;

/// Rewrites every legacy education object in `data` in place.
/// Returns the number of records migrated.
pub fn migrate_legacy_education(data: &mut Value) -> usize {
    let Some(education) = data.get_mut("education").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut migrated = 0;
    for edu in education.iter_mut().filter_map(Value::as_object_mut) {
        if migrate_entry(edu) {
            migrated += 1;
        }
    }
    if migrated > 0 {
        debug!("Migrated {migrated} legacy education record(s)");
    }
    migrated
}

fn migrate_entry(edu: &mut Map<String, Value>) -> bool {
    if edu.contains_key("start_date") {
        return false;
    }
    let Some(graduation) = edu.remove("graduation_date") else {
        return false;
    };

    let graduation = match graduation {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    };

    edu.insert(
        "start_date".to_string(),
        Value::String(estimate_start_date(&graduation).unwrap_or_default()),
    );
    edu.insert("end_date".to_string(), Value::String(graduation));
    true
}

/// "May 2024" → "May 2020". Anything other than exactly `<Month> <Year>` yields `None`.
pub fn estimate_start_date(graduation: &str) -> Option<String> {
    let tokens: Vec<&str> = graduation.split_whitespace().collect();
    let [month, year] = tokens.as_slice() else {
        return None;
    };
    let year: i32 = year.parse().ok()?;
    Some(format!("{month} {}", year - DEGREE_YEARS))
}
