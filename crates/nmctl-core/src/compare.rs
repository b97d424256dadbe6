// ── Equality evaluators ──
//
// Pure predicates deciding whether a remote resource already satisfies the
// desired fields. Only fields present in `desired` are checked; read-only
// server fields (addresses, keys, timestamps) never take part.

use std::collections::BTreeSet;

use serde_json::{Number, Value};

use nmctl_api::Resource;

/// Network fields that take part in comparison.
pub const NETWORK_FIELDS: &[&str] = &[
    "addressrange",
    "addressrange6",
    "defaultextclientdns",
    "defaultinterface",
    "defaultpostdown",
    "defaultpostup",
    "defaultkeepalive",
    "defaultmtu",
];

/// Server-side defaults assumed when a network omits the field.
///
/// Fields without an entry here are skipped when the server omits them.
const NETWORK_FIELD_DEFAULTS: &[(&str, &str)] = &[("defaultpostdown", ""), ("defaultpostup", "")];

/// External-client fields that take part in comparison.
pub const EXTCLIENT_FIELDS: &[&str] = &["dns", "extraallowedips", "enabled", "postup", "postdown"];

/// Netmaker's boolean-ish values: `"yes"`, `"true"`, `true` and `1`.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "yes" || s == "true",
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| (f - 1.0).abs() < f64::EPSILON),
        _ => false,
    }
}

/// `true` if `existing` needs no update to satisfy `desired`.
pub fn networks_equal(existing: &Resource, desired: &Resource) -> bool {
    for &field in NETWORK_FIELDS {
        let Some(want) = desired.get(field) else {
            continue;
        };

        let default = network_default(field);
        let have = match (existing.get(field), default) {
            (Some(value), _) => value.clone(),
            (None, Some(default)) => Value::from(default),
            // The server does not report this field yet; nothing to compare.
            (None, None) => continue,
        };

        if let Value::Bool(want) = want {
            if is_truthy(Some(&have)) != *want {
                return false;
            }
            continue;
        }

        if is_empty_string(want) && is_blank(Some(&have)) {
            continue;
        }

        if !values_equal(&have, want) {
            return false;
        }
    }

    true
}

/// `true` if `existing` needs no update to satisfy `desired`.
///
/// List fields compare as sets: order and duplicates do not matter.
pub fn extclients_equal(existing: &Resource, desired: &Resource) -> bool {
    for &field in EXTCLIENT_FIELDS {
        let Some(want) = desired.get(field) else {
            continue;
        };
        let have = existing.get(field);

        if let Value::Array(items) = want {
            if as_set(have) != Some(set_of(items)) {
                return false;
            }
            continue;
        }

        if is_empty_string(want) && is_blank(have) {
            continue;
        }

        if !values_equal(have.unwrap_or(&Value::Null), want) {
            return false;
        }
    }

    true
}

/// Update payload: a copy of `existing` with every `desired` field overlaid.
pub fn merge_update(existing: &Resource, desired: &Resource) -> Resource {
    let mut merged = existing.clone();
    merged.extend(desired.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

fn network_default(field: &str) -> Option<&'static str> {
    NETWORK_FIELD_DEFAULTS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, default)| *default)
}

fn is_empty_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty())
}

/// Missing, `null` or `""`.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(v) => is_empty_string(v),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        _ => a == b,
    }
}

// 1420 and 1420.0 are the same MTU.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => (x - y).abs() < f64::EPSILON,
            _ => false,
        },
    }
}

/// Missing or `null` lists are empty; non-list values have no set form.
fn as_set(value: Option<&Value>) -> Option<BTreeSet<String>> {
    match value {
        None | Some(Value::Null) => Some(BTreeSet::new()),
        Some(Value::Array(items)) => Some(set_of(items)),
        Some(_) => None,
    }
}

fn set_of(items: &[Value]) -> BTreeSet<String> {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}
