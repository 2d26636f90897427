//! Reference resolution.
//!
//! Backend records carry related entities as bare id strings (a call's
//! `device`, a ward's `building`). This module turns a fetched record into
//! an enriched view: each reference field is replaced by the full related
//! record, fetched from its own endpoint, with per-field failure tracking.
//!
//! Two forms:
//! - [`resolve_record`] — one record, one `GET <collection>/<id>/` per set
//!   reference, all issued concurrently.
//! - [`resolve_list`] — many records; each referenced collection is fetched
//!   exactly once and joined through an in-memory id → record table, so the
//!   request count is proportional to the number of relations, not
//!   records × relations.
//!
//! A failed lookup never aborts the others: the target field stays null,
//! the field is marked [`RefState::Failed`], and a warning is logged so the
//! caller can render a "failed to load X" indicator. Only a failed fetch of
//! the primary record itself is an error.

use std::collections::{BTreeMap, HashMap};

use futures_util::future::join_all;
use serde_json::{Map, Value};
use tracing::warn;

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use nursecall_core::ResourceKind;

/// One resolution rule: read the id in `source`, look it up in `kind`'s
/// collection, write the full record under `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveRule {
    pub source: &'static str,
    pub kind: ResourceKind,
    pub target: &'static str,
}

impl ResolveRule {
    pub const fn new(source: &'static str, kind: ResourceKind, target: &'static str) -> Self {
        Self {
            source,
            kind,
            target,
        }
    }
}

/// Outcome of resolving one reference field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefState {
    /// The source field was null/empty — nothing to look up ("Unassigned").
    #[default]
    Absent,
    /// The related record was fetched and merged under the target field.
    Resolved,
    /// The lookup failed; the target field is null.
    Failed,
}

/// A record merged with its resolved references, plus the per-field states.
#[derive(Debug, Clone)]
pub struct ResolvedRecord {
    record: Map<String, Value>,
    states: BTreeMap<&'static str, RefState>,
}

impl ResolvedRecord {
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.record)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.record.get(field)
    }

    /// State of a target field. Fields no rule wrote are `Absent`.
    pub fn state(&self, target: &str) -> RefState {
        self.states.get(target).copied().unwrap_or_default()
    }

    /// True if any reference failed to resolve (degraded view).
    pub fn is_degraded(&self) -> bool {
        self.states.values().any(|s| *s == RefState::Failed)
    }

    pub fn failed_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.states
            .iter()
            .filter(|(_, s)| **s == RefState::Failed)
            .map(|(target, _)| *target)
    }

    /// A field of a resolved sub-record, e.g. the resolved building's name.
    /// Handy as a sort key; returns `None` for absent/failed references.
    pub fn resolved_str(&self, target: &str, field: &str) -> Option<&str> {
        self.record.get(target)?.get(field)?.as_str()
    }
}

/// Fetch one record and resolve its references.
pub async fn fetch_and_resolve(
    client: &ApiClient,
    kind: ResourceKind,
    id: &str,
    rules: &[ResolveRule],
) -> Result<ResolvedRecord> {
    let record = client.get(kind, id).await?;
    resolve_record(client, record, rules).await
}

/// Fetch a whole collection and batch-resolve every record's references.
pub async fn fetch_and_resolve_list(
    client: &ApiClient,
    kind: ResourceKind,
    rules: &[ResolveRule],
) -> Result<Vec<ResolvedRecord>> {
    let records = client.list(kind).await?;
    resolve_list(client, records, rules).await
}

/// Resolve one already-fetched record. All set references are looked up
/// concurrently; unset ones are skipped without a request.
pub async fn resolve_record(
    client: &ApiClient,
    record: Value,
    rules: &[ResolveRule],
) -> Result<ResolvedRecord> {
    let mut map = into_object(record)?;

    let wanted: Vec<(usize, String)> = rules
        .iter()
        .enumerate()
        .filter_map(|(i, rule)| ref_id(map.get(rule.source)).map(|id| (i, id)))
        .collect();

    let lookups = wanted.iter().map(|(i, id)| {
        let rule = rules[*i];
        async move { (*i, client.get(rule.kind, id).await) }
    });
    let results = join_all(lookups).await;

    let mut states: BTreeMap<&'static str, RefState> = rules
        .iter()
        .map(|rule| (rule.target, RefState::Absent))
        .collect();
    for rule in rules {
        map.insert(rule.target.to_string(), Value::Null);
    }

    for (i, result) in results {
        let rule = &rules[i];
        match result {
            Ok(related) => {
                map.insert(rule.target.to_string(), related);
                states.insert(rule.target, RefState::Resolved);
            }
            Err(err) => {
                warn!(
                    field = rule.source,
                    collection = rule.kind.collection(),
                    "failed to resolve reference: {err}"
                );
                states.insert(rule.target, RefState::Failed);
            }
        }
    }

    Ok(ResolvedRecord {
        record: map,
        states,
    })
}

/// Resolve a list of records through per-collection lookup tables.
///
/// Each referenced collection is fetched once. A failed collection fetch
/// degrades that relation for every record that references it; an id
/// missing from the table degrades only the records carrying it.
pub async fn resolve_list(
    client: &ApiClient,
    records: Vec<Value>,
    rules: &[ResolveRule],
) -> Result<Vec<ResolvedRecord>> {
    let mut kinds: Vec<ResourceKind> = Vec::new();
    for rule in rules {
        if !kinds.contains(&rule.kind) {
            kinds.push(rule.kind);
        }
    }

    let fetches = kinds.iter().map(|kind| {
        let kind = *kind;
        async move { (kind, client.list(kind).await) }
    });
    let mut tables: HashMap<ResourceKind, Option<HashMap<String, Value>>> = HashMap::new();
    for (kind, result) in join_all(fetches).await {
        match result {
            Ok(collection) => {
                tables.insert(kind, Some(index_by_id(collection)));
            }
            Err(err) => {
                warn!(
                    collection = kind.collection(),
                    "failed to load collection for resolution: {err}"
                );
                tables.insert(kind, None);
            }
        }
    }

    records
        .into_iter()
        .map(|record| join_one(record, rules, &tables))
        .collect()
}

fn join_one(
    record: Value,
    rules: &[ResolveRule],
    tables: &HashMap<ResourceKind, Option<HashMap<String, Value>>>,
) -> Result<ResolvedRecord> {
    let mut map = into_object(record)?;

    let ids: Vec<Option<String>> = rules
        .iter()
        .map(|rule| ref_id(map.get(rule.source)))
        .collect();

    let mut states: BTreeMap<&'static str, RefState> = BTreeMap::new();
    for (rule, id) in rules.iter().zip(ids) {
        let state = match id {
            None => {
                map.insert(rule.target.to_string(), Value::Null);
                RefState::Absent
            }
            Some(id) => match tables.get(&rule.kind).and_then(|t| t.as_ref()) {
                Some(table) => match table.get(&id) {
                    Some(related) => {
                        map.insert(rule.target.to_string(), related.clone());
                        RefState::Resolved
                    }
                    None => {
                        warn!(
                            field = rule.source,
                            collection = rule.kind.collection(),
                            id = id.as_str(),
                            "referenced record missing from collection"
                        );
                        map.insert(rule.target.to_string(), Value::Null);
                        RefState::Failed
                    }
                },
                None => {
                    map.insert(rule.target.to_string(), Value::Null);
                    RefState::Failed
                }
            },
        };
        states.insert(rule.target, state);
    }

    Ok(ResolvedRecord {
        record: map,
        states,
    })
}

fn into_object(record: Value) -> Result<Map<String, Value>> {
    match record {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::UnexpectedBody(format!(
            "expected a record object, got {other}"
        ))),
    }
}

/// Read a reference id out of a field. Null, missing, and empty/whitespace
/// strings mean "no reference". Numeric ids are accepted and stringified.
fn ref_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn index_by_id(records: Vec<Value>) -> HashMap<String, Value> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = ref_id(record.get("id"))?;
            Some((id, record))
        })
        .collect()
}
