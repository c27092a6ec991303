// ── Create-or-update reconciliation ──
//
// Source records are paired with destination records by natural key.
// Controller ids are never compared across elements.

use indexmap::IndexMap;
use tracing::warn;

use crate::payload::{Payload, Record};
use crate::summary::Operation;

/// One write the run will perform against the destination.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Create { key: String, payload: Payload },
    Update { key: String, id: String, payload: Payload },
}

impl Action {
    pub fn key(&self) -> &str {
        match self {
            Self::Create { key, .. } | Self::Update { key, .. } => key,
        }
    }

    pub fn payload(&self) -> &Payload {
        match self {
            Self::Create { payload, .. } | Self::Update { payload, .. } => payload,
        }
    }

    pub fn payload_mut(&mut self) -> &mut Payload {
        match self {
            Self::Create { payload, .. } | Self::Update { payload, .. } => payload,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::Create { .. } => Operation::Create,
            Self::Update { .. } => Operation::Update,
        }
    }
}

/// Index records by natural key, keeping listing order.
///
/// When the controller reports two records with the same key, the later
/// one is kept.
pub fn index_by_key<T: Record + Clone>(records: &[T]) -> IndexMap<String, T> {
    records
        .iter()
        .map(|r| (r.natural_key().to_owned(), r.clone()))
        .collect()
}

/// Decide create vs update for every source record that passes `filter`.
///
/// `sanitize` turns a source record into its outgoing payload; updates
/// overlay that onto the destination record's sanitized fields so
/// destination-only attributes survive. A key that appears twice in the
/// source yields one action built from the later record.
pub fn reconcile<'a, T, F, S>(
    source: impl IntoIterator<Item = &'a T>,
    destination: &IndexMap<String, T>,
    filter: F,
    mut sanitize: S,
) -> Vec<Action>
where
    T: Record + 'a,
    F: Fn(&T) -> bool,
    S: FnMut(&T) -> Payload,
{
    let mut actions: IndexMap<String, Action> = IndexMap::new();

    for record in source.into_iter().filter(|r| filter(r)) {
        let key = record.natural_key().to_owned();
        let outgoing = sanitize(record);

        let action = match destination.get(&key) {
            Some(existing) => Action::Update {
                key: key.clone(),
                id: existing.id().to_owned(),
                payload: Payload::from_record(existing).overlay(outgoing),
            },
            None => Action::Create {
                key: key.clone(),
                payload: outgoing,
            },
        };

        if actions.shift_remove(&key).is_some() {
            warn!(key = %key, "duplicate source key; the later record wins");
        }
        actions.insert(key, action);
    }

    actions.into_values().collect()
}
