use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::models::Instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Number,
    Amount,
    CounterpartyName,
    DueDate,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Number,
        SortKey::Amount,
        SortKey::CounterpartyName,
        SortKey::DueDate,
        SortKey::Status,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sort state after a click on the `key` column header.
    pub fn toggle(current: Option<SortSpec>, key: SortKey) -> Option<SortSpec> {
        match current {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Asc => Some(Self::new(key, SortDirection::Desc)),
                SortDirection::Desc => None,
            },
            _ => Some(Self::new(key, SortDirection::Asc)),
        }
    }

    pub fn compare(&self, a: &Instrument, b: &Instrument) -> Ordering {
        let ordering = compare_by_key(self.key, a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn compare_by_key(key: SortKey, a: &Instrument, b: &Instrument) -> Ordering {
    match key {
        SortKey::Number => a.number.cmp(&b.number),
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::CounterpartyName => a.counterparty_name.cmp(&b.counterparty_name),
        SortKey::DueDate => a.due_date.cmp(&b.due_date),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

/// Stable in both directions.
pub fn apply(mut records: Vec<Instrument>, spec: Option<SortSpec>) -> Vec<Instrument> {
    if let Some(spec) = spec {
        records.sort_by(|a, b| spec.compare(a, b));
    }
    records
}
