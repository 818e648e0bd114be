use crate::domain::models::{Direction, Instrument, InstrumentKind};
use crate::error::AppError;
use crate::storage::InstrumentStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    data: Arc<RwLock<HashMap<Uuid, Instrument>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InstrumentStore for InMemoryStorage {
    async fn insert(&self, instrument: Instrument) -> Result<(), AppError> {
        let mut store = self.data.write().await;
        if store.contains_key(&instrument.id) {
            return Err(AppError::Internal(format!(
                "duplicate instrument id {}",
                instrument.id
            )));
        }
        store.insert(instrument.id, instrument);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Instrument>, AppError> {
        let store = self.data.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn list(
        &self,
        kind: InstrumentKind,
        direction: Direction,
    ) -> Result<Vec<Instrument>, AppError> {
        let store = self.data.read().await;
        let mut results: Vec<Instrument> = store
            .values()
            .filter(|i| i.kind == kind && i.direction == direction)
            .cloned()
            .collect();
        // HashMap order is arbitrary; pin ties so snapshots are reproducible.
        results.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(results)
    }

    async fn replace(&self, instrument: Instrument) -> Result<Instrument, AppError> {
        let mut store = self.data.write().await;
        let slot = store
            .get_mut(&instrument.id)
            .ok_or_else(|| AppError::NotFound(instrument.id.to_string()))?;
        *slot = instrument.clone();
        Ok(instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Status;
    use chrono::{Duration, NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn instrument(kind: InstrumentKind, direction: Direction, due_day: u32) -> Instrument {
        let now = Utc::now();
        Instrument {
            id: Uuid::new_v4(),
            kind,
            direction,
            number: format!("N-{due_day}"),
            amount: Decimal::new(100, 0),
            issue_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 6, due_day).unwrap(),
            status: Status::initial(direction),
            counterparty_name: "Tiers".into(),
            bank_name: "Banque".into(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn list_is_scoped_and_ordered_by_due_date() {
        let store = InMemoryStorage::new();
        for day in [20, 5, 12] {
            store
                .insert(instrument(InstrumentKind::Check, Direction::Received, day))
                .await
                .unwrap();
        }
        store
            .insert(instrument(InstrumentKind::Lcr, Direction::Received, 1))
            .await
            .unwrap();

        let checks = store
            .list(InstrumentKind::Check, Direction::Received)
            .await
            .unwrap();
        let numbers: Vec<&str> = checks.iter().map(|i| i.number.as_str()).collect();
        assert_eq!(numbers, ["N-5", "N-12", "N-20"]);

        let issued = store
            .list(InstrumentKind::Check, Direction::Issued)
            .await
            .unwrap();
        assert!(issued.is_empty());
    }

    #[tokio::test]
    async fn equal_due_dates_follow_creation_order() {
        let store = InMemoryStorage::new();
        let mut first = instrument(InstrumentKind::Lcr, Direction::Issued, 9);
        first.number = "first".into();
        let mut second = instrument(InstrumentKind::Lcr, Direction::Issued, 9);
        second.number = "second".into();
        second.created_at = first.created_at + Duration::seconds(1);

        store.insert(second).await.unwrap();
        store.insert(first).await.unwrap();

        let listed = store
            .list(InstrumentKind::Lcr, Direction::Issued)
            .await
            .unwrap();
        assert_eq!(listed[0].number, "first");
        assert_eq!(listed[1].number, "second");
    }

    #[tokio::test]
    async fn replace_unknown_is_not_found() {
        let store = InMemoryStorage::new();
        let result = store
            .replace(instrument(InstrumentKind::Check, Direction::Issued, 3))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn duplicate_insert_rejected() {
        let store = InMemoryStorage::new();
        let record = instrument(InstrumentKind::Check, Direction::Issued, 3);
        store.insert(record.clone()).await.unwrap();
        assert!(store.insert(record).await.is_err());
    }
}
