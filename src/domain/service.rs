use crate::config::AppConfig;
use crate::domain::models::{
    CreateInstrumentRequest, Direction, Instrument, InstrumentKind, Status,
    UpdateInstrumentRequest,
};
use crate::domain::validation::{validate_create_request, validate_update_request};
use crate::engine::aggregate::{Collections, Dashboard};
use crate::engine::paginate::{Page, PageRequest};
use crate::engine::{run_query, CriteriaMode, ListQuery};
use crate::error::AppError;
use crate::storage::InstrumentStore;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

#[derive(Clone)]
pub struct InstrumentService<S: InstrumentStore> {
    storage: S,
    criteria_mode: CriteriaMode,
    default_page_size: usize,
}

impl<S: InstrumentStore> InstrumentService<S> {
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, &AppConfig::default())
    }

    pub fn with_config(storage: S, config: &AppConfig) -> Self {
        Self {
            storage,
            criteria_mode: config.criteria_mode,
            default_page_size: config.default_page_size,
        }
    }

    /// Page request with the configured size filled in where the caller gave none.
    pub fn page_request(&self, page: Option<usize>, page_size: Option<usize>) -> PageRequest {
        let first =
            PageRequest::default().with_page_size(page_size.unwrap_or(self.default_page_size));
        match page {
            Some(page) => first.with_page(page),
            None => first,
        }
    }

    pub async fn create(
        &self,
        kind: InstrumentKind,
        direction: Direction,
        req: CreateInstrumentRequest,
    ) -> Result<Instrument, AppError> {
        validate_create_request(&req, direction)?;

        let now = Utc::now();
        let instrument = Instrument {
            id: Uuid::new_v4(),
            kind,
            direction,
            number: req.number.trim().to_string(),
            amount: req.amount,
            issue_date: req.issue_date,
            due_date: req.due_date,
            status: req.status.unwrap_or_else(|| Status::initial(direction)),
            counterparty_name: req.counterparty_name.trim().to_string(),
            bank_name: req.bank_name.trim().to_string(),
            notes: normalize_notes(req.notes),
            created_at: now,
            updated_at: now,
        };

        self.storage.insert(instrument.clone()).await?;
        tracing::info!(id = %instrument.id, %kind, %direction, "instrument created");
        Ok(instrument)
    }

    pub async fn get(&self, id: Uuid) -> Result<Instrument, AppError> {
        self.storage
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Applies a partial update. Kind and direction never change.
    pub async fn update(
        &self,
        id: Uuid,
        req: UpdateInstrumentRequest,
    ) -> Result<Instrument, AppError> {
        let mut instrument = self.get(id).await?;
        validate_update_request(&req, instrument.direction)?;

        if let Some(number) = req.number {
            instrument.number = number.trim().to_string();
        }
        if let Some(amount) = req.amount {
            instrument.amount = amount;
        }
        if let Some(issue_date) = req.issue_date {
            instrument.issue_date = issue_date;
        }
        if let Some(due_date) = req.due_date {
            instrument.due_date = due_date;
        }
        if let Some(status) = req.status {
            instrument.status = status;
        }
        if let Some(name) = req.counterparty_name {
            instrument.counterparty_name = name.trim().to_string();
        }
        if let Some(bank) = req.bank_name {
            instrument.bank_name = bank.trim().to_string();
        }
        if req.notes.is_some() {
            instrument.notes = normalize_notes(req.notes);
        }
        instrument.updated_at = Utc::now();

        let updated = self.storage.replace(instrument).await?;
        tracing::info!(id = %updated.id, status = %updated.status, "instrument updated");
        Ok(updated)
    }

    pub async fn list(
        &self,
        kind: InstrumentKind,
        direction: Direction,
        query: &ListQuery,
    ) -> Result<Page<Instrument>, AppError> {
        let snapshot = self.storage.list(kind, direction).await?;
        run_query(&snapshot, query, self.criteria_mode)
    }

    pub async fn collections(&self) -> Result<Collections, AppError> {
        let (received_checks, issued_checks, received_lcrs, issued_lcrs) = tokio::try_join!(
            self.storage.list(InstrumentKind::Check, Direction::Received),
            self.storage.list(InstrumentKind::Check, Direction::Issued),
            self.storage.list(InstrumentKind::Lcr, Direction::Received),
            self.storage.list(InstrumentKind::Lcr, Direction::Issued),
        )?;
        Ok(Collections {
            received_checks,
            issued_checks,
            received_lcrs,
            issued_lcrs,
        })
    }

    pub async fn dashboard(&self, today: NaiveDate) -> Result<Dashboard, AppError> {
        let collections = self.collections().await?;
        Ok(Dashboard::build(&collections, today))
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}
