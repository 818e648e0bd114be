pub mod memory;

use crate::domain::models::{Direction, Instrument, InstrumentKind};
use crate::error::AppError;
use std::future::Future;
use uuid::Uuid;

/// `list` returns one kind and direction ordered by ascending due date.
pub trait InstrumentStore: Send + Sync + 'static {
    fn insert(&self, instrument: Instrument) -> impl Future<Output = Result<(), AppError>> + Send;

    fn get(&self, id: Uuid) -> impl Future<Output = Result<Option<Instrument>, AppError>> + Send;

    fn list(
        &self,
        kind: InstrumentKind,
        direction: Direction,
    ) -> impl Future<Output = Result<Vec<Instrument>, AppError>> + Send;

    fn replace(
        &self,
        instrument: Instrument,
    ) -> impl Future<Output = Result<Instrument, AppError>> + Send;
}
