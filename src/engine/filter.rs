use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::domain::models::Instrument;
use crate::engine::CriteriaMode;
use crate::error::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterCriteria {
    pub number: Option<String>,
    pub status: Option<String>,
    pub counterparty_name: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub amount_min: Option<String>,
    pub amount_max: Option<String>,
}

impl FilterCriteria {
    /// Malformed numeric or date criteria are dropped when lenient and rejected
    /// when strict.
    pub fn compile(&self, mode: CriteriaMode) -> Result<Predicate, AppError> {
        Ok(Predicate {
            number: text_needle(&self.number),
            status: self.status.clone().filter(|s| !s.is_empty()),
            counterparty_name: text_needle(&self.counterparty_name),
            date_from: parse_bound("date_from", &self.date_from, parse_date, mode)?,
            date_to: parse_bound("date_to", &self.date_to, parse_date, mode)?,
            amount_min: parse_bound("amount_min", &self.amount_min, parse_amount, mode)?,
            amount_max: parse_bound("amount_max", &self.amount_max, parse_amount, mode)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    number: Option<String>,
    status: Option<String>,
    counterparty_name: Option<String>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    amount_min: Option<Decimal>,
    amount_max: Option<Decimal>,
}

impl Predicate {
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, record: &Instrument) -> bool {
        if let Some(needle) = &self.number {
            if !record.number.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if record.status.as_str() != status {
                return false;
            }
        }
        if let Some(needle) = &self.counterparty_name {
            if !record.counterparty_name.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if self.date_from.is_some_and(|from| record.due_date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| record.due_date > to) {
            return false;
        }
        if self.amount_min.is_some_and(|min| record.amount < min) {
            return false;
        }
        if self.amount_max.is_some_and(|max| record.amount > max) {
            return false;
        }
        true
    }
}

pub fn apply(records: &[Instrument], predicate: &Predicate) -> Vec<Instrument> {
    records
        .iter()
        .filter(|r| predicate.matches(r))
        .cloned()
        .collect()
}

fn text_needle(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    if let Ok(amount) = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        return Some(amount);
    }
    // Well-formed numbers outside the Decimal range saturate.
    let value = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    match Decimal::try_from(value) {
        Ok(amount) => Some(amount),
        Err(_) if value.is_sign_negative() => Some(Decimal::MIN),
        Err(_) => Some(Decimal::MAX),
    }
}

fn parse_bound<T>(
    field: &str,
    raw: &Option<String>,
    parse: fn(&str) -> Option<T>,
    mode: CriteriaMode,
) -> Result<Option<T>, AppError> {
    let Some(raw) = raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match (parse(raw), mode) {
        (Some(value), _) => Ok(Some(value)),
        (None, CriteriaMode::Lenient) => {
            tracing::debug!(field, value = raw, "ignoring malformed filter criterion");
            Ok(None)
        }
        (None, CriteriaMode::Strict) => Err(AppError::Validation(format!(
            "Invalid value for {}: {:?}",
            field, raw
        ))),
    }
}
