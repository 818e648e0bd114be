use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

use crate::domain::models::InstrumentKind;
use crate::engine::filter::FilterCriteria;
use crate::engine::sort::{SortDirection, SortKey, SortSpec};

/// Plural collection name as it appears in URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Checks,
    Lcrs,
}

impl From<CollectionKind> for InstrumentKind {
    fn from(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Checks => InstrumentKind::Check,
            CollectionKind::Lcrs => InstrumentKind::Lcr,
        }
    }
}

/// Criteria stay raw strings; the engine decides what a malformed bound means.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub number: Option<String>,
    pub status: Option<String>,
    pub counterparty_name: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub amount_min: Option<String>,
    pub amount_max: Option<String>,
    pub sort: Option<SortKey>,
    pub order: Option<SortDirection>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<usize>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page_size: Option<usize>,
}

impl ListParams {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            number: self.number.clone(),
            status: self.status.clone(),
            counterparty_name: self.counterparty_name.clone(),
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            amount_min: self.amount_min.clone(),
            amount_max: self.amount_max.clone(),
        }
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
            .map(|key| SortSpec::new(key, self.order.unwrap_or_default()))
    }
}

/// An empty form field such as `page=` reads as absent.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub today: Option<NaiveDate>,
}
