pub mod aggregate;
pub mod filter;
pub mod paginate;
pub mod sort;

use serde::{Deserialize, Serialize};

use crate::domain::models::Instrument;
use crate::error::AppError;
use filter::FilterCriteria;
use paginate::{Page, PageRequest};
use sort::SortSpec;

/// How numeric and date criteria that fail to parse are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriteriaMode {
    #[default]
    Lenient,
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub criteria: FilterCriteria,
    pub sort: Option<SortSpec>,
    pub page: PageRequest,
}

/// Filter, then sort, then paginate.
pub fn run_query(
    snapshot: &[Instrument],
    query: &ListQuery,
    mode: CriteriaMode,
) -> Result<Page<Instrument>, AppError> {
    let predicate = query.criteria.compile(mode)?;
    let matched = if predicate.is_unconstrained() {
        snapshot.to_vec()
    } else {
        filter::apply(snapshot, &predicate)
    };
    let sorted = sort::apply(matched, query.sort);
    let page = paginate::paginate(sorted, query.page);

    tracing::debug!(
        snapshot = snapshot.len(),
        matched = page.total_items,
        page = page.current_page,
        page_size = page.page_size,
        "query evaluated"
    );

    Ok(page)
}
