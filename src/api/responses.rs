use serde::Serialize;

use crate::engine::paginate::{Page, PAGE_SIZE_OPTIONS};
use crate::engine::sort::{SortKey, SortSpec};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub start_item: usize,
    pub end_item: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub page_size_options: &'static [usize],
    pub sort: Option<SortSpec>,
    /// What clicking each column header would sort by next.
    pub header_sorts: Vec<HeaderSort>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderSort {
    pub key: SortKey,
    pub next: Option<SortSpec>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn paged(page: Page<T>, sort: Option<SortSpec>) -> Self {
        let header_sorts = SortKey::ALL
            .into_iter()
            .map(|key| HeaderSort {
                key,
                next: SortSpec::toggle(sort, key),
            })
            .collect();
        let meta = PageMeta {
            current_page: page.current_page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
            start_item: page.start_item,
            end_item: page.end_item,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            page_size_options: &PAGE_SIZE_OPTIONS,
            sort,
            header_sorts,
        };
        Self {
            data: page.items,
            meta: Some(meta),
        }
    }
}
