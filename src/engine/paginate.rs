use serde::Serialize;

pub const PAGE_SIZE_OPTIONS: [usize; 6] = [20, 40, 80, 100, 200, 500];
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Page 0 is read as page 1 and a zero size as the default.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn with_page(self, page: usize) -> Self {
        Self::new(page, self.page_size)
    }

    /// Changing the size starts over at page 1.
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self::new(1, page_size)
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// 1-based; both ends are 0 when the page is empty.
    pub start_item: usize,
    pub end_item: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(request.page_size);
    let offset = request.offset();

    let slice: Vec<T> = items
        .into_iter()
        .skip(offset)
        .take(request.page_size)
        .collect();

    let (start_item, end_item) = if slice.is_empty() {
        (0, 0)
    } else {
        (offset + 1, offset + slice.len())
    };

    Page {
        items: slice,
        current_page: request.page,
        page_size: request.page_size,
        total_items,
        total_pages,
        start_item,
        end_item,
    }
}
