/// Page sizes offered by the list views
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Width of the page-number strip
pub const PAGE_WINDOW: usize = 5;

/// Pure pagination state over (current page, page size, item count)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_items: 0,
        }
    }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        let mut state = Self::default();
        state.set_page_size(page_size);
        state
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// At least 1 even for an empty collection, so the pager always has a page to show
    pub fn total_pages(&self) -> usize {
        if self.total_items == 0 {
            return 1;
        }
        self.total_items.div_ceil(self.page_size)
    }

    /// Record a new collection size, pulling the current page back into range
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = self.current_page.min(self.total_pages());
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    /// Switching the page size always restarts from the first page.
    /// Values outside PAGE_SIZE_OPTIONS fall back to the default size.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = if PAGE_SIZE_OPTIONS.contains(&page_size) {
            page_size
        } else {
            DEFAULT_PAGE_SIZE
        };
        self.current_page = 1;
    }

    /// Visible slice of `items` for the effective (clamped) page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let page = self.current_page.min(self.total_pages());
        let start = (page - 1).saturating_mul(self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// Up to PAGE_WINDOW page numbers centered on the current page, sliding at
    /// the boundaries so the strip stays full whenever enough pages exist
    pub fn window(&self) -> Vec<usize> {
        let total = self.total_pages();
        let start = self.current_page.saturating_sub(PAGE_WINDOW / 2).max(1);
        let end = (start + PAGE_WINDOW - 1).min(total);
        let start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
        (start..=end).collect()
    }
}
