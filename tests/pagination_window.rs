use import_dashboard_wasm::domain::catalog::{
    DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PAGE_WINDOW, PageState,
};
use quickcheck_macros::quickcheck;

fn state(total_items: usize, page_size: usize) -> PageState {
    let mut page = PageState::new(page_size);
    page.set_total_items(total_items);
    page
}

#[test]
fn empty_collection_still_has_one_page() {
    let page = state(0, 10);
    assert_eq!(page.total_pages(), 1);
    assert_eq!(page.current_page(), 1);
    let items: Vec<u32> = Vec::new();
    assert!(page.slice(&items).is_empty());
}

#[test]
fn partial_last_page_counts_as_a_page() {
    assert_eq!(state(41, 10).total_pages(), 5);
    assert_eq!(state(40, 10).total_pages(), 4);
    assert_eq!(state(1, 50).total_pages(), 1);
}

#[test]
fn slice_returns_the_requested_page() {
    let items: Vec<usize> = (0..23).collect();
    let mut page = state(items.len(), 10);
    page.set_page(3);
    assert_eq!(page.slice(&items), &[20, 21, 22]);
}

#[test]
fn set_page_clamps_to_the_valid_range() {
    let mut page = state(30, 10);
    page.set_page(99);
    assert_eq!(page.current_page(), 3);
    page.set_page(0);
    assert_eq!(page.current_page(), 1);
}

#[test]
fn prev_on_the_first_page_stays_put() {
    let mut page = state(30, 10);
    page.prev_page();
    assert_eq!(page.current_page(), 1);
    page.set_page(3);
    page.next_page();
    assert_eq!(page.current_page(), 3);
}

#[test]
fn shrinking_collection_pulls_the_page_back() {
    let mut page = state(100, 10);
    page.set_page(10);
    page.set_total_items(15);
    assert_eq!(page.current_page(), 2);
}

#[test]
fn size_change_restarts_from_the_first_page() {
    let mut page = state(100, 10);
    page.set_page(7);
    page.set_page_size(25);
    assert_eq!(page.current_page(), 1);
    assert_eq!(page.page_size(), 25);
    assert_eq!(page.total_pages(), 4);
}

#[test]
fn unknown_size_falls_back_to_the_default() {
    let mut page = state(100, 25);
    page.set_page_size(7);
    assert_eq!(page.page_size(), DEFAULT_PAGE_SIZE);
    assert_eq!(page.current_page(), 1);
}

#[test]
fn window_slides_with_the_current_page() {
    let mut page = state(100, 10);
    assert_eq!(page.window(), vec![1, 2, 3, 4, 5]);
    page.set_page(6);
    assert_eq!(page.window(), vec![4, 5, 6, 7, 8]);
    page.set_page(10);
    assert_eq!(page.window(), vec![6, 7, 8, 9, 10]);
}

#[test]
fn window_never_exceeds_the_page_count() {
    assert_eq!(state(25, 10).window(), vec![1, 2, 3]);
    assert_eq!(state(0, 10).window(), vec![1]);
}

#[quickcheck]
fn total_pages_covers_every_item(total_items: usize) -> bool {
    let total_items = total_items % 10_000;
    let page = state(total_items, 10);
    let pages = page.total_pages();
    pages >= 1 && (pages - 1) * 10 < total_items.max(1) && total_items <= pages * 10
}

#[quickcheck]
fn pages_partition_the_collection(len: usize, size_index: usize) -> bool {
    let len = len % 500;
    let size = PAGE_SIZE_OPTIONS[size_index % PAGE_SIZE_OPTIONS.len()];
    let items: Vec<usize> = (0..len).collect();
    let mut page = state(len, size);

    let mut seen = Vec::new();
    for number in 1..=page.total_pages() {
        page.set_page(number);
        seen.extend_from_slice(page.slice(&items));
    }
    seen == items
}

#[quickcheck]
fn current_page_stays_in_range(len: usize, jump: usize) -> bool {
    let mut page = state(len % 500, 10);
    page.set_page(jump);
    (1..=page.total_pages()).contains(&page.current_page())
}

#[quickcheck]
fn window_is_contiguous_and_contains_the_current_page(len: usize, jump: usize) -> bool {
    let mut page = state(len % 2_000, 5);
    page.set_page(jump);
    let window = page.window();
    window.len() <= PAGE_WINDOW
        && window.contains(&page.current_page())
        && window.windows(2).all(|pair| pair[1] == pair[0] + 1)
}
