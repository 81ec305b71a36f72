use tabula::pagination::{Pagination, paginate, paginate_with_total, total_pages};

#[test]
fn test_total_pages_never_zero() {
    assert_eq!(total_pages(0, 10), 1);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(11, 10), 2);
    assert_eq!(total_pages(5, 0), 5);
}

#[test]
fn test_summary_middle_page() {
    let mut state = Pagination::new(5);
    state.go_to_page(2, 12);
    let summary = state.summary(12);
    assert_eq!(summary.page, 2);
    assert_eq!(summary.total_pages, 3);
    assert!(summary.has_next);
    assert!(summary.has_prev);
    assert_eq!(summary.range(), 5..10);
    assert_eq!(summary.describe(), "Showing 6-10 of 12");
}

#[test]
fn test_go_to_page_clamps() {
    let mut state = Pagination::new(5);
    state.go_to_page(0, 12);
    assert_eq!(state.page(), 1);
    state.go_to_page(99, 12);
    assert_eq!(state.page(), 3);
}

#[test]
fn test_next_and_prev_stop_at_edges() {
    let mut state = Pagination::new(5);
    assert!(!state.prev_page(12));
    assert!(state.next_page(12));
    assert!(state.next_page(12));
    assert!(!state.next_page(12));
    assert_eq!(state.page(), 3);
    assert!(state.prev_page(12));
    assert_eq!(state.page(), 2);
}

#[test]
fn test_clamp_only_moves_invalid_page() {
    let mut state = Pagination::new(5);
    state.last_page(12);
    assert!(!state.clamp(11));
    assert_eq!(state.page(), 3);
    assert!(state.clamp(4));
    assert_eq!(state.page(), 1);
}

#[test]
fn test_set_per_page_returns_to_first() {
    let mut state = Pagination::new(5);
    state.last_page(12);
    state.set_per_page(0);
    assert_eq!(state.page(), 1);
    assert_eq!(state.per_page(), 1);
}

#[test]
fn test_paginate_slices() {
    let items: Vec<u32> = (1..=12).collect();
    let mut state = Pagination::new(5);
    state.last_page(items.len());
    let window = paginate(&items, &state);
    assert_eq!(window.items, &[11, 12]);
    assert!(!window.summary.has_next);
}

#[test]
fn test_paginate_with_larger_total() {
    let items: Vec<u32> = (1..=10).collect();
    let mut state = Pagination::new(10);
    state.go_to_page(3, 100);

    let window = paginate_with_total(&items, &state, 100);
    assert!(window.items.is_empty());
    assert_eq!(window.summary.page, 3);
    assert_eq!(window.summary.total_pages, 10);

    state.first_page();
    let window = paginate_with_total(&items, &state, 100);
    assert_eq!(window.items.len(), 10);
    assert_eq!(window.summary.describe(), "Showing 1-10 of 100");
}
