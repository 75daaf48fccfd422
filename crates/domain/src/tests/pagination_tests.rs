// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::json;

use crate::tests::helpers::row;
use crate::{PageWindow, ReportRow, clamp_page, paginate, total_pages};

fn numbered_rows(count: usize) -> Vec<ReportRow> {
    (0..count).map(|n| row(json!({"n": n}))).collect()
}

#[test]
fn test_total_pages_is_at_least_one() {
    assert_eq!(total_pages(0, 10), 1);
    assert_eq!(total_pages(10, 10), 1);
    assert_eq!(total_pages(11, 10), 2);
    assert_eq!(total_pages(25, 12), 3);
}

#[test]
fn test_paginate_slices_one_based_pages() {
    let rows: Vec<ReportRow> = numbered_rows(23);

    assert_eq!(paginate(&rows, 1, 10), &rows[0..10]);
    assert_eq!(paginate(&rows, 3, 10), &rows[20..23]);
    assert!(paginate(&rows, 4, 10).is_empty());
}

#[test]
fn test_pages_cover_every_row_exactly_once() {
    for count in [0_usize, 1, 9, 10, 11, 37, 50] {
        for page_size in [10_usize, 12, 25, 50] {
            let rows: Vec<ReportRow> = numbered_rows(count);
            let pages: usize = total_pages(rows.len(), page_size);

            let rebuilt: Vec<ReportRow> = (1..=pages)
                .flat_map(|page| paginate(&rows, page, page_size).to_vec())
                .collect();

            assert_eq!(rebuilt, rows, "count {count}, page size {page_size}");
        }
    }
}

#[test]
fn test_clamp_page_stays_in_range() {
    assert_eq!(clamp_page(0, 3), 1);
    assert_eq!(clamp_page(2, 3), 2);
    assert_eq!(clamp_page(9, 3), 3);
    assert_eq!(clamp_page(5, 0), 1);
}

#[test]
fn test_page_window_clamps_and_navigates() {
    let window: PageWindow = PageWindow::new(7, 10, 25);

    assert_eq!(window.page, 3);
    assert_eq!(window.total_pages, 3);
    assert!(window.can_go_back());
    assert!(!window.can_go_forward());
    assert_eq!(window.next_page(), 3);
    assert_eq!(window.previous_page(), 2);
}

#[test]
fn test_page_window_first_page() {
    let window: PageWindow = PageWindow::new(1, 10, 0);

    assert!(!window.can_go_back());
    assert!(!window.can_go_forward());
    assert_eq!(window.previous_page(), 1);
}

#[test]
fn test_page_window_with_zero_page_size_stays_in_range() {
    let window: PageWindow = PageWindow::new(40, 0, 10);

    assert_eq!(window.total_pages, 10);
    assert_eq!(window.page, 10);
}
