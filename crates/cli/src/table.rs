// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering of a report page.

use checkin_report::{TableEntry, TableHeader, TablePage};

const COLUMN_SEPARATOR: &str = " | ";

fn header_text(header: &TableHeader) -> String {
    let indicator: &str = header.indicator();
    if indicator.is_empty() {
        header.label.clone()
    } else {
        format!("{} {indicator}", header.label)
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill: usize = width.saturating_sub(text.chars().count());
    format!("{text}{}", " ".repeat(fill))
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<String>>()
        .join(COLUMN_SEPARATOR)
        .trim_end()
        .to_string()
}

/// Renders the page as aligned columns followed by the result summary.
///
/// Year dividers span the full table width.
#[must_use]
pub fn render_table(page: &TablePage) -> String {
    let labels: Vec<String> = page.headers.iter().map(header_text).collect();
    let mut widths: Vec<usize> = labels.iter().map(|label| label.chars().count()).collect();
    for entry in &page.body {
        if let TableEntry::Row { cells } = entry {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }
    let table_width: usize =
        widths.iter().sum::<usize>() + COLUMN_SEPARATOR.len() * widths.len().saturating_sub(1);

    let mut lines: Vec<String> = Vec::with_capacity(page.body.len() + 4);
    if !labels.is_empty() {
        lines.push(join_padded(&labels, &widths));
        lines.push("-".repeat(table_width));
    }
    for entry in &page.body {
        match entry {
            TableEntry::YearDivider { year } => {
                let title: String = format!(" {year} ");
                let fill: usize = table_width.saturating_sub(title.len());
                lines.push(format!(
                    "{}{title}{}",
                    "=".repeat(fill / 2),
                    "=".repeat(fill - fill / 2)
                ));
            }
            TableEntry::Row { cells } => lines.push(join_padded(cells, &widths)),
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(page.summary());
    lines.push(format!(
        "Page {} of {} ({} per page)",
        page.page, page.total_pages, page.page_size
    ));
    if page.quarantined > 0 {
        lines.push(format!(
            "{} rows set aside because their fields differ from the first row",
            page.quarantined
        ));
    }
    lines.join("\n")
}
