//! Plain-text rendering of row pages and the page-number strip.

use rowhook_core::{display_value, PageItem, Row};

/// Characters of a cell shown before truncation.
pub const TRUNCATE_LENGTH: usize = 60;

/// Fixed-width table of one page of rows. Columns come from the first
/// row, in its column order. Empty input renders nothing.
pub fn render_rows(rows: &[&Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let columns: Vec<&str> = first.columns().collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for row in rows {
        cells.push(
            columns
                .iter()
                .map(|col| truncate(&row.get(col).map(display_value).unwrap_or_default()))
                .collect(),
        );
    }

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(col.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for (i, col) in columns.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        pad(&mut out, col, widths[i]);
    }
    out.push('\n');
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.extend(std::iter::repeat('-').take(*width));
    }
    out.push('\n');
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            pad(&mut out, cell, widths[i]);
        }
        out.push('\n');
    }
    out
}

/// One-line page strip: `1 2 [3] ... 10`, current page bracketed.
pub fn render_page_strip(items: &[PageItem], current: usize) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page(p) if *p == current => format!("[{}]", p),
            PageItem::Page(p) => p.to_string(),
            PageItem::Gap => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= TRUNCATE_LENGTH {
        return text.replace('\n', " ");
    }
    let mut out: String = text.chars().take(TRUNCATE_LENGTH).collect();
    out = out.replace('\n', " ");
    out.push_str("...");
    out
}

fn pad(out: &mut String, text: &str, width: usize) {
    out.push_str(text);
    let len = text.chars().count();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(json: serde_json::Value) -> Row {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn renders_header_and_aligned_cells() {
        let rows = [
            row(json!({"name": "Ann", "amount": 4200})),
            row(json!({"name": "Bo", "amount": 7})),
        ];
        let refs: Vec<&Row> = rows.iter().collect();
        let text = render_rows(&refs);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "name  amount");
        assert_eq!(lines[1], "----  ------");
        assert_eq!(lines[2], "Ann   4200  ");
        assert_eq!(lines[3], "Bo    7     ");
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(100);
        let rows = [row(json!({"note": long}))];
        let refs: Vec<&Row> = rows.iter().collect();
        let text = render_rows(&refs);
        assert!(text.contains(&format!("{}...", "x".repeat(TRUNCATE_LENGTH))));
        assert!(!text.contains(&"x".repeat(TRUNCATE_LENGTH + 1)));
    }

    #[test]
    fn empty_page_renders_nothing() {
        assert_eq!(render_rows(&[]), "");
    }

    #[test]
    fn page_strip_marks_current_page() {
        use PageItem::{Gap, Page};
        let items = [Page(1), Page(2), Page(3), Gap, Page(10)];
        assert_eq!(render_page_strip(&items, 2), "1 [2] 3 ... 10");
    }
}
