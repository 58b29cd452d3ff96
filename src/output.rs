use chrono::{DateTime, SecondsFormat, Utc};

/// Renders rows as aligned columns. Every row must have one cell per header.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if index < widths.len() && cell.len() > widths[index] {
                widths[index] = cell.len();
            }
        }
    }

    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();

    let mut rendered = String::new();
    push_row(&mut rendered, &widths, headers.iter().copied());
    push_row(&mut rendered, &widths, separator.iter().map(String::as_str));
    for row in rows {
        push_row(&mut rendered, &widths, row.iter().map(String::as_str));
    }

    rendered
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn push_row<'a>(buffer: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let mut line = String::new();
    for (index, cell) in cells.enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        let width = widths.get(index).copied().unwrap_or(0);
        let padding = width.saturating_sub(cell.len());
        line.push_str(cell);
        line.push_str(&" ".repeat(padding));
    }
    buffer.push_str(line.trim_end());
    buffer.push('\n');
}

pub fn format_timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|timestamp| timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string())
}

pub fn format_optional<T: ToString>(value: Option<T>) -> String {
    value
        .map(|inner| inner.to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Completion percentage rounded to a whole number; an empty set is 0%.
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}
