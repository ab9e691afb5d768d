//! TUI rendering traits for appointment types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to appointments-core types using owo_colors.

use appointments_core::form::FieldError;
use appointments_core::{Appointment, Column, ListState, SortDirection, ViewState};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Appointment {
    fn render(&self) -> String {
        let id = match self.id {
            Some(id) => format!("#{}", id),
            None => "(unsaved)".to_string(),
        };

        let lines = [
            format!("{} {}", id.dimmed(), self.customer_name.bold()),
            format!("   {}  {} {}", "When".dimmed(), self.display_date(), self.time),
            format!("   {} {}, {}", "Where".dimmed(), self.address, self.city),
            format!("   {}  {}", "Cost".dimmed(), self.display_cost()),
        ];
        lines.join("\n")
    }
}

impl Render for FieldError {
    fn render(&self) -> String {
        format!("  {} {}", "✗".red(), self.to_string().red())
    }
}

impl Render for ListState {
    fn render(&self) -> String {
        match self {
            ListState::Idle => "Not loaded".dimmed().to_string(),
            ListState::Loading => "Loading...".dimmed().to_string(),
            ListState::Loaded(snapshot) => {
                format!("{} {}", snapshot.len(), pluralize("appointment", snapshot.len()))
                    .dimmed()
                    .to_string()
            }
            ListState::Failed(message) => format!("Could not load appointments: {}", message)
                .red()
                .to_string(),
        }
    }
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

const ID_HEADER: &str = "ID";
const GAP: &str = "  ";

/// Column header, with an arrow on the sorted column.
fn header_label(column: Column, view: &ViewState) -> String {
    match view.sort {
        Some(spec) if spec.column == column => {
            let arrow = match spec.direction {
                SortDirection::Ascending => "▲",
                SortDirection::Descending => "▼",
            };
            format!("{} {}", column.label(), arrow)
        }
        _ => column.label().to_string(),
    }
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{:>width$}", text, width = width)
    } else {
        format!("{:<width$}", text, width = width)
    }
}

/// Render the current page as a table followed by a paging footer.
pub fn render_table(view: &ViewState) -> String {
    if view.rows.is_empty() {
        let message = if view.total == 0 {
            "No appointments"
        } else {
            "No appointments match the filter"
        };
        return format!("{}\n{}", message.dimmed(), render_footer(view));
    }

    let headers: Vec<String> = Column::ALL.iter().map(|c| header_label(*c, view)).collect();
    let cells: Vec<(String, Vec<String>)> = view
        .rows
        .iter()
        .map(|a| {
            let id = a.id.map(|id| id.to_string()).unwrap_or_default();
            let values = Column::ALL.iter().map(|c| a.column_text(*c)).collect();
            (id, values)
        })
        .collect();

    let id_width = cells
        .iter()
        .map(|(id, _)| id.chars().count())
        .chain(std::iter::once(ID_HEADER.len()))
        .max()
        .unwrap_or(ID_HEADER.len());

    let widths: Vec<usize> = Column::ALL
        .iter()
        .enumerate()
        .map(|(i, _)| {
            cells
                .iter()
                .map(|(_, values)| values[i].chars().count())
                .chain(std::iter::once(headers[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(cells.len() + 2);

    let mut header = pad(ID_HEADER, id_width, true);
    for (i, column) in Column::ALL.iter().enumerate() {
        header.push_str(GAP);
        header.push_str(&pad(&headers[i], widths[i], *column == Column::Cost));
    }
    lines.push(header.trim_end().bold().to_string());

    for (id, values) in &cells {
        let mut line = pad(id, id_width, true).dimmed().to_string();
        for (i, column) in Column::ALL.iter().enumerate() {
            line.push_str(GAP);
            let text = pad(&values[i], widths[i], *column == Column::Cost);
            match column {
                Column::CustomerName => line.push_str(&text.bold().to_string()),
                Column::Cost => line.push_str(&text.cyan().to_string()),
                _ => line.push_str(&text),
            }
        }
        lines.push(line.trim_end().to_string());
    }

    lines.push(render_footer(view));
    lines.join("\n")
}

/// e.g. "1-10 of 23 (filtered from 40) · page 1/3 · 10 per page"
pub fn render_footer(view: &ViewState) -> String {
    let range = match view.row_range() {
        Some((first, last)) => format!("{}-{} of {}", first, last, view.matched),
        None => format!("0 of {}", view.matched),
    };

    let mut parts = vec![range];
    if view.matched != view.total {
        parts[0].push_str(&format!(" (filtered from {})", view.total));
    }
    parts.push(format!(
        "page {}/{}",
        if view.page_count == 0 { 0 } else { view.page_index + 1 },
        view.page_count
    ));
    parts.push(format!("{} per page", view.page_size));

    parts.join(" · ").dimmed().to_string()
}
