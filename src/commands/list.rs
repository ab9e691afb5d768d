use anyhow::Result;
use appointments_core::{AppointmentClient, Column, ListController, SortSpec};

use crate::render::render_table;
use crate::utils::tui;

/// Options of the one-shot `list` command.
pub struct ListOptions {
    pub filter: Option<String>,
    pub sort: Option<Column>,
    pub descending: bool,
    pub page_size: usize,
    /// One-based page number.
    pub page: usize,
}

pub async fn run(client: AppointmentClient, options: ListOptions) -> Result<()> {
    let mut list = ListController::with_page_size(client, options.page_size)?;
    tui::spin("Loading appointments...", list.load()).await?;

    if let Some(filter) = &options.filter {
        list.set_filter(filter);
    }

    if let Some(column) = options.sort {
        let spec = if options.descending {
            SortSpec::descending(column)
        } else {
            SortSpec::ascending(column)
        };
        list.set_sort(Some(spec));
    }

    list.set_page(options.page.saturating_sub(1));

    println!("{}", render_table(&list.view()));

    Ok(())
}
