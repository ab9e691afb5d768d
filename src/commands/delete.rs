use anyhow::Result;
use appointments_core::{AppointmentClient, AppointmentRepository, DeleteOutcome, ListController};
use owo_colors::OwoColorize;

use crate::render::{Render, render_table};
use crate::utils::{prompt, tui};

pub async fn run(client: AppointmentClient, id: u64, yes: bool, page_size: usize) -> Result<()> {
    let mut list = ListController::with_page_size(client, page_size)?;
    tui::spin("Loading appointments...", list.load()).await?;

    if delete_from(&mut list, id, yes).await? == DeleteOutcome::Deleted {
        println!("{}", render_table(&list.view()));
    }

    Ok(())
}

/// Confirm (unless `yes`), delete and reload `list`.
pub async fn delete_from<R: AppointmentRepository>(
    list: &mut ListController<R>,
    id: u64,
    yes: bool,
) -> Result<DeleteOutcome> {
    let outcome = list
        .delete(id, |target| {
            if yes {
                return true;
            }
            if let Some(appointment) = target {
                println!("{}", appointment.render());
            }
            prompt::confirm(&format!("Delete appointment #{}?", id))
        })
        .await?;

    match outcome {
        DeleteOutcome::Cancelled => println!("{}", "Nothing deleted".dimmed()),
        DeleteOutcome::Deleted => println!("{}", format!("  Deleted #{}", id).green()),
    }

    Ok(outcome)
}
