//! Interactive list: filter, sort, page through and act on appointments.

use std::fmt::Display;

use anyhow::Result;
use appointments_core::{AppointmentClient, Column, ListController, ListState, PAGE_SIZE_OPTIONS};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use super::{FieldArgs, delete, edit, new};
use crate::render::{Render, render_table};
use crate::utils::tui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Filter,
    Sort,
    PageSize,
    NextPage,
    PreviousPage,
    New,
    Edit,
    Delete,
    Reload,
    Quit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::Filter => "Search",
            Action::Sort => "Sort by column",
            Action::PageSize => "Page size",
            Action::NextPage => "Next page",
            Action::PreviousPage => "Previous page",
            Action::New => "New appointment",
            Action::Edit => "Edit appointment",
            Action::Delete => "Delete appointment",
            Action::Reload => "Reload",
            Action::Quit => "Quit",
        }
    }
}

pub async fn run(client: AppointmentClient, page_size: usize) -> Result<()> {
    let mut list = ListController::with_page_size(client.clone(), page_size)?;
    report(tui::spin("Loading appointments...", list.load()).await);

    loop {
        println!();
        let actions = match list.state() {
            ListState::Loaded(_) => {
                let view = list.view();
                println!("{}", render_table(&view));
                if !list.query().filter.trim().is_empty() {
                    println!("{}", format!("Search: {}", list.query().filter.trim()).dimmed());
                }

                let mut actions = vec![Action::Filter, Action::Sort, Action::PageSize];
                if view.has_next_page() {
                    actions.push(Action::NextPage);
                }
                if view.has_previous_page() {
                    actions.push(Action::PreviousPage);
                }
                actions.extend([
                    Action::New,
                    Action::Edit,
                    Action::Delete,
                    Action::Reload,
                    Action::Quit,
                ]);
                actions
            }
            other => {
                println!("{}", other.render());
                vec![Action::Reload, Action::Quit]
            }
        };

        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            Action::Filter => {
                let query: String = Input::new()
                    .with_prompt("  Search")
                    .with_initial_text(list.query().filter.clone())
                    .allow_empty(true)
                    .interact_text()?;
                list.set_filter(&query);
            }
            Action::Sort => {
                let labels: Vec<&str> = Column::ALL.iter().map(|c| c.label()).collect();
                let current = list
                    .query()
                    .sort
                    .and_then(|s| Column::ALL.iter().position(|c| *c == s.column))
                    .unwrap_or(0);
                let index = Select::new()
                    .with_prompt("  Column (select again to flip, a third time to clear)")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                list.toggle_sort(Column::ALL[index]);
            }
            Action::PageSize => {
                let labels: Vec<String> = PAGE_SIZE_OPTIONS.iter().map(|n| n.to_string()).collect();
                let current = PAGE_SIZE_OPTIONS
                    .iter()
                    .position(|n| *n == list.query().page_size)
                    .unwrap_or(0);
                let index = Select::new()
                    .with_prompt("  Rows per page")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                report(list.set_page_size(PAGE_SIZE_OPTIONS[index]));
            }
            Action::NextPage => list.next_page(),
            Action::PreviousPage => list.previous_page(),
            Action::New => {
                if report(new::run(client.clone(), &FieldArgs::default()).await).is_some() {
                    report(tui::spin("Reloading...", list.load()).await);
                }
            }
            Action::Edit => {
                let id = ask_id()?;
                if report(edit::run(client.clone(), id, &FieldArgs::default()).await).is_some() {
                    report(tui::spin("Reloading...", list.load()).await);
                }
            }
            Action::Delete => {
                let id = ask_id()?;
                report(delete::delete_from(&mut list, id, false).await);
            }
            Action::Reload => {
                report(tui::spin("Loading appointments...", list.load()).await);
            }
            Action::Quit => return Ok(()),
        }
    }
}

fn ask_id() -> Result<u64> {
    let id = Input::<u64>::new()
        .with_prompt("  Appointment id")
        .interact_text()?;
    Ok(id)
}

/// Print a failed step in red and keep browsing.
fn report<T, E: Display>(result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("{}", format!("  {}", e).red());
            None
        }
    }
}
