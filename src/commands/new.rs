use anyhow::Result;
use appointments_core::{Appointment, AppointmentClient, FormController};
use owo_colors::OwoColorize;

use super::{FieldArgs, save_form};
use crate::utils::prompt;

/// Create an appointment from the given fields, prompting for the rest.
pub async fn run(client: AppointmentClient, fields: &FieldArgs) -> Result<Appointment> {
    let mut form = FormController::create(client);
    fields.apply(form.draft_mut())?;

    let interactive = !fields.is_complete();
    if interactive {
        println!("{}", "New appointment".bold());
        prompt::fill_draft(form.draft_mut(), true)?;
    }

    let created = save_form(&form).await?;

    if interactive {
        println!();
    }
    println!(
        "{}",
        format!("  Created #{}: {}", created.id.unwrap_or_default(), created).green()
    );

    Ok(created)
}
