use anyhow::Result;
use appointments_core::{Appointment, AppointmentClient, FormController};
use owo_colors::OwoColorize;

use super::{FieldArgs, save_form};
use crate::render::Render;
use crate::utils::{prompt, tui};

/// Load an appointment, apply the given fields (or ask for all of them), and save it.
pub async fn run(client: AppointmentClient, id: u64, fields: &FieldArgs) -> Result<Appointment> {
    let mut form = tui::spin("Loading appointment...", FormController::edit(client, id)).await?;

    if fields.is_empty() {
        if let Ok(current) = form.draft().validate() {
            println!("{}", current.with_id(id).render());
        }
        prompt::fill_draft(form.draft_mut(), false)?;
    } else {
        fields.apply(form.draft_mut())?;
    }

    let saved = save_form(&form).await?;
    println!("{}", format!("  Saved #{}: {}", id, saved).green());

    Ok(saved)
}
