use anyhow::Result;
use appointments_core::{AppointmentClient, AppointmentRepository};

use crate::render::Render;
use crate::utils::tui;

pub async fn run(client: AppointmentClient, id: u64) -> Result<()> {
    let appointment = tui::spin("Loading appointment...", client.get(id)).await?;

    println!("{}", appointment.render());

    Ok(())
}
