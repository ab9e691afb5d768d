pub mod browse;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod new;
pub mod show;

use anyhow::{Result, anyhow, bail};
use appointments_core::appointment::{normalize_time, parse_input_date};
use appointments_core::{Appointment, AppointmentDraft, AppointmentRepository, FormController};
use clap::Args;

use crate::render::Render;
use crate::utils::tui;

/// Appointment fields accepted by `new` and `edit`.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Day of the appointment (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long)]
    pub date: Option<String>,

    /// Time of day (HH:mm)
    #[arg(long)]
    pub time: Option<String>,

    /// Customer name
    #[arg(long)]
    pub customer: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// Expected cost
    #[arg(long, allow_hyphen_values = true)]
    pub cost: Option<f64>,
}

impl FieldArgs {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.time.is_none()
            && self.customer.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.cost.is_none()
    }

    /// Whether every field was given on the command line.
    pub fn is_complete(&self) -> bool {
        self.date.is_some()
            && self.time.is_some()
            && self.customer.is_some()
            && self.address.is_some()
            && self.city.is_some()
            && self.cost.is_some()
    }

    /// Copy the given fields into `draft`, leaving the others untouched.
    pub fn apply(&self, draft: &mut AppointmentDraft) -> Result<()> {
        if let Some(date) = &self.date {
            let parsed = parse_input_date(date).ok_or_else(|| {
                anyhow!("Invalid date '{}'. Expected YYYY-MM-DD or DD/MM/YYYY", date)
            })?;
            draft.date = Some(parsed);
        }
        if let Some(time) = &self.time {
            // Left as typed when unparseable; validation reports it
            draft.time = normalize_time(time).unwrap_or_else(|| time.clone());
        }
        if let Some(customer) = &self.customer {
            draft.customer_name = customer.clone();
        }
        if let Some(address) = &self.address {
            draft.address = address.clone();
        }
        if let Some(city) = &self.city {
            draft.city = city.clone();
        }
        if let Some(cost) = self.cost {
            draft.cost = Some(cost);
        }
        Ok(())
    }
}

/// Submit a form, listing every invalid field instead of sending it.
pub async fn save_form<R: AppointmentRepository>(form: &FormController<R>) -> Result<Appointment> {
    let errors = form.errors();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{}", error.render());
        }
        bail!("Appointment not saved");
    }

    let message = if form.is_edit_mode() {
        "Saving appointment..."
    } else {
        "Creating appointment..."
    };

    Ok(tui::spin(message, form.submit()).await?)
}
