//! Form controller: one draft, validated locally, submitted as create or update.

use chrono::NaiveDate;
use thiserror::Error;

use crate::appointment::{Appointment, Column, normalize_time};
use crate::error::{AppointmentError, AppointmentResult};
use crate::repository::AppointmentRepository;

/// Whether the form creates a new appointment or edits a stored one.
///
/// Fixed for the lifetime of a [`FormController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u64),
}

/// The in-progress record, as entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentDraft {
    pub date: Option<NaiveDate>,
    pub time: String,
    pub customer_name: String,
    pub address: String,
    pub city: String,
    pub cost: Option<f64>,
}

impl From<&Appointment> for AppointmentDraft {
    fn from(appointment: &Appointment) -> Self {
        AppointmentDraft {
            date: Some(appointment.date),
            time: appointment.time.clone(),
            customer_name: appointment.customer_name.clone(),
            address: appointment.address.clone(),
            city: appointment.city.clone(),
            cost: Some(appointment.cost),
        }
    }
}

/// A single failed field check.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Column),

    #[error("Time '{0}' is not a valid HH:mm time")]
    InvalidTime(String),

    #[error("Cost must be zero or more, got {0}")]
    NegativeCost(f64),
}

impl FieldError {
    pub fn field(&self) -> Column {
        match self {
            FieldError::Required(column) => *column,
            FieldError::InvalidTime(_) => Column::Time,
            FieldError::NegativeCost(_) => Column::Cost,
        }
    }
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Appointment is not valid: {}", join_errors(.0))]
    Invalid(Vec<FieldError>),

    #[error(transparent)]
    Repository(#[from] AppointmentError),
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppointmentDraft {
    /// Check every field and build the unsaved appointment.
    ///
    /// Text fields are trimmed and time is normalized to `HH:mm`. All failing
    /// fields are reported, in column order.
    pub fn validate(&self) -> Result<Appointment, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.date.is_none() {
            errors.push(FieldError::Required(Column::Date));
        }

        let time = if self.time.trim().is_empty() {
            errors.push(FieldError::Required(Column::Time));
            None
        } else {
            let normalized = normalize_time(&self.time);
            if normalized.is_none() {
                errors.push(FieldError::InvalidTime(self.time.trim().to_string()));
            }
            normalized
        };

        for (column, value) in [
            (Column::CustomerName, &self.customer_name),
            (Column::Address, &self.address),
            (Column::City, &self.city),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldError::Required(column));
            }
        }

        match self.cost {
            None => errors.push(FieldError::Required(Column::Cost)),
            Some(cost) if !cost.is_finite() => errors.push(FieldError::Required(Column::Cost)),
            Some(cost) if cost < 0.0 => errors.push(FieldError::NegativeCost(cost)),
            Some(_) => {}
        }

        match (self.date, time, self.cost) {
            (Some(date), Some(time), Some(cost)) if errors.is_empty() => Ok(Appointment::new(
                date,
                time,
                self.customer_name.trim(),
                self.address.trim(),
                self.city.trim(),
                cost,
            )),
            _ => Err(errors),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

pub struct FormController<R> {
    repo: R,
    mode: FormMode,
    draft: AppointmentDraft,
}

impl<R: AppointmentRepository> FormController<R> {
    /// Blank form for a new appointment.
    pub fn create(repo: R) -> Self {
        FormController {
            repo,
            mode: FormMode::Create,
            draft: AppointmentDraft::default(),
        }
    }

    /// Form for an existing appointment, prefilled from the store.
    pub async fn edit(repo: R, id: u64) -> AppointmentResult<Self> {
        let appointment = repo.get(id).await?;

        Ok(FormController {
            repo,
            mode: FormMode::Edit(id),
            draft: AppointmentDraft::from(&appointment),
        })
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn draft(&self) -> &AppointmentDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut AppointmentDraft {
        &mut self.draft
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Field errors that currently block submission.
    pub fn errors(&self) -> Vec<FieldError> {
        self.draft.validate().err().unwrap_or_default()
    }

    pub fn can_submit(&self) -> bool {
        self.draft.is_valid()
    }

    /// Validate and send the draft: create in create mode, update in edit mode.
    ///
    /// An invalid draft never reaches the store.
    pub async fn submit(&self) -> Result<Appointment, FormError> {
        let appointment = self.draft.validate().map_err(FormError::Invalid)?;

        let saved = match self.mode {
            FormMode::Create => self.repo.create(&appointment).await?,
            FormMode::Edit(id) => self.repo.update(&appointment.with_id(id)).await?,
        };

        tracing::info!(id = ?saved.id, mode = ?self.mode, "appointment saved");
        Ok(saved)
    }
}
