//! Core of the appointments tool.
//!
//! This crate has everything except the terminal:
//! - `Appointment` and its wire/display formats
//! - `AppointmentClient`, the REST client behind the `AppointmentRepository` trait
//! - `ListController` and the pure `view` derivation (filter, sort, paginate)
//! - `FormController` with client-side validation

pub mod appointment;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod list;
pub mod repository;
pub mod view;

pub use appointment::{Appointment, Column};
pub use client::AppointmentClient;
pub use config::AppointmentsConfig;
pub use error::{AppointmentError, AppointmentResult};
pub use form::{AppointmentDraft, FieldError, FormController, FormError, FormMode};
pub use list::{DeleteOutcome, ListController, ListState};
pub use repository::AppointmentRepository;
pub use view::{PAGE_SIZE_OPTIONS, SortDirection, SortSpec, ViewQuery, ViewState};
