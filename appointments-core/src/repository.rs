//! The appointment store as seen by the controllers.

use std::future::Future;

use crate::appointment::Appointment;
use crate::error::AppointmentResult;

/// CRUD operations against the appointment store.
///
/// Every call is a single request with no retry. Errors are handed back to the
/// caller as-is.
pub trait AppointmentRepository {
    /// All appointments, in the order the store returns them.
    fn list(&self) -> impl Future<Output = AppointmentResult<Vec<Appointment>>> + Send;

    fn get(&self, id: u64) -> impl Future<Output = AppointmentResult<Appointment>> + Send;

    /// Persist an unsaved appointment. The returned record carries the new id.
    fn create(
        &self,
        appointment: &Appointment,
    ) -> impl Future<Output = AppointmentResult<Appointment>> + Send;

    /// Replace a saved appointment, keyed by its id.
    fn update(
        &self,
        appointment: &Appointment,
    ) -> impl Future<Output = AppointmentResult<Appointment>> + Send;

    fn delete(&self, id: u64) -> impl Future<Output = AppointmentResult<()>> + Send;
}
