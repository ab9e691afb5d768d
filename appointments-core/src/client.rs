//! HTTP client for the `/appointments` REST resource.

use reqwest::{Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::appointment::Appointment;
use crate::config::AppointmentsConfig;
use crate::error::{AppointmentError, AppointmentResult};
use crate::repository::AppointmentRepository;

const RESOURCE: &str = "appointments";

/// REST client for the appointment store.
#[derive(Debug, Clone)]
pub struct AppointmentClient {
    http: reqwest::Client,
    base_url: String,
}

impl AppointmentClient {
    /// Build a client for the resource under `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> AppointmentResult<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            AppointmentError::Config(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppointmentError::Config(format!(
                "Base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(AppointmentClient {
            http: reqwest::Client::new(),
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppointmentsConfig) -> AppointmentResult<Self> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, RESOURCE)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{}/{}", self.base_url, RESOURCE, id)
    }
}

impl AppointmentRepository for AppointmentClient {
    /// GET /appointments
    async fn list(&self) -> AppointmentResult<Vec<Appointment>> {
        let url = self.collection_url();
        tracing::debug!(method = "GET", %url, "listing appointments");

        let resp = self.http.get(&url).send().await?;
        let resp = check_status(resp, None).await?;

        Ok(resp.json().await?)
    }

    /// GET /appointments/:id
    async fn get(&self, id: u64) -> AppointmentResult<Appointment> {
        let url = self.item_url(id);
        tracing::debug!(method = "GET", %url, "fetching appointment");

        let resp = self.http.get(&url).send().await?;
        let resp = check_status(resp, Some(id)).await?;

        Ok(resp.json().await?)
    }

    /// POST /appointments
    async fn create(&self, appointment: &Appointment) -> AppointmentResult<Appointment> {
        if let Some(id) = appointment.id {
            return Err(AppointmentError::AlreadySaved(id));
        }

        let url = self.collection_url();
        tracing::debug!(method = "POST", %url, "creating appointment");

        let resp = self.http.post(&url).json(appointment).send().await?;
        let resp = check_status(resp, None).await?;

        let created: Appointment = resp.json().await?;
        if !created.is_saved() {
            return Err(AppointmentError::Unknown(
                "Server did not assign an id to the created appointment".into(),
            ));
        }
        Ok(created)
    }

    /// PUT /appointments/:id
    async fn update(&self, appointment: &Appointment) -> AppointmentResult<Appointment> {
        let id = appointment.id.ok_or(AppointmentError::Unsaved)?;

        let url = self.item_url(id);
        tracing::debug!(method = "PUT", %url, "updating appointment");

        let resp = self.http.put(&url).json(appointment).send().await?;
        let resp = check_status(resp, Some(id)).await?;

        Ok(resp.json().await?)
    }

    /// DELETE /appointments/:id
    async fn delete(&self, id: u64) -> AppointmentResult<()> {
        let url = self.item_url(id);
        tracing::debug!(method = "DELETE", %url, "deleting appointment");

        let resp = self.http.delete(&url).send().await?;
        check_status(resp, Some(id)).await?;

        Ok(())
    }
}

/// Map a non-success response onto the error taxonomy.
///
/// `id` is the record the request addressed; a 404 on the collection itself is
/// not a missing appointment.
async fn check_status(resp: Response, id: Option<u64>) -> AppointmentResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| status.to_string());
    tracing::warn!(%status, %message, "appointment request failed");

    Err(match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => AppointmentError::NotFound(id),
        (StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY, _) => {
            AppointmentError::ValidationRejected(message)
        }
        _ => AppointmentError::Unknown(format!("{} ({})", message, status)),
    })
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": ...}` and `{"message": ...}`; falls back to the raw text.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(Value::String(msg)) = map.get(key) {
                return Some(msg.clone());
            }
        }
    }

    Some(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_strip_trailing_slash() {
        let client = AppointmentClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.collection_url(), "http://localhost:3000/appointments");
        assert_eq!(client.item_url(4), "http://localhost:3000/appointments/4");
    }

    #[test]
    fn test_urls_keep_base_path() {
        let client = AppointmentClient::new("https://example.com/api/v1").unwrap();
        assert_eq!(client.item_url(1), "https://example.com/api/v1/appointments/1");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            AppointmentClient::new("localhost:3000"),
            Err(AppointmentError::Config(_))
        ));
        assert!(matches!(
            AppointmentClient::new("not a url"),
            Err(AppointmentError::Config(_))
        ));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"error":"slot taken"}"#).as_deref(), Some("slot taken"));
        assert_eq!(error_message(r#"{"message":"bad cost"}"#).as_deref(), Some("bad cost"));
        assert_eq!(error_message("plain failure\n").as_deref(), Some("plain failure"));
        assert_eq!(error_message("   "), None);
    }
}
