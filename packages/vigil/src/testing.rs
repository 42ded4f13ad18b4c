//! Testing utilities including mock collaborators.
//!
//! Useful for exercising the dialogue session without real model, network,
//! or device calls. Every mock records its calls for assertions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Result, VigilError};
use crate::traits::{
    AssistantModel, DeviceLocator, GeocodedPlace, Geocoder, IdentityProvider, Permission, Place,
    Position, ReportStore, SpeechPlayer,
};
use crate::types::{ChatMessage, IdentitySnapshot, NewReport, Report};

fn mock_error(message: &str) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::other(message.to_string()))
}

/// Mock assistant model with canned replies.
#[derive(Default)]
pub struct MockModel {
    reply: Option<String>,
    json: Option<serde_json::Value>,
    fail: bool,
    calls: Arc<RwLock<Vec<MockModelCall>>>,
}

/// Record of a call made to the mock model.
#[derive(Debug, Clone)]
pub enum MockModelCall {
    Complete { message_count: usize },
    CompleteJson { user: String },
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned reply for chat completion.
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Canned object for JSON completion.
    pub fn with_json(mut self, json: serde_json::Value) -> Self {
        self.json = Some(json);
        self
    }

    /// Make every call fail, as if the service were unreachable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<MockModelCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl AssistantModel for MockModel {
    async fn complete(&self, messages: &[ChatMessage], _system: &str) -> Result<String> {
        self.calls.write().unwrap().push(MockModelCall::Complete {
            message_count: messages.len(),
        });
        if self.fail {
            return Err(VigilError::Ai(mock_error("mock model offline")));
        }
        Ok(self
            .reply
            .clone()
            .unwrap_or_else(|| "Stay safe out there.".to_string()))
    }

    async fn complete_json(&self, _system: &str, user: &str) -> Result<serde_json::Value> {
        self.calls
            .write()
            .unwrap()
            .push(MockModelCall::CompleteJson {
                user: user.to_string(),
            });
        if self.fail {
            return Err(VigilError::Ai(mock_error("mock model offline")));
        }
        match &self.json {
            Some(json) => Ok(json.clone()),
            // No canned object behaves like a non-incident answer
            None => Ok(serde_json::json!({ "title": null })),
        }
    }
}

/// Mock geocoder with a fixed address book.
#[derive(Default)]
pub struct MockGeocoder {
    places: HashMap<String, GeocodedPlace>,
    reverse_label: Option<String>,
    search_results: Vec<Place>,
    fail: bool,
    geocode_calls: Arc<RwLock<Vec<String>>>,
    search_calls: Arc<RwLock<Vec<String>>>,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a forward-geocoding hit for an exact query string.
    pub fn with_place(
        mut self,
        query: impl Into<String>,
        latitude: f64,
        longitude: f64,
        display_name: impl Into<String>,
    ) -> Self {
        self.places.insert(
            query.into(),
            GeocodedPlace {
                latitude,
                longitude,
                display_name: display_name.into(),
            },
        );
        self
    }

    /// Label returned by every reverse-geocode call.
    pub fn with_reverse_label(mut self, label: impl Into<String>) -> Self {
        self.reverse_label = Some(label.into());
        self
    }

    /// Hits returned by every place search.
    pub fn with_search_results(mut self, places: Vec<Place>) -> Self {
        self.search_results = places;
        self
    }

    /// Make every call fail, as if the service were unreachable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Queries passed to `geocode`, in order.
    pub fn geocode_calls(&self) -> Vec<String> {
        self.geocode_calls.read().unwrap().clone()
    }

    /// Queries passed to `search_places`, in order.
    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>> {
        self.geocode_calls.write().unwrap().push(address.to_string());
        if self.fail {
            return Err(VigilError::Geocoding(mock_error("mock geocoder offline")));
        }
        Ok(self.places.get(address).cloned())
    }

    async fn reverse_geocode(&self, _latitude: f64, _longitude: f64) -> Result<Option<String>> {
        if self.fail {
            return Err(VigilError::Geocoding(mock_error("mock geocoder offline")));
        }
        Ok(self.reverse_label.clone())
    }

    async fn search_places(&self, query: &str) -> Result<Vec<Place>> {
        self.search_calls.write().unwrap().push(query.to_string());
        if self.fail {
            return Err(VigilError::Geocoding(mock_error("mock geocoder offline")));
        }
        Ok(self.search_results.clone())
    }
}

/// Mock device locator with a fixed position and optional GPS delay.
pub struct MockDeviceLocator {
    permission: Permission,
    position: Option<Position>,
    delay: Option<Duration>,
}

impl MockDeviceLocator {
    /// Permission granted, position fixed at the given coordinates.
    pub fn granted_at(latitude: f64, longitude: f64) -> Self {
        Self {
            permission: Permission::Granted,
            position: Some(Position {
                latitude,
                longitude,
            }),
            delay: None,
        }
    }

    /// Permission denied; the position is never consulted.
    pub fn denied() -> Self {
        Self {
            permission: Permission::Denied,
            position: None,
            delay: None,
        }
    }

    /// Delay every position read, for exercising the GPS timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl DeviceLocator for MockDeviceLocator {
    async fn request_permission(&self) -> Result<Permission> {
        Ok(self.permission)
    }

    async fn current_position(&self) -> Result<Position> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.position
            .ok_or_else(|| VigilError::DeviceLocation("no mock position".to_string()))
    }
}

/// Mock report store with a write-failure toggle.
#[derive(Default)]
pub struct MockStore {
    reports: Arc<RwLock<Vec<Report>>>,
    fail_writes: Arc<RwLock<bool>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a fully-formed report.
    pub fn with_report(self, report: Report) -> Self {
        self.reports.write().unwrap().push(report);
        self
    }

    /// Make every subsequent write fail.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write().unwrap() = fail;
    }

    /// Everything written so far.
    pub fn created(&self) -> Vec<Report> {
        self.reports.read().unwrap().clone()
    }

    pub fn report_count(&self) -> usize {
        self.reports.read().unwrap().len()
    }
}

#[async_trait]
impl ReportStore for MockStore {
    async fn create_report(&self, report: &NewReport) -> Result<String> {
        if *self.fail_writes.read().unwrap() {
            return Err(VigilError::Storage(mock_error("mock store write disabled")));
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.reports.write().unwrap().push(Report {
            id: id.clone(),
            title: report.title.clone(),
            category: report.category,
            description: report.description.clone(),
            location: report.location.clone(),
            latitude: report.latitude,
            longitude: report.longitude,
            user_name: report.user_name.clone(),
            user_email: report.user_email.clone(),
            incident_time: report.incident_time,
            created_at: chrono::Utc::now(),
        });
        Ok(id)
    }

    async fn list_reports(&self) -> Result<Vec<Report>> {
        Ok(self.reports.read().unwrap().clone())
    }
}

/// Mock identity provider.
#[derive(Default)]
pub struct MockIdentity {
    user: Option<IdentitySnapshot>,
}

impl MockIdentity {
    /// No active login.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A logged-in user with the given name and email.
    pub fn logged_in(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user: Some(IdentitySnapshot {
                name: Some(name.into()),
                email: Some(email.into()),
            }),
        }
    }
}

impl IdentityProvider for MockIdentity {
    fn current_user(&self) -> Option<IdentitySnapshot> {
        self.user.clone()
    }
}

/// Mock speech player that records what was spoken.
#[derive(Default)]
pub struct MockSpeech {
    spoken: Arc<RwLock<Vec<String>>>,
    stopped: Arc<RwLock<usize>>,
}

impl MockSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.read().unwrap().clone()
    }

    pub fn stop_count(&self) -> usize {
        *self.stopped.read().unwrap()
    }

    /// Shared handle so a clone can be handed to the assistant while the
    /// test keeps one for assertions.
    pub fn handle(&self) -> Self {
        Self {
            spoken: self.spoken.clone(),
            stopped: self.stopped.clone(),
        }
    }
}

impl SpeechPlayer for MockSpeech {
    fn speak(&self, text: &str) {
        self.spoken.write().unwrap().push(text.to_string());
    }

    fn stop(&self) {
        *self.stopped.write().unwrap() += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_model_tracks_calls() {
        let ai = MockModel::new().with_reply("ok");
        let reply = ai.complete(&[ChatMessage::user("hi")], "system").await.unwrap();
        assert_eq!(reply, "ok");
        assert_eq!(ai.calls().len(), 1);
    }

    #[tokio::test]
    async fn failing_model_errors_on_both_operations() {
        let ai = MockModel::failing();
        assert!(ai.complete(&[], "system").await.is_err());
        assert!(ai.complete_json("system", "user").await.is_err());
    }

    #[tokio::test]
    async fn mock_geocoder_matches_exact_queries_only() {
        let geo = MockGeocoder::new().with_place("Menlyn, South Africa", -25.78, 28.27, "Menlyn");
        assert!(geo.geocode("Menlyn, South Africa").await.unwrap().is_some());
        assert!(geo.geocode("Menlyn").await.unwrap().is_none());
        assert_eq!(geo.geocode_calls().len(), 2);
    }

    #[tokio::test]
    async fn mock_store_write_toggle() {
        let store = MockStore::new();
        store.set_fail_writes(true);
        let report = NewReport {
            title: "x".into(),
            category: crate::taxonomy::Category::Other,
            description: "x".into(),
            location: "x".into(),
            latitude: None,
            longitude: None,
            user_name: None,
            user_email: None,
            incident_time: crate::resolve::time::resolve(None),
        };
        assert!(store.create_report(&report).await.is_err());
        store.set_fail_writes(false);
        assert!(store.create_report(&report).await.is_ok());
        assert_eq!(store.report_count(), 1);
    }
}
