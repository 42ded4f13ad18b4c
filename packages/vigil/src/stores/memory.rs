//! In-memory report store for tests and local development.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, VigilError};
use crate::traits::ReportStore;
use crate::types::{NewReport, Report};

/// Thread-safe in-memory store. Reports live for the process lifetime.
#[derive(Default)]
pub struct MemoryStore {
    reports: RwLock<Vec<Report>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, for exercising retry behavior.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn report_count(&self) -> usize {
        self.reports.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut reports) = self.reports.write() {
            reports.clear();
        }
    }

    /// Seed a fully-formed report, bypassing the commit path.
    pub fn insert(&self, report: Report) {
        if let Ok(mut reports) = self.reports.write() {
            reports.push(report);
        }
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn create_report(&self, report: &NewReport) -> Result<String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(VigilError::Storage(Box::new(std::io::Error::other(
                "write disabled",
            ))));
        }

        let id = Uuid::new_v4().to_string();
        let stored = Report {
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
            created_at: Utc::now(),
        };

        let mut reports = self
            .reports
            .write()
            .map_err(|_| VigilError::Config("report store lock poisoned".to_string()))?;
        reports.push(stored);
        debug!(%id, "stored report");
        Ok(id)
    }

    async fn list_reports(&self) -> Result<Vec<Report>> {
        let reports = self
            .reports
            .read()
            .map_err(|_| VigilError::Config("report store lock poisoned".to_string()))?;
        Ok(reports.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Category;
    use crate::resolve::time;

    fn new_report(title: &str) -> NewReport {
        NewReport {
            title: title.to_string(),
            category: Category::Theft,
            description: "test".to_string(),
            location: "Hatfield".to_string(),
            latitude: Some(-25.75),
            longitude: Some(28.23),
            user_name: None,
            user_email: None,
            incident_time: time::resolve(Some("now")),
        }
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let store = MemoryStore::new();
        let id = store.create_report(&new_report("Bike theft")).await.unwrap();
        let reports = store.list_reports().await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, id);
        assert_eq!(reports[0].title, "Bike theft");
    }

    #[tokio::test]
    async fn failed_writes_surface_as_storage_errors() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.create_report(&new_report("x")).await.is_err());
        assert_eq!(store.report_count(), 0);

        store.set_fail_writes(false);
        assert!(store.create_report(&new_report("x")).await.is_ok());
        assert_eq!(store.report_count(), 1);
    }
}
