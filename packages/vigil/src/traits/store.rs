//! Persistence collaborator trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{NewReport, Report};

/// The document store holding the `reports` collection.
///
/// The intake core only ever appends and lists; committed reports are never
/// mutated or deleted here. (The backing store also exposes point reads and
/// live subscriptions for the map screens; those are out of this trait
/// because nothing in the dialogue core calls them.)
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Append a new report, returning its assigned document id.
    async fn create_report(&self, report: &NewReport) -> Result<String>;

    /// List all reports, newest-first ordering is the caller's concern.
    async fn list_reports(&self) -> Result<Vec<Report>>;
}
