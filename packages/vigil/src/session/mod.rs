//! The dialogue session: per-conversation state and the turn handler.
//!
//! Two states only. `Idle` routes each utterance by intent; a successful
//! extraction moves the session to `AwaitingConfirmation`, which holds the
//! one pending draft until the user confirms, cancels, or edits it. Illegal
//! combinations (a confirmation with no draft, two drafts at once) are
//! unrepresentable.

pub mod edit;
pub mod replies;

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, instrument, warn};

use crate::classify::{self, Intent, PlaceKind};
use crate::error::Result;
use crate::extract;
use crate::geo;
use crate::resolve::time;
use crate::resolve::LocationResolver;
use crate::taxonomy::Category;
use crate::traits::{
    AssistantModel, DeviceLocator, Geocoder, IdentityProvider, Permission, ReportStore,
    SpeechPlayer,
};
use crate::types::{ChatMessage, NewReport, PendingReport, Report, VigilConfig};

static AFFIRM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:yes|y|yeah|yep|confirm|submit|proceed)\s*[!.]*\s*$").unwrap()
});

static NEGATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:no|n|nope|cancel|discard)\s*[!.]*\s*$").unwrap());

/// Session state. The draft lives inside `AwaitingConfirmation`, so there
/// is never a dangling draft in `Idle` and never a confirmation without one.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingConfirmation {
        draft: PendingReport,
    },
}

/// One user's conversation: transcript plus dialogue state.
#[derive(Debug, Clone)]
pub struct DialogueSession {
    pub messages: Vec<ChatMessage>,
    pub state: SessionState,
}

impl DialogueSession {
    /// A fresh session, opened with the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(replies::GREETING)],
            state: SessionState::Idle,
        }
    }

    pub fn awaiting_confirmation(&self) -> bool {
        matches!(self.state, SessionState::AwaitingConfirmation { .. })
    }

    /// The pending draft, if the session is mid-confirmation.
    pub fn draft(&self) -> Option<&PendingReport> {
        match &self.state {
            SessionState::AwaitingConfirmation { draft } => Some(draft),
            SessionState::Idle => None,
        }
    }
}

impl Default for DialogueSession {
    fn default() -> Self {
        Self::new()
    }
}

/// The assistant core. Owns no I/O; every external effect goes through the
/// collaborator traits so the whole dialogue can run against mocks.
pub struct Vigil {
    store: Arc<dyn ReportStore>,
    ai: Arc<dyn AssistantModel>,
    geocoder: Arc<dyn Geocoder>,
    device: Arc<dyn DeviceLocator>,
    identity: Arc<dyn IdentityProvider>,
    speech: Option<Arc<dyn SpeechPlayer>>,
    config: VigilConfig,
}

impl Vigil {
    pub fn new(
        store: Arc<dyn ReportStore>,
        ai: Arc<dyn AssistantModel>,
        geocoder: Arc<dyn Geocoder>,
        device: Arc<dyn DeviceLocator>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            store,
            ai,
            geocoder,
            device,
            identity,
            speech: None,
            config: VigilConfig::default(),
        }
    }

    pub fn with_config(mut self, config: VigilConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechPlayer>) -> Self {
        self.speech = Some(speech);
        self
    }

    /// Handle one user turn. Infallible: every failure path resolves to an
    /// assistant message, never an error bubbled to the caller.
    #[instrument(skip(self, session, input))]
    pub async fn handle_turn(&self, session: &mut DialogueSession, input: &str) -> String {
        session.messages.push(ChatMessage::user(input));

        let state = std::mem::take(&mut session.state);
        let (reply, next) = match state {
            SessionState::Idle => self.idle_turn(&session.messages, input).await,
            SessionState::AwaitingConfirmation { draft } => {
                self.confirmation_turn(draft, input).await
            }
        };
        session.state = next;
        session.messages.push(ChatMessage::assistant(&reply));

        if let Some(speech) = &self.speech {
            speech.speak(&reply);
        }
        reply
    }

    /// Idle-state dispatch: classify, then run the matching handler.
    async fn idle_turn(
        &self,
        transcript: &[ChatMessage],
        input: &str,
    ) -> (String, SessionState) {
        let intent = classify::classify(input);
        debug!(?intent, "classified");

        let reply = match intent {
            Intent::Greeting => replies::GREETING.to_string(),
            Intent::AboutBot => replies::ABOUT.to_string(),
            Intent::EmergencyContacts => replies::emergency_contacts(),
            Intent::MathOrTrivia => replies::DEFLECTION.to_string(),
            Intent::NearbyPlace(kind) => self.nearby_places(kind).await,
            Intent::ListReports { area: None } => self.list_reports().await,
            Intent::ListReports { area: Some(area) } => self.area_summary(&area).await,
            Intent::IncidentReport => {
                let identity = self.identity.current_user();
                match extract::extract(self.config.strategy, self.ai.as_ref(), input, identity)
                    .await
                {
                    Some(draft) => {
                        let summary = replies::confirmation_summary(&draft);
                        return (summary, SessionState::AwaitingConfirmation { draft });
                    }
                    None => replies::RESTATE.to_string(),
                }
            }
            Intent::SafetyChat => self.safety_chat(transcript).await,
        };
        (reply, SessionState::Idle)
    }

    /// Confirmation-state dispatch: confirm, cancel, edit, or remind.
    async fn confirmation_turn(
        &self,
        mut draft: PendingReport,
        input: &str,
    ) -> (String, SessionState) {
        if AFFIRM.is_match(input) {
            return match self.commit(&draft).await {
                Ok(reply) => (reply, SessionState::Idle),
                Err(e) => {
                    // The draft survives a failed write so "yes" can retry.
                    warn!(error = %e, "report write failed, keeping draft");
                    (
                        replies::WRITE_FAILED.to_string(),
                        SessionState::AwaitingConfirmation { draft },
                    )
                }
            };
        }
        if NEGATE.is_match(input) {
            return (replies::CANCELLED.to_string(), SessionState::Idle);
        }

        let edits = edit::parse(input);
        if edits.is_empty() {
            return (
                replies::PROTOCOL_REMINDER.to_string(),
                SessionState::AwaitingConfirmation { draft },
            );
        }
        edit::apply(&mut draft, edits);
        (
            replies::confirmation_summary(&draft),
            SessionState::AwaitingConfirmation { draft },
        )
    }

    /// Resolve the draft's deferred fields and write the report.
    async fn commit(&self, draft: &PendingReport) -> Result<String> {
        let resolver = LocationResolver::new(
            self.geocoder.clone(),
            self.device.clone(),
            self.config.country.clone(),
            self.config.location_timeout,
        );
        let resolved = resolver.resolve(&draft.location).await;
        let incident_time = time::resolve(draft.incident_time.as_deref());

        let (user_name, user_email) = if draft.anonymous {
            (Some("Anonymous".to_string()), None)
        } else if draft.user_name.is_some() || draft.user_email.is_some() {
            (draft.user_name.clone(), draft.user_email.clone())
        } else {
            // No snapshot was captured at extraction time; take one now.
            let current = self.identity.current_user().unwrap_or_default();
            (current.name, current.email)
        };

        let report = NewReport {
            title: draft.title.clone(),
            category: draft.category.unwrap_or(Category::Other),
            description: draft.description.clone(),
            location: resolved.label.clone(),
            latitude: resolved.latitude,
            longitude: resolved.longitude,
            user_name,
            user_email,
            incident_time,
        };
        let id = self.store.create_report(&report).await?;
        debug!(%id, "report created");
        Ok(replies::commit_success(resolved.coordinates()))
    }

    /// Place lookup near the device position, or country-scoped when the
    /// position is unavailable.
    async fn nearby_places(&self, kind: PlaceKind) -> String {
        let query = match self.device_position().await {
            Some(position) => format!(
                "{} near {:.4},{:.4}",
                kind.query_term(),
                position.0,
                position.1
            ),
            None => format!("{} near me, {}", kind.query_term(), self.config.country),
        };

        match self.geocoder.search_places(&query).await {
            Ok(places) if !places.is_empty() => replies::place_list(kind.query_term(), &places),
            Ok(_) => replies::place_fallback(kind.fallback_contact()),
            Err(e) => {
                warn!(error = %e, "place search failed");
                replies::place_fallback(kind.fallback_contact())
            }
        }
    }

    async fn device_position(&self) -> Option<(f64, f64)> {
        match self.device.request_permission().await {
            Ok(Permission::Granted) => {}
            _ => return None,
        }
        match tokio::time::timeout(
            self.config.location_timeout,
            self.device.current_position(),
        )
        .await
        {
            Ok(Ok(position)) => Some((position.latitude, position.longitude)),
            _ => None,
        }
    }

    /// Newest reports, capped at the configured maximum.
    async fn list_reports(&self) -> String {
        let mut reports = match self.store.list_reports().await {
            Ok(reports) => reports,
            Err(e) => {
                warn!(error = %e, "report listing failed");
                return replies::STORE_ERROR.to_string();
            }
        };
        if reports.is_empty() {
            return replies::NO_REPORTS.to_string();
        }
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let top: Vec<&Report> = reports.iter().take(self.config.max_listed_reports).collect();
        replies::report_list(&top)
    }

    /// Area-scoped safety summary. Reports match by distance from the
    /// geocoded area center, or by label substring when geocoding fails.
    async fn area_summary(&self, area: &str) -> String {
        let center = self
            .geocoder
            .geocode(&format!("{}, {}", area, self.config.country))
            .await
            .ok()
            .flatten();

        let mut reports = match self.store.list_reports().await {
            Ok(reports) => reports,
            Err(e) => {
                warn!(error = %e, "report listing failed");
                return replies::STORE_ERROR.to_string();
            }
        };
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let area_lower = area.to_lowercase();
        let matched: Vec<&Report> = reports
            .iter()
            .filter(|report| match (&center, report.latitude, report.longitude) {
                (Some(center), Some(lat), Some(lng)) => {
                    geo::distance_km(center.latitude, center.longitude, lat, lng)
                        <= self.config.nearby_radius_km
                }
                _ => report.location.to_lowercase().contains(&area_lower),
            })
            .collect();

        replies::safety_summary(area, &matched)
    }

    /// Open-ended safety chat: relay the transcript to the model under the
    /// Vigil persona.
    async fn safety_chat(&self, transcript: &[ChatMessage]) -> String {
        match self.ai.complete(transcript, replies::VIGIL_PERSONA).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "model chat failed");
                replies::CONNECTION_ERROR.to_string()
            }
        }
    }
}
