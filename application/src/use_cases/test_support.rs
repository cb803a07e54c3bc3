//! Test doubles shared by the use case tests.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use crate::ports::transcript_store::{MeetingListing, StoreError, TranscriptStore};
use crate::use_cases::shared::InvocationKind;
use async_trait::async_trait;
use roundtable_domain::{
    Meeting, MeetingConfig, MeetingId, Model, Participant, ParticipantRoster, PromptTemplate,
    Round,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ==================== Scripted Gateway ====================

/// How the scripted model answers one kind of request.
#[derive(Debug, Clone)]
pub(crate) enum Script {
    Reply(String),
    Delay(Duration, String),
    Fail(GatewayError),
    /// Never answers; signals `hang_started` when entered.
    Hang,
}

impl Script {
    pub fn reply(text: &str) -> Self {
        Script::Reply(text.to_string())
    }

    pub fn yes() -> Self {
        Script::reply("DECISION: YES\nSUMMARY: I have a point.")
    }

    pub fn no() -> Self {
        Script::reply("DECISION: NO\nSUMMARY: Nothing to add.")
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub model: String,
    pub kind: InvocationKind,
    pub prompt: String,
    pub max_tokens: Option<u32>,
}

#[derive(Default)]
struct Inner {
    relevance: HashMap<String, Script>,
    responses: HashMap<String, Script>,
    summary: Option<Script>,
    calls: Mutex<Vec<Call>>,
    in_flight: AtomicUsize,
    hang_started: Arc<Notify>,
}

/// Gateway whose answers are scripted per model and request kind.
///
/// Request kind is inferred from the prompts: relevance prompts carry the
/// `DECISION:` format, summaries use the notes system prompt.
#[derive(Clone, Default)]
pub(crate) struct ScriptedGateway {
    inner: Arc<Inner>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner_mut(&mut self) -> &mut Inner {
        Arc::get_mut(&mut self.inner).expect("configure the gateway before sharing it")
    }

    pub fn relevance(mut self, model: &str, script: Script) -> Self {
        self.inner_mut().relevance.insert(model.to_string(), script);
        self
    }

    pub fn respond(mut self, model: &str, script: Script) -> Self {
        self.inner_mut().responses.insert(model.to_string(), script);
        self
    }

    pub fn summary(mut self, script: Script) -> Self {
        self.inner_mut().summary = Some(script);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    /// Models asked for a full response, in call order.
    pub fn response_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.kind == InvocationKind::FullResponse)
            .map(|c| c.model)
            .collect()
    }

    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    pub fn hang_started(&self) -> Arc<Notify> {
        Arc::clone(&self.inner.hang_started)
    }
}

struct ScriptedSession {
    model: Model,
    system_prompt: String,
    inner: Arc<Inner>,
}

struct InFlightGuard(Arc<Inner>);

impl InFlightGuard {
    fn new(inner: &Arc<Inner>) -> Self {
        inner.in_flight.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(inner))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(ScriptedSession {
            model: model.clone(),
            system_prompt: system_prompt.to_string(),
            inner: Arc::clone(&self.inner),
        }))
    }
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.send_with_max_tokens(content, None).await
    }

    async fn send_with_max_tokens(
        &self,
        content: &str,
        max_tokens: Option<u32>,
    ) -> Result<String, GatewayError> {
        let _guard = InFlightGuard::new(&self.inner);

        let kind = if self.system_prompt == PromptTemplate::notes_system() {
            InvocationKind::Summary
        } else if content.contains("DECISION: YES") {
            InvocationKind::RelevanceCheck
        } else {
            InvocationKind::FullResponse
        };

        self.inner.calls.lock().unwrap().push(Call {
            model: self.model.to_string(),
            kind,
            prompt: content.to_string(),
            max_tokens,
        });

        let script = match kind {
            InvocationKind::RelevanceCheck => self.inner.relevance.get(self.model.as_str()).cloned(),
            InvocationKind::FullResponse => self.inner.responses.get(self.model.as_str()).cloned(),
            InvocationKind::Summary => self.inner.summary.clone(),
        }
        .unwrap_or_else(|| Script::Fail(GatewayError::Other("no script".to_string())));

        match script {
            Script::Reply(text) => Ok(text),
            Script::Delay(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            Script::Fail(e) => Err(e),
            Script::Hang => {
                self.inner.hang_started.notify_one();
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

// ==================== In-memory Store ====================

#[derive(Default)]
pub(crate) struct MemoryStore {
    meetings: Mutex<HashMap<MeetingId, Meeting>>,
    fail_appends: AtomicBool,
    appends: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    pub fn append_count(&self) -> usize {
        self.appends.load(Ordering::SeqCst)
    }

    pub fn stored(&self, id: &MeetingId) -> Option<Meeting> {
        self.meetings.lock().unwrap().get(id).cloned()
    }
}

impl TranscriptStore for MemoryStore {
    fn create(&self, meeting: &Meeting) -> Result<(), StoreError> {
        let mut meetings = self.meetings.lock().unwrap();
        if meetings.contains_key(meeting.id()) {
            return Err(StoreError::AlreadyExists(meeting.id().clone()));
        }
        meetings.insert(meeting.id().clone(), meeting.clone());
        Ok(())
    }

    fn append_closed_round(&self, meeting_id: &MeetingId, round: &Round) -> Result<(), StoreError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(StoreError::Io("disk full".to_string()));
        }
        let mut meetings = self.meetings.lock().unwrap();
        let meeting = meetings
            .get_mut(meeting_id)
            .ok_or_else(|| StoreError::NotFound(meeting_id.clone()))?;
        let expected = meeting.next_round_index();
        if round.index != expected {
            return Err(StoreError::Conflict {
                meeting: meeting_id.clone(),
                expected,
                found: round.index,
            });
        }
        meeting
            .push_round(round.clone())
            .map_err(|e| StoreError::corrupt(meeting_id, &e))?;
        self.appends.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load(&self, meeting_id: &MeetingId) -> Result<Meeting, StoreError> {
        self.meetings
            .lock()
            .unwrap()
            .get(meeting_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(meeting_id.clone()))
    }

    fn list(&self) -> Result<Vec<MeetingListing>, StoreError> {
        Ok(self
            .meetings
            .lock()
            .unwrap()
            .values()
            .map(|m| MeetingListing {
                id: m.id().clone(),
                title: m.title().to_string(),
                created_at: String::new(),
                updated_at: String::new(),
                round_count: m.rounds().len(),
                turn_count: m.turn_count(),
            })
            .collect())
    }

    fn delete(&self, meeting_id: &MeetingId) -> Result<bool, StoreError> {
        Ok(self.meetings.lock().unwrap().remove(meeting_id).is_some())
    }
}

// ==================== Fixtures ====================

/// Roster where each participant's model id equals its name.
pub(crate) fn roster(entries: &[(&str, u32)]) -> ParticipantRoster {
    ParticipantRoster::new(
        entries
            .iter()
            .map(|(name, priority)| {
                Participant::new(*name, "role", "personality", Model::new(*name), *priority)
            })
            .collect(),
    )
    .unwrap()
}

pub(crate) fn meeting(entries: &[(&str, u32)], config: MeetingConfig) -> Meeting {
    Meeting::new(MeetingId::new("meeting_test"), "Test meeting", config, roster(entries)).unwrap()
}

/// The scenario configuration: relevance 20s, response 90s, 10 turns.
pub(crate) fn scenario_config() -> MeetingConfig {
    MeetingConfig::default()
}
