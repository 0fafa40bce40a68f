//! Scripted [`InferenceBackend`] for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{AnalysisResult, AnalysisUnit, Candidate};
use crate::port::outbound::InferenceBackend;

/// What the backend does for a unit.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Match with label `"<kind>-<index>"` and score 0.9.
    Echo,
    /// Translate these candidates as a real backend would.
    Candidates(Vec<Candidate>),
    /// Fail with this detail.
    Fail(String),
    /// Panic inside `analyze`.
    Panic,
}

/// A backend with per-index replies and delays.
///
/// Records the order in which units start and finish and the highest
/// number of calls observed in flight at once.
pub struct ScriptedBackend {
    default_reply: Reply,
    replies: HashMap<usize, Reply>,
    default_delay: Duration,
    delays: HashMap<usize, Duration>,
    calls: Mutex<Vec<usize>>,
    completed: Mutex<Vec<usize>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            default_reply: Reply::Echo,
            replies: HashMap::new(),
            default_delay: Duration::ZERO,
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Reply used for indices without a specific reply.
    #[must_use]
    pub fn with_default(mut self, reply: Reply) -> Self {
        self.default_reply = reply;
        self
    }

    /// Reply for one sequence index.
    #[must_use]
    pub fn reply(mut self, index: usize, reply: Reply) -> Self {
        self.replies.insert(index, reply);
        self
    }

    /// Delay applied to every unit without a specific delay.
    #[must_use]
    pub fn delay_all(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Delay for one sequence index.
    #[must_use]
    pub fn delay(mut self, index: usize, delay: Duration) -> Self {
        self.delays.insert(index, delay);
        self
    }

    /// Indices in the order `analyze` was entered.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.lock().clone()
    }

    /// Indices in the order `analyze` returned.
    pub fn completed(&self) -> Vec<usize> {
        self.completed.lock().clone()
    }

    /// Highest number of concurrent `analyze` calls observed.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn analyze(&self, unit: &AnalysisUnit) -> AnalysisResult {
        let (index, kind) = (unit.index(), unit.kind());
        self.calls.lock().push(index);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.get(&index).copied().unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let reply = self.replies.get(&index).unwrap_or(&self.default_reply);

        let result = match reply {
            Reply::Echo => AnalysisResult::matched(index, kind, format!("{kind}-{index}"), 0.9),
            Reply::Candidates(candidates) => {
                AnalysisResult::from_candidates(index, kind, candidates.clone())
            }
            Reply::Fail(detail) => AnalysisResult::failed(index, kind, detail.clone()),
            Reply::Panic => panic!("scripted panic for unit {index}"),
        };

        self.completed.lock().push(index);
        result
    }
}
