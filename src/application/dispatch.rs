//! Analysis unit dispatcher.
//!
//! Decomposes a request into ordered units, persists image payloads, fans
//! the units out to the inference backend under a shared concurrency bound
//! and collects one result per unit into an index-addressed slot table.
//!
//! ## Failure isolation
//!
//! Each unit runs in its own task. Storage errors, backend errors and
//! panics are all converted into a failed [`AnalysisResult`] for that unit
//! alone; the other units are unaffected.
//!
//! ## Cancellation
//!
//! Unit tasks live in a [`JoinSet`]. Dropping the `dispatch` future (request
//! timeout or client disconnect) drops the set, which aborts every task
//! still in flight.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::domain::{AnalysisResult, AnalysisUnit, ImagePart, UnitKind, UnitPayload};
use crate::port::outbound::{AssetStore, InferenceBackend};

/// Build the ordered unit sequence for a request.
///
/// Non-empty text becomes unit 0; images follow in input order. Without
/// text, images start at index 0.
#[must_use]
pub fn decompose(text: Option<String>, images: Vec<ImagePart>) -> Vec<AnalysisUnit> {
    let text = text.filter(|t| !t.is_empty());
    let mut units = Vec::with_capacity(usize::from(text.is_some()) + images.len());

    if let Some(text) = text {
        units.push(AnalysisUnit::text(0, text));
    }
    for image in images {
        let index = units.len();
        units.push(AnalysisUnit::image(index, image.bytes, image.filename));
    }

    units
}

/// Fans analysis units out to the backend with bounded concurrency.
///
/// Cheap to share: the backend, store and permit pool are all behind `Arc`s
/// and the permit pool bounds backend calls across every request.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn InferenceBackend>,
    store: Arc<dyn AssetStore>,
    permits: Arc<Semaphore>,
    max_concurrency: usize,
}

impl Dispatcher {
    /// Create a dispatcher. A `max_concurrency` of 0 is raised to 1.
    #[must_use]
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        store: Arc<dyn AssetStore>,
        max_concurrency: usize,
    ) -> Self {
        let max_concurrency = max_concurrency.max(1);
        Self {
            backend,
            store,
            permits: Arc::new(Semaphore::new(max_concurrency)),
            max_concurrency,
        }
    }

    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Dispatch every unit of a request and wait for all of them.
    ///
    /// Returns exactly one result per unit, ordered by sequence index,
    /// regardless of completion order. Zero units yield an empty vector.
    pub async fn dispatch(
        &self,
        text: Option<String>,
        images: Vec<ImagePart>,
    ) -> Vec<AnalysisResult> {
        let units = decompose(text, images);
        if units.is_empty() {
            debug!("Nothing to dispatch");
            return Vec::new();
        }

        let kinds: Vec<UnitKind> = units.iter().map(AnalysisUnit::kind).collect();
        debug!(
            units = units.len(),
            backend = self.backend.name(),
            "Dispatching units"
        );

        let mut tasks = JoinSet::new();
        for unit in units {
            tasks.spawn(run_guarded(
                Arc::clone(&self.backend),
                Arc::clone(&self.store),
                Arc::clone(&self.permits),
                unit,
            ));
        }

        let mut slots: Vec<Option<AnalysisResult>> = vec![None; kinds.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => {
                    let index = result.sequence_index;
                    match slots.get_mut(index) {
                        Some(slot) if slot.is_none() => *slot = Some(result),
                        Some(_) => warn!(index, "Duplicate result for unit; keeping first"),
                        None => warn!(index, "Result index out of range; discarding"),
                    }
                }
                Err(e) => warn!(error = %e, "Unit task ended without a result"),
            }
        }

        slots
            .into_iter()
            .zip(kinds)
            .enumerate()
            .map(|(index, (slot, kind))| {
                slot.unwrap_or_else(|| {
                    AnalysisResult::failed(index, kind, "unit ended without producing a result")
                })
            })
            .collect()
    }
}

/// Run one unit, converting a panic into a failed result.
async fn run_guarded(
    backend: Arc<dyn InferenceBackend>,
    store: Arc<dyn AssetStore>,
    permits: Arc<Semaphore>,
    unit: AnalysisUnit,
) -> AnalysisResult {
    let (index, kind) = (unit.index(), unit.kind());
    let started = Instant::now();

    let outcome = AssertUnwindSafe(run_unit(backend, store, permits, unit))
        .catch_unwind()
        .await;

    let mut result = match outcome {
        Ok(result) => result,
        Err(panic) => {
            let detail = panic_message(panic.as_ref());
            error!(index, %kind, panic = %detail, "Unit panicked");
            AnalysisResult::failed(index, kind, format!("internal error: {detail}"))
        }
    };

    if result.sequence_index != index || result.kind != kind {
        warn!(
            index,
            reported = result.sequence_index,
            "Backend result did not echo its unit; correcting"
        );
        result.sequence_index = index;
        result.kind = kind;
    }

    info!(
        index,
        %kind,
        status = ?result.status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Unit finished"
    );
    result
}

async fn run_unit(
    backend: Arc<dyn InferenceBackend>,
    store: Arc<dyn AssetStore>,
    permits: Arc<Semaphore>,
    unit: AnalysisUnit,
) -> AnalysisResult {
    let (index, kind) = (unit.index(), unit.kind());

    // Images are persisted before they may reach the backend.
    let asset = match unit.payload() {
        UnitPayload::Image { bytes, filename } => {
            match store.store(bytes, filename.as_deref()).await {
                Ok(asset) => Some(asset),
                Err(e) => {
                    warn!(index, error = %e, "Failed to persist image");
                    return AnalysisResult::failed(index, kind, e.to_string());
                }
            }
        }
        UnitPayload::Text(_) => None,
    };

    let result = {
        let Ok(_permit) = permits.acquire().await else {
            return AnalysisResult::failed(index, kind, "dispatcher is shutting down");
        };
        backend.analyze(&unit).await
    };
    drop(unit);

    match asset {
        Some(asset) => result.with_asset_url(asset.public_url),
        None => result,
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
