//! Chat request use case: dispatch under a deadline, then aggregate.

use std::time::{Duration, Instant};

use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use super::aggregate::aggregate;
use super::dispatch::Dispatcher;
use crate::domain::{AggregatedResponse, ChatRequest};
use crate::error::GatewayError;

/// Handles one multi-part chat request end to end.
///
/// The response is either complete and ordered or a single gateway error;
/// partial result lists are never returned.
#[derive(Clone)]
pub struct ChatService {
    dispatcher: Dispatcher,
    request_timeout: Duration,
}

impl ChatService {
    #[must_use]
    pub fn new(dispatcher: Dispatcher, request_timeout: Duration) -> Self {
        Self {
            dispatcher,
            request_timeout,
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Process a request.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Timeout`] if the deadline passes before every
    /// unit finishes (in-flight units are aborted and their results
    /// discarded), or [`GatewayError::Internal`] if aggregation finds a
    /// broken index set.
    pub async fn handle(&self, request: ChatRequest) -> Result<AggregatedResponse, GatewayError> {
        let request_id = Uuid::new_v4();
        let units = request.unit_count();
        let span = info_span!("chat", %request_id, units);

        async move {
            let started = Instant::now();
            let ChatRequest { text, images } = request;

            let dispatch = self.dispatcher.dispatch(text, images);
            let Ok(results) = tokio::time::timeout(self.request_timeout, dispatch).await else {
                let after_ms = self.request_timeout.as_millis() as u64;
                error!(after_ms, "Request timed out; in-flight units cancelled");
                return Err(GatewayError::Timeout { after_ms });
            };

            let response = aggregate(results)?;
            info!(
                failed = response.failed_count(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Request complete"
            );
            Ok(response)
        }
        .instrument(span)
        .await
    }
}
