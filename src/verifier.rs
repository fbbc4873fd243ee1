//! Slip verifier: the per-item verify-and-route loop.
//!
//! ```text
//! item ──► resolve ──► build request ──► transport
//!                                           │
//!                         ┌─────────────────┼──────────────────┐
//!                        2xx        400 duplicate_slip       other
//!                         │                 │                  │
//!                         └──────┬──────────┘                  ▼
//!                                ▼                      fail item / run
//!                     wallet? ──yes──► Matched
//!                                no
//!                                ▼
//!                         receiver filters ──► Matched | NotMatched
//! ```

use crate::config::{ApiConfig, RunOptions};
use crate::credentials::CredentialProvider;
use crate::debug::{DebugEvent, DebugSink, ItemDebug, TracingSink};
use crate::error::Result;
use crate::item::InputItem;
use crate::outcome::{OutputChannel, RoutedItem, RoutedOutputs, VerificationOutcome};
use crate::request::VerificationRequestSpec;
use crate::transport::{HttpTransport, Transport};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outputs of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Routed items per output.
    pub outputs: RoutedOutputs,
    /// Whether any bank slip item configured a receiver filter.
    pub filtering_requested: bool,
}

/// Whether any item in `items` asks for receiver filtering.
///
/// Only used for the run summary; routing does not depend on it.
#[must_use]
pub fn filtering_requested(items: &[InputItem]) -> bool {
    items
        .iter()
        .any(|item| item.parameters.requests_filtering())
}

/// Verifies slips against the EasySlip API and routes the results.
pub struct SlipVerifier {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialProvider>,
    debug_sink: Arc<dyn DebugSink>,
}

impl SlipVerifier {
    /// Create a verifier over an arbitrary transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            transport,
            credentials,
            debug_sink: Arc::new(TracingSink),
        }
    }

    /// Create a verifier talking HTTP to the configured API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn http(config: &ApiConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        info!("Slip verifier using {}", transport.base_url());
        Ok(Self::new(Arc::new(transport), credentials))
    }

    /// Send per-item debug events to `sink`.
    #[must_use]
    pub fn with_debug_sink(mut self, sink: Arc<dyn DebugSink>) -> Self {
        self.debug_sink = sink;
        self
    }

    /// Verify and route every item, in order.
    ///
    /// # Errors
    ///
    /// Without `continue_on_fail`, the first per-item failure aborts the run
    /// and is returned as [`crate::Error::ItemFailed`] carrying the item index.
    /// Items after it are not sent.
    pub async fn run(&self, items: &[InputItem], options: RunOptions) -> Result<RunReport> {
        let filtering_requested = filtering_requested(items);
        info!(
            "Verifying {} item(s) (filtering_requested={}, continue_on_fail={})",
            items.len(),
            filtering_requested,
            options.continue_on_fail
        );

        let mut outputs = RoutedOutputs::default();
        for (index, item) in items.iter().enumerate() {
            match self.verify_item(index, items.len(), item).await {
                Ok(routed) => outputs.push(routed),
                Err(e) if options.continue_on_fail => {
                    warn!("Item {} failed, recording error: {}", index, e);
                    outputs.push(RoutedItem {
                        original_index: index,
                        output: OutputChannel::Matched,
                        json: json!({ "error": e.to_string() }),
                    });
                }
                Err(e) => {
                    warn!("Item {} failed, aborting run: {}", index, e);
                    return Err(e.at_item(index));
                }
            }
        }

        if filtering_requested {
            info!(
                "Run complete - matched: {}, not matched: {}",
                outputs.matched.len(),
                outputs.not_matched.len()
            );
        } else {
            info!(
                "Run complete - total items: {}, no filters applied",
                outputs.matched.len()
            );
        }

        if items.iter().any(|item| item.parameters.debug_logging()) {
            self.debug_sink.record(
                None,
                &DebugEvent::RunCompleted {
                    matched: outputs.matched.len(),
                    not_matched: outputs.not_matched.len(),
                    filtering_requested,
                },
            );
        }

        Ok(RunReport {
            outputs,
            filtering_requested,
        })
    }

    /// Verify one item and decide its output.
    ///
    /// # Errors
    ///
    /// Returns the item's failure: missing input, credentials, network, or a
    /// non-success API answer other than a duplicate slip.
    pub async fn verify_item(
        &self,
        index: usize,
        total: usize,
        item: &InputItem,
    ) -> Result<RoutedItem> {
        let params = &item.parameters;
        let debug = ItemDebug::new(self.debug_sink.as_ref(), index, params.debug_logging());
        debug.emit(|| DebugEvent::ItemStarted {
            total,
            resource: params.resource.to_string(),
            operation: params.operation().to_string(),
        });

        let spec = VerificationRequestSpec::resolve(item)?;
        if let Some((property, file)) = spec.attachment() {
            debug.emit(|| DebugEvent::BinaryLoaded {
                property: property.to_string(),
                size: file.data.len(),
            });
        }

        let request = spec.to_request();
        debug.emit(|| DebugEvent::RequestPrepared {
            method: request.method.as_str(),
            url: self
                .transport
                .url_for(&request)
                .map_or_else(|e| e.to_string(), |url| url.to_string()),
            check_duplicate: spec.check_duplicate(),
        });

        let token = self.credentials.access_token()?;
        let result = self.transport.send(&request, &token).await;
        if let Ok(response) = &result {
            debug.emit(|| DebugEvent::ResponseReceived {
                status: response.status,
                body: response.body.clone(),
            });
        }

        let outcome = VerificationOutcome::from_response(result);
        match &outcome {
            VerificationOutcome::DuplicateSlip(_) => {
                debug!("Item {} is a duplicate slip, treating as verified", index);
                debug.emit(|| DebugEvent::DuplicateSlip);
            }
            VerificationOutcome::Failure(e) => {
                debug.emit(|| DebugEvent::RequestFailed {
                    message: e.to_string(),
                });
            }
            VerificationOutcome::Success(_) => {}
        }
        let body = outcome.into_body()?;

        let output = spec
            .filter()
            .map_or(OutputChannel::Matched, |filter| filter.route(&body, debug));
        debug.emit(|| DebugEvent::Routed { channel: output });

        Ok(RoutedItem {
            original_index: index,
            output,
            json: body,
        })
    }
}
