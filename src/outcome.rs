//! Normalized verification outcomes and output routing types.

use crate::error::{Error, Result};
use crate::transport::TransportResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// `message` value the API uses to flag an already verified slip.
pub const DUPLICATE_SLIP_MESSAGE: &str = "duplicate_slip";

/// Result of one verification call after duplicate reclassification.
#[derive(Debug)]
pub enum VerificationOutcome {
    /// The API verified the slip.
    Success(Value),
    /// The API reported the slip as already verified; the body still carries
    /// the slip data.
    DuplicateSlip(Value),
    /// Anything else.
    Failure(Error),
}

impl VerificationOutcome {
    /// Classify a transport result.
    ///
    /// A `400` whose body `message` is `duplicate_slip` becomes
    /// [`VerificationOutcome::DuplicateSlip`]; every other non-2xx status is a
    /// [`Error::Transport`] failure.
    #[must_use]
    pub fn from_response(result: Result<TransportResponse>) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(e) => return Self::Failure(e),
        };

        if response.is_success() {
            return Self::Success(response.body);
        }

        if is_duplicate_slip(&response) {
            return Self::DuplicateSlip(response.body);
        }

        let message = response
            .body
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| response.reason().to_string(), str::to_string);

        Self::Failure(Error::Transport {
            status: response.status,
            message,
        })
    }

    /// Whether this is a duplicate slip result.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateSlip(_))
    }

    /// Body to route, or the failure to propagate.
    ///
    /// # Errors
    ///
    /// Returns the failure carried by [`VerificationOutcome::Failure`].
    pub fn into_body(self) -> Result<Value> {
        match self {
            Self::Success(body) | Self::DuplicateSlip(body) => Ok(body),
            Self::Failure(e) => Err(e),
        }
    }
}

fn is_duplicate_slip(response: &TransportResponse) -> bool {
    response.status == 400
        && response.body.get("message").and_then(Value::as_str) == Some(DUPLICATE_SLIP_MESSAGE)
}

/// The two outputs of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputChannel {
    /// Output 0: passed all filters, no filters configured, wallet results,
    /// and error records.
    Matched,
    /// Output 1: failed a configured filter.
    NotMatched,
}

impl OutputChannel {
    /// Output position as exposed to the host.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Matched => 0,
            Self::NotMatched => 1,
        }
    }
}

impl fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::NotMatched => write!(f, "not matched"),
        }
    }
}

/// One item's routed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedItem {
    /// Position of the item in the input.
    pub original_index: usize,
    /// Output the item was assigned to.
    pub output: OutputChannel,
    /// API body, or `{ "error": ... }` for a captured failure.
    pub json: Value,
}

/// Append-only accumulators for both outputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedOutputs {
    /// Output 0.
    pub matched: Vec<RoutedItem>,
    /// Output 1.
    pub not_matched: Vec<RoutedItem>,
}

impl RoutedOutputs {
    /// Append `item` to the output it names.
    pub fn push(&mut self, item: RoutedItem) {
        match item.output {
            OutputChannel::Matched => self.matched.push(item),
            OutputChannel::NotMatched => self.not_matched.push(item),
        }
    }

    /// Items in `channel`, in input order.
    #[must_use]
    pub fn channel(&self, channel: OutputChannel) -> &[RoutedItem] {
        match channel {
            OutputChannel::Matched => &self.matched,
            OutputChannel::NotMatched => &self.not_matched,
        }
    }

    /// Total number of routed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matched.len() + self.not_matched.len()
    }

    /// Whether nothing has been routed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Both outputs, indexed by [`OutputChannel::index`].
    #[must_use]
    pub fn into_channels(self) -> [Vec<RoutedItem>; 2] {
        [self.matched, self.not_matched]
    }
}
