//! Per-item debug events.
//!
//! Items that set `enableDebugLogging` report what the verifier did with them
//! as structured [`DebugEvent`]s. Where the events end up is decided by the
//! [`DebugSink`] handed to the verifier.

use crate::outcome::OutputChannel;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Something worth reporting while processing an item.
#[derive(Debug, Clone, PartialEq)]
pub enum DebugEvent {
    /// Processing of an item started.
    ItemStarted {
        /// Number of items in the run.
        total: usize,
        /// Resource name.
        resource: String,
        /// Operation name.
        operation: String,
    },
    /// The outbound request was built.
    RequestPrepared {
        /// HTTP method.
        method: &'static str,
        /// Full request URL including query.
        url: String,
        /// Duplicate check flag sent to the API.
        check_duplicate: bool,
    },
    /// An image attachment was loaded for upload.
    BinaryLoaded {
        /// Binary property name.
        property: String,
        /// Attachment size in bytes.
        size: usize,
    },
    /// The API answered.
    ResponseReceived {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: Value,
    },
    /// A 400 `duplicate_slip` answer is being treated as a result.
    DuplicateSlip,
    /// The request failed and the failure will propagate.
    RequestFailed {
        /// Failure message.
        message: String,
    },
    /// Filter criteria in effect for the item.
    FilterCriteria {
        /// Configured receiver bank code.
        receiver_bank_code: Option<String>,
        /// Configured receiver name substring.
        receiver_name: Option<String>,
    },
    /// The response had no `data` object, so nothing could be filtered.
    NoResponseData,
    /// Receiver fields found in the response.
    ReceiverFields {
        /// `data.receiver.bank.id`.
        bank_id: Option<String>,
        /// `data.receiver.account.name.th`.
        name: Option<String>,
    },
    /// The response has no receiver bank id to compare.
    BankCodeMissing,
    /// Receiver bank comparison.
    BankCodeCompared {
        /// Configured code.
        expected: String,
        /// Code in the response.
        actual: String,
        /// Whether they are equal.
        matched: bool,
    },
    /// The response has no receiver name to compare.
    ReceiverNameMissing,
    /// Receiver name comparison, both sides case-folded and trimmed.
    ReceiverNameCompared {
        /// Configured substring.
        expected: String,
        /// Name in the response.
        actual: String,
        /// Whether `actual` contains `expected`.
        matched: bool,
    },
    /// The item was assigned to an output.
    Routed {
        /// Output the item landed in.
        channel: OutputChannel,
    },
    /// All items have been processed.
    RunCompleted {
        /// Items in the matched output.
        matched: usize,
        /// Items in the not-matched output.
        not_matched: usize,
        /// Whether any item asked for filtering.
        filtering_requested: bool,
    },
}

/// Receiver of debug events.
pub trait DebugSink: Send + Sync {
    /// Record `event` for the item at `item_index` (`None` for run-level events).
    fn record(&self, item_index: Option<usize>, event: &DebugEvent);
}

/// Sink that writes events as `tracing` debug records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DebugSink for TracingSink {
    fn record(&self, item_index: Option<usize>, event: &DebugEvent) {
        match item_index {
            Some(index) => tracing::debug!(target: "easyslip::debug", item = index, "{event:?}"),
            None => tracing::debug!(target: "easyslip::debug", "{event:?}"),
        }
    }
}

/// Sink that keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<(Option<usize>, DebugEvent)>>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<(Option<usize>, DebugEvent)> {
        self.events.lock().clone()
    }

    /// Events recorded for one item.
    #[must_use]
    pub fn events_for(&self, item_index: usize) -> Vec<DebugEvent> {
        self.events
            .lock()
            .iter()
            .filter(|(index, _)| *index == Some(item_index))
            .map(|(_, event)| event.clone())
            .collect()
    }
}

impl DebugSink for RecordingSink {
    fn record(&self, item_index: Option<usize>, event: &DebugEvent) {
        self.events.lock().push((item_index, event.clone()));
    }
}

/// Debug handle for one item, silent unless the item enabled debug logging.
#[derive(Clone, Copy)]
pub struct ItemDebug<'a> {
    sink: &'a dyn DebugSink,
    item_index: usize,
    enabled: bool,
}

impl<'a> ItemDebug<'a> {
    /// Create a handle for `item_index`.
    #[must_use]
    pub fn new(sink: &'a dyn DebugSink, item_index: usize, enabled: bool) -> Self {
        Self {
            sink,
            item_index,
            enabled,
        }
    }

    /// Handle that drops everything.
    #[must_use]
    pub fn disabled(sink: &'a dyn DebugSink) -> Self {
        Self::new(sink, 0, false)
    }

    /// Whether events are forwarded.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Forward the event built by `event` if enabled.
    pub fn emit(&self, event: impl FnOnce() -> DebugEvent) {
        if self.enabled {
            self.sink.record(Some(self.item_index), &event());
        }
    }
}
