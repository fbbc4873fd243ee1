//! Receiver filters for bank slip results.
//!
//! A verified slip body is matched against the item's [`FilterSpec`]:
//!
//! 1. no `data` object in the body: matched, there is nothing to inspect;
//! 2. bank filter: `data.receiver.bank.id` must equal the configured code;
//! 3. name filter: `data.receiver.account.name.th` must contain the configured
//!    substring, ignoring case and surrounding whitespace.
//!
//! Both filters must pass when both are configured.

use crate::banks;
use crate::debug::{DebugEvent, ItemDebug};
use crate::item::AdditionalOptions;
use crate::outcome::OutputChannel;
use serde_json::Value;

/// Receiver filters for one bank slip item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// 3-digit receiver bank code to require.
    pub receiver_bank_code: Option<String>,
    /// Substring the receiver name must contain.
    pub receiver_name_substring: Option<String>,
    /// Emit debug events for this item.
    pub debug_logging_enabled: bool,
}

impl FilterSpec {
    /// Build filters from the item's additional options.
    ///
    /// Bank abbreviations are resolved to their code; other bank values are
    /// kept as given.
    #[must_use]
    pub fn from_options(options: &AdditionalOptions) -> Self {
        Self {
            receiver_bank_code: options.bank_code().map(banks::resolve_code),
            receiver_name_substring: options.name().map(str::to_string),
            debug_logging_enabled: options.enable_debug_logging,
        }
    }

    /// Whether any filter is configured.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.receiver_bank_code.is_some() || self.receiver_name_substring.is_some()
    }

    /// Decide which output `body` belongs to.
    #[must_use]
    pub fn route(&self, body: &Value, debug: ItemDebug<'_>) -> OutputChannel {
        if self.matches(body, debug) {
            OutputChannel::Matched
        } else {
            OutputChannel::NotMatched
        }
    }

    /// Check `body` against the configured filters.
    #[must_use]
    pub fn matches(&self, body: &Value, debug: ItemDebug<'_>) -> bool {
        let Some(data) = body.get("data").filter(|data| is_truthy(data)) else {
            debug.emit(|| DebugEvent::NoResponseData);
            return true;
        };

        let receiver = data.get("receiver");
        let bank_id = receiver
            .and_then(|r| r.pointer("/bank/id"))
            .and_then(scalar_text);
        let name = receiver
            .and_then(|r| r.pointer("/account/name/th"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty());

        debug.emit(|| DebugEvent::FilterCriteria {
            receiver_bank_code: self.receiver_bank_code.clone(),
            receiver_name: self.receiver_name_substring.clone(),
        });
        debug.emit(|| DebugEvent::ReceiverFields {
            bank_id: bank_id.clone(),
            name: name.map(str::to_string),
        });

        if let Some(expected) = &self.receiver_bank_code {
            let Some(actual) = bank_id else {
                debug.emit(|| DebugEvent::BankCodeMissing);
                return false;
            };
            let matched = actual == *expected;
            debug.emit(|| DebugEvent::BankCodeCompared {
                expected: expected.clone(),
                actual: actual.clone(),
                matched,
            });
            if !matched {
                return false;
            }
        }

        if let Some(expected) = &self.receiver_name_substring {
            let Some(actual) = name else {
                debug.emit(|| DebugEvent::ReceiverNameMissing);
                return false;
            };
            let expected = fold(expected);
            let actual = fold(actual);
            let matched = actual.contains(&expected);
            debug.emit(|| DebugEvent::ReceiverNameCompared {
                expected,
                actual,
                matched,
            });
            if !matched {
                return false;
            }
        }

        true
    }
}

fn fold(value: &str) -> String {
    value.to_lowercase().trim().to_string()
}

/// Empty strings, zero, `false` and `null` count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a scalar JSON value, if present.
fn scalar_text(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
