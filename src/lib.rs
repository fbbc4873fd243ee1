//! # easyslip-node
//!
//! Bank slip and TrueMoney wallet slip verification against the EasySlip API,
//! with results routed to two outputs.
//!
//! Each input item names a verification mode:
//!
//! | Resource | Operation | Request |
//! |---|---|---|
//! | `bankSlip` | `verifyByPayload` | `GET /verify?payload=..&checkDuplicate=..` |
//! | `bankSlip` | `verifyByBase64` | `POST /verify` JSON `{ image, checkDuplicate }` |
//! | `bankSlip` | `verifyByUrl` | `POST /verify` JSON `{ url, checkDuplicate }` |
//! | `bankSlip` | `verifyByImage` | `POST /verify` multipart `file`, `checkDuplicate` |
//! | `truemoneyWallet` | `verifyByImage` | `POST /verify/truewallet` multipart |
//!
//! An HTTP 400 answer whose `message` is `duplicate_slip` is a result, not an
//! error. Bank slip results are then checked against the item's optional
//! receiver bank / receiver name filters: passing (or unfiltered) results go to
//! the matched output, the rest to the not-matched output. Wallet results are
//! always matched.
//!
//! ```rust,ignore
//! use easyslip_node::{ApiConfig, InputItem, ItemParameters, RunOptions, SlipVerifier, StaticCredentials};
//! use std::sync::Arc;
//!
//! let verifier = SlipVerifier::http(&ApiConfig::default(), Arc::new(StaticCredentials::new(token)))?;
//! let items = vec![InputItem::new(ItemParameters::payload(qr).with_receiver_bank("KBANK"))];
//! let report = verifier.run(&items, RunOptions::default()).await?;
//! println!("{} matched", report.outputs.matched.len());
//! ```

pub mod banks;
pub mod config;
pub mod credentials;
pub mod debug;
pub mod error;
pub mod filter;
pub mod item;
pub mod outcome;
pub mod request;
pub mod transport;
pub mod verifier;

pub use config::{ApiConfig, AppConfig, RunOptions};
pub use credentials::{AccessToken, CredentialProvider, StaticCredentials};
pub use debug::{DebugEvent, DebugSink, RecordingSink, TracingSink};
pub use error::{Error, Result};
pub use filter::FilterSpec;
pub use item::{AdditionalOptions, BinaryData, InputItem, ItemParameters, Operation, Resource};
pub use outcome::{OutputChannel, RoutedItem, RoutedOutputs, VerificationOutcome};
pub use request::{OutboundRequest, VerificationRequestSpec};
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use verifier::{RunReport, SlipVerifier};
