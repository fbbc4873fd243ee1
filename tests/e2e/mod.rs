//! End-to-end tests for easyslip-node.
//!
//! Each test runs the verifier over HTTP against an `httpmock` server that
//! stands in for the EasySlip API.
//!
//! ```bash
//! cargo test --test e2e
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod harness;
mod routing_tests;
mod verify_tests;

pub use harness::{duplicate_body, slip_body, unreachable_verifier, wallet_body, TestApi, BEARER};
