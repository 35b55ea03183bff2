//! Loadgate - performance regression gate for load-test result snapshots
//!
//! Each load-test run leaves a JSON snapshot of aggregate metrics under
//! `<results_dir>/<client>/<test>/`. This library compares the newest
//! snapshot against a set of historical baselines, ranks the significant
//! improvements and degradations, renders a console summary plus a persisted
//! report, and returns a pass/fail verdict suitable for a CI exit code.

pub mod baseline;
pub mod catalog;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod gate;
pub mod pipeline;
pub mod report;
pub mod snapshot;
pub mod store;
