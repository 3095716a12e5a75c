//! Partial App
//!
//! Deterministic headless driver for Partial sheets. Scenarios script sheet
//! drags, list scrolls, resizes and frame time, assert on where the sheet
//! ends up, and produce a JSON report.
//!
//! # Example
//!
//! ```rust
//! use partial_app::{run_scenario, HeadlessRunConfig};
//! use partial_sheet::SheetConfig;
//!
//! let outcome = run_scenario(
//!     r#"{ "steps": [
//!         { "type": "drag_start", "y": 700 },
//!         { "type": "drag_move", "y": 420 },
//!         { "type": "drag_end", "velocity": 0.0 },
//!         { "type": "settle" },
//!         { "type": "assert_state", "state": "mid" }
//!     ] }"#,
//!     SheetConfig::with_mid(50.0),
//!     HeadlessRunConfig::default(),
//! )
//! .unwrap();
//!
//! assert!(!outcome.is_failed());
//! ```

pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;

pub use headless_assert::{AssertionResult, SheetSnapshot};
pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{run_scenario, HeadlessSheet, RunOutcome, ScenarioRunner};
pub use headless_runtime::{FrameFlow, HeadlessContext, HeadlessRunConfig, HeadlessRuntime};
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
