//! Machine-readable report of a headless run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::headless_assert::SheetSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Result of a scenario run, including where the sheet ended up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    /// Name of the failed assertion or step
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    #[serde(rename = "final")]
    pub final_snapshot: SheetSnapshot,
}

impl HeadlessReport {
    pub fn passed(final_snapshot: SheetSnapshot, elapsed_frames: u64, elapsed_ms: u64) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            elapsed_frames,
            elapsed_ms,
            final_snapshot,
        }
    }

    pub fn failed(
        assertion: &str,
        failed_step_index: usize,
        message: String,
        final_snapshot: SheetSnapshot,
        elapsed_frames: u64,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            elapsed_frames,
            elapsed_ms,
            final_snapshot,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    /// Write pretty JSON, creating parent directories as needed
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let payload = serde_json::to_string_pretty(self)?;
        std::fs::write(path, payload)
            .with_context(|| format!("failed to write report {}", path.display()))
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partial_core::PositionState;

    fn snapshot() -> SheetSnapshot {
        SheetSnapshot {
            offset: 680.0,
            state: PositionState::Bottom,
            list_content_offset: 0.0,
            settling: false,
        }
    }

    #[test]
    fn test_failed_report_json() {
        let report = HeadlessReport::failed(
            "assert_state",
            3,
            "expected state top, got bottom at offset 680".to_string(),
            snapshot(),
            42,
            672,
        );
        let mut out = Vec::new();
        report.write_to_writer(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["failed_step_index"], 3);
        assert_eq!(value["final"]["state"], "bottom");
        assert_eq!(value["elapsed_frames"], 42);
    }

    #[test]
    fn test_report_round_trips_through_file() {
        let dir = std::env::temp_dir().join(format!("partial-report-{}", std::process::id()));
        let path = dir.join("nested").join("report.json");

        let report = HeadlessReport::passed(snapshot(), 10, 160);
        report.write_to_path(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: HeadlessReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, report);
        assert!(parsed.is_passed());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
