//! Scenario runner that drives a sheet through scripted gestures.

use anyhow::{Context, Result};
use partial_sheet::testing::{RecordingLayout, RecordingList};
use partial_sheet::{PartialSheet, SheetConfig, SpringAnimator};

use crate::headless_assert::{
    evaluate_assert_list_offset, evaluate_assert_offset, evaluate_assert_state, AssertionResult,
    SheetSnapshot,
};
use crate::headless_report::HeadlessReport;
use crate::headless_runtime::{FrameFlow, HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};

/// Sheet wired to recording collaborators and the spring animator
pub type HeadlessSheet = PartialSheet<RecordingLayout, RecordingList, SpringAnimator>;

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Parse scenario JSON and run it against a freshly laid out sheet.
pub fn run_scenario(
    input: &str,
    config: SheetConfig,
    runtime: HeadlessRunConfig,
) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    let mut runner = ScenarioRunner::new(config, runtime)?;
    Ok(runner.run(&scenario))
}

/// Executes scenario steps against one sheet, keeping logical time.
pub struct ScenarioRunner {
    sheet: HeadlessSheet,
    runtime: HeadlessRunConfig,
    elapsed_frames: u64,
    elapsed_ms: u64,
}

impl ScenarioRunner {
    pub fn new(config: SheetConfig, runtime: HeadlessRunConfig) -> Result<Self> {
        runtime.validate()?;
        let animator = SpringAnimator::new(config.spring);
        let sheet = PartialSheet::new(
            config,
            runtime.height,
            RecordingLayout::default(),
            RecordingList::default(),
            animator,
        )
        .context("failed to lay out sheet")?;

        Ok(Self {
            sheet,
            runtime,
            elapsed_frames: 0,
            elapsed_ms: 0,
        })
    }

    pub fn sheet(&self) -> &HeadlessSheet {
        &self.sheet
    }

    pub fn snapshot(&self) -> SheetSnapshot {
        SheetSnapshot {
            offset: self.sheet.offset(),
            state: self.sheet.position_state(),
            list_content_offset: self.sheet.list().content_offset,
            settling: self.sheet.is_settling(),
        }
    }

    /// Run every step, stopping at the first failure.
    pub fn run(&mut self, scenario: &HeadlessScenario) -> RunOutcome {
        for (step_index, step) in scenario.steps.iter().enumerate() {
            tracing::debug!(step_index, step = step.name(), "running step");

            let result = self.run_step(step).unwrap_or_else(|err| AssertionResult::Failed {
                code: "sheet_error".to_string(),
                message: format!("{err:#}"),
            });

            if let AssertionResult::Failed { code, message } = result {
                tracing::warn!(step_index, step = step.name(), %code, %message, "scenario failed");
                let report = HeadlessReport::failed(
                    step.name(),
                    step_index,
                    message,
                    self.snapshot(),
                    self.elapsed_frames,
                    self.elapsed_ms,
                );
                return RunOutcome::Failed { report };
            }
        }

        tracing::info!(
            steps = scenario.steps.len(),
            frames = self.elapsed_frames,
            "scenario passed"
        );
        RunOutcome::Passed {
            report: HeadlessReport::passed(self.snapshot(), self.elapsed_frames, self.elapsed_ms),
        }
    }

    fn run_step(&mut self, step: &ScenarioStep) -> Result<AssertionResult> {
        match *step {
            ScenarioStep::DragStart { y } => self.sheet.drag_started(y)?,
            ScenarioStep::DragMove { y } => self.sheet.drag_updated(y)?,
            ScenarioStep::DragEnd { velocity } => self.sheet.drag_ended(velocity)?,
            ScenarioStep::ListDragBegin => self.sheet.list_drag_began()?,
            ScenarioStep::ListScroll {
                content_offset,
                translation,
            } => {
                // The list reports where it has scrolled to
                self.sheet.list_mut().content_offset = content_offset;
                self.sheet.list_scrolled(content_offset, translation)?;
            }
            ScenarioStep::ListDragEnd { velocity } => self.sheet.list_drag_ended(velocity)?,
            ScenarioStep::Resize { height } => self.sheet.resize(height)?,
            ScenarioStep::Tick { frames } => {
                let tick_ms = self.runtime.tick_ms;
                self.step_frames(frames, false, |_| tick_ms)?;
            }
            ScenarioStep::Wait { ms } => {
                let tick_ms = self.runtime.tick_ms;
                let mut remaining_ms = ms;
                self.step_frames(wait_frames(ms, tick_ms), false, |_| {
                    let step_ms = remaining_ms.min(tick_ms);
                    remaining_ms -= step_ms;
                    step_ms
                })?;
            }
            ScenarioStep::Settle => {
                let budget = self.runtime.max_frames;
                let tick_ms = self.runtime.tick_ms;
                self.step_frames(budget, true, |_| tick_ms)?;
                if self.sheet.is_settling() {
                    return Ok(AssertionResult::Failed {
                        code: "settle_timeout".to_string(),
                        message: format!(
                            "sheet still settling after {budget} frames at offset {}",
                            self.sheet.offset()
                        ),
                    });
                }
            }
            ScenarioStep::AssertState { state } => {
                return Ok(evaluate_assert_state(state, &self.snapshot()));
            }
            ScenarioStep::AssertOffset { value, tolerance } => {
                return Ok(evaluate_assert_offset(value, tolerance, &self.snapshot()));
            }
            ScenarioStep::AssertListOffset { value } => {
                return Ok(evaluate_assert_list_offset(value, &self.snapshot()));
            }
        }
        Ok(AssertionResult::Passed)
    }

    /// Feed up to `frames` animation frames to the sheet. With `until_idle`
    /// the loop ends as soon as no settle is in flight.
    fn step_frames<D>(&mut self, frames: u32, until_idle: bool, mut frame_ms: D) -> Result<()>
    where
        D: FnMut(u32) -> u64,
    {
        if frames == 0 {
            return Ok(());
        }

        let mut cfg = self.runtime;
        cfg.max_frames = frames;

        let sheet = &mut self.sheet;
        let elapsed_frames = &mut self.elapsed_frames;
        let elapsed_ms = &mut self.elapsed_ms;

        HeadlessRuntime::run(cfg, |ctx| {
            if until_idle && !sheet.is_settling() {
                return Ok(FrameFlow::Stop);
            }
            let ms = frame_ms(ctx.frame_index);
            sheet.frame(ms as f32 / 1000.0)?;
            *elapsed_frames = elapsed_frames.saturating_add(1);
            *elapsed_ms = elapsed_ms.saturating_add(ms);
            Ok(FrameFlow::Continue)
        })?;

        Ok(())
    }
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.div_ceil(tick);
    frames.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use partial_core::PositionState;

    fn runner() -> ScenarioRunner {
        ScenarioRunner::new(SheetConfig::with_mid(50.0), HeadlessRunConfig::default()).unwrap()
    }

    #[test]
    fn test_wait_frames_rounds_up() {
        assert_eq!(wait_frames(0, 16), 0);
        assert_eq!(wait_frames(16, 16), 1);
        assert_eq!(wait_frames(17, 16), 2);
    }

    #[test]
    fn test_wait_advances_logical_time_exactly() {
        let mut runner = runner();
        let scenario = HeadlessScenario {
            steps: vec![ScenarioStep::Wait { ms: 40 }],
        };
        let outcome = runner.run(&scenario);
        assert_eq!(outcome.report().elapsed_frames, 3);
        assert_eq!(outcome.report().elapsed_ms, 40);
    }

    #[test]
    fn test_settle_stops_when_idle() {
        let mut runner = runner();
        let scenario = HeadlessScenario {
            steps: vec![
                ScenarioStep::Settle,
                ScenarioStep::AssertState {
                    state: PositionState::Bottom,
                },
            ],
        };
        let outcome = runner.run(&scenario);
        assert!(!outcome.is_failed());
        assert_eq!(outcome.report().elapsed_frames, 0);
    }

    #[test]
    fn test_settle_timeout_fails() {
        let runtime = HeadlessRunConfig {
            max_frames: 2,
            ..Default::default()
        };
        let mut runner = ScenarioRunner::new(SheetConfig::with_mid(50.0), runtime).unwrap();
        let scenario = HeadlessScenario {
            steps: vec![
                ScenarioStep::DragStart { y: 700.0 },
                ScenarioStep::DragMove { y: 500.0 },
                ScenarioStep::DragEnd { velocity: 0.0 },
                ScenarioStep::Settle,
            ],
        };
        let outcome = runner.run(&scenario);
        assert!(outcome.is_failed());
        assert_eq!(outcome.report().assertion.as_deref(), Some("settle"));
        assert_eq!(outcome.report().failed_step_index, Some(3));
        assert!(outcome.report().final_snapshot.settling);
    }

    #[test]
    fn test_sheet_error_becomes_failure() {
        let mut runner = runner();
        let scenario = HeadlessScenario {
            steps: vec![ScenarioStep::Resize { height: -10.0 }],
        };
        let outcome = runner.run(&scenario);
        assert!(outcome.is_failed());
        assert_eq!(outcome.report().assertion.as_deref(), Some("resize"));
        assert!(outcome
            .report()
            .message
            .as_deref()
            .is_some_and(|m| m.contains("container height")));
    }

    #[test]
    fn test_rejects_bad_runtime() {
        let runtime = HeadlessRunConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(ScenarioRunner::new(SheetConfig::default(), runtime).is_err());
    }
}
