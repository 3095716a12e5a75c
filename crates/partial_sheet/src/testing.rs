//! Recording collaborators for headless runs and tests

use crate::collaborators::{ScrollableList, SheetLayout};

/// Layout that remembers every offset it was asked to apply
#[derive(Debug, Clone, Default)]
pub struct RecordingLayout {
    pub applied: Vec<f32>,
}

impl RecordingLayout {
    /// Most recently applied offset
    pub fn current(&self) -> Option<f32> {
        self.applied.last().copied()
    }
}

impl SheetLayout for RecordingLayout {
    fn apply_offset_constraint(&mut self, offset: f32) {
        self.applied.push(offset);
    }
}

/// A command the arbiter issued to the list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListCommand {
    ContentOffset(f32),
    ScrollEnabled(bool),
    IndicatorVisible(bool),
}

/// List that tracks its current flags plus the command log
#[derive(Debug, Clone)]
pub struct RecordingList {
    pub content_offset: f32,
    pub scroll_enabled: bool,
    pub indicator_visible: bool,
    pub commands: Vec<ListCommand>,
}

impl Default for RecordingList {
    fn default() -> Self {
        Self {
            content_offset: 0.0,
            scroll_enabled: true,
            indicator_visible: true,
            commands: Vec::new(),
        }
    }
}

impl ScrollableList for RecordingList {
    fn set_content_offset(&mut self, offset_y: f32) {
        self.content_offset = offset_y;
        self.commands.push(ListCommand::ContentOffset(offset_y));
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
        self.commands.push(ListCommand::ScrollEnabled(enabled));
    }

    fn set_indicator_visible(&mut self, visible: bool) {
        self.indicator_visible = visible;
        self.commands.push(ListCommand::IndicatorVisible(visible));
    }
}
