use serde_json::Value;

use crate::tree::ExpansionState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewTab {
    #[default]
    Json,
    Table,
    Stats,
}

impl PreviewTab {
    pub const ALL: [PreviewTab; 3] = [PreviewTab::Json, PreviewTab::Table, PreviewTab::Stats];

    pub fn title(self) -> &'static str {
        match self {
            PreviewTab::Json => "JSON",
            PreviewTab::Table => "Table",
            PreviewTab::Stats => "Stats",
        }
    }

    pub fn index(self) -> usize {
        match self {
            PreviewTab::Json => 0,
            PreviewTab::Table => 1,
            PreviewTab::Stats => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// View state of the result preview: selected tab, tree expansion and the
/// line under the cursor.
#[derive(Debug, Clone, Default)]
pub struct PreviewState {
    pub tab: PreviewTab,
    pub expansion: ExpansionState,
    pub cursor: usize,
    pub scroll: usize,
}

impl PreviewState {
    /// Reset for a new result; the root starts expanded.
    pub fn reset_for(&mut self, data: &Value) {
        self.expansion.collapse_all();
        if matches!(data, Value::Array(_) | Value::Object(_)) {
            self.expansion.expand(crate::tree::ROOT_KEY);
        }
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn move_cursor(&mut self, delta: isize, line_count: usize) {
        if line_count == 0 {
            self.cursor = 0;
            return;
        }
        let max = line_count - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }
}
