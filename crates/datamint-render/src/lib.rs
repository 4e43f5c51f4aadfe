//! Pure presentation building blocks for generation results.
//!
//! Nothing in this crate holds state beyond what the caller passes in:
//! the tree view takes an [`ExpansionState`], the table and statistics
//! views are derived from a [`datamint_core::GenerationResult`] on demand.

pub mod error;
pub mod export;
pub mod preview;
pub mod stats;
pub mod table;
pub mod tree;

pub use error::{RenderError, Result};
pub use export::{export_csv, export_json};
pub use preview::{PreviewState, PreviewTab};
pub use stats::{
    DEFAULT_COHERENCE_SCORE, NOT_AVAILABLE, Performance, ResultStats, ScenarioShare, StatsSection,
};
pub use table::{Cell, EMPTY_TABLE_MESSAGE, MAX_TABLE_ROWS, TableView};
pub use tree::{ExpansionState, NodeKind, ROOT_KEY, Toggle, TreeLine, render_tree};
