//! Shared constants for the kunkunshi sheet renderer (all in SVG user units).

// ── Page & margins ──────────────────────────────────────────────────
pub(super) const PAGE_MARGIN: f64 = 30.0;
pub(super) const HEADER_HEIGHT: f64 = 50.0; // space for the title line

// ── Grid ────────────────────────────────────────────────────────────
pub(super) const CELL_WIDTH: f64 = 56.0;
pub(super) const CELL_HEIGHT: f64 = 40.0;
pub(super) const COLUMN_GAP: f64 = 14.0; // horizontal space between columns
pub(super) const DEFAULT_CELLS_PER_COLUMN: usize = 12;

// ── Text ────────────────────────────────────────────────────────────
pub(super) const GLYPH_SIZE: f64 = 22.0;
pub(super) const NOTE_NAME_SIZE: f64 = 9.0;
pub(super) const STRING_MARK_SIZE: f64 = 9.0;
pub(super) const TITLE_SIZE: f64 = 18.0;

// ── Lines ───────────────────────────────────────────────────────────
pub(super) const COLUMN_BORDER_WIDTH: f64 = 1.2;
pub(super) const CELL_RULE_WIDTH: f64 = 0.5;

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const GLYPH_COLOR: &str = "#1a1a1a";
pub(super) const NOTE_NAME_COLOR: &str = "#4a4a9a";
pub(super) const STRING_MARK_COLOR: &str = "#777777";
pub(super) const BORDER_COLOR: &str = "#333333";
pub(super) const RULE_COLOR: &str = "#cccccc";
pub(super) const HEADER_COLOR: &str = "#1a1a1a";
pub(super) const LOW_CONFIDENCE_FILL: &str = "#fbe9e7";
