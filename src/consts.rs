//! Shared defaults for the presentation document.

// ── Slides ──────────────────────────────────────────────────────

/// Placeholder body text for freshly created or reset slides.
pub const PLACEHOLDER_CONTENT: &str = "Click to add content";

/// Default slide background color.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Default slide text color.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Suffix appended to the title of a duplicated slide.
pub const DUPLICATE_TITLE_SUFFIX: &str = " Copy";

// ── Presentation ────────────────────────────────────────────────

/// Title given to a presentation that has not been named yet.
pub const DEFAULT_PRESENTATION_TITLE: &str = "Untitled";

/// Theme preset applied to new presentations.
pub const DEFAULT_THEME_PRESET: &str = "default";

// ── Elements ────────────────────────────────────────────────────

/// Offset in canvas pixels applied to pasted and duplicated elements.
pub const DEFAULT_PASTE_OFFSET_PX: f64 = 12.0;

// ── Animations ──────────────────────────────────────────────────

/// Duration of a newly added animation, in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u32 = 1000;

// ── Autosave ────────────────────────────────────────────────────

/// Seconds between autosave ticks.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// File the autosave task writes to when no path is configured.
pub const DEFAULT_AUTOSAVE_PATH: &str = "presentation.json";
