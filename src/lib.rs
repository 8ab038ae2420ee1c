//! Presentation document store for a slide editor.
//!
//! The crate owns the editable state of one presentation: the ordered slide
//! list, the selected slide, presentation metadata, the slide and element
//! clipboards, and a linear undo/redo history of slide snapshots. A renderer
//! reads [`store::PresentationStore`] directly; persistence and export
//! collaborators receive plain JSON.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Orchestrator: slides, selection, clipboards, history, metadata |
//! | [`doc`] | Slide, element, animation and metadata types |
//! | [`layout`] | Layout descriptors and field migration between layouts |
//! | [`elements`] | Element insertion and editing on the selected slide |
//! | [`animations`] | Per-slide animation list and play order |
//! | [`history`] | Snapshot log with cursor-based undo/redo |
//! | [`header_footer`] | Header and footer text resolution |
//! | [`persistence`] | Saved-document format, sinks and the autosave task |
//! | [`command`] | Serialized edit commands and JSON Lines scripts |
//! | [`config`] | Environment-driven editor configuration |
//! | [`error`] | Error types |
//! | [`ids`] | Entity ids and the monotonic id generator |
//! | [`consts`] | Shared defaults (placeholder text, colors, offsets) |

pub mod animations;
pub mod command;
pub mod config;
pub mod consts;
pub mod doc;
pub mod elements;
pub mod error;
pub mod header_footer;
pub mod history;
pub mod ids;
pub mod layout;
pub mod persistence;
pub mod store;
