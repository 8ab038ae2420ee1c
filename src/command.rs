//! Edit commands: serialized store operations.
//!
//! DESIGN
//! ======
//! Each [`EditCommand`] names one store operation and carries its arguments.
//! Commands serialize as JSON objects tagged by `op`, one per line in a
//! script, so an edit session can be replayed against any store.
//!
//! Applying a command never fails. Guard violations and lookup misses come
//! back as [`CommandOutcome::NoOp`], matching the store's own semantics;
//! only parsing produces errors.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use serde::{Deserialize, Serialize};

use crate::doc::{
    AnimationEffect, AnimationTarget, AnimationTiming, Direction, ElementKind, ElementPatch, HeaderFooter,
    LayoutKind, SlidePatch,
};
use crate::elements::{Bounds, ImageData, InsertPreset};
use crate::error::DeckError;
use crate::ids::EntityId;
use crate::store::PresentationStore;

fn default_layout() -> LayoutKind {
    LayoutKind::Blank
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EditCommand {
    // ── Slides ──────────────────────────────────────────────────
    AddSlide {
        #[serde(default = "default_layout")]
        layout: LayoutKind,
    },
    DeleteSlide { index: usize },
    DuplicateSlide { index: usize },
    ResetSlide { index: usize },
    UpdateSlide { index: usize, patch: SlidePatch },
    ApplyLayout { index: usize, layout: LayoutKind },
    ReorderSlides { from: usize, to: usize },
    SelectSlide { index: usize },
    CopySlide,
    PasteSlide,

    // ── History ─────────────────────────────────────────────────
    Undo,
    Redo,

    // ── Elements ────────────────────────────────────────────────
    AddTextbox,
    AddImage { src: String, name: String },
    AddImageUrl { url: String },
    AddVideo { url: String },
    AddAudio { url: String },
    AddChart {
        chart_type: String,
        #[serde(default)]
        title: String,
    },
    AddTable { rows: u16, cols: u16 },
    InsertPreset { preset: InsertPreset },
    AddElement { kind: ElementKind, bounds: Bounds },
    UpdateElement { id: EntityId, patch: ElementPatch },
    MoveElement { id: EntityId, x: f64, y: f64 },
    DeleteElement { id: EntityId },
    CopyElement { id: EntityId },
    CutElement { id: EntityId },
    PasteElement,
    DuplicateElement { id: EntityId },

    // ── Animations ──────────────────────────────────────────────
    AddAnimation { target: AnimationTarget, effect: AnimationEffect },
    UpdateAnimation {
        id: EntityId,
        #[serde(default)]
        duration: Option<u32>,
        #[serde(default)]
        delay: Option<u32>,
    },
    MoveAnimation { id: EntityId, direction: Direction },
    RemoveAnimation { id: EntityId },

    // ── Presentation ────────────────────────────────────────────
    NewPresentation,
    SetTitle { title: String },
    SetAuthor { author: String },
    SetThemePreset { preset: String },
    ToggleSlideSize,
    SetHeader { header: HeaderFooter },
    SetFooter { footer: HeaderFooter },
    Touch,
}

/// What applying a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "id", rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied,
    Created(EntityId),
    NoOp,
}

impl CommandOutcome {
    fn from_applied(applied: bool) -> Self {
        if applied { Self::Applied } else { Self::NoOp }
    }

    fn from_created(created: Option<EntityId>) -> Self {
        created.map_or(Self::NoOp, Self::Created)
    }
}

impl EditCommand {
    /// Parse one JSON command.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Command`] if the text is not a known command.
    pub fn parse(raw: &str) -> Result<Self, DeckError> {
        serde_json::from_str(raw).map_err(|e| DeckError::Command(e.to_string()))
    }

    /// Parse a JSON Lines script. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Command`] naming the first bad line (1-based).
    pub fn parse_script(script: &str) -> Result<Vec<Self>, DeckError> {
        script
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line).map_err(|e| DeckError::Command(format!("line {}: {e}", n + 1)))
            })
            .collect()
    }

    /// Run this command against `store`.
    pub fn apply(self, store: &mut PresentationStore) -> CommandOutcome {
        match self {
            Self::AddSlide { layout } => CommandOutcome::Created(store.add_slide(layout)),
            Self::DeleteSlide { index } => CommandOutcome::from_applied(store.delete_slide(index)),
            Self::DuplicateSlide { index } => CommandOutcome::from_created(store.duplicate_slide(index)),
            Self::ResetSlide { index } => CommandOutcome::from_applied(store.reset_slide(index)),
            Self::UpdateSlide { index, patch } => CommandOutcome::from_applied(store.update_slide(index, &patch)),
            Self::ApplyLayout { index, layout } => CommandOutcome::from_applied(store.apply_layout(index, layout)),
            Self::ReorderSlides { from, to } => CommandOutcome::from_applied(store.reorder_slides(from, to)),
            Self::SelectSlide { index } => CommandOutcome::from_applied(store.select_slide(index)),
            Self::CopySlide => CommandOutcome::from_applied(store.copy()),
            Self::PasteSlide => CommandOutcome::from_created(store.paste()),

            Self::Undo => CommandOutcome::from_applied(store.undo()),
            Self::Redo => CommandOutcome::from_applied(store.redo()),

            Self::AddTextbox => CommandOutcome::from_created(store.add_textbox()),
            Self::AddImage { src, name } => CommandOutcome::from_created(store.add_image(ImageData { src, name })),
            Self::AddImageUrl { url } => CommandOutcome::from_created(store.add_image_url(url)),
            Self::AddVideo { url } => CommandOutcome::from_created(store.add_video(url)),
            Self::AddAudio { url } => CommandOutcome::from_created(store.add_audio(url)),
            Self::AddChart { chart_type, title } => CommandOutcome::from_created(store.add_chart(chart_type, title)),
            Self::AddTable { rows, cols } => CommandOutcome::from_created(store.add_table(rows, cols)),
            Self::InsertPreset { preset } => CommandOutcome::from_created(store.insert_preset(preset)),
            Self::AddElement { kind, bounds } => CommandOutcome::from_created(store.add_element(kind, bounds)),
            Self::UpdateElement { id, patch } => CommandOutcome::from_applied(store.update_element(id, &patch)),
            Self::MoveElement { id, x, y } => CommandOutcome::from_applied(store.move_element(id, x, y)),
            Self::DeleteElement { id } => CommandOutcome::from_applied(store.delete_element(id)),
            Self::CopyElement { id } => CommandOutcome::from_applied(store.copy_element(id)),
            Self::CutElement { id } => CommandOutcome::from_applied(store.cut_element(id)),
            Self::PasteElement => CommandOutcome::from_created(store.paste_element()),
            Self::DuplicateElement { id } => CommandOutcome::from_created(store.duplicate_element(id)),

            Self::AddAnimation { target, effect } => CommandOutcome::from_created(store.add_animation(target, effect)),
            Self::UpdateAnimation { id, duration, delay } => {
                CommandOutcome::from_applied(store.update_animation(id, AnimationTiming { duration, delay }))
            }
            Self::MoveAnimation { id, direction } => CommandOutcome::from_applied(store.move_animation(id, direction)),
            Self::RemoveAnimation { id } => CommandOutcome::from_applied(store.remove_animation(id)),

            Self::NewPresentation => {
                store.new_presentation();
                CommandOutcome::Applied
            }
            Self::SetTitle { title } => {
                store.presentation_meta_mut().title = title;
                CommandOutcome::Applied
            }
            Self::SetAuthor { author } => {
                store.presentation_meta_mut().author = author;
                CommandOutcome::Applied
            }
            Self::SetThemePreset { preset } => {
                store.presentation_meta_mut().theme_preset = preset;
                CommandOutcome::Applied
            }
            Self::ToggleSlideSize => {
                store.presentation_meta_mut().toggle_slide_size();
                CommandOutcome::Applied
            }
            Self::SetHeader { header } => {
                store.presentation_meta_mut().header = header;
                CommandOutcome::Applied
            }
            Self::SetFooter { footer } => {
                store.presentation_meta_mut().footer = footer;
                CommandOutcome::Applied
            }
            Self::Touch => {
                store.presentation_meta_mut().touch();
                CommandOutcome::Applied
            }
        }
    }
}
