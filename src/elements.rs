//! Element operations on the selected slide.
//!
//! Every edit here is its own history entry; nothing is batched. Lookups by
//! id that miss are no-ops. New elements are appended, so they draw on top.

#[cfg(test)]
#[path = "elements_test.rs"]
mod elements_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::doc::{Element, ElementKind, ElementPatch, ShapeType};
use crate::ids::EntityId;
use crate::store::PresentationStore;

// ── Placement defaults ─────────────────────────────────────────

const TEXTBOX_BOUNDS: Bounds = Bounds::new(100.0, 100.0, 200.0, 50.0);
const UPLOADED_IMAGE_BOUNDS: Bounds = Bounds::new(100.0, 200.0, 200.0, 150.0);
const URL_IMAGE_BOUNDS: Bounds = Bounds::new(120.0, 140.0, 300.0, 200.0);
const VIDEO_BOUNDS: Bounds = Bounds::new(200.0, 240.0, 360.0, 220.0);
const AUDIO_BOUNDS: Bounds = Bounds::new(220.0, 280.0, 280.0, 40.0);
const CHART_BOUNDS: Bounds = Bounds::new(150.0, 150.0, 400.0, 300.0);
const TABLE_ORIGIN: (f64, f64) = (150.0, 150.0);
const TABLE_CELL_WIDTH: f64 = 100.0;
const TABLE_ROW_HEIGHT: f64 = 40.0;

/// Position and size of an element in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// An uploaded image: its encoded data URL and the original file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub src: String,
    pub name: String,
}

/// Ready-made elements offered by the insert menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertPreset {
    TextBox,
    Equation,
    WordArt,
    Icon,
    Rectangle,
}

impl InsertPreset {
    /// Payload and placement for this preset.
    #[must_use]
    pub fn build(self) -> (ElementKind, Bounds) {
        match self {
            Self::TextBox => (text("New text", 18.0, "Arial", "#000"), Bounds::new(100.0, 100.0, 240.0, 60.0)),
            Self::Equation => {
                (text("<i>E = mc^2</i>", 20.0, "Times New Roman", "#111"), Bounds::new(180.0, 220.0, 180.0, 50.0))
            }
            Self::WordArt => (
                text(
                    r#"<span style="font-weight:800;text-shadow:0 2px 6px rgba(0,0,0,0.3)">WordArt</span>"#,
                    28.0,
                    "Georgia",
                    "#111",
                ),
                Bounds::new(160.0, 180.0, 280.0, 80.0),
            ),
            Self::Icon => {
                (ElementKind::Icon { content: "⭐".to_owned(), font_size: 32.0 }, Bounds::new(260.0, 200.0, 48.0, 48.0))
            }
            Self::Rectangle => (
                ElementKind::Shape {
                    shape_type: ShapeType::Rectangle,
                    fill: "#F0A500".to_owned(),
                    stroke: "#8a6d00".to_owned(),
                    stroke_width: 2.0,
                },
                Bounds::new(200.0, 220.0, 160.0, 100.0),
            ),
        }
    }
}

fn text(content: &str, font_size: f64, font_family: &str, color: &str) -> ElementKind {
    ElementKind::Textbox {
        content: content.to_owned(),
        font_size,
        font_family: font_family.to_owned(),
        color: color.to_owned(),
        background_color: "transparent".to_owned(),
    }
}

impl PresentationStore {
    // --- Insertion ---

    /// Append an element with a fresh id to the selected slide.
    pub fn add_element(&mut self, kind: ElementKind, bounds: Bounds) -> Option<EntityId> {
        let id = self.ids.next_id();
        let element = Element { id, kind, x: bounds.x, y: bounds.y, width: bounds.width, height: bounds.height };
        self.edit_current_slide(|slide| {
            slide.elements.push(element);
            Some(id)
        })
    }

    /// Default text box.
    pub fn add_textbox(&mut self) -> Option<EntityId> {
        self.add_element(text("New text box", 16.0, "Arial", "#000000"), TEXTBOX_BOUNDS)
    }

    /// Uploaded image; the file name becomes the alt text.
    pub fn add_image(&mut self, image: ImageData) -> Option<EntityId> {
        self.add_element(ElementKind::Image { src: image.src, alt: image.name }, UPLOADED_IMAGE_BOUNDS)
    }

    /// Image referenced by URL.
    pub fn add_image_url(&mut self, url: impl Into<String>) -> Option<EntityId> {
        self.add_element(ElementKind::Image { src: url.into(), alt: "Image".to_owned() }, URL_IMAGE_BOUNDS)
    }

    pub fn add_video(&mut self, url: impl Into<String>) -> Option<EntityId> {
        self.add_element(ElementKind::Video { src: url.into() }, VIDEO_BOUNDS)
    }

    pub fn add_audio(&mut self, url: impl Into<String>) -> Option<EntityId> {
        self.add_element(ElementKind::Audio { src: url.into() }, AUDIO_BOUNDS)
    }

    /// Chart with an empty data set; the chart editor fills it later.
    pub fn add_chart(&mut self, chart_type: impl Into<String>, title: impl Into<String>) -> Option<EntityId> {
        let kind = ElementKind::Chart {
            chart_type: chart_type.into(),
            title: title.into(),
            data: serde_json::json!({ "labels": [], "datasets": [] }),
        };
        self.add_element(kind, CHART_BOUNDS)
    }

    /// Table of `rows` x `cols` empty cells. Zero in either dimension is a no-op.
    pub fn add_table(&mut self, rows: u16, cols: u16) -> Option<EntityId> {
        if rows == 0 || cols == 0 {
            debug!(rows, cols, "add_table ignored");
            return None;
        }
        let data = vec![vec![String::new(); usize::from(cols)]; usize::from(rows)];
        let width = f64::from(cols) * TABLE_CELL_WIDTH;
        let height = f64::from(rows) * TABLE_ROW_HEIGHT;
        let bounds = Bounds::new(TABLE_ORIGIN.0, TABLE_ORIGIN.1, width, height);
        self.add_element(ElementKind::Table { data }, bounds)
    }

    /// Insert-menu preset.
    pub fn insert_preset(&mut self, preset: InsertPreset) -> Option<EntityId> {
        let (kind, bounds) = preset.build();
        self.add_element(kind, bounds)
    }

    // --- Editing ---

    /// Merge `patch` into the element with `id`.
    pub fn update_element(&mut self, id: EntityId, patch: &ElementPatch) -> bool {
        self.edit_element(id, |element| patch.apply_to(element))
    }

    /// Drag the element to (`x`, `y`), clamped to the canvas origin.
    pub fn move_element(&mut self, id: EntityId, x: f64, y: f64) -> bool {
        self.edit_element(id, |element| {
            element.x = x.max(0.0);
            element.y = y.max(0.0);
        })
    }

    pub fn delete_element(&mut self, id: EntityId) -> bool {
        let removed = self.edit_current_slide(|slide| {
            let index = slide.elements.iter().position(|el| el.id == id)?;
            slide.elements.remove(index);
            Some(())
        });
        if removed.is_none() {
            debug!(%id, "delete_element ignored");
        }
        removed.is_some()
    }

    // --- Clipboard ---

    /// Put an independent copy of the element on the element clipboard.
    /// Not recorded in history.
    pub fn copy_element(&mut self, id: EntityId) -> bool {
        let Some(element) = self.current_slide().and_then(|slide| slide.element(id)).cloned() else {
            debug!(%id, "copy_element ignored");
            return false;
        };
        self.element_clipboard = Some(element);
        true
    }

    /// Copy then delete.
    pub fn cut_element(&mut self, id: EntityId) -> bool {
        self.copy_element(id) && self.delete_element(id)
    }

    /// Append an offset copy of the clipboard element with a fresh id.
    pub fn paste_element(&mut self) -> Option<EntityId> {
        let Some(held) = self.element_clipboard.clone() else {
            debug!("paste_element ignored: clipboard empty");
            return None;
        };
        self.append_offset_clone(&held)
    }

    /// Append an offset copy of the element with a fresh id.
    pub fn duplicate_element(&mut self, id: EntityId) -> Option<EntityId> {
        let Some(source) = self.current_slide().and_then(|slide| slide.element(id)).cloned() else {
            debug!(%id, "duplicate_element ignored");
            return None;
        };
        self.append_offset_clone(&source)
    }

    // --- Internals ---

    fn append_offset_clone(&mut self, source: &Element) -> Option<EntityId> {
        let offset = self.paste_offset_px;
        let bounds = Bounds::new(source.x + offset, source.y + offset, source.width, source.height);
        self.add_element(source.kind.clone(), bounds)
    }

    fn edit_element(&mut self, id: EntityId, edit: impl FnOnce(&mut Element)) -> bool {
        let edited = self.edit_current_slide(|slide| {
            let element = slide.elements.iter_mut().find(|el| el.id == id)?;
            edit(element);
            Some(())
        });
        if edited.is_none() {
            debug!(%id, "element edit ignored");
        }
        edited.is_some()
    }
}
