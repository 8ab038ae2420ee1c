//! Document model: slides, canvas elements, animations and presentation metadata.
//!
//! This module defines the data that makes up a presentation (`Slide`,
//! `Element`, `Animation`, `PresentationMeta`), the sparse-update types used
//! for incremental edits (`SlidePatch`, `ElementPatch`, `AnimationTiming`),
//! and the typed view over a slide's active layout fields (`LayoutContent`).
//!
//! Everything here is plain data. Field names serialize in camelCase because
//! the persistence and export collaborators consume this JSON shape directly.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_BACKGROUND, DEFAULT_PRESENTATION_TITLE, DEFAULT_TEXT_COLOR,
    DEFAULT_THEME_PRESET, PLACEHOLDER_CONTENT,
};
use crate::ids::EntityId;
use crate::layout::LayoutMeta;

// =============================================================================
// LAYOUT TAG
// =============================================================================

/// Which field set of a slide is active.
///
/// Unknown tags are kept verbatim in [`LayoutKind::Other`] so documents
/// written by newer editors pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayoutKind {
    Blank,
    TitleContent,
    TitleOnly,
    ContentOnly,
    TwoColumn,
    ImageText,
    Comparison,
    Other(String),
}

impl LayoutKind {
    /// The wire tag for this layout.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Blank => "blank",
            Self::TitleContent => "title-content",
            Self::TitleOnly => "title-only",
            Self::ContentOnly => "content-only",
            Self::TwoColumn => "two-column",
            Self::ImageText => "image-text",
            Self::Comparison => "comparison",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for LayoutKind {
    fn from(tag: &str) -> Self {
        match tag {
            "blank" => Self::Blank,
            "title-content" => Self::TitleContent,
            "title-only" => Self::TitleOnly,
            "content-only" => Self::ContentOnly,
            "two-column" => Self::TwoColumn,
            "image-text" => Self::ImageText,
            "comparison" => Self::Comparison,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for LayoutKind {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<LayoutKind> for String {
    fn from(kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SLIDE
// =============================================================================

/// One page of the presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Assigned at creation, never changes.
    pub id: EntityId,
    /// Title region markup (opaque).
    #[serde(default)]
    pub title: String,
    /// Body region markup (opaque).
    #[serde(default)]
    pub content: String,
    /// Active layout tag.
    pub layout: LayoutKind,
    /// Descriptor derived from `layout`. Absent only in documents written
    /// before the layout was ever applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_meta: Option<LayoutMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_left_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_left_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_right_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_right_content: Option<String>,
    /// Background color as a CSS color string.
    #[serde(default = "default_background")]
    pub background: String,
    /// Text color as a CSS color string.
    #[serde(default = "default_text_color")]
    pub text_color: String,
    /// Canvas elements; later entries draw on top.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Entrance effects bound to this slide.
    #[serde(default)]
    pub animations: Vec<Animation>,
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_owned()
}

fn default_text_color() -> String {
    DEFAULT_TEXT_COLOR.to_owned()
}

impl Slide {
    /// A slide with the default body placeholder, colors and no elements.
    #[must_use]
    pub fn new(id: EntityId, title: impl Into<String>, layout: LayoutKind) -> Self {
        let layout_meta = Some(LayoutMeta::for_layout(&layout));
        Self {
            id,
            title: title.into(),
            content: PLACEHOLDER_CONTENT.to_owned(),
            layout,
            layout_meta,
            content_left: None,
            content_right: None,
            image_src: None,
            comp_left_title: None,
            comp_left_content: None,
            comp_right_title: None,
            comp_right_content: None,
            background: default_background(),
            text_color: default_text_color(),
            elements: Vec::new(),
            animations: Vec::new(),
        }
    }

    /// The layout renderers should draw: the descriptor's tag when present,
    /// otherwise the raw `layout` field.
    #[must_use]
    pub fn active_layout(&self) -> &LayoutKind {
        self.layout_meta.as_ref().map_or(&self.layout, |meta| &meta.kind)
    }

    /// Typed view over exactly the fields of the active layout.
    #[must_use]
    pub fn active_content(&self) -> LayoutContent<'_> {
        fn text(field: Option<&String>) -> &str {
            field.map_or("", String::as_str)
        }

        match self.active_layout() {
            LayoutKind::Blank => LayoutContent::Blank,
            LayoutKind::TitleContent => LayoutContent::TitleContent { title: &self.title, content: &self.content },
            LayoutKind::TitleOnly => LayoutContent::TitleOnly { title: &self.title },
            LayoutKind::ContentOnly => LayoutContent::ContentOnly { content: &self.content },
            LayoutKind::TwoColumn => LayoutContent::TwoColumn {
                left: text(self.content_left.as_ref()),
                right: text(self.content_right.as_ref()),
            },
            LayoutKind::ImageText => {
                LayoutContent::ImageText { image_src: text(self.image_src.as_ref()), text: &self.content }
            }
            LayoutKind::Comparison => LayoutContent::Comparison {
                left_title: text(self.comp_left_title.as_ref()),
                left_content: text(self.comp_left_content.as_ref()),
                right_title: text(self.comp_right_title.as_ref()),
                right_content: text(self.comp_right_content.as_ref()),
            },
            LayoutKind::Other(tag) => LayoutContent::Other { tag },
        }
    }

    /// Return an element by id.
    #[must_use]
    pub fn element(&self, id: EntityId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Return an animation by id.
    #[must_use]
    pub fn animation(&self, id: EntityId) -> Option<&Animation> {
        self.animations.iter().find(|a| a.id == id)
    }

    /// Largest id used by this slide or anything it owns.
    #[must_use]
    pub fn max_id(&self) -> EntityId {
        let elements = self.elements.iter().map(|el| el.id);
        let animations = self.animations.iter().map(|a| a.id);
        elements.chain(animations).fold(self.id, std::cmp::max)
    }
}

/// Borrowed view of the fields that belong to a slide's active layout.
///
/// Fields of inactive layouts may still be stored on the slide; they are not
/// reachable through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutContent<'a> {
    Blank,
    TitleContent { title: &'a str, content: &'a str },
    TitleOnly { title: &'a str },
    ContentOnly { content: &'a str },
    TwoColumn { left: &'a str, right: &'a str },
    ImageText { image_src: &'a str, text: &'a str },
    Comparison { left_title: &'a str, left_content: &'a str, right_title: &'a str, right_content: &'a str },
    Other { tag: &'a str },
}

/// Sparse update for a slide. Only present fields are applied.
///
/// Layout changes go through [`crate::layout::apply_layout`] instead, so the
/// layout descriptor can never drift from the layout tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_left_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_left_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_right_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_right_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Element>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<Vec<Animation>>,
}

impl SlidePatch {
    /// Shallow-merge the present fields into `slide`.
    pub fn apply_to(&self, slide: &mut Slide) {
        fn set(target: &mut String, value: Option<&String>) {
            if let Some(v) = value {
                target.clone_from(v);
            }
        }
        fn set_opt(target: &mut Option<String>, value: Option<&String>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }

        set(&mut slide.title, self.title.as_ref());
        set(&mut slide.content, self.content.as_ref());
        set_opt(&mut slide.content_left, self.content_left.as_ref());
        set_opt(&mut slide.content_right, self.content_right.as_ref());
        set_opt(&mut slide.image_src, self.image_src.as_ref());
        set_opt(&mut slide.comp_left_title, self.comp_left_title.as_ref());
        set_opt(&mut slide.comp_left_content, self.comp_left_content.as_ref());
        set_opt(&mut slide.comp_right_title, self.comp_right_title.as_ref());
        set_opt(&mut slide.comp_right_content, self.comp_right_content.as_ref());
        set(&mut slide.background, self.background.as_ref());
        set(&mut slide.text_color, self.text_color.as_ref());
        if let Some(elements) = &self.elements {
            slide.elements.clone_from(elements);
        }
        if let Some(animations) = &self.animations {
            slide.animations.clone_from(animations);
        }
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================================
// ELEMENT
// =============================================================================

/// A freeform object positioned on a slide's canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier for this element.
    pub id: EntityId,
    /// Type tag and type-specific properties.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Width in canvas pixels.
    pub width: f64,
    /// Height in canvas pixels.
    pub height: f64,
}

/// Type-specific element payload, serialized under the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ElementKind {
    /// Rich-text box.
    Textbox {
        content: String,
        #[serde(default = "default_font_size")]
        font_size: f64,
        #[serde(default = "default_font_family")]
        font_family: String,
        #[serde(default = "default_text_color")]
        color: String,
        #[serde(default = "default_transparent")]
        background_color: String,
    },
    /// Raster image, usually an inline data URL or remote URL.
    Image {
        src: String,
        #[serde(default)]
        alt: String,
    },
    /// Filled geometric shape.
    Shape { shape_type: ShapeType, fill: String, stroke: String, stroke_width: f64 },
    /// Single glyph or emoji.
    Icon {
        content: String,
        #[serde(default = "default_font_size")]
        font_size: f64,
    },
    /// Chart; `data` belongs to the chart sub-editor and is not interpreted here.
    Chart {
        chart_type: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        data: serde_json::Value,
    },
    /// Grid of cell strings, row-major.
    Table { data: Vec<Vec<String>> },
    /// Embedded video.
    Video { src: String },
    /// Embedded audio.
    Audio { src: String },
}

fn default_font_size() -> f64 {
    16.0
}

fn default_font_family() -> String {
    "Arial".to_owned()
}

fn default_transparent() -> String {
    "transparent".to_owned()
}

impl ElementKind {
    /// The wire `type` tag.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Textbox { .. } => "textbox",
            Self::Image { .. } => "image",
            Self::Shape { .. } => "shape",
            Self::Icon { .. } => "icon",
            Self::Chart { .. } => "chart",
            Self::Table { .. } => "table",
            Self::Video { .. } => "video",
            Self::Audio { .. } => "audio",
        }
    }
}

/// Primitive used by a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rectangle,
    Circle,
    Triangle,
}

impl Element {
    /// Name of the first numeric field that is NaN or infinite, if any.
    ///
    /// Such values cannot be represented in the JSON persistence format.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let geometry = [("x", self.x), ("y", self.y), ("width", self.width), ("height", self.height)];
        if let Some((name, _)) = geometry.iter().find(|(_, v)| !v.is_finite()) {
            return Some(*name);
        }
        match &self.kind {
            ElementKind::Textbox { font_size, .. } | ElementKind::Icon { font_size, .. } if !font_size.is_finite() => {
                Some("fontSize")
            }
            ElementKind::Shape { stroke_width, .. } if !stroke_width.is_finite() => Some("strokeWidth"),
            _ => None,
        }
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Text for textbox and icon elements; ignored by other types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Replacement payload. Applied before `content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
}

impl ElementPatch {
    /// Merge the present fields into `element`. The id is never touched.
    pub fn apply_to(&self, element: &mut Element) {
        if let Some(x) = self.x {
            element.x = x;
        }
        if let Some(y) = self.y {
            element.y = y;
        }
        if let Some(w) = self.width {
            element.width = w;
        }
        if let Some(h) = self.height {
            element.height = h;
        }
        if let Some(kind) = &self.kind {
            element.kind = kind.clone();
        }
        if let Some(text) = &self.content
            && let ElementKind::Textbox { content, .. } | ElementKind::Icon { content, .. } = &mut element.kind
        {
            content.clone_from(text);
        }
    }
}

// =============================================================================
// ANIMATION
// =============================================================================

/// What an animation plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AnimationTarget {
    Title,
    Content,
    Element(EntityId),
}

impl TryFrom<String> for AnimationTarget {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.as_str() {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            other => other
                .parse::<EntityId>()
                .map(Self::Element)
                .map_err(|_| format!("invalid animation target: {other}")),
        }
    }
}

impl From<AnimationTarget> for String {
    fn from(target: AnimationTarget) -> Self {
        match target {
            AnimationTarget::Title => "title".to_owned(),
            AnimationTarget::Content => "content".to_owned(),
            AnimationTarget::Element(id) => id.to_string(),
        }
    }
}

/// Entrance effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationEffect {
    FadeIn,
    SlideInLeft,
    SlideInRight,
    SlideInUp,
    SlideInDown,
    ZoomIn,
    Bounce,
    Pulse,
    Float,
    Rotate,
}

/// An effect bound to one target on a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub id: EntityId,
    pub target: AnimationTarget,
    #[serde(rename = "type")]
    pub effect: AnimationEffect,
    /// Milliseconds.
    pub duration: u32,
    /// Milliseconds before the effect starts.
    pub delay: u32,
    /// 0-based play position among the slide's animations.
    pub order: u32,
}

impl Animation {
    /// An animation with default timing.
    #[must_use]
    pub fn new(id: EntityId, target: AnimationTarget, effect: AnimationEffect, order: u32) -> Self {
        Self { id, target, effect, duration: DEFAULT_ANIMATION_DURATION_MS, delay: 0, order }
    }
}

/// Sparse timing update for an animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationTiming {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
}

/// Direction for reordering an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

// =============================================================================
// PRESENTATION META
// =============================================================================

/// Canvas aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideSize {
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "4:3")]
    Standard,
}

impl SlideSize {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Widescreen => "16:9",
            Self::Standard => "4:3",
        }
    }

    /// The other aspect ratio.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Widescreen => Self::Standard,
            Self::Standard => Self::Widescreen,
        }
    }
}

/// Header or footer text variants, chosen per slide position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderFooter {
    pub default: String,
    pub first: String,
    pub even: String,
    pub odd: String,
}

/// Presentation-wide metadata.
///
/// `updated_at` is maintained by callers via [`PresentationMeta::touch`];
/// slide mutations do not refresh it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationMeta {
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub slide_size: SlideSize,
    #[serde(default = "default_theme_preset")]
    pub theme_preset: String,
    #[serde(default)]
    pub header: HeaderFooter,
    #[serde(default)]
    pub footer: HeaderFooter,
}

fn default_theme_preset() -> String {
    DEFAULT_THEME_PRESET.to_owned()
}

impl Default for PresentationMeta {
    fn default() -> Self {
        let now = now_rfc3339();
        Self {
            title: DEFAULT_PRESENTATION_TITLE.to_owned(),
            author: String::new(),
            created_at: now.clone(),
            updated_at: now,
            slide_size: SlideSize::default(),
            theme_preset: default_theme_preset(),
            header: HeaderFooter::default(),
            footer: HeaderFooter::default(),
        }
    }
}

impl PresentationMeta {
    /// Stamp `updated_at` with the current time.
    pub fn touch(&mut self) {
        self.updated_at = now_rfc3339();
    }

    /// Flip between 16:9 and 4:3.
    pub fn toggle_slide_size(&mut self) {
        self.slide_size = self.slide_size.toggled();
    }
}

/// Current UTC time as an RFC 3339 string. Empty if formatting fails.
#[must_use]
pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
