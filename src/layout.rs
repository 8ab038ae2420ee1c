//! Layout resolver: reshapes a slide when its layout changes.
//!
//! DESIGN
//! ======
//! `apply_layout` is a pure function from (slide, layout) to a new slide. It
//! sets the layout tag, derives the `LayoutMeta` descriptor, and makes sure
//! every field of the target layout holds a string (never `None`).
//!
//! Fields of the target layout are preserved when they already hold a
//! non-empty value. `blank` is the only transition that wipes title and body;
//! `title-only` and `content-only` clear the region they hide. Fields that
//! belong to other layouts are left alone, so switching away and back keeps
//! their last values.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};

use crate::doc::{LayoutKind, Slide};

/// Kind of a region inside a multi-region layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Image,
    Text,
}

/// One region of a multi-region layout descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    #[serde(rename = "type")]
    pub kind: RegionKind,
}

/// Structured descriptor of a slide layout, derived from the layout tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutMeta {
    #[serde(rename = "type")]
    pub kind: LayoutKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<Region>,
}

impl LayoutMeta {
    /// The descriptor for `layout`.
    #[must_use]
    pub fn for_layout(layout: &LayoutKind) -> Self {
        let (columns, regions) = match layout {
            LayoutKind::TwoColumn | LayoutKind::Comparison => (Some(2), Vec::new()),
            LayoutKind::ImageText => {
                (None, vec![Region { kind: RegionKind::Image }, Region { kind: RegionKind::Text }])
            }
            _ => (None, Vec::new()),
        };
        Self { kind: layout.clone(), columns, regions }
    }
}

/// Return a copy of `slide` reshaped for `layout`.
#[must_use]
pub fn apply_layout(slide: &Slide, layout: LayoutKind) -> Slide {
    let mut next = slide.clone();

    match &layout {
        LayoutKind::Blank => {
            next.title.clear();
            next.content.clear();
        }
        LayoutKind::TitleContent => {}
        LayoutKind::TitleOnly => next.content.clear(),
        LayoutKind::ContentOnly => next.title.clear(),
        LayoutKind::TwoColumn => {
            keep_or_init(&mut next.content_left);
            keep_or_init(&mut next.content_right);
        }
        LayoutKind::ImageText => keep_or_init(&mut next.image_src),
        LayoutKind::Comparison => {
            keep_or_init(&mut next.comp_left_title);
            keep_or_init(&mut next.comp_left_content);
            keep_or_init(&mut next.comp_right_title);
            keep_or_init(&mut next.comp_right_content);
        }
        LayoutKind::Other(_) => {}
    }

    next.layout_meta = Some(LayoutMeta::for_layout(&layout));
    next.layout = layout;
    next
}

/// Keep a non-empty value, otherwise initialize to the empty string.
fn keep_or_init(field: &mut Option<String>) {
    if field.as_deref().is_none_or(str::is_empty) {
        *field = Some(String::new());
    }
}
