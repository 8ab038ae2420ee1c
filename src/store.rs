//! Presentation document store: the authoritative in-memory presentation.
//!
//! DESIGN
//! ======
//! One `PresentationStore` exists per open presentation. It owns the slide
//! sequence, the selected slide index, presentation metadata, both clipboards,
//! the id generator and the history log. Callers construct it explicitly and
//! pass it where it is needed; there is no shared global instance.
//!
//! Every mutating operation either applies fully and records one history
//! snapshot, or is a no-op that leaves state and history untouched. Guard
//! violations (deleting the last slide, out-of-range indices, lookup misses)
//! are reported as `false` / `None` instead of errors.
//!
//! Undo and redo replace the slide sequence wholesale from the log and never
//! record a snapshot themselves, so the redo branch stays reachable.
//!
//! SYSTEM CONTEXT
//! ==============
//! Element and animation operations live in `elements.rs` and
//! `animations.rs`; both edit the selected slide through
//! [`PresentationStore::edit_current_slide`]. The autosave task reads the
//! store through a shared lock (see `persistence.rs`).

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::consts::{DUPLICATE_TITLE_SUFFIX, PLACEHOLDER_CONTENT};
use crate::doc::{AnimationTarget, Element, LayoutKind, PresentationMeta, Slide, SlidePatch};
use crate::history::HistoryLog;
use crate::ids::{EntityId, IdGenerator};
use crate::layout::{self, LayoutMeta};
use crate::persistence::SavedPresentation;

/// The open presentation and its edit history.
#[derive(Debug, Clone)]
pub struct PresentationStore {
    slides: Vec<Slide>,
    current_slide_index: usize,
    presentation_meta: PresentationMeta,
    slide_clipboard: Option<Slide>,
    pub(crate) element_clipboard: Option<Element>,
    pub(crate) ids: IdGenerator,
    history: HistoryLog,
    pub(crate) paste_offset_px: f64,
}

impl PresentationStore {
    /// A presentation holding one `Slide 1` with the title-content layout.
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        let mut ids = IdGenerator::new();
        let first = Slide::new(ids.next_id(), "Slide 1", LayoutKind::TitleContent);
        let mut store = Self {
            slides: vec![first],
            current_slide_index: 0,
            presentation_meta: PresentationMeta::default(),
            slide_clipboard: None,
            element_clipboard: None,
            ids,
            history: HistoryLog::with_max_depth(config.history_limit),
            paste_offset_px: config.paste_offset_px,
        };
        store.history.initialize(&store.slides);
        info!(history_limit = config.history_limit, "presentation created");
        store
    }

    /// Reopen a saved presentation.
    ///
    /// Slides missing a layout descriptor get one derived from their tag, an
    /// empty slide list is replaced by a fresh `Slide 1`, and the id generator
    /// starts past the largest id in the document. Ids that repeat an earlier
    /// slide, element or animation id are replaced with fresh ones.
    #[must_use]
    pub fn from_saved(saved: SavedPresentation, config: &EditorConfig) -> Self {
        let SavedPresentation { mut slides, presentation_meta } = saved;

        for slide in &mut slides {
            if slide.layout_meta.is_none() {
                slide.layout_meta = Some(LayoutMeta::for_layout(&slide.layout));
            }
        }

        let max_id = slides.iter().map(Slide::max_id).max().unwrap_or(EntityId(0));
        let mut ids = IdGenerator::starting_after(max_id);
        let reassigned = reassign_duplicate_ids(&mut slides, &mut ids);
        if reassigned > 0 {
            warn!(reassigned, "duplicate ids in saved presentation replaced");
        }
        if slides.is_empty() {
            slides.push(Slide::new(ids.next_id(), "Slide 1", LayoutKind::TitleContent));
        }

        let mut store = Self {
            slides,
            current_slide_index: 0,
            presentation_meta,
            slide_clipboard: None,
            element_clipboard: None,
            ids,
            history: HistoryLog::with_max_depth(config.history_limit),
            paste_offset_px: config.paste_offset_px,
        };
        store.history.initialize(&store.slides);
        info!(slides = store.slides.len(), max_id = %max_id, "presentation reopened");
        store
    }

    // --- Queries ---

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn current_slide_index(&self) -> usize {
        self.current_slide_index
    }

    /// The selected slide. The sequence is never empty, so this only misses
    /// if the selection invariant is broken.
    #[must_use]
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current_slide_index)
    }

    #[must_use]
    pub fn presentation_meta(&self) -> &PresentationMeta {
        &self.presentation_meta
    }

    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Slide held by the slide clipboard.
    #[must_use]
    pub fn clipboard(&self) -> Option<&Slide> {
        self.slide_clipboard.as_ref()
    }

    /// Element held by the element clipboard.
    #[must_use]
    pub fn element_clipboard(&self) -> Option<&Element> {
        self.element_clipboard.as_ref()
    }

    /// `{slides, presentationMeta}` for the persistence collaborator.
    #[must_use]
    pub fn to_saved(&self) -> SavedPresentation {
        SavedPresentation { slides: self.slides.clone(), presentation_meta: self.presentation_meta.clone() }
    }

    // --- Slide operations ---

    /// Append a slide with the given layout and select it.
    pub fn add_slide(&mut self, layout: LayoutKind) -> EntityId {
        let id = self.ids.next_id();
        let title = format!("Slide {}", self.slides.len() + 1);
        self.slides.push(Slide::new(id, title, layout));
        self.current_slide_index = self.slides.len() - 1;
        self.commit();
        id
    }

    /// Remove the slide at `index`. Refuses to remove the last remaining slide.
    pub fn delete_slide(&mut self, index: usize) -> bool {
        if self.slides.len() <= 1 || index >= self.slides.len() {
            debug!(index, slides = self.slides.len(), "delete_slide ignored");
            return false;
        }
        self.slides.remove(index);
        if self.current_slide_index >= self.slides.len() {
            self.current_slide_index = self.slides.len() - 1;
        }
        self.commit();
        true
    }

    /// Insert a copy of the slide at `index` right after it. The copy and
    /// everything it owns get fresh ids. The selection does not move.
    pub fn duplicate_slide(&mut self, index: usize) -> Option<EntityId> {
        let Some(source) = self.slides.get(index) else {
            debug!(index, "duplicate_slide ignored");
            return None;
        };
        let source = source.clone();
        let mut copy = self.clone_with_fresh_ids(&source);
        copy.title.push_str(DUPLICATE_TITLE_SUFFIX);
        let id = copy.id;
        self.slides.insert(index + 1, copy);
        self.commit();
        Some(id)
    }

    /// Restore the placeholder body and drop every element.
    pub fn reset_slide(&mut self, index: usize) -> bool {
        let Some(slide) = self.slides.get_mut(index) else {
            debug!(index, "reset_slide ignored");
            return false;
        };
        PLACEHOLDER_CONTENT.clone_into(&mut slide.content);
        slide.elements.clear();
        self.commit();
        true
    }

    /// Shallow-merge `patch` into the slide at `index`.
    pub fn update_slide(&mut self, index: usize, patch: &SlidePatch) -> bool {
        let Some(slide) = self.slides.get_mut(index) else {
            debug!(index, "update_slide ignored");
            return false;
        };
        patch.apply_to(slide);
        self.commit();
        true
    }

    /// Reshape the slide at `index` for `layout`.
    pub fn apply_layout(&mut self, index: usize, layout: LayoutKind) -> bool {
        let Some(slide) = self.slides.get_mut(index) else {
            debug!(index, %layout, "apply_layout ignored");
            return false;
        };
        *slide = layout::apply_layout(slide, layout);
        self.commit();
        true
    }

    /// Move the slide at `from` so it lands at `to` and select it.
    ///
    /// Removal happens first, so `to` indexes the shortened sequence; it is
    /// clamped to the end.
    pub fn reorder_slides(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.slides.len() {
            debug!(from, to, "reorder_slides ignored");
            return false;
        }
        let slide = self.slides.remove(from);
        let landing = to.min(self.slides.len());
        self.slides.insert(landing, slide);
        self.current_slide_index = landing;
        self.commit();
        true
    }

    /// Put an independent copy of the selected slide on the slide clipboard.
    pub fn copy(&mut self) -> bool {
        let Some(slide) = self.current_slide().cloned() else {
            return false;
        };
        self.slide_clipboard = Some(slide);
        true
    }

    /// Append a copy of the clipboard slide with fresh ids.
    pub fn paste(&mut self) -> Option<EntityId> {
        let Some(held) = self.slide_clipboard.clone() else {
            debug!("paste ignored: clipboard empty");
            return None;
        };
        let copy = self.clone_with_fresh_ids(&held);
        let id = copy.id;
        self.slides.push(copy);
        self.commit();
        Some(id)
    }

    /// Change the selected slide. Not recorded in history.
    pub fn select_slide(&mut self, index: usize) -> bool {
        if index >= self.slides.len() {
            debug!(index, "select_slide ignored");
            return false;
        }
        self.current_slide_index = index;
        true
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.slides = snapshot.to_vec();
        self.clamp_selection();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.slides = snapshot.to_vec();
        self.clamp_selection();
        true
    }

    // --- Presentation ---

    /// Replace the document with a single fresh slide and restart history.
    /// Metadata and clipboards are kept.
    pub fn new_presentation(&mut self) {
        let id = self.ids.next_id();
        self.slides = vec![Slide::new(id, "Slide 1", LayoutKind::TitleContent)];
        self.current_slide_index = 0;
        self.history.clear();
        self.history.initialize(&self.slides);
        info!(slide_id = %id, "presentation reset");
    }

    /// Replace presentation metadata. `updated_at` is taken as given.
    pub fn set_presentation_meta(&mut self, meta: PresentationMeta) {
        self.presentation_meta = meta;
    }

    /// Edit presentation metadata in place. Not recorded in history.
    pub fn presentation_meta_mut(&mut self) -> &mut PresentationMeta {
        &mut self.presentation_meta
    }

    // --- Internals ---

    /// Run `edit` on the selected slide and record a snapshot when it
    /// returns `Some`.
    pub(crate) fn edit_current_slide<R>(&mut self, edit: impl FnOnce(&mut Slide) -> Option<R>) -> Option<R> {
        let slide = self.slides.get_mut(self.current_slide_index)?;
        let result = edit(slide)?;
        self.commit();
        Some(result)
    }

    fn commit(&mut self) {
        self.history.push(&self.slides);
    }

    fn clamp_selection(&mut self) {
        let last = self.slides.len().saturating_sub(1);
        if self.current_slide_index > last {
            self.current_slide_index = last;
        }
    }

    /// Deep copy of `slide` with new ids for the slide, its elements and its
    /// animations. Animations that target an element follow it to its new id.
    fn clone_with_fresh_ids(&mut self, slide: &Slide) -> Slide {
        let mut copy = slide.clone();
        copy.id = self.ids.next_id();

        let mut remap = Vec::with_capacity(copy.elements.len());
        for element in &mut copy.elements {
            let fresh = self.ids.next_id();
            remap.push((element.id, fresh));
            element.id = fresh;
        }
        for animation in &mut copy.animations {
            animation.id = self.ids.next_id();
            if let AnimationTarget::Element(old) = animation.target
                && let Some((_, fresh)) = remap.iter().find(|(prev, _)| *prev == old)
            {
                animation.target = AnimationTarget::Element(*fresh);
            }
        }
        copy
    }
}

/// Give every repeated id in `slides` a fresh one from `ids`, keeping the
/// first occurrence. Returns how many ids were replaced.
fn reassign_duplicate_ids(slides: &mut [Slide], ids: &mut IdGenerator) -> usize {
    let mut seen = HashSet::new();
    let mut reassigned = 0;
    let mut claim = |id: &mut EntityId| {
        if !seen.insert(*id) {
            *id = ids.next_id();
            seen.insert(*id);
            reassigned += 1;
        }
    };
    for slide in slides {
        claim(&mut slide.id);
        for element in &mut slide.elements {
            claim(&mut element.id);
        }
        for animation in &mut slide.animations {
            claim(&mut animation.id);
        }
    }
    reassigned
}
