//! Animation operations on the selected slide.
//!
//! `order` is dense (0..n) after any sequence of adds and moves. Removal does
//! not renumber, so a slide that lost an animation may have a gap until the
//! next move rewrites every rank.

#[cfg(test)]
#[path = "animations_test.rs"]
mod animations_test;

use tracing::debug;

use crate::doc::{Animation, AnimationEffect, AnimationTarget, AnimationTiming, Direction, Slide};
use crate::ids::EntityId;
use crate::store::PresentationStore;

impl PresentationStore {
    /// Append an animation with default timing; its rank is the current count.
    pub fn add_animation(&mut self, target: AnimationTarget, effect: AnimationEffect) -> Option<EntityId> {
        let id = self.ids.next_id();
        self.edit_current_slide(|slide| {
            let order = u32::try_from(slide.animations.len()).unwrap_or(u32::MAX);
            slide.animations.push(Animation::new(id, target, effect, order));
            Some(id)
        })
    }

    /// Change duration and/or delay.
    pub fn update_animation(&mut self, id: EntityId, timing: AnimationTiming) -> bool {
        let updated = self.edit_current_slide(|slide| {
            let animation = slide.animations.iter_mut().find(|a| a.id == id)?;
            if let Some(duration) = timing.duration {
                animation.duration = duration;
            }
            if let Some(delay) = timing.delay {
                animation.delay = delay;
            }
            Some(())
        });
        if updated.is_none() {
            debug!(%id, "update_animation ignored");
        }
        updated.is_some()
    }

    /// Swap with the neighbour in `direction` and rewrite every rank.
    /// Moving past either end is a no-op.
    pub fn move_animation(&mut self, id: EntityId, direction: Direction) -> bool {
        let moved = self.edit_current_slide(|slide| {
            let index = slide.animations.iter().position(|a| a.id == id)?;
            let neighbour = match direction {
                Direction::Up => index.checked_sub(1)?,
                Direction::Down => Some(index + 1).filter(|&n| n < slide.animations.len())?,
            };
            slide.animations.swap(index, neighbour);
            for (rank, animation) in (0u32..).zip(slide.animations.iter_mut()) {
                animation.order = rank;
            }
            Some(())
        });
        if moved.is_none() {
            debug!(%id, ?direction, "move_animation ignored");
        }
        moved.is_some()
    }

    /// Delete by id. Remaining ranks are left as they are.
    pub fn remove_animation(&mut self, id: EntityId) -> bool {
        let removed = self.edit_current_slide(|slide| {
            let index = slide.animations.iter().position(|a| a.id == id)?;
            slide.animations.remove(index);
            Some(())
        });
        if removed.is_none() {
            debug!(%id, "remove_animation ignored");
        }
        removed.is_some()
    }
}

/// Animations in playback order: by rank, ties broken by list position.
#[must_use]
pub fn play_sequence(slide: &Slide) -> Vec<&Animation> {
    let mut sequence: Vec<&Animation> = slide.animations.iter().collect();
    sequence.sort_by_key(|a| a.order);
    sequence
}
