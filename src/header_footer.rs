//! Header and footer text resolution.
//!
//! Picks one of the `{default, first, even, odd}` variants for a slide
//! position and substitutes the `{page}` and `{total}` tokens. Positions are
//! 0-based, so the first slide counts as even.

#[cfg(test)]
#[path = "header_footer_test.rs"]
mod header_footer_test;

use crate::doc::{HeaderFooter, PresentationMeta};

pub const PAGE_TOKEN: &str = "{page}";
pub const TOTAL_TOKEN: &str = "{total}";

/// Effective text for the slide at `index` out of `total`.
#[must_use]
pub fn resolve(config: &HeaderFooter, index: usize, total: usize) -> String {
    let template = if index == 0 && !config.first.is_empty() {
        &config.first
    } else if index % 2 == 0 && !config.even.is_empty() {
        &config.even
    } else if index % 2 == 1 && !config.odd.is_empty() {
        &config.odd
    } else {
        &config.default
    };

    template.replace(PAGE_TOKEN, &(index + 1).to_string()).replace(TOTAL_TOKEN, &total.to_string())
}

impl PresentationMeta {
    #[must_use]
    pub fn header_text(&self, index: usize, total: usize) -> String {
        resolve(&self.header, index, total)
    }

    #[must_use]
    pub fn footer_text(&self, index: usize, total: usize) -> String {
        resolve(&self.footer, index, total)
    }
}
