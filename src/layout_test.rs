use super::*;
use crate::ids::EntityId;

fn slide(layout: LayoutKind) -> Slide {
    let mut s = Slide::new(EntityId(1), "Slide 1", layout);
    s.content = "Body".into();
    s
}

const ALL_LAYOUTS: [&str; 8] =
    ["blank", "title-content", "title-only", "content-only", "two-column", "image-text", "comparison", "hero-banner"];

// =============================================================
// LayoutMeta
// =============================================================

#[test]
fn meta_for_simple_layouts_is_tag_only() {
    for tag in ["blank", "title-content", "title-only", "content-only"] {
        let meta = LayoutMeta::for_layout(&LayoutKind::from(tag));
        assert_eq!(meta.kind.as_str(), tag);
        assert_eq!(meta.columns, None);
        assert!(meta.regions.is_empty());
    }
}

#[test]
fn meta_two_column_and_comparison_have_two_columns() {
    assert_eq!(LayoutMeta::for_layout(&LayoutKind::TwoColumn).columns, Some(2));
    assert_eq!(LayoutMeta::for_layout(&LayoutKind::Comparison).columns, Some(2));
}

#[test]
fn meta_image_text_lists_regions() {
    let meta = LayoutMeta::for_layout(&LayoutKind::ImageText);
    assert_eq!(meta.regions, vec![Region { kind: RegionKind::Image }, Region { kind: RegionKind::Text }]);
}

#[test]
fn meta_serializes_like_wire_descriptor() {
    let json = serde_json::to_value(LayoutMeta::for_layout(&LayoutKind::ImageText)).unwrap();
    assert_eq!(json, serde_json::json!({"type": "image-text", "regions": [{"type": "image"}, {"type": "text"}]}));

    let json = serde_json::to_value(LayoutMeta::for_layout(&LayoutKind::TwoColumn)).unwrap();
    assert_eq!(json, serde_json::json!({"type": "two-column", "columns": 2}));
}

// =============================================================
// apply_layout per layout
// =============================================================

#[test]
fn blank_clears_title_and_content() {
    let out = apply_layout(&slide(LayoutKind::TitleContent), LayoutKind::Blank);
    assert_eq!(out.title, "");
    assert_eq!(out.content, "");
    assert_eq!(out.layout, LayoutKind::Blank);
    assert_eq!(out.layout_meta.unwrap().kind, LayoutKind::Blank);
}

#[test]
fn title_content_preserves_both() {
    let out = apply_layout(&slide(LayoutKind::Blank), LayoutKind::TitleContent);
    assert_eq!(out.title, "Slide 1");
    assert_eq!(out.content, "Body");
}

#[test]
fn title_only_clears_content() {
    let out = apply_layout(&slide(LayoutKind::TitleContent), LayoutKind::TitleOnly);
    assert_eq!(out.title, "Slide 1");
    assert_eq!(out.content, "");
}

#[test]
fn content_only_clears_title() {
    let out = apply_layout(&slide(LayoutKind::TitleContent), LayoutKind::ContentOnly);
    assert_eq!(out.title, "");
    assert_eq!(out.content, "Body");
}

#[test]
fn two_column_initializes_columns() {
    let out = apply_layout(&slide(LayoutKind::TitleContent), LayoutKind::TwoColumn);
    assert_eq!(out.content_left.as_deref(), Some(""));
    assert_eq!(out.content_right.as_deref(), Some(""));
    assert_eq!(out.layout_meta.unwrap().columns, Some(2));
}

#[test]
fn image_text_initializes_image_and_keeps_content() {
    let out = apply_layout(&slide(LayoutKind::TitleContent), LayoutKind::ImageText);
    assert_eq!(out.image_src.as_deref(), Some(""));
    assert_eq!(out.content, "Body");
}

#[test]
fn comparison_initializes_four_fields() {
    let mut input = slide(LayoutKind::TitleContent);
    input.comp_right_title = Some("Kept".into());
    let out = apply_layout(&input, LayoutKind::Comparison);
    assert_eq!(out.comp_left_title.as_deref(), Some(""));
    assert_eq!(out.comp_left_content.as_deref(), Some(""));
    assert_eq!(out.comp_right_title.as_deref(), Some("Kept"));
    assert_eq!(out.comp_right_content.as_deref(), Some(""));
}

#[test]
fn unknown_layout_only_changes_tag() {
    let input = slide(LayoutKind::TitleContent);
    let out = apply_layout(&input, LayoutKind::from("hero-banner"));
    assert_eq!(out.layout, LayoutKind::Other("hero-banner".into()));
    assert_eq!(out.layout_meta.as_ref().unwrap().kind.as_str(), "hero-banner");
    assert_eq!(out.title, input.title);
    assert_eq!(out.content, input.content);
    assert_eq!(out.content_left, None);
}

#[test]
fn input_slide_is_not_modified() {
    let input = slide(LayoutKind::TitleContent);
    let before = input.clone();
    let _out = apply_layout(&input, LayoutKind::Blank);
    assert_eq!(input, before);
}

#[test]
fn elements_and_id_survive_layout_change() {
    let mut input = slide(LayoutKind::TitleContent);
    input.background = "#123456".into();
    let out = apply_layout(&input, LayoutKind::Comparison);
    assert_eq!(out.id, input.id);
    assert_eq!(out.background, "#123456");
}

// =============================================================
// Idempotence and preservation
// =============================================================

#[test]
fn reapplying_same_layout_is_idempotent() {
    for tag in ALL_LAYOUTS {
        let mut input = slide(LayoutKind::TitleContent);
        input.content_left = Some("L".into());
        input.image_src = Some("data:image/png;base64,AAAA".into());
        input.comp_left_title = Some("Pros".into());
        let once = apply_layout(&input, LayoutKind::from(tag));
        let twice = apply_layout(&once, LayoutKind::from(tag));
        assert_eq!(once, twice, "layout {tag} not idempotent");
    }
}

#[test]
fn two_column_round_trip_keeps_left_text() {
    let start = slide(LayoutKind::TitleContent);
    let mut two = apply_layout(&start, LayoutKind::TwoColumn);
    assert_eq!(two.layout_meta.as_ref().unwrap().kind, LayoutKind::TwoColumn);
    assert_eq!(two.content_left.as_deref(), Some(""));
    assert_eq!(two.content_right.as_deref(), Some(""));

    two.content_left = Some("Left text".into());
    let back = apply_layout(&two, LayoutKind::TitleContent);
    let again = apply_layout(&back, LayoutKind::TwoColumn);
    assert_eq!(again.content_left.as_deref(), Some("Left text"));
}

#[test]
fn active_content_follows_applied_layout() {
    let mut two = apply_layout(&slide(LayoutKind::TitleContent), LayoutKind::TwoColumn);
    two.content_right = Some("R".into());
    assert_eq!(two.active_content(), crate::doc::LayoutContent::TwoColumn { left: "", right: "R" });

    let blank = apply_layout(&two, LayoutKind::Blank);
    assert_eq!(blank.active_content(), crate::doc::LayoutContent::Blank);
}
