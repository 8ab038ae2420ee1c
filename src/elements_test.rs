use super::*;
use crate::config::EditorConfig;

fn store() -> PresentationStore {
    PresentationStore::new(&EditorConfig::default())
}

fn element(store: &PresentationStore, id: EntityId) -> Element {
    store.current_slide().unwrap().element(id).unwrap().clone()
}

fn element_count(store: &PresentationStore) -> usize {
    store.current_slide().unwrap().elements.len()
}

// =============================================================
// Insertion
// =============================================================

#[test]
fn add_textbox_uses_defaults() {
    let mut store = store();
    let id = store.add_textbox().unwrap();
    let el = element(&store, id);
    assert_eq!(
        el.kind,
        ElementKind::Textbox {
            content: "New text box".into(),
            font_size: 16.0,
            font_family: "Arial".into(),
            color: "#000000".into(),
            background_color: "transparent".into(),
        }
    );
    assert_eq!(Bounds::new(el.x, el.y, el.width, el.height), Bounds::new(100.0, 100.0, 200.0, 50.0));
    assert_eq!(store.history().len(), 2);
}

#[test]
fn add_image_uses_file_name_as_alt() {
    let mut store = store();
    let image = ImageData { src: "data:image/png;base64,AAAA".into(), name: "logo.png".into() };
    let id = store.add_image(image).unwrap();
    let el = element(&store, id);
    assert_eq!(el.kind, ElementKind::Image { src: "data:image/png;base64,AAAA".into(), alt: "logo.png".into() });
    assert_eq!(Bounds::new(el.x, el.y, el.width, el.height), Bounds::new(100.0, 200.0, 200.0, 150.0));
}

#[test]
fn media_by_url() {
    let mut store = store();
    let image = store.add_image_url("https://img.test/a.png").unwrap();
    let video = store.add_video("https://cdn.test/a.mp4").unwrap();
    let audio = store.add_audio("https://cdn.test/a.mp3").unwrap();

    assert_eq!(element(&store, image).kind, ElementKind::Image { src: "https://img.test/a.png".into(), alt: "Image".into() });
    assert_eq!(element(&store, video).kind, ElementKind::Video { src: "https://cdn.test/a.mp4".into() });
    let audio = element(&store, audio);
    assert_eq!(audio.kind, ElementKind::Audio { src: "https://cdn.test/a.mp3".into() });
    assert!((audio.height - 40.0).abs() < f64::EPSILON);
}

#[test]
fn add_chart_starts_empty() {
    let mut store = store();
    let id = store.add_chart("bar", "Revenue").unwrap();
    match element(&store, id).kind {
        ElementKind::Chart { chart_type, title, data } => {
            assert_eq!(chart_type, "bar");
            assert_eq!(title, "Revenue");
            assert_eq!(data["labels"], serde_json::json!([]));
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn add_table_builds_empty_grid() {
    let mut store = store();
    let id = store.add_table(2, 3).unwrap();
    let el = element(&store, id);
    assert_eq!(el.kind, ElementKind::Table { data: vec![vec![String::new(); 3]; 2] });
    assert!((el.width - 300.0).abs() < f64::EPSILON);
    assert!((el.height - 80.0).abs() < f64::EPSILON);
}

#[test]
fn add_table_with_zero_dimension_is_noop() {
    let mut store = store();
    assert!(store.add_table(0, 3).is_none());
    assert!(store.add_table(3, 0).is_none());
    assert_eq!(element_count(&store), 0);
    assert_eq!(store.history().len(), 1);
}

#[test]
fn presets_match_insert_menu() {
    let mut store = store();
    let rect = store.insert_preset(InsertPreset::Rectangle).unwrap();
    let icon = store.insert_preset(InsertPreset::Icon).unwrap();
    let eq = store.insert_preset(InsertPreset::Equation).unwrap();

    match element(&store, rect).kind {
        ElementKind::Shape { shape_type, fill, stroke, .. } => {
            assert_eq!(shape_type, ShapeType::Rectangle);
            assert_eq!(fill, "#F0A500");
            assert_eq!(stroke, "#8a6d00");
        }
        other => panic!("unexpected kind {other:?}"),
    }
    assert_eq!(element(&store, icon).kind, ElementKind::Icon { content: "⭐".into(), font_size: 32.0 });
    match element(&store, eq).kind {
        ElementKind::Textbox { content, font_family, .. } => {
            assert_eq!(content, "<i>E = mc^2</i>");
            assert_eq!(font_family, "Times New Roman");
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn preset_tags_are_kebab_case() {
    let preset: InsertPreset = serde_json::from_value(serde_json::json!("word-art")).unwrap();
    assert_eq!(preset, InsertPreset::WordArt);
    assert_eq!(serde_json::to_value(InsertPreset::TextBox).unwrap(), serde_json::json!("text-box"));
}

#[test]
fn later_elements_draw_on_top() {
    let mut store = store();
    let first = store.add_textbox().unwrap();
    let second = store.insert_preset(InsertPreset::Rectangle).unwrap();
    let ids: Vec<EntityId> = store.current_slide().unwrap().elements.iter().map(|e| e.id).collect();
    assert_eq!(ids, [first, second]);
}

// =============================================================
// Editing
// =============================================================

#[test]
fn update_element_merges_patch() {
    let mut store = store();
    let id = store.add_textbox().unwrap();
    let patch = ElementPatch { width: Some(320.0), content: Some("<b>Hi</b>".into()), ..ElementPatch::default() };
    assert!(store.update_element(id, &patch));

    let el = element(&store, id);
    assert!((el.width - 320.0).abs() < f64::EPSILON);
    assert!(matches!(el.kind, ElementKind::Textbox { ref content, .. } if content == "<b>Hi</b>"));
}

#[test]
fn update_missing_element_is_noop() {
    let mut store = store();
    store.add_textbox();
    let len = store.history().len();
    assert!(!store.update_element(EntityId(999), &ElementPatch::default()));
    assert_eq!(store.history().len(), len);
}

#[test]
fn move_clamps_to_origin() {
    let mut store = store();
    let id = store.add_textbox().unwrap();
    assert!(store.move_element(id, -30.0, 45.0));
    let el = element(&store, id);
    assert!(el.x.abs() < f64::EPSILON);
    assert!((el.y - 45.0).abs() < f64::EPSILON);
}

#[test]
fn delete_element_removes_only_target() {
    let mut store = store();
    let a = store.add_textbox().unwrap();
    let b = store.add_textbox().unwrap();
    assert!(store.delete_element(a));
    assert!(!store.delete_element(a));
    assert_eq!(element_count(&store), 1);
    assert_eq!(store.current_slide().unwrap().elements[0].id, b);
}

#[test]
fn each_element_edit_is_undoable() {
    let mut store = store();
    let id = store.add_textbox().unwrap();
    store.move_element(id, 10.0, 10.0);
    store.move_element(id, 20.0, 20.0);

    store.undo();
    assert!((element(&store, id).x - 10.0).abs() < f64::EPSILON);
    store.undo();
    assert!((element(&store, id).x - 100.0).abs() < f64::EPSILON);
    store.undo();
    assert_eq!(element_count(&store), 0);
}

// =============================================================
// Clipboard
// =============================================================

#[test]
fn copy_then_paste_offsets_clone() {
    let mut store = store();
    let id = store.add_textbox().unwrap();
    let history = store.history().len();
    assert!(store.copy_element(id));
    assert_eq!(store.history().len(), history);

    let pasted = store.paste_element().unwrap();
    assert_ne!(pasted, id);
    let el = element(&store, pasted);
    assert!((el.x - 112.0).abs() < f64::EPSILON);
    assert!((el.y - 112.0).abs() < f64::EPSILON);
    assert_eq!(el.kind, element(&store, id).kind);
}

#[test]
fn clipboard_is_independent_of_later_edits() {
    let mut store = store();
    let id = store.add_textbox().unwrap();
    store.copy_element(id);
    store.update_element(id, &ElementPatch { content: Some("changed".into()), ..ElementPatch::default() });

    let pasted = store.paste_element().unwrap();
    assert!(matches!(element(&store, pasted).kind, ElementKind::Textbox { ref content, .. } if content == "New text box"));
}

#[test]
fn cut_removes_and_holds_element() {
    let mut store = store();
    let id = store.add_textbox().unwrap();
    assert!(store.cut_element(id));
    assert_eq!(element_count(&store), 0);
    assert_eq!(store.element_clipboard().unwrap().id, id);

    let pasted = store.paste_element().unwrap();
    assert_eq!(element_count(&store), 1);
    assert_ne!(pasted, id);
}

#[test]
fn paste_element_with_empty_clipboard_is_noop() {
    let mut store = store();
    assert!(store.paste_element().is_none());
    assert!(!store.cut_element(EntityId(42)));
    assert_eq!(store.history().len(), 1);
}

#[test]
fn duplicate_element_uses_configured_offset() {
    let config = EditorConfig { paste_offset_px: 30.0, ..EditorConfig::default() };
    let mut store = PresentationStore::new(&config);
    let id = store.add_textbox().unwrap();
    let dup = store.duplicate_element(id).unwrap();
    let el = element(&store, dup);
    assert!((el.x - 130.0).abs() < f64::EPSILON);
    assert!((el.y - 130.0).abs() < f64::EPSILON);
    assert!(store.duplicate_element(EntityId(999)).is_none());
}

#[test]
fn paste_lands_on_selected_slide() {
    let mut store = store();
    let id = store.add_textbox().unwrap();
    store.copy_element(id);
    store.add_slide(crate::doc::LayoutKind::Blank);
    store.paste_element().unwrap();
    assert_eq!(element_count(&store), 1);
    assert_eq!(store.slide(0).unwrap().elements.len(), 1);
}
