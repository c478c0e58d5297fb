//! Integration tests for scene files.

use proptest::prelude::*;
use unigrid_core::{GridBox, Insets, Rect, Size};
use unigrid_layout::{HorizontalGap, LayoutError};
use unigrid_yaml::{ConfigError, GridLayoutConfig, Scene, SceneFile};

const GALLERY_YAML: &str = r#"
width: 200
layout:
  h_gap: 10
  v_gap: 5
  insets: { top: 2, left: 4, bottom: 2, right: 4 }
boxes:
  - { label: wide, width: 80, height: 40 }
  - { label: tall, width: 40, height: 60 }
  - { label: gone, width: 500, height: 500, visible: false }
  - { label: tile, width: 20, height: 20, count: 2 }
"#;

// =============================================================================
// Scene Files
// =============================================================================

#[test]
fn test_gallery_layout() {
    let mut scene = Scene::from_yaml(GALLERY_YAML).expect("valid scene");
    assert_eq!(scene.len(), 5);

    // cell is 80x60; (192 + 10) / 90 = 2 columns
    let m = scene.perform_layout();
    assert_eq!(m.cell, Size::new(80, 60));
    assert_eq!((m.cols, m.rows), (2, 2));

    let bounds: Vec<Rect> = scene.boxes().iter().map(GridBox::bounds).collect();
    assert_eq!(bounds[0], Rect::new(4, 12, 80, 40));
    assert_eq!(bounds[1], Rect::new(114, 2, 40, 60));
    assert_eq!(bounds[2], Rect::default());
    assert_eq!(bounds[3], Rect::new(34, 87, 20, 20));
    assert_eq!(bounds[4], Rect::new(124, 87, 20, 20));
}

#[test]
fn test_unhiding_grows_cell() {
    let mut scene = Scene::from_yaml(GALLERY_YAML).expect("valid scene");
    scene.show_all();
    let m = scene.perform_layout();
    assert_eq!(m.cell, Size::new(500, 500));
    assert_eq!(m.cols, 1);
    assert_eq!(scene.preferred_size(), Size::new(508, 5 * 500 + 4 * 5 + 4));
}

#[test]
fn test_scene_file_edits_survive_round_trip() {
    let mut scene = Scene::from_yaml(GALLERY_YAML).expect("valid scene");
    scene.remove(2).expect("box exists");
    scene.set_width(0);

    let file: SceneFile = serde_yaml_ng::from_str(&scene.to_yaml().expect("serialize")).expect("parse");
    assert_eq!(file.width, None);
    assert_eq!(file.boxes.len(), 4);
    assert_eq!(file.boxes[0].label.as_deref(), Some("wide"));
    assert_eq!(file.layout.to_layout().expect("valid").insets(), Insets::new(2, 4, 2, 4));
}

#[test]
fn test_negative_inset_names_side() {
    let err = Scene::from_yaml("layout:\n  insets: { right: -5 }\n").expect_err("negative inset");
    match err {
        ConfigError::Layout(LayoutError::Negative { field, value }) => {
            assert_eq!((field, value), ("right", -5));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_negative_box_width_names_field() {
    let err = Scene::from_yaml("boxes:\n  - { width: -5, height: 1 }\n").expect_err("negative width");
    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "boxes[0].width"),
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_config_round_trips(
        gap in proptest::option::of(0u32..500),
        v_gap in 0u32..500,
        sides in (0u32..100, 0u32..100, 0u32..100, 0u32..100),
    ) {
        let h_gap = gap.map_or(HorizontalGap::Dynamic, HorizontalGap::Fixed);
        let layout = unigrid_layout::UniformGridLayout::new()
            .with_h_gap(h_gap)
            .with_v_gap(v_gap)
            .with_insets(Insets::new(sides.0, sides.1, sides.2, sides.3));

        let yaml = serde_yaml_ng::to_string(&GridLayoutConfig::from_layout(&layout)).unwrap();
        let parsed: GridLayoutConfig = serde_yaml_ng::from_str(&yaml).unwrap();
        let rebuilt = parsed.to_layout().unwrap();

        prop_assert_eq!(rebuilt.h_gap(), h_gap);
        prop_assert_eq!(rebuilt.v_gap(), v_gap);
        prop_assert_eq!(rebuilt.insets(), layout.insets());
    }

    #[test]
    fn prop_laid_out_boxes_fit_preferred_size(
        sizes in prop::collection::vec((1u32..120, 1u32..120), 1..30),
        width in 0u32..1000,
    ) {
        let mut scene = Scene::default();
        scene.set_width(width);
        for (w, h) in sizes {
            scene.push(GridBox::new(w, h));
        }

        let _ = scene.perform_layout();
        let preferred = scene.preferred_size();
        for b in scene.boxes() {
            prop_assert!(b.bounds().right() <= preferred.width);
            prop_assert!(b.bounds().bottom() <= preferred.height);
        }
    }
}
