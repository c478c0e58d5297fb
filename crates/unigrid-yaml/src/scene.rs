//! Scenes: a grid layout plus the boxes it arranges.
//!
//! ```yaml
//! width: 460
//! layout:
//!   h_gap: dynamic
//!   v_gap: 5
//!   insets: 10
//! boxes:
//!   - { label: card, width: 100, height: 50, count: 5 }
//!   - { width: 30, height: 30, visible: false }
//! ```

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use unigrid_core::{GridBox, Size};
use unigrid_layout::{
    AvailableWidth, Container, GridMetrics, LayoutManager, Panel, UniformGridLayout,
};

use crate::config::{pixels, GridLayoutConfig};
use crate::error::ConfigError;

/// One entry of the `boxes` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Label shown in previews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Preferred width
    pub width: i64,
    /// Preferred height
    pub height: i64,
    /// Visibility
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Number of identical boxes this entry expands to
    #[serde(default = "default_count", skip_serializing_if = "is_one")]
    pub count: usize,
}

fn default_visible() -> bool {
    true
}

fn default_count() -> usize {
    1
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_one(count: &usize) -> bool {
    *count == 1
}

impl BoxSpec {
    fn expand(&self, index: usize) -> Result<impl Iterator<Item = GridBox> + '_, ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::invalid(
                format!("boxes[{index}].count"),
                "must be at least 1",
            ));
        }
        let width = pixels(&format!("boxes[{index}].width"), self.width)?;
        let height = pixels(&format!("boxes[{index}].height"), self.height)?;
        Ok((0..self.count).map(move |_| {
            let b = GridBox::new(width, height).with_visible(self.visible);
            match &self.label {
                Some(label) => b.with_label(label.clone()),
                None => b,
            }
        }))
    }
}

impl From<&GridBox> for BoxSpec {
    fn from(b: &GridBox) -> Self {
        Self {
            label: b.label.clone(),
            width: i64::from(b.preferred.width),
            height: i64::from(b.preferred.height),
            visible: b.visible,
            count: 1,
        }
    }
}

/// Scene file as written on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneFile {
    /// Layout settings
    #[serde(default)]
    pub layout: GridLayoutConfig,
    /// Container width; absent means unsized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    /// Boxes in layout order
    #[serde(default)]
    pub boxes: Vec<BoxSpec>,
}

/// A validated scene ready to lay out.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    layout: UniformGridLayout,
    panel: Panel<GridBox>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new(layout: UniformGridLayout) -> Self {
        Self {
            layout,
            panel: Panel::new(),
        }
    }

    /// Parse a scene from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let file: SceneFile = serde_yaml_ng::from_str(yaml)?;
        Self::from_file(&file)
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_yaml(&yaml)?;
        info!("loaded {} boxes from {}", scene.len(), path.display());
        Ok(scene)
    }

    /// Validate a parsed scene file.
    pub fn from_file(file: &SceneFile) -> Result<Self, ConfigError> {
        let layout = file.layout.to_layout()?;
        let width = file.width.map(|w| pixels("width", w)).transpose()?;

        let mut boxes = Vec::new();
        for (index, spec) in file.boxes.iter().enumerate() {
            boxes.extend(spec.expand(index)?);
        }

        Ok(Self {
            layout,
            panel: Panel::with_children(boxes).with_width(width.unwrap_or(0)),
        })
    }

    /// Capture the scene as a file, one entry per box.
    #[must_use]
    pub fn to_file(&self) -> SceneFile {
        let width = self.panel.width();
        SceneFile {
            layout: GridLayoutConfig::from_layout(&self.layout),
            width: (width > 0).then(|| i64::from(width)),
            boxes: self.boxes().iter().map(BoxSpec::from).collect(),
        }
    }

    /// Serialize the scene to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(&self.to_file())?)
    }

    /// The grid layout.
    #[must_use]
    pub const fn layout(&self) -> &UniformGridLayout {
        &self.layout
    }

    /// Mutable grid layout.
    pub fn layout_mut(&mut self) -> &mut UniformGridLayout {
        self.panel.invalidate();
        &mut self.layout
    }

    /// Boxes in layout order.
    #[must_use]
    pub fn boxes(&self) -> &[GridBox] {
        self.panel.children()
    }

    /// Number of boxes, hidden ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes().len()
    }

    /// Whether the scene has no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes().is_empty()
    }

    /// Container width, 0 when unsized.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.panel.width()
    }

    /// Width the layout fills.
    #[must_use]
    pub fn available_width(&self) -> AvailableWidth {
        self.panel.available_width()
    }

    /// Resize the container; 0 leaves it unsized.
    pub fn set_width(&mut self, width: u32) {
        self.panel.set_width(width);
    }

    /// Append a box.
    pub fn push(&mut self, b: GridBox) {
        self.panel.push(b);
    }

    /// Remove and return the box at `index`.
    pub fn remove(&mut self, index: usize) -> Result<GridBox, ConfigError> {
        let len = self.len();
        self.panel
            .remove(index)
            .ok_or(ConfigError::NoSuchBox { index, len })
    }

    /// Change a box's preferred size.
    pub fn resize(&mut self, index: usize, width: u32, height: u32) -> Result<(), ConfigError> {
        self.box_mut(index)?.resize(width, height);
        Ok(())
    }

    /// Show or hide a box.
    pub fn set_visible(&mut self, index: usize, visible: bool) -> Result<(), ConfigError> {
        self.box_mut(index)?.visible = visible;
        Ok(())
    }

    /// Make every box visible.
    pub fn show_all(&mut self) {
        for b in self.panel.children_mut() {
            b.visible = true;
        }
        self.panel.invalidate();
    }

    /// Smallest useful container size.
    #[must_use]
    pub fn minimum_size(&self) -> Size {
        self.layout.minimum_layout_size(&self.panel)
    }

    /// Size the container would like at its current width.
    #[must_use]
    pub fn preferred_size(&self) -> Size {
        self.layout.preferred_layout_size(&self.panel)
    }

    /// Largest size the container can use.
    #[must_use]
    pub fn maximum_size(&self) -> Size {
        self.layout.maximum_layout_size(&self.panel)
    }

    /// Metrics the next layout pass will use.
    #[must_use]
    pub fn metrics(&self) -> GridMetrics {
        self.layout
            .metrics(self.panel.available_width(), self.panel.children())
    }

    /// Assign bounds to every visible box.
    pub fn perform_layout(&mut self) -> GridMetrics {
        self.panel.validate(&mut self.layout);
        let m = self.metrics();
        debug!(
            "scene laid out: {} of {} boxes visible",
            m.visible_count,
            self.len()
        );
        m
    }

    fn box_mut(&mut self, index: usize) -> Result<&mut GridBox, ConfigError> {
        let len = self.len();
        self.panel.invalidate();
        self.panel
            .children_mut()
            .get_mut(index)
            .ok_or(ConfigError::NoSuchBox { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unigrid_core::{Insets, Rect};
    use unigrid_layout::HorizontalGap;

    const EXAMPLE_YAML: &str = r#"
width: 460
layout:
  h_gap: dynamic
  v_gap: 5
  insets: 10
boxes:
  - label: card
    width: 100
    height: 50
    count: 5
"#;

    // =========================================================================
    // Parsing Tests
    // =========================================================================

    #[test]
    fn test_parse_example_scene() {
        let scene = Scene::from_yaml(EXAMPLE_YAML).unwrap();
        assert_eq!(scene.len(), 5);
        assert_eq!(scene.width(), 460);
        assert_eq!(scene.layout().v_gap(), 5);
        assert_eq!(scene.layout().insets(), Insets::uniform(10));
        assert_eq!(scene.boxes()[4].label.as_deref(), Some("card"));
    }

    #[test]
    fn test_parse_minimal_scene() {
        let scene = Scene::from_yaml("boxes: []").unwrap();
        assert!(scene.is_empty());
        assert_eq!(scene.available_width(), AvailableWidth::Unbounded);
        assert_eq!(scene.layout().h_gap(), HorizontalGap::Dynamic);
    }

    #[test]
    fn test_hidden_entry() {
        let scene = Scene::from_yaml("boxes:\n  - { width: 3, height: 4, visible: false }\n").unwrap();
        assert!(!scene.boxes()[0].visible);
        assert_eq!(scene.metrics().visible_count, 0);
    }

    #[test]
    fn test_rejects_zero_count() {
        let err = Scene::from_yaml("boxes:\n  - { width: 3, height: 4, count: 0 }\n").unwrap_err();
        assert!(err.to_string().contains("boxes[0].count"));
    }

    #[test]
    fn test_rejects_negative_dimensions() {
        let err = Scene::from_yaml("boxes:\n  - { width: 3, height: 4 }\n  - { width: -3, height: 4 }\n")
            .unwrap_err();
        assert!(err.to_string().contains("boxes[1].width"));

        let err = Scene::from_yaml("width: -1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "width"));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        assert!(matches!(
            Scene::from_yaml("boxes: [").unwrap_err(),
            ConfigError::Yaml(_)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Scene::load("/nonexistent/scene.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_yaml_round_trip() {
        let scene = Scene::from_yaml(EXAMPLE_YAML).unwrap();
        let yaml = scene.to_yaml().unwrap();
        let reparsed = Scene::from_yaml(&yaml).unwrap();
        assert_eq!(reparsed.len(), 5);
        assert_eq!(reparsed.width(), 460);
        assert_eq!(reparsed.layout().insets(), scene.layout().insets());
        assert!(!yaml.contains("count"));
    }

    // =========================================================================
    // Layout Tests
    // =========================================================================

    #[test]
    fn test_example_layout() {
        let mut scene = Scene::from_yaml(EXAMPLE_YAML).unwrap();
        let m = scene.perform_layout();

        assert_eq!((m.cols, m.rows), (4, 2));
        assert_eq!(scene.boxes()[0].bounds(), Rect::new(18, 10, 100, 50));
        assert_eq!(scene.boxes()[4].bounds(), Rect::new(18, 65, 100, 50));
        assert_eq!(scene.preferred_size(), Size::new(460, 125));
        assert_eq!(scene.minimum_size(), Size::new(136, 290));
        assert_eq!(scene.maximum_size(), Size::UNBOUNDED);
    }

    #[test]
    fn test_box_management() {
        let mut scene = Scene::from_yaml(EXAMPLE_YAML).unwrap();

        scene.set_visible(0, false).unwrap();
        assert_eq!(scene.metrics().visible_count, 4);
        assert_eq!(scene.metrics().rows, 1);

        scene.resize(1, 200, 20).unwrap();
        assert_eq!(scene.metrics().cell, Size::new(200, 50));

        scene.push(GridBox::new(10, 10));
        assert_eq!(scene.len(), 6);

        let removed = scene.remove(1).unwrap();
        assert_eq!(removed.preferred, Size::new(200, 20));

        scene.show_all();
        assert!(scene.boxes().iter().all(|b| b.visible));
    }

    #[test]
    fn test_out_of_range_index() {
        let mut scene = Scene::new(UniformGridLayout::new());
        scene.push(GridBox::new(1, 1));

        let err = scene.resize(3, 1, 1).unwrap_err();
        assert!(matches!(err, ConfigError::NoSuchBox { index: 3, len: 1 }));
        assert!(scene.set_visible(1, true).is_err());
        assert!(scene.remove(1).is_err());
    }

    #[test]
    fn test_set_width_changes_columns() {
        let mut scene = Scene::from_yaml(EXAMPLE_YAML).unwrap();
        scene.set_width(0);
        assert_eq!(scene.perform_layout().cols, 5);

        scene.set_width(240);
        assert_eq!(scene.perform_layout().cols, 2);
    }

    #[test]
    fn test_layout_mut_changes_gap() {
        let mut scene = Scene::from_yaml(EXAMPLE_YAML).unwrap();
        scene.layout_mut().set_h_gap(HorizontalGap::Fixed(0));
        let m = scene.perform_layout();
        assert_eq!(m.leading_gap, 0);
        assert_eq!(scene.boxes()[1].bounds().x, 110);
    }
}
