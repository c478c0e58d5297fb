//! YAML configuration for unigrid layouts.
//!
//! A scene file describes a [`UniformGridLayout`](unigrid_layout::UniformGridLayout),
//! an optional container width and the boxes to arrange:
//!
//! ```
//! use unigrid_yaml::Scene;
//!
//! let mut scene = Scene::from_yaml("width: 200\nboxes:\n  - { width: 40, height: 20, count: 3 }\n")?;
//! let metrics = scene.perform_layout();
//! assert_eq!(metrics.cols, 3);
//! # Ok::<(), unigrid_yaml::ConfigError>(())
//! ```

mod config;
mod error;
mod scene;

pub use config::{GapSetting, GridLayoutConfig, InsetsSetting, SideInsets};
pub use error::ConfigError;
pub use scene::{BoxSpec, Scene, SceneFile};
