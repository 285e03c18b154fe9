//! # LEMMI Rendering
//!
//! Turns one [`FrameView`] into either 2D canvas commands or a 3D scene.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐ capture ┌───────────┐        ┌──────────────────┐
//! │ RunnerState │────────>│ FrameView │───┬───>│ Canvas2dRenderer │──> DrawCommand2d[]
//! └─────────────┘         └───────────┘   │    └──────────────────┘
//!                                         │    ┌──────────────────┐
//!                                         └───>│ Scene3dRenderer  │──> SceneNode[] + InstanceData[]
//!                                              └──────────────────┘
//! ```
//!
//! Both renderers produce plain data. Putting pixels on a screen is left
//! to whatever backend consumes it.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod canvas2d;
pub mod instance;
pub mod scene3d;
pub mod stats;
pub mod view;

pub use canvas2d::{Canvas2dRenderer, CanvasConfig, DrawCommand2d, Rgba};
pub use instance::InstanceData;
pub use scene3d::{NodeRole, Primitive, Scene3dRenderer, SceneConfig, SceneNode, Transform};
pub use stats::RenderStats;
pub use view::{FrameView, ObjectView, PlayerView};

/// A presentation of the runner.
pub trait Renderer {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Produces one frame from a snapshot.
    fn render(&mut self, view: &FrameView) -> RenderStats;
}
