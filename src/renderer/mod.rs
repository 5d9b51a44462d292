//! Rendering module
//!
//! The scene draws onto the `Surface` trait. In the browser a `ShapeBatch`
//! tessellates the frame into triangles for the WebGPU pipeline and collects
//! text labels for the page to lay out.

pub mod batch;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use batch::{Label, ShapeBatch};
pub use pipeline::RenderState;
pub use scene::{Palette, draw_frame};
pub use surface::{Color, Surface, TextAlign};
pub use vertex::Vertex;
