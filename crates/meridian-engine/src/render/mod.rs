//! Rendering layer: turns a [`DrawList`](crate::scene::DrawList) into GPU work.

mod ctx;
mod scene;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene::SceneRenderer;
