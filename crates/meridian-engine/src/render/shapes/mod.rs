//! Shape renderers. Each one batches the instances of its command type for a
//! frame and draws ranges of them on request from [`SceneRenderer`](crate::render::SceneRenderer).

mod common;

pub mod circle;
pub mod segment;
pub mod text;

pub(crate) use common::logical_clip_to_scissor;
