//! wgpu device and window surface.
//!
//! [`Gpu`] is created once per window and reconfigured on resize; each frame
//! is a [`GpuFrame`] acquired with `begin_frame` and presented with `submit`.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
