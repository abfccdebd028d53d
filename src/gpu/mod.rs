mod buffers;
mod context;
mod render;

pub use buffers::GridBuffers;
pub use context::GpuContext;
pub use render::GridPass;
