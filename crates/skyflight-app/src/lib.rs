//! Skyflight viewer application: frame clock, viewer state and the winit
//! event loop driving them.

pub mod frame_clock;
pub mod platform;
pub mod viewer;
pub mod window;

pub use frame_clock::FrameClock;
pub use platform::{PlatformDirs, PlatformError};
pub use viewer::{FrameSnapshot, Viewer};
pub use window::{AppState, DrawFn, run};
