//! Platform abstraction layer
//!
//! Handles browser concerns the simulation must not see:
//! - Held-key input
//! - Sprite loading progress
//! - Canvas sizing from the viewport
//! - Storage (LocalStorage on web)

pub mod assets;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod viewport;

pub use assets::AssetTracker;
pub use input::KeyState;
pub use viewport::canvas_size;
