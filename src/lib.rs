//! Landing page effects compiled to WASM.
//!
//! `core` and `input` are plain Rust and build on any target so the host
//! test suite can drive them; everything touching the DOM is `wasm32` only.

pub mod constants;
pub mod core;
pub mod input;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod rain_canvas;
#[cfg(target_arch = "wasm32")]
mod render;
#[cfg(target_arch = "wasm32")]
mod scroll;

#[cfg(target_arch = "wasm32")]
pub use app::{start, unmount};
