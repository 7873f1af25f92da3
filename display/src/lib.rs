//! The boundary to whatever shows results to a human.
//!
//! The screen is split in two halves: the coordinator draws its results in
//! the top one and the worker draws its network in the bottom one.

mod canvas;
pub mod network;
pub mod panels;

pub use canvas::{Canvas, Color, LogCanvas, Rect};

/// Width of the screen the panels are laid out for.
pub const SCREEN_WIDTH: u32 = 800;
/// Height of the screen the panels are laid out for.
pub const SCREEN_HEIGHT: u32 = 480;
