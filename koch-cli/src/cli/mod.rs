//! CLI command implementations.
//!
//! - `draw` - Render a scene to SVG, PNG or JSON
//! - `commands` - Print the pen command stream of one curve

pub mod commands;
pub mod common;
pub mod draw;
pub mod render;
pub mod scene_file;

pub use commands::cmd_commands;
pub use draw::cmd_draw;
