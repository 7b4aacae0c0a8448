//! # koch
//!
//! Recursive Koch curve generation over a pen (turtle) abstraction.
//!
//! The generator in [`curve`] only knows the [`Pen`] trait: move forward,
//! turn left, turn right. Everything else here is a pen that does something
//! useful with those commands ([`Turtle`], [`CommandRecorder`]) or glue that
//! gets the result onto a canvas ([`Scene`], [`svg`]).
//!
//! ```
//! use koch::{generate, CommandRecorder};
//!
//! let mut pen = CommandRecorder::new();
//! generate(&mut pen, 2, 90.0).unwrap();
//! assert_eq!(pen.forward_count(), 16);
//! assert_eq!(pen.net_turn(), 0.0);
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod curve;
pub mod geometry;
pub mod pen;
pub mod scene;
pub mod svg;
pub mod turtle;

// Re-export common types at crate root for convenience.
pub use curve::{draw_snowflake, generate, CurveError, KochCommands, KochCurve, MAX_DEPTH};
pub use geometry::{Line, Point};
pub use pen::{replay, CommandRecorder, Pen, PenCommand, PenSetup};
pub use scene::{Scene, SceneError, Shape};
pub use svg::{to_svg, SvgError, SvgOptions};
pub use turtle::{Stroke, Turtle};
