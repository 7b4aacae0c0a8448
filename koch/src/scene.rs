//! Scene configuration: the setup around one curve.
//!
//! A scene says where the canvas is, what colors to use, where the pen
//! starts and which curve to draw. Every field has a default, so a partial
//! YAML file (or none at all) gives the classic 800x600 picture of a
//! depth-4 curve 400 units long, drawn in blue from (-200, 0).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::{CurveError, KochCurve};
use crate::geometry::Point;
use crate::pen::PenSetup;
use crate::turtle::Turtle;

/// Errors from scene validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("start position must be finite, got ({x}, {y})")]
    InvalidStart { x: f64, y: f64 },

    #[error("heading must be a finite number of degrees, got {0}")]
    InvalidHeading(f64),

    #[error("invalid curve: {0}")]
    Curve(#[from] CurveError),
}

/// What to draw from the start point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// A single Koch curve.
    #[default]
    Curve,
    /// Three curves closed into a snowflake.
    Snowflake,
}

impl Shape {
    pub fn from_name(name: &str) -> Option<Shape> {
        match name.to_lowercase().as_str() {
            "curve" => Some(Shape::Curve),
            "snowflake" => Some(Shape::Snowflake),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Curve => "curve",
            Shape::Snowflake => "snowflake",
        }
    }
}

/// A complete scene definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Document title
    pub title: String,

    /// Canvas width in pixels, centred on the origin
    pub width: u32,

    /// Canvas height in pixels, centred on the origin
    pub height: u32,

    /// Background color
    pub background: String,

    /// Stroke color
    pub pen_color: String,

    /// Where the pen is placed before drawing
    pub start: Point,

    /// Initial heading in degrees (0 = +x, counter-clockwise)
    pub heading: f64,

    /// Recursion depth
    pub depth: u32,

    /// Length of the curve (or of each snowflake side)
    pub length: f64,

    pub shape: Shape,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            title: "Recursive Fractal Art - Koch Curve".to_string(),
            width: 800,
            height: 600,
            background: "white".to_string(),
            pen_color: "blue".to_string(),
            start: Point::new(-200.0, 0.0),
            heading: 0.0,
            depth: 4,
            length: 400.0,
            shape: Shape::Curve,
        }
    }
}

impl Scene {
    /// Check the canvas, start position, heading and curve parameters.
    pub fn validate(&self) -> Result<KochCurve, SceneError> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.start.x.is_finite() && self.start.y.is_finite()) {
            return Err(SceneError::InvalidStart {
                x: self.start.x,
                y: self.start.y,
            });
        }
        if !self.heading.is_finite() {
            return Err(SceneError::InvalidHeading(self.heading));
        }
        Ok(KochCurve::new(self.depth, self.length)?)
    }

    /// Place and style the pen, then draw the shape.
    ///
    /// Nothing touches the pen unless the scene is valid.
    pub fn draw<P: PenSetup + ?Sized>(&self, pen: &mut P) -> Result<(), SceneError> {
        let curve = self.validate()?;

        pen.pen_up();
        pen.teleport(self.start.x, self.start.y);
        pen.set_heading(self.heading);
        pen.set_pen_color(&self.pen_color);
        pen.pen_down();

        match self.shape {
            Shape::Curve => curve.draw(pen),
            Shape::Snowflake => curve.draw_snowflake(pen),
        }
        Ok(())
    }

    /// Draw the scene on a fresh [`Turtle`].
    pub fn render(&self) -> Result<Turtle, SceneError> {
        let mut turtle = Turtle::new();
        self.draw(&mut turtle)?;
        tracing::info!(
            shape = self.shape.name(),
            depth = self.depth,
            length = self.length,
            segments = turtle.segment_count(),
            "rendered scene"
        );
        Ok(turtle)
    }
}
