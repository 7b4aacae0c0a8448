//! A reference turtle renderer.
//!
//! The turtle turns pen commands into vector strokes: every continuous
//! pen-down run becomes one [`Stroke`] (a polyline with a color). Pixels are
//! somebody else's job; the SVG writer and the CLI take it from here.
//!
//! Motion uses lyon_geom's euclid vectors, so a forward move is just
//! `position + Vector::from_angle_and_length(heading, distance)`.

use lyon_geom::euclid::Angle;
use lyon_geom::{point, Vector};

use crate::geometry::{bounding_box, signed_area_of_points, Line, Point};
use crate::pen::{Pen, PenSetup};

/// Pen color a fresh turtle draws with.
pub const DEFAULT_PEN_COLOR: &str = "black";

/// Gap between a stroke's ends, relative to its length, still counted as closed.
const CLOSE_TOLERANCE: f64 = 1e-9;

/// One continuous pen-down run.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub points: Vec<Point>,
}

impl Stroke {
    /// Number of straight segments in the stroke.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Iterate the stroke as individual lines.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::between(w[0], w[1]))
    }

    /// Total drawn length.
    pub fn length(&self) -> f64 {
        self.lines().map(|l| l.length()).sum()
    }

    /// Whether the stroke ends where it started.
    pub fn is_closed(&self) -> bool {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return false;
        };
        self.segment_count() >= 3 && first.approx_eq(*last, self.length() * CLOSE_TOLERANCE)
    }

    /// Signed area of a closed stroke: positive counter-clockwise, negative
    /// clockwise. `None` when the stroke is open.
    pub fn signed_area(&self) -> Option<f64> {
        self.is_closed().then(|| signed_area_of_points(&self.points))
    }
}

/// Pen state plus everything drawn so far.
#[derive(Debug, Clone)]
pub struct Turtle {
    position: lyon_geom::Point<f64>,
    /// Degrees, counter-clockwise from +x. Kept in [0, 360).
    heading: f64,
    pen_down: bool,
    color: String,
    strokes: Vec<Stroke>,
    /// Whether the last stroke may still be extended.
    stroke_open: bool,
}

impl Default for Turtle {
    fn default() -> Self {
        Self {
            position: point(0.0, 0.0),
            heading: 0.0,
            pen_down: true,
            color: DEFAULT_PEN_COLOR.to_string(),
            strokes: Vec::new(),
            stroke_open: false,
        }
    }
}

impl Turtle {
    /// A turtle at the origin, facing +x, pen down.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Point {
        Point::new(self.position.x, self.position.y)
    }

    /// Heading in degrees, normalized to [0, 360).
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn pen_color(&self) -> &str {
        &self.color
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn into_strokes(self) -> Vec<Stroke> {
        self.strokes
    }

    /// Number of straight segments drawn across all strokes.
    pub fn segment_count(&self) -> usize {
        self.strokes.iter().map(Stroke::segment_count).sum()
    }

    /// Total length drawn across all strokes.
    pub fn drawn_length(&self) -> f64 {
        self.strokes.iter().map(Stroke::length).sum()
    }

    /// Area enclosed by the closed strokes, regardless of winding.
    ///
    /// `None` when nothing drawn is closed.
    pub fn enclosed_area(&self) -> Option<f64> {
        self.strokes
            .iter()
            .filter_map(Stroke::signed_area)
            .map(f64::abs)
            .reduce(|a, b| a + b)
    }

    /// Bounding box of everything drawn, as (min_x, min_y, max_x, max_y).
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        bounding_box(self.strokes.iter().flat_map(|s| s.points.iter()))
    }

    fn rotate(&mut self, degrees: f64) {
        self.heading = (self.heading + degrees).rem_euclid(360.0);
    }

    fn close_stroke(&mut self) {
        self.stroke_open = false;
    }
}

impl Pen for Turtle {
    fn forward(&mut self, distance: f64) {
        let start = self.position();
        let step = Vector::from_angle_and_length(Angle::degrees(self.heading), distance);
        self.position += step;

        if !self.pen_down {
            return;
        }

        if !self.stroke_open {
            self.strokes.push(Stroke {
                color: self.color.clone(),
                points: vec![start],
            });
            self.stroke_open = true;
        }
        let end = self.position();
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.points.push(end);
        }
    }

    fn turn_left(&mut self, degrees: f64) {
        self.rotate(degrees);
    }

    fn turn_right(&mut self, degrees: f64) {
        self.rotate(-degrees);
    }
}

impl PenSetup for Turtle {
    fn pen_up(&mut self) {
        self.pen_down = false;
        self.close_stroke();
    }

    fn pen_down(&mut self) {
        self.pen_down = true;
    }

    fn teleport(&mut self, x: f64, y: f64) {
        self.position = point(x, y);
        self.close_stroke();
    }

    fn set_heading(&mut self, degrees: f64) {
        self.heading = degrees.rem_euclid(360.0);
    }

    fn set_pen_color(&mut self, color: &str) {
        if self.color != color {
            self.color = color.to_string();
            self.close_stroke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn starts_at_origin_facing_east() {
        let t = Turtle::new();
        assert_eq!(t.position(), Point::new(0.0, 0.0));
        assert_eq!(t.heading(), 0.0);
        assert!(t.is_pen_down());
        assert!(t.strokes().is_empty());
        assert_eq!(t.bounds(), None);
    }

    #[test]
    fn forward_follows_heading() {
        let mut t = Turtle::new();
        t.turn_left(90.0);
        t.forward(10.0);
        assert!(t.position().approx_eq(Point::new(0.0, 10.0), EPS));

        t.turn_right(90.0);
        t.forward(5.0);
        assert!(t.position().approx_eq(Point::new(5.0, 10.0), EPS));
    }

    #[test]
    fn heading_wraps() {
        let mut t = Turtle::new();
        t.turn_right(60.0);
        assert!((t.heading() - 300.0).abs() < EPS);
        t.turn_left(420.0);
        assert!(t.heading().abs() < EPS);
    }

    #[test]
    fn connected_moves_share_one_stroke() {
        let mut t = Turtle::new();
        t.forward(1.0);
        t.turn_left(90.0);
        t.forward(1.0);
        assert_eq!(t.strokes().len(), 1);
        assert_eq!(t.segment_count(), 2);
        assert!((t.strokes()[0].length() - 2.0).abs() < EPS);
    }

    #[test]
    fn pen_up_moves_without_drawing() {
        let mut t = Turtle::new();
        t.forward(1.0);
        t.pen_up();
        t.forward(1.0);
        t.pen_down();
        t.forward(1.0);

        assert_eq!(t.strokes().len(), 2);
        assert!(t.strokes()[1].points[0].approx_eq(Point::new(2.0, 0.0), EPS));
        assert_eq!(t.segment_count(), 2);
    }

    #[test]
    fn teleport_never_draws() {
        let mut t = Turtle::new();
        t.teleport(-200.0, 0.0);
        assert!(t.strokes().is_empty());
        t.forward(10.0);
        t.teleport(50.0, 50.0);
        t.forward(10.0);
        assert_eq!(t.strokes().len(), 2);
        assert_eq!(t.bounds(), Some((-200.0, 0.0, 60.0, 50.0)));
    }

    #[test]
    fn color_change_starts_a_new_stroke() {
        let mut t = Turtle::new();
        t.set_pen_color("blue");
        t.forward(1.0);
        t.set_pen_color("blue");
        t.forward(1.0);
        t.set_pen_color("red");
        t.forward(1.0);

        let colors: Vec<&str> = t.strokes().iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, ["blue", "red"]);
    }

    #[test]
    fn set_heading_is_absolute() {
        let mut t = Turtle::new();
        t.turn_left(45.0);
        t.set_heading(-90.0);
        assert!((t.heading() - 270.0).abs() < EPS);
        t.forward(3.0);
        assert!(t.position().approx_eq(Point::new(0.0, -3.0), EPS));
    }

    #[test]
    fn square_closes_clockwise() {
        let mut t = Turtle::new();
        for _ in 0..4 {
            t.forward(10.0);
            t.turn_right(90.0);
        }
        let stroke = &t.strokes()[0];
        assert!(stroke.is_closed());
        assert!((stroke.signed_area().unwrap() + 100.0).abs() < EPS);
        assert!((t.enclosed_area().unwrap() - 100.0).abs() < EPS);
        assert!((t.drawn_length() - 40.0).abs() < EPS);
    }

    #[test]
    fn open_stroke_has_no_area() {
        let mut t = Turtle::new();
        for _ in 0..3 {
            t.forward(10.0);
            t.turn_right(90.0);
        }
        assert!(!t.strokes()[0].is_closed());
        assert_eq!(t.strokes()[0].signed_area(), None);
        assert_eq!(t.enclosed_area(), None);
        assert!((t.drawn_length() - 30.0).abs() < EPS);
    }
}
