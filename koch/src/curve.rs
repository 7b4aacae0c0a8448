//! Koch curve generation.
//!
//! One segment of length `L` at depth `n` is drawn as four segments of
//! length `L / 3` at depth `n - 1`, joined by the turns left 60°,
//! right 120°, left 60°. The turns cancel, so the pen leaves a segment with
//! the heading it entered with, and segments compose end to end.
//!
//! ```text
//!            /\
//!           /  \
//!   _______/    \_______
//! ```
//!
//! ## Rust Lesson #14: Recursion vs. an Explicit Stack
//!
//! [`generate`] uses the call stack: short and obviously correct.
//! [`KochCurve::commands`] yields the same stream lazily from a `Vec` used as
//! a work stack, which never grows the call stack and can be stopped early.

use thiserror::Error;

use crate::pen::{Pen, PenCommand};

/// Deepest recursion accepted by the checked entry points.
///
/// 4^10 = 1 048 576 forward moves.
pub const MAX_DEPTH: u32 = 10;

/// Turn into and out of the spike.
pub const SPIKE_ANGLE: f64 = 60.0;

/// Turn at the tip of the spike.
pub const TIP_ANGLE: f64 = 120.0;

/// Turn between the sides of a snowflake.
pub const SNOWFLAKE_CORNER_ANGLE: f64 = 120.0;

/// Invalid curve parameters, detected before any command is issued.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("length must be positive, got {0}")]
    NonPositiveLength(f64),

    #[error("length must be a finite number, got {0}")]
    NonFiniteLength(f64),

    #[error("depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u32, max: u32 },
}

/// Draw one Koch segment of `length` at recursion `depth`.
///
/// The pen ends with the heading it started with, `length` further along
/// that heading. Nothing is issued when the parameters are rejected.
pub fn generate<P: Pen + ?Sized>(pen: &mut P, depth: u32, length: f64) -> Result<(), CurveError> {
    KochCurve::new(depth, length)?.draw(pen);
    Ok(())
}

/// Draw a closed Koch snowflake: three curves joined by 120° right turns.
///
/// The pen comes back to its start point and heading, and the outline is
/// traced clockwise.
pub fn draw_snowflake<P: Pen + ?Sized>(pen: &mut P, depth: u32, side: f64) -> Result<(), CurveError> {
    KochCurve::new(depth, side)?.draw_snowflake(pen);
    Ok(())
}

/// The recursive step. Parameters are trusted here; only the entry points
/// validate.
fn draw_segment<P: Pen + ?Sized>(pen: &mut P, depth: u32, length: f64) {
    if depth == 0 {
        pen.forward(length);
        return;
    }

    let sub = length / 3.0;
    let next = depth - 1;

    draw_segment(pen, next, sub);
    pen.turn_left(SPIKE_ANGLE);
    draw_segment(pen, next, sub);
    pen.turn_right(TIP_ANGLE);
    draw_segment(pen, next, sub);
    pen.turn_left(SPIKE_ANGLE);
    draw_segment(pen, next, sub);
}

/// A validated Koch curve request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KochCurve {
    depth: u32,
    length: f64,
}

impl KochCurve {
    /// Validate `depth` and `length`.
    pub fn new(depth: u32, length: f64) -> Result<Self, CurveError> {
        if !length.is_finite() {
            return Err(CurveError::NonFiniteLength(length));
        }
        if length <= 0.0 {
            return Err(CurveError::NonPositiveLength(length));
        }
        if depth > MAX_DEPTH {
            return Err(CurveError::DepthTooLarge { depth, max: MAX_DEPTH });
        }
        Ok(Self { depth, length })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of forward moves a full expansion issues (4^depth).
    pub fn segment_count(&self) -> usize {
        4usize.pow(self.depth)
    }

    /// Number of turns a full expansion issues.
    pub fn turn_count(&self) -> usize {
        // Every expansion adds three turns: (4^depth - 1) / 3 expansions * 3.
        self.segment_count() - 1
    }

    /// Length of each forward move (length / 3^depth).
    pub fn segment_length(&self) -> f64 {
        self.length / 3f64.powi(self.depth as i32)
    }

    /// Issue the full command stream on `pen`.
    pub fn draw<P: Pen + ?Sized>(&self, pen: &mut P) {
        tracing::debug!(
            depth = self.depth,
            length = self.length,
            segments = self.segment_count(),
            "drawing koch curve"
        );
        draw_segment(pen, self.depth, self.length);
    }

    /// Issue three copies of the curve joined by 120° right turns, closing a
    /// snowflake whose sides are this curve.
    pub fn draw_snowflake<P: Pen + ?Sized>(&self, pen: &mut P) {
        tracing::debug!(depth = self.depth, side = self.length, "drawing snowflake");
        for _ in 0..3 {
            self.draw(pen);
            pen.turn_right(SNOWFLAKE_CORNER_ANGLE);
        }
    }

    /// The command stream as a lazy iterator.
    pub fn commands(&self) -> KochCommands {
        KochCommands::new(self.depth, self.length)
    }
}

/// Pending work on the explicit stack.
#[derive(Debug, Clone, Copy)]
enum Work {
    Segment { depth: u32, length: f64 },
    Emit(PenCommand),
}

/// Iterator over the commands of a [`KochCurve`], in the order
/// [`KochCurve::draw`] issues them.
#[derive(Debug, Clone)]
pub struct KochCommands {
    stack: Vec<Work>,
    remaining: usize,
}

impl KochCommands {
    fn new(depth: u32, length: f64) -> Self {
        // Each level leaves at most 6 entries behind the one being expanded.
        let mut stack = Vec::with_capacity(6 * depth as usize + 1);
        stack.push(Work::Segment { depth, length });
        let segments = 4usize.pow(depth);
        Self {
            stack,
            remaining: 2 * segments - 1,
        }
    }
}

impl Iterator for KochCommands {
    type Item = PenCommand;

    fn next(&mut self) -> Option<PenCommand> {
        loop {
            match self.stack.pop()? {
                Work::Emit(command) => {
                    self.remaining -= 1;
                    return Some(command);
                }
                Work::Segment { depth: 0, length } => {
                    self.remaining -= 1;
                    return Some(PenCommand::Forward(length));
                }
                Work::Segment { depth, length } => {
                    let sub = Work::Segment { depth: depth - 1, length: length / 3.0 };
                    // Pushed in reverse so they pop in drawing order.
                    self.stack.extend_from_slice(&[
                        sub,
                        Work::Emit(PenCommand::TurnLeft(SPIKE_ANGLE)),
                        sub,
                        Work::Emit(PenCommand::TurnRight(TIP_ANGLE)),
                        sub,
                        Work::Emit(PenCommand::TurnLeft(SPIKE_ANGLE)),
                        sub,
                    ]);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for KochCommands {}
