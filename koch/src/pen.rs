//! The pen contract the curve generator draws through.
//!
//! ## Rust Lesson #12: Traits as Seams
//!
//! A trait is a set of methods a type promises to provide. The generator
//! only asks for `Pen`, so it can draw on a real turtle, on a recorder in
//! tests, or on anything else that can move forward and turn.
//!
//! `Pen` is the hot path (called once per command). `PenSetup` holds the
//! operations a host uses once before generation starts.

use serde::{Deserialize, Serialize};

/// A cursor with a position and a heading.
///
/// Angles are in degrees. `turn_left` is counter-clockwise.
pub trait Pen {
    /// Advance along the current heading, drawing if the pen is down.
    fn forward(&mut self, distance: f64);

    /// Rotate the heading counter-clockwise.
    fn turn_left(&mut self, degrees: f64);

    /// Rotate the heading clockwise.
    fn turn_right(&mut self, degrees: f64);
}

/// Setup-only operations, used to place and style the pen before drawing.
pub trait PenSetup: Pen {
    fn pen_up(&mut self);

    fn pen_down(&mut self);

    /// Jump to an absolute position. Never draws, whatever the pen state.
    fn teleport(&mut self, x: f64, y: f64);

    /// Set the absolute heading in degrees.
    fn set_heading(&mut self, degrees: f64);

    fn set_pen_color(&mut self, color: &str);
}

// Lets callers hand `&mut turtle` to APIs that take `P: Pen` by value.
impl<P: Pen + ?Sized> Pen for &mut P {
    #[inline]
    fn forward(&mut self, distance: f64) {
        (**self).forward(distance);
    }

    #[inline]
    fn turn_left(&mut self, degrees: f64) {
        (**self).turn_left(degrees);
    }

    #[inline]
    fn turn_right(&mut self, degrees: f64) {
        (**self).turn_right(degrees);
    }
}

/// One command in a pen command stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum PenCommand {
    Forward(f64),
    TurnLeft(f64),
    TurnRight(f64),
}

impl PenCommand {
    /// Issue this command on a pen.
    #[inline]
    pub fn apply<P: Pen + ?Sized>(self, pen: &mut P) {
        match self {
            PenCommand::Forward(distance) => pen.forward(distance),
            PenCommand::TurnLeft(degrees) => pen.turn_left(degrees),
            PenCommand::TurnRight(degrees) => pen.turn_right(degrees),
        }
    }

    /// Signed rotation of this command: left positive, right negative.
    #[inline]
    pub fn turn(self) -> f64 {
        match self {
            PenCommand::Forward(_) => 0.0,
            PenCommand::TurnLeft(degrees) => degrees,
            PenCommand::TurnRight(degrees) => -degrees,
        }
    }

    /// Short text form used by the CLI: `F100`, `L60`, `R120`.
    pub fn to_short_string(self) -> String {
        match self {
            PenCommand::Forward(d) => format!("F{}", d),
            PenCommand::TurnLeft(a) => format!("L{}", a),
            PenCommand::TurnRight(a) => format!("R{}", a),
        }
    }
}

/// Replay a command stream onto a pen, in order.
pub fn replay<'a, P, I>(commands: I, pen: &mut P)
where
    P: Pen + ?Sized,
    I: IntoIterator<Item = &'a PenCommand>,
{
    for command in commands {
        command.apply(pen);
    }
}

/// A pen that draws nothing and remembers every command it was given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandRecorder {
    commands: Vec<PenCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, in issue order.
    pub fn commands(&self) -> &[PenCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PenCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of forward moves recorded.
    pub fn forward_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PenCommand::Forward(_)))
            .count()
    }

    /// Sum of all turns, left positive and right negative.
    pub fn net_turn(&self) -> f64 {
        self.commands.iter().map(|c| c.turn()).sum()
    }
}

impl Pen for CommandRecorder {
    fn forward(&mut self, distance: f64) {
        self.commands.push(PenCommand::Forward(distance));
    }

    fn turn_left(&mut self, degrees: f64) {
        self.commands.push(PenCommand::TurnLeft(degrees));
    }

    fn turn_right(&mut self, degrees: f64) {
        self.commands.push(PenCommand::TurnRight(degrees));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_issue_order() {
        let mut pen = CommandRecorder::new();
        pen.forward(10.0);
        pen.turn_left(60.0);
        pen.turn_right(120.0);

        assert_eq!(
            pen.commands(),
            &[
                PenCommand::Forward(10.0),
                PenCommand::TurnLeft(60.0),
                PenCommand::TurnRight(120.0),
            ]
        );
        assert_eq!(pen.forward_count(), 1);
        assert_eq!(pen.net_turn(), -60.0);
    }

    #[test]
    fn replay_reproduces_stream() {
        let original = vec![
            PenCommand::Forward(1.0),
            PenCommand::TurnRight(90.0),
            PenCommand::Forward(2.0),
        ];
        let mut pen = CommandRecorder::new();
        replay(&original, &mut pen);
        assert_eq!(pen.into_commands(), original);
    }

    #[test]
    fn mut_ref_is_a_pen() {
        fn draw_twice<P: Pen>(mut pen: P) {
            pen.forward(1.0);
            pen.forward(1.0);
        }

        let mut recorder = CommandRecorder::new();
        draw_twice(&mut recorder);
        assert_eq!(recorder.forward_count(), 2);
    }

    #[test]
    fn short_strings() {
        assert_eq!(PenCommand::Forward(100.0).to_short_string(), "F100");
        assert_eq!(PenCommand::TurnLeft(60.0).to_short_string(), "L60");
        assert_eq!(PenCommand::TurnRight(120.0).to_short_string(), "R120");
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_string(&PenCommand::TurnLeft(60.0)).unwrap();
        assert_eq!(json, r#"{"op":"turn_left","value":60.0}"#);
    }
}
