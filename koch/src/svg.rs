//! SVG output - write turtle strokes as an SVG document.
//!
//! The canvas is centred on the turtle origin, the way a turtle screen is:
//! an 800x600 canvas spans x in [-400, 400] and y in [-300, 300]. Turtle y
//! grows upward and SVG y grows downward, so y is flipped on the way out.
//!
//! Elements are written with quick-xml's `Writer`, which takes care of
//! attribute escaping (titles and color names come from user config).

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::scene::Scene;
use crate::turtle::Stroke;

/// Error type for SVG writing.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("SVG write error: {0}")]
    Write(String),

    #[error("SVG output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Canvas and styling for SVG output.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub width: u32,
    pub height: u32,
    pub background: Option<String>,
    pub stroke_width: f64,
    pub title: Option<String>,
    /// Decimal places written for coordinates
    pub precision: usize,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Some("white".to_string()),
            stroke_width: 1.0,
            title: None,
            precision: 3,
        }
    }
}

impl SvgOptions {
    /// Canvas, background and title taken from a scene.
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            width: scene.width,
            height: scene.height,
            background: Some(scene.background.clone()),
            title: Some(scene.title.clone()),
            ..Self::default()
        }
    }

    /// The `viewBox` attribute value.
    pub fn view_box(&self) -> String {
        let w = self.width as f64;
        let h = self.height as f64;
        format!("{} {} {} {}", -w / 2.0, -h / 2.0, w, h)
    }
}

/// Render strokes to an SVG document string.
pub fn to_svg(strokes: &[Stroke], options: &SvgOptions) -> Result<String, SvgError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let width = options.width.to_string();
    let height = options.height.to_string();
    let view_box = options.view_box();
    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    svg.push_attribute(("width", width.as_str()));
    svg.push_attribute(("height", height.as_str()));
    svg.push_attribute(("viewBox", view_box.as_str()));
    write_event(&mut writer, Event::Start(svg))?;

    if let Some(title) = &options.title {
        write_event(&mut writer, Event::Start(BytesStart::new("title")))?;
        write_event(&mut writer, Event::Text(BytesText::new(title)))?;
        write_event(&mut writer, Event::End(BytesEnd::new("title")))?;
    }

    if let Some(background) = &options.background {
        let (x, y) = (-(options.width as f64) / 2.0, -(options.height as f64) / 2.0);
        let (x, y) = (x.to_string(), y.to_string());
        let mut rect = BytesStart::new("rect");
        rect.push_attribute(("x", x.as_str()));
        rect.push_attribute(("y", y.as_str()));
        rect.push_attribute(("width", width.as_str()));
        rect.push_attribute(("height", height.as_str()));
        rect.push_attribute(("fill", background.as_str()));
        write_event(&mut writer, Event::Empty(rect))?;
    }

    let stroke_width = options.stroke_width.to_string();
    let mut group = BytesStart::new("g");
    group.push_attribute(("fill", "none"));
    group.push_attribute(("stroke-width", stroke_width.as_str()));
    group.push_attribute(("stroke-linecap", "round"));
    group.push_attribute(("stroke-linejoin", "round"));
    write_event(&mut writer, Event::Start(group))?;

    for stroke in strokes {
        if stroke.points.len() < 2 {
            continue;
        }
        let points = points_attribute(stroke, options.precision);
        let mut polyline = BytesStart::new("polyline");
        polyline.push_attribute(("stroke", stroke.color.as_str()));
        polyline.push_attribute(("points", points.as_str()));
        write_event(&mut writer, Event::Empty(polyline))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new("g")))?;
    write_event(&mut writer, Event::End(BytesEnd::new("svg")))?;

    let mut svg = String::from_utf8(writer.into_inner())?;
    svg.push('\n');
    Ok(svg)
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), SvgError> {
    writer
        .write_event(event)
        .map_err(|e| SvgError::Write(e.to_string()))
}

/// Build "x1,y1 x2,y2 ..." in SVG space.
fn points_attribute(stroke: &Stroke, precision: usize) -> String {
    stroke
        .points
        .iter()
        // `+ 0.0` turns -0.0 into 0.0 so the flip never prints "-0.000"
        .map(|p| format!("{:.*},{:.*}", precision, p.x + 0.0, precision, -p.y + 0.0))
        .collect::<Vec<_>>()
        .join(" ")
}
