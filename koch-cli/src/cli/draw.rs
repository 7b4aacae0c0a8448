//! Draw command implementation.

use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

use koch::{to_svg, Point, Scene, Shape, Stroke, SvgOptions, Turtle};

use super::common::{next_value, parse_depth, parse_number, write_output, OutputFormat};
use super::render::svg_to_png;
use super::scene_file::load_scene;

/// A stroke in JSON output format.
#[derive(Serialize)]
struct JsonStroke<'a> {
    color: &'a str,
    points: &'a [Point],
}

/// Drawing statistics for JSON output.
#[derive(Serialize)]
struct JsonStats {
    strokes: usize,
    segments: usize,
    /// Total drawn length
    length: f64,
    /// Area inside closed strokes (snowflakes)
    #[serde(skip_serializing_if = "Option::is_none")]
    area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<[f64; 4]>,
}

/// JSON output: the scene that was drawn and what it produced.
#[derive(Serialize)]
struct JsonDrawing<'a> {
    scene: &'a Scene,
    stats: JsonStats,
    strokes: Vec<JsonStroke<'a>>,
}

/// Parsed `draw` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawArgs {
    pub scene: Scene,
    pub output: Option<String>,
    pub format: Option<OutputFormat>,
    pub stroke_width: f64,
    pub scale: f64,
}

/// Parse `draw` arguments. `Ok(None)` means help was requested.
pub fn parse_draw_args(args: &[String]) -> Result<Option<DrawArgs>> {
    let mut config_path: Option<&str> = None;
    let mut depth: Option<u32> = None;
    let mut length: Option<f64> = None;
    let mut shape: Option<Shape> = None;
    let mut color: Option<&str> = None;
    let mut background: Option<&str> = None;
    let mut output: Option<String> = None;
    let mut format: Option<OutputFormat> = None;
    let mut stroke_width = 1.0;
    let mut scale = 1.0;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-c" | "--config" => {
                config_path = Some(next_value(args, &mut i, flag)?);
            }
            "-d" | "--depth" => {
                depth = Some(parse_depth(next_value(args, &mut i, flag)?)?);
            }
            "-l" | "--length" => {
                length = Some(parse_number(next_value(args, &mut i, flag)?, "length")?);
            }
            "-o" | "--output" => {
                output = Some(next_value(args, &mut i, flag)?.to_string());
            }
            "-f" | "--format" => {
                let name = next_value(args, &mut i, flag)?;
                format = Some(OutputFormat::from_name(name).ok_or_else(|| {
                    anyhow!("unknown format: {}. Use 'svg', 'png' or 'json'.", name)
                })?);
            }
            "--json" => {
                format = Some(OutputFormat::Json);
            }
            "--shape" => {
                let name = next_value(args, &mut i, flag)?;
                shape = Some(Shape::from_name(name).ok_or_else(|| {
                    anyhow!("unknown shape: {}. Use 'curve' or 'snowflake'.", name)
                })?);
            }
            "--snowflake" => {
                shape = Some(Shape::Snowflake);
            }
            "--color" => {
                color = Some(next_value(args, &mut i, flag)?);
            }
            "--background" => {
                background = Some(next_value(args, &mut i, flag)?);
            }
            "--stroke-width" => {
                stroke_width = parse_number(next_value(args, &mut i, flag)?, "stroke width")?;
            }
            "--scale" => {
                scale = parse_number(next_value(args, &mut i, flag)?, "scale")?;
            }
            "-h" | "--help" => {
                return Ok(None);
            }
            unknown => {
                bail!("unknown option: {}", unknown);
            }
        }
        i += 1;
    }

    // Flags override whatever the scene file says.
    let mut scene = match config_path {
        Some(path) => load_scene(path)?,
        None => Scene::default(),
    };
    if let Some(depth) = depth {
        scene.depth = depth;
    }
    if let Some(length) = length {
        scene.length = length;
    }
    if let Some(shape) = shape {
        scene.shape = shape;
    }
    if let Some(color) = color {
        scene.pen_color = color.to_string();
    }
    if let Some(background) = background {
        scene.background = background.to_string();
    }

    Ok(Some(DrawArgs {
        scene,
        output,
        format,
        stroke_width,
        scale,
    }))
}

/// Execute the draw command.
pub fn cmd_draw(args: &[String]) -> Result<()> {
    let Some(draw) = parse_draw_args(args)? else {
        print_usage();
        return Ok(());
    };

    let format = draw
        .format
        .or_else(|| draw.output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or(OutputFormat::Svg);

    let start = Instant::now();
    let turtle = draw.scene.render().context("cannot draw scene")?;
    tracing::info!(
        "Generated {} segments in {} strokes in {:?}",
        turtle.segment_count(),
        turtle.strokes().len(),
        start.elapsed()
    );

    let bytes = match format {
        OutputFormat::Json => drawing_to_json(&draw.scene, &turtle)?.into_bytes(),
        OutputFormat::Svg => scene_svg(&draw, turtle.strokes())?.into_bytes(),
        OutputFormat::Png => svg_to_png(&scene_svg(&draw, turtle.strokes())?, draw.scale)?,
    };

    write_output(draw.output.as_deref(), &bytes)
}

fn scene_svg(draw: &DrawArgs, strokes: &[Stroke]) -> Result<String> {
    if !(draw.stroke_width.is_finite() && draw.stroke_width > 0.0) {
        bail!("stroke width must be positive, got {}", draw.stroke_width);
    }
    let options = SvgOptions {
        stroke_width: draw.stroke_width,
        ..SvgOptions::from_scene(&draw.scene)
    };
    Ok(to_svg(strokes, &options)?)
}

fn drawing_to_json(scene: &Scene, turtle: &Turtle) -> Result<String> {
    let drawing = JsonDrawing {
        scene,
        stats: JsonStats {
            strokes: turtle.strokes().len(),
            segments: turtle.segment_count(),
            length: turtle.drawn_length(),
            area: turtle.enclosed_area(),
            bounds: turtle
                .bounds()
                .map(|(min_x, min_y, max_x, max_y)| [min_x, min_y, max_x, max_y]),
        },
        strokes: turtle
            .strokes()
            .iter()
            .map(|s| JsonStroke {
                color: &s.color,
                points: &s.points,
            })
            .collect(),
    };
    let mut json = serde_json::to_string_pretty(&drawing)?;
    json.push('\n');
    Ok(json)
}

fn print_usage() {
    eprintln!("Usage: koch draw [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <file>     Scene file (YAML); flags below override it");
    eprintln!("  -d, --depth <n>         Recursion depth (default: 4, max: {})", koch::MAX_DEPTH);
    eprintln!("  -l, --length <n>        Curve length (default: 400)");
    eprintln!("  -o, --output <file>     Output file (default: stdout)");
    eprintln!("  -f, --format <fmt>      svg, png or json (default: from extension, else svg)");
    eprintln!("  --json                  Same as --format json");
    eprintln!("  --shape <name>          curve or snowflake (default: curve)");
    eprintln!("  --snowflake             Same as --shape snowflake");
    eprintln!("  --color <color>         Pen color (default: blue)");
    eprintln!("  --background <color>    Background color (default: white)");
    eprintln!("  --stroke-width <n>      Stroke width (default: 1)");
    eprintln!("  --scale <n>             PNG scale factor (default: 1)");
}
