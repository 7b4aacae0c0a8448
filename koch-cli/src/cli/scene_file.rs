//! Scene files: YAML descriptions of what to draw.
//!
//! Any field may be left out; missing fields keep the defaults from
//! `koch::Scene`, so a file holding only `depth: 5` is a complete scene.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use koch::Scene;

/// Load a scene from a YAML file.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read scene file {}", path.display()))?;
    let scene = parse_scene(&content)
        .with_context(|| format!("failed to parse scene file {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?scene, "loaded scene");
    Ok(scene)
}

/// Parse a scene from YAML text.
pub fn parse_scene(yaml: &str) -> Result<Scene> {
    // An empty document deserializes to `()`, not to an empty map.
    if yaml.trim().is_empty() {
        return Ok(Scene::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use koch::Shape;
    use std::io::Write;

    #[test]
    fn empty_file_is_default_scene() {
        assert_eq!(parse_scene("").unwrap(), Scene::default());
        assert_eq!(parse_scene("\n  \n").unwrap(), Scene::default());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shape: snowflake\ndepth: 3\nlength: 240\nbackground: black").unwrap();

        let scene = load_scene(file.path()).unwrap();
        assert_eq!(scene.shape, Shape::Snowflake);
        assert_eq!(scene.depth, 3);
        assert_eq!(scene.length, 240.0);
        assert_eq!(scene.background, "black");
        assert_eq!(scene.pen_color, "blue");
    }

    #[test]
    fn unknown_shape_is_an_error() {
        assert!(parse_scene("shape: dragon").is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_scene("/definitely/not/here.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.yaml"));
    }
}
