use std::{
    collections::HashMap,
    fs,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{bail, ensure, Context, Result};
use json_pretty_compact::PrettyCompactFormatter;
use log::{info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Serializer;

use crate::{canvas::Canvas, state::TilesetConfig};

/// Collision shapes attached to one tile. Generated tilesets never have any.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TileCollisionData {
    pub tile_id: u32,
    pub shapes: Vec<serde_json::Value>,
}

/// Tileset record written next to the image, in the shape the editor's
/// tileset importer reads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TilesetDescriptor {
    pub id: u32,
    pub identifier: String,
    pub texture_path: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub spacing: u32,
    pub padding: u32,
    pub collision_data: HashMap<u32, TileCollisionData>,
}

impl TilesetDescriptor {
    pub fn from_config(config: &TilesetConfig) -> Self {
        let path = &config.output_path;
        TilesetDescriptor {
            id: 0,
            identifier: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            texture_path: path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            tile_width: config.tile_size,
            tile_height: config.tile_size,
            columns: config.grid_size,
            rows: config.grid_size,
            spacing: 0,
            padding: 0,
            collision_data: HashMap::new(),
        }
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    let parent = path.parent().context("invalid parent directory")?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Unable to create directory {}", parent.display()))?;
    }
    Ok(())
}

// Writes to a sibling temporary file and renames it into place, so a failed
// write never leaves a truncated file at `path`.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    create_parent_dir(path)?;
    let file_name = path
        .file_name()
        .context("output path has no file name")?
        .to_string_lossy();
    let tmp_path: PathBuf = path.with_file_name(format!(".{}.tmp", file_name));
    let result = fs::write(&tmp_path, data)
        .and_then(|_| fs::rename(&tmp_path, path))
        .with_context(|| format!("Unable to write {}", path.display()));
    if result.is_err() && tmp_path.exists() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            warn!("Unable to remove {}: {}", tmp_path.display(), e);
        }
    }
    result
}

pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    info!("Saving {}", path.display());
    let formatter = PrettyCompactFormatter::new();
    let mut data_bytes = vec![];
    let mut ser = Serializer::with_formatter(&mut data_bytes, formatter);
    data.serialize(&mut ser)?;
    write_atomic(path, &data_bytes)
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    info!("Loading {}", path.display());
    let data_bytes =
        fs::read(path).with_context(|| format!("Unable to read {}", path.display()))?;
    let data: T = serde_json::from_slice(&data_bytes)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    Ok(data)
}

pub fn load_config(path: &Path) -> Result<TilesetConfig> {
    load_json(path)
}

pub fn save_descriptor(path: &Path, config: &TilesetConfig) -> Result<()> {
    save_json(path, &TilesetDescriptor::from_config(config))
}

pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>> {
    let mut png_bytes = vec![];
    {
        let mut encoder = png::Encoder::new(&mut png_bytes, canvas.width(), canvas.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(canvas.as_bytes())?;
        writer.finish()?;
    }
    Ok(png_bytes)
}

pub fn save_png(path: &Path, canvas: &Canvas) -> Result<()> {
    info!("Saving {}", path.display());
    let png_bytes = encode_png(canvas)?;
    write_atomic(path, &png_bytes)
}

/// Decodes an 8-bit RGBA PNG back into a canvas.
pub fn load_png(path: &Path) -> Result<Canvas> {
    info!("Loading {}", path.display());
    let file =
        fs::File::open(path).with_context(|| format!("Unable to open {}", path.display()))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder.read_info()?;
    let mut data = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut data)?;
    data.truncate(frame.buffer_size());
    if frame.color_type != png::ColorType::Rgba {
        bail!("expected RGBA image, found {:?}", frame.color_type);
    }
    ensure!(
        frame.bit_depth == png::BitDepth::Eight,
        "expected 8-bit channels, found {:?}",
        frame.bit_depth
    );
    Canvas::from_raw(frame.width, frame.height, data).context("truncated image data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn png_round_trip_keeps_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");
        let mut canvas = Canvas::new(3, 2);
        canvas.set_pixel(0, 0, [1, 2, 3, 4]);
        canvas.set_pixel(2, 1, [255, 0, 128, 255]);
        save_png(&path, &canvas).unwrap();
        let loaded = load_png(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (3, 2));
        assert_eq!(loaded.as_bytes(), canvas.as_bytes());
        assert!(!dir.path().join("nested/.out.png.tmp").exists());
    }

    #[test_log::test]
    fn write_into_file_parent_fails_with_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, b"x").unwrap();
        let path = blocker.join("out.png");
        let err = save_png(&path, &Canvas::new(1, 1)).unwrap_err();
        assert!(err.root_cause().downcast_ref::<std::io::Error>().is_some());
        assert!(!path.exists());
    }

    #[test_log::test]
    fn descriptor_describes_grid() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TilesetConfig::default();
        config.output_path = dir.path().join("test_tileset.png");
        config.grid_size = 8;
        let path = config.descriptor_path();
        save_descriptor(&path, &config).unwrap();
        let descriptor: TilesetDescriptor = load_json(&path).unwrap();
        assert_eq!(descriptor.id, 0);
        assert_eq!(descriptor.identifier, "test_tileset");
        assert_eq!(descriptor.texture_path, "test_tileset.png");
        assert_eq!((descriptor.columns, descriptor.rows), (8, 8));
        assert_eq!((descriptor.tile_width, descriptor.tile_height), (16, 16));
        assert!(descriptor.collision_data.is_empty());
    }

    // Same fields and derives as the editor's tileset record, which has no
    // serde defaults, so every field must be present in the file.
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    enum CollisionShape {
        Rectangle { x: f32, y: f32, width: f32, height: f32 },
        Ellipse { x: f32, y: f32, rx: f32, ry: f32 },
        Point { x: f32, y: f32 },
    }

    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct EditorTileCollisionData {
        tile_id: u32,
        shapes: Vec<CollisionShape>,
    }

    #[derive(Deserialize, Debug)]
    struct EditorTilesetData {
        id: u32,
        identifier: String,
        texture_path: String,
        tile_width: u32,
        tile_height: u32,
        columns: u32,
        rows: u32,
        spacing: u32,
        padding: u32,
        collision_data: HashMap<u32, EditorTileCollisionData>,
    }

    #[test_log::test]
    fn descriptor_loads_as_editor_tileset() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TilesetConfig::default();
        config.output_path = dir.path().join("test_tileset.png");
        let path = config.descriptor_path();
        save_descriptor(&path, &config).unwrap();

        let data: EditorTilesetData = load_json(&path).unwrap();
        assert_eq!(data.id, 0);
        assert_eq!(data.identifier, "test_tileset");
        assert_eq!(data.texture_path, "test_tileset.png");
        assert_eq!((data.tile_width, data.tile_height), (16, 16));
        assert_eq!((data.columns, data.rows), (16, 16));
        assert_eq!((data.spacing, data.padding), (0, 0));
        assert!(data.collision_data.is_empty());
    }

    #[test_log::test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tileset.json");
        let mut config = TilesetConfig::default();
        config.tile_size = 32;
        config.labels = false;
        save_json(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test_log::test]
    fn missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("nope.json")).is_err());
    }
}
