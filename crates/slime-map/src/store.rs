//! Saving and loading barrier maps.
//!
//! Two on-disk forms are supported: JSON (`{"width", "height", "rows"}`)
//! and the plain-text layout from [`crate::layout`].

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use slime_core::Grid;

use crate::layout::{LayoutError, format_layout, parse_layout};

/// Errors raised while reading or writing a map file.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Json(serde_json::Error),
    Layout(LayoutError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "map file: {e}"),
            Self::Json(e) => write!(f, "map file is not valid JSON: {e}"),
            Self::Layout(e) => write!(f, "map file: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Layout(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<LayoutError> for StoreError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

/// Write `grid` as pretty-printed JSON.
pub fn save_json(path: impl AsRef<Path>, grid: &Grid) -> Result<(), StoreError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(grid)?;
    fs::write(path, json)?;
    log::debug!("saved {}x{} map to {}", grid.width(), grid.height(), path.display());
    Ok(())
}

/// Read a grid written by [`save_json`].
pub fn load_json(path: impl AsRef<Path>) -> Result<Grid, StoreError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let grid: Grid = serde_json::from_str(&data)?;
    log::debug!("loaded {}x{} map from {}", grid.width(), grid.height(), path.display());
    Ok(grid)
}

/// Write `grid` as a text layout with a trailing newline.
pub fn save_layout(path: impl AsRef<Path>, grid: &Grid) -> Result<(), StoreError> {
    let mut text = format_layout(grid);
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

/// Read a text layout.
pub fn load_layout(path: impl AsRef<Path>) -> Result<Grid, StoreError> {
    let data = fs::read_to_string(path)?;
    Ok(parse_layout(&data)?)
}

/// Load a map, choosing the form from the extension: `.json` for JSON,
/// anything else for a text layout.
pub fn load(path: impl AsRef<Path>) -> Result<Grid, StoreError> {
    let path = path.as_ref();
    if is_json(path) {
        load_json(path)
    } else {
        load_layout(path)
    }
}

/// Save a map, choosing the form from the extension like [`load`].
pub fn save(path: impl AsRef<Path>, grid: &Grid) -> Result<(), StoreError> {
    let path = path.as_ref();
    if is_json(path) {
        save_json(path, grid)
    } else {
        save_layout(path, grid)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slime_core::Cell;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TempDir {
        path: PathBuf,
    }

    impl TempDir {
        fn new(prefix: &str) -> Self {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos();
            let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
            let mut path = std::env::temp_dir();
            path.push(format!(
                "slime-{prefix}-{}-{nanos}-{counter}",
                std::process::id()
            ));
            fs::create_dir_all(&path).unwrap();
            Self { path }
        }

        fn join(&self, name: &str) -> PathBuf {
            self.path.join(name)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    fn sample() -> Grid {
        let mut g = Grid::new(5, 3);
        g.set_blocked(Cell::new(1, 1), true).unwrap();
        g.set_blocked(Cell::new(4, 2), true).unwrap();
        g
    }

    #[test]
    fn json_round_trip() {
        let tmp = TempDir::new("json");
        let path = tmp.join("map.json");
        save_json(&path, &sample()).unwrap();
        assert_eq!(load_json(&path).unwrap(), sample());
    }

    #[test]
    fn layout_round_trip() {
        let tmp = TempDir::new("layout");
        let path = tmp.join("map.txt");
        save_layout(&path, &sample()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), ".....\n.#...\n....#\n");
        assert_eq!(load_layout(&path).unwrap(), sample());
    }

    #[test]
    fn extension_selects_format() {
        let tmp = TempDir::new("ext");
        let json = tmp.join("a.JSON");
        let text = tmp.join("a.map");
        save(&json, &sample()).unwrap();
        save(&text, &sample()).unwrap();
        assert!(fs::read_to_string(&json).unwrap().contains("\"rows\""));
        assert_eq!(load(&json).unwrap(), load(&text).unwrap());
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = TempDir::new("missing");
        assert!(matches!(
            load_json(tmp.join("nope.json")),
            Err(StoreError::Io(_))
        ));
    }

    #[test]
    fn malformed_files_are_reported() {
        let tmp = TempDir::new("bad");
        let json = tmp.join("bad.json");
        fs::write(&json, r#"{"width":2,"height":1,"rows":["..."]}"#).unwrap();
        assert!(matches!(load_json(&json), Err(StoreError::Json(_))));

        let text = tmp.join("bad.txt");
        fs::write(&text, "..\n.").unwrap();
        assert!(matches!(
            load_layout(&text),
            Err(StoreError::Layout(LayoutError::InconsistentSize { .. }))
        ));
    }
}
