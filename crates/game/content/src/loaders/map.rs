//! Maze layout loader.
//!
//! Layouts are plain ASCII text, one line per row. See [`game_core::Layout`]
//! for the glyph table.

use std::path::Path;

use game_core::Layout;

use crate::CLASSIC_MAZE;
use crate::loaders::{LoadResult, read_file};

/// Loader for maze layouts.
pub struct MapLoader;

impl MapLoader {
    /// Load a layout from a text file.
    pub fn load(path: &Path) -> LoadResult<Layout> {
        let content = read_file(path)?;
        Layout::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse layout {}: {}", path.display(), e))
    }

    /// The bundled classic maze.
    pub fn classic() -> LoadResult<Layout> {
        Layout::parse(CLASSIC_MAZE)
            .map_err(|e| anyhow::anyhow!("Failed to parse classic layout: {}", e))
    }

    /// Resolve a layout reference: `"classic"` or a path relative to `base`.
    pub fn resolve(reference: &str, base: Option<&Path>) -> LoadResult<Layout> {
        if reference == "classic" {
            return Self::classic();
        }
        match base {
            Some(base) => Self::load(&base.join(reference)),
            None => Self::load(Path::new(reference)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use game_core::{GameConfig, Tile};

    #[test]
    fn classic_maze_has_the_expected_shape() {
        let layout = MapLoader::classic().unwrap();

        assert_eq!(layout.pellet_count(), GameConfig::LEVEL_PELLETS);
        assert_eq!(layout.super_pellets.count(), 4);
        for tile in [
            Tile::new(3, 1),
            Tile::new(3, 26),
            Tile::new(23, 1),
            Tile::new(23, 26),
        ] {
            assert!(layout.super_pellets[tile], "missing super pellet at {tile}");
        }
        assert_eq!(layout.agent, Some(Tile::new(23, 13)));
        assert_eq!(layout.fruit, Some(Tile::new(17, 13)));
        // Side tunnel is open floor on both edges.
        assert!(!layout.walls[Tile::new(14, 0)]);
        assert!(!layout.walls[Tile::new(14, 27)]);
    }

    #[test]
    fn loads_layout_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#####").unwrap();
        writeln!(file, "#P.o#").unwrap();
        writeln!(file, "#####").unwrap();

        let layout = MapLoader::load(file.path()).unwrap();
        assert_eq!(layout.agent, Some(Tile::new(1, 1)));
        assert_eq!(layout.pellet_count(), 2);
    }

    #[test]
    fn reports_bad_glyph_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#?#").unwrap();

        let error = MapLoader::load(file.path()).unwrap_err().to_string();
        assert!(error.contains("unknown layout glyph"));
        assert!(error.contains(&file.path().display().to_string()));
    }
}
