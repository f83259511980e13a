use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use crate::config::{ImageFormat, RenderConfig, StyleConfig};
use crate::error::{Result, VisualsError};
use crate::render::Plot;

/// Output file plus pixel size; picks the backend from the file format.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    path: PathBuf,
    size: (u32, u32),
    format: ImageFormat,
}

impl Figure {
    pub fn new(path: impl Into<PathBuf>, size: (u32, u32), format: ImageFormat) -> Self {
        Self {
            path: path.into(),
            size,
            format,
        }
    }

    /// `<output_dir>/<stem>.<ext>`, creating the directory if needed.
    pub fn in_output_dir(config: &RenderConfig, stem: &str, size: (u32, u32)) -> Result<Self> {
        ensure_output_dir(&config.output_dir)?;
        let file = format!("{stem}.{}", config.format.extension());
        Ok(Self::new(config.output_dir.join(file), size, config.format))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn render<P: Plot>(&self, plot: &P, style: &StyleConfig) -> Result<PathBuf> {
        match self.format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
                plot.draw(&root, style)?;
                root.present()?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
                plot.draw(&root, style)?;
                root.present()?;
            }
        }
        info!(path = %self.path.display(), "saved figure");
        Ok(self.path.clone())
    }
}

/// Create `dir` if missing; fail if it exists as something other than a directory.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| VisualsError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    if !dir.is_dir() {
        return Err(VisualsError::OutputDir {
            path: dir.to_path_buf(),
            source: std::io::Error::other("not a directory"),
        });
    }
    Ok(())
}

/// Build the figure for `stem` and draw `plot` into it.
pub(crate) fn save_plot<P: Plot>(
    config: &RenderConfig,
    stem: &str,
    size: (u32, u32),
    plot: &P,
) -> Result<PathBuf> {
    Figure::in_output_dir(config, stem, size)?.render(plot, &config.style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_that_is_a_file_is_rejected() {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "anomaly_graphs_not_a_dir_{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        fs::write(&path, b"x").unwrap();
        assert!(matches!(
            ensure_output_dir(&path),
            Err(VisualsError::OutputDir { .. })
        ));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn figure_path_uses_format_extension() {
        let dir = std::env::temp_dir().join("anomaly_graphs_figure_ext");
        let mut config = RenderConfig::with_output_dir(&dir);
        config.format = ImageFormat::Svg;
        let fig = Figure::in_output_dir(&config, "roc", (100, 100)).unwrap();
        assert_eq!(fig.path(), dir.join("roc.svg"));
        assert_eq!(fig.size(), (100, 100));
    }
}
