use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{Result, VisualsError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FigureConfig {
    #[serde(default = "FigureConfig::default_width")]
    pub width: u32,
    #[serde(default = "FigureConfig::default_height")]
    pub height: u32,
    /// Width used by plots that reserve a legend column on the right.
    #[serde(default = "FigureConfig::default_wide_width")]
    pub wide_width: u32,
    #[serde(default = "FigureConfig::default_heatmap_size")]
    pub heatmap_size: (u32, u32),
}

impl FigureConfig {
    fn default_width() -> u32 {
        1200
    }
    fn default_height() -> u32 {
        800
    }
    fn default_wide_width() -> u32 {
        1500
    }
    fn default_heatmap_size() -> (u32, u32) {
        (2000, 1500)
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            wide_width: Self::default_wide_width(),
            heatmap_size: Self::default_heatmap_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleConfig {
    #[serde(default = "StyleConfig::default_caption_font_size")]
    pub caption_font_size: u32,
    #[serde(default = "StyleConfig::default_label_font_size")]
    pub label_font_size: u32,
    /// Fraction of the figure width given to an outside legend.
    #[serde(default = "StyleConfig::default_legend_fraction")]
    pub legend_fraction: f32,
}

impl StyleConfig {
    fn default_caption_font_size() -> u32 {
        22
    }
    fn default_label_font_size() -> u32 {
        15
    }
    fn default_legend_fraction() -> f32 {
        0.2
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            caption_font_size: Self::default_caption_font_size(),
            label_font_size: Self::default_label_font_size(),
            legend_fraction: Self::default_legend_fraction(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub format: ImageFormat,
    #[serde(default)]
    pub figure: FigureConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: Self::default_output_dir(),
            format: ImageFormat::default(),
            figure: FigureConfig::default(),
            style: StyleConfig::default(),
        }
    }
}

impl RenderConfig {
    fn default_output_dir() -> PathBuf {
        PathBuf::from("target/plots")
    }

    /// Same defaults, writing into `dir`.
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|err| VisualsError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Load `path`, or write a fully commented default file there and return the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.exists() {
            return match Self::load(path) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("{err}. Using defaults.");
                    Self::default()
                }
            };
        }

        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path, comment_out_values(&text)) {
                    warn!("Failed to write default config to {}: {err}", path.display());
                }
            }
            Err(err) => warn!("Failed to serialize default config: {err}"),
        }
        default_cfg
    }
}

/// Keep section headers, comment out every key so the file documents defaults without pinning them.
fn comment_out_values(text: &str) -> String {
    let mut commented = String::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
            commented.push_str(line);
        } else {
            commented.push_str("# ");
            commented.push_str(line);
        }
        commented.push('\n');
    }
    commented
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "anomaly_graphs_config_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    #[test]
    fn load_or_default_writes_defaults_cleanly() {
        let path = unique_path("defaults.toml");
        let cfg = RenderConfig::load_or_default(&path);
        assert_eq!(cfg, RenderConfig::default());

        let written = fs::read_to_string(&path).expect("default config written");
        assert!(written.contains("# output_dir"));
        assert!(written.contains("[figure]"));

        // Commented keys parse back to the same defaults.
        let reparsed = RenderConfig::load(&path).expect("reparse");
        assert_eq!(reparsed, RenderConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_or_default_reads_existing() {
        let path = unique_path("custom.toml");
        fs::write(
            &path,
            "output_dir = \"out/plots\"\nformat = \"svg\"\n[figure]\nwidth = 640\n",
        )
        .unwrap();
        let cfg = RenderConfig::load_or_default(&path);
        assert_eq!(cfg.output_dir, PathBuf::from("out/plots"));
        assert_eq!(cfg.format, ImageFormat::Svg);
        assert_eq!(cfg.figure.width, 640);
        assert_eq!(cfg.figure.height, 800);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_reports_parse_errors() {
        let path = unique_path("broken.toml");
        fs::write(&path, "format = 3\n").unwrap();
        assert!(matches!(
            RenderConfig::load(&path),
            Err(VisualsError::Config { .. })
        ));
        assert_eq!(RenderConfig::load_or_default(&path), RenderConfig::default());
        let _ = fs::remove_file(&path);
    }
}
