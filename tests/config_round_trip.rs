use std::fs;
use std::path::PathBuf;

use anomaly_graphs::config::{FigureConfig, StyleConfig};
use anomaly_graphs::{ImageFormat, RenderConfig, VisualsError};

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "anomaly_graphs_config_round_trip_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

fn assert_close(a: f32, b: f32, label: &str) {
    let diff = (a - b).abs();
    assert!(diff <= 1e-6, "{label} mismatch: {a} vs {b}");
}

#[test]
fn custom_config_survives_a_toml_round_trip() {
    let config = RenderConfig {
        output_dir: PathBuf::from("plots/run-7"),
        format: ImageFormat::Svg,
        figure: FigureConfig {
            width: 900,
            height: 600,
            wide_width: 1100,
            heatmap_size: (1000, 800),
        },
        style: StyleConfig {
            caption_font_size: 30,
            label_font_size: 12,
            legend_fraction: 0.25,
        },
    };
    let path = unique_path("custom.toml");
    fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = RenderConfig::load(&path).unwrap();
    assert_eq!(loaded.output_dir, config.output_dir);
    assert_eq!(loaded.format, ImageFormat::Svg);
    assert_eq!(loaded.figure, config.figure);
    assert_eq!(loaded.style.caption_font_size, 30);
    assert_close(loaded.style.legend_fraction, 0.25, "style.legend_fraction");
    let _ = fs::remove_file(&path);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let path = unique_path("partial.toml");
    fs::write(&path, "[style]\nlabel_font_size = 18\n").unwrap();
    let loaded = RenderConfig::load(&path).unwrap();
    assert_eq!(loaded.style.label_font_size, 18);
    assert_eq!(loaded.style.caption_font_size, StyleConfig::default().caption_font_size);
    assert_eq!(loaded.figure, FigureConfig::default());
    assert_eq!(loaded.format, ImageFormat::Png);
    let _ = fs::remove_file(&path);
}

#[test]
fn missing_file_is_an_io_error_for_strict_load() {
    let path = unique_path("absent.toml");
    assert!(matches!(RenderConfig::load(&path), Err(VisualsError::Io(_))));
}

#[test]
fn unknown_format_is_reported() {
    let path = unique_path("bad_format.toml");
    fs::write(&path, "format = \"gif\"\n").unwrap();
    let err = RenderConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("bad_format"));
    assert_eq!(RenderConfig::load_or_default(&path), RenderConfig::default());
    let _ = fs::remove_file(&path);
}
