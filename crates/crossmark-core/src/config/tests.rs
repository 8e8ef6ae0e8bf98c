use super::*;
use crate::error::ConfigError;

#[test]
fn default_config_has_expected_values() {
    let mut config = Config::default();
    config.validate();

    assert_eq!(config.target.title, "Rechner");
    assert_eq!(config.target.match_mode(), MatchMode::Substring);
    assert_eq!(config.style.radius, 7);
    assert_eq!(config.style.line_width, 2);
    assert_eq!(config.refresh.interval_ms, 30);
    assert!(!config.surface.interactive);
    assert!(!config.logging.enabled);
}

#[test]
fn partial_toml_uses_defaults_for_missing_sections() {
    // Arrange
    let toml_str = "[target]\ntitle = \"Notepad\"\nexact = true\n";

    // Act
    let config: Config = toml::from_str(toml_str).unwrap();

    // Assert
    assert_eq!(config.target.title, "Notepad");
    assert_eq!(config.target.match_mode(), MatchMode::Exact);
    assert_eq!(config.target.frame, FrameMode::Window);
    assert_eq!(config.style.crosshair, "#00ff00");
    assert_eq!(config.refresh.interval_ms, 30);
}

#[test]
fn validate_clamps_out_of_range_values() {
    let mut config = Config {
        style: StyleConfig {
            radius: 0,
            line_width: 500,
            font_size: 1,
            status_y: -20,
            ..Default::default()
        },
        refresh: RefreshConfig { interval_ms: 0 },
        ..Default::default()
    };

    config.validate();

    assert_eq!(config.style.radius, 1);
    assert_eq!(config.style.line_width, 32);
    assert_eq!(config.style.font_size, 6);
    assert_eq!(config.style.status_y, 0);
    assert_eq!(config.refresh.interval_ms, 5);
}

#[test]
fn invalid_and_transparent_colors_fall_back_to_defaults() {
    // Arrange
    let mut config = Config {
        style: StyleConfig {
            crosshair: "not-a-color".into(),
            snap_line: "#000000".into(),
            text: "#FF0000".into(),
            ..Default::default()
        },
        ..Default::default()
    };

    // Act
    config.validate();

    // Assert
    assert_eq!(config.style.crosshair, "#00ff00");
    assert_eq!(config.style.snap_line, "#ffc000");
    assert_eq!(config.style.text, "#ff0000");
}

#[test]
fn resolve_builds_renderer_style() {
    let mut config: Config =
        toml::from_str("[style]\nradius = 10\nfont = \"Arial\"\nshow_status = false\n").unwrap();
    config.validate();

    let style = config.style.resolve();

    assert_eq!(style.radius, 10);
    assert_eq!(style.font.family, "Arial");
    assert_eq!(style.font.size, 16);
    assert!(!style.show_status);
    assert_eq!(style.crosshair, crate::Color::rgb(0, 0xff, 0));
}

#[test]
fn frame_mode_parses_lowercase() {
    let config: Config = toml::from_str("[target]\nframe = \"visible\"\n").unwrap();
    assert_eq!(config.target.frame, FrameMode::Visible);
}

#[test]
fn template_parses_to_defaults() {
    // Act
    let config: Config = toml::from_str(&template::generate()).unwrap();

    // Assert
    let defaults = Config::default();
    assert_eq!(config.target.title, defaults.target.title);
    assert_eq!(config.style.crosshair, defaults.style.crosshair);
    assert_eq!(config.style.status_lines, defaults.style.status_lines);
    assert_eq!(config.style.radius, defaults.style.radius);
    assert_eq!(config.refresh.interval_ms, defaults.refresh.interval_ms);
    assert_eq!(config.logging.level, defaults.logging.level);
}

#[test]
fn load_from_missing_file_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let err = try_load_from(&path).unwrap_err();
    let config = load_from(&path);

    assert!(err.is_not_found());
    assert_eq!(config.target.title, "Rechner");
}

#[test]
fn load_from_invalid_file_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[style\nradius = ").unwrap();

    assert!(matches!(try_load_from(&path), Err(ConfigError::Parse { .. })));
    assert_eq!(load_from(&path).style.radius, 7);
}

#[test]
fn load_from_validates_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[refresh]\ninterval_ms = 100000\n").unwrap();

    let config = try_load_from(&path).unwrap();

    assert_eq!(config.refresh.interval_ms, 1000);
}

#[test]
fn write_default_refuses_to_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    // Act
    write_default(&path, false).unwrap();
    let second = write_default(&path, false);
    let forced = write_default(&path, true);

    // Assert
    assert!(matches!(second, Err(ConfigError::AlreadyExists { .. })));
    assert!(forced.is_ok());
    assert_eq!(try_load_from(&path).unwrap().style.radius, 7);
}
