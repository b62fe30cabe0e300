use crate::models::export_job::ExportState;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 내보내기 대화상자 색상 테마
///
/// TOML 파일에서 로드하거나 미리 정의된 테마를 사용할 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    // 배경/전경
    pub bg_primary: ColorDef,
    pub fg_primary: ColorDef,
    pub fg_dim: ColorDef,

    // 대화상자
    pub border: ColorDef,
    pub border_focused: ColorDef,
    pub title: ColorDef,
    pub field_bg: ColorDef,
    pub field_read_only: ColorDef,
    pub selected_fg: ColorDef,
    pub selected_bg: ColorDef,

    // 진행률 (진행 중 / 완료 / 오류)
    pub progress_running: ColorDef,
    pub progress_complete: ColorDef,
    pub progress_error: ColorDef,

    // 강조
    pub accent: ColorDef,
    pub warning: ColorDef,
}

/// 색상 정의 (TOML 직렬화/역직렬화 지원)
///
/// Hex 문자열("#1e1e1e") 또는 색상 이름("Red")을 지원합니다.
/// `#`으로 시작하면 Hex, 아니면 이름으로 읽는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorDef {
    Hex(String),
    Named(String),
}

impl ColorDef {
    pub fn to_color(&self) -> Color {
        match self {
            ColorDef::Hex(hex) => parse_hex_color(hex),
            ColorDef::Named(name) => parse_named_color(name),
        }
    }
}

impl From<&str> for ColorDef {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            ColorDef::Hex(s.to_string())
        } else {
            ColorDef::Named(s.to_string())
        }
    }
}

impl From<String> for ColorDef {
    fn from(s: String) -> Self {
        ColorDef::from(s.as_str())
    }
}

impl From<ColorDef> for String {
    fn from(color: ColorDef) -> Self {
        match color {
            ColorDef::Hex(value) | ColorDef::Named(value) => value,
        }
    }
}

fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 && hex.is_ascii() {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color::Rgb(r, g, b)
    } else {
        Color::Reset
    }
}

fn parse_named_color(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

impl Theme {
    /// 상태별 진행률 색상 (진행 중 파랑, 완료 초록, 오류 빨강)
    pub fn progress_color(&self, state: &ExportState) -> Color {
        match state {
            ExportState::Complete => self.progress_complete.to_color(),
            ExportState::Error(_) => self.progress_error.to_color(),
            _ => self.progress_running.to_color(),
        }
    }

    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            bg_primary: "#1e1e1e".into(),
            fg_primary: "#d4d4d4".into(),
            fg_dim: "#808080".into(),

            border: "#3c3c3c".into(),
            border_focused: "#0078d4".into(),
            title: "#ffffff".into(),
            field_bg: "#2d2d30".into(),
            field_read_only: "#5a5a5a".into(),
            selected_fg: "#ffffff".into(),
            selected_bg: "#0078d4".into(),

            progress_running: "#0083c3".into(),
            progress_complete: "#009600".into(),
            progress_error: "#e10000".into(),

            accent: "#0078d4".into(),
            warning: "#ffa500".into(),
        }
    }

    /// Light 테마
    pub fn light() -> Self {
        Theme {
            bg_primary: "#ffffff".into(),
            fg_primary: "#1e1e1e".into(),
            fg_dim: "#6e6e6e".into(),

            border: "#cccccc".into(),
            border_focused: "#0078d4".into(),
            title: "#000000".into(),
            field_bg: "#f3f3f3".into(),
            field_read_only: "#a0a0a0".into(),
            selected_fg: "#000000".into(),
            selected_bg: "#add6ff".into(),

            progress_running: "#0083c3".into(),
            progress_complete: "#009600".into(),
            progress_error: "#e10000".into(),

            accent: "#0078d4".into(),
            warning: "#ff8c00".into(),
        }
    }

    /// 이름(`dark`, `light`) 또는 TOML 파일 경로로 테마 선택
    pub fn resolve(spec: &str) -> Result<Self, anyhow::Error> {
        match spec {
            "dark" => Ok(Self::dark()),
            "light" => Ok(Self::light()),
            path => Self::from_file(Path::new(path)),
        }
    }

    /// TOML 파일에서 테마 로드
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let theme: Theme = toml::from_str(&content)?;
        Ok(theme)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_progress_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.progress_running.to_color(), Color::Rgb(0, 131, 195));
        assert_eq!(theme.progress_complete.to_color(), Color::Rgb(0, 150, 0));
        assert_eq!(theme.progress_error.to_color(), Color::Rgb(225, 0, 0));
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(parse_hex_color("#1e1e1e"), Color::Rgb(30, 30, 30));
        assert_eq!(parse_hex_color("#123"), Color::Reset);
        assert_eq!(parse_named_color("Red"), Color::Red);
        assert_eq!(parse_named_color("unknown"), Color::Reset);
    }

    #[test]
    fn test_non_ascii_hex_is_reset() {
        // 6바이트지만 문자 경계가 2바이트 단위가 아님
        assert_eq!(parse_hex_color("#aééb"), Color::Reset);
    }

    #[test]
    fn test_toml_color_variant_follows_prefix() {
        #[derive(Deserialize)]
        struct Colors {
            hex: ColorDef,
            named: ColorDef,
        }
        let colors: Colors =
            toml::from_str("hex = \"#ff0000\"\nnamed = \"Cyan\"").expect("parse colors");
        assert_eq!(colors.hex, ColorDef::Hex("#ff0000".into()));
        assert_eq!(colors.named, ColorDef::Named("Cyan".into()));
        assert_eq!(colors.named.to_color(), Color::Cyan);
    }

    #[test]
    fn test_resolve_from_toml_file() {
        let temp = tempdir().expect("create tempdir");
        let path = temp.path().join("custom.toml");
        let mut theme = Theme::light();
        theme.accent = "magenta".into();
        fs::write(&path, toml::to_string_pretty(&theme).expect("serialize theme"))
            .expect("write theme");

        let loaded = Theme::resolve(&path.to_string_lossy()).expect("load theme");
        assert_eq!(loaded, theme);
        assert_eq!(loaded.accent.to_color(), Color::Magenta);

        assert_eq!(Theme::resolve("dark").expect("dark"), Theme::dark());
        assert!(Theme::resolve(&temp.path().join("missing.toml").to_string_lossy()).is_err());
    }
}
