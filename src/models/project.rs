//! 호스트 프로젝트 설정 스냅샷
//!
//! 호스트의 프로젝트 설정 문서에서 내보내기에 필요한 부분만 읽는다.

use super::settings::ExportLocation;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    pub project_name: String,
    /// 프로젝트 렌더 경로 (설정 문서 순서 유지)
    pub render_paths: Vec<ExportLocation>,
    /// 프로젝트 내보내기 경로
    pub export_paths: Vec<ExportLocation>,
}

impl ProjectConfig {
    /// 설정 문서 해석
    ///
    /// `globals.project_name`, `render_paths`, `export_paths`를 각각 따로 읽는다.
    /// 하나가 없거나 형식이 달라도 나머지는 계속 읽는다.
    pub fn from_value(value: &Value) -> Self {
        let project_name = value
            .pointer("/globals/project_name")
            .and_then(Value::as_str)
            .unwrap_or_else(|| {
                warn!("Project config has no globals.project_name");
                ""
            })
            .to_string();

        Self {
            project_name,
            render_paths: location_table(value, "render_paths"),
            export_paths: location_table(value, "export_paths"),
        }
    }
}

/// `{ "이름": "경로" }` 형태의 테이블 읽기
fn location_table(value: &Value, key: &str) -> Vec<ExportLocation> {
    let Some(table) = value.get(key) else {
        return Vec::new();
    };
    let Some(table) = table.as_object() else {
        warn!("Project config key {key} is not a table");
        return Vec::new();
    };
    table
        .iter()
        .filter_map(|(name, path)| {
            path.as_str()
                .filter(|p| !p.trim().is_empty())
                .map(|p| ExportLocation::new(name.clone(), p))
        })
        .collect()
}
