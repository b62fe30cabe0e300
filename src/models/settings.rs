//! 설정 데이터 모델 (네이밍 템플릿, 사용자 내보내기 경로, 최근 항목)

use super::file_context::MenuContext;
use super::recents::{RecentEntry, Recents};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 내보내기 위치 (표시 이름, 경로)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLocation {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Path")]
    pub path: String,
}

impl ExportLocation {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// 위치 목록 이동 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// 설정 파일 전체 문서
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "NamingTemplate")]
    pub naming_template: BTreeMap<String, String>,
    #[serde(rename = "ExportPaths")]
    pub export_paths: Vec<ExportLocation>,
    #[serde(rename = "Recents", default)]
    pub recents: Recents,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            naming_template: default_templates(),
            export_paths: Vec::new(),
            recents: Recents::new(),
        }
    }
}

/// 컨텍스트별 기본 템플릿
pub fn default_template(context: MenuContext) -> &'static str {
    match context {
        MenuContext::ProjectFiles => "@PROJECT@--@USER@--@DATE@",
        MenuContext::AssetFiles => "@PROJECT@--@ASSET@--@USER@--@DATE@",
        MenuContext::ShotFiles => "@PROJECT@--@SEQUENCE@-@SHOT@--@DATE@",
        _ => "@PROJECT@--@FILENAME@",
    }
}

pub fn default_templates() -> BTreeMap<String, String> {
    MenuContext::ALL
        .iter()
        .map(|ctx| (ctx.label().to_string(), default_template(*ctx).to_string()))
        .collect()
}

impl Settings {
    pub fn template_for(&self, context: MenuContext) -> Option<&str> {
        self.naming_template
            .get(context.label())
            .map(String::as_str)
    }

    pub fn set_template(&mut self, context: MenuContext, template: impl Into<String>) {
        self.naming_template
            .insert(context.label().to_string(), template.into());
    }

    pub fn reset_templates(&mut self) {
        self.naming_template = default_templates();
    }

    /// 사용자 위치 추가 (이름/경로가 비어 있으면 무시)
    pub fn add_location(&mut self, name: &str, path: &str) -> bool {
        let (name, path) = (name.trim(), path.trim());
        if name.is_empty() || path.is_empty() {
            return false;
        }
        self.export_paths.push(ExportLocation::new(name, path));
        true
    }

    pub fn remove_location(&mut self, index: usize) -> Option<ExportLocation> {
        (index < self.export_paths.len()).then(|| self.export_paths.remove(index))
    }

    /// 위치 순서 변경, 이동된 새 인덱스 반환
    pub fn move_location(&mut self, index: usize, direction: MoveDirection) -> Option<usize> {
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1)?,
            MoveDirection::Down => index + 1,
        };
        if index >= self.export_paths.len() || target >= self.export_paths.len() {
            return None;
        }
        self.export_paths.swap(index, target);
        Some(target)
    }

    pub fn remember(&mut self, entry: RecentEntry) {
        self.recents.remember(entry);
    }

    pub fn recent_for(&self, project_name: &str) -> Option<&RecentEntry> {
        self.recents.find(project_name)
    }
}
