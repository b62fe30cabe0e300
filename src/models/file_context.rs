//! 파일 컨텍스트 모델
//!
//! 우클릭 한 번마다 새로 만들어지는 내보내기 대상 정보. 저장되지 않는다.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// 메뉴 컨텍스트 (어느 브라우저 패널에서 호출되었는지)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuContext {
    ProjectFiles,
    AssetFiles,
    ShotFiles,
    SceneFiles,
    ProductFiles,
    MediaFiles,
    LibraryFiles,
}

impl MenuContext {
    pub const ALL: [MenuContext; 7] = [
        MenuContext::ProjectFiles,
        MenuContext::AssetFiles,
        MenuContext::ShotFiles,
        MenuContext::SceneFiles,
        MenuContext::ProductFiles,
        MenuContext::MediaFiles,
        MenuContext::LibraryFiles,
    ];

    /// 설정 파일의 네이밍 템플릿 키
    pub fn label(&self) -> &'static str {
        match self {
            MenuContext::ProjectFiles => "Project Files:",
            MenuContext::AssetFiles => "Asset Files:",
            MenuContext::ShotFiles => "Shot Files:",
            MenuContext::SceneFiles => "Scene Files:",
            MenuContext::ProductFiles => "Product Files:",
            MenuContext::MediaFiles => "Media Files:",
            MenuContext::LibraryFiles => "Library Files:",
        }
    }

    /// 레이블 또는 짧은 이름(`scene`, `media` ...)으로 검색
    pub fn from_label(label: &str) -> Option<Self> {
        let needle = label.trim().trim_end_matches(':').to_lowercase();
        Self::ALL.into_iter().find(|ctx| {
            let full = ctx.label().trim_end_matches(':').to_lowercase();
            full == needle || full.split_whitespace().next() == Some(needle.as_str())
        })
    }

    /// 소스가 디렉토리 트리인 컨텍스트 (엔티티 폴더 전체를 내보냄)
    pub fn is_entity_directory(&self) -> bool {
        matches!(
            self,
            MenuContext::ProjectFiles | MenuContext::AssetFiles | MenuContext::ShotFiles
        )
    }
}

/// 소스 경로 (단일 경로 또는 시퀀스 프레임 목록)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourcePaths {
    #[default]
    None,
    Single(PathBuf),
    Sequence(Vec<PathBuf>),
}

impl SourcePaths {
    pub fn first(&self) -> Option<&Path> {
        match self {
            SourcePaths::None => None,
            SourcePaths::Single(path) => Some(path),
            SourcePaths::Sequence(frames) => frames.first().map(PathBuf::as_path),
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, SourcePaths::Sequence(frames) if frames.len() > 1)
    }

    /// 모든 소스 경로가 존재하는지
    pub fn exists(&self) -> bool {
        match self {
            SourcePaths::None => false,
            SourcePaths::Single(path) => path.exists(),
            SourcePaths::Sequence(frames) => {
                !frames.is_empty() && frames.iter().all(|frame| frame.exists())
            }
        }
    }
}

/// 내보내기 대상 파일 정보
///
/// 호스트가 넘겨주는 느슨한 딕셔너리를 필드 단위로 검증해서 채운다.
/// 없는 필드는 빈 문자열로 남는다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContext {
    pub project_name: String,
    pub user: String,
    pub entity_type: String,
    pub sequence: String,
    pub shot: String,
    pub asset: String,
    pub department: String,
    pub task: String,
    pub product: String,
    pub identifier: String,
    pub version: String,
    pub aov: String,
    pub channel: String,
    pub source: SourcePaths,
    pub source_dir: Option<PathBuf>,
    pub source_filename: String,
    /// 시퀀스에서 현재 보고 있는 프레임 파일명
    pub current_frame: Option<String>,
    /// 프레임 번호 (`.1001` 형태, 점 포함)
    pub frame_number: String,
    /// 확장자 (`.exr` 형태, 점 포함)
    pub extension: String,
    /// `@DATE@` 값
    pub date_stamp: String,
}

impl FileContext {
    /// 알려진 키만 골라서 반영한다.
    ///
    /// 문자열이 아닌 값(숫자 등)은 문자열로 변환하고, 배열/객체는 무시한다.
    pub fn absorb(&mut self, data: &Map<String, Value>) {
        let slots: [(&str, &mut String); 14] = [
            ("project_name", &mut self.project_name),
            ("user", &mut self.user),
            ("type", &mut self.entity_type),
            ("sequence", &mut self.sequence),
            ("shot", &mut self.shot),
            ("asset", &mut self.asset),
            ("department", &mut self.department),
            ("task", &mut self.task),
            ("product", &mut self.product),
            ("identifier", &mut self.identifier),
            ("version", &mut self.version),
            ("aov", &mut self.aov),
            ("channel", &mut self.channel),
            ("extension", &mut self.extension),
        ];
        for (key, slot) in slots {
            if let Some(value) = scalar_field(data, key) {
                *slot = value;
            }
        }
        if let Some(value) = scalar_field(data, "sourceFilename") {
            self.source_filename = value;
        }
        if let Some(value) = scalar_field(data, "sourceDir") {
            self.source_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = scalar_field(data, "currentFrame") {
            self.current_frame = Some(value);
        }
        if let Some(value) = scalar_field(data, "frameNumber") {
            self.frame_number = value;
        }
        if let Some(value) = scalar_field(data, "sourcePath") {
            self.source = SourcePaths::Single(PathBuf::from(value));
        }
    }

    /// 단일 소스 경로에서 디렉토리/파일명/확장자를 채운다.
    pub fn split_source_path(&mut self, path: &Path) {
        self.source = SourcePaths::Single(path.to_path_buf());
        self.source_dir = path.parent().map(Path::to_path_buf);
        self.source_filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.extension = extension_with_dot(path);
    }

    pub fn source_exists(&self) -> bool {
        self.source.exists()
    }
}

/// 스칼라 필드 읽기 (문자열/숫자/불리언)
pub fn scalar_field(data: &Map<String, Value>, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `.ext` 형태의 확장자 (없으면 빈 문자열)
pub fn extension_with_dot(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// 마지막 확장자를 뗀 파일명
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}
