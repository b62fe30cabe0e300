//! 패널별 컨텍스트 추출
//!
//! 각 브라우저 패널의 선택 항목을 `FileContext`로 정규화한다.
//! 필드 그룹마다 따로 읽고, 실패한 그룹은 비워 둔 채 알림만 남기고 계속한다.

use crate::models::file_context::{extension_with_dot, file_stem, FileContext, MenuContext, SourcePaths};
use crate::system::host::HostServices;
use crate::utils::error::Result;
use crate::utils::formatter::today_stamp;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 패널 선택 → 파일 컨텍스트
pub trait ContextProvider {
    fn menu_context(&self) -> MenuContext;

    /// 호스트 데이터에서 컨텍스트 구성 (존재 여부 검사 전)
    fn extract(&self, host: &dyn HostServices) -> FileContext;
}

/// 컨텍스트 추출
///
/// 소스가 존재하지 않으면 내보내기 메뉴를 제공하지 않으므로 `None`.
pub fn provide_context(
    provider: &dyn ContextProvider,
    host: &dyn HostServices,
) -> Option<FileContext> {
    let mut file = provider.extract(host);
    file.date_stamp = today_stamp();

    if !file.source_exists() {
        debug!(
            "{} source does not exist, export not offered",
            provider.menu_context().label()
        );
        return None;
    }
    Some(file)
}

/// 실패해도 전체를 중단하지 않는 읽기
fn guarded<T>(host: &dyn HostServices, what: &str, read: impl FnOnce() -> Result<T>) -> Option<T> {
    match read() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Cannot load {}: {}", what, e);
            host.notify(&format!("Error accessing {what} {e}"));
            None
        }
    }
}

fn fill_project_name(file: &mut FileContext, host: &dyn HostServices) {
    if let Some(project) = guarded(host, "Project Data", || host.project_config()) {
        file.project_name = project.project_name;
    }
}

/// 디렉토리 엔티티 (프로젝트/샷/에셋) 소스 설정
fn set_directory_source(file: &mut FileContext, path: &Path, name: &str) {
    file.source = SourcePaths::Single(path.to_path_buf());
    file.source_dir = path.parent().map(Path::to_path_buf);
    file.source_filename = name.to_string();
    file.extension.clear();
}

/// 프로젝트 위젯
pub struct ProjectPanel {
    /// 프로젝트 설정 파일 (`<프로젝트>/00_Pipeline/pipeline.json`)
    pub config_path: PathBuf,
}

impl ContextProvider for ProjectPanel {
    fn menu_context(&self) -> MenuContext {
        MenuContext::ProjectFiles
    }

    fn extract(&self, host: &dyn HostServices) -> FileContext {
        let mut file = FileContext {
            user: host.user_name(),
            ..FileContext::default()
        };
        fill_project_name(&mut file, host);

        match self.config_path.parent().and_then(Path::parent) {
            Some(project_dir) => {
                let name = project_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| file.project_name.clone());
                set_directory_source(&mut file, project_dir, &name);
            }
            None => {
                warn!("Cannot derive project directory from {}", self.config_path.display());
                host.notify("Error accessing Project Data: invalid config path");
            }
        }
        file
    }
}

/// 샷 브라우저
pub struct ShotPanel {
    pub sequence: String,
    pub shot: String,
    pub path: PathBuf,
}

impl ContextProvider for ShotPanel {
    fn menu_context(&self) -> MenuContext {
        MenuContext::ShotFiles
    }

    fn extract(&self, host: &dyn HostServices) -> FileContext {
        let mut file = FileContext {
            user: host.user_name(),
            sequence: self.sequence.clone(),
            shot: self.shot.clone(),
            ..FileContext::default()
        };
        set_directory_source(&mut file, &self.path, &self.shot);
        fill_project_name(&mut file, host);
        file
    }
}

/// 에셋 브라우저
pub struct AssetPanel {
    pub asset: String,
    pub path: PathBuf,
}

impl ContextProvider for AssetPanel {
    fn menu_context(&self) -> MenuContext {
        MenuContext::AssetFiles
    }

    fn extract(&self, host: &dyn HostServices) -> FileContext {
        let mut file = FileContext {
            user: host.user_name(),
            asset: self.asset.clone(),
            ..FileContext::default()
        };
        set_directory_source(&mut file, &self.path, &self.asset);
        fill_project_name(&mut file, host);
        file
    }
}

/// 씬 파일 브라우저
pub struct SceneFilePanel {
    pub path: PathBuf,
}

impl ContextProvider for SceneFilePanel {
    fn menu_context(&self) -> MenuContext {
        MenuContext::SceneFiles
    }

    fn extract(&self, host: &dyn HostServices) -> FileContext {
        let mut file = FileContext::default();
        let mut scene_path = self.path.clone();

        if let Some(data) = guarded(host, "Scene Data", || host.scenefile_data(&self.path)) {
            file.absorb(&data);
            if let Some(filename) = data.get("filename").and_then(|v| v.as_str()) {
                scene_path = PathBuf::from(filename);
            }
        }
        file.split_source_path(&scene_path);
        fill_project_name(&mut file, host);
        file
    }
}

/// 프로덕트 브라우저 (선택된 버전의 파일)
pub struct ProductPanel {
    pub path: PathBuf,
}

impl ContextProvider for ProductPanel {
    fn menu_context(&self) -> MenuContext {
        MenuContext::ProductFiles
    }

    fn extract(&self, host: &dyn HostServices) -> FileContext {
        let mut file = FileContext::default();
        if let Some(data) = guarded(host, "Product Data", || host.version_info(&self.path)) {
            file.absorb(&data);
        }
        file.split_source_path(&self.path);
        fill_project_name(&mut file, host);
        file
    }
}

/// 미디어 브라우저 (단일 파일 또는 이미지 시퀀스)
pub struct MediaPanel {
    pub frames: Vec<PathBuf>,
    /// 현재 보고 있는 프레임 인덱스
    pub current_frame: usize,
}

impl ContextProvider for MediaPanel {
    fn menu_context(&self) -> MenuContext {
        MenuContext::MediaFiles
    }

    fn extract(&self, host: &dyn HostServices) -> FileContext {
        let mut file = FileContext::default();
        let Some(first) = self.frames.first() else {
            warn!("Media selection has no files");
            return file;
        };

        let mut sequence_name = None;
        if let Some(data) = guarded(host, "File Context Info", || host.version_info(first)) {
            file.absorb(&data);
            sequence_name = data.get("source").and_then(|v| v.as_str()).map(str::to_string);
        }
        if file.project_name.is_empty() {
            fill_project_name(&mut file, host);
        }

        if self.frames.len() < 2 {
            file.split_source_path(first);
            return file;
        }

        let current = &self.frames[self.current_frame.min(self.frames.len() - 1)];
        let current_name = file_name_of(current);
        file.frame_number = extension_with_dot(Path::new(file_stem(&current_name)));
        file.source_filename = sequence_name.unwrap_or_else(|| sequence_pattern(&current_name));
        file.current_frame = Some(current_name);
        file.extension = extension_with_dot(first);
        file.source_dir = first.parent().map(Path::to_path_buf);
        file.source = SourcePaths::Sequence(self.frames.clone());
        file
    }
}

/// 텍스처 라이브러리
pub struct LibraryPanel {
    pub path: PathBuf,
}

impl ContextProvider for LibraryPanel {
    fn menu_context(&self) -> MenuContext {
        MenuContext::LibraryFiles
    }

    fn extract(&self, host: &dyn HostServices) -> FileContext {
        let mut file = FileContext {
            user: host.user_name(),
            ..FileContext::default()
        };
        file.split_source_path(&self.path);
        fill_project_name(&mut file, host);
        file
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 프레임 파일명 → 시퀀스 이름 (`beauty.1001.exr` → `beauty.####.exr`)
pub fn sequence_pattern(frame_name: &str) -> String {
    let ext = extension_with_dot(Path::new(frame_name));
    let stem = file_stem(frame_name);
    match stem.rsplit_once('.') {
        Some((head, digits)) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
            format!("{}.{}{}", head, "#".repeat(digits.len()), ext)
        }
        _ => frame_name.to_string(),
    }
}
