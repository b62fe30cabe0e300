//! 내보내기 작업 모델
//!
//! 다이얼로그 확인 시 만들어지고 워커가 단독 소유한다.

use crate::utils::error::{ExportError, Result};
use std::path::{Path, PathBuf};

/// 작업 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// 단일 파일
    SingleFile,
    /// 시퀀스 프레임 목록 (최상위 파일만, shallow)
    Sequence,
    /// 디렉토리 트리 전체 (deep)
    DirectoryTree,
}

impl ExportMode {
    pub fn name(&self) -> &'static str {
        match self {
            ExportMode::SingleFile => "Single file",
            ExportMode::Sequence => "Sequence",
            ExportMode::DirectoryTree => "Directory tree",
        }
    }
}

/// 작업 소스
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSource {
    File(PathBuf),
    Files(Vec<PathBuf>),
    Directory(PathBuf),
}

impl ExportSource {
    /// 로그/에러 메시지용 대표 경로
    pub fn display_path(&self) -> PathBuf {
        match self {
            ExportSource::File(path) | ExportSource::Directory(path) => path.clone(),
            ExportSource::Files(files) => files
                .first()
                .and_then(|f| f.parent())
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }
}

/// 진행 중인 내보내기 작업
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub source: ExportSource,
    /// zip이면 최종 `.zip` 파일, 아니면 파일 경로(SingleFile) 또는 대상 디렉토리
    pub output_path: PathBuf,
    pub zip: bool,
    pub mode: ExportMode,
}

impl ExportJob {
    /// 작업 생성
    ///
    /// zip 작업이면 출력 확장자를 `.zip`으로 맞춘다.
    /// zip이 아닌 작업이 `.zip` 출력을 가지면 소스도 zip 파일이어야 한다.
    pub fn new(source: ExportSource, output_path: PathBuf, zip: bool) -> Result<Self> {
        let mode = match &source {
            ExportSource::File(_) => ExportMode::SingleFile,
            ExportSource::Files(files) => {
                if files.is_empty() {
                    return Err(ExportError::InvalidJob(
                        "Sequence has no frames".to_string(),
                    ));
                }
                ExportMode::Sequence
            }
            ExportSource::Directory(_) => ExportMode::DirectoryTree,
        };

        let output_path = if zip {
            output_path.with_extension("zip")
        } else {
            let source_is_zip = matches!(&source, ExportSource::File(p) if has_zip_extension(p));
            if mode == ExportMode::SingleFile && has_zip_extension(&output_path) && !source_is_zip
            {
                return Err(ExportError::InvalidJob(format!(
                    "Output {} has a .zip extension but zipping is disabled",
                    output_path.display()
                )));
            }
            output_path
        };

        Ok(Self {
            source,
            output_path,
            zip,
            mode,
        })
    }

    /// 복사 전에 만들어 두어야 하는 디렉토리
    pub fn output_dir(&self) -> Option<&Path> {
        if !self.zip && self.mode != ExportMode::SingleFile {
            Some(&self.output_path)
        } else {
            self.output_path.parent()
        }
    }
}

pub fn has_zip_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// 작업 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Zipping,
    Copying,
    Complete,
    Error(String),
}

impl ExportState {
    /// 상태 레이블
    pub fn label(&self) -> &'static str {
        match self {
            ExportState::Idle => "Idle...",
            ExportState::Zipping => "Zipping...",
            ExportState::Copying => "Copying...",
            ExportState::Complete => "Complete.",
            ExportState::Error(_) => "ERROR",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportState::Complete | ExportState::Error(_))
    }
}

/// 워커 → UI 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    State(ExportState),
    /// 0-100
    Progress(u8),
}

/// 완료된 작업 요약
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub output_path: PathBuf,
    pub files_copied: usize,
    pub bytes_copied: u64,
    pub zipped: bool,
}
