//! 내보내기 워커
//!
//! 작업 하나당 전용 스레드 하나에서 zip(선택) → 복사 순서로 실행하고,
//! 진행률과 상태를 채널로 UI 스레드에 보낸다.
//!
//! 진행률 구간: zip 작업이면 압축 0–50, 복사 50–100. 아니면 복사 0–100.

use crate::models::export_job::{
    ExportEvent, ExportJob, ExportSource, ExportState, ExportSummary,
};
use crate::system::archive::create_zip;
use crate::system::filesystem::{FileSystem, TreeEntry, TreeEntryKind};
use crate::utils::error::{ExportError, Result};
use crate::utils::formatter::percent_of;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// 전체 진행률 중 한 단계가 차지하는 구간
#[derive(Debug, Clone, Copy)]
struct Phase {
    start: u8,
    span: u8,
}

const FULL: Phase = Phase { start: 0, span: 100 };
const ZIPPING: Phase = Phase { start: 0, span: 50 };
const COPYING_ZIP: Phase = Phase { start: 50, span: 50 };

const STAGING_PREFIX: &str = "ExportTemp_";

struct Reporter<'a> {
    events: &'a Sender<ExportEvent>,
}

impl Reporter<'_> {
    fn state(&self, state: ExportState) {
        let _ = self.events.send(ExportEvent::State(state));
    }

    fn progress(&self, phase: Phase, done: u64, total: u64) {
        let scaled = u16::from(percent_of(done, total)) * u16::from(phase.span) / 100;
        let value = (u16::from(phase.start) + scaled).min(100) as u8;
        let _ = self.events.send(ExportEvent::Progress(value));
    }
}

/// 작업 실행 (호출한 스레드에서)
///
/// 종료 상태(`Complete` 또는 `Error`)는 항상 보낸다.
/// 실패해도 이미 복사된 대상 파일은 지우지 않는다.
pub fn run_export(job: &ExportJob, events: &Sender<ExportEvent>) -> Result<ExportSummary> {
    run_export_staged(job, events, &std::env::temp_dir())
}

/// zip 임시 디렉토리(`ExportTemp_*`)를 `staging_root` 아래에 만든다.
fn run_export_staged(
    job: &ExportJob,
    events: &Sender<ExportEvent>,
    staging_root: &Path,
) -> Result<ExportSummary> {
    info!(
        "Export started: {} -> {} ({}, zip: {})",
        job.source.display_path().display(),
        job.output_path.display(),
        job.mode.name(),
        job.zip
    );

    let reporter = Reporter { events };
    let result = execute(job, &reporter, staging_root);
    match &result {
        Ok(summary) => {
            reporter.state(ExportState::Complete);
            info!(
                "Export complete: {} ({} files, {} bytes)",
                summary.output_path.display(),
                summary.files_copied,
                summary.bytes_copied
            );
        }
        Err(e) => {
            reporter.state(ExportState::Error(e.to_string()));
            warn!("Export failed: {}", e);
        }
    }
    result
}

fn execute(job: &ExportJob, reporter: &Reporter<'_>, staging_root: &Path) -> Result<ExportSummary> {
    let fs = FileSystem::new();
    if let Some(dir) = job.output_dir() {
        fs.ensure_directory(dir)?;
    }

    if job.zip {
        return zip_then_copy(&fs, job, reporter, staging_root);
    }

    reporter.state(ExportState::Copying);
    let (files_copied, bytes_copied) = match &job.source {
        ExportSource::File(src) => {
            let bytes = copy_single(&fs, src, &job.output_path, FULL, reporter)?;
            (1, bytes)
        }
        ExportSource::Files(frames) => {
            let entries = fs.collect_files(frames)?;
            copy_entries(&fs, &entries, &job.output_path, reporter)?
        }
        ExportSource::Directory(root) => {
            let entries = fs.collect_tree(root)?;
            copy_entries(&fs, &entries, &job.output_path, reporter)?
        }
    };

    Ok(ExportSummary {
        output_path: job.output_path.clone(),
        files_copied,
        bytes_copied,
        zipped: false,
    })
}

/// 임시 디렉토리에 zip을 만든 뒤 최종 위치로 복사
///
/// 임시 디렉토리는 성공/실패와 관계없이 이 함수를 벗어날 때 삭제된다.
fn zip_then_copy(
    fs: &FileSystem,
    job: &ExportJob,
    reporter: &Reporter<'_>,
    staging_root: &Path,
) -> Result<ExportSummary> {
    reporter.state(ExportState::Zipping);

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(staging_root)?;
    let zip_name = job
        .output_path
        .file_name()
        .ok_or_else(|| ExportError::InvalidJob("Output path has no file name".to_string()))?;
    let zip_path = staging.path().join(zip_name);
    debug!("Staging archive at {}", zip_path.display());

    let entries = match &job.source {
        ExportSource::File(src) => vec![single_entry(src)?],
        ExportSource::Files(frames) => fs.collect_files(frames)?,
        ExportSource::Directory(root) => fs.collect_tree(root)?,
    };

    let zipped = create_zip(&zip_path, &entries, |done, total| {
        reporter.progress(ZIPPING, done as u64, total as u64);
    })?;
    if zipped.files_zipped == 0 {
        reporter.progress(ZIPPING, 0, 0);
    }

    reporter.state(ExportState::Copying);
    let bytes_copied = copy_single(fs, &zip_path, &job.output_path, COPYING_ZIP, reporter)?;

    if let Err(e) = staging.close() {
        warn!("Failed to remove temporary directory: {}", e);
    }

    Ok(ExportSummary {
        output_path: job.output_path.clone(),
        files_copied: zipped.files_zipped,
        bytes_copied,
        zipped: true,
    })
}

fn single_entry(src: &Path) -> Result<TreeEntry> {
    let metadata = std::fs::metadata(src).map_err(|_| ExportError::PathNotFound {
        path: src.to_path_buf(),
    })?;
    let name = src
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| ExportError::InvalidJob(format!("Invalid source: {}", src.display())))?;
    Ok(TreeEntry {
        kind: TreeEntryKind::File,
        source: src.to_path_buf(),
        relative: name,
        size: metadata.len(),
    })
}

/// 단일 파일 청크 복사 (청크마다 진행률, 빈 파일이면 구간 끝 값 한 번)
fn copy_single(
    fs: &FileSystem,
    src: &Path,
    dest: &Path,
    phase: Phase,
    reporter: &Reporter<'_>,
) -> Result<u64> {
    debug!("Copying {}", src.display());
    let copied = fs.copy_file_chunked(src, dest, |done, total| {
        reporter.progress(phase, done, total);
    })?;
    if copied == 0 {
        reporter.progress(phase, 0, 0);
    }
    Ok(copied)
}

/// 항목 목록 복사 (파일마다 진행률 한 번, 파일이 없으면 100 한 번)
fn copy_entries(
    fs: &FileSystem,
    entries: &[TreeEntry],
    dest_root: &Path,
    reporter: &Reporter<'_>,
) -> Result<(usize, u64)> {
    let total_files = entries.iter().filter(|e| e.is_file()).count();
    let mut files_copied = 0usize;
    let mut bytes_copied = 0u64;

    for entry in entries {
        let dest = dest_root.join(&entry.relative);
        match entry.kind {
            TreeEntryKind::Directory => fs.ensure_directory(&dest)?,
            TreeEntryKind::File => {
                if let Some(parent) = dest.parent() {
                    fs.ensure_directory(parent)?;
                }
                bytes_copied += fs.copy_file(&entry.source, &dest)?;
                files_copied += 1;
                reporter.progress(FULL, files_copied as u64, total_files as u64);
            }
        }
    }

    if total_files == 0 {
        reporter.progress(FULL, 0, 0);
    }
    Ok((files_copied, bytes_copied))
}

/// 백그라운드 내보내기 스레드 핸들
pub struct ExportWorker {
    events: Receiver<ExportEvent>,
    handle: JoinHandle<Result<ExportSummary>>,
}

impl ExportWorker {
    /// 전용 스레드에서 작업 시작
    pub fn spawn(job: ExportJob) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<ExportEvent>();
        let handle = thread::Builder::new()
            .name("export-worker".to_string())
            .spawn(move || run_export(&job, &tx))?;
        Ok(Self { events: rx, handle })
    }

    /// 지금까지 쌓인 이벤트 (블로킹 없음)
    pub fn try_events(&self) -> Vec<ExportEvent> {
        self.events.try_iter().collect()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 스레드 종료 대기
    pub fn join(self) -> Result<ExportSummary> {
        self.handle
            .join()
            .map_err(|_| ExportError::WorkerPanicked)?
    }

    /// 이벤트를 받으면서 끝까지 대기 (헤드리스 모드)
    pub fn wait<F>(self, mut on_event: F) -> Result<ExportSummary>
    where
        F: FnMut(&ExportEvent),
    {
        for event in self.events.iter() {
            on_event(&event);
        }
        self.join()
    }
}
