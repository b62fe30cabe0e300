//! zip 아카이브 생성
//!
//! 단일 파일, 시퀀스 프레임 목록, 디렉토리 트리를 deflate zip 하나로 묶는다.

use crate::system::filesystem::{TreeEntry, TreeEntryKind};
use crate::utils::error::{ExportError, Result};
use std::fs::File;
use std::io;
use std::path::{Component, Path};
use tracing::debug;
use zip::write::SimpleFileOptions as ZipFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 아카이브 생성 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZipSummary {
    pub files_zipped: usize,
    pub bytes_zipped: u64,
}

/// 항목들을 zip으로 묶는다.
///
/// 파일 하나를 넣을 때마다 `(완료 파일 수, 전체 파일 수)`로 콜백을 부른다.
/// 디렉토리 항목은 빈 디렉토리 보존용으로 추가되며 진행률에 포함되지 않는다.
pub fn create_zip<F>(output_path: &Path, entries: &[TreeEntry], mut on_file: F) -> Result<ZipSummary>
where
    F: FnMut(usize, usize),
{
    let total_files = entries.iter().filter(|e| e.is_file()).count();
    let file = File::create(output_path).map_err(|e| zip_failed(output_path, &e))?;
    let mut writer = ZipWriter::new(file);
    let options = ZipFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut summary = ZipSummary::default();
    for entry in entries {
        let mut name = archive_entry_name(&entry.relative);
        if name.is_empty() {
            continue;
        }

        match entry.kind {
            TreeEntryKind::Directory => {
                name.push('/');
                writer
                    .add_directory(name, options)
                    .map_err(|e| zip_failed(output_path, &e))?;
            }
            TreeEntryKind::File => {
                writer
                    .start_file(name.clone(), options)
                    .map_err(|e| zip_failed(output_path, &e))?;
                let mut src = File::open(&entry.source).map_err(|e| ExportError::ZipFailed {
                    path: entry.source.clone(),
                    reason: e.to_string(),
                })?;
                let copied = io::copy(&mut src, &mut writer).map_err(|e| ExportError::ZipFailed {
                    path: entry.source.clone(),
                    reason: e.to_string(),
                })?;

                summary.files_zipped += 1;
                summary.bytes_zipped = summary.bytes_zipped.saturating_add(copied);
                debug!("Zipped {}", name);
                on_file(summary.files_zipped, total_files);
            }
        }
    }

    writer.finish().map_err(|e| zip_failed(output_path, &e))?;
    Ok(summary)
}

/// zip 내부 경로 (`/` 구분)
fn archive_entry_name(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(v) => Some(v.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn zip_failed(path: &Path, error: &dyn std::fmt::Display) -> ExportError {
    ExportError::ZipFailed {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::filesystem::FileSystem;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn zip_names(path: &Path) -> Vec<String> {
        let file = File::open(path).expect("open zip");
        let archive = ZipArchive::new(file).expect("read zip");
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn test_create_zip_from_tree_keeps_empty_dirs() {
        let temp = tempdir().expect("create tempdir");
        let root = temp.path().join("asset");
        fs::create_dir_all(root.join("textures")).expect("create dir");
        fs::create_dir_all(root.join("empty")).expect("create dir");
        fs::write(root.join("textures").join("wood.tx"), "tx").expect("write file");
        fs::write(root.join("model.abc"), "abc").expect("write file");

        let entries = FileSystem::new().collect_tree(&root).expect("collect tree");
        let output = temp.path().join("asset.zip");
        let mut progress = Vec::new();
        let summary = create_zip(&output, &entries, |done, total| progress.push((done, total)))
            .expect("create zip");

        assert_eq!(summary.files_zipped, 2);
        assert_eq!(summary.bytes_zipped, 5);
        assert_eq!(progress, vec![(1, 2), (2, 2)]);
        assert_eq!(
            zip_names(&output),
            vec!["empty/", "model.abc", "textures/", "textures/wood.tx"]
        );
    }

    #[test]
    fn test_create_zip_from_frames_is_flat() {
        let temp = tempdir().expect("create tempdir");
        let frames: Vec<PathBuf> = (1001..1004)
            .map(|n| {
                let path = temp.path().join(format!("plate.{n}.exr"));
                fs::write(&path, "exr").expect("write frame");
                path
            })
            .collect();

        let entries = FileSystem::new().collect_files(&frames).expect("collect frames");
        let output = temp.path().join("out").join("plate.zip");
        fs::create_dir_all(output.parent().expect("parent")).expect("create out dir");
        create_zip(&output, &entries, |_, _| {}).expect("create zip");

        assert_eq!(
            zip_names(&output),
            vec!["plate.1001.exr", "plate.1002.exr", "plate.1003.exr"]
        );
    }

    #[test]
    fn test_create_zip_reports_missing_source() {
        let temp = tempdir().expect("create tempdir");
        let entries = vec![TreeEntry {
            kind: TreeEntryKind::File,
            source: temp.path().join("gone.exr"),
            relative: PathBuf::from("gone.exr"),
            size: 0,
        }];
        let result = create_zip(&temp.path().join("x.zip"), &entries, |_, _| {});
        match result {
            Err(ExportError::ZipFailed { .. }) => {}
            other => panic!("Expected ZipFailed, got {other:?}"),
        }
    }
}
