use crate::utils::error::{ExportError, Result};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 단일 파일 복사 청크 크기
pub const COPY_CHUNK_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEntryKind {
    File,
    Directory,
}

/// 트리 순회 결과 항목
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub kind: TreeEntryKind,
    pub source: PathBuf,
    /// 루트 기준 상대 경로
    pub relative: PathBuf,
    pub size: u64,
}

impl TreeEntry {
    pub fn is_file(&self) -> bool {
        self.kind == TreeEntryKind::File
    }
}

/// 파일 시스템 모듈
pub struct FileSystem;

impl FileSystem {
    pub fn new() -> Self {
        Self
    }

    /// 디렉토리 트리 평탄화
    ///
    /// 하위 디렉토리 항목도 포함한다 (빈 디렉토리 유지용).
    /// 디렉토리 안에서는 이름순으로 정렬된다.
    pub fn collect_tree(&self, root: &Path) -> Result<Vec<TreeEntry>> {
        if !root.exists() {
            return Err(ExportError::PathNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(ExportError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let mut result = Vec::new();
        self.collect_directory(root, root, &mut result)?;
        Ok(result)
    }

    fn collect_directory(
        &self,
        base: &Path,
        current: &Path,
        result: &mut Vec<TreeEntry>,
    ) -> Result<()> {
        let mut entries = fs::read_dir(current)?.collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let entry_path = entry.path();
            let relative = entry_path
                .strip_prefix(base)
                .unwrap_or(&entry_path)
                .to_path_buf();
            let metadata = fs::symlink_metadata(&entry_path)?;

            if metadata.file_type().is_symlink() {
                // 심볼릭 링크 디렉토리는 따라가지 않는다
                match fs::metadata(&entry_path) {
                    Ok(target) if target.is_file() => result.push(TreeEntry {
                        kind: TreeEntryKind::File,
                        source: entry_path,
                        relative,
                        size: target.len(),
                    }),
                    _ => debug!("Skipping symlink {}", entry_path.display()),
                }
            } else if metadata.is_dir() {
                result.push(TreeEntry {
                    kind: TreeEntryKind::Directory,
                    source: entry_path.clone(),
                    relative,
                    size: 0,
                });
                self.collect_directory(base, &entry_path, result)?;
            } else if metadata.is_file() {
                result.push(TreeEntry {
                    kind: TreeEntryKind::File,
                    source: entry_path,
                    relative,
                    size: metadata.len(),
                });
            }
        }

        Ok(())
    }

    /// 파일 목록을 평탄한 항목으로 (시퀀스 프레임용)
    pub fn collect_files(&self, files: &[PathBuf]) -> Result<Vec<TreeEntry>> {
        files
            .iter()
            .map(|file| {
                let metadata = fs::metadata(file).map_err(|_| ExportError::PathNotFound {
                    path: file.clone(),
                })?;
                let name = file.file_name().ok_or_else(|| {
                    ExportError::InvalidJob(format!("Invalid frame path: {}", file.display()))
                })?;
                Ok(TreeEntry {
                    kind: TreeEntryKind::File,
                    source: file.clone(),
                    relative: PathBuf::from(name),
                    size: metadata.len(),
                })
            })
            .collect()
    }

    /// 파일 복사 (진행률 없음)
    ///
    /// 반환값: 복사된 바이트 수
    #[allow(clippy::unused_self)]
    pub fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64> {
        check_copy_paths(src, dest)?;
        fs::copy(src, dest).map_err(|e| copy_failed(src, dest, &e))
    }

    /// 청크 단위 파일 복사
    ///
    /// 청크마다 `(복사한 바이트, 전체 바이트)`로 콜백을 부른다.
    /// 빈 파일이면 콜백이 호출되지 않는다.
    #[allow(clippy::unused_self)]
    pub fn copy_file_chunked<F>(&self, src: &Path, dest: &Path, mut on_chunk: F) -> Result<u64>
    where
        F: FnMut(u64, u64),
    {
        check_copy_paths(src, dest)?;

        let total = fs::metadata(src)
            .map_err(|e| copy_failed(src, dest, &e))?
            .len();
        let mut reader = File::open(src).map_err(|e| copy_failed(src, dest, &e))?;
        let mut writer = File::create(dest).map_err(|e| copy_failed(src, dest, &e))?;

        let mut buffer = vec![0u8; COPY_CHUNK_SIZE];
        let mut copied = 0u64;
        loop {
            let read = reader
                .read(&mut buffer)
                .map_err(|e| copy_failed(src, dest, &e))?;
            if read == 0 {
                break;
            }
            writer
                .write_all(&buffer[..read])
                .map_err(|e| copy_failed(src, dest, &e))?;
            copied += read as u64;
            on_chunk(copied, total.max(copied));
        }
        writer.flush().map_err(|e| copy_failed(src, dest, &e))?;

        Ok(copied)
    }

    /// 디렉토리 생성 (이미 있으면 그대로)
    #[allow(clippy::unused_self)]
    pub fn ensure_directory(&self, path: &Path) -> Result<()> {
        if path.exists() && !path.is_dir() {
            return Err(ExportError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        fs::create_dir_all(path)?;
        Ok(())
    }

    /// 하위 디렉토리 목록 (숨김 제외, 대소문자 무시 이름순)
    #[allow(clippy::unused_self)]
    pub fn list_directories(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(ExportError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let mut dirs: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter(|path| {
                !path
                    .file_name()
                    .map(|name| name.to_string_lossy().starts_with('.'))
                    .unwrap_or(true)
            })
            .collect();
        dirs.sort_by_key(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().to_lowercase())
                .unwrap_or_default()
        });
        Ok(dirs)
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn check_copy_paths(src: &Path, dest: &Path) -> Result<()> {
    if !src.is_file() {
        return Err(ExportError::PathNotFound {
            path: src.to_path_buf(),
        });
    }
    if src == dest {
        return Err(ExportError::CopyFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: "Source and destination are the same file".to_string(),
        });
    }
    Ok(())
}

fn copy_failed(src: &Path, dest: &Path, error: &std::io::Error) -> ExportError {
    ExportError::CopyFailed {
        src: src.to_path_buf(),
        dest: dest.to_path_buf(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_directories_sorted_without_files_or_hidden() {
        let temp = TempDir::new().expect("create tempdir");
        for name in ["b_renders", "A_plates", ".cache"] {
            fs::create_dir(temp.path().join(name)).expect("create dir");
        }
        fs::write(temp.path().join("notes.txt"), "x").expect("write file");

        let dirs = FileSystem::new()
            .list_directories(temp.path())
            .expect("list directories");
        let names: Vec<String> = dirs
            .iter()
            .map(|d| d.file_name().expect("name").to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["A_plates", "b_renders"]);

        assert!(FileSystem::new()
            .list_directories(&temp.path().join("notes.txt"))
            .is_err());
    }

    #[test]
    fn test_collect_tree_keeps_empty_directories() {
        let temp = TempDir::new().expect("create tempdir");
        let root = temp.path().join("shot");
        fs::create_dir_all(root.join("empty")).expect("create empty dir");
        fs::create_dir_all(root.join("comp")).expect("create nested dir");
        fs::write(root.join("comp").join("v001.nk"), "nuke").expect("write file");
        fs::write(root.join("notes.txt"), "hi").expect("write file");

        let entries = FileSystem::new().collect_tree(&root).expect("collect tree");
        let relatives: Vec<(TreeEntryKind, PathBuf)> = entries
            .iter()
            .map(|e| (e.kind, e.relative.clone()))
            .collect();

        assert_eq!(
            relatives,
            vec![
                (TreeEntryKind::Directory, PathBuf::from("comp")),
                (TreeEntryKind::File, PathBuf::from("comp/v001.nk")),
                (TreeEntryKind::Directory, PathBuf::from("empty")),
                (TreeEntryKind::File, PathBuf::from("notes.txt")),
            ]
        );
        assert_eq!(entries[1].size, 4);
    }

    #[test]
    fn test_collect_tree_rejects_missing_and_files() {
        let temp = TempDir::new().expect("create tempdir");
        let fs_instance = FileSystem::new();
        match fs_instance.collect_tree(&temp.path().join("missing")) {
            Err(ExportError::PathNotFound { .. }) => {}
            other => panic!("Expected PathNotFound, got {other:?}"),
        }

        let file = temp.path().join("a.txt");
        fs::write(&file, "a").expect("write file");
        match fs_instance.collect_tree(&file) {
            Err(ExportError::NotADirectory { .. }) => {}
            other => panic!("Expected NotADirectory, got {other:?}"),
        }
    }

    #[test]
    fn test_collect_files_uses_file_names() {
        let temp = TempDir::new().expect("create tempdir");
        let frame = temp.path().join("plate.1001.exr");
        fs::write(&frame, "exr").expect("write frame");

        let entries = FileSystem::new()
            .collect_files(std::slice::from_ref(&frame))
            .expect("collect files");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].relative, PathBuf::from("plate.1001.exr"));

        assert!(FileSystem::new()
            .collect_files(&[temp.path().join("plate.1002.exr")])
            .is_err());
    }

    #[test]
    fn test_copy_file_chunked_reports_each_chunk() {
        let temp = TempDir::new().expect("create tempdir");
        let src = temp.path().join("big.bin");
        let dest = temp.path().join("copy.bin");
        let data = vec![7u8; COPY_CHUNK_SIZE * 2 + 10];
        fs::write(&src, &data).expect("write source");

        let mut calls = Vec::new();
        let copied = FileSystem::new()
            .copy_file_chunked(&src, &dest, |done, total| calls.push((done, total)))
            .expect("copy file");

        assert_eq!(copied, data.len() as u64);
        assert_eq!(calls.len(), 3);
        assert_eq!(calls.last(), Some(&(data.len() as u64, data.len() as u64)));
        assert_eq!(fs::read(&dest).expect("read copy"), data);
    }

    #[test]
    fn test_copy_file_chunked_empty_file() {
        let temp = TempDir::new().expect("create tempdir");
        let src = temp.path().join("empty.txt");
        let dest = temp.path().join("out.txt");
        fs::write(&src, "").expect("write source");

        let mut calls = 0;
        let copied = FileSystem::new()
            .copy_file_chunked(&src, &dest, |_, _| calls += 1)
            .expect("copy file");
        assert_eq!(copied, 0);
        assert_eq!(calls, 0);
        assert!(dest.exists());
    }

    #[test]
    fn test_copy_file_same_path_fails() {
        let temp = TempDir::new().expect("create tempdir");
        let src = temp.path().join("a.txt");
        fs::write(&src, "a").expect("write source");

        match FileSystem::new().copy_file(&src, &src) {
            Err(ExportError::CopyFailed { .. }) => {}
            other => panic!("Expected CopyFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_directory() {
        let temp = TempDir::new().expect("create tempdir");
        let fs_instance = FileSystem::new();
        let nested = temp.path().join("a").join("b");

        fs_instance.ensure_directory(&nested).expect("create nested");
        assert!(nested.is_dir());
        fs_instance.ensure_directory(&nested).expect("existing dir is fine");

        let file = temp.path().join("file");
        fs::write(&file, "x").expect("write file");
        assert!(fs_instance.ensure_directory(&file).is_err());
    }
}
