//! 디렉토리 선택기 상태
//!
//! 목록 읽기는 호스트가 맡고, 여기서는 현재 폴더와 선택 위치만 관리한다.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPicker {
    dir: PathBuf,
    entries: Vec<PathBuf>,
    selected: usize,
}

impl DirectoryPicker {
    pub fn new(dir: PathBuf, entries: Vec<PathBuf>) -> Self {
        Self {
            dir,
            entries,
            selected: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// 목록에 있으면 해당 항목으로 선택 이동 (상위 폴더로 올라온 직후)
    pub fn select_path(&mut self, path: &Path) {
        if let Some(index) = self.entries.iter().position(|entry| entry == path) {
            self.selected = index;
        }
    }

    pub fn selected_entry(&self) -> Option<&Path> {
        self.entries.get(self.selected).map(PathBuf::as_path)
    }

    /// Enter로 고를 폴더: 선택 항목, 하위 폴더가 없으면 현재 폴더
    pub fn choice(&self) -> &Path {
        self.selected_entry().unwrap_or(&self.dir)
    }
}

/// 표시용 폴더 이름
pub fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 선택기 시작 위치: 존재하는 가장 가까운 상위 폴더, 없으면 홈 디렉토리
pub fn picker_start(preferred: &Path) -> Option<PathBuf> {
    preferred
        .ancestors()
        .find(|dir| !dir.as_os_str().is_empty() && dir.is_dir())
        .map(Path::to_path_buf)
        .or_else(dirs::home_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn picker() -> DirectoryPicker {
        DirectoryPicker::new(
            PathBuf::from("/mnt/out"),
            vec![PathBuf::from("/mnt/out/a"), PathBuf::from("/mnt/out/b")],
        )
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut picker = picker();
        picker.select_prev();
        assert_eq!(picker.selected(), 0);
        picker.select_next();
        picker.select_next();
        assert_eq!(picker.selected(), 1);
        assert_eq!(picker.choice(), Path::new("/mnt/out/b"));

        picker.select_path(Path::new("/mnt/out/a"));
        assert_eq!(picker.selected(), 0);
        picker.select_path(Path::new("/elsewhere"));
        assert_eq!(picker.selected(), 0);
    }

    #[test]
    fn test_empty_folder_chooses_itself() {
        let picker = DirectoryPicker::new(PathBuf::from("/mnt/out/a"), Vec::new());
        assert!(picker.selected_entry().is_none());
        assert_eq!(picker.choice(), Path::new("/mnt/out/a"));
        assert_eq!(entry_name(picker.dir()), "a");
    }

    #[test]
    fn test_picker_start_uses_nearest_existing_folder() {
        let temp = tempdir().expect("create tempdir");
        let missing = temp.path().join("not").join("yet");
        assert_eq!(picker_start(&missing).as_deref(), Some(temp.path()));
        assert_eq!(picker_start(temp.path()).as_deref(), Some(temp.path()));
    }
}
