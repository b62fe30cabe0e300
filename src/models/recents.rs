//! 프로젝트별 최근 내보내기 설정

use serde::{Deserialize, Serialize};

/// 최근 항목 최대 개수
pub const MAX_RECENTS: usize = 5;

/// 출력 폴더 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FolderType {
    #[default]
    Project,
    Custom,
}

/// 최근 항목 (프로젝트 이름 기준 1개)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    #[serde(rename = "ProjectName")]
    pub project_name: String,
    #[serde(rename = "folderType", default)]
    pub folder_type: FolderType,
    /// 선택했던 프로젝트 폴더 표시 레이블
    #[serde(rename = "projectFolder", default)]
    pub project_folder: String,
    #[serde(rename = "customFolder", default)]
    pub custom_folder: String,
    #[serde(rename = "appendFolder", default)]
    pub append_folder: String,
    #[serde(rename = "useZip", default)]
    pub use_zip: bool,
}

/// 최근 항목 목록 (오래된 것부터)
///
/// 파일에서 읽을 때도 `remember`와 같은 규칙(프로젝트당 1개, 최대 개수)을 적용한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RecentEntry>", into = "Vec<RecentEntry>")]
pub struct Recents {
    entries: Vec<RecentEntry>,
}

impl From<Vec<RecentEntry>> for Recents {
    fn from(entries: Vec<RecentEntry>) -> Self {
        let mut recents = Recents::new();
        for entry in entries {
            recents.remember(entry);
        }
        recents
    }
}

impl From<Recents> for Vec<RecentEntry> {
    fn from(recents: Recents) -> Self {
        recents.entries
    }
}

impl Recents {
    pub fn new() -> Self {
        Self::default()
    }

    /// 항목 기록
    ///
    /// 같은 프로젝트 항목은 교체되고, 최대 개수를 넘으면 가장 오래된 항목을 버린다.
    pub fn remember(&mut self, entry: RecentEntry) {
        self.entries
            .retain(|existing| existing.project_name != entry.project_name);
        while self.entries.len() >= MAX_RECENTS {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    pub fn find(&self, project_name: &str) -> Option<&RecentEntry> {
        self.entries
            .iter()
            .find(|entry| entry.project_name == project_name)
    }

    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(project: &str) -> RecentEntry {
        RecentEntry {
            project_name: project.to_string(),
            folder_type: FolderType::Project,
            project_folder: String::new(),
            custom_folder: String::new(),
            append_folder: String::new(),
            use_zip: false,
        }
    }

    #[test]
    fn test_recents_cap_evicts_oldest() {
        let mut recents = Recents::new();
        for name in ["p1", "p2", "p3", "p4", "p5"] {
            recents.remember(entry(name));
        }
        assert_eq!(recents.len(), 5);

        recents.remember(entry("p6"));
        assert_eq!(recents.len(), 5);
        assert!(recents.find("p1").is_none());
        assert!(recents.find("p6").is_some());
    }

    #[test]
    fn test_recents_replaces_same_project() {
        let mut recents = Recents::new();
        recents.remember(entry("p1"));
        recents.remember(entry("p2"));

        let mut updated = entry("p1");
        updated.use_zip = true;
        recents.remember(updated);

        assert_eq!(recents.len(), 2);
        assert!(recents.find("p1").unwrap().use_zip);
        // 교체된 항목은 가장 최근 위치로 이동
        assert_eq!(recents.entries().last().unwrap().project_name, "p1");
    }

    #[test]
    fn test_recents_full_list_update_does_not_evict_others() {
        let mut recents = Recents::new();
        for name in ["p1", "p2", "p3", "p4", "p5"] {
            recents.remember(entry(name));
        }
        recents.remember(entry("p3"));
        assert_eq!(recents.len(), 5);
        assert!(recents.find("p1").is_some());
    }

    #[test]
    fn test_loaded_recents_keep_newest_five() {
        let stored: Vec<RecentEntry> = ["p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8"]
            .into_iter()
            .map(entry)
            .collect();
        let json = serde_json::to_string(&stored).unwrap();

        let recents: Recents = serde_json::from_str(&json).unwrap();
        assert_eq!(recents.len(), MAX_RECENTS);
        assert!(recents.find("p3").is_none());
        assert_eq!(recents.entries()[0].project_name, "p4");
        assert_eq!(recents.entries().last().unwrap().project_name, "p8");
    }

    #[test]
    fn test_loaded_recents_collapse_duplicate_projects() {
        let mut older = entry("p1");
        older.use_zip = true;
        let json = serde_json::to_string(&vec![older, entry("p2"), entry("p1")]).unwrap();

        let recents: Recents = serde_json::from_str(&json).unwrap();
        assert_eq!(recents.len(), 2);
        assert!(!recents.find("p1").unwrap().use_zip);
    }

    #[test]
    fn test_recent_entry_json_keys() {
        let json = serde_json::to_value(entry("Foo")).unwrap();
        assert_eq!(json["ProjectName"], "Foo");
        assert_eq!(json["folderType"], "Project");
        assert_eq!(json["useZip"], false);
    }
}
