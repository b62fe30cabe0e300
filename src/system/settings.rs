//! 사용자 설정 파일 저장소
//!
//! 템플릿, 사용자 내보내기 위치, 프로젝트별 최근 선택을 JSON 문서 하나로 통째로 읽고 쓴다.

use crate::models::settings::Settings;
use crate::utils::error::{ExportError, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const SETTINGS_FILE_NAME: &str = "ExportToDir_Config.json";
pub const SETTINGS_ENV_VAR: &str = "EXPORTDIR_SETTINGS_FILE";

/// 로드 결과
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// 파일을 새로 만들어야 했던 경우 사용자에게 보여줄 안내
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 기본 위치 (`EXPORTDIR_SETTINGS_FILE` → 설정 디렉토리)
    pub fn from_env() -> Result<Self> {
        Self::resolve_path().map(Self::new)
    }

    pub fn resolve_path() -> Result<PathBuf> {
        if let Ok(custom) = env::var(SETTINGS_ENV_VAR) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }
        dirs::config_dir()
            .map(|dir| dir.join("exportdir").join(SETTINGS_FILE_NAME))
            .ok_or_else(|| ExportError::Settings("No config directory available".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 설정 로드
    ///
    /// 파일이 없으면 기본값으로 만든 뒤 한 번 더 읽는다.
    /// 해석할 수 없으면 지우고 기본값으로 다시 만든 뒤 안내 문구를 함께 돌려준다.
    pub fn load(&self) -> Result<LoadedSettings> {
        if !self.path.exists() {
            info!("Settings file missing, creating {}", self.path.display());
            self.save(&Settings::default())?;
        }

        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Settings>(&data) {
            Ok(settings) => {
                debug!("Loaded settings from {}", self.path.display());
                Ok(LoadedSettings {
                    settings,
                    notice: None,
                })
            }
            Err(e) => {
                warn!("Settings file {} is corrupt: {}", self.path.display(), e);
                fs::remove_file(&self.path)?;
                let settings = Settings::default();
                self.save(&settings)?;
                Ok(LoadedSettings {
                    settings,
                    notice: Some(format!(
                        "ExportToDir Config file is corrupt.\nWill create new Config file.\n\n{e}"
                    )),
                })
            }
        }
    }

    /// 문서 전체 저장
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, data)?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::file_context::MenuContext;
    use crate::models::recents::{RecentEntry, MAX_RECENTS};
    use crate::models::settings::ExportLocation;
    use tempfile::tempdir;

    #[test]
    fn test_load_creates_missing_file_with_defaults() {
        let temp = tempdir().expect("create tempdir");
        let store = SettingsStore::new(temp.path().join("nested").join(SETTINGS_FILE_NAME));

        let loaded = store.load().expect("load settings");
        assert!(loaded.notice.is_none());
        assert_eq!(loaded.settings, Settings::default());
        assert!(store.path().exists());
    }

    #[test]
    fn test_load_recreates_corrupt_file() {
        let temp = tempdir().expect("create tempdir");
        let path = temp.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "{ not json").expect("write corrupt file");
        let store = SettingsStore::new(&path);

        let loaded = store.load().expect("load settings");
        let notice = loaded.notice.expect("corrupt notice");
        assert!(notice.starts_with("ExportToDir Config file is corrupt."));
        assert_eq!(loaded.settings, Settings::default());

        let reread = store.load().expect("reload settings");
        assert!(reread.notice.is_none());
    }

    #[test]
    fn test_save_and_load_keeps_document() {
        let temp = tempdir().expect("create tempdir");
        let store = SettingsStore::new(temp.path().join(SETTINGS_FILE_NAME));

        let mut settings = Settings::default();
        settings.set_template(MenuContext::MediaFiles, "@PROJECT@_@SHOT@_@AOV@");
        settings.add_location("Client", "/mnt/client");
        settings.remember(RecentEntry {
            project_name: "Foo".into(),
            append_folder: "\\day1".into(),
            use_zip: true,
            ..RecentEntry::default()
        });
        store.save(&settings).expect("save settings");

        let loaded = store.load().expect("load settings");
        assert_eq!(loaded.settings, settings);
        assert_eq!(
            loaded.settings.export_paths,
            vec![ExportLocation::new("Client", "/mnt/client")]
        );

        let raw = fs::read_to_string(store.path()).expect("read file");
        assert!(raw.contains("\"NamingTemplate\""));
        assert!(raw.contains("\"ExportPaths\""));
        assert!(raw.contains("\"useZip\": true"));
    }

    #[test]
    fn test_load_accepts_document_without_recents() {
        let temp = tempdir().expect("create tempdir");
        let path = temp.path().join(SETTINGS_FILE_NAME);
        fs::write(
            &path,
            r#"{"NamingTemplate": {"Shot Files:": "@SHOT@"}, "ExportPaths": []}"#,
        )
        .expect("write settings");

        let loaded = SettingsStore::new(&path).load().expect("load settings");
        assert_eq!(loaded.settings.template_for(MenuContext::ShotFiles), Some("@SHOT@"));
        assert!(loaded.settings.recents.is_empty());
    }

    #[test]
    fn test_load_trims_oversized_recents() {
        let temp = tempdir().expect("create tempdir");
        let path = temp.path().join(SETTINGS_FILE_NAME);
        let recents: Vec<String> = (1..=8)
            .map(|i| format!(r#"{{"ProjectName": "p{i}"}}"#))
            .collect();
        fs::write(
            &path,
            format!(
                r#"{{"NamingTemplate": {{}}, "ExportPaths": [], "Recents": [{}]}}"#,
                recents.join(", ")
            ),
        )
        .expect("write settings");

        let loaded = SettingsStore::new(&path).load().expect("load settings");
        let recents = &loaded.settings.recents;
        assert_eq!(recents.len(), MAX_RECENTS);
        assert!(recents.find("p3").is_none());
        assert!(recents.find("p8").is_some());
    }
}
