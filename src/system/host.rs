//! 호스트 서비스
//!
//! 파이프라인 호스트가 제공하는 조회/알림 기능을 trait 하나로 묶는다.
//! `LocalHost`는 디스크의 프로젝트 설정과 버전 정보 파일로 이를 구현한다.

use crate::models::project::ProjectConfig;
use crate::system::filesystem::FileSystem;
use crate::utils::error::{ExportError, Result};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 프로젝트 설정 파일 (프로젝트 루트 기준)
pub const PROJECT_CONFIG_RELATIVE: &str = "00_Pipeline/pipeline.json";
pub const VERSION_INFO_FILE: &str = "versioninfo.json";

/// 호스트가 제공하는 서비스
pub trait HostServices {
    /// 프로젝트 설정 (이름, 렌더/내보내기 경로)
    fn project_config(&self) -> Result<ProjectConfig>;

    fn user_name(&self) -> String;

    /// 씬 파일 메타데이터 (`filename` 키 포함)
    fn scenefile_data(&self, path: &Path) -> Result<Map<String, Value>>;

    /// 프로덕트/미디어 버전 정보
    fn version_info(&self, path: &Path) -> Result<Map<String, Value>>;

    /// 사용자에게 보여줄 알림
    fn notify(&self, message: &str);

    /// 디렉토리 선택기에 보여줄 하위 폴더 목록
    fn list_directories(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

/// 파일 기반 호스트
#[derive(Debug, Default)]
pub struct LocalHost {
    project_config_path: Option<PathBuf>,
    user: Option<String>,
    notices: RefCell<Vec<String>>,
}

impl LocalHost {
    pub fn new(project_config_path: Option<PathBuf>, user: Option<String>) -> Self {
        Self {
            project_config_path,
            user,
            notices: RefCell::new(Vec::new()),
        }
    }

    /// 상위 디렉토리를 따라 올라가며 프로젝트 설정 파일 탐색
    pub fn discover_project_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_RELATIVE))
            .find(|candidate| candidate.is_file())
    }

    pub fn project_config_path(&self) -> Option<&Path> {
        self.project_config_path.as_deref()
    }

    /// 지금까지 쌓인 알림을 꺼낸다.
    pub fn take_notices(&self) -> Vec<String> {
        self.notices.borrow_mut().drain(..).collect()
    }
}

impl HostServices for LocalHost {
    fn project_config(&self) -> Result<ProjectConfig> {
        let path = self
            .project_config_path
            .as_deref()
            .ok_or_else(|| ExportError::HostData("No project configuration found".to_string()))?;
        let value = read_json(path)?;
        Ok(ProjectConfig::from_value(&value))
    }

    fn user_name(&self) -> String {
        self.user
            .clone()
            .or_else(|| env::var("USER").ok())
            .or_else(|| env::var("USERNAME").ok())
            .unwrap_or_default()
    }

    fn scenefile_data(&self, path: &Path) -> Result<Map<String, Value>> {
        let mut data = match scenefile_info_path(path) {
            Some(info) if info.is_file() => read_object(&info)?,
            _ => {
                debug!("No scene info file for {}", path.display());
                Map::new()
            }
        };
        data.insert(
            "filename".to_string(),
            Value::String(path.to_string_lossy().to_string()),
        );
        Ok(data)
    }

    fn version_info(&self, path: &Path) -> Result<Map<String, Value>> {
        let info = path
            .ancestors()
            .skip(1)
            .take(2)
            .map(|dir| dir.join(VERSION_INFO_FILE))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| {
                ExportError::HostData(format!("No {} for {}", VERSION_INFO_FILE, path.display()))
            })?;
        read_object(&info)
    }

    fn notify(&self, message: &str) {
        info!("Notice: {}", message.replace('\n', " "));
        self.notices.borrow_mut().push(message.to_string());
    }

    fn list_directories(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        FileSystem::new().list_directories(dir)
    }
}

/// `<이름>versioninfo.json` (씬 파일 옆)
fn scenefile_info_path(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_string_lossy();
    Some(path.with_file_name(format!("{stem}{VERSION_INFO_FILE}")))
}

fn read_json(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path).map_err(|e| {
        ExportError::HostData(format!("Cannot read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&data)
        .map_err(|e| ExportError::HostData(format!("Cannot parse {}: {}", path.display(), e)))
}

fn read_object(path: &Path) -> Result<Map<String, Value>> {
    match read_json(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(ExportError::HostData(format!(
            "{} is not a JSON object",
            path.display()
        ))),
    }
}
