//! 내보내기 세션
//!
//! 다이얼로그 하나가 열려 있는 동안의 상태(선택 위치, 이름, zip 여부 등)를 담고,
//! 값이 바뀔 때마다 출력 경로를 다시 계산한다. 확인 시 `ExportPlan`을 만든다.

use crate::core::destinations::{
    compose_output_path, destination_labels, list_destinations, normalize_append_folder,
};
use crate::core::naming::{build_placeholder_name, output_file_name, SequenceMode};
use crate::models::export_job::{ExportJob, ExportMode, ExportSource};
use crate::models::file_context::{FileContext, MenuContext, SourcePaths};
use crate::models::project::ProjectConfig;
use crate::models::recents::{FolderType, RecentEntry};
use crate::models::settings::{ExportLocation, Settings};
use crate::system::worker::ExportWorker;
use crate::utils::error::{ExportError, Result};
use crate::utils::path_display::normalize_lexically;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 다이얼로그 세션 상태
#[derive(Debug, Clone)]
pub struct ExportSession {
    context: MenuContext,
    file: FileContext,
    settings: Settings,
    destinations: Vec<ExportLocation>,
    labels: Vec<String>,
    folder_type: FolderType,
    selected: usize,
    custom_path: String,
    append_folder: String,
    name: String,
    zip: bool,
    sequence_mode: SequenceMode,
    output_path: PathBuf,
    /// 현재 이름이 예약 장치 이름과 겹치는지
    reserved_name: bool,
}

impl ExportSession {
    /// 세션 열기
    ///
    /// 위치 목록을 만들고, 템플릿 이름을 채우고, 프로젝트의 최근 선택이 있으면 적용한다.
    pub fn open(
        context: MenuContext,
        file: FileContext,
        settings: Settings,
        project: &ProjectConfig,
    ) -> Self {
        let destinations = list_destinations(project, &settings.export_paths);
        let labels = destination_labels(&destinations);
        let custom_path = file
            .source_dir
            .as_ref()
            .map(|dir| dir.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut session = Self {
            context,
            file,
            settings,
            destinations,
            labels,
            folder_type: FolderType::Project,
            selected: 0,
            custom_path,
            append_folder: String::new(),
            name: String::new(),
            zip: false,
            sequence_mode: SequenceMode::SingleImage,
            output_path: PathBuf::new(),
            reserved_name: false,
        };
        session.reset_name();
        session.apply_recent();
        debug!(
            "Export session opened for {} ({} destinations)",
            context.label(),
            session.destinations.len()
        );
        session
    }

    pub fn context(&self) -> MenuContext {
        self.context
    }

    pub fn file(&self) -> &FileContext {
        &self.file
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn destinations(&self) -> &[ExportLocation] {
        &self.destinations
    }

    pub fn destination_labels(&self) -> &[String] {
        &self.labels
    }

    pub fn folder_type(&self) -> FolderType {
        self.folder_type
    }

    pub fn selected_destination(&self) -> usize {
        self.selected
    }

    pub fn custom_path(&self) -> &str {
        &self.custom_path
    }

    pub fn append_folder(&self) -> &str {
        &self.append_folder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn zip(&self) -> bool {
        self.zip
    }

    pub fn sequence_mode(&self) -> SequenceMode {
        self.sequence_mode
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn reserved_name(&self) -> bool {
        self.reserved_name
    }

    /// 미디어 시퀀스인지 (시퀀스 모드 선택 가능)
    pub fn is_sequence(&self) -> bool {
        self.context == MenuContext::MediaFiles && self.file.source.is_sequence()
    }

    /// 단일 파일로 내보내는지
    pub fn single_file_mode(&self) -> bool {
        if self.context.is_entity_directory() {
            false
        } else if self.is_sequence() {
            self.sequence_mode == SequenceMode::SingleImage
        } else {
            true
        }
    }

    /// 압축하지 않는 시퀀스 전체 내보내기는 프레임 이름을 그대로 쓰므로 이름 수정 불가
    pub fn name_is_read_only(&self) -> bool {
        self.is_sequence() && self.sequence_mode == SequenceMode::ImageSequence && !self.zip
    }

    /// 이름을 템플릿 기본값으로 되돌린다.
    pub fn reset_name(&mut self) {
        self.name = build_placeholder_name(
            &self.settings,
            self.context,
            &self.file,
            self.single_file_mode(),
            self.sequence_mode,
        );
        self.refresh_output_path();
    }

    pub fn set_name(&mut self, name: &str) {
        if self.name_is_read_only() {
            return;
        }
        self.name = name.to_string();
        self.refresh_output_path();
    }

    pub fn set_folder_type(&mut self, folder_type: FolderType) {
        self.folder_type = folder_type;
        self.refresh_output_path();
    }

    pub fn select_destination(&mut self, index: usize) {
        if index < self.destinations.len() {
            self.selected = index;
            self.refresh_output_path();
        }
    }

    pub fn set_custom_path(&mut self, path: &str) {
        self.custom_path = path.trim().to_string();
        self.refresh_output_path();
    }

    /// 하위 폴더 설정 (정리된 값으로 저장)
    pub fn set_append_folder(&mut self, input: &str) {
        self.append_folder = normalize_append_folder(input).value;
        self.refresh_output_path();
    }

    pub fn set_zip(&mut self, zip: bool) {
        self.zip = zip;
        self.refresh_output_path();
    }

    /// 시퀀스 모드 변경 (기본 이름도 다시 만든다)
    pub fn set_sequence_mode(&mut self, mode: SequenceMode) {
        if !self.is_sequence() {
            return;
        }
        self.sequence_mode = mode;
        debug!("Sequence mode changed to {:?}", mode);
        self.reset_name();
    }

    /// 선택된 기준 디렉토리
    pub fn base_path(&self) -> Option<PathBuf> {
        let raw = match self.folder_type {
            FolderType::Project => self.destinations.get(self.selected).map(|l| l.path.as_str()),
            FolderType::Custom => Some(self.custom_path.as_str()),
        }?;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    /// 출력 경로 재계산 (입력이 같으면 결과도 같다)
    pub fn refresh_output_path(&mut self) {
        let file_name = output_file_name(
            &self.name,
            &self.file.extension,
            self.zip,
            !self.single_file_mode(),
        );
        let base = self.base_path().unwrap_or_default();
        self.output_path = compose_output_path(&base, &self.append_folder, &file_name.value);
        self.reserved_name =
            file_name.reserved || normalize_append_folder(&self.append_folder).reserved;
    }

    /// 저장된 최근 선택 적용
    pub fn apply_recent(&mut self) {
        let Some(recent) = self.settings.recent_for(&self.file.project_name).cloned() else {
            return;
        };
        debug!("Applying recent export settings for {}", recent.project_name);

        self.folder_type = recent.folder_type;
        if let Some(index) = self.find_destination(&recent.project_folder) {
            self.selected = index;
        }
        if !recent.custom_folder.trim().is_empty() {
            self.custom_path = recent.custom_folder.trim().to_string();
        }
        self.append_folder = normalize_append_folder(&recent.append_folder).value;
        self.zip = recent.use_zip;
        self.refresh_output_path();
    }

    /// 최근 항목의 프로젝트 폴더 값으로 위치 찾기 (레이블 또는 경로)
    fn find_destination(&self, project_folder: &str) -> Option<usize> {
        if project_folder.trim().is_empty() {
            return None;
        }
        self.labels
            .iter()
            .position(|label| label == project_folder)
            .or_else(|| {
                let wanted = normalize_lexically(Path::new(project_folder.trim()));
                self.destinations
                    .iter()
                    .position(|l| normalize_lexically(Path::new(l.path.trim())) == wanted)
            })
    }

    /// 현재 선택을 최근 항목으로
    pub fn recent_entry(&self) -> RecentEntry {
        RecentEntry {
            project_name: self.file.project_name.clone(),
            folder_type: self.folder_type,
            project_folder: self.labels.get(self.selected).cloned().unwrap_or_default(),
            custom_folder: self.custom_path.clone(),
            append_folder: self.append_folder.clone(),
            use_zip: self.zip,
        }
    }

    /// 확인 시 작업 계획 생성
    ///
    /// 아직 아무 파일도 만들지 않는다. 충돌 여부만 검사해 둔다.
    pub fn plan(&self) -> Result<ExportPlan> {
        if self.name.trim().is_empty() {
            return Err(ExportError::EmptyName);
        }
        if self.base_path().is_none() {
            return Err(ExportError::InvalidJob(
                "No export location selected".to_string(),
            ));
        }

        let source = self.export_source()?;
        let output = match &source {
            ExportSource::Files(_) if !self.zip => self
                .output_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.output_path.clone()),
            _ => self.output_path.clone(),
        };
        let job = ExportJob::new(source, output, self.zip)?;
        let collision = detect_collision(&job);

        Ok(ExportPlan { job, collision })
    }

    fn export_source(&self) -> Result<ExportSource> {
        let first = self
            .file
            .source
            .first()
            .map(Path::to_path_buf)
            .ok_or_else(|| ExportError::PathNotFound {
                path: PathBuf::from(&self.file.source_filename),
            })?;

        if self.single_file_mode() {
            let path = match (&self.file.current_frame, &self.file.source_dir) {
                (Some(frame), Some(dir)) if self.context == MenuContext::MediaFiles => {
                    dir.join(frame)
                }
                _ => first,
            };
            return Ok(ExportSource::File(path));
        }

        if self.context.is_entity_directory() {
            return Ok(ExportSource::Directory(first));
        }

        match &self.file.source {
            SourcePaths::Sequence(frames) => Ok(ExportSource::Files(frames.clone())),
            _ => Ok(ExportSource::File(first)),
        }
    }
}

/// 충돌 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    File,
    Directory,
}

impl CollisionKind {
    pub fn name(&self) -> &'static str {
        match self {
            CollisionKind::File => "File",
            CollisionKind::Directory => "Directory",
        }
    }
}

/// 이미 존재하는 출력
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub kind: CollisionKind,
    pub path: PathBuf,
}

impl Collision {
    pub fn title(&self) -> String {
        format!("{} Exists", self.kind.name())
    }

    pub fn message(&self) -> String {
        format!(
            "The {} already exists:\n\n{}\n\nDo you want to overwrite it?",
            self.kind.name(),
            self.path.display()
        )
    }
}

/// zip/단일 파일은 출력 파일, 디렉토리 트리는 출력 디렉토리,
/// 시퀀스는 프레임 파일 중 하나라도 있으면 충돌
///
/// 시퀀스는 출력 폴더가 이미 있어도 겹치는 프레임이 없으면 묻지 않는다.
/// (폴더 존재만으로 묻는 방식과 다르다)
fn detect_collision(job: &ExportJob) -> Option<Collision> {
    let path = job.output_path.clone();
    match (job.mode, job.zip) {
        (_, true) | (ExportMode::SingleFile, false) => path.exists().then_some(Collision {
            kind: CollisionKind::File,
            path,
        }),
        (ExportMode::DirectoryTree, false) => path.exists().then_some(Collision {
            kind: CollisionKind::Directory,
            path,
        }),
        (ExportMode::Sequence, false) => {
            let ExportSource::Files(frames) = &job.source else {
                return None;
            };
            let clash = frames
                .iter()
                .filter_map(|frame| frame.file_name())
                .any(|name| path.join(name).exists());
            clash.then_some(Collision {
                kind: CollisionKind::Directory,
                path,
            })
        }
    }
}

/// 확인된 작업 계획
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub job: ExportJob,
    pub collision: Option<Collision>,
}

impl ExportPlan {
    /// 워커 시작 (덮어쓰기 확인은 이미 끝난 상태여야 한다)
    pub fn start(self) -> Result<ExportWorker> {
        info!(
            "Starting {} export to {}",
            self.job.mode.name(),
            self.job.output_path.display()
        );
        ExportWorker::spawn(self.job)
    }
}

/// 덮어쓰기 확인 (동기 예/아니오)
pub trait OverwritePrompt {
    fn confirm_overwrite(&self, collision: &Collision) -> bool;
}

/// 충돌이 있으면 먼저 묻는다. 거절하면 `None` (워커도 최근 설정 저장도 없음).
pub fn confirm_plan(plan: ExportPlan, prompt: &dyn OverwritePrompt) -> Option<ExportPlan> {
    if let Some(collision) = &plan.collision {
        if !prompt.confirm_overwrite(collision) {
            info!("Overwrite declined: {}", collision.path.display());
            return None;
        }
    }
    Some(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::naming::RESERVED_NAME_WARNING;
    use crate::models::export_job::ExportState;
    use std::cell::Cell;
    use std::fs;
    use tempfile::tempdir;

    struct Answer {
        yes: bool,
        asked: Cell<usize>,
    }

    impl Answer {
        fn new(yes: bool) -> Self {
            Self {
                yes,
                asked: Cell::new(0),
            }
        }
    }

    impl OverwritePrompt for Answer {
        fn confirm_overwrite(&self, _collision: &Collision) -> bool {
            self.asked.set(self.asked.get() + 1);
            self.yes
        }
    }

    fn project_with(dest: &Path) -> ProjectConfig {
        ProjectConfig {
            project_name: "Foo".into(),
            render_paths: vec![ExportLocation::new("Delivery", dest.to_string_lossy())],
            export_paths: Vec::new(),
        }
    }

    fn scene_file(dir: &Path) -> FileContext {
        let path = dir.join("sh010_comp_v003.nk");
        fs::write(&path, "nuke").expect("write scene");
        let mut file = FileContext {
            project_name: "Foo".into(),
            user: "jdoe".into(),
            shot: "010".into(),
            date_stamp: "070324".into(),
            ..FileContext::default()
        };
        file.split_source_path(&path);
        file
    }

    fn sequence_file(dir: &Path) -> FileContext {
        let frames: Vec<PathBuf> = (1001..1004)
            .map(|n| {
                let p = dir.join(format!("beauty.{n}.exr"));
                fs::write(&p, "exr").expect("write frame");
                p
            })
            .collect();
        FileContext {
            project_name: "Foo".into(),
            source: SourcePaths::Sequence(frames),
            source_dir: Some(dir.to_path_buf()),
            source_filename: "beauty.####.exr".into(),
            current_frame: Some("beauty.1002.exr".into()),
            frame_number: ".1002".into(),
            extension: ".exr".into(),
            ..FileContext::default()
        }
    }

    #[test]
    fn test_open_builds_template_name_and_output_path() {
        let temp = tempdir().expect("create tempdir");
        let src = temp.path().join("src");
        fs::create_dir_all(&src).expect("create src");
        let dest = temp.path().join("delivery");
        let session = ExportSession::open(
            MenuContext::SceneFiles,
            scene_file(&src),
            Settings::default(),
            &project_with(&dest),
        );

        assert_eq!(session.name(), "Foo--sh010_comp_v003.nk");
        assert_eq!(session.output_path(), dest.join("Foo--sh010_comp_v003.nk"));
        assert!(session.single_file_mode());
        assert_eq!(session.custom_path(), src.to_string_lossy());
    }

    #[test]
    fn test_refresh_is_idempotent_and_tracks_changes() {
        let temp = tempdir().expect("create tempdir");
        let dest = temp.path().join("delivery");
        let mut session = ExportSession::open(
            MenuContext::SceneFiles,
            scene_file(temp.path()),
            Settings::default(),
            &project_with(&dest),
        );

        session.set_name("client_comp.exr");
        session.set_append_folder("day 1");
        let first = session.output_path().to_path_buf();
        session.refresh_output_path();
        assert_eq!(session.output_path(), first);
        assert_eq!(first, dest.join("day 1").join("client_comp.nk"));

        session.set_zip(true);
        assert_eq!(session.output_path(), dest.join("day 1").join("client_comp.zip"));
    }

    #[test]
    fn test_reserved_name_is_flagged_not_blocked() {
        let temp = tempdir().expect("create tempdir");
        let mut session = ExportSession::open(
            MenuContext::SceneFiles,
            scene_file(temp.path()),
            Settings::default(),
            &project_with(&temp.path().join("out")),
        );
        session.set_name("con");
        assert!(session.reserved_name());
        session.set_name("comp");
        session.set_append_folder("delivery/aux");
        assert!(session.reserved_name());
        assert!(!RESERVED_NAME_WARNING.is_empty());
        assert!(session.plan().is_ok());
    }

    #[test]
    fn test_blank_name_is_refused() {
        let temp = tempdir().expect("create tempdir");
        let mut session = ExportSession::open(
            MenuContext::SceneFiles,
            scene_file(temp.path()),
            Settings::default(),
            &project_with(&temp.path().join("out")),
        );
        session.set_name("   ");
        assert!(matches!(session.plan(), Err(ExportError::EmptyName)));
    }

    #[test]
    fn test_missing_destination_is_refused() {
        let temp = tempdir().expect("create tempdir");
        let session = ExportSession::open(
            MenuContext::SceneFiles,
            scene_file(temp.path()),
            Settings::default(),
            &ProjectConfig::default(),
        );
        assert!(matches!(session.plan(), Err(ExportError::InvalidJob(_))));
    }

    #[test]
    fn test_declined_overwrite_starts_nothing() {
        let temp = tempdir().expect("create tempdir");
        let dest = temp.path().join("delivery");
        fs::create_dir_all(&dest).expect("create dest");
        let session = ExportSession::open(
            MenuContext::SceneFiles,
            scene_file(temp.path()),
            Settings::default(),
            &project_with(&dest),
        );
        let existing = session.output_path().to_path_buf();
        fs::write(&existing, "keep me").expect("write existing");

        let plan = session.plan().expect("plan");
        let collision = plan.collision.clone().expect("collision detected");
        assert_eq!(collision.kind, CollisionKind::File);
        assert_eq!(collision.title(), "File Exists");

        let prompt = Answer::new(false);
        assert!(confirm_plan(plan, &prompt).is_none());
        assert_eq!(prompt.asked.get(), 1);
        assert_eq!(fs::read_to_string(&existing).expect("read"), "keep me");
    }

    #[test]
    fn test_accepted_overwrite_runs_worker() {
        let temp = tempdir().expect("create tempdir");
        let dest = temp.path().join("delivery");
        fs::create_dir_all(&dest).expect("create dest");
        let session = ExportSession::open(
            MenuContext::SceneFiles,
            scene_file(temp.path()),
            Settings::default(),
            &project_with(&dest),
        );
        let existing = session.output_path().to_path_buf();
        fs::write(&existing, "old").expect("write existing");

        let worker = confirm_plan(session.plan().expect("plan"), &Answer::new(true))
            .expect("overwrite confirmed")
            .start()
            .expect("worker started");
        let mut last_state = None;
        worker
            .wait(|event| {
                if let crate::models::ExportEvent::State(state) = event {
                    last_state = Some(state.clone());
                }
            })
            .expect("export");
        assert_eq!(last_state, Some(ExportState::Complete));
        assert_eq!(fs::read_to_string(&existing).expect("read"), "nuke");
    }

    #[test]
    fn test_no_collision_skips_prompt() {
        let temp = tempdir().expect("create tempdir");
        let session = ExportSession::open(
            MenuContext::SceneFiles,
            scene_file(temp.path()),
            Settings::default(),
            &project_with(&temp.path().join("fresh")),
        );
        let prompt = Answer::new(false);
        let worker = confirm_plan(session.plan().expect("plan"), &prompt)
            .expect("no prompt needed")
            .start()
            .expect("worker started");
        worker.join().expect("export");
        assert_eq!(prompt.asked.get(), 0);
        assert!(temp.path().join("fresh").join("Foo--sh010_comp_v003.nk").exists());
    }

    #[test]
    fn test_media_sequence_modes() {
        let temp = tempdir().expect("create tempdir");
        let dest = temp.path().join("client");
        let mut session = ExportSession::open(
            MenuContext::MediaFiles,
            sequence_file(temp.path()),
            Settings::default(),
            &project_with(&dest),
        );

        // 기본은 현재 프레임 한 장
        assert!(session.single_file_mode());
        assert_eq!(session.name(), "Foo--beauty.1002.exr");
        let plan = session.plan().expect("plan");
        assert_eq!(
            plan.job.source,
            ExportSource::File(temp.path().join("beauty.1002.exr"))
        );

        session.set_sequence_mode(SequenceMode::ImageSequence);
        assert!(session.name_is_read_only());
        assert_eq!(session.name(), "Foo--beauty.####.exr");
        let plan = session.plan().expect("plan");
        assert_eq!(plan.job.mode, ExportMode::Sequence);
        assert_eq!(plan.job.output_path, dest);

        session.set_zip(true);
        assert!(!session.name_is_read_only());
        assert_eq!(session.output_path(), dest.join("Foo--beauty.zip"));
    }

    #[test]
    fn test_sequence_collision_checks_frames() {
        let temp = tempdir().expect("create tempdir");
        let dest = temp.path().join("client");
        fs::create_dir_all(&dest).expect("create dest");
        let mut session = ExportSession::open(
            MenuContext::MediaFiles,
            sequence_file(temp.path()),
            Settings::default(),
            &project_with(&dest),
        );
        session.set_sequence_mode(SequenceMode::ImageSequence);
        assert!(session.plan().expect("plan").collision.is_none());

        fs::write(dest.join("beauty.1003.exr"), "old").expect("write frame");
        let collision = session.plan().expect("plan").collision.expect("collision");
        assert_eq!(collision.kind, CollisionKind::Directory);
        assert_eq!(collision.path, dest);
    }

    #[test]
    fn test_entity_directory_plan() {
        let temp = tempdir().expect("create tempdir");
        let shot_dir = temp.path().join("shots").join("010");
        fs::create_dir_all(&shot_dir).expect("create shot dir");
        let file = FileContext {
            project_name: "Foo".into(),
            sequence: "sq01".into(),
            shot: "010".into(),
            date_stamp: "070324".into(),
            source: SourcePaths::Single(shot_dir.clone()),
            source_dir: shot_dir.parent().map(Path::to_path_buf),
            source_filename: "010".into(),
            ..FileContext::default()
        };
        let dest = temp.path().join("out");
        let session = ExportSession::open(
            MenuContext::ShotFiles,
            file,
            Settings::default(),
            &project_with(&dest),
        );

        assert!(!session.single_file_mode());
        assert_eq!(session.name(), "Foo--sq01-010--070324");
        let plan = session.plan().expect("plan");
        assert_eq!(plan.job.source, ExportSource::Directory(shot_dir));
        assert_eq!(plan.job.output_path, dest.join("Foo--sq01-010--070324"));
    }

    #[test]
    fn test_recents_round_trip() {
        let temp = tempdir().expect("create tempdir");
        let dest_a = temp.path().join("a");
        let dest_b = temp.path().join("b");
        let project = ProjectConfig {
            project_name: "Foo".into(),
            render_paths: vec![
                ExportLocation::new("A", dest_a.to_string_lossy()),
                ExportLocation::new("B", dest_b.to_string_lossy()),
            ],
            export_paths: Vec::new(),
        };

        let mut session = ExportSession::open(
            MenuContext::SceneFiles,
            scene_file(temp.path()),
            Settings::default(),
            &project,
        );
        session.select_destination(1);
        session.set_append_folder("/handoff");
        session.set_zip(true);

        let mut settings = Settings::default();
        settings.remember(session.recent_entry());

        let reopened = ExportSession::open(
            MenuContext::SceneFiles,
            scene_file(temp.path()),
            settings,
            &project,
        );
        assert_eq!(reopened.selected_destination(), 1);
        assert!(reopened.zip());
        assert_eq!(
            reopened.output_path(),
            dest_b.join("handoff").join("Foo--sh010_comp_v003.zip")
        );
    }

    #[test]
    fn test_custom_folder_type() {
        let temp = tempdir().expect("create tempdir");
        let mut session = ExportSession::open(
            MenuContext::SceneFiles,
            scene_file(temp.path()),
            Settings::default(),
            &project_with(&temp.path().join("out")),
        );
        let custom = temp.path().join("custom");
        session.set_custom_path(&custom.to_string_lossy());
        session.set_folder_type(FolderType::Custom);
        assert_eq!(session.output_path(), custom.join("Foo--sh010_comp_v003.nk"));
    }
}
