//! 명령줄 인터페이스
//!
//! `export`는 브라우저 패널 선택을 흉내 내어 내보내기 대화상자(또는 헤드리스 실행)를 연다.
//! `settings`는 설정 파일의 템플릿과 위치 목록을 편집한다.

use crate::core::naming::{available_placeholders, SequenceMode};
use crate::core::session::{confirm_plan, Collision, ExportSession, OverwritePrompt};
use crate::models::export_job::{ExportEvent, ExportSummary};
use crate::models::file_context::{FileContext, MenuContext};
use crate::models::recents::FolderType;
use crate::models::settings::{MoveDirection, Settings};
use crate::system::context::{
    provide_context, AssetPanel, ContextProvider, LibraryPanel, MediaPanel, ProductPanel,
    ProjectPanel, SceneFilePanel, ShotPanel,
};
use crate::system::host::{HostServices, LocalHost};
use crate::system::settings::SettingsStore;
use crate::utils::formatter::{format_file_size, pluralize};
use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "exportdir", version, about = "Export pipeline files to delivery folders")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the export dialog for a browser selection
    Export(ExportArgs),
    /// Inspect or edit the settings file
    #[command(subcommand)]
    Settings(SettingsCommand),
}

/// 브라우저 패널 종류
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Project,
    Shot,
    Asset,
    Scene,
    Product,
    Media,
    Library,
}

impl PanelKind {
    pub fn menu_context(self) -> MenuContext {
        match self {
            PanelKind::Project => MenuContext::ProjectFiles,
            PanelKind::Shot => MenuContext::ShotFiles,
            PanelKind::Asset => MenuContext::AssetFiles,
            PanelKind::Scene => MenuContext::SceneFiles,
            PanelKind::Product => MenuContext::ProductFiles,
            PanelKind::Media => MenuContext::MediaFiles,
            PanelKind::Library => MenuContext::LibraryFiles,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Browser panel the selection comes from
    #[arg(long, value_enum)]
    pub panel: PanelKind,

    /// Selected file or entity folder
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Frame files of a media selection, in order
    #[arg(long, num_args = 1..)]
    pub frames: Vec<PathBuf>,

    /// Index of the frame currently viewed
    #[arg(long, default_value_t = 0)]
    pub current_frame: usize,

    /// Sequence name of a shot selection
    #[arg(long)]
    pub sequence: Option<String>,

    /// Shot name of a shot selection
    #[arg(long)]
    pub shot: Option<String>,

    /// Asset name of an asset selection
    #[arg(long)]
    pub asset: Option<String>,

    /// Project configuration file (searched upwards from the selection when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// User name for @USER@
    #[arg(long)]
    pub user: Option<String>,

    /// Export without the dialog
    #[arg(long)]
    pub headless: bool,

    /// Answer yes to overwrite prompts
    #[arg(short, long)]
    pub yes: bool,

    /// Zip the export
    #[arg(long)]
    pub zip: bool,

    /// Export the whole image sequence instead of the current frame
    #[arg(long)]
    pub whole_sequence: bool,

    /// Output name (template default when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Subfolder appended to the export location
    #[arg(long)]
    pub append: Option<String>,

    /// Export location by name
    #[arg(long, conflicts_with = "custom")]
    pub destination: Option<String>,

    /// Custom export folder
    #[arg(long)]
    pub custom: Option<PathBuf>,

    /// Dialog theme: `dark`, `light` or a TOML file
    #[arg(long)]
    pub theme: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Print the settings document
    Show,
    /// Print the settings file location
    Path,
    /// List placeholder tokens per panel
    Placeholders {
        #[arg(long, value_enum)]
        panel: Option<PanelKind>,
    },
    /// Set the naming template of a panel
    SetTemplate {
        #[arg(value_enum)]
        panel: PanelKind,
        template: String,
    },
    /// Restore the default naming templates
    ResetTemplates,
    /// Add a user export location
    AddLocation { name: String, path: String },
    /// Remove a user export location by name
    RemoveLocation { name: String },
    /// Move a user export location up or down
    MoveLocation {
        name: String,
        #[arg(value_enum)]
        direction: DirectionArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for MoveDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Up => MoveDirection::Up,
            DirectionArg::Down => MoveDirection::Down,
        }
    }
}

// === settings ===

/// settings 하위 명령 실행, 출력할 텍스트 반환
pub fn run_settings_command(store: &SettingsStore, command: SettingsCommand) -> anyhow::Result<String> {
    if let SettingsCommand::Path = command {
        return Ok(store.path().display().to_string());
    }

    let loaded = store.load()?;
    let mut settings = loaded.settings;
    let mut output = loaded.notice.map(|n| format!("{n}\n\n")).unwrap_or_default();

    match command {
        SettingsCommand::Path => {}
        SettingsCommand::Show => {
            output.push_str(&serde_json::to_string_pretty(&settings)?);
            return Ok(output);
        }
        SettingsCommand::Placeholders { panel } => {
            output.push_str(&placeholder_listing(panel));
            return Ok(output);
        }
        SettingsCommand::SetTemplate { panel, template } => {
            let context = panel.menu_context();
            settings.set_template(context, template.trim());
            output.push_str(&format!("{} {}", context.label(), template.trim()));
        }
        SettingsCommand::ResetTemplates => {
            settings.reset_templates();
            output.push_str("Naming templates reset to defaults");
        }
        SettingsCommand::AddLocation { name, path } => {
            if !settings.add_location(&name, &path) {
                bail!("Location name and path must not be empty");
            }
            output.push_str(&format!("Added {}: {}", name.trim(), path.trim()));
        }
        SettingsCommand::RemoveLocation { name } => {
            let index = location_index(&settings, &name)?;
            if let Some(removed) = settings.remove_location(index) {
                output.push_str(&format!("Removed {}: {}", removed.name, removed.path));
            }
        }
        SettingsCommand::MoveLocation { name, direction } => {
            let index = location_index(&settings, &name)?;
            let moved = settings
                .move_location(index, direction.into())
                .ok_or_else(|| anyhow!("Cannot move {} {:?}", name, direction))?;
            output.push_str(&format!("Moved {} to position {}", name, moved + 1));
        }
    }

    store.save(&settings)?;
    Ok(output)
}

fn location_index(settings: &Settings, name: &str) -> anyhow::Result<usize> {
    settings
        .export_paths
        .iter()
        .position(|l| l.name == name.trim())
        .ok_or_else(|| anyhow!("No export location named {}", name))
}

fn placeholder_listing(panel: Option<PanelKind>) -> String {
    let contexts: Vec<MenuContext> = match panel {
        Some(panel) => vec![panel.menu_context()],
        None => MenuContext::ALL.to_vec(),
    };
    contexts
        .into_iter()
        .map(|ctx| format!("{} {}", ctx.label(), available_placeholders(ctx).join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}

// === export ===

/// 선택 항목의 대표 경로 (설정 탐색 기준)
fn selection_path(args: &ExportArgs) -> Option<&Path> {
    args.path
        .as_deref()
        .or_else(|| args.frames.first().map(PathBuf::as_path))
}

/// 호스트 구성 (프로젝트 설정 경로 탐색 포함)
pub fn build_host(args: &ExportArgs) -> LocalHost {
    let config = args.config.clone().or_else(|| {
        let start = selection_path(args)?;
        LocalHost::discover_project_config(start)
    });
    LocalHost::new(config, args.user.clone())
}

/// 인자 → 패널
pub fn build_provider(args: &ExportArgs, host: &LocalHost) -> anyhow::Result<Box<dyn ContextProvider>> {
    let path = || {
        args.path
            .clone()
            .ok_or_else(|| anyhow!("--path is required for the {:?} panel", args.panel))
    };
    let entity_name = |explicit: &Option<String>, path: &Path| {
        explicit.clone().unwrap_or_else(|| {
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        })
    };

    let provider: Box<dyn ContextProvider> = match args.panel {
        PanelKind::Project => {
            let config_path = host
                .project_config_path()
                .map(Path::to_path_buf)
                .ok_or_else(|| anyhow!("No project configuration found, pass --config"))?;
            Box::new(ProjectPanel { config_path })
        }
        PanelKind::Shot => {
            let path = path()?;
            Box::new(ShotPanel {
                sequence: args.sequence.clone().unwrap_or_default(),
                shot: entity_name(&args.shot, &path),
                path,
            })
        }
        PanelKind::Asset => {
            let path = path()?;
            Box::new(AssetPanel {
                asset: entity_name(&args.asset, &path),
                path,
            })
        }
        PanelKind::Scene => Box::new(SceneFilePanel { path: path()? }),
        PanelKind::Product => Box::new(ProductPanel { path: path()? }),
        PanelKind::Media => {
            let frames = if args.frames.is_empty() {
                vec![path()?]
            } else {
                args.frames.clone()
            };
            Box::new(MediaPanel {
                frames,
                current_frame: args.current_frame,
            })
        }
        PanelKind::Library => Box::new(LibraryPanel { path: path()? }),
    };
    Ok(provider)
}

/// 컨텍스트 추출 (소스가 없으면 오류)
pub fn extract_context(provider: &dyn ContextProvider, host: &dyn HostServices) -> anyhow::Result<FileContext> {
    provide_context(provider, host).ok_or_else(|| {
        anyhow!(
            "Nothing to export: the {} selection does not exist",
            provider.menu_context().label().trim_end_matches(':')
        )
    })
}

/// 명령줄 옵션을 세션에 반영
pub fn apply_overrides(session: &mut ExportSession, args: &ExportArgs) -> anyhow::Result<()> {
    if let Some(custom) = &args.custom {
        session.set_folder_type(FolderType::Custom);
        session.set_custom_path(&custom.to_string_lossy());
    }
    if let Some(name) = &args.destination {
        let index = session
            .destinations()
            .iter()
            .position(|l| l.name == *name)
            .with_context(|| format!("No export location named {name}"))?;
        session.set_folder_type(FolderType::Project);
        session.select_destination(index);
    }
    if let Some(append) = &args.append {
        session.set_append_folder(append);
    }
    if args.zip {
        session.set_zip(true);
    }
    if args.whole_sequence {
        session.set_sequence_mode(SequenceMode::ImageSequence);
    }
    if let Some(name) = &args.name {
        session.set_name(name);
    }
    Ok(())
}

/// 표준 입력으로 덮어쓰기 확인
pub struct StdinPrompt {
    pub assume_yes: bool,
}

impl OverwritePrompt for StdinPrompt {
    fn confirm_overwrite(&self, collision: &Collision) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{}\n{} [y/N] ", collision.title(), collision.message());
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes" | "Yes")
    }
}

/// 대화상자 없이 내보내기
///
/// 충돌이 있으면 묻고, 진행하기로 한 뒤에만 최근 선택을 저장한다.
/// 진행률은 표준 오류로 보여준다. 덮어쓰기를 거절하면 `Ok(None)`.
pub fn run_headless(
    session: &ExportSession,
    store: &SettingsStore,
    prompt: &dyn OverwritePrompt,
) -> anyhow::Result<Option<ExportSummary>> {
    if session.reserved_name() {
        eprintln!("Warning: {}", crate::core::naming::RESERVED_NAME_WARNING);
    }
    let plan = session.plan()?;
    let Some(plan) = confirm_plan(plan, prompt) else {
        return Ok(None);
    };

    let mut settings = session.settings().clone();
    settings.remember(session.recent_entry());
    store.save(&settings)?;

    let worker = plan.start()?;

    let summary = worker.wait(|event| match event {
        ExportEvent::State(state) => eprintln!("{}", state.label()),
        ExportEvent::Progress(percent) => eprint!("\r{:>3}%", percent),
    })?;
    eprintln!();
    info!("Headless export finished: {}", summary.output_path.display());
    Ok(Some(summary))
}

pub fn describe_summary(summary: &ExportSummary) -> String {
    format!(
        "{} ({}) {} {}",
        pluralize(summary.files_copied, "file", "files"),
        format_file_size(summary.bytes_copied),
        if summary.zipped { "zipped to" } else { "copied to" },
        summary.output_path.display()
    )
}
