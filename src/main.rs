mod app;
mod cli;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use app::{App, TextField};
use clap::Parser;
use cli::{Cli, Command, ExportArgs};
use crate::core::actions::find_action;
use crate::core::session::ExportSession;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use models::project::ProjectConfig;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use system::host::HostServices;
use system::settings::SettingsStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{
    calculate_areas, determine_mode, CommandBar, Dialog, ExportForm, InputView, LayoutMode,
    CompactView, Theme,
};

/// 로그 필터 환경 변수 (기본 `info`)
const LOG_ENV_VAR: &str = "EXPORTDIR_LOG";
const LOG_FILE_NAME: &str = "exportdir.log";

fn main() -> anyhow::Result<()> {
    let parsed = Cli::parse();
    let store = SettingsStore::from_env()?;
    init_logging(store.path());

    match parsed.command {
        Command::Settings(command) => {
            println!("{}", cli::run_settings_command(&store, command)?);
        }
        Command::Export(args) => run_export_command(&store, &args)?,
    }
    Ok(())
}

/// 설정 파일 옆의 로그 파일로 tracing 출력 (터미널 UI를 깨지 않도록)
fn init_logging(settings_path: &Path) {
    let log_path = settings_path.with_file_name(LOG_FILE_NAME);
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open log file {}: {}", log_path.display(), e);
            return;
        }
    };

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn run_export_command(store: &SettingsStore, args: &ExportArgs) -> anyhow::Result<()> {
    let host = cli::build_host(args);
    let provider = cli::build_provider(args, &host)?;
    let file = cli::extract_context(provider.as_ref(), &host)?;
    let project = host.project_config().unwrap_or_else(|e| {
        warn!("Continuing without project locations: {}", e);
        ProjectConfig::default()
    });

    let loaded = store.load()?;
    let mut notices: Vec<String> = loaded.notice.into_iter().collect();
    notices.extend(host.take_notices());

    let mut session = ExportSession::open(provider.menu_context(), file, loaded.settings, &project);
    cli::apply_overrides(&mut session, args)?;

    if args.headless {
        for notice in &notices {
            eprintln!("{notice}");
        }
        let prompt = cli::StdinPrompt {
            assume_yes: args.yes,
        };
        match cli::run_headless(&session, store, &prompt)? {
            Some(summary) => println!("{}", cli::describe_summary(&summary)),
            None => println!("Export cancelled."),
        }
        return Ok(());
    }

    let theme = match &args.theme {
        Some(spec) => Theme::resolve(spec)?,
        None => Theme::default(),
    };
    let mut app = App::new(session, store.clone(), Box::new(host), theme, notices);
    run_dialog(&mut app)
}

fn run_dialog(app: &mut App) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.finish_running_export();
    if !app.status_message.is_empty() {
        println!("{}", app.status_message);
    }
    info!("Export dialog closed");
    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        // 작업 중에는 진행률을 자주 갱신
        let poll_timeout = if app.is_export_running() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.modifiers, key.code);
                }
            }
        }

        app.process_worker();

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

/// 키 처리: 팝업 → 텍스트 입력 → 액션 레지스트리 순
fn handle_key(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    if app.is_dialog_active() {
        app.handle_dialog_key(code);
        return;
    }
    if app.handle_text_key(modifiers, code) {
        return;
    }
    if let Some(action) = find_action(modifiers, code) {
        app.execute_action(action);
    }
}

fn render(f: &mut ratatui::Frame<'_>, app: &App) {
    let size = f.area();
    if determine_mode(size.width, size.height) == LayoutMode::TooSmall {
        let compact = CompactView::new(app.session().output_path(), &app.state)
            .progress(app.progress, app.is_export_running())
            .size(size.width, size.height)
            .theme(&app.theme);
        f.render_widget(compact, size);
        return;
    }

    let session = app.session();
    let areas = calculate_areas(size, session.destinations().len() as u16);

    let form = ExportForm::new(session, &app.state)
        .focus(app.focus)
        .inputs(
            input_view(&app.custom_field),
            input_view(&app.append_field),
            input_view(&app.name_field),
        )
        .progress(app.progress, &app.status_message)
        .busy(app.is_export_running())
        .theme(&app.theme);
    f.render_widget(form, areas.form);

    let command_bar = CommandBar::new()
        .set_enabled("Reset", !session.name_is_read_only())
        .set_enabled("Execute", !app.is_export_running())
        .theme(&app.theme);
    f.render_widget(command_bar, areas.command_bar);

    if let Some(dialog) = &app.dialog {
        f.render_widget(Dialog::new(dialog).theme(&app.theme), size);
    }
}

fn input_view(field: &TextField) -> InputView<'_> {
    InputView {
        value: field.value(),
        cursor_column: field.cursor_column(),
    }
}
