use crate::core::actions::Action;
use crate::core::session::{ExportPlan, ExportSession};
use crate::models::export_job::ExportState;
use crate::system::host::HostServices;
use crate::system::settings::SettingsStore;
use crate::system::worker::ExportWorker;
use crate::ui::{DialogKind, FormField, Theme};
use std::collections::VecDeque;

mod dialogs;
mod navigation;
mod operations;
mod text_edit;


pub use text_edit::TextField;

/// 내보내기 대화상자 상태
pub struct App {
    pub(crate) session: ExportSession,
    store: SettingsStore,
    /// 폴더 선택기 목록 제공
    host: Box<dyn HostServices>,
    pub(crate) theme: Theme,

    pub(crate) focus: FormField,
    pub(crate) custom_field: TextField,
    pub(crate) append_field: TextField,
    pub(crate) name_field: TextField,

    /// 현재 떠 있는 팝업
    pub(crate) dialog: Option<DialogKind>,
    /// 팝업이 닫힌 뒤 차례로 보여줄 알림
    pending_notices: VecDeque<DialogKind>,
    /// 덮어쓰기 확인을 기다리는 계획
    pending_plan: Option<ExportPlan>,

    worker: Option<ExportWorker>,
    pub(crate) state: ExportState,
    pub(crate) progress: u8,
    /// 마지막 작업 결과 한 줄 요약
    pub(crate) status_message: String,

    should_quit: bool,
}

impl App {
    /// 대화상자 생성
    ///
    /// `notices`는 시작하자마자 보여줄 알림(설정 파일 재생성, 컨텍스트 오류 등)이다.
    pub fn new(
        session: ExportSession,
        store: SettingsStore,
        host: Box<dyn HostServices>,
        theme: Theme,
        notices: Vec<String>,
    ) -> Self {
        let custom_field = TextField::new(session.custom_path());
        let append_field = TextField::new(session.append_folder());
        let name_field = TextField::new(session.name());

        let mut app = Self {
            session,
            store,
            host,
            theme,
            focus: FormField::Name,
            custom_field,
            append_field,
            name_field,
            dialog: None,
            pending_notices: VecDeque::new(),
            pending_plan: None,
            worker: None,
            state: ExportState::Idle,
            progress: 0,
            status_message: String::new(),
            should_quit: false,
        };
        for notice in notices {
            app.push_notice(DialogKind::notice("Notice", notice));
        }
        if app.session.reserved_name() {
            app.warn_reserved_name();
        }
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn session(&self) -> &ExportSession {
        &self.session
    }

    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn is_export_running(&self) -> bool {
        self.worker.is_some()
    }

    /// 액션 실행 (키 바인딩 → 동작)
    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::NextField => self.move_focus(true),
            Action::PrevField => self.move_focus(false),
            Action::SelectPrev => self.select_adjacent(false),
            Action::SelectNext => self.select_adjacent(true),
            Action::Toggle => self.toggle_focused(),
            Action::Execute => self.start_export(),
            Action::ResetName => self.reset_name(),
            Action::BrowseCustomPath => self.browse_custom_path(),
            Action::ShowPlaceholders => self.show_placeholders(),
            Action::Cancel => self.request_close(),
            Action::Quit => self.quit(),
        }
    }

    /// 종료 전 실행 중인 작업을 끝까지 기다린다.
    pub fn finish_running_export(&mut self) {
        if let Some(worker) = self.worker.take() {
            let result = worker.wait(|_| {});
            self.finish_export(result);
        }
    }
}
