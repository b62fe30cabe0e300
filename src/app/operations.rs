use super::*;
use crate::models::export_job::{ExportEvent, ExportSummary};
use crate::utils::error::{ExportError, Result};
use crate::utils::formatter::{format_file_size, pluralize};
use tracing::{info, warn};

impl App {
    // === 내보내기 실행 ===

    /// Execute: 계획을 세우고, 충돌이 있으면 덮어쓰기 확인을 띄운다.
    pub fn start_export(&mut self) {
        if self.is_export_running() {
            return;
        }
        self.commit_focused_field();

        let plan = match self.session.plan() {
            Ok(plan) => plan,
            Err(ExportError::EmptyName) => {
                self.push_notice(DialogKind::notice(
                    "Notice",
                    "The Output Filename is blank.  Please enter a Filename",
                ));
                return;
            }
            Err(e) => {
                warn!("Cannot plan export: {}", e);
                self.push_notice(DialogKind::error("Error", e.to_string()));
                return;
            }
        };

        match plan.collision.clone() {
            Some(collision) => {
                self.pending_plan = Some(plan);
                self.push_notice(DialogKind::overwrite(collision));
            }
            None => self.launch(plan),
        }
    }

    pub(super) fn confirm_overwrite(&mut self) {
        if let Some(plan) = self.pending_plan.take() {
            self.launch(plan);
        }
    }

    /// 덮어쓰기 거절: 아무 파일도 건드리지 않는다.
    pub(super) fn decline_overwrite(&mut self) {
        if let Some(plan) = self.pending_plan.take() {
            info!("Overwrite declined: {}", plan.job.output_path.display());
            self.status_message = "Export cancelled.".to_string();
        }
    }

    /// 최근 선택 저장 후 워커 시작
    fn launch(&mut self, plan: ExportPlan) {
        self.save_recent();

        self.state = ExportState::Idle;
        self.progress = 0;
        self.status_message.clear();

        match plan.start() {
            Ok(worker) => self.worker = Some(worker),
            Err(e) => {
                warn!("Cannot start export: {}", e);
                self.state = ExportState::Error(e.to_string());
                self.push_notice(DialogKind::error("Error", e.to_string()));
            }
        }
    }

    fn save_recent(&mut self) {
        let mut settings = self.session.settings().clone();
        settings.remember(self.session.recent_entry());
        if let Err(e) = self.store.save(&settings) {
            warn!("Cannot save recent export settings: {}", e);
            self.push_notice(DialogKind::error("Error", e.to_string()));
        }
    }

    /// 워커 이벤트 반영 (메인 루프에서 호출)
    pub fn process_worker(&mut self) {
        let Some(worker) = &self.worker else {
            return;
        };
        let events = worker.try_events();
        let finished = worker.is_finished();

        for event in events {
            self.apply_event(event);
        }
        if !finished {
            return;
        }

        if let Some(worker) = self.worker.take() {
            // 종료 직전에 보낸 이벤트까지 반영
            for event in worker.try_events() {
                self.apply_event(event);
            }
            let result = worker.join();
            self.finish_export(result);
        }
    }

    pub(super) fn apply_event(&mut self, event: ExportEvent) {
        match event {
            ExportEvent::State(state) => self.state = state,
            ExportEvent::Progress(percent) => self.progress = percent,
        }
    }

    pub(super) fn finish_export(&mut self, result: Result<ExportSummary>) {
        match result {
            Ok(summary) => {
                self.state = ExportState::Complete;
                self.progress = 100;
                self.status_message = format!(
                    "{} ({}) {} {}",
                    pluralize(summary.files_copied, "file", "files"),
                    format_file_size(summary.bytes_copied),
                    if summary.zipped { "zipped to" } else { "copied to" },
                    summary.output_path.display()
                );
            }
            Err(e) => {
                self.state = ExportState::Error(e.to_string());
                self.status_message = e.to_string();
                self.push_notice(DialogKind::error("Export Failed", e.to_string()));
            }
        }
    }
}
