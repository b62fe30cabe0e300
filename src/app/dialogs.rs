use super::*;
use crate::core::naming::available_placeholders;
use crate::models::directory_picker::{picker_start, DirectoryPicker};
use crate::models::recents::FolderType;
use crate::ui::DialogResult;
use crossterm::event::KeyCode;
use std::path::{Path, PathBuf};
use tracing::warn;

impl App {
    // === 팝업 ===

    /// 알림 추가 (이미 팝업이 있으면 닫힌 뒤 차례로)
    pub fn push_notice(&mut self, dialog: DialogKind) {
        if self.dialog.is_none() {
            self.dialog = Some(dialog);
        } else {
            self.pending_notices.push_back(dialog);
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = self.pending_notices.pop_front();
    }

    pub fn show_placeholders(&mut self) {
        let context = self.session.context();
        self.push_notice(DialogKind::placeholders(
            context,
            available_placeholders(context),
        ));
    }

    // === 폴더 선택기 ===

    /// 사용자 지정 경로 찾아보기 (현재 경로 또는 소스 폴더에서 시작)
    pub fn browse_custom_path(&mut self) {
        if self.is_export_running() || self.is_dialog_active() {
            return;
        }
        self.commit_focused_field();

        let preferred = match self.session.custom_path().trim() {
            "" => self.session.file().source_dir.clone().unwrap_or_default(),
            path => PathBuf::from(path),
        };
        let Some(start) = picker_start(&preferred) else {
            self.push_notice(DialogKind::error("Error", "No folder to browse from"));
            return;
        };
        if let Err(message) = self.open_picker_at(start, None) {
            self.push_notice(DialogKind::error("Error", message));
        }
    }

    /// 폴더 목록을 읽어 선택기를 (다시) 띄운다. 실패하면 기존 팝업을 그대로 둔다.
    fn open_picker_at(&mut self, dir: PathBuf, select: Option<&Path>) -> std::result::Result<(), String> {
        let entries = self.host.list_directories(&dir).map_err(|e| {
            warn!("Cannot list {}: {}", dir.display(), e);
            e.to_string()
        })?;
        let mut picker = DirectoryPicker::new(dir, entries);
        if let Some(path) = select {
            picker.select_path(path);
        }
        self.dialog = Some(DialogKind::DirectoryPicker(picker));
        Ok(())
    }

    fn handle_picker_key(&mut self, code: KeyCode) {
        let Some(DialogKind::DirectoryPicker(picker)) = &mut self.dialog else {
            return;
        };
        match code {
            KeyCode::Up => picker.select_prev(),
            KeyCode::Down => picker.select_next(),
            KeyCode::Right => {
                if let Some(entry) = picker.selected_entry().map(Path::to_path_buf) {
                    if let Err(message) = self.open_picker_at(entry, None) {
                        self.status_message = message;
                    }
                }
            }
            KeyCode::Left | KeyCode::Backspace => {
                let dir = picker.dir().to_path_buf();
                if let Some(parent) = dir.parent() {
                    if let Err(message) = self.open_picker_at(parent.to_path_buf(), Some(&dir)) {
                        self.status_message = message;
                    }
                }
            }
            KeyCode::Enter => {
                let choice = picker.choice().to_path_buf();
                self.close_dialog();
                self.apply_picked_directory(&choice);
            }
            KeyCode::Esc => self.close_dialog(),
            _ => {}
        }
    }

    fn apply_picked_directory(&mut self, dir: &Path) {
        self.session.set_folder_type(FolderType::Custom);
        self.session.set_custom_path(&dir.to_string_lossy());
        self.custom_field.set(self.session.custom_path());
        self.focus = FormField::CustomPath;
    }

    /// 팝업 키 처리
    pub fn handle_dialog_key(&mut self, code: KeyCode) {
        if matches!(self.dialog, Some(DialogKind::DirectoryPicker(_))) {
            self.handle_picker_key(code);
            return;
        }
        let Some(dialog) = &mut self.dialog else {
            return;
        };

        let result = match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                dialog.toggle_button();
                DialogResult::Pending
            }
            KeyCode::Enter => dialog.submit(),
            KeyCode::Esc => dialog.cancel(),
            KeyCode::Char('y') | KeyCode::Char('Y')
                if matches!(dialog, DialogKind::Overwrite { .. }) =>
            {
                DialogResult::Confirmed
            }
            KeyCode::Char('n') | KeyCode::Char('N')
                if matches!(dialog, DialogKind::Overwrite { .. }) =>
            {
                DialogResult::Declined
            }
            _ => DialogResult::Pending,
        };

        match result {
            DialogResult::Pending => {}
            DialogResult::Closed => self.close_dialog(),
            DialogResult::Confirmed => {
                self.close_dialog();
                self.confirm_overwrite();
            }
            DialogResult::Declined => {
                self.close_dialog();
                self.decline_overwrite();
            }
        }
    }

    /// Esc: 작업 중이 아니면 대화상자를 닫는다.
    pub fn request_close(&mut self) {
        if self.is_export_running() {
            self.status_message = "Export in progress. Wait for it to finish.".to_string();
            return;
        }
        self.quit();
    }
}
