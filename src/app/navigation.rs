use super::*;
use crate::core::naming::{SequenceMode, RESERVED_NAME_WARNING};
use crate::models::recents::FolderType;
use crossterm::event::{KeyCode, KeyModifiers};

impl App {
    // === 포커스 ===

    /// 현재 상태에서 포커스 가능한 필드 순서
    pub fn focus_order(&self) -> Vec<FormField> {
        let mut order = vec![FormField::FolderType];
        match self.session.folder_type() {
            FolderType::Project => order.push(FormField::Destination),
            FolderType::Custom => order.push(FormField::CustomPath),
        }
        order.push(FormField::AppendFolder);
        if !self.session.name_is_read_only() {
            order.push(FormField::Name);
        }
        order.push(FormField::Zip);
        if self.session.is_sequence() {
            order.push(FormField::SequenceMode);
        }
        order
    }

    pub fn move_focus(&mut self, forward: bool) {
        self.commit_focused_field();
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus);
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % order.len(),
            (Some(i), false) => (i + order.len() - 1) % order.len(),
            (None, _) => 0,
        };
        self.focus = order[next];
    }

    /// 포커스된 필드가 사라졌으면 (폴더 종류 변경 등) 같은 자리의 필드로 옮긴다.
    fn ensure_focus_visible(&mut self) {
        let order = self.focus_order();
        if order.contains(&self.focus) {
            return;
        }
        self.focus = match self.focus {
            FormField::Destination if order.contains(&FormField::CustomPath) => {
                FormField::CustomPath
            }
            FormField::CustomPath if order.contains(&FormField::Destination) => {
                FormField::Destination
            }
            _ => order[0],
        };
    }

    /// 텍스트 필드를 떠날 때 정리된 값을 다시 보여준다.
    pub(super) fn commit_focused_field(&mut self) {
        match self.focus {
            FormField::CustomPath => self.custom_field.set(self.session.custom_path()),
            FormField::AppendFolder => self.append_field.set(self.session.append_folder()),
            _ => {}
        }
    }

    // === 선택/토글 ===

    pub fn select_adjacent(&mut self, forward: bool) {
        if self.is_export_running() {
            return;
        }
        match self.focus {
            FormField::Destination => {
                let len = self.session.destinations().len();
                if len == 0 {
                    return;
                }
                let current = self.session.selected_destination();
                let next = if forward {
                    (current + 1).min(len - 1)
                } else {
                    current.saturating_sub(1)
                };
                self.session.select_destination(next);
            }
            FormField::FolderType | FormField::Zip | FormField::SequenceMode => {
                self.toggle_focused()
            }
            _ => self.move_focus(forward),
        }
    }

    pub fn toggle_focused(&mut self) {
        if self.is_export_running() {
            return;
        }
        match self.focus {
            FormField::FolderType => {
                let next = match self.session.folder_type() {
                    FolderType::Project => FolderType::Custom,
                    FolderType::Custom => FolderType::Project,
                };
                self.session.set_folder_type(next);
            }
            FormField::Zip => {
                let zip = !self.session.zip();
                self.session.set_zip(zip);
            }
            FormField::SequenceMode => {
                let next = match self.session.sequence_mode() {
                    SequenceMode::SingleImage => SequenceMode::ImageSequence,
                    SequenceMode::ImageSequence => SequenceMode::SingleImage,
                };
                self.session.set_sequence_mode(next);
                self.name_field.set(self.session.name());
            }
            _ => {}
        }
        self.ensure_focus_visible();
    }

    pub fn reset_name(&mut self) {
        if self.is_export_running() || self.session.name_is_read_only() {
            return;
        }
        let was_reserved = self.session.reserved_name();
        self.session.reset_name();
        self.name_field.set(self.session.name());
        self.check_reserved_name(was_reserved);
    }

    // === 텍스트 입력 ===

    /// 텍스트 필드 편집 키 처리. 처리했으면 true.
    pub fn handle_text_key(&mut self, modifiers: KeyModifiers, code: KeyCode) -> bool {
        if !self.focus.is_text() || self.is_export_running() {
            return false;
        }
        let field = match self.focus {
            FormField::CustomPath => &mut self.custom_field,
            FormField::AppendFolder => &mut self.append_field,
            _ => &mut self.name_field,
        };

        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => field.delete_prev_word(),
            (m, KeyCode::Char(c))
                if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) =>
            {
                field.insert_char(c)
            }
            (_, KeyCode::Backspace) => field.backspace(),
            (_, KeyCode::Delete) => field.delete(),
            (_, KeyCode::Left) => field.left(),
            (_, KeyCode::Right) => field.right(),
            (_, KeyCode::Home) => field.home(),
            (_, KeyCode::End) => field.end(),
            _ => return false,
        }

        self.sync_text_field();
        true
    }

    /// 편집 중인 값을 세션에 반영 (출력 경로 미리보기 갱신)
    fn sync_text_field(&mut self) {
        let was_reserved = self.session.reserved_name();
        match self.focus {
            FormField::CustomPath => {
                let value = self.custom_field.value().to_string();
                self.session.set_custom_path(&value);
            }
            FormField::AppendFolder => {
                let value = self.append_field.value().to_string();
                self.session.set_append_folder(&value);
            }
            FormField::Name => {
                let value = self.name_field.value().to_string();
                self.session.set_name(&value);
            }
            _ => {}
        }
        self.check_reserved_name(was_reserved);
    }

    /// 이름이 새로 예약 이름이 되면 경고 (사용은 막지 않는다)
    fn check_reserved_name(&mut self, was_reserved: bool) {
        if !was_reserved && self.session.reserved_name() {
            self.warn_reserved_name();
        }
    }

    pub(super) fn warn_reserved_name(&mut self) {
        self.push_notice(DialogKind::notice("Warning", RESERVED_NAME_WARNING));
    }
}
