//! 액션 시스템
//!
//! 내보내기 대화상자의 키 바인딩과 커맨드 바 항목이 이 모듈의 레지스트리를 참조합니다.

use crate::ui::components::command_bar::CommandItem;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 대화상자에서 가능한 액션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NextField,
    PrevField,
    SelectPrev,
    SelectNext,
    Toggle,
    Execute,
    ResetName,
    BrowseCustomPath,
    ShowPlaceholders,
    Cancel,
    Quit,
}

/// 액션 메타데이터
#[derive(Debug, Clone)]
pub struct ActionDef {
    pub action: Action,
    pub id: &'static str,
    pub label: &'static str,
    pub shortcut_display: Option<&'static str>,
    pub command_bar: Option<CommandBarEntry>,
}

/// 커맨드 바 표시 정보
#[derive(Debug, Clone)]
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub code: KeyCode,
    /// `None`이면 모든 수정자 허용
    pub modifiers: Option<KeyModifiers>,
    pub action: Action,
}

pub static ACTION_DEFS: &[ActionDef] = &[
    ActionDef {
        action: Action::NextField,
        id: "next_field",
        label: "Next field",
        shortcut_display: Some("Tab"),
        command_bar: Some(CommandBarEntry {
            key: "Tab",
            label: "Field",
            priority: 1,
        }),
    },
    ActionDef {
        action: Action::PrevField,
        id: "prev_field",
        label: "Previous field",
        shortcut_display: Some("Shift+Tab"),
        command_bar: None,
    },
    ActionDef {
        action: Action::SelectPrev,
        id: "select_prev",
        label: "Previous choice",
        shortcut_display: Some("Up"),
        command_bar: None,
    },
    ActionDef {
        action: Action::SelectNext,
        id: "select_next",
        label: "Next choice",
        shortcut_display: Some("Down"),
        command_bar: Some(CommandBarEntry {
            key: "↑↓",
            label: "Choose",
            priority: 2,
        }),
    },
    ActionDef {
        action: Action::Toggle,
        id: "toggle",
        label: "Toggle option",
        shortcut_display: Some("Space"),
        command_bar: Some(CommandBarEntry {
            key: "Space",
            label: "Toggle",
            priority: 3,
        }),
    },
    ActionDef {
        action: Action::Execute,
        id: "execute",
        label: "Execute export",
        shortcut_display: Some("Enter"),
        command_bar: Some(CommandBarEntry {
            key: "Enter",
            label: "Execute",
            priority: 0,
        }),
    },
    ActionDef {
        action: Action::ResetName,
        id: "reset_name",
        label: "Reset name",
        shortcut_display: Some("Ctrl+R"),
        command_bar: Some(CommandBarEntry {
            key: "^R",
            label: "Reset",
            priority: 4,
        }),
    },
    ActionDef {
        action: Action::BrowseCustomPath,
        id: "browse",
        label: "Browse for folder",
        shortcut_display: Some("Ctrl+O"),
        command_bar: Some(CommandBarEntry {
            key: "^O",
            label: "Browse",
            priority: 5,
        }),
    },
    ActionDef {
        action: Action::ShowPlaceholders,
        id: "placeholders",
        label: "Show placeholders",
        shortcut_display: Some("F1"),
        command_bar: Some(CommandBarEntry {
            key: "F1",
            label: "Placeholders",
            priority: 6,
        }),
    },
    ActionDef {
        action: Action::Cancel,
        id: "cancel",
        label: "Close",
        shortcut_display: Some("Esc"),
        command_bar: Some(CommandBarEntry {
            key: "Esc",
            label: "Close",
            priority: 7,
        }),
    },
    ActionDef {
        action: Action::Quit,
        id: "quit",
        label: "Quit",
        shortcut_display: Some("Ctrl+C"),
        command_bar: None,
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::Esc,
            modifiers: None,
            action: Action::Cancel,
        },
        KeyBinding {
            code: KeyCode::Tab,
            modifiers: None,
            action: Action::NextField,
        },
        KeyBinding {
            code: KeyCode::BackTab,
            modifiers: None,
            action: Action::PrevField,
        },
        KeyBinding {
            code: KeyCode::Up,
            modifiers: None,
            action: Action::SelectPrev,
        },
        KeyBinding {
            code: KeyCode::Down,
            modifiers: None,
            action: Action::SelectNext,
        },
        KeyBinding {
            code: KeyCode::Char(' '),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Toggle,
        },
        KeyBinding {
            code: KeyCode::Enter,
            modifiers: None,
            action: Action::Execute,
        },
        KeyBinding {
            code: KeyCode::F(5),
            modifiers: None,
            action: Action::Execute,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::ResetName,
        },
        KeyBinding {
            code: KeyCode::Char('o'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::BrowseCustomPath,
        },
        KeyBinding {
            code: KeyCode::F(1),
            modifiers: None,
            action: Action::ShowPlaceholders,
        },
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    key_bindings()
        .iter()
        .find(|binding| {
            binding.code == code
                && match binding.modifiers {
                    None => true,
                    Some(required) => modifiers == required,
                }
        })
        .map(|binding| binding.action)
}

impl Action {
    pub fn from_id(id: &str) -> Option<Action> {
        ACTION_DEFS.iter().find(|d| d.id == id).map(|d| d.action)
    }
}

/// 커맨드 바 항목 생성 (우선순위 순)
pub fn generate_command_bar_items() -> Vec<CommandItem> {
    let mut entries: Vec<&CommandBarEntry> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref())
        .collect();

    entries.sort_by_key(|cb| cb.priority);

    entries
        .into_iter()
        .map(|cb| CommandItem::new(cb.key, cb.label))
        .collect()
}

pub fn get_shortcut_display(id: &str) -> Option<&'static str> {
    ACTION_DEFS
        .iter()
        .find(|d| d.id == id)
        .and_then(|d| d.shortcut_display)
}
