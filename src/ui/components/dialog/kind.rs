use crate::core::session::Collision;
use crate::models::directory_picker::DirectoryPicker;
use crate::models::file_context::MenuContext;

/// 다이얼로그 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// 알림 (OK 버튼 하나)
    Notice { title: String, message: String },
    /// 오류 알림
    Error { title: String, message: String },
    /// 덮어쓰기 확인 (Yes/No)
    Overwrite {
        collision: Collision,
        selected_button: usize, // 0: Yes, 1: No
    },
    /// 컨텍스트별 사용 가능한 플레이스홀더
    Placeholders {
        context: MenuContext,
        tokens: Vec<&'static str>,
    },
    /// 사용자 지정 경로 폴더 선택
    DirectoryPicker(DirectoryPicker),
}

/// 다이얼로그 키 처리 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    /// 아직 열려 있음
    Pending,
    Closed,
    Confirmed,
    Declined,
}

impl DialogKind {
    pub fn notice(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Notice {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    /// 기본 선택은 No
    pub fn overwrite(collision: Collision) -> Self {
        DialogKind::Overwrite {
            collision,
            selected_button: 1,
        }
    }

    pub fn placeholders(context: MenuContext, tokens: Vec<&'static str>) -> Self {
        DialogKind::Placeholders { context, tokens }
    }

    pub fn title(&self) -> String {
        match self {
            DialogKind::Notice { title, .. } | DialogKind::Error { title, .. } => title.clone(),
            DialogKind::Overwrite { collision, .. } => collision.title(),
            DialogKind::Placeholders { .. } => "Placeholders".to_string(),
            DialogKind::DirectoryPicker(_) => "Select Save Directory".to_string(),
        }
    }

    /// 버튼 선택 이동 (Yes/No 다이얼로그만)
    pub fn toggle_button(&mut self) {
        if let DialogKind::Overwrite {
            selected_button, ..
        } = self
        {
            *selected_button = 1 - *selected_button;
        }
    }

    /// Enter 결과
    pub fn submit(&self) -> DialogResult {
        match self {
            DialogKind::Overwrite {
                selected_button: 0,
                ..
            } => DialogResult::Confirmed,
            DialogKind::Overwrite { .. } => DialogResult::Declined,
            _ => DialogResult::Closed,
        }
    }

    /// Esc 결과
    pub fn cancel(&self) -> DialogResult {
        match self {
            DialogKind::Overwrite { .. } => DialogResult::Declined,
            _ => DialogResult::Closed,
        }
    }
}
