// Layout system - 내보내기 대화상자 레이아웃
//
// 대화상자는 화면 중앙에 놓이고, 터미널이 너무 작으면 경고 화면을 보여준다.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 최소 터미널 크기 상수
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 24;
/// 대화상자 최대 너비
pub const DIALOG_MAX_WIDTH: u16 = 110;
/// 위치 목록에 보여줄 최대 줄 수
pub const MAX_DESTINATION_ROWS: u16 = 6;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Normal,
    /// 경고 모드 (터미널이 너무 작음)
    TooSmall,
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutAreas {
    /// 대화상자 테두리
    pub dialog: Rect,
    /// 폼 본문
    pub form: Rect,
    /// 하단 커맨드 바
    pub command_bar: Rect,
}

pub fn determine_mode(width: u16, height: u16) -> LayoutMode {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        LayoutMode::TooSmall
    } else {
        LayoutMode::Normal
    }
}

/// 대화상자 영역 계산 (가로 중앙, 세로는 위치 목록 길이에 맞춤)
pub fn calculate_areas(screen: Rect, destination_rows: u16) -> LayoutAreas {
    let width = screen.width.min(DIALOG_MAX_WIDTH);
    let wanted_height = 18 + destination_rows.clamp(1, MAX_DESTINATION_ROWS);
    let height = wanted_height.min(screen.height);

    let dialog = Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // 폼
            Constraint::Length(1), // 커맨드 바
        ])
        .split(dialog);

    LayoutAreas {
        dialog,
        form: chunks[0],
        command_bar: chunks[1],
    }
}
