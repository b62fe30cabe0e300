//! 터미널이 대화상자보다 작을 때의 축약 화면
//!
//! 폼 대신 출력 경로와 작업 상태만 한 줄씩 보여준다.
//! 내보내기는 화면 크기와 상관없이 계속 진행된다.

use crate::models::export_job::ExportState;
use crate::ui::layout::{MIN_HEIGHT, MIN_WIDTH};
use crate::ui::Theme;
use crate::utils::path_display::truncate_path_start;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Gauge, Widget},
};
use std::path::Path;

pub struct CompactView<'a> {
    output_path: &'a Path,
    state: &'a ExportState,
    progress: u8,
    running: bool,
    size: (u16, u16),
    theme: Theme,
}

impl<'a> CompactView<'a> {
    pub fn new(output_path: &'a Path, state: &'a ExportState) -> Self {
        Self {
            output_path,
            state,
            progress: 0,
            running: false,
            size: (0, 0),
            theme: Theme::default(),
        }
    }

    pub fn progress(mut self, progress: u8, running: bool) -> Self {
        self.progress = progress;
        self.running = running;
        self
    }

    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.size = (width, height);
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.theme = theme.clone();
        self
    }

    /// 상태 줄: 실행 중이거나 끝난 작업이 있으면 상태 레이블, 없으면 대기 안내
    fn status_text(&self) -> String {
        if self.running || self.state.is_terminal() {
            format!("{} {}%", self.state.label(), self.progress.min(100))
        } else {
            "Export not started".to_string()
        }
    }
}

impl Widget for CompactView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.bg_primary.to_color()));
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        let warning = Style::default()
            .fg(self.theme.warning.to_color())
            .add_modifier(Modifier::BOLD);
        let fg = Style::default().fg(self.theme.fg_primary.to_color());
        let status = Style::default()
            .fg(self.theme.progress_color(self.state))
            .add_modifier(Modifier::BOLD);

        let size_line = format!(
            "{}x{} < {}x{}: enlarge to edit",
            self.size.0, self.size.1, MIN_WIDTH, MIN_HEIGHT
        );
        let lines = [
            (size_line, warning),
            (truncate_path_start(self.output_path, width), fg),
            (self.status_text(), status),
        ];

        let mut y = area.y;
        for (text, style) in lines {
            if y >= area.bottom() {
                return;
            }
            buf.set_stringn(area.x, y, text, width, style);
            y += 1;
        }

        if y < area.bottom() && (self.running || self.state.is_terminal()) {
            let gauge_area = Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            };
            Gauge::default()
                .ratio(f64::from(self.progress.min(100)) / 100.0)
                .gauge_style(
                    Style::default()
                        .fg(self.theme.progress_color(self.state))
                        .bg(self.theme.field_bg.to_color()),
                )
                .label("")
                .render(gauge_area, buf);
        }
    }
}
