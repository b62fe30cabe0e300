use super::DialogKind;
use crate::models::directory_picker::{entry_name, DirectoryPicker};
use crate::ui::Theme;
use crate::utils::path_display::truncate_path_start;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 다이얼로그 내부 상단 패딩 (border 아래 여백)
const DIALOG_V_PADDING: u16 = 1;
/// 폴더 선택기에 한 번에 보이는 항목 수
const PICKER_ROWS: u16 = 12;
const PICKER_HINT: &str = "Enter select  → open  ← up  Esc cancel";

pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    title_color: Color,
    button_bg: Color,
    button_fg: Color,
    button_selected_bg: Color,
    button_selected_fg: Color,
    warning_color: Color,
    error_color: Color,
    muted_color: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(0, 120, 212),
            title_color: Color::Rgb(0, 120, 212),
            button_bg: Color::Rgb(60, 60, 60),
            button_fg: Color::Rgb(212, 212, 212),
            button_selected_bg: Color::Rgb(0, 120, 212),
            button_selected_fg: Color::White,
            warning_color: Color::Rgb(255, 165, 0),
            error_color: Color::Rgb(225, 0, 0),
            muted_color: Color::Rgb(128, 128, 128),
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.field_bg.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.border_color = theme.border_focused.to_color();
        self.title_color = theme.accent.to_color();
        self.button_bg = theme.border.to_color();
        self.button_fg = theme.fg_primary.to_color();
        self.button_selected_bg = theme.selected_bg.to_color();
        self.button_selected_fg = theme.selected_fg.to_color();
        self.warning_color = theme.warning.to_color();
        self.error_color = theme.progress_error.to_color();
        self.muted_color = theme.fg_dim.to_color();
        self
    }

    /// 다이얼로그 영역 계산 (화면 중앙)
    fn calculate_area(&self, screen: Rect) -> Rect {
        let sw = screen.width;
        let sh = screen.height;

        let (width, height) = match self.kind {
            DialogKind::Notice { message, .. } | DialogKind::Error { message, .. } => {
                let lines = message.lines().count().max(1) as u16;
                let w = 60u16.min(sw.saturating_sub(4)).max(30);
                (w, 6 + lines)
            }
            DialogKind::Overwrite { collision, .. } => {
                let lines = collision.message().lines().count() as u16;
                let w = 70u16.min(sw.saturating_sub(4)).max(36);
                (w, 6 + lines)
            }
            DialogKind::Placeholders { tokens, .. } => {
                let w = 40u16.min(sw.saturating_sub(4)).max(30);
                (w, 6 + tokens.len() as u16)
            }
            DialogKind::DirectoryPicker(picker) => {
                let rows = (picker.entries().len().max(1) as u16).min(PICKER_ROWS);
                let w = 70u16.min(sw.saturating_sub(4)).max(40);
                (w, 7 + rows)
            }
        };

        let width = width.min(sw.saturating_sub(4));
        let height = height.min(sh.saturating_sub(2));

        Rect {
            x: screen.x + (sw.saturating_sub(width)) / 2,
            y: screen.y + (sh.saturating_sub(height)) / 2,
            width,
            height,
        }
    }

    /// 버튼 렌더링 헬퍼
    fn render_button(&self, buf: &mut Buffer, x: u16, y: u16, label: &str, is_selected: bool) -> u16 {
        let (bg, fg) = if is_selected {
            (self.button_selected_bg, self.button_selected_fg)
        } else {
            (self.button_bg, self.button_fg)
        };

        let padded_label = format!(" {} ", label);
        let width = padded_label.width() as u16;
        buf.set_string(x, y, &padded_label, Style::default().fg(fg).bg(bg));
        width
    }

    fn render_frame(&self, buf: &mut Buffer, area: Rect, title: &str, accent: Color) -> Rect {
        Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);

        Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(DIALOG_V_PADDING + 3),
        }
    }

    fn render_message(&self, buf: &mut Buffer, area: Rect, title: &str, message: &str, accent: Color) {
        let inner = self.render_frame(buf, area, title, accent);
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: false })
            .render(inner, buf);

        let button_y = area.y + area.height.saturating_sub(2);
        let button_width = " OK ".width() as u16;
        let button_x = area.x + (area.width.saturating_sub(button_width)) / 2;
        self.render_button(buf, button_x, button_y, "OK", true);
    }

    fn render_overwrite(&self, buf: &mut Buffer, area: Rect, message: &str, selected_button: usize) {
        let inner = self.render_frame(buf, area, &self.kind.title(), self.warning_color);
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: false })
            .render(inner, buf);

        let button_y = area.y + area.height.saturating_sub(2);
        let buttons_width = (" Yes ".width() + 2 + " No ".width()) as u16;
        let button_x = area.x + (area.width.saturating_sub(buttons_width)) / 2;
        let yes_width = self.render_button(buf, button_x, button_y, "Yes", selected_button == 0);
        self.render_button(
            buf,
            button_x + yes_width + 2,
            button_y,
            "No",
            selected_button == 1,
        );
    }

    fn render_placeholders(&self, buf: &mut Buffer, area: Rect, context_label: &str, tokens: &[&str]) {
        let inner = self.render_frame(buf, area, &self.kind.title(), self.title_color);
        buf.set_string(
            inner.x,
            inner.y,
            context_label,
            Style::default().fg(self.muted_color),
        );
        for (i, token) in tokens.iter().enumerate() {
            let y = inner.y + 2 + i as u16;
            if y >= area.y + area.height.saturating_sub(1) {
                break;
            }
            buf.set_string(inner.x + 2, y, token, Style::default().fg(self.fg_color));
        }
    }

    fn render_picker(&self, buf: &mut Buffer, area: Rect, picker: &DirectoryPicker) {
        let inner = self.render_frame(buf, area, &self.kind.title(), self.title_color);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        buf.set_string(
            inner.x,
            inner.y,
            truncate_path_start(picker.dir(), inner.width as usize),
            Style::default()
                .fg(self.title_color)
                .add_modifier(Modifier::BOLD),
        );

        let rows = inner.height.saturating_sub(2) as usize;
        let list_y = inner.y + 2;
        if picker.entries().is_empty() {
            buf.set_string(
                inner.x + 2,
                list_y,
                "(no subfolders)",
                Style::default().fg(self.muted_color),
            );
        } else if rows > 0 {
            // 선택 항목이 보이도록 스크롤
            let offset = (picker.selected() + 1).saturating_sub(rows);
            for (i, entry) in picker.entries().iter().enumerate().skip(offset).take(rows) {
                let y = list_y + (i - offset) as u16;
                let style = if i == picker.selected() {
                    Style::default()
                        .fg(self.button_selected_fg)
                        .bg(self.button_selected_bg)
                } else {
                    Style::default().fg(self.fg_color)
                };
                let label = format!(" {}/ ", entry_name(entry));
                buf.set_stringn(inner.x, y, label, inner.width as usize, style);
            }
        }

        let hint_y = area.y + area.height.saturating_sub(2);
        buf.set_stringn(
            inner.x,
            hint_y,
            PICKER_HINT,
            inner.width as usize,
            Style::default().fg(self.muted_color),
        );
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = self.calculate_area(area);

        // 배경 클리어
        Clear.render(dialog_area, buf);

        match self.kind {
            DialogKind::Notice { title, message } => {
                self.render_message(buf, dialog_area, title, message, self.title_color)
            }
            DialogKind::Error { title, message } => {
                self.render_message(buf, dialog_area, title, message, self.error_color)
            }
            DialogKind::Overwrite {
                collision,
                selected_button,
            } => self.render_overwrite(buf, dialog_area, &collision.message(), *selected_button),
            DialogKind::Placeholders { context, tokens } => {
                self.render_placeholders(buf, dialog_area, context.label(), tokens)
            }
            DialogKind::DirectoryPicker(picker) => self.render_picker(buf, dialog_area, picker),
        }
    }
}
