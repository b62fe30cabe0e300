//! 내보내기 폼 위젯
//!
//! 세션 상태를 한 화면에 그린다: 소스 정보, 위치 선택, 이름 입력, 옵션,
//! 출력 경로 미리보기, 진행률.

use crate::core::naming::{SequenceMode, RESERVED_NAME_WARNING};
use crate::core::session::ExportSession;
use crate::models::export_job::ExportState;
use crate::models::recents::FolderType;
use crate::ui::layout::MAX_DESTINATION_ROWS;
use crate::ui::Theme;
use crate::utils::path_display::{truncate_middle, truncate_path_start};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, Widget},
};

/// 레이블 열 너비
const LABEL_WIDTH: u16 = 11;

/// 포커스 가능한 폼 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FolderType,
    Destination,
    CustomPath,
    AppendFolder,
    Name,
    Zip,
    SequenceMode,
}

impl FormField {
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::CustomPath | FormField::AppendFolder | FormField::Name
        )
    }
}

/// 입력 필드 표시값 (값, 커서 열)
#[derive(Debug, Clone, Default)]
pub struct InputView<'a> {
    pub value: &'a str,
    pub cursor_column: usize,
}

pub struct ExportForm<'a> {
    session: &'a ExportSession,
    focus: FormField,
    custom_input: InputView<'a>,
    append_input: InputView<'a>,
    name_input: InputView<'a>,
    state: &'a ExportState,
    progress: u8,
    message: &'a str,
    busy: bool,
    theme: Theme,
}

impl<'a> ExportForm<'a> {
    pub fn new(session: &'a ExportSession, state: &'a ExportState) -> Self {
        Self {
            session,
            focus: FormField::Name,
            custom_input: InputView::default(),
            append_input: InputView::default(),
            name_input: InputView::default(),
            state,
            progress: 0,
            message: "",
            busy: false,
            theme: Theme::default(),
        }
    }

    pub fn focus(mut self, focus: FormField) -> Self {
        self.focus = focus;
        self
    }

    pub fn inputs(
        mut self,
        custom: InputView<'a>,
        append: InputView<'a>,
        name: InputView<'a>,
    ) -> Self {
        self.custom_input = custom;
        self.append_input = append;
        self.name_input = name;
        self
    }

    pub fn progress(mut self, progress: u8, message: &'a str) -> Self {
        self.progress = progress;
        self.message = message;
        self
    }

    /// 작업 중에는 입력을 흐리게 표시
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.theme = theme.clone();
        self
    }

    pub fn progress_color(&self) -> Color {
        self.theme.progress_color(self.state)
    }

    fn fg(&self) -> Style {
        Style::default().fg(self.theme.fg_primary.to_color())
    }

    fn dim(&self) -> Style {
        Style::default().fg(self.theme.fg_dim.to_color())
    }

    fn label(&self, buf: &mut Buffer, x: u16, y: u16, text: &str, field: Option<FormField>) {
        let style = if field.is_some_and(|f| f == self.focus) && !self.busy {
            Style::default()
                .fg(self.theme.accent.to_color())
                .add_modifier(Modifier::BOLD)
        } else {
            self.dim()
        };
        buf.set_string(x, y, text, style);
    }

    fn radio(&self, selected: bool, text: &str) -> String {
        format!("({}) {}", if selected { "•" } else { " " }, text)
    }

    fn checkbox(&self, checked: bool, text: &str) -> String {
        format!("[{}] {}", if checked { "x" } else { " " }, text)
    }

    /// 한 줄 입력 필드 렌더링
    #[allow(clippy::too_many_arguments)]
    fn render_input(
        &self,
        buf: &mut Buffer,
        x: u16,
        y: u16,
        width: u16,
        input: &InputView<'_>,
        focused: bool,
        enabled: bool,
    ) {
        let bg = self.theme.field_bg.to_color();
        let fg = if enabled {
            self.theme.fg_primary.to_color()
        } else {
            self.theme.field_read_only.to_color()
        };
        for fx in x..x + width {
            if let Some(cell) = buf.cell_mut((fx, y)) {
                cell.set_bg(bg);
            }
        }

        let inner_width = width.saturating_sub(2) as usize;
        let shown = truncate_middle(input.value, inner_width);
        buf.set_string(x + 1, y, &shown, Style::default().fg(fg).bg(bg));

        if focused && enabled && shown == input.value {
            let cursor_x = x + 1 + input.cursor_column as u16;
            if cursor_x < x + width {
                if let Some(cell) = buf.cell_mut((cursor_x, y)) {
                    cell.set_style(Style::default().fg(bg).bg(fg));
                }
            }
        }
    }

    fn render_destinations(&self, buf: &mut Buffer, x: u16, y: u16, width: u16, rows: u16) {
        let labels = self.session.destination_labels();
        let active = self.session.folder_type() == FolderType::Project;
        if labels.is_empty() {
            buf.set_string(x, y, "No export locations configured", self.dim());
            return;
        }

        let selected = self.session.selected_destination();
        let first = selected.saturating_sub(rows.saturating_sub(1) as usize);
        for (row, (index, label)) in labels
            .iter()
            .enumerate()
            .skip(first)
            .take(rows as usize)
            .enumerate()
        {
            let line_y = y + row as u16;
            let text = truncate_middle(label, width.saturating_sub(2) as usize);
            let style = if index == selected && active {
                Style::default()
                    .fg(self.theme.selected_fg.to_color())
                    .bg(self.theme.selected_bg.to_color())
            } else if active {
                self.fg()
            } else {
                self.dim()
            };
            let marker = if index == selected { ">" } else { " " };
            buf.set_string(x, line_y, format!("{marker} {text}"), style);
        }
    }
}

impl Widget for ExportForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Export To Dir: {} ", self.session.context().label().trim_end_matches(':'));
        let block = Block::default()
            .title(title)
            .title_style(
                Style::default()
                    .fg(self.theme.title.to_color())
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused.to_color()))
            .style(Style::default().bg(self.theme.bg_primary.to_color()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width <= LABEL_WIDTH + 4 || inner.height < 12 {
            return;
        }

        let x = inner.x + 1;
        let vx = x + LABEL_WIDTH;
        let vw = inner.width.saturating_sub(LABEL_WIDTH + 2);
        let file = self.session.file();
        let mut y = inner.y;

        self.label(buf, x, y, "Source", None);
        buf.set_string(vx, y, truncate_middle(&file.source_filename, vw as usize), self.fg());
        y += 1;
        self.label(buf, x, y, "Project", None);
        buf.set_string(vx, y, truncate_middle(&file.project_name, vw as usize), self.fg());
        y += 2;

        // 위치
        let project_selected = self.session.folder_type() == FolderType::Project;
        self.label(buf, x, y, "Location", Some(FormField::FolderType));
        buf.set_string(
            vx,
            y,
            format!(
                "{}   {}",
                self.radio(project_selected, "Project"),
                self.radio(!project_selected, "Custom")
            ),
            self.fg(),
        );
        y += 1;

        let rows = (self.session.destinations().len() as u16).clamp(1, MAX_DESTINATION_ROWS);
        self.label(buf, x, y, "Folders", Some(FormField::Destination));
        self.render_destinations(buf, vx, y, vw, rows);
        y += rows;

        self.label(buf, x, y, "Custom", Some(FormField::CustomPath));
        self.render_input(
            buf,
            vx,
            y,
            vw,
            &self.custom_input,
            self.focus == FormField::CustomPath,
            !project_selected && !self.busy,
        );
        y += 1;

        self.label(buf, x, y, "Append", Some(FormField::AppendFolder));
        self.render_input(
            buf,
            vx,
            y,
            vw,
            &self.append_input,
            self.focus == FormField::AppendFolder,
            !self.busy,
        );
        y += 1;

        self.label(buf, x, y, "Name", Some(FormField::Name));
        self.render_input(
            buf,
            vx,
            y,
            vw,
            &self.name_input,
            self.focus == FormField::Name,
            !self.session.name_is_read_only() && !self.busy,
        );
        y += 1;

        // 옵션
        let option_field = if self.focus == FormField::SequenceMode {
            FormField::SequenceMode
        } else {
            FormField::Zip
        };
        self.label(buf, x, y, "Options", Some(option_field));
        let mut options = self.checkbox(self.session.zip(), "Zip");
        if self.session.is_sequence() {
            let single = self.session.sequence_mode() == SequenceMode::SingleImage;
            options.push_str(&format!(
                "   {}   {}",
                self.radio(single, "Single image"),
                self.radio(!single, "Image sequence")
            ));
        }
        buf.set_string(vx, y, options, self.fg());
        y += 2;

        self.label(buf, x, y, "Output", None);
        buf.set_string(
            vx,
            y,
            truncate_path_start(self.session.output_path(), vw as usize),
            Style::default().fg(self.theme.accent.to_color()),
        );
        y += 1;

        if self.session.reserved_name() {
            let first_line = RESERVED_NAME_WARNING.lines().next().unwrap_or_default();
            buf.set_string(
                vx,
                y,
                format!("{first_line}: do not use CON, PRN, AUX, NUL, COM, LPT"),
                Style::default().fg(self.theme.warning.to_color()),
            );
        }
        y += 2;

        // 진행률
        if y < inner.y + inner.height {
            let status_style = Style::default()
                .fg(self.progress_color())
                .add_modifier(Modifier::BOLD);
            buf.set_string(x, y, self.state.label(), status_style);
            let gauge_area = Rect {
                x: vx,
                y,
                width: vw,
                height: 1,
            };
            Gauge::default()
                .ratio(f64::from(self.progress.min(100)) / 100.0)
                .gauge_style(
                    Style::default()
                        .fg(self.progress_color())
                        .bg(self.theme.field_bg.to_color()),
                )
                .label(format!("{}%", self.progress))
                .render(gauge_area, buf);
            y += 1;
        }

        if y < inner.y + inner.height && !self.message.is_empty() {
            buf.set_string(vx, y, truncate_middle(self.message, vw as usize), self.dim());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::file_context::{FileContext, MenuContext, SourcePaths};
    use crate::models::project::ProjectConfig;
    use crate::models::settings::{ExportLocation, Settings};
    use std::path::PathBuf;

    fn session() -> ExportSession {
        let file = FileContext {
            project_name: "Foo".into(),
            source: SourcePaths::Single(PathBuf::from("/show/asset/charA")),
            source_dir: Some(PathBuf::from("/show/asset")),
            source_filename: "charA".into(),
            ..FileContext::default()
        };
        let mut settings = Settings::default();
        settings.add_location("Client", "/mnt/client");
        ExportSession::open(
            MenuContext::AssetFiles,
            file,
            settings,
            &ProjectConfig::default(),
        )
    }

    fn render(form: ExportForm<'_>) -> String {
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        form.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_form_shows_context_destination_and_status() {
        let session = session();
        let state = ExportState::Idle;
        let text = render(ExportForm::new(&session, &state).progress(0, ""));

        assert!(text.contains("Export To Dir: Asset Files"));
        assert!(text.contains("charA"));
        assert!(text.contains("Client"));
        assert!(text.contains("Idle..."));
        assert!(!text.contains("Name Not Allowed"));
    }

    #[test]
    fn test_progress_color_follows_state() {
        let session = session();
        let theme = Theme::dark();
        let running = ExportState::Copying;
        let done = ExportState::Complete;
        let failed = ExportState::Error("boom".into());

        assert_eq!(
            ExportForm::new(&session, &running).theme(&theme).progress_color(),
            Color::Rgb(0, 131, 195)
        );
        assert_eq!(
            ExportForm::new(&session, &done).theme(&theme).progress_color(),
            Color::Rgb(0, 150, 0)
        );
        assert_eq!(
            ExportForm::new(&session, &failed).theme(&theme).progress_color(),
            Color::Rgb(225, 0, 0)
        );
    }

    #[test]
    fn test_reserved_name_warning_is_rendered() {
        let mut session = session();
        session.set_name("con");
        let state = ExportState::Idle;
        let text = render(ExportForm::new(&session, &state));
        assert!(text.contains("Name Not Allowed"));
        assert!(session.destinations().contains(&ExportLocation::new("Client", "/mnt/client")));
    }
}
