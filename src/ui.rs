use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FocusPane, InputMode};
use crate::catalog::{Mode, INDUSTRIES};

const PROMPT_PLACEHOLDER: &str = "描述场景、镜头、情绪...";

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, hero banner, body, footer
    let [header_area, hero_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);
    render_hero(frame, hero_area);
    render_body(app, frame, body_area);
    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" AI Multi Studio ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_hero(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "多端 AI 影像工作台",
            Style::default().fg(Color::Magenta),
        )),
        Line::from(Span::styled(
            "启动你的未来感作品",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "连接 Sora2 + Gemini，一站式生成视频与图像",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let hero = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(hero, area);
}

fn render_body(app: &mut App, frame: &mut Frame, area: Rect) {
    let [left_area, prompt_area] =
        Layout::horizontal([Constraint::Length(28), Constraint::Min(0)]).areas(area);

    let [industry_area, mode_area, submit_area] = Layout::vertical([
        Constraint::Length(INDUSTRIES.len() as u16 + 2),
        Constraint::Length(Mode::all().len() as u16 + 2),
        Constraint::Length(3),
    ])
    .areas(left_area);

    render_industry_selector(app, frame, industry_area);
    render_mode_selector(app, frame, mode_area);
    render_submit(app, frame, submit_area);
    render_prompt(app, frame, prompt_area);
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn render_industry_selector(app: &mut App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = INDUSTRIES
        .iter()
        .map(|label| ListItem::new(Line::from(*label)))
        .collect();

    let list = List::new(items)
        .block(pane_block("行业情境", app.focus == FocusPane::Industry))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.industry_list);
}

fn render_mode_selector(app: &mut App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = Mode::all()
        .into_iter()
        .map(|mode| ListItem::new(Line::from(mode.display_name())))
        .collect();

    let list = List::new(items)
        .block(pane_block("输出形态", app.focus == FocusPane::Mode))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.mode_list);
}

fn render_submit(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Submit;
    let label_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Cyan)
    };
    let button = Paragraph::new(Line::from(Span::styled(" 启动生成 ", label_style)))
        .block(pane_block("", focused));
    frame.render_widget(button, area);
}

fn render_prompt(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Prompt;
    let editing = focused && app.input_mode == InputMode::Editing;

    let title = if editing { "提示词 (编辑中, Esc 退出)" } else { "提示词" };

    let content = if app.state.prompt().is_empty() && !editing {
        Text::from(Span::styled(
            PROMPT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(app.state.prompt().to_string())
    };

    let prompt = Paragraph::new(content)
        .block(pane_block(title, focused))
        .wrap(Wrap { trim: false });
    frame.render_widget(prompt, area);

    if editing {
        let (x, y) = prompt_cursor_offset(app.state.prompt(), app.prompt_cursor);
        let inner_width = area.width.saturating_sub(2);
        frame.set_cursor_position((
            area.x + 1 + x.min(inner_width.saturating_sub(1)),
            area.y + 1 + y.min(area.height.saturating_sub(3)),
        ));
    }
}

/// Cursor column/row within the prompt text, counting chars so CJK input
/// lands on the right cell boundary-wise for the common case.
fn prompt_cursor_offset(prompt: &str, cursor: usize) -> (u16, u16) {
    let before: String = prompt.chars().take(cursor).collect();
    let row = before.matches('\n').count() as u16;
    let col = before
        .rsplit('\n')
        .next()
        .map(|line| line.chars().count())
        .unwrap_or(0) as u16;
    (col, row)
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let dots = match app.animation_frame {
        0 => ".",
        1 => "..",
        _ => "...",
    };
    let status = if app.submitting() {
        format!("{}{}", app.state.status().trim_end_matches('.'), dots)
    } else {
        app.state.status().to_string()
    };

    let footer = Line::from(vec![
        Span::styled(status, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            "Tab 切换 | ↑/↓ 选择 | Enter 确认 | q 退出",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(footer), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_offset_tracks_lines_and_cjk() {
        assert_eq!(prompt_cursor_offset("", 0), (0, 0));
        assert_eq!(prompt_cursor_offset("abc", 2), (2, 0));
        assert_eq!(prompt_cursor_offset("ab\n文旅", 4), (1, 1));
        assert_eq!(prompt_cursor_offset("ab\n文旅", 3), (0, 1));
    }
}
