// Frame layout and widgets

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{Mode, ViewModel};
use crate::cli::login::LoginField;
use crate::cli::output_manager::{LineStyle, OutputLine};
use crate::config::Palette;

const TITLE: &str = " termfolio ";
const PROMPT: &str = "> ";

pub fn draw(f: &mut Frame, view: &ViewModel) {
    let area = f.area();
    let base = Style::default()
        .bg(view.palette.background.to_color())
        .fg(view.palette.foreground.to_color());
    f.render_widget(Block::default().style(base), area);

    match view.mode {
        Mode::Login => draw_login(f, area, view),
        Mode::Terminal => draw_terminal(f, area, view),
    }
}

fn draw_terminal(f: &mut Frame, area: Rect, view: &ViewModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    match &view.idle {
        Some((log, slide)) => draw_idle(f, chunks[0], &view.palette, log, slide.as_ref()),
        None => draw_output(f, chunks[0], view),
    }

    let prompt = Line::from(vec![
        Span::styled(PROMPT, accent(&view.palette).add_modifier(Modifier::BOLD)),
        Span::raw(view.input.clone()),
        Span::styled("█", accent(&view.palette)),
    ]);
    f.render_widget(Paragraph::new(prompt), chunks[1]);

    let status = Paragraph::new(view.status.clone())
        .style(Style::default().fg(view.palette.secondary.to_color()).bg(view.palette.border.to_color()))
        .alignment(Alignment::Right);
    f.render_widget(status, chunks[2]);
}

fn draw_output(f: &mut Frame, area: Rect, view: &ViewModel) {
    let block = bordered(&view.palette).title(TITLE);
    let height = block.inner(area).height as usize;

    let total = view.lines.len();
    let top = first_visible_row(total, height, view.scroll_back);
    let lines: Vec<Line> = view
        .lines
        .iter()
        .map(|line| output_line(line, &view.palette))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((top.min(u16::MAX as usize) as u16, 0));
    f.render_widget(paragraph, area);
}

/// Index of the first row shown when `scroll_back` rows are hidden below.
pub fn first_visible_row(total: usize, height: usize, scroll_back: usize) -> usize {
    let max_top = total.saturating_sub(height);
    max_top.saturating_sub(scroll_back)
}

fn output_line(line: &OutputLine, palette: &Palette) -> Line<'static> {
    let style = match line.style {
        LineStyle::Normal => Style::default().fg(palette.foreground.to_color()),
        LineStyle::Echo => accent(palette).add_modifier(Modifier::BOLD),
        LineStyle::Glitch => Style::default()
            .fg(palette.glitch.to_color())
            .add_modifier(Modifier::BOLD),
    };
    Line::from(Span::styled(line.display_text(), style))
}

fn draw_idle(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    log: &[String],
    slide: Option<&crate::cli::idle::Slide>,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let log_lines: Vec<Line> = log
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(palette.secondary.to_color()))))
        .collect();
    f.render_widget(
        Paragraph::new(log_lines).block(bordered(palette).title(" system log ")),
        chunks[0],
    );

    let mut info = vec![Line::raw("")];
    if let Some(slide) = slide {
        info.push(Line::from(Span::styled(
            slide.title.clone(),
            accent(palette).add_modifier(Modifier::BOLD),
        )));
        info.push(Line::raw(""));
        info.extend(slide.lines.iter().map(|l| Line::raw(l.clone())));
    }
    info.push(Line::raw(""));
    info.push(Line::from(Span::styled(
        "press any key",
        Style::default().fg(palette.secondary.to_color()),
    )));
    f.render_widget(
        Paragraph::new(info)
            .alignment(Alignment::Center)
            .block(bordered(palette)),
        chunks[1],
    );
}

fn draw_login(f: &mut Frame, area: Rect, view: &ViewModel) {
    let palette = &view.palette;
    let login = &view.login;
    let form = centered(area, 50, 14);
    f.render_widget(Clear, form);

    let field = |label: &str, value: String, focused: bool| {
        let marker = if focused { "█" } else { "" };
        let style = if focused {
            accent(palette).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.foreground.to_color())
        };
        Line::from(vec![
            Span::styled(format!("{label:<10}"), style),
            Span::raw(value),
            Span::styled(marker, accent(palette)),
        ])
    };

    let mut lines = vec![
        Line::raw(""),
        field("Username:", login.username.clone(), login.focus == LoginField::Username),
        field("Password:", login.masked_password(), login.focus == LoginField::Password),
        Line::raw(""),
    ];
    if let Some(bar) = login.progress_bar() {
        lines.push(Line::from(Span::styled(bar, accent(palette))));
    }
    lines.extend(login.messages.iter().map(|m| Line::raw(m.clone())));

    f.render_widget(
        Paragraph::new(lines).block(bordered(palette).title(" SECURE LOGIN ")),
        form,
    );
}

fn bordered(palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border.to_color()))
}

fn accent(palette: &Palette) -> Style {
    Style::default().fg(palette.accent.to_color())
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_row_follows_bottom() {
        assert_eq!(first_visible_row(100, 20, 0), 80);
        assert_eq!(first_visible_row(10, 20, 0), 0);
    }

    #[test]
    fn test_first_visible_row_clamps_scroll_back() {
        assert_eq!(first_visible_row(100, 20, 30), 50);
        assert_eq!(first_visible_row(100, 20, 500), 0);
    }

    #[test]
    fn test_centered_fits_small_areas() {
        let r = centered(Rect::new(0, 0, 30, 10), 50, 14);
        assert_eq!(r, Rect::new(0, 0, 30, 10));
        let r = centered(Rect::new(0, 0, 100, 40), 50, 14);
        assert_eq!(r, Rect::new(25, 13, 50, 14));
    }
}
