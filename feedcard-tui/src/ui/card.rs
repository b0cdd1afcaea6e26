use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::formatting::{wrap_text, COMMENT_PLACEHOLDER};
use super::theme::ThemeColors;
use crate::card::{CardView, CommentsPanelView, DeleteControl};

// Total horizontal padding from borders (2 per side)
const BORDER_PADDING: u16 = 4;

/// Render a post card. Draws nothing when the card has been removed.
pub fn render_card(frame: &mut Frame, area: Rect, view: Option<&CardView>, theme: &ThemeColors) {
    let view = match view {
        Some(view) => view,
        None => return,
    };

    let width = area.width.saturating_sub(BORDER_PADDING) as usize;
    let mut lines = header_lines(view, theme);

    lines.push(Line::from(""));
    for line in wrap_text(&view.text, width) {
        lines.push(Line::from(Span::styled(line, Style::default().fg(theme.text))));
    }
    if let Some(image) = &view.image {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[image] {}", image),
            Style::default().fg(theme.text_dim),
        )));
    }

    lines.push(Line::from(""));
    lines.push(action_line(view, theme));

    if let Some(panel) = &view.comments_panel {
        lines.push(Line::from("─".repeat(width)).style(Style::default().fg(theme.border)));
        lines.extend(comment_panel_lines(panel, width, theme));
    }

    lines.push(Line::from(""));
    lines.push(help_line(view, theme));

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.background)),
    );
    frame.render_widget(card, area);

    if let Some(banner) = view.share_banner {
        render_share_banner(frame, area, banner, theme);
    }

    if let DeleteControl::Confirm { prompt, error, busy } = &view.delete {
        render_delete_confirmation(frame, area, prompt, error.as_deref(), *busy, theme);
    }
}

fn header_lines(view: &CardView, theme: &ThemeColors) -> Vec<Line<'static>> {
    let mut name = vec![Span::styled(
        view.author_name.clone(),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )];
    if !view.author_details.is_empty() {
        name.push(Span::styled(
            format!("  {}", view.author_details),
            Style::default().fg(theme.text_dim),
        ));
    }
    if view.delete != DeleteControl::Hidden {
        name.push(Span::styled("  ✕", Style::default().fg(theme.error)));
    }

    vec![
        Line::from(name),
        Line::from(Span::styled(
            view.posted.clone(),
            Style::default().fg(theme.text_dim),
        )),
    ]
}

fn action_line(view: &CardView, theme: &ThemeColors) -> Line<'static> {
    let like_style = if view.liked {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let like_icon = if view.liked { "♥" } else { "♡" };
    let like_text = if view.like_busy {
        format!("{} {} …", like_icon, view.like_count)
    } else {
        format!("{} {}", like_icon, view.like_count)
    };

    Line::from(vec![
        Span::styled(like_text, like_style),
        Span::raw("    "),
        Span::styled(
            format!("💬 {}", view.comment_count),
            Style::default().fg(theme.text),
        ),
        Span::raw("    "),
        Span::styled("⇪ Export", Style::default().fg(theme.text_dim)),
    ])
}

fn comment_panel_lines(
    panel: &CommentsPanelView,
    width: usize,
    theme: &ThemeColors,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let input = if panel.draft.is_empty() {
        Span::styled(COMMENT_PLACEHOLDER, Style::default().fg(theme.text_dim))
    } else {
        Span::styled(format!("{}_", panel.draft), Style::default().fg(theme.text))
    };
    let submit_style = if panel.submit_disabled {
        Style::default().fg(theme.text_dim)
    } else {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(vec![
        Span::styled("> ", Style::default().fg(theme.accent)),
        input,
        Span::raw("  "),
        Span::styled(format!("[{}]", panel.submit_label), submit_style),
    ]));

    if let Some(error) = &panel.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    }

    for comment in &panel.comments {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                comment.author_name.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", comment.posted),
                Style::default().fg(theme.text_dim),
            ),
        ]));
        for line in wrap_text(&comment.text, width.saturating_sub(2)) {
            lines.push(Line::from(Span::styled(
                format!("  {}", line),
                Style::default().fg(theme.text),
            )));
        }
    }

    lines
}

fn help_line(view: &CardView, theme: &ThemeColors) -> Line<'static> {
    let key = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.text_dim);

    if view.comments_panel.is_some() {
        return Line::from(vec![
            Span::styled("Enter", key),
            Span::styled(": Post  ", text),
            Span::styled("Ctrl+L", key),
            Span::styled(": Like  ", text),
            Span::styled("Ctrl+S", key),
            Span::styled(": Share  ", text),
            Span::styled("Esc", key),
            Span::styled(": Close", text),
        ]);
    }

    let mut spans = vec![
        Span::styled("l", key),
        Span::styled(": Like  ", text),
        Span::styled("c", key),
        Span::styled(": Comments  ", text),
        Span::styled("s", key),
        Span::styled(": Share  ", text),
    ];
    if view.delete == DeleteControl::Button {
        spans.push(Span::styled("d", key));
        spans.push(Span::styled(": Delete  ", text));
    }
    spans.push(Span::styled("q", key));
    spans.push(Span::styled(": Quit", text));
    Line::from(spans)
}

fn render_share_banner(frame: &mut Frame, area: Rect, banner: &str, theme: &ThemeColors) {
    let banner_width = (banner.chars().count() as u16 + 4).min(area.width);
    let banner_area = Rect {
        x: area.x + area.width.saturating_sub(banner_width + 1),
        y: area.y + 1,
        width: banner_width,
        height: 1,
    };

    frame.render_widget(Clear, banner_area);
    frame.render_widget(
        Paragraph::new(banner.to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.background).bg(theme.success)),
        banner_area,
    );
}

fn render_delete_confirmation(
    frame: &mut Frame,
    area: Rect,
    prompt: &str,
    error: Option<&str>,
    busy: bool,
    theme: &ThemeColors,
) {
    let modal_area = centered_rect(60, 40, area);
    frame.render_widget(Clear, modal_area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(prompt.to_string(), Style::default().fg(theme.text))),
        Line::from(""),
    ];

    if let Some(error) = error {
        content.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )));
        content.push(Line::from(""));
    }

    if busy {
        content.push(Line::from(Span::styled(
            "Deleting...",
            Style::default().fg(theme.text_dim),
        )));
    } else {
        content.push(Line::from(vec![
            Span::styled("Y", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::styled(": Yes, Delete  ", Style::default().fg(theme.text)),
            Span::styled("N", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
            Span::styled(": Cancel", Style::default().fg(theme.text)),
        ]));
    }

    let modal = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .title(" Delete Post ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.warning).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(theme.background)),
    );
    frame.render_widget(modal, modal_area);
}

/// Centered rectangle taking the given percentages of `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
