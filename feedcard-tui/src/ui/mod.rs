pub mod card;
pub mod formatting;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::Span,
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

use crate::card::PostCard;

/// Render the host screen: the card, or a notice once it has been removed
pub fn render(frame: &mut Frame, post_card: &PostCard, now: Instant) {
    let theme = theme::card_theme();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let view = post_card.view(now, chrono::Utc::now());
    card::render_card(frame, chunks[0], view.as_ref(), &theme);

    if view.is_none() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Post deleted. Press q to quit.",
                Style::default().fg(theme.text_dim),
            )),
            chunks[1],
        );
    }
}
