use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState, WhichUse};

/// Renders a bordered box with an animated spinner and `label` on its middle row
pub fn render_spinner(
    frame: &mut Frame,
    state: &mut ThrobberState,
    title: &str,
    label: &str,
    area: Rect,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .style(Style::default());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(inner);

    let throbber = Throbber::default()
        .label(label)
        .style(Style::default().fg(Color::Cyan))
        .throbber_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);

    frame.render_stateful_widget(throbber, rows[1], state);
}
