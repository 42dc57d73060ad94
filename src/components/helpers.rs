use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
};

pub fn dim_area(buf: &mut Buffer, area: Rect) {
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let cell = &mut buf[(x, y)];
            cell.set_style(cell.style().add_modifier(Modifier::DIM));
        }
    }
}

/// Horizontally centered by percentage, fixed height, placed a fifth of the
/// way down the screen.
pub fn card_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let top = (r.height.saturating_sub(height) / 5).min(r.height.saturating_sub(height));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(top),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100u16.saturating_sub(percent_x) / 2),
            Constraint::Percentage(percent_x.min(100)),
            Constraint::Percentage(100u16.saturating_sub(percent_x) / 2),
        ])
        .split(rows[1])[1]
}

pub fn draw_drop_shadow(buf: &mut Buffer, area: Rect, terminal_area: Rect) {
    let shadow_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width,
        height: area.height,
    };

    let shadow_area = shadow_area.intersection(terminal_area);

    for y in shadow_area.top()..shadow_area.bottom() {
        for x in shadow_area.left()..shadow_area.right() {
            let cell = &mut buf[(x, y)];
            cell.set_style(Style::default().bg(Color::Black));
            cell.set_symbol(" ");
        }
    }
}
