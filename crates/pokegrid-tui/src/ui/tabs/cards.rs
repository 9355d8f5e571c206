use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use pokegrid_core::utils::truncate;

use crate::app::{App, GRID_COLUMNS};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(5)])
        .split(area);

    render_grid(frame, app, chunks[0]);
    render_card_detail(frame, app, chunks[1]);
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Memory Cards ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let row_count = app.cards.len().div_ceil(GRID_COLUMNS);
    if row_count == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
        .split(inner);

    for (row_index, row_area) in rows.iter().enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);

        for (col_index, cell) in columns.iter().enumerate() {
            let index = row_index * GRID_COLUMNS + col_index;
            let Some(card) = app.cards.get(index) else {
                continue;
            };
            let selected = index == app.card_selection;

            let cell_block = Block::default()
                .title(format!(" #{} ", card.id))
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(selected));

            let title_style = if selected {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            let width = cell.width.saturating_sub(2) as usize;

            let paragraph = Paragraph::new(Line::styled(truncate(card.title, width), title_style))
                .alignment(Alignment::Center)
                .block(cell_block);
            frame.render_widget(paragraph, *cell);
        }
    }
}

fn render_card_detail(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.selected_card() {
        Some(card) => vec![
            Line::from(vec![
                Span::styled("Title: ", styles::highlight_style()),
                Span::raw(card.title),
            ]),
            Line::from(vec![
                Span::styled("Image: ", styles::highlight_style()),
                Span::styled(card.image, styles::muted_style()),
            ]),
        ],
        None => vec![Line::styled("No card selected", styles::muted_style())],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
