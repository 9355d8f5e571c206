use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use pokegrid_core::models::Pokemon;
use pokegrid_core::utils::truncate;

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_pokemon_list(frame, app, chunks[0]);

    let detail_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_selected(frame, app, detail_chunks[0]);
    render_lookup(frame, app, detail_chunks[1]);
}

fn render_pokemon_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = if app.pokemon.is_empty() {
        let text = if app.list_loading {
            "Loading..."
        } else {
            "No pokemon loaded - press [u] to fetch"
        };
        vec![ListItem::new(Line::styled(text, styles::muted_style()))]
    } else {
        app.pokemon
            .iter()
            .enumerate()
            .map(|(i, pokemon)| {
                let line = Line::from(format!("#{:<5} {}", pokemon.id, truncate(&pokemon.name, 20)));
                let style = if i == app.pokemon_selection {
                    styles::selected_style()
                } else {
                    styles::list_item_style()
                };
                ListItem::new(line).style(style)
            })
            .collect()
    };

    let block = Block::default()
        .title(format!(" Pokemon ({}) ", app.pokemon.len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    if !app.pokemon.is_empty() {
        state.select(Some(app.pokemon_selection));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn pokemon_lines(pokemon: &Pokemon) -> Vec<Line<'static>> {
    let image = if pokemon.has_image() {
        Span::styled(pokemon.image.clone(), styles::success_style())
    } else {
        Span::styled("No sprite", styles::muted_style())
    };

    vec![
        Line::from(vec![
            Span::styled("Name:   ", styles::highlight_style()),
            Span::raw(pokemon.name.clone()),
        ]),
        Line::from(vec![
            Span::styled("Number: ", styles::highlight_style()),
            Span::raw(pokemon.id.to_string()),
        ]),
        Line::from(vec![Span::styled("Sprite: ", styles::highlight_style()), image]),
    ]
}

fn render_selected(frame: &mut Frame, app: &App, area: Rect) {
    let (title, lines) = match app.selected_pokemon() {
        Some(pokemon) => (format!(" {} ", pokemon.name), pokemon_lines(pokemon)),
        None => (
            " Details ".to_string(),
            vec![Line::styled("Nothing selected", styles::muted_style())],
        ),
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_lookup(frame: &mut Frame, app: &App, area: Rect) {
    let lines = if app.lookup_loading {
        vec![Line::styled("Looking up...", styles::muted_style())]
    } else if let Some(ref error) = app.lookup_error {
        vec![Line::styled(error.clone(), styles::error_style())]
    } else if let Some(ref pokemon) = app.lookup_result {
        pokemon_lines(pokemon)
    } else {
        vec![Line::from(vec![
            Span::styled("Press ", styles::muted_style()),
            Span::styled("/", styles::help_key_style()),
            Span::styled(" to look up a pokemon by name or number", styles::muted_style()),
        ])]
    };

    let block = Block::default()
        .title(" Lookup ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
