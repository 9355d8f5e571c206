use ratatui::style::{Color, Modifier, Style};

// Pokedex palette: red casing, yellow for whatever is selected,
// blue labels on a dark screen
pub const CASING_RED: Color = Color::Rgb(214, 40, 40);
pub const ELECTRIC_YELLOW: Color = Color::Rgb(255, 204, 0);
pub const WATER_BLUE: Color = Color::Rgb(88, 144, 240);
pub const GRASS_GREEN: Color = Color::Rgb(120, 200, 80);
pub const FIRE_ORANGE: Color = Color::Rgb(240, 128, 48);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const SCREEN: Color = Color::Rgb(22, 26, 38);
const INK: Color = Color::Rgb(16, 16, 16);

pub fn title_style() -> Style {
    Style::default().fg(CASING_RED).add_modifier(Modifier::BOLD)
}

/// Selected list row or grid cell
pub fn selected_style() -> Style {
    Style::default()
        .fg(INK)
        .bg(ELECTRIC_YELLOW)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

/// Field labels and section headings
pub fn highlight_style() -> Style {
    Style::default().fg(WATER_BLUE)
}

pub fn success_style() -> Style {
    Style::default().fg(GRASS_GREEN)
}

pub fn error_style() -> Style {
    Style::default().fg(FIRE_ORANGE).add_modifier(Modifier::BOLD)
}

pub fn tab_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(INK)
            .bg(CASING_RED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(WATER_BLUE)
    }
}

/// Yellow around the focused element, red casing otherwise
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ELECTRIC_YELLOW)
    } else {
        Style::default().fg(CASING_RED)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(SCREEN).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(ELECTRIC_YELLOW)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}
