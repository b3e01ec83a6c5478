//! Colors and glyphs for the viewer.
use ratatui::style::{Color, Modifier, Style};
use targeting_core::CellFlags;

/// Terminal styling for grid cells and side panels.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewerTheme;

impl ViewerTheme {
    /// Glyph and style for one grid cell. Cells are two columns wide so the
    /// grid reads roughly square.
    pub fn render_cell(&self, flags: CellFlags, is_cursor: bool) -> (&'static str, Style) {
        let (glyph, mut style) = if flags.contains(CellFlags::ORIGIN) {
            (
                "@ ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else if flags.contains(CellFlags::BLOCKED) {
            ("##", Style::default().fg(Color::Gray))
        } else if flags.contains(CellFlags::TARGET) {
            (
                "X ",
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
            )
        } else if flags.contains(CellFlags::AOE) {
            ("* ", Style::default().fg(Color::LightRed))
        } else if flags.contains(CellFlags::IN_RANGE) {
            ("+ ", Style::default().fg(Color::LightCyan))
        } else {
            (". ", Style::default().fg(Color::DarkGray))
        };

        // Background carries the area so it stays visible under other glyphs.
        if flags.contains(CellFlags::AOE) {
            style = style.bg(Color::Rgb(70, 20, 20));
        } else if flags.contains(CellFlags::IN_RANGE) {
            style = style.bg(Color::Rgb(20, 30, 50));
        }

        if is_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }

        (glyph, style)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_glyph_wins_over_area() {
        let theme = ViewerTheme;
        let (glyph, style) = theme.render_cell(CellFlags::ORIGIN | CellFlags::AOE, false);
        assert_eq!(glyph, "@ ");
        assert_eq!(style.bg, Some(Color::Rgb(70, 20, 20)));
    }

    #[test]
    fn cursor_reverses_video() {
        let theme = ViewerTheme;
        let (_, style) = theme.render_cell(CellFlags::empty(), true);
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }
}
