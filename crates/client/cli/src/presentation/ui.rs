//! Frame layout and panel rendering with Ratatui.
//!
//! ```text
//! ┌ header: summary or error ───────────────────────────┐
//! │ grid            │ variables                         │
//! │                 │ warnings                          │
//! │ hover info      │ rule text                         │
//! └ footer: keys and status ────────────────────────────┘
//! ```
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use targeting_core::{Cell, ErrorSeverity, RenderState, config::GridConfig};

use crate::{app::ViewerApp, presentation::theme::ViewerTheme};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const HOVER_PANEL_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, app: &ViewerApp) {
    let theme = ViewerTheme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app, &theme);
    render_body(frame, chunks[1], app, &theme);
    render_footer(frame, chunks[2], app, &theme);
}

fn render_header(frame: &mut Frame, area: Rect, app: &ViewerApp, theme: &ViewerTheme) {
    let visualizer = app.visualizer();
    let mut spans = vec![Span::styled(visualizer.summary().to_owned(), theme.title())];
    if let Some(err) = visualizer.error() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(err.to_string(), theme.error()));
    }

    let title = format!("target-viewer: {}", app.rule_path().display());
    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &ViewerApp, theme: &ViewerTheme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(app.ui_config().code_panel_width),
        ])
        .split(area);

    let size = app.visualizer().grid().size() as u16;
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(size + 2),
            Constraint::Length(HOVER_PANEL_HEIGHT),
            Constraint::Min(0),
        ])
        .split(columns[0]);

    render_grid(frame, left[0], app, theme);
    render_hover(frame, left[1], app, theme);
    render_side_panel(frame, columns[1], app, theme);
}

fn render_grid(frame: &mut Frame, area: Rect, app: &ViewerApp, theme: &ViewerTheme) {
    let snapshot = app.visualizer().frame();
    let cursor = app.cursor();

    let rows: Vec<Line> = snapshot
        .rows
        .iter()
        .enumerate()
        .map(|(row, flags)| {
            let spans: Vec<Span> = flags
                .iter()
                .enumerate()
                .map(|(col, &cell_flags)| {
                    let is_cursor = cursor == Cell::new(row as i32, col as i32);
                    let (glyph, style) = theme.render_cell(cell_flags, is_cursor);
                    Span::styled(glyph, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let title = if app.visualizer().board().obstacle_count() > 0 {
        format!("Grid ({} obstacles)", app.visualizer().board().obstacle_count())
    } else {
        "Grid".to_owned()
    };
    let paragraph = Paragraph::new(rows).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn render_hover(frame: &mut Frame, area: Rect, app: &ViewerApp, theme: &ViewerTheme) {
    let cursor = app.cursor();
    let lines = match app.preview() {
        Some(preview) => vec![
            Line::from(vec![
                Span::raw("Target "),
                Span::styled(preview.target.to_string(), theme.title()),
            ]),
            Line::from(format!("{} affected cells", preview.aoe.len())),
        ],
        None if cursor == app.visualizer().grid().center() => {
            vec![Line::styled(format!("Actor {cursor}"), theme.muted())]
        }
        None => vec![Line::styled(format!("{cursor} is not a target"), theme.muted())],
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Hover"));
    frame.render_widget(paragraph, area);
}

fn render_side_panel(frame: &mut Frame, area: Rect, app: &ViewerApp, theme: &ViewerTheme) {
    let visualizer = app.visualizer();
    let variable_count = visualizer.adjustable_variables().len() as u16;
    let warning_count = visualizer.warnings().len() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(variable_count.max(1) + 2),
            Constraint::Length(warning_count.max(1) + 2),
            Constraint::Min(0),
        ])
        .split(area);

    render_variables(frame, chunks[0], app, theme);
    render_warnings(frame, chunks[1], app, theme);
    render_rule_text(frame, chunks[2], app, theme);
}

fn render_variables(frame: &mut Frame, area: Rect, app: &ViewerApp, theme: &ViewerTheme) {
    let variables = app.visualizer().adjustable_variables();
    let selected = app.selected_variable();

    let lines: Vec<Line> = if variables.is_empty() {
        vec![Line::styled("No variables", theme.muted())]
    } else {
        variables
            .iter()
            .enumerate()
            .map(|(index, (name, value))| {
                let style = if selected == Some(index) {
                    theme.selected()
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{name} = {value}"), style),
                    Span::styled(
                        format!(
                            "  ({}–{})",
                            GridConfig::VARIABLE_MIN,
                            GridConfig::VARIABLE_MAX
                        ),
                        theme.muted(),
                    ),
                ])
            })
            .collect()
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Variables"));
    frame.render_widget(paragraph, area);
}

fn render_warnings(frame: &mut Frame, area: Rect, app: &ViewerApp, theme: &ViewerTheme) {
    let warnings = app.visualizer().warnings();
    let lines: Vec<Line> = if warnings.is_empty() {
        vec![Line::styled("None", theme.muted())]
    } else {
        warnings
            .iter()
            .map(|warning| {
                let style = match warning.severity() {
                    ErrorSeverity::Warning => theme.warning(),
                    ErrorSeverity::Validation => theme.error(),
                };
                Line::styled(format!("! {warning}"), style)
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Warnings"));
    frame.render_widget(paragraph, area);
}

fn render_rule_text(frame: &mut Frame, area: Rect, app: &ViewerApp, theme: &ViewerTheme) {
    let visualizer = app.visualizer();
    let lines: Vec<Line> = visualizer
        .annotated_lines()
        .into_iter()
        .map(|line| {
            let number = Span::styled(format!("{:>3} ", line.index + 1), theme.muted());
            if line.is_error {
                Line::from(vec![
                    number,
                    Span::styled(
                        line.text,
                        theme.error().add_modifier(Modifier::UNDERLINED),
                    ),
                ])
            } else {
                Line::from(vec![number, Span::raw(line.text)])
            }
        })
        .collect();

    let title = match visualizer.state() {
        RenderState::Empty => "Rule (empty)",
        RenderState::Failed(_) => "Rule (error)",
        RenderState::Ready(_) => "Rule",
    };
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &ViewerApp, theme: &ViewerTheme) {
    let line = match app.status() {
        Some(status) => Line::styled(status.to_owned(), theme.warning()),
        None => Line::from(vec![
            Span::raw("[hjkl/Arrows] Move | "),
            Span::raw("[Space] Obstacle | "),
            Span::raw("[c] Clear | "),
            Span::raw("[s] Sample | "),
            Span::raw("[Tab/+/-] Variables | "),
            Span::raw(if app.visualizer().options().dash_attack {
                "[d] Dash: on | "
            } else {
                "[d] Dash: off | "
            }),
            Span::raw("[r] Reload | "),
            Span::raw("[q] Quit"),
        ]),
    };

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
