//! Viewer application state and event loop.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self as term_event, Event as TermEvent, KeyEventKind};
use targeting_core::{Cell, HoverPreview, RenderOptions, Visualizer};

use crate::{
    config::UiConfig,
    input::{InputHandler, KeyAction},
    loader,
    presentation::{terminal::Tui, ui},
};

const POLL_INTERVAL_MS: u64 = 250;

/// Interactive session around one rule file.
pub struct ViewerApp {
    visualizer: Visualizer,
    rule_path: PathBuf,
    input: InputHandler,
    ui: UiConfig,
    cursor: Cell,
    selected_variable: usize,
    status: Option<String>,
}

impl ViewerApp {
    pub fn new(visualizer: Visualizer, rule_path: PathBuf, ui: UiConfig) -> Self {
        let cursor = visualizer.grid().center();
        let mut app = Self {
            visualizer,
            rule_path,
            input: InputHandler::new(),
            ui,
            cursor,
            selected_variable: 0,
            status: None,
        };
        app.refresh_hover();
        app
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn rule_path(&self) -> &std::path::Path {
        &self.rule_path
    }

    pub fn ui_config(&self) -> &UiConfig {
        &self.ui
    }

    pub fn cursor(&self) -> Cell {
        self.cursor
    }

    /// Index into [`Visualizer::adjustable_variables`], if any are required.
    pub fn selected_variable(&self) -> Option<usize> {
        let count = self.visualizer.adjustable_variables().len();
        (count > 0).then(|| self.selected_variable.min(count - 1))
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Preview under the cursor, if the cursor is on a target.
    pub fn preview(&self) -> Option<HoverPreview> {
        self.visualizer.preview(self.cursor)
    }

    pub fn run(mut self, terminal: &mut Tui) -> Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, &self))?;

            if !term_event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                continue;
            }

            match term_event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = self.input.handle_key(key);
                    if self.handle(action) {
                        break;
                    }
                }
                // Resize and other events only need a redraw.
                _ => {}
            }
        }

        tracing::info!("viewer closed");
        Ok(())
    }

    /// Applies one action. Returns `true` when the viewer should exit.
    pub fn handle(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Quit => return true,
            KeyAction::None => return false,
            _ => self.status = None,
        }

        match action {
            KeyAction::Quit | KeyAction::None => {}
            KeyAction::MoveCursor { d_row, d_col } => {
                let next = self.cursor.offset(d_row, d_col);
                if self.visualizer.grid().contains(next) {
                    self.cursor = next;
                }
            }
            KeyAction::CenterCursor => self.cursor = self.visualizer.grid().center(),
            KeyAction::ToggleObstacle => {
                if self.cursor == self.visualizer.grid().center() {
                    self.status = Some("The actor's cell cannot be blocked".to_owned());
                } else {
                    self.visualizer.toggle_obstacle(self.cursor);
                }
            }
            KeyAction::ClearObstacles => self.visualizer.clear_obstacles(),
            KeyAction::SampleObstacles => self.visualizer.apply_sample_obstacles(),
            KeyAction::NextVariable => self.cycle_variable(1),
            KeyAction::PrevVariable => self.cycle_variable(-1),
            KeyAction::IncrementVariable => self.adjust_variable(1),
            KeyAction::DecrementVariable => self.adjust_variable(-1),
            KeyAction::ToggleDash => {
                let options = RenderOptions {
                    dash_attack: !self.visualizer.options().dash_attack,
                    ..self.visualizer.options().clone()
                };
                self.status = Some(format!(
                    "Dash attack {}",
                    if options.dash_attack { "on" } else { "off" }
                ));
                self.visualizer.set_options(options);
            }
            KeyAction::Reload => self.reload(),
        }

        self.refresh_hover();
        false
    }

    fn cycle_variable(&mut self, step: isize) {
        let count = self.visualizer.adjustable_variables().len();
        if count == 0 {
            return;
        }
        let current = self.selected_variable.min(count - 1) as isize;
        self.selected_variable = (current + step).rem_euclid(count as isize) as usize;
    }

    fn adjust_variable(&mut self, delta: i32) {
        let Some(index) = self.selected_variable() else {
            return;
        };
        let variables = self.visualizer.adjustable_variables();
        let Some((name, value)) = variables.get(index) else {
            return;
        };
        self.visualizer.set_variable(name, value + delta);
    }

    fn reload(&mut self) {
        match loader::load_rule(&self.rule_path) {
            Ok(text) => {
                self.visualizer.render(&text);
                self.status = Some(format!("Reloaded {}", self.rule_path.display()));
            }
            Err(err) => {
                tracing::warn!(error = %err, "reload failed");
                self.status = Some(format!("{err:#}"));
            }
        }
    }

    /// Keeps the session hover on the cursor; mutations clear it.
    fn refresh_hover(&mut self) {
        self.visualizer.hover(self.cursor);
    }
}
