use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use raythink_core::{DisplayTargets, Element, ThinkingIndicator};
use tracing::debug;

use crate::theme::{Theme, ThemePreset};
use crate::ui::draw;

pub struct App {
    pub indicator: ThinkingIndicator,
    pub container: Element,
    pub theme: Theme,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &raythink_config::Config) -> Self {
        let container = Element::new();
        let targets = DisplayTargets {
            container: Some(container.clone()),
            ..Default::default()
        };
        Self {
            indicator: ThinkingIndicator::new(targets),
            container,
            theme: Theme::from_preset(ThemePreset::from_name(&config.tui.theme)),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        loop {
            self.indicator.advance(Instant::now());
            terminal.draw(|frame| draw(frame, self))?;

            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Esc => {
                            debug!("escape pressed");
                            self.indicator.interrupt(Instant::now());
                        }
                        KeyCode::Char('q') => {
                            self.should_quit = true;
                        }
                        KeyCode::Char('c')
                            if key.modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            self.should_quit = true;
                        }
                        _ => {}
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        // teardown exactly once: no timer may touch the screen after this
        self.indicator.destroy();
        terminal::disable_raw_mode()?;
        io::stdout().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}
