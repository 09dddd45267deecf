pub mod config;
mod assets_panel;
mod hierarchy;
pub mod input;
mod inspector;
mod menubar;
pub mod state;
mod status;
mod tabs;
mod ui;
mod viewport;
mod welcome;

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{cursor, event, execute, terminal};
use log::info;

use input::Action;
use state::{EditorState, EditorTab, Screen};
use ui::Layout;

pub struct Editor {
    state: EditorState,
}

impl Editor {
    /// Open the editor on `path`, or on the welcome screen when `None`.
    pub fn open(path: Option<&str>) -> Result<Self> {
        let state = EditorState::open(path)?;
        Ok(Editor { state })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.main_loop(&mut stdout);

        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        info!("editor closed");
        result
    }

    fn main_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let frame = Duration::from_millis(self.state.config.frame_ms());
        self.full_redraw(stdout)?;

        loop {
            // Block on input while idle; poll at frame rate while animating.
            let ready = if self.state.is_animating() {
                event::poll(frame)?
            } else {
                true
            };

            let mut redraw = false;
            if ready {
                let event = event::read()?;
                match input::handle_event(&mut self.state, event) {
                    Action::Continue => {}
                    Action::Redraw => redraw = true,
                    Action::Quit => break,
                }
            }

            let now = self.state.now_ms();
            if self.state.tick(now) {
                redraw = true;
            }

            if redraw {
                self.full_redraw(stdout)?;
            }
        }

        self.state.stop_simulation();
        Ok(())
    }

    fn full_redraw(&self, stdout: &mut io::Stdout) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let layout = Layout::compute(term_w, term_h, self.state.tab);

        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        menubar::render_menubar(stdout, &layout, &self.state)?;

        match self.state.screen {
            Screen::Welcome => welcome::render_welcome(stdout, &layout, &self.state)?,
            Screen::Workspace => {
                hierarchy::render_hierarchy(stdout, &layout, &self.state)?;
                match self.state.tab {
                    EditorTab::Scene => viewport::render_scene(stdout, layout.viewport, &self.state)?,
                    EditorTab::Scripting => tabs::render_scripting(stdout, layout.viewport)?,
                    EditorTab::Assets => assets_panel::render_asset_browser(stdout, layout.viewport, &self.state)?,
                    EditorTab::Architecture => tabs::render_architecture(stdout, layout.viewport, &self.state)?,
                    EditorTab::Build => tabs::render_build(stdout, layout.viewport, &self.state)?,
                }
                inspector::render_inspector(stdout, &layout, &self.state)?;
                assets_panel::render_asset_strip(stdout, layout.assets, &self.state)?;
                // Drawn last so it sits on top of the panels.
                menubar::render_dropdown(stdout, &layout, &self.state)?;
            }
        }

        status::render_status(stdout, &layout, &self.state)?;

        stdout.flush()?;
        Ok(())
    }
}
