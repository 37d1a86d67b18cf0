//! Terminal setup and the interactive render loop.

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::config::Config;
use crate::ui::{ChatAction, ChatView};

type Term = Terminal<CrosstermBackend<Stdout>>;

fn init_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Run the chat window until the user quits
pub fn run(config: &Config) -> Result<()> {
    let mut view = ChatView::new(config);
    info!(theme = config.theme.as_ref(), policy = ?view.engine().policy(), "opening chat window");

    let mut terminal = init_terminal().context("Failed to initialize terminal")?;
    let result = run_loop(&mut terminal, &mut view, config);

    // Always restore the terminal, even on error
    if let Err(err) = restore_terminal(&mut terminal) {
        warn!("failed to restore terminal: {err}");
    }

    info!(messages = view.engine().transcript().len(), "chat window closed");
    result
}

fn run_loop(terminal: &mut Term, view: &mut ChatView, config: &Config) -> Result<()> {
    let tick_rate = config.tick_rate();

    loop {
        view.on_tick();
        terminal
            .draw(|frame| frame.render_widget(&*view, frame.size()))
            .context("Failed to draw frame")?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if view.handle_key(key) == ChatAction::Exit {
                    return Ok(());
                }
            }
        }
    }
}
