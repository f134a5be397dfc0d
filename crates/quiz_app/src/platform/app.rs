use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use quiz_client::ReqwestQuizApi;
use quiz_core::{update, AppState, Msg};
use quiz_logging::{parse_level, quiz_info, quiz_warn};
use ratatui::crossterm::event::{self, Event, KeyEventKind};

use super::config::{self, AppConfig, ENV_API_BASE};
use super::effects::EffectRunner;
use super::input::{self, UiState};
use super::terminal::{self, Tui};
use super::ui;

const LOG_FILENAME: &str = "quizchat.log";

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("current directory")?;
    let config = load_config(&cwd);
    quiz_info!("Using backend {}", config.api_base);

    let api = ReqwestQuizApi::new(&config.client_settings())
        .with_context(|| format!("backend url {:?}", config.api_base))?;
    let effects = EffectRunner::new(Arc::new(api)).context("start client runtime")?;

    terminal::install_panic_hook();
    let mut tui = terminal::init().context("initialize terminal")?;
    let result = App::new(effects).run(&mut tui);
    terminal::restore().context("restore terminal")?;
    result
}

/// Reads the config and installs the file logger, in that order, so the log
/// level can come from the config. Config problems are logged once the logger exists.
fn load_config(dir: &Path) -> AppConfig {
    let loaded = config::read_config(dir);
    let level = loaded
        .as_ref()
        .map(|c| parse_level(&c.log_level))
        .unwrap_or(log::LevelFilter::Info);
    let log_path = dir.join(LOG_FILENAME);
    if let Err(err) = quiz_logging::initialize_file(&log_path, level) {
        eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
    }

    let mut config = loaded.unwrap_or_else(|err| {
        quiz_warn!("{}; using defaults", err);
        AppConfig::default()
    });
    config.apply_env_override(std::env::var(ENV_API_BASE).ok());
    config
}

struct App {
    state: AppState,
    ui: UiState,
    effects: EffectRunner,
    needs_draw: bool,
}

impl App {
    fn new(effects: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            ui: UiState::default(),
            effects,
            needs_draw: true,
        }
    }

    fn run(mut self, tui: &mut Tui) -> anyhow::Result<()> {
        self.dispatch_msg(Msg::Started);

        while !self.ui.should_quit {
            if self.needs_draw {
                self.draw(tui)?;
            }

            if event::poll(ui::constants::TICK)? {
                self.handle_event(event::read()?);
            }

            for msg in self.effects.drain() {
                self.dispatch_msg(msg);
            }
            self.dispatch_msg(Msg::Tick);
        }

        quiz_info!("Quit requested");
        Ok(())
    }

    fn draw(&mut self, tui: &mut Tui) -> anyhow::Result<()> {
        let view = self.state.view();
        self.ui.observe_messages(view.messages_revision);
        self.ui.clamp_cursor(view.history.len());
        let ui_state = &self.ui;
        tui.draw(|frame| ui::render::render(frame, &view, ui_state))?;
        self.needs_draw = false;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let view = self.state.view();
        let msg = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                input::handle_key(&mut self.ui, &view, key)
            }
            Event::Paste(text) => input::handle_paste(&self.ui, &view, &text),
            Event::Resize(..) => None,
            _ => return,
        };
        // Focus, cursor and scroll changes are local, so redraw regardless.
        self.needs_draw = true;
        if let Some(msg) = msg {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.needs_draw = true;
        }
        self.state = state;
        self.effects.enqueue(effects);
    }
}
