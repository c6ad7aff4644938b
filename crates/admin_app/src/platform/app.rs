use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use admin_core::{update, AdminState, FormEnhancer, Msg, PageSnapshot};
use admin_engine::EngineHandle;
use admin_logging::{admin_info, admin_warn};
use anyhow::{Context, Result};

use super::config::{config_path, load_config, AppConfig};
use super::effects::{EffectRunner, Transition};
use super::persistence::{load_snapshot, snapshot_at};
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::render::render;
use super::ui::widgets::{ConsoleDatePickers, ConsoleDropdowns};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app(page_path: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(&config_path(config))?;
    admin_logging::initialize(&config.log.destination(), config.log.level());

    let mut base = load_snapshot(page_path)?;
    let mut page = Page::load(base.clone(), &config)?;
    let input = spawn_input_reader();

    loop {
        if let Some(transition) = page.drain_events() {
            page = next_page(transition, &mut base, page_path, &page, &config)?;
            continue;
        }

        let line = match input.recv_timeout(POLL_INTERVAL) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let transition = match parse_command(&line) {
            Ok(Command::Page(msg)) => page.dispatch(msg),
            Ok(Command::Wait(duration)) => page.wait(duration),
            Ok(Command::View) => {
                page.print();
                None
            }
            Ok(Command::Help) => {
                println!("{HELP}");
                None
            }
            Ok(Command::Quit) => break,
            Err(err) => {
                println!("error: {err}");
                None
            }
        };
        if let Some(transition) = transition {
            page = next_page(transition, &mut base, page_path, &page, &config)?;
        }
    }

    admin_info!("Console host finished");
    Ok(())
}

/// Unloads `current` and loads the page the transition leads to.
fn next_page(
    transition: Transition,
    base: &mut PageSnapshot,
    page_path: &Path,
    current: &Page,
    config: &AppConfig,
) -> Result<Page> {
    let url = match transition {
        Transition::Navigate(url) => {
            println!("navigate -> {url}");
            url
        }
        Transition::Reload => {
            println!("reload");
            *base = load_snapshot(page_path)?;
            current.url()
        }
    };
    Page::load(snapshot_at(base, &url, &config.ui.search_param), config)
}

/// One loaded page: its state and the engine serving it. Dropping the page
/// stops its timers and discards replies still in flight.
struct Page {
    state: Option<AdminState>,
    runner: EffectRunner,
}

impl Page {
    fn load(snapshot: PageSnapshot, config: &AppConfig) -> Result<Self> {
        let mut enhancer = FormEnhancer::new(
            config
                .widgets
                .dropdowns
                .then(|| Box::new(ConsoleDropdowns) as Box<dyn admin_core::DropdownBinder>),
            config
                .widgets
                .date_pickers
                .then(|| Box::new(ConsoleDatePickers) as Box<dyn admin_core::DatePickerBinder>),
            config.ui.remote_min_input_len,
        );
        let report = enhancer.enhance(&snapshot.fields);
        admin_info!("Enhanced {} of {} fields", report.bound.len(), snapshot.fields.len());
        for (index, kind) in &report.skipped {
            let name = snapshot.fields.get(*index).map_or("", |field| field.name.as_str());
            admin_info!(
                "No widget library for field {} {:?} ({:?}); left plain",
                index + 1,
                name,
                kind
            );
        }
        for err in &report.seed_errors {
            admin_warn!("{}", err);
        }

        let state = AdminState::new(snapshot, config.ui.clone()).context("invalid page")?;
        let engine = EngineHandle::new(config.client.settings())?;
        let page = Self {
            state: Some(state),
            runner: EffectRunner::new(engine),
        };
        page.print();
        Ok(page)
    }

    fn url(&self) -> String {
        self.state
            .as_ref()
            .map(|state| state.page_url().to_string())
            .unwrap_or_default()
    }

    fn dispatch(&mut self, msg: Msg) -> Option<Transition> {
        let state = self.state.take()?;
        let (mut state, effects) = update(state, msg);
        let dirty = state.consume_dirty();
        let view = state.view();
        self.state = Some(state);
        if dirty {
            print_lines(&render(&view));
        }
        self.runner.run(effects)
    }

    /// Feeds engine events that are already waiting.
    fn drain_events(&mut self) -> Option<Transition> {
        while let Some(msg) = self.runner.next_msg(Duration::ZERO) {
            if let Some(transition) = self.dispatch(msg) {
                return Some(transition);
            }
        }
        None
    }

    fn wait(&mut self, duration: Duration) -> Option<Transition> {
        let deadline = Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            if let Some(msg) = self.runner.next_msg(remaining.min(POLL_INTERVAL)) {
                if let Some(transition) = self.dispatch(msg) {
                    return Some(transition);
                }
            }
        }
    }

    fn print(&self) {
        if let Some(state) = &self.state {
            print_lines(&render(&state.view()));
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
    println!();
}

fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
