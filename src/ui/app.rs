//! Main TUI application state and logic

use crate::config::{Settings, MAX_STEP_INTERVAL, MIN_STEP_INTERVAL};
use crate::layout::LayoutEngine;
use crate::logging::{Logger, MemoryLogger};
use crate::simulation::{Algorithm, Simulation, SimulationError, Tick};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Step interval change per `+`/`-` press
const SPEED_STEP: Duration = Duration::from_millis(50);

/// Which pane receives scroll keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Log,
}

/// The main application state
pub struct App {
    pub simulation: Simulation,
    pub layout: LayoutEngine,
    pub logger: Rc<MemoryLogger>,
    pub settings: Settings,

    /// Input for the current algorithm
    pub n: i64,

    pub focused_pane: FocusedPane,

    /// Lines scrolled back from the newest log record
    pub log_scroll: usize,

    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
    pub has_error: bool,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,
}

impl App {
    pub fn new(algorithm: Algorithm, n: i64, settings: Settings, logger: Rc<MemoryLogger>) -> Self {
        let shared: Rc<dyn Logger> = logger.clone();
        App {
            simulation: Simulation::new(algorithm, n, Rc::clone(&shared)),
            layout: LayoutEngine::new(settings.clone(), shared),
            logger,
            settings,
            n,
            focused_pane: FocusedPane::Tree,
            log_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            has_error: false,
            is_playing: false,
            last_play_time: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= self.settings.step_interval {
                self.step_forward();
                self.last_play_time = Instant::now();
            }

            // poll at frame rate so easing keeps animating between steps
            if event::poll(self.settings.layout_update_interval)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        // Left column: Tree (top) | Message (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(columns[0]);

        // Right column: Code | Stack | Log
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(25),
                Constraint::Percentage(35),
            ])
            .split(columns[1]);

        let (width, height) = super::panes::virtual_viewport(left_rows[0]);
        self.layout.update(self.simulation.tree_mut(), width, height);

        let algorithm = self.simulation.algorithm();
        super::panes::render_tree_pane(
            frame,
            left_rows[0],
            self.simulation.tree(),
            algorithm.title(),
            self.settings.node_radius,
            self.focused_pane == FocusedPane::Tree,
        );

        super::panes::render_message_pane(
            frame,
            left_rows[1],
            self.simulation.message(),
            self.simulation.keyword(),
            self.simulation.result_line(),
            self.simulation.last_motion(),
        );

        let highlighted = self
            .simulation
            .keyword()
            .map(|k| algorithm.highlighted_lines(k))
            .unwrap_or_default();
        super::panes::render_code_pane(
            frame,
            right_rows[0],
            algorithm.source(),
            &highlighted,
            false,
        );

        super::panes::render_stack_pane(frame, right_rows[1], self.simulation.tree(), false);

        super::panes::render_log_pane(
            frame,
            right_rows[2],
            &self.logger.records(),
            &mut self.log_scroll,
            self.focused_pane == FocusedPane::Log,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &super::panes::StatusInfo {
                message: &self.status_message,
                algorithm: algorithm.name(),
                n: self.n,
                steps_applied: self.simulation.steps_applied(),
                steps_total: self.simulation.steps_total(),
                step_interval: self.settings.step_interval,
                is_playing: self.is_playing,
                is_finished: self.simulation.is_finished(),
                has_error: self.has_error,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if self.simulation.is_finished() {
                    self.status_message = "Finished; press r to reset".to_string();
                    return;
                }
                self.is_playing = !self.is_playing;
                if self.is_playing {
                    self.last_play_time = Instant::now()
                        .checked_sub(self.settings.step_interval)
                        .unwrap_or_else(Instant::now);
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Paused".to_string();
                }
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Enter => {
                self.is_playing = false;
                match self.simulation.run_to_end() {
                    Ok(applied) => {
                        self.status_message = format!("Jumped to end ({} steps)", applied);
                    }
                    Err(SimulationError::Exhausted) => {
                        self.status_message = "Already at end".to_string();
                    }
                    Err(e) => self.fail(e),
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.restart(self.simulation.algorithm(), self.n);
                self.status_message = "Reset".to_string();
            }
            KeyCode::Tab => {
                let next = self.simulation.algorithm().next();
                self.restart(next, next.default_n());
            }
            KeyCode::BackTab => {
                let prev = self.simulation.algorithm().prev();
                self.restart(prev, prev.default_n());
            }
            KeyCode::Up => self.restart(self.simulation.algorithm(), self.n.saturating_add(1)),
            KeyCode::Down => self.restart(self.simulation.algorithm(), self.n.saturating_sub(1)),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.set_step_interval(self.settings.step_interval.saturating_sub(SPEED_STEP));
            }
            KeyCode::Char('-') => {
                self.set_step_interval(self.settings.step_interval + SPEED_STEP);
            }
            KeyCode::Char('l') => {
                self.focused_pane = match self.focused_pane {
                    FocusedPane::Tree => FocusedPane::Log,
                    FocusedPane::Log => FocusedPane::Tree,
                };
            }
            KeyCode::PageUp if self.focused_pane == FocusedPane::Log => {
                self.log_scroll = self.log_scroll.saturating_add(5);
            }
            KeyCode::PageDown if self.focused_pane == FocusedPane::Log => {
                self.log_scroll = self.log_scroll.saturating_sub(5);
            }
            _ => {}
        }
    }

    /// Apply one trace event
    fn step_forward(&mut self) {
        match self.simulation.tick() {
            Ok(Tick::Applied(kind)) => {
                self.status_message = format!("Applied {}", kind);
            }
            Ok(Tick::Finished) | Err(SimulationError::Exhausted) => {
                self.is_playing = false;
                self.status_message = "Playback complete".to_string();
            }
            Err(e) => self.fail(e),
        }
    }

    fn restart(&mut self, algorithm: Algorithm, n: i64) {
        self.is_playing = false;
        self.has_error = false;
        self.n = n;
        self.simulation.reset(algorithm, n);
        self.layout.reset();
        self.status_message = format!("{}({})", algorithm.name(), n);
    }

    fn set_step_interval(&mut self, interval: Duration) {
        let clamped = interval.clamp(MIN_STEP_INTERVAL, MAX_STEP_INTERVAL);
        self.settings.step_interval = clamped;
        self.status_message = format!("Step interval {} ms", clamped.as_millis());
    }

    fn fail(&mut self, error: SimulationError) {
        self.is_playing = false;
        self.has_error = true;
        self.logger.error(&error.to_string());
        self.status_message = format!("Error: {}", error);
    }
}
