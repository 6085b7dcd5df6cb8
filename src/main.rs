//! Terminal runner (default binary).
//!
//! A single-threaded serial event loop: render the snapshot, wait for a key
//! or for the pending timer, feed whichever comes first to the game, and arm
//! the scheduler with the returned transition.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::terminal;

use blockfall::config::Config;
use blockfall::core::{GameEvent, GameSnapshot, GameState, Scheduler, Transition};
use blockfall::event_log::EventLog;
use blockfall::input::{map_key, KEY_HELP};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::EndReason;

/// Poll timeout while no timer is pending (paused).
const IDLE_POLL: Duration = Duration::from_millis(250);

struct Session {
    game: GameState,
    scheduler: Scheduler,
    log: Option<EventLog<File>>,
    started: Instant,
}

impl Session {
    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Arm the scheduler, drain observations, report the end.
    fn apply(&mut self, transition: Transition) -> Result<Option<EndReason>> {
        self.scheduler.arm(&transition);

        let events = self.game.take_events();
        let ts = self.elapsed_ms();
        if let Some(log) = self.log.as_mut() {
            for event in &events {
                log.core_event(ts, event)?;
            }
        }

        Ok(transition.end_reason())
    }

    /// Write the summary line and return the final score.
    fn finish(&mut self) -> Result<u32> {
        let score = self.game.score();
        let ts = self.elapsed_ms();
        if let Some(log) = self.log.as_mut() {
            log.summary(ts, score)?;
        }
        Ok(score)
    }
}

fn main() -> Result<()> {
    let config = Config::from_env();
    let log = config
        .log_path
        .as_deref()
        .map(EventLog::<File>::open)
        .transpose()?;

    let mut session = Session {
        game: GameState::new(config.seed),
        scheduler: Scheduler::new(),
        log,
        started: Instant::now(),
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    let reason = result?;

    let score = session.finish()?;

    if reason.is_loss() {
        println!("Game over ({}). Score: {score}", reason.as_str());
    } else {
        println!("Score: {score}");
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session, config: &Config) -> Result<EndReason> {
    if let Some(log) = session.log.as_mut() {
        log.session(0, config.seed)?;
    }

    let view = GameView::new(config.cell_width).with_help(&KEY_HELP);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let start = session.game.start();
    if let Some(reason) = session.apply(start)? {
        return Ok(reason);
    }
    let mut last = Instant::now();

    loop {
        // Render.
        session.game.snapshot_into(&mut snap);
        let (w, h) = terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Wait for input, at most until the pending timer is due.
        let timeout = session.scheduler.remaining().unwrap_or(IDLE_POLL);
        let input = if event::poll(timeout)? {
            Some(event::read()?)
        } else {
            None
        };

        let now = Instant::now();
        let elapsed = now.duration_since(last);
        last = now;

        if let Some(timer) = session.scheduler.elapse(elapsed) {
            let transition = session.game.handle(GameEvent::Timer(timer));
            if let Some(reason) = session.apply(transition)? {
                return Ok(reason);
            }
        }

        match input {
            Some(Event::Key(key)) => {
                if let Some(action) = map_key(key) {
                    let transition = session.game.handle(GameEvent::Input(action));
                    if let Some(reason) = session.apply(transition)? {
                        return Ok(reason);
                    }
                }
            }
            Some(Event::Resize(..)) => term.invalidate(),
            _ => {}
        }
    }
}
