//! Terminal lifecycle and the fixed-rate main loop.
//!
//! One loop drives every screen. Each frame drains pending input, advances
//! whichever mode is active, redraws, and sleeps off the remainder of the
//! frame. Mode transitions (menu to board, board to game over) happen
//! between frames, so a session is never mutated while it is drawn.

use std::io::{self, Write, stdout};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{cursor, event, execute, terminal};
use log::{debug, info};

use crate::audio::Audio;
use crate::config::{FRAME_MS, FRAME_RATE, GameConfig, Variant};
use crate::input::{self, InputEvent, Key};
use crate::render::Canvas;
use crate::screens;
use crate::sim::Session;
use crate::sprite::Sprite;

/// Everything decided before the terminal is touched.
pub struct Options {
    /// Skip the menu and run this variant for the whole program life.
    pub variant: Option<Variant>,
    pub sprite: Sprite,
    pub audio: Audio,
    /// Base seed; each session derives its own from it.
    pub seed: u64,
}

enum Mode {
    Menu { selected: Variant },
    Play(Session),
    Over { score: u32, variant: Variant },
}

struct App {
    opts: Options,
    mode: Mode,
    canvas: Canvas,
    /// Sessions started so far, used to vary the per-session seed.
    runs: u64,
}

/// Put the terminal in game mode, run until quit, and always hand the
/// terminal back, even when the loop fails mid-frame.
pub fn run(opts: Options) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        event::EnableMouseCapture,
    )?;

    let (cols, rows) = terminal::size()?;
    let result = App::new(opts, cols, rows).run_loop(&mut out);

    let restored = restore(&mut out);
    result.and(restored)
}

fn restore(out: &mut io::Stdout) -> io::Result<()> {
    execute!(
        out,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()
}

fn new_session(opts: &Options, runs: &mut u64, variant: Variant) -> Mode {
    let seed = opts.seed.wrapping_add(*runs);
    *runs += 1;
    info!("starting {} session with seed {seed}", variant.label());
    Mode::Play(Session::new(GameConfig::for_variant(variant), seed))
}

impl App {
    fn new(opts: Options, cols: u16, rows: u16) -> App {
        let canvas = Canvas::new(cols, rows);
        let mut runs = 0;
        let mode = match opts.variant {
            Some(variant) => new_session(&opts, &mut runs, variant),
            None => Mode::Menu {
                selected: Variant::Classic,
            },
        };
        App {
            opts,
            mode,
            canvas,
            runs,
        }
    }

    fn run_loop(&mut self, out: &mut impl Write) -> io::Result<()> {
        let frame_dur = Duration::from_micros(1_000_000 / u64::from(FRAME_RATE));

        loop {
            let frame_start = Instant::now();

            for ev in input::poll_events(&self.canvas)? {
                match ev {
                    InputEvent::Quit => return Ok(()),
                    InputEvent::Resized { cols, rows } => {
                        debug!("terminal resized to {cols}x{rows}");
                        self.canvas.resize(cols, rows);
                    }
                    other => self.dispatch(other),
                }
            }

            self.tick();
            self.draw();
            self.canvas.present(out)?;

            let elapsed = frame_start.elapsed();
            if elapsed < frame_dur {
                thread::sleep(frame_dur - elapsed);
            }
        }
    }

    /// Route one input event to the active mode.
    fn dispatch(&mut self, ev: InputEvent) {
        let next = match &mut self.mode {
            Mode::Menu { selected } => match ev {
                InputEvent::Press(Key::Up | Key::Down | Key::Tab) => {
                    *selected = match *selected {
                        Variant::Classic => Variant::Sideways,
                        Variant::Sideways => Variant::Classic,
                    };
                    None
                }
                InputEvent::Press(Key::Enter | Key::Space) => {
                    Some(new_session(&self.opts, &mut self.runs, *selected))
                }
                InputEvent::Pointer { x, y } => {
                    if screens::CLASSIC_BUTTON.contains(x, y) {
                        Some(new_session(&self.opts, &mut self.runs, Variant::Classic))
                    } else if screens::SIDEWAYS_BUTTON.contains(x, y) {
                        Some(new_session(&self.opts, &mut self.runs, Variant::Sideways))
                    } else {
                        None
                    }
                }
                _ => None,
            },
            Mode::Play(session) => {
                if let InputEvent::Press(_) | InputEvent::Pointer { .. } = ev {
                    if session.activate() {
                        self.opts.audio.flap();
                    }
                }
                None
            }
            Mode::Over { variant, .. } => {
                let confirmed = match ev {
                    InputEvent::Press(Key::Enter | Key::Space) => true,
                    InputEvent::Pointer { x, y } => screens::AGAIN_BUTTON.contains(x, y),
                    _ => false,
                };
                if !confirmed {
                    None
                } else if let Some(fixed) = self.opts.variant {
                    Some(new_session(&self.opts, &mut self.runs, fixed))
                } else {
                    Some(Mode::Menu {
                        selected: *variant,
                    })
                }
            }
        };
        if let Some(mode) = next {
            self.mode = mode;
        }
    }

    /// Advance the active session by one frame, if one is running.
    fn tick(&mut self) {
        let finished = match &mut self.mode {
            Mode::Play(session) => {
                let report = session.tick(FRAME_MS);
                if report.scored > 0 {
                    self.opts.audio.score();
                    info!("score {}", session.score);
                }
                if report.collided {
                    self.opts.audio.death();
                    info!("collided with score {}", session.score);
                }
                session
                    .is_over()
                    .then(|| (session.score, session.cfg.variant))
            }
            _ => None,
        };
        if let Some((score, variant)) = finished {
            info!("session over, final score {score}");
            self.mode = Mode::Over { score, variant };
        }
    }

    fn draw(&mut self) {
        match &self.mode {
            Mode::Menu { selected } => screens::draw_menu(&mut self.canvas, *selected),
            Mode::Play(session) => {
                screens::draw_session(&mut self.canvas, session, &self.opts.sprite)
            }
            Mode::Over { score, .. } => screens::draw_over(&mut self.canvas, *score),
        }
    }
}
