use std::process::ExitCode;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::backend::TestBackend;
use term_tv::components::{Button, EditField, Label, ProgressBar};
use term_tv::drivers::{OutputDriver, TerminalOutputDriver};
use term_tv::widget::{Pack, Widget};
use term_tv::{Composer, Config, ControlFlow, Event, Size, theme};

#[derive(Parser, Debug)]
#[command(
    name = "tv-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drive the compositor with scripted input and measure frames per second"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 5.0
    )]
    duration_seconds: f64,

    /// Number of overlapping windows.
    #[arg(short = 'w', long = "windows", default_value_t = 8)]
    windows: usize,

    /// Virtual screen width.
    #[arg(long, default_value_t = 160)]
    width: u16,

    /// Virtual screen height.
    #[arg(long, default_value_t = 50)]
    height: u16,

    /// Fixed seed for the input script. Defaults to the clock.
    #[arg(long)]
    seed: Option<u64>,
}

struct BenchConfig {
    duration: Duration,
    windows: usize,
    screen: Size,
    seed: u64,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.1..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.1 and 600 seconds".to_string());
        }
        if !(1..=64).contains(&cli.windows) {
            return Err("windows must be between 1 and 64".to_string());
        }
        if cli.width < 40 || cli.height < 12 {
            return Err("screen must be at least 40x12".to_string());
        }
        let seed = cli.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
                ^ 0xA5A5_A5A5_1234_5678
        });
        Ok(Self {
            duration: Duration::from_secs_f64(cli.duration_seconds),
            windows: cli.windows,
            screen: Size::new(cli.width as i32, cli.height as i32),
            seed,
        })
    }
}

fn main() -> ExitCode {
    let args = BenchCli::parse();
    let config = match BenchConfig::try_from(&args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    match run_benchmark(&config) {
        Ok(stats) => {
            println!("{}", stats.final_report(&config));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn populate(composer: &mut Composer, count: usize, script: &mut InputScript) {
    let screen = composer.screen_size();
    for i in 0..count {
        let w = 24 + (script.next() % 16) as i32;
        let h = 8 + (script.next() % 6) as i32;
        let x = (script.next() as i32).rem_euclid((screen.width - w - 1).max(1));
        let y = (script.next() as i32).rem_euclid((screen.height - h - 1).max(1));
        let win = composer.create_window(format!("Window {i}"), x, y, w, h);
        let tree = composer.tree_mut();
        tree.get_mut(win).base_mut().set_pack(Pack::Vertical);
        tree.add(win, Label::new(format!("Label {i}")));
        tree.add(win, EditField::new("edit me", 0).with_scale(1));
        tree.add(win, ProgressBar::new(10, 1).with_limits(0, 100));
        tree.add(win, Button::new("OK"));
        tree.relayout(win);
    }
}

fn run_benchmark(config: &BenchConfig) -> term_tv::Result<BenchStats> {
    let backend = TestBackend::new(config.screen.width as u16, config.screen.height as u16);
    let mut output = TerminalOutputDriver::new(backend)?;
    output.enter()?;

    let mut composer = Composer::new(config.screen, Config::default());
    let mut script = InputScript::new(config.seed);
    populate(&mut composer, config.windows, &mut script);

    let mut stats = BenchStats::new();
    loop {
        let frame_start = Instant::now();
        for event in script.frame_events(&composer) {
            stats.events += 1;
            if composer.process_event(event) == ControlFlow::Quit {
                break;
            }
        }
        // timers and posts are not replayed: the bench measures routing and paint
        composer.take_posted();
        composer.take_delayed();
        output.draw(theme::desktop(), |canvas| composer.draw(canvas))?;
        stats.record_frame(
            config.screen.width as u64 * config.screen.height as u64,
            frame_start.elapsed(),
        );
        if stats.elapsed() >= config.duration {
            break;
        }
    }
    output.exit()?;
    stats.mark_completed();
    Ok(stats)
}

/// Pseudo-random input: drags of the top window's title bar, focus
/// switches, typing, and occasional send-to-back.
struct InputScript {
    state: u64,
}

impl InputScript {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn frame_events(&mut self, composer: &Composer) -> Vec<Event> {
        let Some(top) = composer.top_window() else {
            return Vec::new();
        };
        let rect = composer.tree().get(top).base().rect();
        let screen = composer.screen_size();
        match self.next() % 6 {
            0 | 1 => {
                let x = (rect.x + 2) as u16;
                let y = rect.y as u16;
                let dx = (self.next() % 3) as i32 - 1;
                let dy = (self.next() % 3) as i32 - 1;
                let to_x = (rect.x + 2 + dx).clamp(0, screen.width - 1) as u16;
                let to_y = (rect.y + dy).clamp(0, screen.height - 1) as u16;
                vec![
                    Event::left_down(x, y),
                    Event::left_drag(to_x, to_y),
                    Event::left_up(to_x, to_y),
                ]
            }
            2 => {
                let x = (self.next() as i32).rem_euclid(screen.width) as u16;
                let y = (self.next() as i32).rem_euclid(screen.height) as u16;
                vec![Event::left_down(x, y), Event::left_up(x, y)]
            }
            3 => vec![Event::key(KeyCode::Tab, KeyModifiers::NONE)],
            4 => {
                let c = char::from(b'a' + (self.next() % 26) as u8);
                vec![Event::key(KeyCode::Char(c), KeyModifiers::NONE)]
            }
            _ => vec![
                Event::key(KeyCode::Char('w'), KeyModifiers::CONTROL),
                Event::key(KeyCode::Char('h'), KeyModifiers::CONTROL),
            ],
        }
    }
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    frame_count: u64,
    cell_updates: u64,
    events: u64,
    total_frame_time: Duration,
    fastest_frame: Duration,
    slowest_frame: Duration,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            frame_count: 0,
            cell_updates: 0,
            events: 0,
            total_frame_time: Duration::ZERO,
            fastest_frame: Duration::MAX,
            slowest_frame: Duration::ZERO,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_frame(&mut self, cells: u64, frame_time: Duration) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.cell_updates = self.cell_updates.saturating_add(cells);
        self.total_frame_time += frame_time;
        self.fastest_frame = self.fastest_frame.min(frame_time);
        self.slowest_frame = self.slowest_frame.max(frame_time);
    }

    fn average_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        (self.total_frame_time.as_secs_f64() / self.frame_count as f64) * 1_000.0
    }

    fn fastest_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.fastest_frame.as_secs_f64() * 1_000.0
    }

    fn slowest_frame_ms(&self) -> f64 {
        self.slowest_frame.as_secs_f64() * 1_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let per_second = |n: u64| if elapsed > 0.0 { n as f64 / elapsed } else { 0.0 };

        indoc::formatdoc!(
            r#"
            Compositor bench: {windows} windows on {width}x{height}, seed {seed}.
            Duration: {elapsed:.2}s (target {target:.2}s)
            Frames: {frames} | Avg FPS: {fps:.1}
            Events: {events} (~{events_per_sec:.0}/s)
            Avg frame: {avg:.3} ms | Best: {best:.3} ms | Worst: {worst:.3} ms
            Cells painted: {cells} total (~{cells_per_sec:.0}/s)
            "#,
            windows = config.windows,
            width = config.screen.width,
            height = config.screen.height,
            seed = config.seed,
            elapsed = elapsed,
            target = config.duration.as_secs_f64(),
            frames = self.frame_count,
            fps = per_second(self.frame_count),
            events = self.events,
            events_per_sec = per_second(self.events),
            avg = self.average_frame_ms(),
            best = self.fastest_frame_ms(),
            worst = self.slowest_frame_ms(),
            cells = self.cell_updates,
            cells_per_sec = per_second(self.cell_updates),
        )
    }
}
