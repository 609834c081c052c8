use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info};

use term_tv::components::{
    BarChart, BarData, Button, EditField, Frame, Label, ProgressBar, TextView,
};
use term_tv::drivers::TerminalOutputDriver;
use term_tv::drivers::console::ConsoleInputDriver;
use term_tv::runner::run_app;
use term_tv::widget::{Align, Pack, Widget};
use term_tv::{
    BorderStyle, Composer, Config, MainLoop, Size, TitleButtons, WidgetId, Window, tracing_sub,
};

#[derive(Debug, Parser)]
#[command(name = "term-tv", about = "Overlapping-window demo for the term-tv toolkit")]
struct Args {
    /// Append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: Level,

    /// Window border: none, single, double or thick.
    #[arg(long, default_value = "single", value_parser = parse_border)]
    border: BorderStyle,

    /// How long a button stays pressed after Space, in milliseconds.
    #[arg(long, default_value_t = 100)]
    flash_ms: u64,

    /// Leave mouse reporting off; windows are then driven by keys only.
    #[arg(long)]
    no_mouse: bool,
}

fn parse_border(value: &str) -> Result<BorderStyle, String> {
    BorderStyle::parse(value).ok_or_else(|| format!("unknown border style `{value}`"))
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config {
            border: self.border,
            button_flash: Duration::from_millis(self.flash_ms),
            mouse: !self.no_mouse,
            ..Config::default()
        };
        config.log.file = self.log_file.clone();
        config.log.level = self.log_level;
        config
    }
}

fn build_form(composer: &mut Composer) {
    let flash = composer.config().button_flash;
    let win = composer.create_window("Form", 2, 1, 36, 9);
    let tree = composer.tree_mut();
    tree.get_mut(win).base_mut().set_pack(Pack::Vertical);

    let row = tree.add(win, Frame::new().with_gaps(1, 0));
    tree.add(row, Label::new("Name").with_constraints(6, 1));
    tree.add(row, EditField::new("", 20).with_scale(1));

    let row = tree.add(win, Frame::new().with_gaps(1, 0));
    tree.add(row, Label::new("Secret").with_constraints(6, 1));
    tree.add(
        row,
        EditField::new("", 20)
            .with_password(true)
            .with_max_length(16)
            .with_scale(1),
    );

    tree.add(win, Frame::new().with_scale(1));
    let buttons = tree.add(win, Frame::new().with_gaps(1, 0));
    tree.add(buttons, Frame::new().with_scale(1));
    tree.add(
        buttons,
        Button::new("Close").with_flash(flash).on_click(|ctx| {
            ctx.post(term_tv::Event::CloseWindow);
        }),
    );
    tree.relayout(win);
}

fn build_log(composer: &mut Composer) -> WidgetId {
    let win = composer.create_window("Log", 44, 14, 34, 10);
    let tree = composer.tree_mut();
    let log = tree.add(
        win,
        TextView::new(20, 4)
            .with_autoscroll(true)
            .with_max_items(200)
            .with_scale(1),
    );
    if let Some(view) = tree.get_as_mut::<TextView>(log) {
        view.add_text(["Arrows and PgUp/PgDn scroll this pane."]);
    }
    tree.relayout(win);
    log
}

fn build_chart(composer: &mut Composer) {
    let win = composer.create_window("Chart", 22, 8, 30, 11);
    let tree = composer.tree_mut();
    let data = [3.0, 7.0, 5.0, 9.0, 4.0]
        .into_iter()
        .zip(["mo", "tu", "we", "th", "fr"])
        .map(|(value, day)| BarData::new(value, day));
    let mut chart = BarChart::new(24, 8)
        .with_data(data)
        .with_value_width(4)
        .with_bar_gap(1)
        .with_auto_size(true)
        .with_scale(1);
    chart.set_show_marks(true);
    tree.add(win, chart);
    tree.relayout(win);
}

fn build_progress(composer: &mut Composer, log: WidgetId) {
    let flash = composer.config().button_flash;
    let border = composer.border_style();
    let window = Window::new("Progress", 40, 3, 34, 10)
        .with_border(border)
        .with_buttons(TitleButtons {
            bottom: true,
            maximize: false,
            close: true,
        });
    let win = composer.add_window(window);
    let tree = composer.tree_mut();
    tree.get_mut(win).base_mut().set_pack(Pack::Vertical);

    let bar = tree.add(
        win,
        ProgressBar::new(20, 1)
            .with_limits(0, 20)
            .with_title("{{value}} of {{max}} ({{percent}}%)"),
    );
    let status = tree.add(win, Label::new("Ready").with_align(Align::Center));
    tree.add(win, Frame::new().with_scale(1));

    let row = tree.add(win, Frame::new().with_gaps(1, 0));
    tree.add(
        row,
        Button::new("Step").with_flash(flash).on_click(move |ctx| {
            ctx.update(move |tree| {
                let value = tree.get_as_mut::<ProgressBar>(bar).map(|b| b.step());
                if let (Some(value), Some(label)) = (value, tree.get_as_mut::<Label>(status)) {
                    label.set_text(format!("Value {value}"));
                }
                if let (Some(value), Some(view)) = (value, tree.get_as_mut::<TextView>(log)) {
                    view.add_text([format!("step -> {value}")]);
                }
            })
        }),
    );
    tree.add(
        row,
        Button::new("Reset").with_flash(flash).on_click(move |ctx| {
            ctx.update(move |tree| {
                if let Some(b) = tree.get_as_mut::<ProgressBar>(bar) {
                    b.set_value(0);
                }
                if let Some(label) = tree.get_as_mut::<Label>(status) {
                    label.set_text("Ready");
                }
                if let Some(view) = tree.get_as_mut::<TextView>(log) {
                    view.add_text(["reset"]);
                }
            })
        }),
    );
    tree.relayout(win);
}

fn build_help(composer: &mut Composer) {
    let keys = composer.config().keymap.clone();
    let window = Window::new("Keys", 6, 12, 44, 8)
        .with_border(BorderStyle::Double)
        .with_sizable(false);
    let win = composer.add_window(window);
    let tree = composer.tree_mut();
    tree.get_mut(win).base_mut().set_pack(Pack::Vertical);
    for (action, hint) in [
        (term_tv::actions::Action::MoveMode, "then arrows: move window"),
        (term_tv::actions::Action::ResizeMode, "then arrows: resize window"),
        (term_tv::actions::Action::WindowMode, "then key: window command"),
        (term_tv::actions::Action::QuitMode, "twice: quit"),
    ] {
        let combo = keys.combos_for(action).join("/");
        tree.add(win, Label::new(format!("{combo:<8} {hint}")));
    }
    tree.relayout(win);
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = args.config();
    if let Err(err) = tracing_sub::init(&config.log) {
        eprintln!("cannot open log file: {err}");
        return ExitCode::FAILURE;
    }

    let mut output = match TerminalOutputDriver::console() {
        Ok(output) => output,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let mut composer = Composer::new(Size::new(80, 25), config);
    build_help(&mut composer);
    let log = build_log(&mut composer);
    build_chart(&mut composer);
    build_progress(&mut composer, log);
    build_form(&mut composer);
    info!(windows = composer.windows().len(), "demo started");

    let mut main_loop = MainLoop::new();
    let result = run_app(
        &mut main_loop,
        &mut composer,
        &mut output,
        ConsoleInputDriver::new(),
    );
    drop(output);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "demo failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
