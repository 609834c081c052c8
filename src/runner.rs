use crate::composer::Composer;
use crate::drivers::{InputDriver, OutputDriver};
use crate::error::{Result, TvError};
use crate::event::Event;
use crate::event_loop::MainLoop;

/// Enter the terminal, run `main_loop` until quit, and always leave the
/// terminal again. The composer is fitted to the output size first and the
/// input driver's mouse capture follows `Config::mouse`.
pub fn run_app<O, D>(
    main_loop: &mut MainLoop,
    composer: &mut Composer,
    output: &mut O,
    mut input: D,
) -> Result<()>
where
    O: OutputDriver,
    D: InputDriver + Send + 'static,
{
    output.enter()?;
    let size = output.size()?;
    composer.process_event(Event::ScreenResize {
        width: size.width,
        height: size.height,
    });
    let mouse = composer.config().mouse;
    let result = input
        .set_mouse_capture(mouse)
        .map_err(TvError::from)
        .and_then(|_| main_loop.spawn_input(input))
        .and_then(|_| main_loop.run(composer, output));
    let exited = output.exit();
    result.and(exited)
}
