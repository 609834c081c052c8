use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::composer::Composer;
use crate::drivers::{InputDriver, OutputDriver};
use crate::error::{Result, TvError};
use crate::event::Event;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Work queued for the loop thread.
pub type Command = Box<dyn FnOnce(&mut Composer) + Send>;

/// Everything that reaches the loop goes through one unbounded queue.
pub enum LoopMessage {
    /// Raw result of a blocking read on the input thread.
    Input(io::Result<Event>),
    /// An event posted by a widget or another thread.
    Post(Event),
    /// Re-post `event` once `delay` has elapsed.
    PostAfter(Duration, Event),
    /// Run a closure against the composer on the loop thread.
    Update(Command),
}

/// Cloneable handle for feeding the main loop from any thread.
#[derive(Clone)]
pub struct EventSender {
    tx: Sender<LoopMessage>,
}

impl EventSender {
    /// Queue `event`. Returns `false` once the loop has gone away.
    pub fn post(&self, event: Event) -> bool {
        self.tx.send(LoopMessage::Post(event)).is_ok()
    }

    pub fn post_after(&self, delay: Duration, event: Event) -> bool {
        self.tx.send(LoopMessage::PostAfter(delay, event)).is_ok()
    }

    pub fn update(&self, f: impl FnOnce(&mut Composer) + Send + 'static) -> bool {
        self.tx.send(LoopMessage::Update(Box::new(f))).is_ok()
    }
}

struct Scheduled {
    at: Instant,
    seq: u64,
    event: Event,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        (self.at, self.seq) == (other.at, other.seq)
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.at, self.seq).cmp(&(other.at, other.seq))
    }
}

/// The single-threaded scheduler driving a [`Composer`].
///
/// Input is read on a dedicated thread and forwarded into the loop's queue;
/// timers live in a deadline heap on the loop thread. Each iteration handles
/// exactly one message, then repaints. Only [`ControlFlow::Quit`] ends the
/// loop normally.
pub struct MainLoop {
    tx: Sender<LoopMessage>,
    rx: Receiver<LoopMessage>,
    timers: BinaryHeap<Reverse<Scheduled>>,
    seq: u64,
}

impl Default for MainLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl MainLoop {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            timers: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Start the input thread. It forwards every read, and stops after the
    /// first error or once the loop is dropped.
    pub fn spawn_input<D>(&self, mut driver: D) -> Result<thread::JoinHandle<()>>
    where
        D: InputDriver + Send + 'static,
    {
        let tx = self.tx.clone();
        let handle = thread::Builder::new()
            .name("tv-input".into())
            .spawn(move || {
                loop {
                    let read = driver.read();
                    let failed = read.is_err();
                    if tx.send(LoopMessage::Input(read)).is_err() || failed {
                        break;
                    }
                }
            })?;
        Ok(handle)
    }

    fn schedule(&mut self, delay: Duration, event: Event) {
        self.seq += 1;
        self.timers.push(Reverse(Scheduled {
            at: Instant::now() + delay,
            seq: self.seq,
            event,
        }));
    }

    /// Number of timers that have not fired yet.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Next message, or the event of a due timer.
    fn next_message(&mut self) -> Result<LoopMessage> {
        loop {
            let Some(Reverse(next)) = self.timers.peek() else {
                return self.rx.recv().map_err(|_| TvError::InputClosed);
            };
            let now = Instant::now();
            if next.at <= now {
                if let Some(Reverse(due)) = self.timers.pop() {
                    return Ok(LoopMessage::Post(due.event));
                }
                continue;
            }
            match self.rx.recv_timeout(next.at - now) {
                Ok(message) => return Ok(message),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Err(TvError::InputClosed),
            }
        }
    }

    /// Handle one message and report whether the loop should stop.
    pub fn step(&mut self, composer: &mut Composer) -> Result<ControlFlow> {
        let flow = match self.next_message()? {
            LoopMessage::Input(Ok(event)) | LoopMessage::Post(event) => {
                composer.process_event(event)
            }
            LoopMessage::Input(Err(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("input stream ended");
                return Err(TvError::InputClosed);
            }
            LoopMessage::Input(Err(err)) => {
                error!(%err, "input driver failed");
                return Err(err.into());
            }
            LoopMessage::PostAfter(delay, event) => {
                self.schedule(delay, event);
                ControlFlow::Continue
            }
            LoopMessage::Update(f) => {
                f(composer);
                ControlFlow::Continue
            }
        };

        for event in composer.take_posted() {
            // the receiver lives in `self`, so this cannot fail
            let _ = self.tx.send(LoopMessage::Post(event));
        }
        for (delay, event) in composer.take_delayed() {
            self.schedule(delay, event);
        }
        Ok(flow)
    }

    /// Paint, then process messages until quit. Backend and input failures
    /// end the loop with an error.
    pub fn run<O: OutputDriver>(&mut self, composer: &mut Composer, output: &mut O) -> Result<()> {
        output.draw(theme::desktop(), |canvas| composer.draw(canvas))?;
        loop {
            if self.step(composer)? == ControlFlow::Quit {
                debug!("main loop finished");
                return Ok(());
            }
            output.draw(theme::desktop(), |canvas| composer.draw(canvas))?;
        }
    }
}
