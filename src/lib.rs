//! Character-cell windowing toolkit.
//!
//! A [`WidgetTree`] holds every control in an arena; containers lay their
//! children out as weighted horizontal or vertical boxes. The [`Composer`]
//! keeps the stack of overlapping top-level [`Window`]s, routes input to
//! them and paints the screen through a clipped [`Canvas`]. [`MainLoop`]
//! ties the composer to a terminal backend.

pub mod actions;
pub mod canvas;
pub mod colors;
pub mod component_context;
pub mod components;
pub mod composer;
pub mod config;
pub mod constants;
mod dispatch;
pub mod drivers;
pub mod error;
pub mod event;
pub mod event_loop;
pub mod geometry;
pub mod keybindings;
pub mod layout;
pub mod runner;
pub mod state;
pub mod theme;
pub mod tracing_sub;
pub mod widget;
pub mod window;

pub use canvas::Canvas;
pub use component_context::ComponentContext;
pub use composer::Composer;
pub use config::Config;
pub use error::{Result, TvError};
pub use event::Event;
pub use event_loop::{ControlFlow, EventSender, MainLoop};
pub use geometry::{ClipRect, Point, Size};
pub use widget::{Align, Control, HitResult, Pack, Widget, WidgetId, WidgetTree};
pub use window::{BorderStyle, TitleButtons, TopLevel, Window};
