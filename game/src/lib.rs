pub mod app;
pub mod buffer;
pub mod present;
pub mod render;
pub mod run;

pub use app::{App, Dispatch, Event, RunState};
pub use buffer::{AllocationFailure, PixelBuffer, BYTES_PER_PIXEL};
pub use present::{BlitRect, ClientRect};
pub use render::{render_weird_gradient, ScrollOffset};
pub use run::{run, Host, Pump};
