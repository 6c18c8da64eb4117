use crate::{
    app::App,
    buffer::{AllocationFailure, PixelBuffer},
    present::ClientRect,
};

/// Message drain result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pump {
    Continue,
    Quit,
}

/// The OS side of the frame loop.
pub trait Host {
    /// Dispatches every queued message into `app` without blocking.
    ///
    /// Returns `Pump::Quit` once the quit message is seen.
    fn drain_messages(&mut self, app: &mut App) -> Pump;

    fn client_rect(&self) -> ClientRect;

    /// Stretches the whole buffer over `client`.
    fn present(&mut self, buffer: &PixelBuffer, client: ClientRect);

    /// Called once per presented frame.
    fn frame_end(&mut self) {}
}

/// Uncapped busy loop: drain, render, present, advance.
///
/// Returns when the app stops. A failed buffer allocation is fatal.
pub fn run<H: Host>(host: &mut H, app: &mut App) -> Result<(), AllocationFailure> {
    while app.is_running() {
        if host.drain_messages(app) == Pump::Quit {
            app.stop();
        }
        if let Some(failure) = app.take_failure() {
            return Err(failure);
        }
        if !app.is_running() {
            break;
        }

        let client = host.client_rect();
        let buffer = app.render_frame();
        host.present(buffer, client);
        app.advance();
        host.frame_end();
    }

    log::info!("frame loop finished after offset {:?}", app.offset());
    Ok(())
}
