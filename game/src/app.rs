use crate::{
    buffer::{AllocationFailure, PixelBuffer},
    render::{self, ScrollOffset},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Window events the application reacts to. Everything else belongs to the
/// OS default handler and never reaches `App`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Resize { width: i32, height: i32 },
    Close,
    Destroy,
    Paint,
    ActivateApp { active: bool },
    Quit,
}

/// What the binding layer must do after `App::handle_event`. Messages that
/// never become an `Event`, or arrive with no `App` to take them, go to the
/// OS default handler instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    /// Blit the current buffer as is, without rendering a new frame.
    Present,
}

/// Everything the frame loop and the window procedure share.
#[derive(Debug)]
pub struct App {
    state: RunState,
    buffer: PixelBuffer,
    offset: ScrollOffset,
    failure: Option<AllocationFailure>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            state: RunState::Stopped,
            buffer: PixelBuffer::empty(),
            offset: ScrollOffset::default(),
            failure: None,
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    #[inline]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    #[inline]
    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    /// Called once the window exists. Refuses to run if the buffer could
    /// not be allocated while the window was being created.
    pub fn start(&mut self) -> Result<(), AllocationFailure> {
        if let Some(failure) = self.failure.take() {
            self.state = RunState::Stopped;
            return Err(failure);
        }
        log::debug!("run state: {:?} -> Running", self.state);
        self.state = RunState::Running;
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("run state: Running -> Stopped");
        }
        self.state = RunState::Stopped;
    }

    /// Fatal error recorded while handling events, if any.
    pub fn take_failure(&mut self) -> Option<AllocationFailure> {
        self.failure.take()
    }

    pub fn handle_event(&mut self, event: Event) -> Dispatch {
        match event {
            Event::Resize { width, height } => {
                log::debug!("resize: {}x{}", width, height);
                if let Err(failure) = self.buffer.reallocate(width, height) {
                    log::error!("{}", failure);
                    self.failure = Some(failure);
                    self.stop();
                }
                Dispatch::Handled
            }
            Event::Close | Event::Destroy | Event::Quit => {
                log::info!("{:?} received, stopping", event);
                self.stop();
                Dispatch::Handled
            }
            Event::Paint => Dispatch::Present,
            Event::ActivateApp { active } => {
                log::debug!("WM_ACTIVATEAPP (active: {})", active);
                Dispatch::Handled
            }
        }
    }

    /// Renders into the buffer and hands it out for presenting.
    pub fn render_frame(&mut self) -> &PixelBuffer {
        render::render_weird_gradient(&mut self.buffer, self.offset);
        &self.buffer
    }

    pub fn advance(&mut self) {
        self.offset.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> App {
        let mut app = App::new();
        app.start().unwrap();
        app
    }

    #[test]
    fn starts_stopped() {
        let app = App::new();
        assert_eq!(app.state(), RunState::Stopped);
        assert!(app.buffer().is_empty());
    }

    #[test]
    fn start_refuses_after_failed_initial_resize() {
        let mut app = App::new();
        app.handle_event(Event::Resize { width: i32::MAX, height: i32::MAX });

        assert_eq!(
            app.start(),
            Err(AllocationFailure { width: i32::MAX, height: i32::MAX })
        );
        assert_eq!(app.state(), RunState::Stopped);
        assert_eq!(app.take_failure(), None);
    }

    #[test]
    fn close_destroy_and_quit_stop() {
        for &event in &[Event::Close, Event::Destroy, Event::Quit] {
            let mut app = running();
            assert_eq!(app.handle_event(event), Dispatch::Handled);
            assert_eq!(app.state(), RunState::Stopped, "{:?}", event);
        }
    }

    #[test]
    fn resize_reallocates() {
        let mut app = running();
        app.handle_event(Event::Resize { width: 10, height: 20 });
        assert_eq!(app.buffer().dim(), (10, 20));

        app.handle_event(Event::Resize { width: 3, height: 4 });
        assert_eq!(app.buffer().dim(), (3, 4));
        assert_eq!(app.buffer().byte_len(), 3 * 4 * 4);
        assert!(app.is_running());
    }

    #[test]
    fn failed_resize_stops_with_failure() {
        let mut app = running();
        app.handle_event(Event::Resize { width: i32::MAX, height: i32::MAX });
        assert!(!app.is_running());
        assert_eq!(
            app.take_failure(),
            Some(AllocationFailure { width: i32::MAX, height: i32::MAX })
        );
        assert_eq!(app.take_failure(), None);
    }

    #[test]
    fn paint_presents_without_rendering() {
        let mut app = running();
        app.handle_event(Event::Resize { width: 2, height: 1 });
        assert_eq!(app.handle_event(Event::Paint), Dispatch::Present);
        assert_eq!(app.buffer().pixels(), &[0, 0]);
    }

    #[test]
    fn activation_changes_nothing() {
        let mut app = running();
        app.handle_event(Event::Resize { width: 2, height: 2 });
        let offset = app.offset();

        assert_eq!(app.handle_event(Event::ActivateApp { active: false }), Dispatch::Handled);
        assert_eq!(app.handle_event(Event::ActivateApp { active: true }), Dispatch::Handled);
        assert!(app.is_running());
        assert_eq!(app.offset(), offset);
        assert_eq!(app.buffer().dim(), (2, 2));
    }

    #[test]
    fn render_then_advance() {
        let mut app = running();
        app.handle_event(Event::Resize { width: 2, height: 1 });
        assert_eq!(app.render_frame().pixels(), &[0x0000, 0x0001]);

        app.advance();
        assert_eq!(app.offset(), ScrollOffset::new(1, 0));
        assert_eq!(app.render_frame().pixels(), &[0x0001, 0x0002]);
    }
}
