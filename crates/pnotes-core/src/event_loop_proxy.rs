use crate::status_line::PromptEvent;

#[derive(Debug)]
pub enum UserEvent {
    PromptEvent(PromptEvent),
    /// The terminal went away or the process was asked to terminate.
    /// Handled like closing the window: the notes are saved and the app exits.
    Close,
}

pub trait EventLoopProxy: Send + Sync {
    fn send(&self, event: UserEvent);
    fn request_render(&self);
    fn dup(&self) -> Box<dyn EventLoopProxy>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLoopControlFlow {
    Wait,
    Exit,
}

pub struct NoopEventLoop;

impl EventLoopProxy for NoopEventLoop {
    fn send(&self, _: UserEvent) {}
    fn request_render(&self) {}
    fn dup(&self) -> Box<dyn EventLoopProxy> {
        Box::new(NoopEventLoop)
    }
}
