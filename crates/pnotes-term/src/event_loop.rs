use std::{
    iter,
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use crossterm::event::Event;
use pnotes_core::event_loop_proxy::{EventLoopControlFlow, EventLoopProxy, UserEvent};

pub enum TuiEvent {
    Render,
    AppEvent(UserEvent),
    Crossterm(Event),
}

/// Everything that can wake the main thread, in arrival order.
enum Message {
    Crossterm(Event),
    App(UserEvent),
    Redraw,
}

/// Runs every handler on the calling thread. Terminal input and signals are
/// received on helper threads and only forwarded through one channel.
pub struct TuiEventLoop {
    tx: Sender<Message>,
    rx: Receiver<Message>,
}

impl Default for TuiEventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiEventLoop {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn create_proxy(&self) -> TuiEventLoopProxy {
        TuiEventLoopProxy {
            tx: self.tx.clone(),
        }
    }

    pub fn run<F>(self, handler: F)
    where
        F: FnMut(TuiEvent, &mut EventLoopControlFlow),
    {
        let Self { tx, rx } = self;

        spawn_terminal_reader(tx.clone());

        #[cfg(unix)]
        if let Err(err) = spawn_signal_listener(tx.clone()) {
            tracing::error!("Unable to listen for termination signals: {err}");
        }

        drop(tx);
        dispatch(&rx, handler);
    }
}

/// Renders once, then handles every queued message before the next render.
/// Returns when a handler asks to exit or when every sender is gone.
fn dispatch<F>(rx: &Receiver<Message>, mut handler: F)
where
    F: FnMut(TuiEvent, &mut EventLoopControlFlow),
{
    let mut control_flow = EventLoopControlFlow::Wait;
    handler(TuiEvent::Render, &mut control_flow);

    while control_flow != EventLoopControlFlow::Exit {
        let Ok(first) = rx.recv() else {
            break;
        };

        for message in iter::once(first).chain(rx.try_iter()) {
            let event = match message {
                Message::Crossterm(event) => TuiEvent::Crossterm(event),
                Message::App(event) => TuiEvent::AppEvent(event),
                Message::Redraw => continue,
            };
            handler(event, &mut control_flow);
            if control_flow == EventLoopControlFlow::Exit {
                return;
            }
        }

        handler(TuiEvent::Render, &mut control_flow);
    }
}

fn spawn_terminal_reader(tx: Sender<Message>) {
    thread::spawn(move || {
        loop {
            let message = match crossterm::event::read() {
                Ok(event) => Message::Crossterm(event),
                Err(err) => {
                    // without input the app can not be closed any other way
                    tracing::error!("Error reading terminal event, closing: {err}");
                    let _ = tx.send(Message::App(UserEvent::Close));
                    break;
                }
            };

            if tx.send(message).is_err() {
                break;
            }
        }
    });
}

/// Turns SIGHUP (terminal closed), SIGINT and SIGTERM into a close request.
#[cfg(unix)]
fn spawn_signal_listener(tx: Sender<Message>) -> std::io::Result<()> {
    use signal_hook::{
        consts::{SIGHUP, SIGINT, SIGTERM},
        iterator::Signals,
    };

    let mut signals = Signals::new([SIGHUP, SIGINT, SIGTERM])?;
    thread::spawn(move || {
        for signal in signals.forever() {
            tracing::info!("Received signal {signal}, closing");
            if tx.send(Message::App(UserEvent::Close)).is_err() {
                break;
            }
        }
    });
    Ok(())
}

#[derive(Clone)]
pub struct TuiEventLoopProxy {
    tx: Sender<Message>,
}

impl EventLoopProxy for TuiEventLoopProxy {
    fn send(&self, event: UserEvent) {
        let _ = self.tx.send(Message::App(event));
    }

    fn request_render(&self) {
        let _ = self.tx.send(Message::Redraw);
    }

    fn dup(&self) -> Box<dyn EventLoopProxy> {
        Box::new(self.clone())
    }
}
