use std::io::{self, Read};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use log::{error, trace};

use crate::movement::Dir;

const ESC: u8 = 0x1b;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Move(Dir),
    /// Escape pressed, or the input stream died. Ends the game.
    Cancel,
}

/// Decodes one read's worth of raw terminal bytes.
///
/// A lone ESC cancels; `ESC [ A..D` are the arrow keys. Everything else is
/// ignored.
pub fn decode(bytes: &[u8]) -> Option<InputEvent> {
    match bytes {
        [ESC] => Some(InputEvent::Cancel),
        [ESC, b'[', key, ..] => {
            let dir = match key {
                b'A' => Dir::Up,
                b'B' => Dir::Down,
                b'C' => Dir::Right,
                b'D' => Dir::Left,
                _ => return None,
            };
            Some(InputEvent::Move(dir))
        }
        _ => None,
    }
}

/// Blocks on `reader` forever, forwarding decoded events in read order.
///
/// Returns when the receiving side hangs up. A read failure (or EOF) is
/// logged and reported as one last [`InputEvent::Cancel`].
pub fn read_events(mut reader: impl Read, events: &Sender<InputEvent>) {
    let mut buf = [0u8; 100];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => {
                error!("input stream closed");
                let _ = events.send(InputEvent::Cancel);
                return;
            }
            Ok(n) => {
                let Some(event) = decode(&buf[..n]) else {
                    continue;
                };
                trace!("input event {event:?}");
                if events.send(event).is_err() {
                    return;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                error!("error reading input: {e}");
                let _ = events.send(InputEvent::Cancel);
                return;
            }
        }
    }
}

/// Runs [`read_events`] on its own thread.
pub fn spawn_reader<R>(reader: R, events: Sender<InputEvent>) -> io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name("input".into())
        .spawn(move || read_events(reader, &events))
}
