//! Input events and name entry

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use glam::IVec2;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
}

/// Platform input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed
    Quit,
    KeyDown(Key),
    /// Primary button pressed
    PointerDown,
    /// Primary button released
    PointerUp,
    PointerMoved(IVec2),
}

/// Source of input, polled once per frame
pub trait InputSource {
    /// Events since the previous poll, in arrival order
    fn poll(&mut self) -> Vec<InputEvent>;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn poll(&mut self) -> Vec<InputEvent> {
        (**self).poll()
    }
}

/// Replays a fixed list of frames, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append `count` frames without input
    pub fn idle(mut self, count: usize) -> Self {
        self.frames.extend((0..count).map(|_| Vec::new()));
        self
    }

    /// Append one frame
    pub fn then(mut self, events: Vec<InputEvent>) -> Self {
        self.frames.push_back(events);
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frames
            .pop_front()
            .unwrap_or_else(|| vec![InputEvent::Quit])
    }
}

/// Headless attract mode: starts a game, sweeps the ship across the screen
/// while firing, restarts after a game over and quits after `frames` frames.
#[derive(Debug, Clone)]
pub struct Autopilot {
    start: IVec2,
    width: i32,
    frame: u64,
    frames: u64,
    restart_every: u64,
}

impl Autopilot {
    pub fn new(start: IVec2, width: i32, frames: u64) -> Self {
        Self {
            start,
            width: width.max(1),
            frame: 0,
            frames,
            restart_every: 600,
        }
    }

    /// Pointer position for the current frame (triangle wave along x)
    fn sweep(&self) -> IVec2 {
        let span = i64::from(self.width) * 2;
        let t = (self.frame as i64 * 4 + i64::from(self.start.x)) % span;
        let x = if t < i64::from(self.width) { t } else { span - t };
        IVec2::new(x as i32, self.start.y)
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> Vec<InputEvent> {
        let events = if self.frame >= self.frames {
            vec![InputEvent::Quit]
        } else {
            match self.frame % self.restart_every {
                // Leave the game over screen (ignored elsewhere)
                0 => vec![InputEvent::KeyDown(Key::Enter)],
                // Click the ship to start, keep the button down to fire
                1 => vec![
                    InputEvent::PointerMoved(self.start),
                    InputEvent::PointerUp,
                    InputEvent::PointerDown,
                ],
                _ => vec![InputEvent::PointerMoved(self.sweep())],
            }
        };
        self.frame += 1;
        events
    }
}

/// Asks the player for a hall of fame name
pub trait NameInput {
    fn prompt_name(&mut self) -> String;
}

impl<T: NameInput + ?Sized> NameInput for &mut T {
    fn prompt_name(&mut self) -> String {
        (**self).prompt_name()
    }
}

/// Always answers with the same name
#[derive(Debug, Clone)]
pub struct FixedName(pub String);

impl NameInput for FixedName {
    fn prompt_name(&mut self) -> String {
        self.0.clone()
    }
}

/// Reads a name from standard input
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinNameInput;

impl NameInput for StdinNameInput {
    fn prompt_name(&mut self) -> String {
        eprint!("New hall of fame entry! Enter 4 letters or digits: ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        if let Err(err) = io::stdin().lock().read_line(&mut line) {
            log::warn!("Could not read pilot name: {}", err);
        }
        line.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_replays_then_quits() {
        let mut input = ScriptedInput::new([vec![InputEvent::PointerDown]])
            .idle(1)
            .then(vec![InputEvent::KeyDown(Key::Space)]);
        assert_eq!(input.remaining(), 3);
        assert_eq!(input.poll(), vec![InputEvent::PointerDown]);
        assert!(input.poll().is_empty());
        assert_eq!(input.poll(), vec![InputEvent::KeyDown(Key::Space)]);
        assert_eq!(input.poll(), vec![InputEvent::Quit]);
        assert_eq!(input.poll(), vec![InputEvent::Quit]);
    }

    #[test]
    fn test_autopilot_starts_sweeps_and_quits() {
        let start = IVec2::new(400, 500);
        let mut pilot = Autopilot::new(start, 800, 5);
        assert_eq!(pilot.poll(), vec![InputEvent::KeyDown(Key::Enter)]);
        assert_eq!(
            pilot.poll(),
            vec![
                InputEvent::PointerMoved(start),
                InputEvent::PointerUp,
                InputEvent::PointerDown
            ]
        );
        for _ in 2..5 {
            match pilot.poll().as_slice() {
                [InputEvent::PointerMoved(p)] => {
                    assert!((0..=800).contains(&p.x));
                    assert_eq!(p.y, 500);
                }
                other => panic!("unexpected events {:?}", other),
            }
        }
        assert_eq!(pilot.poll(), vec![InputEvent::Quit]);
    }

    #[test]
    fn test_fixed_name() {
        let mut names = FixedName("abcd".to_string());
        assert_eq!(names.prompt_name(), "abcd");
    }
}
