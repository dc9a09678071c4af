use crate::core::alarm::SoundPlayer;
use std::io::{self, Write};

/// Rings the terminal bell and names the sound being played.
#[derive(Debug, Default)]
pub struct TerminalBell {
    plays: u32,
}

impl TerminalBell {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SoundPlayer for TerminalBell {
    fn play(&mut self, sound: &str) {
        self.plays += 1;
        let mut out = io::stdout().lock();
        let _ = write!(out, "\x07♪ {sound} ");
        let _ = out.flush();
    }

    fn stop(&mut self) {
        if self.plays > 0 {
            println!();
        }
    }
}
