//! Deterministic fakes for host tests
//!
//! `FakeConsole` runs on a virtual clock: sleeps advance it instantly and
//! typed bytes arrive at fixed virtual times, so timing assertions are exact.

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use crate::traits::{
    Brightness, CharacterDisplay, Console, ConsoleError, DisplayError, LightSensor, Wake,
};

/// Console with a virtual millisecond clock
#[derive(Debug, Default)]
pub struct FakeConsole {
    now_ms: u64,
    input: VecDeque<(u64, u8)>,
    output: Vec<u8>,
}

impl FakeConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes that are available right now
    pub fn type_bytes(&mut self, bytes: &[u8]) {
        let now = self.now_ms;
        self.type_at(now, bytes);
    }

    /// Queue bytes that become available at `at_ms`
    pub fn type_at(&mut self, at_ms: u64, bytes: &[u8]) {
        self.input.extend(bytes.iter().map(|&b| (at_ms, b)));
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Everything written so far, lossily decoded
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Console for FakeConsole {
    fn input_pending(&mut self) -> bool {
        self.input.front().is_some_and(|&(at, _)| at <= self.now_ms)
    }

    async fn read_byte(&mut self) -> u8 {
        let (at, byte) = self.input.pop_front().expect("test console ran out of input");
        self.now_ms = self.now_ms.max(at);
        byte
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), ConsoleError> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    async fn sleep_ms(&mut self, ms: u32) -> Wake {
        let deadline = self.now_ms + u64::from(ms);
        match self.input.front() {
            Some(&(at, _)) if at <= deadline => {
                self.now_ms = self.now_ms.max(at);
                Wake::Input
            }
            _ => {
                self.now_ms = deadline;
                Wake::Elapsed
            }
        }
    }
}

/// Character grid that records every text write
#[derive(Debug)]
pub struct FakeDisplay {
    cols: u8,
    rows: u8,
    grid: Vec<Vec<u8>>,
    cursor: (u8, u8),
    frames: Vec<(u8, String)>,
    brightness: Option<Brightness>,
    powered: bool,
    power_log: Vec<bool>,
}

impl FakeDisplay {
    pub fn new(cols: u8, rows: u8) -> Self {
        Self {
            cols,
            rows,
            grid: vec![vec![b' '; usize::from(cols)]; usize::from(rows)],
            cursor: (0, 0),
            frames: Vec::new(),
            brightness: None,
            powered: false,
            power_log: Vec::new(),
        }
    }

    /// Contents of a row without trailing blanks
    pub fn row(&self, row: usize) -> String {
        String::from_utf8_lossy(&self.grid[row]).trim_end().to_string()
    }

    /// Every `write_str` call as `(row, text)`
    pub fn frames(&self) -> &[(u8, String)] {
        &self.frames
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    /// Whether any frame contained `text`
    pub fn showed(&self, text: &str) -> bool {
        self.frames.iter().any(|(_, frame)| frame.contains(text))
    }

    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Every `set_power` call in order
    pub fn power_log(&self) -> &[bool] {
        &self.power_log
    }
}

impl CharacterDisplay for FakeDisplay {
    fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        for row in &mut self.grid {
            row.fill(b' ');
        }
        self.cursor = (0, 0);
        Ok(())
    }

    fn home(&mut self) -> Result<(), DisplayError> {
        self.cursor = (0, 0);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= self.cols || row >= self.rows {
            return Err(DisplayError::InvalidPosition);
        }
        self.cursor = (col, row);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        let (col, row) = self.cursor;
        self.frames.push((row, text.to_string()));
        let line = &mut self.grid[usize::from(row)];
        for (i, byte) in text.bytes().enumerate() {
            if let Some(cell) = line.get_mut(usize::from(col) + i) {
                *cell = byte;
            }
        }
        let advanced = usize::from(col) + text.len();
        self.cursor = (advanced.min(usize::from(self.cols)) as u8, row);
        Ok(())
    }

    fn set_brightness(&mut self, level: Brightness) -> Result<(), DisplayError> {
        self.brightness = Some(level);
        Ok(())
    }

    fn set_power(&mut self, on: bool) -> Result<(), DisplayError> {
        self.powered = on;
        self.power_log.push(on);
        Ok(())
    }
}

/// Light sensor returning a settable value
#[derive(Debug, Clone, Copy)]
pub struct FixedLight(pub u16);

impl LightSensor for FixedLight {
    fn read(&mut self) -> u16 {
        self.0
    }
}
