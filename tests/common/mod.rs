//! Recording fakes for the peripheral collaborators
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial;

use tm4c123g_labs::app::Lab;
use tm4c123g_labs::config::LabConfig;
use tm4c123g_labs::display::{Align, Color, Display, Point, Rect};
use tm4c123g_labs::hal::{AnalogInput, Button, ButtonPad, PinBank, TickTimer, ToneGenerator};

/// Serial port with a scripted receive queue and a transmit log
#[derive(Clone, Default)]
pub struct FakeSerial {
    pub rx: Rc<RefCell<VecDeque<u8>>>,
    pub tx: Rc<RefCell<Vec<u8>>>,
}

impl FakeSerial {
    pub fn type_in(&self, bytes: &[u8]) {
        self.rx.borrow_mut().extend(bytes.iter().copied());
    }

    pub fn unread(&self) -> usize {
        self.rx.borrow().len()
    }

    /// Everything sent so far, as text
    pub fn sent(&self) -> String {
        String::from_utf8_lossy(&self.tx.borrow()).into_owned()
    }

    pub fn take_sent(&self) -> String {
        let sent = self.sent();
        self.tx.borrow_mut().clear();
        sent
    }
}

impl serial::Read<u8> for FakeSerial {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Infallible> {
        self.rx.borrow_mut().pop_front().ok_or(nb::Error::WouldBlock)
    }
}

impl serial::Write<u8> for FakeSerial {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
        self.tx.borrow_mut().push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOp {
    Fill(Rect, Color),
    Text(String, Point, Align, Color),
}

/// 96x64 surface that logs every drawing call
#[derive(Clone, Default)]
pub struct FakeDisplay {
    pub ops: Rc<RefCell<Vec<DrawOp>>>,
}

impl FakeDisplay {
    pub fn take_ops(&self) -> Vec<DrawOp> {
        std::mem::take(&mut *self.ops.borrow_mut())
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(text, ..) => Some(text.clone()),
                DrawOp::Fill(..) => None,
            })
            .collect()
    }
}

impl Display for FakeDisplay {
    fn width(&self) -> i32 {
        96
    }

    fn height(&self) -> i32 {
        64
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.borrow_mut().push(DrawOp::Fill(rect, color));
    }

    fn draw_text(&mut self, text: &str, at: Point, align: Align, color: Color) {
        self.ops
            .borrow_mut()
            .push(DrawOp::Text(text.to_owned(), at, align, color));
    }
}

/// LED that remembers its current level
#[derive(Clone, Default)]
pub struct FakeLed {
    pub high: Rc<RefCell<bool>>,
}

impl FakeLed {
    pub fn is_high(&self) -> bool {
        *self.high.borrow()
    }
}

impl OutputPin for FakeLed {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        *self.high.borrow_mut() = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        *self.high.borrow_mut() = true;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneOp {
    Tone(u32, u32),
    Silence,
}

#[derive(Clone, Default)]
pub struct FakeTone {
    pub ops: Rc<RefCell<Vec<ToneOp>>>,
}

impl ToneGenerator for FakeTone {
    fn configure_tone(&mut self, period: u32, duty: u32) {
        self.ops.borrow_mut().push(ToneOp::Tone(period, duty));
    }

    fn silence(&mut self) {
        self.ops.borrow_mut().push(ToneOp::Silence);
    }
}

/// Four coil lines
#[derive(Clone, Default)]
pub struct FakeCoils {
    pub levels: Rc<RefCell<[bool; 4]>>,
}

impl FakeCoils {
    /// Current levels packed with line A in bit 0
    pub fn bits(&self) -> u8 {
        self.levels
            .borrow()
            .iter()
            .enumerate()
            .fold(0, |bits, (i, &high)| bits | (u8::from(high) << i))
    }
}

impl PinBank for FakeCoils {
    fn set_output(&mut self, pin: usize, level: bool) {
        if let Some(line) = self.levels.borrow_mut().get_mut(pin) {
            *line = level;
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeAdc {
    pub samples: Rc<RefCell<[u16; 3]>>,
}

impl FakeAdc {
    pub fn set(&self, channel: usize, raw: u16) {
        self.samples.borrow_mut()[channel] = raw;
    }
}

impl AnalogInput for FakeAdc {
    fn read_adc(&mut self, channel: usize) -> u16 {
        self.samples.borrow().get(channel).copied().unwrap_or(0)
    }
}

#[derive(Clone, Default)]
pub struct FakeButtons {
    pub held: Rc<RefCell<Option<Button>>>,
}

impl FakeButtons {
    pub fn hold(&self, button: Option<Button>) {
        *self.held.borrow_mut() = button;
    }
}

impl ButtonPad for FakeButtons {
    fn pressed(&mut self) -> Option<Button> {
        *self.held.borrow()
    }
}

#[derive(Default)]
pub struct FakeTimer {
    pub periods: Vec<u32>,
}

impl TickTimer for FakeTimer {
    fn set_period(&mut self, ticks: u32) {
        self.periods.push(ticks);
    }
}

pub struct NoDelay;

impl DelayMs<u32> for NoDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

/// A lab that only carries its configuration
pub struct BareLab(pub LabConfig);

impl Lab for BareLab {
    fn config(&self) -> &LabConfig {
        &self.0
    }
}
