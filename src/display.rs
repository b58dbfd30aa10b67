//! The front-panel graphics surface and the layouts drawn on it

use embedded_hal::blocking::delay::DelayMs;

/// One line of formatted display text
pub type Line = heapless::String<24>;

/// Colors the labs draw with. Monochrome panels map everything but `Black` to lit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Color {
    Black,
    White,
    Red,
    Green,
    DarkBlue,
    Orange,
    Salmon,
    DeepSkyBlue,
}

/// A pixel position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Point {
    #[allow(missing_docs)]
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle with inclusive corners
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    #[allow(missing_docs)]
    pub x_min: i32,
    #[allow(missing_docs)]
    pub y_min: i32,
    #[allow(missing_docs)]
    pub x_max: i32,
    #[allow(missing_docs)]
    pub y_max: i32,
}

impl Rect {
    #[allow(missing_docs)]
    pub const fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}

/// How a text anchor point relates to the drawn string
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// Anchor is the top-left corner of the first glyph
    Left,
    /// Anchor is the centre of the string
    Centered,
}

/// A small fixed-size graphics surface
pub trait Display {
    /// Width in pixels
    fn width(&self) -> i32;
    /// Height in pixels
    fn height(&self) -> i32;
    /// Fill `rect` with a solid color
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw `text` in the fixed 8-pixel-high font
    fn draw_text(&mut self, text: &str, at: Point, align: Align, color: Color);
    /// Push any buffered drawing to the panel
    fn flush(&mut self) {}
}

/// Height of one text row in the fixed font
const ROW: i32 = 8;
/// Delay between loading-bar steps [ms]
const SPLASH_STEP_MS: u32 = 28;

/// Layout helper shared by every lab.
///
/// Every operation clears the region it owns before drawing into it; there is
/// no diffing against what is already on the panel.
pub struct Screen<D> {
    display: D,
}

impl<D: Display> Screen<D> {
    /// Take ownership of the panel
    pub fn new(display: D) -> Self {
        Screen { display }
    }

    /// Borrow the underlying panel
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Release the underlying panel
    pub fn into_inner(self) -> D {
        self.display
    }

    fn full(&self) -> Rect {
        Rect::new(0, 0, self.display.width() - 1, self.display.height() - 1)
    }

    /// Paint the whole surface
    pub fn fill(&mut self, color: Color) {
        let all = self.full();
        self.display.fill_rect(all, color);
        self.display.flush();
    }

    /// Blank the whole surface
    pub fn clear(&mut self) {
        self.fill(Color::Black);
    }

    /// Title bar across rows 0..=9
    pub fn banner(&mut self, title: &str, color: Color) {
        let width = self.display.width();
        self.display.fill_rect(Rect::new(0, 0, width - 1, 9), color);
        self.display
            .draw_text(title, Point::new(width / 2, 4), Align::Centered, Color::White);
        self.display.flush();
    }

    /// Farewell screen drawn on `Q`
    pub fn goodbye(&mut self) {
        let all = self.full();
        self.display.fill_rect(all, Color::Black);
        self.display.draw_text(
            "Goodbye",
            Point::new(self.display.width() / 2, 30),
            Align::Centered,
            Color::Red,
        );
        self.display.flush();
    }

    /// Left-aligned text at `y` over a freshly cleared band
    pub fn text_line(&mut self, y: i32, text: &str) {
        let width = self.display.width();
        self.display
            .fill_rect(Rect::new(0, y, width - 1, y + ROW - 1), Color::Black);
        self.display
            .draw_text(text, Point::new(5, y), Align::Left, Color::White);
        self.display.flush();
    }

    /// Text centred on row `y` over a freshly cleared band
    pub fn centered_line(&mut self, y: i32, text: &str, color: Color) {
        let width = self.display.width();
        self.display.fill_rect(
            Rect::new(0, y - ROW / 2, width - 1, y + ROW / 2 - 1),
            Color::Black,
        );
        self.display
            .draw_text(text, Point::new(width / 2, y), Align::Centered, color);
        self.display.flush();
    }

    /// Horizontal bar `length` pixels long between rows `top` and `bottom`,
    /// with the remainder of the band cleared
    pub fn histogram(&mut self, top: i32, bottom: i32, length: i32, color: Color) {
        let width = self.display.width();
        let length = length.clamp(0, width);
        if length > 0 {
            self.display
                .fill_rect(Rect::new(0, top, length - 1, bottom), color);
        }
        if length < width {
            self.display
                .fill_rect(Rect::new(length, top, width - 1, bottom), Color::Black);
        }
        self.display.flush();
    }

    /// Animated loading bar shown once at power-up
    pub fn splash<T: DelayMs<u32>>(&mut self, delay: &mut T) {
        self.clear();
        let width = self.display.width();
        for length in 10..=(width - 10) {
            let caption = match length % 10 {
                0 => "Loading.",
                1 => "Loading..",
                2 => "Loading...",
                _ => "Loading",
            };
            self.display
                .fill_rect(Rect::new(0, 16, width - 1, 23), Color::Black);
            self.display
                .draw_text(caption, Point::new(width / 2, 20), Align::Centered, Color::Salmon);
            delay.delay_ms(SPLASH_STEP_MS);
            self.display
                .fill_rect(Rect::new(9, 26, length, 39), Color::DeepSkyBlue);
            self.display.flush();
        }
        self.clear();
    }
}
