//! SSD1306 front panel over I2C0, drawn through embedded-graphics
//!
//! The panel is 128x64; the labs lay out for a 96x64 surface, which is drawn
//! centred on it.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{Point as GfxPoint, Primitive};
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_graphics::Drawable;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};
use tm4c123x_hal::gpio::gpiob::{PB2, PB3};
use tm4c123x_hal::gpio::{AlternateFunction, OpenDrain, PullUp, PushPull, AF3};
use tm4c123x_hal::i2c::I2c;
use tm4c123x_hal::tm4c123x::I2C0;

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::display::{Align, Color, Display, Point, Rect};

/// I2C0 on PB2 (SCL) and PB3 (SDA)
pub type Bus = I2c<
    I2C0,
    (
        PB2<AlternateFunction<AF3, PushPull>>,
        PB3<AlternateFunction<AF3, OpenDrain<PullUp>>>,
    ),
>;

type Panel = Ssd1306<I2CInterface<Bus>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Left margin that centres the lab surface on the panel
const X_OFFSET: i32 = (128 - DISPLAY_WIDTH) / 2;

/// Monochrome panels light every color except black
fn lit(color: Color) -> BinaryColor {
    match color {
        Color::Black => BinaryColor::Off,
        _ => BinaryColor::On,
    }
}

/// The front-panel display
pub struct Oled {
    panel: Panel,
}

impl Oled {
    /// Initialise the controller and blank it
    pub fn new(bus: Bus) -> Self {
        let interface = I2CDisplayInterface::new(bus);
        let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let _ = panel.init();
        panel.clear_buffer();
        let _ = panel.flush();
        Oled { panel }
    }

    fn at(point: Point) -> GfxPoint {
        GfxPoint::new(point.x + X_OFFSET, point.y)
    }
}

impl Display for Oled {
    fn width(&self) -> i32 {
        DISPLAY_WIDTH
    }

    fn height(&self) -> i32 {
        DISPLAY_HEIGHT
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let _ = Rectangle::with_corners(
            Oled::at(Point::new(rect.x_min, rect.y_min)),
            Oled::at(Point::new(rect.x_max, rect.y_max)),
        )
        .into_styled(PrimitiveStyle::with_fill(lit(color)))
        .draw(&mut self.panel);
    }

    /// Opaque text: the glyph cell is cleared to the opposite color
    fn draw_text(&mut self, text: &str, at: Point, align: Align, color: Color) {
        let foreground = lit(color);
        let character_style = MonoTextStyleBuilder::new()
            .font(&FONT_5X8)
            .text_color(foreground)
            .background_color(foreground.invert())
            .build();
        let text_style = match align {
            Align::Left => TextStyleBuilder::new()
                .alignment(Alignment::Left)
                .baseline(Baseline::Top)
                .build(),
            Align::Centered => TextStyleBuilder::new()
                .alignment(Alignment::Center)
                .baseline(Baseline::Middle)
                .build(),
        };
        let _ = Text::with_text_style(text, Oled::at(at), character_style, text_style)
            .draw(&mut self.panel);
    }

    fn flush(&mut self) {
        let _ = self.panel.flush();
    }
}
