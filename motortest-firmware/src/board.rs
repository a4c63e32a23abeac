//! Board wiring
//!
//! Pin map of the RP2040 tester board:
//!
//! ```text
//! GPIO2   CLOCK   (PIO0 SM0)      GPIO10  Up
//! GPIO3   DIR                     GPIO11  Down
//! GPIO4   BRAKE                   GPIO12  Left / Select
//! GPIO5   STOP                    GPIO13  Right
//! GPIO6   ENABLE  (out or in)     GPIO16  OLED SDA (I2C0)
//! GPIO7   LD      (pull-up)       GPIO17  OLED SCL (I2C0)
//! GPIO8   FG      (pull-up)
//! ```
//!
//! Buttons close to ground and use the internal pull-ups.

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, PIO0};
use embassy_rp::Peri;
use motortest_core::config::{ButtonLayout, EnablePolicy};
use motortest_core::Controller;
use motortest_display::{Panel, Sh1106};
use motortest_drivers::{ButtonPins, EnableLine, PinPort};
use motortest_hal_rp2040::{FlashKvStore, PioClock};

/// OLED bus speed
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

pub type Clock = PioClock<'static, PIO0, 0>;
pub type Port = PinPort<Clock, Output<'static>, Input<'static>>;
pub type Buttons = ButtonPins<Input<'static>>;
pub type Oled = Sh1106<I2c<'static, I2C0, i2c::Blocking>>;
pub type Display = Panel<Oled>;
pub type Store = FlashKvStore<'static>;
pub type Tester = Controller<'static, Port, Store>;

/// Raw button pins, before the layout picks which ones are used
pub struct ButtonWiring {
    pub up: Peri<'static, embassy_rp::peripherals::PIN_10>,
    pub down: Peri<'static, embassy_rp::peripherals::PIN_11>,
    pub left: Peri<'static, embassy_rp::peripherals::PIN_12>,
    pub right: Peri<'static, embassy_rp::peripherals::PIN_13>,
}

pub fn buttons(layout: ButtonLayout, pins: ButtonWiring) -> Buttons {
    let up = Input::new(pins.up, Pull::Up);
    let down = Input::new(pins.down, Pull::Up);
    let left = Input::new(pins.left, Pull::Up);
    match layout {
        ButtonLayout::FourButton => {
            ButtonPins::four(up, down, left, Input::new(pins.right, Pull::Up))
        }
        ButtonLayout::ThreeButton => ButtonPins::three(up, down, left),
    }
}

/// ENABLE is driven or sensed depending on how the driver is wired
pub fn enable_line(
    policy: EnablePolicy,
    pin: Peri<'static, impl Pin>,
) -> EnableLine<Output<'static>, Input<'static>> {
    match policy {
        EnablePolicy::Commanded => EnableLine::Output(Output::new(pin, Level::Low)),
        EnablePolicy::Observed => EnableLine::Input(Input::new(pin, Pull::None)),
    }
}

pub fn oled_bus_config() -> i2c::Config {
    let mut config = i2c::Config::default();
    config.frequency = I2C_FREQUENCY_HZ;
    config
}
