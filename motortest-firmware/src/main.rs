//! Motor tester firmware
//!
//! Bench tool for brushless motor drivers with a CLOCK/DIR interface:
//! generates the speed clock, drives the control lines, counts FG
//! tachometer pulses and runs the button/OLED UI from `motortest-core`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::I2c;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use motortest_core::config::{parse_config, DeviceConfig};
use motortest_core::motor::PulseCounter;
use motortest_core::Controller;
use motortest_display::{Panel, Sh1106};
use motortest_drivers::PinPort;
use motortest_hal_rp2040::{FlashKvStore, PioClock};

use crate::board::ButtonWiring;
use crate::tasks::control::now_ms;

mod board;
mod tasks;

/// Deployment configuration, checked by build.rs
const EMBEDDED_CONFIG: &str = include_str!("../tester.toml");

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// FG edges, shared by the tachometer task and the control loop
static PULSES: PulseCounter = PulseCounter::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Motor tester starting...");

    let p = embassy_rp::init(Default::default());

    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("tester.toml rejected ({:?}), using defaults", e);
            DeviceConfig::default()
        }
    };
    info!("Configuration: {:?}", config);

    // Motor port
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let clock = PioClock::new(&mut common, sm0, p.PIN_2);

    let port = PinPort::new(clock, Output::new(p.PIN_3, Level::Low))
        .with_brake(Output::new(p.PIN_4, Level::Low))
        .with_stop(Output::new(p.PIN_5, Level::Low))
        .with_enable(board::enable_line(config.enable_policy, p.PIN_6))
        .with_fault(Input::new(p.PIN_7, Pull::Up));
    let fg = Input::new(p.PIN_8, Pull::Up);
    info!("Motor port initialized");

    // Operator interface
    let mut buttons = board::buttons(
        config.layout,
        ButtonWiring {
            up: p.PIN_10,
            down: p.PIN_11,
            left: p.PIN_12,
            right: p.PIN_13,
        },
    );

    let i2c = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, board::oled_bus_config());
    let mut oled = Sh1106::new(i2c);
    if let Err(e) = oled.init() {
        error!("OLED init failed: {:?}", e);
    }
    let display = Panel::new(oled);

    // Settings and profiles
    let store = FlashKvStore::new(p.FLASH, p.DMA_CH0);

    let tester = Controller::new(&config, port, &PULSES, store, &mut buttons, now_ms());

    unwrap!(spawner.spawn(tasks::tach_task(fg, &PULSES)));
    unwrap!(spawner.spawn(tasks::control_task(
        tester,
        buttons,
        display,
        config.timing.loop_ms
    )));

    info!("All tasks spawned, tester running");

    // `common` owns the loaded PIO program; keep this task alive
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
