//! Simple blinky example
//!
//! The LED is assumed on PA8. Change [`LED`] for other boards.
#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_halt as _;
use stm32_pin_hal::gpio::{Gpio, PinId, PA8};

const LED: PinId = PA8;

#[entry]
fn main() -> ! {
    let gpio = Gpio::new();
    gpio.clock_enable(LED);
    gpio.set_level(LED, false);
    gpio.output_pushpull(LED);

    loop {
        gpio.toggle_level(LED);
    }
}
