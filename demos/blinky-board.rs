//! Blinky example for several board revisions
//!
//! Blinking slows down while the button is held. Select the revision with
//! [`BOARD`].
#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_halt as _;
use stm32_pin_hal::{
    delay::delay_ms,
    gpio::{Gpio, PinId, PA1, PA8, PB6, PC1, PC3},
    prelude::*,
};

#[allow(dead_code)]
#[derive(Clone, Copy)]
enum Board {
    Rev1,
    Rev2,
    Rev3,
}

const BOARD: Board = Board::Rev2;

/// LED pin, button pin and the level the button reads when pressed
const fn pinout(board: Board) -> (PinId, PinId, bool) {
    match board {
        Board::Rev1 => (PA8, PC1, false),
        Board::Rev2 => (PC3, PC1, false),
        Board::Rev3 => (PA1, PB6, true),
    }
}

#[entry]
fn main() -> ! {
    let (led, button, pressed) = pinout(BOARD);
    let sysclk = 16.mhz();
    let gpio = Gpio::new();

    gpio.clock_enable(led);
    gpio.clock_enable(button);

    gpio.set_level(led, false);
    gpio.output_pushpull(led);
    gpio.speed_fast(led);

    gpio.input(button);
    // Released button reads the opposite level
    if pressed {
        gpio.pull_down(button);
    } else {
        gpio.pull_up(button);
    }

    loop {
        gpio.toggle_level(led);
        if gpio.get_level(button) == pressed {
            delay_ms(100, sysclk);
        }
    }
}
