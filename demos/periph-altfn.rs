//! Pin bring-up for an RMII Ethernet PHY and a USART on an STM32F4 board
//!
//! Only the pins are configured here. The MAC and USART drivers are out of
//! scope, so the main loop just blinks the LED.
#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_halt as _;
use stm32_pin_hal::{
    clock::set_sys_clock,
    delay::{delay_us, SpinDelay},
    gpio::{Gpio, PinId, PA3, PA4, PA6, PA7, PA8, PC1, PC2, PC3, PC4, PC5, PC6, PD4, PD5},
    prelude::*,
};

const LED: PinId = PA8;

const PHY_CRSDV: PinId = PC5;
const PHY_RXD0: PinId = PC1;
const PHY_RXD1: PinId = PC2;
const PHY_TXEN: PinId = PC6;
const PHY_TXD0: PinId = PC3;
const PHY_TXD1: PinId = PC4;
const PHY_MDIO: PinId = PD4;
const PHY_MDC: PinId = PD5;
const PHY_RST: PinId = PA6;
const PHY_INTRP: PinId = PA7;

const USART_TXD: PinId = PA3;
const USART_RXD: PinId = PA4;

const AF_ETH: u8 = 11;
const AF_USART6: u8 = 8;

fn init_eth(gpio: &Gpio) {
    let rmii = [
        PHY_CRSDV, PHY_RXD0, PHY_RXD1, PHY_TXEN, PHY_TXD0, PHY_TXD1, PHY_MDIO, PHY_MDC,
    ];
    for pin in rmii {
        gpio.clock_enable(pin);
        gpio.alt_pushpull(pin);
        gpio.speed_high(pin);
        gpio.map_alternate_function(pin, AF_ETH);
    }

    gpio.clock_enable(PHY_INTRP);
    gpio.input(PHY_INTRP);
    gpio.pull_up(PHY_INTRP);

    gpio.clock_enable(PHY_RST);
    gpio.set_level(PHY_RST, true);
    gpio.output_pushpull(PHY_RST);

    // Reset pulse for the PHY
    let sysclk = 168.mhz();
    gpio.set_level(PHY_RST, false);
    delay_us(100, sysclk);
    gpio.set_level(PHY_RST, true);
    delay_us(100, sysclk);
}

fn init_usart(gpio: &Gpio) {
    for pin in [USART_TXD, USART_RXD] {
        gpio.clock_enable(pin);
        gpio.alt_pushpull(pin);
        gpio.map_alternate_function(pin, AF_USART6);
    }
}

fn init_led(gpio: &Gpio) {
    gpio.clock_enable(LED);
    gpio.set_level(LED, false);
    gpio.output_pushpull(LED);
    gpio.speed_fast(LED);
}

#[entry]
fn main() -> ! {
    set_sys_clock(168.mhz());
    let gpio = Gpio::new();
    init_led(&gpio);
    init_usart(&gpio);
    init_eth(&gpio);

    let mut delay = SpinDelay::from_sys_clock().unwrap();
    loop {
        gpio.toggle_level(LED);
        delay.delay_ms(500_u16);
    }
}
