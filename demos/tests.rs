//! Test image
//!
//! Runs one loopback test case on the target and reports through RTT
#![no_main]
#![no_std]

use cortex_m_rt::entry;
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};
use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32_pin_hal::gpio::{
    DynPin, Gpio, PinError, Speed, DYN_FLOATING_INPUT, DYN_PULL_DOWN_INPUT, DYN_PULL_UP_INPUT,
    DYN_PUSH_PULL_OUTPUT, PA0, PA1, PA8, PB6, PB7,
};

#[allow(dead_code)]
#[derive(Debug)]
enum TestCase {
    // Tie PA0 to PA1 for these tests!
    TestBasic,
    TestPullup,
    TestPulldown,
    TestModeChecks,
    // Tie PB6 to PB7 for this test
    PortB,
    // Tie PA0 to an oscilloscope
    Toggle,
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("-- STM32 Pin Test Application --");
    let mut led = DynPin::new(PA8, DYN_PUSH_PULL_OUTPUT);
    let test_case = TestCase::TestBasic;

    match test_case {
        TestCase::TestBasic
        | TestCase::TestPulldown
        | TestCase::TestPullup
        | TestCase::TestModeChecks => {
            rprintln!("Test case {:?}. Make sure to tie PA0 to PA1", test_case);
        }
        _ => {
            rprintln!("Test case {:?}", test_case);
        }
    }
    match test_case {
        TestCase::TestBasic => {
            let mut out = DynPin::new(PA0, DYN_PUSH_PULL_OUTPUT);
            let input = DynPin::new(PA1, DYN_FLOATING_INPUT);
            out.set_high().unwrap();
            assert!(input.is_high().unwrap());
            assert!(out.is_set_high().unwrap());
            out.set_low().unwrap();
            assert!(input.is_low().unwrap());
        }
        TestCase::TestPullup => {
            let input = DynPin::new(PA1, DYN_PULL_UP_INPUT);
            assert!(input.is_high().unwrap());
            let mut out = DynPin::new(PA0, DYN_PUSH_PULL_OUTPUT);
            out.set_low().unwrap();
            assert!(input.is_low().unwrap());
            out.set_high().unwrap();
            assert!(input.is_high().unwrap());
            out.into_floating_input();
            assert!(input.is_high().unwrap());
        }
        TestCase::TestPulldown => {
            let input = DynPin::new(PA1, DYN_PULL_DOWN_INPUT);
            assert!(input.is_low().unwrap());
            let mut out = DynPin::new(PA0, DYN_PUSH_PULL_OUTPUT);
            out.set_low().unwrap();
            assert!(input.is_low().unwrap());
            out.set_high().unwrap();
            assert!(input.is_high().unwrap());
            out.into_floating_input();
            assert!(input.is_low().unwrap());
        }
        TestCase::TestModeChecks => {
            let mut input = DynPin::new(PA1, DYN_PULL_DOWN_INPUT);
            assert_eq!(input.set_high(), Err(PinError::InvalidPinType));
            assert_eq!(input.set_speed(Speed::High), Err(PinError::InvalidPinType));
            input.into_analog();
            assert_eq!(input.is_low(), Err(PinError::InvalidPinType));
        }
        TestCase::PortB => {
            let mut out = DynPin::new(PB6, DYN_PUSH_PULL_OUTPUT);
            let input = DynPin::new(PB7, DYN_FLOATING_INPUT);
            out.set_high().unwrap();
            assert!(input.is_high().unwrap());
            out.set_low().unwrap();
            assert!(input.is_low().unwrap());
        }
        TestCase::Toggle => {
            let gpio = Gpio::new();
            gpio.clock_enable(PA0);
            gpio.output_pushpull(PA0);
            gpio.speed_high(PA0);
            rprintln!("Toggling 20 times..");
            for _ in 0..20 {
                gpio.toggle_level(PA0);
                cortex_m::asm::delay(25_000_000);
            }
        }
    }

    rprintln!("Test success");
    loop {
        led.toggle().ok();
        cortex_m::asm::delay(25_000_000);
    }
}
