//! # GPIO pin layer for STM32 microcontrollers
//!
//! Every GPIO line is named by a single [`PinId`](gpio::PinId) value and
//! configured through [`Gpio`](gpio::Gpio). The register layout backing these
//! calls is fixed at build time by selecting exactly one target family feature:
//!
//! - `stm32f1`: nibble-packed `CRL`/`CRH` layout
//! - `stm32f0`, `stm32f2`, `stm32f3`, `stm32f4`, `stm32f7`, `stm32l0`, `stm32l1`:
//!   field-array `MODER`/`OTYPER`/`OSPEEDR`/`PUPDR`/`AFR` layout
//!
//! `stm32f4` is the default feature. Every other family must be selected with
//! default features disabled, otherwise two families are active and the build
//! fails:
//!
//! ```toml
//! [dependencies.stm32-pin-hal]
//! version = "0.1"
//! default-features = false
//! features = ["stm32f1", "rt"]
//! ```
//!
//! Register addresses come from the peripheral access crate of the family,
//! re-exported as [`device::pac`].
//!
//! ```ignore
//! use stm32_pin_hal::gpio::{Gpio, PA8};
//!
//! let gpio = Gpio::new();
//! gpio.clock_enable(PA8);
//! gpio.set_level(PA8, false);
//! gpio.output_pushpull(PA8);
//! loop {
//!     gpio.toggle_level(PA8);
//! }
//! ```
#![cfg_attr(not(test), no_std)]

#[cfg(not(any(
    feature = "stm32f0",
    feature = "stm32f1",
    feature = "stm32f2",
    feature = "stm32f3",
    feature = "stm32f4",
    feature = "stm32f7",
    feature = "stm32l0",
    feature = "stm32l1",
)))]
compile_error!("no target family selected, enable one of the `stm32xx` features");

#[cfg(all(feature = "layout-nibble", feature = "layout-field"))]
compile_error!("the nibble and field register layouts are mutually exclusive");

const _: () = assert!(
    (cfg!(feature = "stm32f0") as u8
        + cfg!(feature = "stm32f1") as u8
        + cfg!(feature = "stm32f2") as u8
        + cfg!(feature = "stm32f3") as u8
        + cfg!(feature = "stm32f4") as u8
        + cfg!(feature = "stm32f7") as u8
        + cfg!(feature = "stm32l0") as u8
        + cfg!(feature = "stm32l1") as u8)
        <= 1,
    "more than one target family selected"
);

pub mod clock;
pub mod delay;
pub mod device;
pub mod gpio;
pub mod prelude;
pub mod time;

mod private {
    /// Super trait used to mark traits with an exhaustive set of
    /// implementations
    pub trait Sealed {}
}

pub(crate) use private::Sealed;
