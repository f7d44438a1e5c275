//! # GPIO module
//!
//! Pins are named by [`PinId`] values such as [`PA8`] and configured through
//! [`Gpio`], which exposes one operation set for both STM32 GPIO register
//! generations:
//!
//! - [`nibble`]: the STM32F1 layout, where a 4-bit MODE/CNF field per pin is
//!   packed into `CRL`/`CRH`
//! - [`field`]: the layout of every other family, where mode, output type,
//!   speed, pull and alternate function each live in their own register
//!
//! Exactly one of them is compiled in, selected by the target family feature,
//! and re-exported as [`ActiveLayout`]. There is no run-time dispatch.
//!
//! ## Concurrency
//!
//! Mode, pull, speed and alternate-function setters read-modify-write
//! registers shared by all pins of a port. Callers must serialize these calls
//! per port, either by keeping them in a single execution context or with a
//! critical section of their own. [`Gpio::set_level`] and
//! [`Gpio::toggle_level`] only write the set/reset register and may be used
//! from different contexts on different pins of the same port.
//!
//! ## Preconditions
//!
//! The port clock must be enabled with [`Gpio::clock_enable`] before any other
//! call for a pin of that port. Speed settings only make sense for output and
//! alternate-function pins, pull settings only for inputs. None of this is
//! checked: the register transaction is performed regardless.
//!
//! ## Examples
//!
//! - [Blinky example](../../demos/blinky.rs)
use crate::Sealed;
use core::marker::PhantomData;

pub mod dynpins;
pub use dynpins::*;

pub mod pins;
pub use pins::*;

mod reg;
pub use reg::{Mmio, RegisterInterface};

#[cfg(any(feature = "layout-field", test))]
pub mod field;
#[cfg(any(feature = "layout-nibble", test))]
pub mod nibble;

#[cfg(test)]
pub(crate) mod sim;

/// Register layout of the selected target family
#[cfg(feature = "layout-nibble")]
pub type ActiveLayout = nibble::NibbleLayout;

/// Register layout of the selected target family
#[cfg(feature = "layout-field")]
pub type ActiveLayout = field::FieldLayout;

//==================================================================================================
//  Configuration values
//==================================================================================================

/// Output driver configuration
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Drive {
    /// Actively drives both high and low
    PushPull,
    /// Only actively drives low
    OpenDrain,
}

/// Direction and function of a pin
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Input,
    Output(Drive),
    /// Pin driven by a peripheral, see [`Gpio::map_alternate_function`]
    Alternate(Drive),
    /// All digital circuitry disconnected
    Analog,
}

/// Internal pull resistor
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Output slew rate
///
/// Layouts without a separate highest tier treat [`Speed::High`] like
/// [`Speed::Fast`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Speed {
    Low,
    Medium,
    Fast,
    High,
}

//==================================================================================================
//  Layout
//==================================================================================================

/// Register layout backend
///
/// Maps the pin operations onto the registers of one GPIO generation. The
/// implementations are the uninhabited marker types [`nibble::NibbleLayout`]
/// and [`field::FieldLayout`]. All functions take the register interface and
/// the pin, and leave every bit belonging to other pins untouched.
///
/// The data registers work the same in both generations, only their offsets
/// differ, so the level functions are provided.
pub trait Layout: Sealed {
    /// Offset of the input data register
    const IDR: usize;
    /// Offset of the output data register
    const ODR: usize;
    /// Offset of the bit set/reset register
    const BSRR: usize;

    /// Switch direction and function of the pin
    fn set_mode<R: RegisterInterface>(regs: &R, pin: PinId, mode: Mode);

    /// Select the pull resistor of an input pin
    fn set_pull<R: RegisterInterface>(regs: &R, pin: PinId, pull: Pull);

    /// Select the slew rate of an output or alternate-function pin
    fn set_speed<R: RegisterInterface>(regs: &R, pin: PinId, speed: Speed);

    /// Route alternate function `af` to the pin
    fn map_alternate_function<R: RegisterInterface>(regs: &R, pin: PinId, af: u8);

    /// Level currently present on the pin
    #[inline]
    fn get_level<R: RegisterInterface>(regs: &R, pin: PinId) -> bool {
        regs.read(pin.port().base() + Self::IDR) & pin.mask_32() != 0
    }

    /// Level the output driver is set to
    #[inline]
    fn output_level<R: RegisterInterface>(regs: &R, pin: PinId) -> bool {
        regs.read(pin.port().base() + Self::ODR) & pin.mask_32() != 0
    }

    #[inline]
    fn set_level<R: RegisterInterface>(regs: &R, pin: PinId, level: bool) {
        let mask = pin.mask_32();
        // BSRR only acts on the bits written as 1
        regs.write(
            pin.port().base() + Self::BSRR,
            if level { mask } else { mask << 16 },
        );
    }

    /// Invert the output level with a single set/reset register write
    #[inline]
    fn toggle_level<R: RegisterInterface>(regs: &R, pin: PinId) {
        let base = pin.port().base();
        let mask = pin.mask_32();
        let odr = regs.read(base + Self::ODR);
        regs.write(base + Self::BSRR, ((odr & mask) << 16) | (!odr & mask));
    }
}

//==================================================================================================
//  Gpio
//==================================================================================================

/// Pin configuration façade
///
/// [`Gpio::new`] accesses the registers of the running device through
/// [`Mmio`] with the [`ActiveLayout`]. The handle is zero-sized and `Copy`, so
/// it can be created wherever it is needed.
pub struct Gpio<R: RegisterInterface = Mmio, L: Layout = ActiveLayout> {
    regs: R,
    layout: PhantomData<L>,
}

impl Gpio<Mmio, ActiveLayout> {
    /// Access the GPIO registers of the running device
    #[inline]
    pub const fn new() -> Self {
        Gpio {
            regs: Mmio::new(),
            layout: PhantomData,
        }
    }
}

impl Default for Gpio<Mmio, ActiveLayout> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RegisterInterface + Clone, L: Layout> Clone for Gpio<R, L> {
    #[inline]
    fn clone(&self) -> Self {
        Gpio {
            regs: self.regs.clone(),
            layout: PhantomData,
        }
    }
}

impl<R: RegisterInterface + Copy, L: Layout> Copy for Gpio<R, L> {}

impl<R: RegisterInterface, L: Layout> Gpio<R, L> {
    /// Perform all register accesses through `regs`
    #[inline]
    pub fn with_interface(regs: R) -> Self {
        Gpio {
            regs,
            layout: PhantomData,
        }
    }

    /// Consumes the handle and returns the register interface
    pub fn release(self) -> R {
        self.regs
    }

    /// Enable the peripheral clock of the port the pin belongs to
    ///
    /// Must be called before any other configuration of a pin of that port.
    /// Enabling an already running clock has no effect.
    #[inline]
    pub fn clock_enable(&self, pin: PinId) {
        crate::clock::enable_port_clock(&self.regs, pin.port());
    }

    /// Actual level on the pin
    ///
    /// For an output, this may differ from the driven level when the line is
    /// held by something else.
    #[inline]
    pub fn get_level(&self, pin: PinId) -> bool {
        L::get_level(&self.regs, pin)
    }

    /// Level the output driver is set to
    #[inline]
    pub fn output_level(&self, pin: PinId) -> bool {
        L::output_level(&self.regs, pin)
    }

    #[inline]
    pub fn set_level(&self, pin: PinId, level: bool) {
        L::set_level(&self.regs, pin, level);
    }

    /// Create an edge on the pin
    #[inline]
    pub fn toggle_level(&self, pin: PinId) {
        L::toggle_level(&self.regs, pin);
    }

    #[inline]
    pub fn disable_pull(&self, pin: PinId) {
        L::set_pull(&self.regs, pin, Pull::None);
    }

    /// After this call, an unconnected input reads low
    #[inline]
    pub fn pull_down(&self, pin: PinId) {
        L::set_pull(&self.regs, pin, Pull::Down);
    }

    /// After this call, an unconnected input reads high
    #[inline]
    pub fn pull_up(&self, pin: PinId) {
        L::set_pull(&self.regs, pin, Pull::Up);
    }

    #[inline]
    pub fn output_pushpull(&self, pin: PinId) {
        L::set_mode(&self.regs, pin, Mode::Output(Drive::PushPull));
    }

    #[inline]
    pub fn output_opendrain(&self, pin: PinId) {
        L::set_mode(&self.regs, pin, Mode::Output(Drive::OpenDrain));
    }

    #[inline]
    pub fn alt_pushpull(&self, pin: PinId) {
        L::set_mode(&self.regs, pin, Mode::Alternate(Drive::PushPull));
    }

    #[inline]
    pub fn alt_opendrain(&self, pin: PinId) {
        L::set_mode(&self.regs, pin, Mode::Alternate(Drive::OpenDrain));
    }

    /// Speed settings have no meaning in this mode
    #[inline]
    pub fn input(&self, pin: PinId) {
        L::set_mode(&self.regs, pin, Mode::Input);
    }

    /// Disconnect the digital circuitry, letting the pin float anywhere
    /// between 0 and VDD
    #[inline]
    pub fn analog(&self, pin: PinId) {
        L::set_mode(&self.regs, pin, Mode::Analog);
    }

    #[inline]
    pub fn set_speed(&self, pin: PinId, speed: Speed) {
        L::set_speed(&self.regs, pin, speed);
    }

    /// Slowest slew rate, with very limited current
    #[inline]
    pub fn speed_low(&self, pin: PinId) {
        self.set_speed(pin, Speed::Low);
    }

    #[inline]
    pub fn speed_medium(&self, pin: PinId) {
        self.set_speed(pin, Speed::Medium);
    }

    #[inline]
    pub fn speed_fast(&self, pin: PinId) {
        self.set_speed(pin, Speed::Fast);
    }

    /// Highest slew rate. The current is not limited, so a collision may
    /// destroy the pin.
    #[inline]
    pub fn speed_high(&self, pin: PinId) {
        self.set_speed(pin, Speed::High);
    }

    /// Route alternate function `af` to the pin
    ///
    /// Whether `af` selects the intended peripheral signal is up to the
    /// caller. On the nibble layout this does nothing, routing is done through
    /// the global remap registers instead.
    #[inline]
    pub fn map_alternate_function(&self, pin: PinId, af: u8) {
        L::map_alternate_function(&self.regs, pin, af);
    }
}

#[cfg(test)]
mod tests {
    use super::field::FieldLayout;
    use super::nibble::NibbleLayout;
    use super::sim::SimRegisters;
    use super::*;
    use crate::device;

    fn check_double_toggle<L: Layout>() {
        let sim = SimRegisters::new::<L>();
        let gpio = Gpio::<_, L>::with_interface(&sim);
        gpio.clock_enable(PB5);
        gpio.output_pushpull(PB5);
        gpio.set_level(PB5, true);
        gpio.toggle_level(PB5);
        assert!(!gpio.get_level(PB5));
        gpio.toggle_level(PB5);
        assert!(gpio.get_level(PB5));
    }

    fn check_loopback<L: Layout>() {
        let sim = SimRegisters::new::<L>();
        let gpio = Gpio::<_, L>::with_interface(&sim);
        gpio.output_pushpull(PA1);
        for level in [true, false, true] {
            gpio.set_level(PA1, level);
            assert_eq!(gpio.get_level(PA1), level);
            assert_eq!(gpio.output_level(PA1), level);
        }
    }

    fn check_toggle_uses_bsrr<L: Layout>() {
        let sim = SimRegisters::new::<L>();
        let gpio = Gpio::<_, L>::with_interface(&sim);
        gpio.set_level(PA2, true);
        gpio.set_level(PA7, true);
        sim.clear_log();
        gpio.toggle_level(PA2);
        // One write, resetting only PA2
        assert_eq!(sim.writes(), vec![(Port::A.base() + L::BSRR, 1 << (2 + 16))]);
        assert!(gpio.output_level(PA7));
        assert!(!gpio.output_level(PA2));
    }

    fn check_clock_idempotent<L: Layout>() {
        let sim = SimRegisters::new::<L>();
        sim.poke(device::rcc_gpio_en(), 0x8000_0010);
        let gpio = Gpio::<_, L>::with_interface(&sim);
        gpio.clock_enable(PC3);
        let first = sim.peek(device::rcc_gpio_en());
        assert_eq!(first, 0x8000_0010 | 1 << Port::C.clock_bit());
        gpio.clock_enable(PC3);
        gpio.clock_enable(PC12);
        assert_eq!(sim.peek(device::rcc_gpio_en()), first);
    }

    #[test]
    fn double_toggle_restores_level() {
        check_double_toggle::<NibbleLayout>();
        check_double_toggle::<FieldLayout>();
    }

    #[test]
    fn set_level_reads_back() {
        check_loopback::<NibbleLayout>();
        check_loopback::<FieldLayout>();
    }

    #[test]
    fn toggle_is_single_bsrr_write() {
        check_toggle_uses_bsrr::<NibbleLayout>();
        check_toggle_uses_bsrr::<FieldLayout>();
    }

    #[test]
    fn clock_enable_is_idempotent() {
        check_clock_idempotent::<NibbleLayout>();
        check_clock_idempotent::<FieldLayout>();
    }

    #[test]
    fn set_level_writes_set_or_reset_half() {
        let sim = SimRegisters::new::<FieldLayout>();
        let gpio = Gpio::<_, FieldLayout>::with_interface(&sim);
        gpio.set_level(PD9, true);
        gpio.set_level(PD9, false);
        let bsrr = Port::D.base() + FieldLayout::BSRR;
        assert_eq!(sim.writes(), vec![(bsrr, 1 << 9), (bsrr, 1 << 25)]);
    }
}
