//! # Value-level pins with run-time mode tracking
//!
//! [`Gpio`] is stateless: any pin can be reconfigured or driven at any time,
//! and nothing stops an application from writing to a pin that is still an
//! input. [`DynPin`] pairs a [`PinId`] with the [`DynPinMode`] it was last
//! configured for and checks that mode before every operation, so the
//! embedded HAL GPIO traits can be implemented on top of it.
//!
//! ```ignore
//! let mut led = DynPin::new(PA8, DYN_PUSH_PULL_OUTPUT);
//! led.set_high()?;
//! // Use one of the literal function names
//! led.into_floating_input();
//! // Use a method and a DynPinMode variant
//! led.into_mode(DYN_PUSH_PULL_OUTPUT);
//! ```
//!
//! # Embedded HAL traits
//!
//! This module implements the `digital::v2` GPIO traits of the embedded HAL
//! for [`DynPin`]. If the [`DynPin`] is not in the correct [`DynPinMode`] for
//! the operation, the trait functions will return
//! [`InvalidPinType`](PinError::InvalidPinType).
use super::{ActiveLayout, Drive, Gpio, Layout, Mmio, PinError, PinId, RegisterInterface, Speed};
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};

//==================================================================================================
//  DynPinMode configurations
//==================================================================================================

/// Value-level `enum` for input configurations
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DynInput {
    Floating,
    PullDown,
    PullUp,
}

/// Value-level `enum` for output configurations
pub type DynOutput = Drive;

//==================================================================================================
//  DynPinMode
//==================================================================================================

/// Value-level `enum` representing pin modes
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DynPinMode {
    Input(DynInput),
    Output(DynOutput),
    /// Output driver and alternate function index
    Alternate(DynOutput, u8),
    Analog,
}

/// Value-level variant of [`DynPinMode`] for floating input mode
pub const DYN_FLOATING_INPUT: DynPinMode = DynPinMode::Input(DynInput::Floating);
/// Value-level variant of [`DynPinMode`] for pull-down input mode
pub const DYN_PULL_DOWN_INPUT: DynPinMode = DynPinMode::Input(DynInput::PullDown);
/// Value-level variant of [`DynPinMode`] for pull-up input mode
pub const DYN_PULL_UP_INPUT: DynPinMode = DynPinMode::Input(DynInput::PullUp);

/// Value-level variant of [`DynPinMode`] for push-pull output mode
pub const DYN_PUSH_PULL_OUTPUT: DynPinMode = DynPinMode::Output(DynOutput::PushPull);
/// Value-level variant of [`DynPinMode`] for open-drain output mode
pub const DYN_OPEN_DRAIN_OUTPUT: DynPinMode = DynPinMode::Output(DynOutput::OpenDrain);

/// Value-level variant of [`DynPinMode`] for analog mode
pub const DYN_ANALOG: DynPinMode = DynPinMode::Analog;

//==================================================================================================
//  DynPin
//==================================================================================================

/// A value-level pin, parameterized by [`PinId`] and [`DynPinMode`]
///
/// Nothing prevents two [`DynPin`]s with the same [`PinId`]. The mode check
/// is only meaningful if the application keeps a single one per pin.
pub struct DynPin<R: RegisterInterface = Mmio, L: Layout = ActiveLayout> {
    id: PinId,
    mode: DynPinMode,
    gpio: Gpio<R, L>,
}

impl DynPin<Mmio, ActiveLayout> {
    /// Configure a pin of the running device
    #[inline]
    pub fn new(id: PinId, mode: DynPinMode) -> Self {
        Self::configure(Gpio::new(), id, mode)
    }
}

impl<R: RegisterInterface, L: Layout> DynPin<R, L> {
    /// Enable the port clock and apply `mode` to the pin
    pub fn configure(gpio: Gpio<R, L>, id: PinId, mode: DynPinMode) -> Self {
        gpio.clock_enable(id);
        let pin = DynPin { id, mode, gpio };
        pin.apply(mode);
        pin
    }

    /// Return a copy of the pin ID
    #[inline]
    pub fn id(&self) -> PinId {
        self.id
    }

    /// Return a copy of the pin mode
    #[inline]
    pub fn mode(&self) -> DynPinMode {
        self.mode
    }

    /// Consumes the pin and returns the [`Gpio`] handle it was built with
    pub fn release(self) -> Gpio<R, L> {
        self.gpio
    }

    fn apply(&self, mode: DynPinMode) {
        let (gpio, id) = (&self.gpio, self.id);
        match mode {
            DynPinMode::Input(pull) => {
                gpio.input(id);
                match pull {
                    DynInput::Floating => gpio.disable_pull(id),
                    DynInput::PullDown => gpio.pull_down(id),
                    DynInput::PullUp => gpio.pull_up(id),
                }
            }
            DynPinMode::Output(Drive::PushPull) => gpio.output_pushpull(id),
            DynPinMode::Output(Drive::OpenDrain) => gpio.output_opendrain(id),
            DynPinMode::Alternate(drive, af) => {
                match drive {
                    Drive::PushPull => gpio.alt_pushpull(id),
                    Drive::OpenDrain => gpio.alt_opendrain(id),
                }
                gpio.map_alternate_function(id, af);
            }
            DynPinMode::Analog => gpio.analog(id),
        }
    }

    /// Convert the pin to the requested [`DynPinMode`]
    #[inline]
    pub fn into_mode(&mut self, mode: DynPinMode) {
        // Only modify registers if we are actually changing pin mode
        if mode != self.mode {
            self.apply(mode);
            self.mode = mode;
        }
    }

    /// Configure the pin to operate as a floating input
    #[inline]
    pub fn into_floating_input(&mut self) {
        self.into_mode(DYN_FLOATING_INPUT);
    }

    /// Configure the pin to operate as a pulled down input
    #[inline]
    pub fn into_pull_down_input(&mut self) {
        self.into_mode(DYN_PULL_DOWN_INPUT);
    }

    /// Configure the pin to operate as a pulled up input
    #[inline]
    pub fn into_pull_up_input(&mut self) {
        self.into_mode(DYN_PULL_UP_INPUT);
    }

    /// Configure the pin to operate as a push-pull output
    #[inline]
    pub fn into_push_pull_output(&mut self) {
        self.into_mode(DYN_PUSH_PULL_OUTPUT);
    }

    /// Configure the pin to operate as an open-drain output
    #[inline]
    pub fn into_open_drain_output(&mut self) {
        self.into_mode(DYN_OPEN_DRAIN_OUTPUT);
    }

    /// Hand the pin over to alternate function `af`
    #[inline]
    pub fn into_alternate(&mut self, drive: DynOutput, af: u8) {
        self.into_mode(DynPinMode::Alternate(drive, af));
    }

    #[inline]
    pub fn into_analog(&mut self) {
        self.into_mode(DYN_ANALOG);
    }

    /// Only output and alternate-function pins have a slew rate
    pub fn set_speed(&mut self, speed: Speed) -> Result<(), PinError> {
        match self.mode {
            DynPinMode::Output(_) | DynPinMode::Alternate(..) => {
                self.gpio.set_speed(self.id, speed);
                Ok(())
            }
            _ => Err(PinError::InvalidPinType),
        }
    }

    #[inline]
    fn _read(&self) -> Result<bool, PinError> {
        match self.mode {
            DynPinMode::Input(_) | DynPinMode::Output(_) => Ok(self.gpio.get_level(self.id)),
            _ => Err(PinError::InvalidPinType),
        }
    }

    #[inline]
    fn _read_output(&self) -> Result<bool, PinError> {
        match self.mode {
            DynPinMode::Output(_) => Ok(self.gpio.output_level(self.id)),
            _ => Err(PinError::InvalidPinType),
        }
    }

    #[inline]
    fn _write(&mut self, bit: bool) -> Result<(), PinError> {
        match self.mode {
            DynPinMode::Output(_) => {
                self.gpio.set_level(self.id, bit);
                Ok(())
            }
            _ => Err(PinError::InvalidPinType),
        }
    }

    #[inline]
    fn _toggle(&mut self) -> Result<(), PinError> {
        match self.mode {
            DynPinMode::Output(_) => {
                self.gpio.toggle_level(self.id);
                Ok(())
            }
            _ => Err(PinError::InvalidPinType),
        }
    }
}

//==================================================================================================
// Embedded HAL traits
//==================================================================================================

impl<R: RegisterInterface, L: Layout> OutputPin for DynPin<R, L> {
    type Error = PinError;
    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self._write(true)
    }
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self._write(false)
    }
}

impl<R: RegisterInterface, L: Layout> InputPin for DynPin<R, L> {
    type Error = PinError;
    #[inline]
    fn is_high(&self) -> Result<bool, Self::Error> {
        self._read()
    }
    #[inline]
    fn is_low(&self) -> Result<bool, Self::Error> {
        self._read().map(|v| !v)
    }
}

impl<R: RegisterInterface, L: Layout> StatefulOutputPin for DynPin<R, L> {
    #[inline]
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        self._read_output()
    }
    #[inline]
    fn is_set_low(&self) -> Result<bool, Self::Error> {
        self._read_output().map(|v| !v)
    }
}

impl<R: RegisterInterface, L: Layout> ToggleableOutputPin for DynPin<R, L> {
    type Error = PinError;
    #[inline]
    fn toggle(&mut self) -> Result<(), Self::Error> {
        self._toggle()
    }
}
