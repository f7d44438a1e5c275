//! # Pin identifiers
//!
//! A [`PinId`] names one GPIO line by its [`Port`] and its index inside that
//! port. It is a plain `Copy` value without any run-time state: everything a
//! pin is configured to lives in the hardware registers it designates.
//!
//! Each pin of every port present on the selected family is available as a
//! constant named according to its datasheet identifier, e.g. [`PC3`]. Ports
//! which do not exist on the target are not compiled in, so naming one of
//! their pins is a compile-time error.
//!
//! ```ignore
//! use stm32_pin_hal::gpio::{PinId, Port, PC3};
//!
//! assert_eq!(PC3, PinId::new(Port::C, 3));
//! assert_eq!(PC3.port(), Port::C);
//! assert_eq!(PC3.index(), 3);
//! assert_eq!(PC3.mask(), 1 << 3);
//! ```
//!
//! The packed integer form used by the register map is available through
//! [`PinId::raw`]: the port base address with the pin index in the low four
//! bits.

use crate::device::{self, pac};
use core::fmt;
use paste::paste;

//==================================================================================================
//  Errors
//==================================================================================================

/// GPIO error type
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PinError {
    /// The pin was not in the correct mode for the requested operation.
    /// [`DynPin`](super::DynPin)s track their mode at run-time, so these
    /// operations are fallible.
    InvalidPinType,
    /// The pin index does not fit into a port
    InvalidIndex,
    /// The address does not belong to a port of the selected family
    UnknownPort,
}

//==================================================================================================
//  Port
//==================================================================================================

/// GPIO port
///
/// Only the ports physically present on the selected family exist as variants.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    #[cfg(feature = "port-e")]
    E = 4,
    #[cfg(feature = "port-f")]
    F = 5,
    #[cfg(feature = "port-g")]
    G = 6,
    #[cfg(feature = "port-h")]
    H = 7,
    #[cfg(feature = "port-i")]
    I = 8,
}

impl Port {
    /// Position of the port register block in the GPIO address space. This is
    /// also the offset of its clock-enable bit.
    ///
    /// The L0 and L1 families place port H out of alphabetical order.
    #[inline]
    pub const fn slot(self) -> u8 {
        match self {
            Port::A => 0,
            Port::B => 1,
            Port::C => 2,
            Port::D => 3,
            #[cfg(feature = "port-e")]
            Port::E => 4,
            #[cfg(all(feature = "port-f", not(feature = "stm32l1")))]
            Port::F => 5,
            #[cfg(all(feature = "port-f", feature = "stm32l1"))]
            Port::F => 6,
            #[cfg(all(feature = "port-g", not(feature = "stm32l1")))]
            Port::G => 6,
            #[cfg(all(feature = "port-g", feature = "stm32l1"))]
            Port::G => 7,
            #[cfg(all(feature = "port-h", feature = "stm32l1"))]
            Port::H => 5,
            #[cfg(all(feature = "port-h", not(feature = "stm32l1")))]
            Port::H => 7,
            #[cfg(feature = "port-i")]
            Port::I => 8,
        }
    }

    /// Inverse of [`slot`](Self::slot)
    pub const fn from_slot(slot: u8) -> Option<Port> {
        match slot {
            0 => Some(Port::A),
            1 => Some(Port::B),
            2 => Some(Port::C),
            3 => Some(Port::D),
            #[cfg(feature = "port-e")]
            4 => Some(Port::E),
            #[cfg(all(feature = "port-f", not(feature = "stm32l1")))]
            5 => Some(Port::F),
            #[cfg(all(feature = "port-f", feature = "stm32l1"))]
            6 => Some(Port::F),
            #[cfg(all(feature = "port-g", not(feature = "stm32l1")))]
            6 => Some(Port::G),
            #[cfg(all(feature = "port-g", feature = "stm32l1"))]
            7 => Some(Port::G),
            #[cfg(all(feature = "port-h", feature = "stm32l1"))]
            5 => Some(Port::H),
            #[cfg(all(feature = "port-h", not(feature = "stm32l1")))]
            7 => Some(Port::H),
            #[cfg(feature = "port-i")]
            8 => Some(Port::I),
            _ => None,
        }
    }

    /// Base address of the port register block
    #[inline]
    pub fn base(self) -> usize {
        match self {
            Port::A => pac::GPIOA::ptr() as usize,
            Port::B => pac::GPIOB::ptr() as usize,
            Port::C => pac::GPIOC::ptr() as usize,
            Port::D => pac::GPIOD::ptr() as usize,
            #[cfg(feature = "port-e")]
            Port::E => pac::GPIOE::ptr() as usize,
            #[cfg(feature = "port-f")]
            Port::F => pac::GPIOF::ptr() as usize,
            #[cfg(feature = "port-g")]
            Port::G => pac::GPIOG::ptr() as usize,
            #[cfg(feature = "port-h")]
            Port::H => pac::GPIOH::ptr() as usize,
            #[cfg(feature = "port-i")]
            Port::I => pac::GPIOI::ptr() as usize,
        }
    }

    /// Look up the port whose register block starts at `base`
    pub fn from_base(base: usize) -> Option<Port> {
        (0..=u8::MAX)
            .filter_map(Port::from_slot)
            .find(|port| port.base() == base)
    }

    /// Look up the port whose register block contains `addr`
    pub fn containing(addr: usize) -> Option<Port> {
        (0..=u8::MAX)
            .filter_map(Port::from_slot)
            .find(|port| (port.base()..port.base() + device::GPIO_BLOCK_SIZE).contains(&addr))
    }

    /// Bit number of the port clock-enable bit inside
    /// [`rcc_gpio_en`](device::rcc_gpio_en)
    #[inline]
    pub const fn clock_bit(self) -> u8 {
        device::GPIO_EN_FIRST_BIT + self.slot()
    }

    /// Port letter as used in the datasheet. The discriminant is the letter
    /// offset, independent of the register slot.
    pub const fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Pin `index` of this port, see [`PinId::new`]
    #[inline]
    pub const fn pin(self, index: u8) -> PinId {
        PinId::new(self, index)
    }
}

//==================================================================================================
//  PinId
//==================================================================================================

/// Identifier of a single GPIO line
///
/// Immutable once constructed and carries no run-time state.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct PinId {
    port: Port,
    index: u8,
}

impl PinId {
    /// Number of pins of a port
    pub const PINS_PER_PORT: u8 = 16;

    /// Create the identifier for pin `index` of `port`
    ///
    /// `index` must be in `0..16`. It is not checked, only its low four bits
    /// are kept. Use [`try_new`](Self::try_new) for untrusted input.
    #[inline]
    pub const fn new(port: Port, index: u8) -> PinId {
        PinId {
            port,
            index: index & 0x0f,
        }
    }

    /// Checked version of [`new`](Self::new)
    pub const fn try_new(port: Port, index: u8) -> Result<PinId, PinError> {
        if index >= Self::PINS_PER_PORT {
            return Err(PinError::InvalidIndex);
        }
        Ok(PinId { port, index })
    }

    /// Decode a packed `port base | index` value, see [`raw`](Self::raw)
    pub fn from_raw(raw: u32) -> Result<PinId, PinError> {
        match Port::from_base((raw & !0x0f) as usize) {
            Some(port) => Ok(PinId {
                port,
                index: (raw & 0x0f) as u8,
            }),
            None => Err(PinError::UnknownPort),
        }
    }

    /// Packed form: port base address with the pin index in the low four bits
    #[inline]
    pub fn raw(self) -> u32 {
        self.port.base() as u32 | self.index as u32
    }

    #[inline]
    pub const fn port(self) -> Port {
        self.port
    }

    /// Index of the pin inside its port, in `0..16`
    #[inline]
    pub const fn index(self) -> u8 {
        self.index
    }

    /// Single-bit mask selecting this pin in the per-port data registers
    #[inline]
    pub const fn mask(self) -> u16 {
        1 << self.index
    }

    /// [`mask`](Self::mask) widened for 32-bit register access
    #[inline]
    pub(crate) const fn mask_32(self) -> u32 {
        1 << self.index
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.port.letter(), self.index)
    }
}

//==================================================================================================
//  Pin definitions
//==================================================================================================

macro_rules! declare_pins {
    ($Port:ident) => {
        declare_pins!($Port, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
    };
    ($Port:ident, [$($NUM:literal),+]) => {
        // Need paste macro to use ident in doc attribute
        paste! {
            $(
                #[doc = "Pin P" $Port $NUM]
                pub const [<P $Port $NUM>]: PinId = PinId::new(Port::$Port, $NUM);
            )+
        }
    };
}

declare_pins!(A);
declare_pins!(B);
declare_pins!(C);
declare_pins!(D);
#[cfg(feature = "port-e")]
declare_pins!(E);
#[cfg(feature = "port-f")]
declare_pins!(F);
#[cfg(feature = "port-g")]
declare_pins!(G);
#[cfg(feature = "port-h")]
declare_pins!(H);
#[cfg(feature = "port-i")]
declare_pins!(I);

#[cfg(test)]
mod tests {
    use super::*;

    fn ports() -> Vec<Port> {
        #[allow(unused_mut)]
        let mut ports = vec![Port::A, Port::B, Port::C, Port::D];
        #[cfg(feature = "port-e")]
        ports.push(Port::E);
        #[cfg(feature = "port-f")]
        ports.push(Port::F);
        #[cfg(feature = "port-g")]
        ports.push(Port::G);
        #[cfg(feature = "port-h")]
        ports.push(Port::H);
        #[cfg(feature = "port-i")]
        ports.push(Port::I);
        ports
    }

    #[test]
    fn encode_round_trips_for_every_port_and_index() {
        for port in ports() {
            for index in 0..16 {
                let pin = PinId::new(port, index);
                assert_eq!(pin.port(), port);
                assert_eq!(pin.index(), index);
                assert_eq!(PinId::from_raw(pin.raw()), Ok(pin));
            }
        }
    }

    #[test]
    fn raw_keeps_index_in_low_nibble() {
        for port in ports() {
            for index in 0..16 {
                let raw = PinId::new(port, index).raw();
                assert_eq!(raw & 0x0f, index as u32);
                assert_eq!((raw & !0x0f) as usize, port.base());
            }
        }
    }

    #[test]
    fn mask_has_single_bit() {
        for index in 0..16 {
            let mask = PinId::new(Port::B, index).mask();
            assert_eq!(mask.count_ones(), 1);
            assert_eq!(mask, 1 << index);
        }
    }

    #[test]
    fn named_pins_match_encoding() {
        assert_eq!(PA0, PinId::new(Port::A, 0));
        assert_eq!(PC3.port(), Port::C);
        assert_eq!(PC3.index(), 3);
        assert_eq!(PD15.mask(), 0x8000);
    }

    #[test]
    fn try_new_rejects_out_of_range_index() {
        assert_eq!(PinId::try_new(Port::A, 16), Err(PinError::InvalidIndex));
        assert_eq!(PinId::try_new(Port::A, 15), Ok(PA15));
    }

    #[test]
    fn from_raw_rejects_unknown_base() {
        assert_eq!(PinId::from_raw(0x0000_0003), Err(PinError::UnknownPort));
        let misaligned = (Port::A.base() + 0x10) as u32;
        assert_eq!(PinId::from_raw(misaligned), Err(PinError::UnknownPort));
    }

    #[test]
    fn slots_are_distinct_and_invertible() {
        let ports = ports();
        for (i, a) in ports.iter().enumerate() {
            assert_eq!(Port::from_slot(a.slot()), Some(*a));
            assert_eq!(Port::from_base(a.base()), Some(*a));
            for b in &ports[i + 1..] {
                assert_ne!(a.slot(), b.slot());
                assert_ne!(a.clock_bit(), b.clock_bit());
            }
        }
    }

    #[test]
    fn display_uses_datasheet_name() {
        assert_eq!(format!("{}", PC3), "PC3");
        assert_eq!(format!("{}", PB12), "PB12");
    }
}
