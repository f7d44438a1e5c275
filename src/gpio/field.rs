//! # Field-array register layout
//!
//! Used by every family except the F1. Each pin property lives in its own
//! register:
//!
//! | register  | bits per pin | values |
//! |-----------|--------------|--------|
//! | `MODER`   | 2 | `00` input, `01` output, `10` alternate, `11` analog |
//! | `OTYPER`  | 1 | `0` push-pull, `1` open-drain |
//! | `OSPEEDR` | 2 | `00` low .. `11` high |
//! | `PUPDR`   | 2 | `00` none, `01` pull-up, `10` pull-down |
//! | `AFRL`/`AFRH` | 4 | alternate function index, pins 0-7 / 8-15 |
//!
//! The properties are independent: every setter rewrites only its own field.
use super::{Drive, Layout, Mode, PinId, Pull, RegisterInterface, Speed};
use crate::Sealed;

pub const MODER: usize = 0x00;
pub const OTYPER: usize = 0x04;
pub const OSPEEDR: usize = 0x08;
pub const PUPDR: usize = 0x0C;
pub const IDR: usize = 0x10;
pub const ODR: usize = 0x14;
pub const BSRR: usize = 0x18;
/// Alternate function register for pins 0 to 7
pub const AFRL: usize = 0x20;
/// Alternate function register for pins 8 to 15
pub const AFRH: usize = 0x24;

const MODE_INPUT: u32 = 0b00;
const MODE_OUTPUT: u32 = 0b01;
const MODE_AF: u32 = 0b10;
const MODE_ANALOG: u32 = 0b11;

const PUPD_NONE: u32 = 0b00;
const PUPD_PULLUP: u32 = 0b01;
const PUPD_PULLDOWN: u32 = 0b10;

/// Marker type for the field-array layout
pub enum FieldLayout {}

impl Sealed for FieldLayout {}

impl FieldLayout {
    /// Rewrite the 2-bit field of the pin in the register at `offset`
    #[inline]
    fn write_2bit<R: RegisterInterface>(regs: &R, pin: PinId, offset: usize, value: u32) {
        let shift = pin.index() as u32 * 2;
        regs.modify_field(pin.port().base() + offset, 0b11 << shift, value << shift);
    }

    #[inline]
    fn write_moder<R: RegisterInterface>(regs: &R, pin: PinId, mode: u32) {
        Self::write_2bit(regs, pin, MODER, mode);
    }

    #[inline]
    fn write_otyper<R: RegisterInterface>(regs: &R, pin: PinId, drive: Drive) {
        let addr = pin.port().base() + OTYPER;
        match drive {
            Drive::PushPull => regs.clear_bits(addr, pin.mask_32()),
            Drive::OpenDrain => regs.set_bits(addr, pin.mask_32()),
        }
    }

    #[inline]
    fn write_pupdr<R: RegisterInterface>(regs: &R, pin: PinId, pupd: u32) {
        Self::write_2bit(regs, pin, PUPDR, pupd);
    }

    /// Direction/function of the pin followed by its drive. Open-drain is
    /// selected before the driver is enabled, push-pull after.
    fn set_driven<R: RegisterInterface>(regs: &R, pin: PinId, mode: u32, drive: Drive) {
        match drive {
            Drive::PushPull => {
                Self::write_moder(regs, pin, mode);
                Self::write_otyper(regs, pin, drive);
            }
            Drive::OpenDrain => {
                Self::write_otyper(regs, pin, drive);
                Self::write_moder(regs, pin, mode);
            }
        }
    }
}

impl Layout for FieldLayout {
    const IDR: usize = IDR;
    const ODR: usize = ODR;
    const BSRR: usize = BSRR;

    /// Input keeps the pull setting, analog clears it
    fn set_mode<R: RegisterInterface>(regs: &R, pin: PinId, mode: Mode) {
        match mode {
            Mode::Input => Self::write_moder(regs, pin, MODE_INPUT),
            Mode::Output(drive) => Self::set_driven(regs, pin, MODE_OUTPUT, drive),
            Mode::Alternate(drive) => Self::set_driven(regs, pin, MODE_AF, drive),
            Mode::Analog => {
                Self::write_pupdr(regs, pin, PUPD_NONE);
                Self::write_moder(regs, pin, MODE_ANALOG);
            }
        }
    }

    #[inline]
    fn set_pull<R: RegisterInterface>(regs: &R, pin: PinId, pull: Pull) {
        let pupd = match pull {
            Pull::None => PUPD_NONE,
            Pull::Up => PUPD_PULLUP,
            Pull::Down => PUPD_PULLDOWN,
        };
        Self::write_pupdr(regs, pin, pupd);
    }

    #[inline]
    fn set_speed<R: RegisterInterface>(regs: &R, pin: PinId, speed: Speed) {
        let code = match speed {
            Speed::Low => 0,
            Speed::Medium => 1,
            Speed::Fast => 2,
            Speed::High => 3,
        };
        Self::write_2bit(regs, pin, OSPEEDR, code);
    }

    /// Switches the pin to alternate mode and selects `af` (only its low four
    /// bits are used)
    fn map_alternate_function<R: RegisterInterface>(regs: &R, pin: PinId, af: u8) {
        Self::write_moder(regs, pin, MODE_AF);
        let index = pin.index() as u32;
        let (offset, shift) = if index < 8 {
            (AFRL, index * 4)
        } else {
            (AFRH, (index - 8) * 4)
        };
        regs.modify_field(
            pin.port().base() + offset,
            0x0f << shift,
            (af as u32 & 0x0f) << shift,
        );
    }
}
