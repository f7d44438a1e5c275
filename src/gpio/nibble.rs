//! # Nibble-packed register layout (STM32F1)
//!
//! Every pin is configured by a 4-bit field. Pins 0 to 7 live in `CRL`, pins 8
//! to 15 in `CRH`, at bit offset `4 * (index % 8)`:
//!
//! | bits | name | input (`MODE = 00`)           | output (`MODE != 00`)              |
//! |------|------|-------------------------------|------------------------------------|
//! | 1:0  | MODE | `00`                          | `01` 10 MHz, `10` 2 MHz, `11` 50 MHz |
//! | 3:2  | CNF  | `00` analog, `01` floating, `10` pulled | `00` push-pull, `01` open-drain, `10` AF push-pull, `11` AF open-drain |
//!
//! There is no separate pull direction selector. In pulled-input mode the
//! output data register bit of the pin selects pull-up (1) or pull-down (0).
//!
//! This generation has no per-pin alternate-function index either: peripheral
//! signals are routed through the global AFIO remap registers, which are not
//! handled here.
use super::{Drive, Layout, Mode, PinId, Pull, RegisterInterface, Speed};
use crate::Sealed;

/// Configuration register for pins 0 to 7
pub const CRL: usize = 0x00;
/// Configuration register for pins 8 to 15
pub const CRH: usize = 0x04;
pub const IDR: usize = 0x08;
pub const ODR: usize = 0x0C;
pub const BSRR: usize = 0x10;

const MODE_INPUT: u32 = 0b00;
const MODE_OUTPUT_10_MHZ: u32 = 0b01;
const MODE_OUTPUT_2_MHZ: u32 = 0b10;
const MODE_OUTPUT_50_MHZ: u32 = 0b11;
const MODE_MASK: u32 = 0b11;

const CNF_INPUT_ANALOG: u32 = 0b00;
const CNF_INPUT_FLOAT: u32 = 0b01;
const CNF_INPUT_PULL_UPDOWN: u32 = 0b10;
const CNF_OUTPUT_PUSHPULL: u32 = 0b00;
const CNF_OUTPUT_OPENDRAIN: u32 = 0b01;
const CNF_OUTPUT_ALTFN_PUSHPULL: u32 = 0b10;
const CNF_OUTPUT_ALTFN_OPENDRAIN: u32 = 0b11;

/// Compose a configuration nibble
#[inline(always)]
const fn nibble(mode: u32, cnf: u32) -> u32 {
    mode | (cnf << 2)
}

/// Address of the configuration register holding the pin and the bit offset
/// of its nibble inside it
#[inline(always)]
fn config_reg(pin: PinId) -> (usize, u32) {
    let index = pin.index() as u32;
    let base = pin.port().base();
    if index < 8 {
        (base + CRL, index * 4)
    } else {
        (base + CRH, (index - 8) * 4)
    }
}

/// Marker type for the nibble-packed layout
pub enum NibbleLayout {}

impl Sealed for NibbleLayout {}

impl NibbleLayout {
    /// Replace the configuration nibble of the pin, leaving the other seven
    /// pins of the register untouched
    #[inline]
    pub fn write_nibble<R: RegisterInterface>(regs: &R, pin: PinId, value: u32) {
        let (addr, shift) = config_reg(pin);
        regs.modify_field(addr, 0x0f << shift, (value & 0x0f) << shift);
    }

    /// Current configuration nibble of the pin
    #[inline]
    pub fn read_nibble<R: RegisterInterface>(regs: &R, pin: PinId) -> u32 {
        let (addr, shift) = config_reg(pin);
        (regs.read(addr) >> shift) & 0x0f
    }
}

impl Layout for NibbleLayout {
    const IDR: usize = IDR;
    const ODR: usize = ODR;
    const BSRR: usize = BSRR;

    /// Output and alternate-function modes start out at 50 MHz
    fn set_mode<R: RegisterInterface>(regs: &R, pin: PinId, mode: Mode) {
        let value = match mode {
            Mode::Input => nibble(MODE_INPUT, CNF_INPUT_FLOAT),
            Mode::Analog => nibble(MODE_INPUT, CNF_INPUT_ANALOG),
            Mode::Output(Drive::PushPull) => nibble(MODE_OUTPUT_50_MHZ, CNF_OUTPUT_PUSHPULL),
            Mode::Output(Drive::OpenDrain) => nibble(MODE_OUTPUT_50_MHZ, CNF_OUTPUT_OPENDRAIN),
            Mode::Alternate(Drive::PushPull) => {
                nibble(MODE_OUTPUT_50_MHZ, CNF_OUTPUT_ALTFN_PUSHPULL)
            }
            Mode::Alternate(Drive::OpenDrain) => {
                nibble(MODE_OUTPUT_50_MHZ, CNF_OUTPUT_ALTFN_OPENDRAIN)
            }
        };
        Self::write_nibble(regs, pin, value);
    }

    /// Pull selection switches the pin to input. For pull-up and pull-down
    /// the output data bit is written first, so the resistor never points the
    /// wrong way once pulled-input mode is active.
    fn set_pull<R: RegisterInterface>(regs: &R, pin: PinId, pull: Pull) {
        match pull {
            Pull::None => Self::write_nibble(regs, pin, nibble(MODE_INPUT, CNF_INPUT_FLOAT)),
            Pull::Up | Pull::Down => {
                Self::set_level(regs, pin, pull == Pull::Up);
                Self::write_nibble(regs, pin, nibble(MODE_INPUT, CNF_INPUT_PULL_UPDOWN));
            }
        }
    }

    /// Only the MODE bits are rewritten, the CNF bits keep the drive setting.
    /// Every speed code is an output code, so calling this on an input pin
    /// turns it into an output.
    fn set_speed<R: RegisterInterface>(regs: &R, pin: PinId, speed: Speed) {
        let code = match speed {
            Speed::Low => MODE_OUTPUT_2_MHZ,
            Speed::Medium => MODE_OUTPUT_10_MHZ,
            Speed::Fast | Speed::High => MODE_OUTPUT_50_MHZ,
        };
        let (addr, shift) = config_reg(pin);
        regs.modify_field(addr, MODE_MASK << shift, code << shift);
    }

    /// No per-pin function selection on this generation
    #[inline(always)]
    fn map_alternate_function<R: RegisterInterface>(_regs: &R, _pin: PinId, _af: u8) {}
}
