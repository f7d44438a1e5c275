//! Time units
//!
//! Frequencies are kept in [`Hertz`] and durations in [`MicroSeconds`], the
//! two quantities a spin-wait delay is computed from. [`MegaHertz`] and
//! [`MilliSeconds`] are convenience wrappers converting into them.
//!
//! The [`U32Ext`] trait adds `.hz()`, `.mhz()`, `.ms()` and `.us()` to `u32`.
//!
//! ```rust
//! use stm32_pin_hal::time::{Hertz, MicroSeconds, U32Ext};
//!
//! let sysclk: Hertz = 168.mhz().into();
//! let reset_pulse: MicroSeconds = 2.ms().into();
//! assert_eq!(reset_pulse.cycles_at(sysclk), 336_000);
//! ```

/// Core or bus clock frequency
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Debug)]
pub struct Hertz(pub u32);

/// Frequency in megahertz, see [`Hertz`]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Debug)]
pub struct MegaHertz(pub u32);

/// Duration in milliseconds, see [`MicroSeconds`]
#[derive(PartialEq, Eq, PartialOrd, Clone, Copy, Debug)]
pub struct MilliSeconds(pub u32);

/// Duration in microseconds
#[derive(PartialEq, Eq, PartialOrd, Clone, Copy, Debug)]
pub struct MicroSeconds(pub u64);

impl MicroSeconds {
    /// Number of clock cycles of a clock running at `freq` elapsing during
    /// this duration, rounded down. Saturates at `u64::MAX / 1_000_000`.
    #[inline]
    pub const fn cycles_at(self, freq: Hertz) -> u64 {
        self.0.saturating_mul(freq.0 as u64) / 1_000_000
    }
}

/// Extension trait that adds convenience methods to the `u32` type
pub trait U32Ext {
    /// Wrap in `Hertz`
    fn hz(self) -> Hertz;

    /// Wrap in `MegaHertz`
    fn mhz(self) -> MegaHertz;

    /// Wrap in `MilliSeconds`
    fn ms(self) -> MilliSeconds;

    /// Wrap in `MicroSeconds`
    fn us(self) -> MicroSeconds;
}

impl U32Ext for u32 {
    fn hz(self) -> Hertz {
        Hertz(self)
    }

    fn mhz(self) -> MegaHertz {
        MegaHertz(self)
    }

    fn ms(self) -> MilliSeconds {
        MilliSeconds(self)
    }

    fn us(self) -> MicroSeconds {
        MicroSeconds(self as u64)
    }
}

impl From<MegaHertz> for Hertz {
    fn from(val: MegaHertz) -> Self {
        Self(val.0 * 1_000_000)
    }
}

impl From<MilliSeconds> for MicroSeconds {
    fn from(val: MilliSeconds) -> Self {
        Self(val.0 as u64 * 1_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn megahertz_converts_to_hertz() {
        assert_eq!(Hertz::from(72.mhz()), Hertz(72_000_000));
    }

    #[test]
    fn milliseconds_do_not_overflow_as_microseconds() {
        assert_eq!(MicroSeconds::from(4.ms()), MicroSeconds(4_000));
        assert_eq!(
            MicroSeconds::from(u32::MAX.ms()),
            MicroSeconds(u32::MAX as u64 * 1_000)
        );
    }

    #[test]
    fn cycles_round_down() {
        assert_eq!(1.us().cycles_at(168.mhz().into()), 168);
        assert_eq!(1.us().cycles_at(Hertz(1_500_000)), 1);
        assert_eq!(MicroSeconds::from(10.ms()).cycles_at(Hertz(32_768)), 327);
    }
}
