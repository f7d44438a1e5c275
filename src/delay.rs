//! Spin-wait delays
//!
//! Busy loops calibrated in core clock cycles. They block the calling context
//! and are meant for short waits during bring-up, like reset pulses, where a
//! timer would be overkill. Interrupts occurring during the wait lengthen it.
use crate::clock;
use crate::time::{Hertz, MicroSeconds, U32Ext};
use embedded_hal::blocking::delay::{DelayMs, DelayUs};

/// Cycles spent on the call and the conversion, subtracted from every delay
const CALL_OVERHEAD: u64 = 6;

/// Spin for at least `cycles` core clock cycles
#[inline]
pub fn delay_cycles(cycles: u32) {
    if cycles == 0 {
        return;
    }
    #[cfg(target_arch = "arm")]
    cortex_m::asm::delay(cycles);
    #[cfg(not(target_arch = "arm"))]
    for _ in 0..cycles {
        core::hint::spin_loop();
    }
}

/// Number of cycles a wait of `duration` spins for at core clock `sysclk`
#[inline]
pub fn cycles_for(duration: MicroSeconds, sysclk: Hertz) -> u32 {
    duration
        .cycles_at(sysclk)
        .saturating_sub(CALL_OVERHEAD)
        .min(u32::MAX as u64) as u32
}

/// Number of cycles [`delay_us`] spins for
#[inline]
pub fn us_to_cycles(us: u32, sysclk: Hertz) -> u32 {
    cycles_for(us.us(), sysclk)
}

/// Number of cycles [`delay_ms`] spins for
#[inline]
pub fn ms_to_cycles(ms: u32, sysclk: Hertz) -> u32 {
    cycles_for(ms.ms().into(), sysclk)
}

/// Spin for `us` microseconds with the core running at `sysclk`
pub fn delay_us(us: u32, sysclk: impl Into<Hertz>) {
    if us == 0 {
        return;
    }
    delay_cycles(us_to_cycles(us, sysclk.into()));
}

/// Spin for `ms` milliseconds with the core running at `sysclk`
///
/// The wait is limited to `u32::MAX` cycles, about 25 s at 168 MHz.
pub fn delay_ms(ms: u32, sysclk: impl Into<Hertz>) {
    if ms == 0 {
        return;
    }
    delay_cycles(ms_to_cycles(ms, sysclk.into()));
}

/// Blocking delay provider for drivers expecting the embedded HAL delay traits
#[derive(Clone, Copy, Debug)]
pub struct SpinDelay {
    sysclk: Hertz,
}

impl SpinDelay {
    pub fn new(sysclk: impl Into<Hertz>) -> Self {
        SpinDelay {
            sysclk: sysclk.into(),
        }
    }

    /// Uses the frequency stored with [`set_sys_clock`](clock::set_sys_clock).
    /// Returns [`None`] if it was never set.
    pub fn from_sys_clock() -> Option<Self> {
        clock::get_sys_clock().map(Self::new)
    }

    /// Spin for `duration`, given in any unit converting to [`MicroSeconds`]
    pub fn delay(&mut self, duration: impl Into<MicroSeconds>) {
        let duration = duration.into();
        if duration.0 == 0 {
            return;
        }
        delay_cycles(cycles_for(duration, self.sysclk));
    }
}

impl DelayUs<u32> for SpinDelay {
    fn delay_us(&mut self, us: u32) {
        delay_us(us, self.sysclk);
    }
}

impl DelayUs<u16> for SpinDelay {
    fn delay_us(&mut self, us: u16) {
        delay_us(us as u32, self.sysclk);
    }
}

impl DelayUs<u8> for SpinDelay {
    fn delay_us(&mut self, us: u8) {
        delay_us(us as u32, self.sysclk);
    }
}

impl DelayMs<u32> for SpinDelay {
    fn delay_ms(&mut self, ms: u32) {
        delay_ms(ms, self.sysclk);
    }
}

impl DelayMs<u16> for SpinDelay {
    fn delay_ms(&mut self, ms: u16) {
        delay_ms(ms as u32, self.sysclk);
    }
}

impl DelayMs<u8> for SpinDelay {
    fn delay_ms(&mut self, ms: u8) {
        delay_ms(ms as u32, self.sysclk);
    }
}
