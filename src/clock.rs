//! Peripheral clock gating for the GPIO ports and system clock bookkeeping
use crate::device;
use crate::gpio::{Port, RegisterInterface};
use crate::time::Hertz;
use cortex_m::interrupt::{self, Mutex};
use once_cell::unsync::OnceCell;

static SYS_CLOCK: Mutex<OnceCell<Hertz>> = Mutex::new(OnceCell::new());

/// The core clock depends on the board and on the PLL setup done by the
/// application. It can be set here so it can be used by other software
/// components, like [`SpinDelay`](crate::delay::SpinDelay), as well.
/// The clock can be set exactly once
pub fn set_sys_clock(freq: impl Into<Hertz>) {
    let freq = freq.into();
    interrupt::free(|cs| {
        SYS_CLOCK.borrow(cs).set(freq).ok();
    })
}

/// Returns the configured system clock
pub fn get_sys_clock() -> Option<Hertz> {
    interrupt::free(|cs| SYS_CLOCK.borrow(cs).get().copied())
}

/// Set the clock-enable bit of `port`. No other bit is altered, and enabling
/// a running clock leaves the register unchanged.
#[inline]
pub fn enable_port_clock<R: RegisterInterface>(regs: &R, port: Port) {
    regs.set_bits(device::rcc_gpio_en(), 1 << port.clock_bit());
}

/// Clear the clock-enable bit of `port`. The port registers stop responding
/// until the clock is enabled again.
#[inline]
pub fn disable_port_clock<R: RegisterInterface>(regs: &R, port: Port) {
    regs.clear_bits(device::rcc_gpio_en(), 1 << port.clock_bit());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::field::FieldLayout;
    use crate::gpio::sim::SimRegisters;

    #[test]
    fn enable_sets_only_the_port_bit() {
        let sim = SimRegisters::new::<FieldLayout>();
        enable_port_clock(&sim, Port::D);
        assert_eq!(sim.peek(device::rcc_gpio_en()), 1 << Port::D.clock_bit());
        enable_port_clock(&sim, Port::A);
        assert_eq!(
            sim.peek(device::rcc_gpio_en()),
            1 << Port::D.clock_bit() | 1 << Port::A.clock_bit()
        );
    }

    #[test]
    fn disable_keeps_other_ports_running() {
        let sim = SimRegisters::new::<FieldLayout>();
        enable_port_clock(&sim, Port::A);
        enable_port_clock(&sim, Port::B);
        disable_port_clock(&sim, Port::A);
        assert_eq!(sim.peek(device::rcc_gpio_en()), 1 << Port::B.clock_bit());
    }
}
