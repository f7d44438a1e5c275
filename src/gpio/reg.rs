//==================================================================================================
// Register Interface
//==================================================================================================

/// Provide word-wide access to the GPIO and RCC registers
///
/// Every layout backend and the clock gate resolver talk to the hardware only
/// through this trait. On the target this is [`Mmio`], which performs volatile
/// accesses at the absolute register address. Other implementations can back
/// the same addresses with a register model, for example to exercise the
/// backends on a host.
///
/// Only [`read`] and [`write`] need to be implemented. The remaining
/// functions are read-modify-write helpers built on top of them. They are not
/// atomic: two execution contexts modifying the same register must be
/// serialized by the caller.
///
/// # Safety
///
/// Implementers are handed absolute register addresses computed from the
/// device map and must either map them to the real peripheral registers or
/// to storage they own. Reads must observe the effect of previous writes the
/// way the hardware register at that address would.
///
/// [`read`]: Self::read
/// [`write`]: Self::write
pub unsafe trait RegisterInterface {
    /// Read the 32-bit register at `addr`
    fn read(&self, addr: usize) -> u32;

    /// Write `value` to the 32-bit register at `addr`
    fn write(&self, addr: usize, value: u32);

    /// Read-modify-write the register at `addr`
    #[inline]
    fn modify<F: FnOnce(u32) -> u32>(&self, addr: usize, f: F) {
        let value = self.read(addr);
        self.write(addr, f(value));
    }

    /// Replace the `mask` bits of the register at `addr` with `bits`
    #[inline]
    fn modify_field(&self, addr: usize, mask: u32, bits: u32) {
        self.modify(addr, |r| (r & !mask) | (bits & mask));
    }

    #[inline]
    fn set_bits(&self, addr: usize, mask: u32) {
        self.modify(addr, |r| r | mask);
    }

    #[inline]
    fn clear_bits(&self, addr: usize, mask: u32) {
        self.modify(addr, |r| r & !mask);
    }
}

// A shared reference gives the same access as the interface itself
unsafe impl<T: RegisterInterface + ?Sized> RegisterInterface for &T {
    #[inline]
    fn read(&self, addr: usize) -> u32 {
        (**self).read(addr)
    }

    #[inline]
    fn write(&self, addr: usize, value: u32) {
        (**self).write(addr, value)
    }
}

/// Volatile access to the memory-mapped registers of the running device
///
/// There is no public constructor. An [`Mmio`] only exists inside a
/// [`Gpio`](super::Gpio) created with [`Gpio::new`](super::Gpio::new), which
/// only ever hands it addresses from the device map.
#[derive(Clone, Copy)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    #[inline]
    pub(crate) const fn new() -> Self {
        Mmio { _private: () }
    }
}

// The crate only passes addresses of GPIO and RCC registers of the selected
// family, which are valid for volatile word access for the lifetime of the device.
unsafe impl RegisterInterface for Mmio {
    #[inline(always)]
    fn read(&self, addr: usize) -> u32 {
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    #[inline(always)]
    fn write(&self, addr: usize, value: u32) {
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}
