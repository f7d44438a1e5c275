//! Register file model for host tests
//!
//! Plain storage for every address, except for the GPIO data registers of the
//! layout the model was created for:
//!
//! - writes to BSRR update ODR (set wins over reset) and are not stored
//! - IDR reads return ODR, as if every pin was looped back to itself
//!
//! Every write is recorded so tests can check the order of register accesses.

use super::{Layout, Port, RegisterInterface};
use std::cell::RefCell;
use std::collections::HashMap;

pub(crate) struct SimRegisters {
    idr: usize,
    odr: usize,
    bsrr: usize,
    mem: RefCell<HashMap<usize, u32>>,
    log: RefCell<Vec<(usize, u32)>>,
}

impl SimRegisters {
    pub(crate) fn new<L: Layout>() -> Self {
        SimRegisters {
            idr: L::IDR,
            odr: L::ODR,
            bsrr: L::BSRR,
            mem: RefCell::new(HashMap::new()),
            log: RefCell::new(Vec::new()),
        }
    }

    /// Split `addr` into the base of the GPIO port it belongs to and the
    /// register offset
    fn gpio_reg(addr: usize) -> Option<(usize, usize)> {
        let base = Port::containing(addr)?.base();
        Some((base, addr - base))
    }

    /// Raw stored value, bypassing the data register model
    pub(crate) fn peek(&self, addr: usize) -> u32 {
        self.mem.borrow().get(&addr).copied().unwrap_or(0)
    }

    /// Store a raw value without recording a write
    pub(crate) fn poke(&self, addr: usize, value: u32) {
        self.mem.borrow_mut().insert(addr, value);
    }

    /// All writes so far, oldest first
    pub(crate) fn writes(&self) -> Vec<(usize, u32)> {
        self.log.borrow().clone()
    }

    pub(crate) fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

unsafe impl RegisterInterface for SimRegisters {
    fn read(&self, addr: usize) -> u32 {
        match Self::gpio_reg(addr) {
            Some((base, offset)) if offset == self.idr => self.peek(base + self.odr),
            Some((_, offset)) if offset == self.bsrr => 0,
            _ => self.peek(addr),
        }
    }

    fn write(&self, addr: usize, value: u32) {
        self.log.borrow_mut().push((addr, value));
        match Self::gpio_reg(addr) {
            Some((base, offset)) if offset == self.bsrr => {
                let odr = self.peek(base + self.odr);
                let odr = (odr & !(value >> 16)) | (value & 0xffff);
                self.poke(base + self.odr, odr);
            }
            _ => self.poke(addr, value),
        }
    }
}
