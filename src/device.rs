//! Peripheral access crate of the selected target family
//!
//! The register block addresses come from the PAC. Only the position of the
//! GPIO clock-enable bits inside the RCC enable register is kept here, since
//! the PACs name these bits per port and do not expose their offsets.

#[cfg(feature = "stm32f0")]
pub use stm32f0::stm32f0x1 as pac;
#[cfg(feature = "stm32f1")]
pub use stm32f1::stm32f103 as pac;
#[cfg(feature = "stm32f2")]
pub use stm32f2::stm32f217 as pac;
#[cfg(feature = "stm32f3")]
pub use stm32f3::stm32f303 as pac;
#[cfg(feature = "stm32f4")]
pub use stm32f4::stm32f407 as pac;
#[cfg(feature = "stm32f7")]
pub use stm32f7::stm32f7x6 as pac;
#[cfg(feature = "stm32l0")]
pub use stm32l0::stm32l0x3 as pac;
#[cfg(feature = "stm32l1")]
pub use stm32l1::stm32l151 as pac;

/// Size of one GPIO port register block
pub const GPIO_BLOCK_SIZE: usize = 0x400;

/// Bit number of the port A clock-enable bit. The other ports follow in slot
/// order, see [`Port::slot`](crate::gpio::Port::slot).
#[cfg(any(feature = "stm32f0", feature = "stm32f3"))]
pub const GPIO_EN_FIRST_BIT: u8 = 17; // IOPAEN
#[cfg(feature = "stm32f1")]
pub const GPIO_EN_FIRST_BIT: u8 = 2; // IOPAEN
#[cfg(any(
    feature = "stm32f2",
    feature = "stm32f4",
    feature = "stm32f7",
    feature = "stm32l0",
    feature = "stm32l1"
))]
pub const GPIO_EN_FIRST_BIT: u8 = 0;

/// Address of the RCC register holding the GPIO port clock-enable bits
#[inline]
pub fn rcc_gpio_en() -> usize {
    let rcc = pac::RCC::ptr();
    // Only the address is computed, the register is not accessed
    unsafe {
        #[cfg(any(feature = "stm32f0", feature = "stm32f3", feature = "stm32l1"))]
        let reg = core::ptr::addr_of!((*rcc).ahbenr);
        #[cfg(feature = "stm32f1")]
        let reg = core::ptr::addr_of!((*rcc).apb2enr);
        #[cfg(any(feature = "stm32f2", feature = "stm32f4", feature = "stm32f7"))]
        let reg = core::ptr::addr_of!((*rcc).ahb1enr);
        #[cfg(feature = "stm32l0")]
        let reg = core::ptr::addr_of!((*rcc).iopenr);
        reg as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::Port;

    #[test]
    fn port_blocks_leave_room_for_the_pin_index() {
        for slot in 0..16 {
            if let Some(port) = Port::from_slot(slot) {
                assert_eq!(port.base() & 0xf, 0, "port {}", port.letter());
            }
        }
    }

    #[test]
    fn ports_follow_slot_order() {
        assert_eq!(
            Port::B.base() - Port::A.base(),
            GPIO_BLOCK_SIZE * (Port::B.slot() - Port::A.slot()) as usize
        );
        assert_eq!(
            Port::D.base() - Port::A.base(),
            GPIO_BLOCK_SIZE * Port::D.slot() as usize
        );
    }

    #[test]
    fn clock_register_lies_in_rcc_block() {
        let rcc = pac::RCC::ptr() as usize;
        assert_eq!(rcc_gpio_en() % 4, 0);
        assert!(rcc_gpio_en() > rcc && rcc_gpio_en() < rcc + 0x100);
    }
}
