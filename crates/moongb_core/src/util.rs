//! Small arithmetic and bit helpers shared by the CPU and the loaders.
//!
//! All helpers are pure: they take operands by value and never touch
//! machine state.

/// Combine a high and low byte into a 16-bit word.
#[inline]
pub fn u8s_to_u16(msb: u8, lsb: u8) -> u16 {
    u16::from_be_bytes([msb, lsb])
}

/// Split a 16-bit word into `(msb, lsb)`.
#[inline]
pub fn u16_to_u8s(value: u16) -> (u8, u8) {
    let [msb, lsb] = value.to_be_bytes();
    (msb, lsb)
}

#[inline]
pub fn u8_to_i8(value: u8) -> i8 {
    value as i8
}

#[inline]
pub fn i8_to_u8(value: i8) -> u8 {
    value as u8
}

#[inline]
pub fn u16_to_i16(value: u16) -> i16 {
    value as i16
}

#[inline]
pub fn i16_to_u16(value: i16) -> u16 {
    value as u16
}

/// True when `a + b` overflows eight bits.
#[inline]
pub fn overflow_add8(a: u8, b: u8) -> bool {
    a.checked_add(b).is_none()
}

/// True when `a + b` overflows sixteen bits.
#[inline]
pub fn overflow_add16(a: u16, b: u16) -> bool {
    a.checked_add(b).is_none()
}

/// Carry out of bit 3 when adding the low nibbles of `a` and `b`.
#[inline]
pub fn half_carry_add(a: u8, b: u8) -> bool {
    (a & 0x0F) + (b & 0x0F) > 0x0F
}

/// Borrow into bit 3 when computing `a - b`.
#[inline]
pub fn half_borrow_sub(a: u8, b: u8) -> bool {
    (a & 0x0F) < (b & 0x0F)
}

/// True when `a - b` borrows past bit 7.
#[inline]
pub fn underflow_sub8(a: u8, b: u8) -> bool {
    a < b
}

/// True when `a - b` borrows past bit 15.
#[inline]
pub fn underflow_sub16(a: u16, b: u16) -> bool {
    a < b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_pairs_are_big_endian() {
        assert_eq!(u8s_to_u16(0x12, 0x34), 0x1234);
        assert_eq!(u16_to_u8s(0xBEEF), (0xBE, 0xEF));
    }

    #[test]
    fn signed_conversions_keep_bits() {
        assert_eq!(u8_to_i8(0xFE), -2);
        assert_eq!(i8_to_u8(-128), 0x80);
        assert_eq!(u16_to_i16(0xFFFF), -1);
        assert_eq!(i16_to_u16(-2), 0xFFFE);
    }

    #[test]
    fn carry_and_borrow_edges() {
        assert!(overflow_add8(0xFF, 0x01));
        assert!(!overflow_add8(0xFE, 0x01));
        assert!(overflow_add16(0x8000, 0x8000));
        assert!(half_carry_add(0x0F, 0x01));
        assert!(!half_carry_add(0x0E, 0x01));
        assert!(half_borrow_sub(0x10, 0x01));
        assert!(!half_borrow_sub(0x1F, 0x0F));
        assert!(underflow_sub8(0x00, 0x01));
        assert!(!underflow_sub16(0x1000, 0x1000));
    }
}
