// Packed Binary-Coded Decimal (BCD) display digits

/// Split a packed BCD byte into its two decimal digits (high, low)
/// Example: 0x12 -> (1, 2), 0x95 -> (9, 5)
///
/// Nibbles above 9 are returned as-is rather than rejected: the display
/// bytes are decoded arithmetically whatever the meter sends.
pub fn bcd_byte_to_digits(byte: u8) -> (u8, u8) {
    ((byte & 0xF0) >> 4, byte & 0x0F)
}

/// Combine two packed BCD bytes (most significant first) into a
/// four digit magnitude
/// Example: (0x12, 0x34) -> 1234
pub fn packed_magnitude(high: u8, low: u8) -> u32 {
    let (thousands, hundreds) = bcd_byte_to_digits(high);
    let (tens, ones) = bcd_byte_to_digits(low);

    u32::from(thousands) * 1000 + u32::from(hundreds) * 100 + u32::from(tens) * 10 + u32::from(ones)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcd_byte_to_digits() {
        assert_eq!(bcd_byte_to_digits(0x12), (1, 2));
        assert_eq!(bcd_byte_to_digits(0x95), (9, 5));
        assert_eq!(bcd_byte_to_digits(0x00), (0, 0));

        // Not valid BCD, still split
        assert_eq!(bcd_byte_to_digits(0xAB), (10, 11));
    }

    #[test]
    fn test_packed_magnitude() {
        assert_eq!(packed_magnitude(0x12, 0x34), 1234);
        assert_eq!(packed_magnitude(0x00, 0x50), 50);
        assert_eq!(packed_magnitude(0x99, 0x99), 9999);
        assert_eq!(packed_magnitude(0x00, 0x00), 0);

        // Out-of-range nibbles weigh in positionally
        assert_eq!(packed_magnitude(0x0A, 0x00), 1000);
        assert_eq!(packed_magnitude(0xFF, 0xFF), 16665);
    }
}
