//! Rolling 16-bit checksum used throughout the PUZ format.
//!
//! Every checksum in a PUZ file (header, file, ICHEATED, extension sections and
//! the scrambled-solution checksum) is built from this one primitive. A
//! non-zero seed continues a previous computation, so
//! `checksum(b, checksum(a, 0)) == checksum(a ++ b, 0)`.

/// Compute the checksum of `data`, continuing from `seed`.
#[must_use]
pub fn checksum(data: &[u8], seed: u16) -> u16 {
    data.iter()
        .fold(seed, |sum, &byte| sum.rotate_right(1).wrapping_add(u16::from(byte)))
}

/// Compute the checksum of `data` from a zero seed.
#[must_use]
pub fn checksum_of(data: &[u8]) -> u16 {
    checksum(data, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_returns_seed() {
        assert_eq!(checksum(&[], 0x0000), 0x0000);
        assert_eq!(checksum(&[], 0x1111), 0x1111);
        assert_eq!(checksum(&[], 0xffff), 0xffff);
    }

    #[test]
    fn rotation_wraps_low_bit() {
        // 0x0001 rotates to 0x8000 before the add
        assert_eq!(checksum(&[0x00], 0x0001), 0x8000);
        assert_eq!(checksum(&[0x01], 0x0001), 0x8001);
    }

    #[test]
    fn addition_wraps_at_16_bits() {
        // 0xfffe rotates to 0x7fff, and 0x7fff + 0xff does not overflow
        assert_eq!(checksum(&[0xff], 0xfffe), 0x80fe);
        // 0xffff rotates to itself and overflows on add
        assert_eq!(checksum(&[0x02], 0xffff), 0x0001);
    }

    #[test]
    fn known_header_vectors() {
        let vectors: [(&[u8], u16); 4] = [
            (&[0x0f, 0x0f, 0x4e, 0x00, 0x01, 0x00, 0x00, 0x00], 0xea02),
            (&[0x15, 0x15, 0x8c, 0x00, 0x01, 0x00, 0x00, 0x00], 0xfe04),
            (&[0x11, 0x11, 0x52, 0x00, 0x01, 0x04, 0x04, 0x00], 0x1606),
            (&[0x0f, 0x0f, 0x46, 0x00, 0x01, 0x00, 0x04, 0x00], 0xaa04),
        ];
        for (data, expected) in vectors {
            assert_eq!(checksum_of(data), expected, "checksum of {data:02x?}");
        }
    }

    #[test]
    fn chained_equals_concatenated() {
        let a = [0x0f, 0x0f, 0x4e, 0x00, 0x01, 0x00, 0x00, 0x00];
        let b = [0x15, 0x15, 0x8c, 0x00, 0x01, 0x00, 0x00, 0x00];
        let concatenated: Vec<u8> = a.iter().chain(b.iter()).copied().collect();
        assert_eq!(checksum(&b, checksum_of(&a)), checksum_of(&concatenated));
    }
}
