use super::DoubleEncoding;
use byteorder::{ByteOrder, LittleEndian};

const F32_EXP_BIAS: i32 = 127;
const F64_EXP_BIAS: i32 = 1023;
const F32_MANTISSA_BITS: u32 = 23;
const F64_MANTISSA_BITS: u32 = 52;
const F32_MANTISSA_MASK: u32 = (1 << F32_MANTISSA_BITS) - 1;
const F64_EXP_MASK: u64 = 0x7FF;

/// Stores an `f32` in a double slot by rebiasing its exponent and left-aligning its mantissa.
///
/// This is lossy in both directions:
/// - encoding never produces a real binary64 zero, infinity or NaN, because the 8-bit exponent
///   is rebiased as-is (zero ends up as `2^-127`, which decodes back to zero);
/// - decoding truncates the mantissa to 23 bits, and yields NaN if the exponent does not fit
///   the 8-bit range.
#[derive(Copy, Clone, Debug)]
pub struct PackedFloat;

impl DoubleEncoding for PackedFloat {
    type Float = f32;

    fn encode(val: f32) -> [u8; 8] {
        let bits = val.to_bits();
        let sign = u64::from(bits >> 31);
        let exp = ((bits >> F32_MANTISSA_BITS) & 0xFF) as i32 - F32_EXP_BIAS + F64_EXP_BIAS;
        let mantissa = u64::from(bits & F32_MANTISSA_MASK);

        let packed = (sign << 63)
            | ((exp as u64 & F64_EXP_MASK) << F64_MANTISSA_BITS)
            | (mantissa << (F64_MANTISSA_BITS - F32_MANTISSA_BITS));

        let mut buf = [0u8; 8];
        LittleEndian::write_u64(&mut buf, packed);
        buf
    }

    fn decode(bytes: [u8; 8]) -> f32 {
        let packed = LittleEndian::read_u64(&bytes);
        let exp = ((packed >> F64_MANTISSA_BITS) & F64_EXP_MASK) as i32 - F64_EXP_BIAS + F32_EXP_BIAS;
        if !(0..=255).contains(&exp) {
            return f32::NAN;
        }
        let sign = (packed >> 63) as u32;
        let mantissa =
            (packed >> (F64_MANTISSA_BITS - F32_MANTISSA_BITS)) as u32 & F32_MANTISSA_MASK;

        f32::from_bits((sign << 31) | ((exp as u32) << F32_MANTISSA_BITS) | mantissa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::NativeDouble;

    #[test]
    fn normal_values_match_binary64() {
        for &val in &[1.5f32, -0.25, 0.5, 1234.5, -3.0e10] {
            assert_eq!(PackedFloat::encode(val), NativeDouble::encode(f64::from(val)));
        }
    }

    #[test]
    fn decode_truncates_mantissa() {
        let bytes = NativeDouble::encode(0.2342);
        let decoded = PackedFloat::decode(bytes);
        assert!((f64::from(decoded) - 0.2342).abs() < 1e-6);
        assert!(f64::from(decoded) <= 0.2342);
    }

    #[test]
    fn zero_survives_packing() {
        let bytes = PackedFloat::encode(0.0);
        assert_ne!(bytes, [0u8; 8]);
        assert_eq!(PackedFloat::decode(bytes), 0.0);
    }

    #[test]
    fn exponent_overflow_is_nan() {
        assert!(PackedFloat::decode(NativeDouble::encode(1e300)).is_nan());
        assert!(PackedFloat::decode(NativeDouble::encode(1e-300)).is_nan());
        // A real binary64 zero has a zero exponent, which is out of range after rebiasing.
        assert!(PackedFloat::decode([0u8; 8]).is_nan());
    }
}
