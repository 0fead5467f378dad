// Path: crates/fuzzer/src/numeric.rs
//! Random, boundary and overflowing numbers.

use cryptonym_types::field::{FieldValue, IntType};
use rand::Rng;

/// A generated number together with the wire type it should be encoded as.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomNumber {
    /// The wire type, e.g. `int32` or `float64`.
    pub abi_type: String,
    /// The value.
    pub value: FieldValue,
}

impl RandomNumber {
    fn new(abi_type: impl Into<String>, value: FieldValue) -> Self {
        Self {
            abi_type: abi_type.into(),
            value,
        }
    }
}

/// A random integer of `bits` width and the given signedness, in `1..MAX` of
/// that type, tagged `int{bits}` or `uint{bits}`.
///
/// Unsupported widths fall back to a small negative `int32`.
pub fn random_integer(bits: u32, signed: bool) -> RandomNumber {
    let mut rng = rand::thread_rng();
    let max_signed = match bits {
        8 => i64::from(i8::MAX),
        16 => i64::from(i16::MAX),
        32 => i64::from(i32::MAX),
        64 => i64::MAX,
        _ => {
            crate::warn(format!("no random value for a {bits}-bit integer"));
            return RandomNumber::new(
                "int32",
                FieldValue::Int(-rng.gen_range(1..i64::from(i16::MAX))),
            );
        }
    };
    if signed {
        return RandomNumber::new(format!("int{bits}"), FieldValue::Int(rng.gen_range(1..max_signed)));
    }
    let max_unsigned = match bits {
        8 => u64::from(u8::MAX),
        16 => u64::from(u16::MAX),
        32 => u64::from(u32::MAX),
        _ => u64::MAX,
    };
    RandomNumber::new(format!("uint{bits}"), FieldValue::Uint(rng.gen_range(1..max_unsigned)))
}

/// A random 128-bit signed integer as decimal text.
pub fn random_int128() -> String {
    rand::thread_rng().gen::<i128>().to_string()
}

/// The smallest value that overflows the given width and signedness.
///
/// Widths other than 8, 16 and 32 have no overflow value and yield an empty
/// string.
pub fn overflow_int(bits: u32, signed: bool) -> String {
    let v: u64 = match (bits, signed) {
        (8, true) => 1 << 7,
        (16, true) => 1 << 15,
        (32, true) => 1 << 31,
        (8, false) => 1 << 8,
        (16, false) => 1 << 16,
        (32, false) => 1 << 32,
        _ => {
            crate::warn(format!("no overflow value for a {bits}-bit integer"));
            return String::new();
        }
    };
    v.to_string()
}

/// The maximum value of `ty`, tagged with `ty`.
pub fn max_int(ty: IntType) -> RandomNumber {
    let value = match ty {
        IntType::Int8 => FieldValue::Int(i64::from(i8::MAX)),
        IntType::Int16 => FieldValue::Int(i64::from(i16::MAX)),
        IntType::Int32 => FieldValue::Int(i64::from(i32::MAX)),
        IntType::Int64 => FieldValue::Int(i64::MAX),
        IntType::Uint8 => FieldValue::Uint(u64::from(u8::MAX)),
        IntType::Uint16 => FieldValue::Uint(u64::from(u16::MAX)),
        IntType::Uint32 => FieldValue::Uint(u64::from(u32::MAX)),
        IntType::Uint64 => FieldValue::Uint(u64::MAX),
    };
    RandomNumber::new(ty.as_str(), value)
}

/// A random float of `bits` width, sometimes pushed to a large magnitude.
///
/// 64-bit floats that get pushed are always made larger than any 16-bit
/// integer. Unsupported widths yield zero.
pub fn random_float(bits: u32) -> f64 {
    let mut rng = rand::thread_rng();
    match bits {
        32 => {
            let mut f: f32 = rng.gen();
            if f < 0.4 {
                f += rng.gen::<f32>() * 1000.0;
            }
            f64::from(f)
        }
        64 => {
            let mut f: f64 = rng.gen();
            if f < 0.4 {
                f += rng.gen::<f64>() * 10000.0;
                if f < f64::from(f32::MAX) {
                    f += f64::from(i16::MAX) + f64::from(rng.gen_range(0..i16::MAX));
                }
            }
            f
        }
        _ => 0.0,
    }
}

/// A number of random kind, width and signedness.
///
/// Integers are 8 to 64 bits and tagged `int{n}` or `uint{n}`; signed values
/// are negated half the time. Floats are tagged `float32` or `float64`.
pub fn random_number() -> RandomNumber {
    const INT_WIDTHS: [u32; 4] = [8, 16, 32, 64];
    let mut rng = rand::thread_rng();

    let signed = rng.gen_bool(0.5);
    let negative = signed && rng.gen_bool(0.5);

    if rng.gen_bool(0.5) {
        let bits = INT_WIDTHS
            .get(rng.gen_range(0..INT_WIDTHS.len()))
            .copied()
            .unwrap_or(32);
        let n = random_integer(bits, signed);
        match n.value {
            FieldValue::Int(i) if negative => RandomNumber::new(n.abi_type, FieldValue::Int(-i)),
            _ => n,
        }
    } else {
        let sign = if negative { -1.0 } else { 1.0 };
        if rng.gen_bool(0.5) {
            let f = (random_float(32) * sign) as f32;
            RandomNumber::new("float32", FieldValue::Float(f64::from(f)))
        } else {
            RandomNumber::new("float64", FieldValue::Float(random_float(64) * sign))
        }
    }
}
