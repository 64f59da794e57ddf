use crate::Datatype;

/// Check whether `datatype` can hold integers outside the range of an integer of `bits` width.
///
/// Non-integer datatypes always exceed the limit. Signed storage never fits an unsigned target as
/// it can hold negative values.
pub fn exceeds_integer_limit(datatype: Datatype, bits: u8, signed: bool) -> bool {
    match datatype {
        Datatype::Integer {
            bits: stored,
            signed: stored_signed,
        } => match (signed, stored_signed) {
            (true, true) => stored > bits,
            (true, false) => stored >= bits,
            (false, true) => true,
            (false, false) => stored > bits,
        },
        _ => true,
    }
}

/// Check whether `datatype` can hold values that a float of `bits` width cannot represent exactly.
///
/// Integers are accepted if their magnitude fits in the mantissa of the target.
pub fn exceeds_float_limit(datatype: Datatype, bits: u8) -> bool {
    match datatype {
        Datatype::Float { bits: stored } => stored > bits,
        Datatype::Integer {
            bits: stored,
            signed,
        } => {
            let magnitude = if signed { stored.saturating_sub(1) } else { stored };
            magnitude > mantissa_digits(bits)
        }
        _ => true,
    }
}

fn mantissa_digits(bits: u8) -> u8 {
    match bits {
        16 => 11,
        32 => 24,
        64 => 53,
        _ => 0,
    }
}
