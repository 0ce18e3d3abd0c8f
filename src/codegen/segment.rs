use crate::lang::{ErrorKind, Segment};

/// Largest value an A-instruction literal can hold.
pub const MAX_LITERAL: u16 = 0x7fff;

/// Base address of the `temp` segment (`R5`..`R12`).
pub const TEMP_BASE: u16 = 5;

/// Base address of the `pointer` segment (`THIS`, `THAT`).
pub const POINTER_BASE: u16 = 3;

/// How the effective address of `segment[index]` is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// The index itself is the value; there is no address.
    Immediate,
    /// `RAM[base] + index`: the named register holds the segment base.
    Indirect(&'static str),
    /// `base + index`: the segment sits at a fixed address.
    Fixed(u16),
    /// The unit-qualified variable symbol `Unit.index`.
    Static,
}

pub fn addressing(segment: Segment) -> Addressing {
    match segment {
        Segment::Constant => Addressing::Immediate,
        Segment::Local => Addressing::Indirect("LCL"),
        Segment::Argument => Addressing::Indirect("ARG"),
        Segment::This => Addressing::Indirect("THIS"),
        Segment::That => Addressing::Indirect("THAT"),
        Segment::Temp => Addressing::Fixed(TEMP_BASE),
        Segment::Pointer => Addressing::Fixed(POINTER_BASE),
        Segment::Static => Addressing::Static,
    }
}

/// Highest valid index for the segment.
pub fn max_index(segment: Segment) -> u16 {
    match segment {
        Segment::Temp => 7,
        Segment::Pointer => 1,
        Segment::Constant
        | Segment::Local
        | Segment::Argument
        | Segment::This
        | Segment::That
        | Segment::Static => MAX_LITERAL,
    }
}

pub fn check_index(segment: Segment, index: u16) -> Result<(), ErrorKind> {
    let max = max_index(segment);
    if index > max {
        return Err(ErrorKind::IndexOutOfRange {
            segment,
            index,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_segments_are_indirect() {
        assert_eq!(addressing(Segment::Local), Addressing::Indirect("LCL"));
        assert_eq!(addressing(Segment::Argument), Addressing::Indirect("ARG"));
        assert_eq!(addressing(Segment::This), Addressing::Indirect("THIS"));
        assert_eq!(addressing(Segment::That), Addressing::Indirect("THAT"));
    }

    #[test]
    fn test_fixed_segments() {
        assert_eq!(addressing(Segment::Temp), Addressing::Fixed(5));
        assert_eq!(addressing(Segment::Pointer), Addressing::Fixed(3));
        assert_eq!(addressing(Segment::Constant), Addressing::Immediate);
    }

    #[test]
    fn test_index_limits() {
        assert!(check_index(Segment::Temp, 7).is_ok());
        assert!(check_index(Segment::Temp, 8).is_err());
        assert!(check_index(Segment::Pointer, 1).is_ok());
        assert!(check_index(Segment::Pointer, 2).is_err());
        assert!(check_index(Segment::Constant, 32767).is_ok());
        assert_eq!(
            check_index(Segment::Constant, 32768),
            Err(ErrorKind::IndexOutOfRange {
                segment: Segment::Constant,
                index: 32768,
                max: 32767
            })
        );
    }
}
