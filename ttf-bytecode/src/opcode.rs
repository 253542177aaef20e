//! TrueType instruction opcodes.
//!
//! See <https://learn.microsoft.com/en-us/typography/opentype/spec/tt_instructions>

macro_rules! opcodes {
    ($($name:ident = $value:literal => ($pops:literal, $pushes:literal),)*) => {
        /// Operation code for a TrueType instruction.
        ///
        /// Only the byte values assigned by the TrueType instruction set have
        /// a variant; [`Opcode::from_byte`] returns `None` for the rest.
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        #[allow(clippy::upper_case_acronyms)]
        pub enum Opcode {
            $($name = $value,)*
        }

        impl Opcode {
            /// Creates an opcode from the given byte.
            ///
            /// Returns `None` if the byte is not an assigned opcode.
            pub fn from_byte(byte: u8) -> Option<Self> {
                match byte {
                    $($value => Some(Self::$name),)*
                    _ => None,
                }
            }

            /// Returns the mnemonic for this opcode.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)*
                }
            }

            /// Returns the number of values this opcode pops from and
            /// pushes to the stack, ignoring any dependence on the loop
            /// counter or on other stack values.
            ///
            /// Derived from <https://gitlab.freedesktop.org/freetype/freetype/-/blob/57617782464411201ce7bbc93b086c1b4d7d84a5/src/truetype/ttinterp.c#L1097>
            pub fn stack_effect(self) -> (u8, u8) {
                match self {
                    $(Self::$name => ($pops, $pushes),)*
                }
            }
        }
    };
}

opcodes! {
    SVTCA0 = 0x00 => (0, 0),
    SVTCA1 = 0x01 => (0, 0),
    SPVTCA0 = 0x02 => (0, 0),
    SPVTCA1 = 0x03 => (0, 0),
    SFVTCA0 = 0x04 => (0, 0),
    SFVTCA1 = 0x05 => (0, 0),
    SPVTL0 = 0x06 => (2, 0),
    SPVTL1 = 0x07 => (2, 0),
    SFVTL0 = 0x08 => (2, 0),
    SFVTL1 = 0x09 => (2, 0),
    SPVFS = 0x0A => (2, 0),
    SFVFS = 0x0B => (2, 0),
    GPV = 0x0C => (0, 2),
    GFV = 0x0D => (0, 2),
    SFVTPV = 0x0E => (0, 0),
    ISECT = 0x0F => (5, 0),
    SRP0 = 0x10 => (1, 0),
    SRP1 = 0x11 => (1, 0),
    SRP2 = 0x12 => (1, 0),
    SZP0 = 0x13 => (1, 0),
    SZP1 = 0x14 => (1, 0),
    SZP2 = 0x15 => (1, 0),
    SZPS = 0x16 => (1, 0),
    SLOOP = 0x17 => (1, 0),
    RTG = 0x18 => (0, 0),
    RTHG = 0x19 => (0, 0),
    SMD = 0x1A => (1, 0),
    ELSE = 0x1B => (0, 0),
    JMPR = 0x1C => (1, 0),
    SCVTCI = 0x1D => (1, 0),
    SSWCI = 0x1E => (1, 0),
    SSW = 0x1F => (1, 0),
    DUP = 0x20 => (1, 2),
    POP = 0x21 => (1, 0),
    CLEAR = 0x22 => (0, 0),
    SWAP = 0x23 => (2, 2),
    DEPTH = 0x24 => (0, 1),
    CINDEX = 0x25 => (1, 1),
    MINDEX = 0x26 => (1, 0),
    ALIGNPTS = 0x27 => (2, 0),
    UTP = 0x29 => (1, 0),
    LOOPCALL = 0x2A => (2, 0),
    CALL = 0x2B => (1, 0),
    FDEF = 0x2C => (1, 0),
    ENDF = 0x2D => (0, 0),
    MDAP0 = 0x2E => (1, 0),
    MDAP1 = 0x2F => (1, 0),
    IUP0 = 0x30 => (0, 0),
    IUP1 = 0x31 => (0, 0),
    SHP0 = 0x32 => (0, 0),
    SHP1 = 0x33 => (0, 0),
    SHC0 = 0x34 => (1, 0),
    SHC1 = 0x35 => (1, 0),
    SHZ0 = 0x36 => (1, 0),
    SHZ1 = 0x37 => (1, 0),
    SHPIX = 0x38 => (1, 0),
    IP = 0x39 => (0, 0),
    MSIRP0 = 0x3A => (2, 0),
    MSIRP1 = 0x3B => (2, 0),
    ALIGNRP = 0x3C => (0, 0),
    RTDG = 0x3D => (0, 0),
    MIAP0 = 0x3E => (2, 0),
    MIAP1 = 0x3F => (2, 0),
    NPUSHB = 0x40 => (0, 0),
    NPUSHW = 0x41 => (0, 0),
    WS = 0x42 => (2, 0),
    RS = 0x43 => (1, 1),
    WCVTP = 0x44 => (2, 0),
    RCVT = 0x45 => (1, 1),
    GC0 = 0x46 => (1, 1),
    GC1 = 0x47 => (1, 1),
    SCFS = 0x48 => (2, 0),
    MD0 = 0x49 => (2, 1),
    MD1 = 0x4A => (2, 1),
    MPPEM = 0x4B => (0, 1),
    MPS = 0x4C => (0, 1),
    FLIPON = 0x4D => (0, 0),
    FLIPOFF = 0x4E => (0, 0),
    DEBUG = 0x4F => (1, 0),
    LT = 0x50 => (2, 1),
    LTEQ = 0x51 => (2, 1),
    GT = 0x52 => (2, 1),
    GTEQ = 0x53 => (2, 1),
    EQ = 0x54 => (2, 1),
    NEQ = 0x55 => (2, 1),
    ODD = 0x56 => (1, 1),
    EVEN = 0x57 => (1, 1),
    IF = 0x58 => (1, 0),
    EIF = 0x59 => (0, 0),
    AND = 0x5A => (2, 1),
    OR = 0x5B => (2, 1),
    NOT = 0x5C => (1, 1),
    DELTAP1 = 0x5D => (1, 0),
    SDB = 0x5E => (1, 0),
    SDS = 0x5F => (1, 0),
    ADD = 0x60 => (2, 1),
    SUB = 0x61 => (2, 1),
    DIV = 0x62 => (2, 1),
    MUL = 0x63 => (2, 1),
    ABS = 0x64 => (1, 1),
    NEG = 0x65 => (1, 1),
    FLOOR = 0x66 => (1, 1),
    CEILING = 0x67 => (1, 1),
    ROUND00 = 0x68 => (1, 1),
    ROUND01 = 0x69 => (1, 1),
    ROUND10 = 0x6A => (1, 1),
    ROUND11 = 0x6B => (1, 1),
    NROUND00 = 0x6C => (1, 1),
    NROUND01 = 0x6D => (1, 1),
    NROUND10 = 0x6E => (1, 1),
    NROUND11 = 0x6F => (1, 1),
    WCVTF = 0x70 => (2, 0),
    DELTAP2 = 0x71 => (1, 0),
    DELTAP3 = 0x72 => (1, 0),
    DELTAC1 = 0x73 => (1, 0),
    DELTAC2 = 0x74 => (1, 0),
    DELTAC3 = 0x75 => (1, 0),
    SROUND = 0x76 => (1, 0),
    S45ROUND = 0x77 => (1, 0),
    JROT = 0x78 => (2, 0),
    JROF = 0x79 => (2, 0),
    ROFF = 0x7A => (0, 0),
    RUTG = 0x7C => (0, 0),
    RDTG = 0x7D => (0, 0),
    SANGW = 0x7E => (1, 0),
    AA = 0x7F => (1, 0),
    FLIPPT = 0x80 => (0, 0),
    FLIPRGON = 0x81 => (2, 0),
    FLIPRGOFF = 0x82 => (2, 0),
    SCANCTRL = 0x85 => (1, 0),
    SDPVTL0 = 0x86 => (2, 0),
    SDPVTL1 = 0x87 => (2, 0),
    GETINFO = 0x88 => (1, 1),
    IDEF = 0x89 => (1, 0),
    ROLL = 0x8A => (3, 3),
    MAX = 0x8B => (2, 1),
    MIN = 0x8C => (2, 1),
    SCANTYPE = 0x8D => (1, 0),
    INSTCTRL = 0x8E => (2, 0),
    GETVARIATION = 0x91 => (0, 0),
    GETDATA = 0x92 => (0, 1),
    PUSHB000 = 0xB0 => (0, 1),
    PUSHB001 = 0xB1 => (0, 2),
    PUSHB010 = 0xB2 => (0, 3),
    PUSHB011 = 0xB3 => (0, 4),
    PUSHB100 = 0xB4 => (0, 5),
    PUSHB101 = 0xB5 => (0, 6),
    PUSHB110 = 0xB6 => (0, 7),
    PUSHB111 = 0xB7 => (0, 8),
    PUSHW000 = 0xB8 => (0, 1),
    PUSHW001 = 0xB9 => (0, 2),
    PUSHW010 = 0xBA => (0, 3),
    PUSHW011 = 0xBB => (0, 4),
    PUSHW100 = 0xBC => (0, 5),
    PUSHW101 = 0xBD => (0, 6),
    PUSHW110 = 0xBE => (0, 7),
    PUSHW111 = 0xBF => (0, 8),
    MDRP00000 = 0xC0 => (1, 0),
    MDRP00001 = 0xC1 => (1, 0),
    MDRP00010 = 0xC2 => (1, 0),
    MDRP00011 = 0xC3 => (1, 0),
    MDRP00100 = 0xC4 => (1, 0),
    MDRP00101 = 0xC5 => (1, 0),
    MDRP00110 = 0xC6 => (1, 0),
    MDRP00111 = 0xC7 => (1, 0),
    MDRP01000 = 0xC8 => (1, 0),
    MDRP01001 = 0xC9 => (1, 0),
    MDRP01010 = 0xCA => (1, 0),
    MDRP01011 = 0xCB => (1, 0),
    MDRP01100 = 0xCC => (1, 0),
    MDRP01101 = 0xCD => (1, 0),
    MDRP01110 = 0xCE => (1, 0),
    MDRP01111 = 0xCF => (1, 0),
    MDRP10000 = 0xD0 => (1, 0),
    MDRP10001 = 0xD1 => (1, 0),
    MDRP10010 = 0xD2 => (1, 0),
    MDRP10011 = 0xD3 => (1, 0),
    MDRP10100 = 0xD4 => (1, 0),
    MDRP10101 = 0xD5 => (1, 0),
    MDRP10110 = 0xD6 => (1, 0),
    MDRP10111 = 0xD7 => (1, 0),
    MDRP11000 = 0xD8 => (1, 0),
    MDRP11001 = 0xD9 => (1, 0),
    MDRP11010 = 0xDA => (1, 0),
    MDRP11011 = 0xDB => (1, 0),
    MDRP11100 = 0xDC => (1, 0),
    MDRP11101 = 0xDD => (1, 0),
    MDRP11110 = 0xDE => (1, 0),
    MDRP11111 = 0xDF => (1, 0),
    MIRP00000 = 0xE0 => (2, 0),
    MIRP00001 = 0xE1 => (2, 0),
    MIRP00010 = 0xE2 => (2, 0),
    MIRP00011 = 0xE3 => (2, 0),
    MIRP00100 = 0xE4 => (2, 0),
    MIRP00101 = 0xE5 => (2, 0),
    MIRP00110 = 0xE6 => (2, 0),
    MIRP00111 = 0xE7 => (2, 0),
    MIRP01000 = 0xE8 => (2, 0),
    MIRP01001 = 0xE9 => (2, 0),
    MIRP01010 = 0xEA => (2, 0),
    MIRP01011 = 0xEB => (2, 0),
    MIRP01100 = 0xEC => (2, 0),
    MIRP01101 = 0xED => (2, 0),
    MIRP01110 = 0xEE => (2, 0),
    MIRP01111 = 0xEF => (2, 0),
    MIRP10000 = 0xF0 => (2, 0),
    MIRP10001 = 0xF1 => (2, 0),
    MIRP10010 = 0xF2 => (2, 0),
    MIRP10011 = 0xF3 => (2, 0),
    MIRP10100 = 0xF4 => (2, 0),
    MIRP10101 = 0xF5 => (2, 0),
    MIRP10110 = 0xF6 => (2, 0),
    MIRP10111 = 0xF7 => (2, 0),
    MIRP11000 = 0xF8 => (2, 0),
    MIRP11001 = 0xF9 => (2, 0),
    MIRP11010 = 0xFA => (2, 0),
    MIRP11011 = 0xFB => (2, 0),
    MIRP11100 = 0xFC => (2, 0),
    MIRP11101 = 0xFD => (2, 0),
    MIRP11110 = 0xFE => (2, 0),
    MIRP11111 = 0xFF => (2, 0),
}

impl Opcode {
    /// Returns the encoded length of the instruction in bytes.
    ///
    /// A negative value means the next byte holds the number of inline
    /// operands and the absolute value is the size of each operand.
    pub fn len(self) -> i32 {
        use Opcode::*;
        match self {
            NPUSHB => -1,
            NPUSHW => -2,
            PUSHB000 | PUSHB001 | PUSHB010 | PUSHB011 | PUSHB100 | PUSHB101 | PUSHB110
            | PUSHB111 => (self as u8 - PUSHB000 as u8) as i32 + 2,
            PUSHW000 | PUSHW001 | PUSHW010 | PUSHW011 | PUSHW100 | PUSHW101 | PUSHW110
            | PUSHW111 => ((self as u8 - PUSHW000 as u8) as i32 + 1) * 2 + 1,
            _ => 1,
        }
    }

    /// Returns true if this is a push instruction.
    pub fn is_push(self) -> bool {
        use Opcode::*;
        matches!(self, NPUSHB | NPUSHW) || (PUSHB000..=PUSHW111).contains(&self)
    }

    /// Returns true if this is a push instruction that takes 16-bit word
    /// operands.
    pub fn is_push_words(self) -> bool {
        use Opcode::*;
        self == NPUSHW || (PUSHW000..=PUSHW111).contains(&self)
    }

    /// Returns true if this instruction consumes one point number per
    /// iteration of the loop counter.
    pub fn is_loop_consuming(self) -> bool {
        use Opcode::*;
        matches!(self, SHP0 | SHP1 | SHPIX | IP | FLIPPT | ALIGNRP)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Opcode;

    #[test]
    fn assigned_opcodes_round_trip() {
        let assigned: Vec<_> = (0..=255u8).filter_map(Opcode::from_byte).collect();
        assert_eq!(assigned.len(), 221);
        for opcode in assigned {
            assert_eq!(Opcode::from_byte(opcode as u8), Some(opcode));
        }
    }

    #[test]
    fn unassigned_opcodes() {
        let unassigned = [0x28, 0x7B, 0x83, 0x84, 0x8F, 0x90, 0x93, 0xA0, 0xAF];
        for byte in unassigned {
            assert_eq!(Opcode::from_byte(byte), None, "{byte:#x}");
        }
    }

    #[test]
    fn push_lengths() {
        assert_eq!(Opcode::PUSHB000.len(), 2);
        assert_eq!(Opcode::PUSHB111.len(), 9);
        assert_eq!(Opcode::PUSHW000.len(), 3);
        assert_eq!(Opcode::PUSHW111.len(), 17);
        assert_eq!(Opcode::NPUSHB.len(), -1);
        assert_eq!(Opcode::NPUSHW.len(), -2);
        assert_eq!(Opcode::IUP0.len(), 1);
        assert!(Opcode::PUSHW011.is_push_words());
        assert!(!Opcode::PUSHB011.is_push_words());
        assert!(!Opcode::MDRP00000.is_push());
    }

    #[test]
    fn names() {
        assert_eq!(Opcode::NPUSHB.name(), "NPUSHB");
        assert_eq!(Opcode::MIRP11111.to_string(), "MIRP11111");
        assert_eq!(Opcode::GETVARIATION.name(), "GETVARIATION");
    }
}
