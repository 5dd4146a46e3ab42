//! Opcode Table.
//!
//! Single source of truth for the instruction set. The [`for_each_opcode!`](crate::for_each_opcode)
//! macro lists every instruction once, with its opcode word, mnemonic, execution class and
//! operand layout, and hands the list to a callback macro. This module uses it to generate:
//! - The [`Opcode`] enum with its opcode values
//! - Decoding from a memory word, mnemonics and operand layouts
//!
//! Opcode uniqueness is checked at compile time by a const assertion over the table.

/// Maximum number of operand words following an opcode.
pub const MAX_OPERANDS: usize = 2;

/// Invokes a callback macro with the complete opcode list.
#[macro_export]
macro_rules! for_each_opcode {
    ($callback:ident) => {
        $callback! {
            /// NOP ; no operation
            Nop = 0x00, "nop", System => [],
            /// HALT ; stop execution with status HALTED
            Halt = 0x01, "halt", System => [],
            /// ADD reg ; A += reg, RESULT = A
            Add = 0x02, "add", Alu => [Register],
            /// SUB reg ; A -= reg, RESULT = A
            Sub = 0x03, "sub", Alu => [Register],
            /// MUL reg ; A *= reg, RESULT = A
            Mul = 0x04, "mul", Alu => [Register],
            /// DIV reg ; A /= reg, RESULT = A (fails on zero divisor)
            Div = 0x05, "div", Alu => [Register],
            /// INC reg ; reg += 1, RESULT = reg
            Inc = 0x06, "inc", Alu => [Register],
            /// DEC reg ; reg -= 1, RESULT = reg
            Dec = 0x07, "dec", Alu => [Register],
            /// LOOP addr ; jump to addr if C != 0
            Loop = 0x08, "loop", Branch => [Address],
            /// MOVR reg, imm ; reg = imm
            Movr = 0x09, "movr", Alu => [Register, Immediate],
            /// LOAD reg, offset ; reg = stack[D + offset]
            Load = 0x0A, "load", Stack => [Register, Offset],
            /// STORE reg, offset ; stack[D + offset] = reg
            Store = 0x0B, "store", Stack => [Register, Offset],
            /// IN reg ; reg = decimal integer read from input
            In = 0x0C, "in", Io => [Register],
            /// GET reg ; reg = next input byte, or -1 and C = 0 at end of input
            Get = 0x0D, "get", Io => [Register],
            /// OUT reg ; print reg as a decimal integer
            Out = 0x0E, "out", Io => [Register],
            /// PUT reg ; print reg as a byte (0-255)
            Put = 0x0F, "put", Io => [Register],
            /// SWAP reg, reg ; exchange two registers
            Swap = 0x10, "swap", Alu => [Register, Register],
            /// PUSH reg ; push reg onto the stack
            Push = 0x11, "push", Stack => [Register],
            /// POP reg ; pop the top of the stack into reg
            Pop = 0x12, "pop", Stack => [Register],
            /// CMP reg, reg ; RESULT = reg1 - reg2
            Cmp = 0x13, "cmp", Alu => [Register, Register],
            /// JMP addr ; unconditional jump
            Jmp = 0x14, "jmp", Branch => [Address],
            /// JZ addr ; jump if RESULT == 0
            Jz = 0x15, "jz", Branch => [Address],
            /// JNZ addr ; jump if RESULT != 0
            Jnz = 0x16, "jnz", Branch => [Address],
            /// JGT addr ; jump if RESULT > 0
            Jgt = 0x17, "jgt", Branch => [Address],
            /// CALL addr, ret ; push ret, jump to addr
            Call = 0x18, "call", Branch => [Address, Address],
            /// RET ; pop return address and jump there
            Ret = 0x19, "ret", Branch => [],
        }
    };
}

/// Interpretation of an operand word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    /// Register index, valid in `0..=4`.
    Register,
    /// Literal value.
    Immediate,
    /// Absolute instruction address.
    Address,
    /// Stack slot offset added to `D`.
    Offset,
}

/// Execution class, used for statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstrClass {
    /// Register arithmetic, moves and comparisons.
    Alu,
    /// Stack accesses.
    Stack,
    /// Jumps, calls and returns.
    Branch,
    /// Console input and output.
    Io,
    /// `NOP` and `HALT`.
    System,
}

macro_rules! define_opcodes {
    (
        $( $(#[$doc:meta])* $name:ident = $value:literal, $mnemonic:literal, $class:ident => [ $( $kind:ident ),* $(,)? ] ),* $(,)?
    ) => {
        /// An instruction opcode.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(i32)]
        pub enum Opcode {
            $( $(#[$doc])* $name = $value, )*
        }

        impl Opcode {
            /// Every opcode in table order.
            pub const ALL: &'static [Self] = &[ $( Self::$name, )* ];

            /// Decodes a memory word into an opcode.
            pub const fn decode(word: i32) -> Option<Self> {
                match word {
                    $( $value => Some(Self::$name), )*
                    _ => None,
                }
            }

            /// Returns the assembly mnemonic.
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $( Self::$name => $mnemonic, )*
                }
            }

            /// Returns the execution class.
            pub const fn class(self) -> InstrClass {
                match self {
                    $( Self::$name => InstrClass::$class, )*
                }
            }

            /// Returns the layout of the operand words that follow the opcode.
            pub const fn operands(self) -> &'static [OperandKind] {
                match self {
                    $( Self::$name => &[ $( OperandKind::$kind ),* ], )*
                }
            }
        }
    };
}

for_each_opcode!(define_opcodes);

impl Opcode {
    /// Returns the opcode word.
    pub const fn word(self) -> i32 {
        self as i32
    }

    /// Number of operand words.
    pub const fn operand_count(self) -> usize {
        self.operands().len()
    }

    /// Total width in words, opcode included.
    pub const fn width(self) -> usize {
        1 + self.operand_count()
    }
}

impl TryFrom<i32> for Opcode {
    type Error = i32;

    fn try_from(word: i32) -> Result<Self, Self::Error> {
        Self::decode(word).ok_or(word)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Returns `true` if no two table entries share an opcode word and every
/// entry decodes back to itself.
pub const fn table_is_consistent() -> bool {
    let all = Opcode::ALL;
    let mut i = 0;
    while i < all.len() {
        if all[i].operand_count() > MAX_OPERANDS {
            return false;
        }
        match Opcode::decode(all[i].word()) {
            Some(op) if op as i32 == all[i] as i32 => {}
            _ => return false,
        }
        let mut j = i + 1;
        while j < all.len() {
            if all[i] as i32 == all[j] as i32 {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(table_is_consistent(), "opcode table is inconsistent");
