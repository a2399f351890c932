//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution. It performs:
//! 1. **Operation Classification:** ALU operations and branch conditions.
//! 2. **Unit Selection:** The functional unit an instruction is dispatched to.
//! 3. **Execution Flags:** Operand usage and operand-source selection.
//! 4. **Memory Control:** Access widths for the load/store unit.

/// ALU operation selected by decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AluOp {
    /// No operation; the ALU produces zero (FENCE).
    #[default]
    None,

    /// Integer addition.
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,
}

/// Branch condition selected by decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BrOp {
    /// Not a control-flow instruction.
    #[default]
    None,

    /// Branch if equal.
    Beq,

    /// Branch if not equal.
    Bne,

    /// Branch if less than (signed).
    Blt,

    /// Branch if greater or equal (signed).
    Bge,

    /// Branch if less than (unsigned).
    Bltu,

    /// Branch if greater or equal (unsigned).
    Bgeu,

    /// Unconditional PC-relative jump.
    Jal,

    /// Unconditional register-indirect jump.
    Jalr,
}

impl BrOp {
    /// Returns true for any control-flow operation.
    #[inline]
    pub const fn is_branch(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Functional unit an instruction executes on.
///
/// The declaration order doubles as the fixed CDB priority order
/// (see [`crate::config::CdbArbitration::FixedPriority`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FuType {
    /// Integer arithmetic/logic unit.
    #[default]
    Alu,

    /// Branch unit.
    Bru,

    /// Load/store unit.
    Lsu,

    /// System unit (CSR access).
    Sfu,
}

impl FuType {
    /// Number of functional unit types.
    pub const COUNT: usize = 4;

    /// All unit types in priority order.
    pub const ALL: [Self; Self::COUNT] = [Self::Alu, Self::Bru, Self::Lsu, Self::Sfu];

    /// Position of this unit in [`Self::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short upper-case name used in traces.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Alu => "ALU",
            Self::Bru => "BRU",
            Self::Lsu => "LSU",
            Self::Sfu => "SFU",
        }
    }

    /// Whether entries for this unit must dispatch in program order.
    #[inline]
    pub const fn is_ordered(self) -> bool {
        matches!(self, Self::Lsu | Self::Sfu)
    }
}

/// Execution flags derived by decode.
///
/// A fixed set of independent booleans. Once decode returns, they never change.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ExeFlags {
    /// Instruction writes `rd` (always false when `rd` is `x0`).
    pub use_rd: bool,
    /// Instruction reads `rs1`.
    pub use_rs1: bool,
    /// Instruction reads `rs2`.
    pub use_rs2: bool,
    /// Instruction carries an immediate.
    pub use_imm: bool,
    /// ALU operand A is the PC.
    pub alu_s1_pc: bool,
    /// ALU operand B is the immediate.
    pub alu_s2_imm: bool,
    /// ALU operand A is the `rs1` field itself (immediate CSR forms).
    pub alu_s1_rs1: bool,
    /// ALU operand A is inverted (CSR clear).
    pub alu_s1_inv: bool,
    /// ALU operand B is the current CSR value.
    pub alu_s2_csr: bool,
    /// Instruction is a load.
    pub is_load: bool,
    /// Instruction is a store.
    pub is_store: bool,
    /// Instruction accesses a CSR.
    pub is_csr: bool,
    /// Committing this instruction halts the machine.
    pub is_exit: bool,
}

/// Memory access width for load and store operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemWidth {
    /// 8-bit byte access.
    Byte,

    /// 16-bit half-word access.
    Half,

    /// 32-bit word access.
    Word,
}

impl MemWidth {
    /// Access size in bytes.
    #[inline]
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }
}
