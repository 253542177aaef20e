//! Instruction dispatch.

use ttf_bytecode::{Instruction, Opcode};

use super::{super::round::RoundMode, ExecContext, OpResult};

/// An instruction that can run against an execution context.
pub trait Execute {
    fn execute(&self, ctx: &mut ExecContext<'_, '_>) -> OpResult;
}

impl Execute for Instruction<'_> {
    fn execute(&self, ctx: &mut ExecContext<'_, '_>) -> OpResult {
        use Opcode::*;
        let opcode = self.opcode;
        match opcode {
            SLOOP => ctx.op_sloop(),
            RTG => ctx.op_round_mode(RoundMode::Grid),
            RTHG => ctx.op_round_mode(RoundMode::HalfGrid),
            JMPR => ctx.op_jmpr(),
            DUP => ctx.op_dup(),
            POP => ctx.op_pop(),
            CLEAR => ctx.op_clear(),
            SWAP => ctx.op_swap(),
            DEPTH => ctx.op_depth(),
            CINDEX => ctx.op_cindex(),
            MINDEX => ctx.op_mindex(),
            RTDG => ctx.op_round_mode(RoundMode::DoubleGrid),
            NPUSHB | NPUSHW => ctx.op_push(&self.inline_operands),
            WS => ctx.op_ws(),
            RS => ctx.op_rs(),
            WCVTP => ctx.op_wcvtp(),
            RCVT => ctx.op_rcvt(),
            MPPEM => ctx.op_mppem(),
            MPS => ctx.op_mps(),
            DEBUG => ctx.op_debug(),
            LT => ctx.op_lt(),
            LTEQ => ctx.op_lteq(),
            GT => ctx.op_gt(),
            GTEQ => ctx.op_gteq(),
            EQ => ctx.op_eq(),
            NEQ => ctx.op_neq(),
            ODD => ctx.op_odd(),
            EVEN => ctx.op_even(),
            AND => ctx.op_and(),
            OR => ctx.op_or(),
            NOT => ctx.op_not(),
            ADD => ctx.op_add(),
            SUB => ctx.op_sub(),
            DIV => ctx.op_div(),
            MUL => ctx.op_mul(),
            ABS => ctx.op_abs(),
            NEG => ctx.op_neg(),
            FLOOR => ctx.op_floor(),
            CEILING => ctx.op_ceiling(),
            ROUND00 | ROUND01 | ROUND10 | ROUND11 => ctx.op_round(),
            NROUND00 | NROUND01 | NROUND10 | NROUND11 => ctx.op_nround(),
            WCVTF => ctx.op_wcvtf(),
            SROUND => ctx.op_sround(),
            S45ROUND => ctx.op_s45round(),
            JROT => ctx.op_jrot(),
            JROF => ctx.op_jrof(),
            ROFF => ctx.op_round_mode(RoundMode::Off),
            RUTG => ctx.op_round_mode(RoundMode::UpToGrid),
            RDTG => ctx.op_round_mode(RoundMode::DownToGrid),
            GETINFO => ctx.op_getinfo(),
            ROLL => ctx.op_roll(),
            MAX => ctx.op_max(),
            MIN => ctx.op_min(),
            GETVARIATION => ctx.op_getvariation(),
            GETDATA => ctx.op_getdata(),
            _ if opcode.is_push() => ctx.op_push(&self.inline_operands),
            // Geometric instructions. Branches, definitions and calls also
            // land here when executed outside of the machine, where only
            // their operands are consumed.
            _ => ctx.op_stack_effect(opcode),
        }
    }
}
