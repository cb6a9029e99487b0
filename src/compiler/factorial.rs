//! IR construction for the recursive factorial.
//!
//! ```text
//! entry:    %n == 0 ? iftrue : iffalse
//! iftrue:   br end
//! iffalse:  %r = n * fac(n - 1); br end
//! end:      phi [1, iftrue], [%r, iffalse]; ret
//! ```

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::Module;
use inkwell::values::FunctionValue;
use inkwell::IntPredicate;

use crate::errors::{FacError, Phase};

/// Name of the LLVM module holding the function.
pub const MODULE_NAME: &str = "fac_module";

/// Symbol name of the factorial function.
pub const FAC_NAME: &str = "fac";

/// LLVM's numbering for the C calling convention.
const C_CALL_CONV: u32 = 0;

/// Build `i32 fac(i32 n)` into `module` and return it.
///
/// The function is complete and terminated on return, but not verified.
pub fn build_factorial<'ctx>(
    context: &'ctx Context,
    module: &Module<'ctx>,
    builder: &Builder<'ctx>,
) -> Result<FunctionValue<'ctx>, FacError> {
    let i32_type = context.i32_type();
    let fn_type = i32_type.fn_type(&[i32_type.into()], false);

    let fac = module.add_function(FAC_NAME, fn_type, None);
    fac.set_call_conventions(C_CALL_CONV);

    let n = fac
        .get_nth_param(0)
        .ok_or_else(|| FacError::new(Phase::Build, "fac has no parameter"))?
        .into_int_value();
    n.set_name("n");

    let entry = context.append_basic_block(fac, "entry");
    let iftrue = context.append_basic_block(fac, "iftrue");
    let iffalse = context.append_basic_block(fac, "iffalse");
    let end = context.append_basic_block(fac, "end");

    let zero = i32_type.const_int(0, false);
    let one = i32_type.const_int(1, false);

    // ── entry: test the base case ───────────────────────────────
    builder.position_at_end(entry);
    let is_zero = builder.build_int_compare(IntPredicate::EQ, n, zero, "n == 0")?;
    builder.build_conditional_branch(is_zero, iftrue, iffalse)?;

    // ── iftrue: fac(0) = 1, the constant flows into the phi ─────
    builder.position_at_end(iftrue);
    builder.build_unconditional_branch(end)?;

    // ── iffalse: n * fac(n - 1) ─────────────────────────────────
    builder.position_at_end(iffalse);
    let n_minus = builder.build_int_sub(n, one, "n - 1")?;
    let call = builder.build_call(fac, &[n_minus.into()], "fac(n - 1)")?;
    call.set_call_convention(C_CALL_CONV);
    let fac_minus = call
        .try_as_basic_value()
        .left()
        .ok_or_else(|| FacError::new(Phase::Build, "recursive call produced no value"))?
        .into_int_value();
    let product = builder.build_int_mul(n, fac_minus, "n * fac(n - 1)")?;
    builder.build_unconditional_branch(end)?;

    // ── end: merge both paths ───────────────────────────────────
    builder.position_at_end(end);
    let result = builder.build_phi(i32_type, "result")?;
    result.add_incoming(&[(&one, iftrue), (&product, iffalse)]);
    builder.build_return(Some(&result.as_basic_value()))?;

    Ok(fac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwell::values::InstructionOpcode;

    #[test]
    fn builds_four_named_blocks() -> Result<(), String> {
        let context = Context::create();
        let module = context.create_module(MODULE_NAME);
        let builder = context.create_builder();
        let fac = build_factorial(&context, &module, &builder).map_err(|e| e.to_string())?;

        let names: Vec<String> = fac
            .get_basic_blocks()
            .iter()
            .map(|bb| bb.get_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["entry", "iftrue", "iffalse", "end"]);

        for bb in fac.get_basic_blocks() {
            assert!(bb.get_terminator().is_some(), "block without terminator");
        }
        assert!(fac.verify(false));
        Ok(())
    }

    #[test]
    fn phi_has_one_incoming_per_predecessor() -> Result<(), String> {
        let context = Context::create();
        let module = context.create_module(MODULE_NAME);
        let builder = context.create_builder();
        let fac = build_factorial(&context, &module, &builder).map_err(|e| e.to_string())?;

        let end = fac.get_last_basic_block().ok_or("no blocks")?;
        let phi = end.get_first_instruction().ok_or("empty end block")?;
        assert_eq!(phi.get_opcode(), InstructionOpcode::Phi);
        let phi: inkwell::values::PhiValue = phi.try_into().map_err(|_| "not a phi")?;
        assert_eq!(phi.count_incoming(), 2);

        let from: Vec<String> = (0..phi.count_incoming())
            .filter_map(|i| phi.get_incoming(i))
            .map(|(_, bb)| bb.get_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(from, ["iftrue", "iffalse"]);
        Ok(())
    }

    #[test]
    fn uses_each_operation_once() -> Result<(), String> {
        let context = Context::create();
        let module = context.create_module(MODULE_NAME);
        let builder = context.create_builder();
        let fac = build_factorial(&context, &module, &builder).map_err(|e| e.to_string())?;

        let mut opcodes = Vec::new();
        for bb in fac.get_basic_blocks() {
            let mut inst = bb.get_first_instruction();
            while let Some(i) = inst {
                opcodes.push(i.get_opcode());
                inst = i.get_next_instruction();
            }
        }
        let count = |op| opcodes.iter().filter(|&&o| o == op).count();
        assert_eq!(count(InstructionOpcode::ICmp), 1);
        assert_eq!(count(InstructionOpcode::Sub), 1);
        assert_eq!(count(InstructionOpcode::Call), 1);
        assert_eq!(count(InstructionOpcode::Mul), 1);
        assert_eq!(count(InstructionOpcode::Phi), 1);
        assert_eq!(count(InstructionOpcode::Return), 1);
        Ok(())
    }
}
