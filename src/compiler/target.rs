//! Host target setup.
//!
//! LLVM needs the native backend registered before a JIT or a
//! `TargetMachine` can be created. The order is fixed: MCJIT is linked
//! in first, then target, asm parser, asm printer and disassembler.

use inkwell::execution_engine::ExecutionEngine;
use inkwell::targets::{
    CodeModel, InitializationConfig, RelocMode, Target, TargetMachine,
};
use inkwell::OptimizationLevel;

use crate::errors::{FacError, Phase};

/// Register the native backend with LLVM. Calling it again is harmless.
pub fn initialize_native() -> Result<(), FacError> {
    ExecutionEngine::link_in_mc_jit();

    // `initialize_native` runs the target initializer first and then the
    // asm parser, asm printer and disassembler, in that order.
    let config = InitializationConfig {
        asm_parser: true,
        asm_printer: true,
        base: true,
        disassembler: true,
        info: true,
        machine_code: true,
    };
    Target::initialize_native(&config).map_err(|e| {
        FacError::new(Phase::Init, format!("failed to initialise native target: {e}"))
    })
}

/// The default target triple of the host, as text.
pub fn host_triple() -> String {
    TargetMachine::get_default_triple()
        .as_str()
        .to_string_lossy()
        .into_owned()
}

/// Create a `TargetMachine` for the host CPU. The pass pipeline needs one.
pub fn host_machine(opt: OptimizationLevel) -> Result<TargetMachine, FacError> {
    let triple = TargetMachine::get_default_triple();
    let target = Target::from_triple(&triple)
        .map_err(|e| FacError::new(Phase::Init, format!("unsupported target triple: {e}")))?;

    let cpu = TargetMachine::get_host_cpu_name();
    let features = TargetMachine::get_host_cpu_features();

    target
        .create_target_machine(
            &triple,
            &cpu.to_string_lossy(),
            &features.to_string_lossy(),
            opt,
            RelocMode::Default,
            CodeModel::JITDefault,
        )
        .ok_or_else(|| {
            FacError::new(Phase::Init, "failed to create TargetMachine")
                .with_hint(format!("host triple is {}", host_triple()))
        })
}
