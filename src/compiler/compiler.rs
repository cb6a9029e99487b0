//! LLVM-backed JIT pipeline for the factorial demo.
//!
//! This is the top-level coordinator. The pieces live in:
//!
//! - [`target`](super::target) — native backend registration, host `TargetMachine`
//! - [`factorial`]  — IR construction for `fac`
//! - [`passes`]     — the fixed optimisation pipeline

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::execution_engine::ExecutionEngine;
use inkwell::module::Module;
use inkwell::targets::TargetMachine;
use inkwell::values::FunctionValue;
use inkwell::OptimizationLevel;

use crate::errors::{FacError, Phase};

use super::{factorial, passes};

// ═══════════════════════════════════════════════════════════════════
// Compiler
// ═══════════════════════════════════════════════════════════════════

/// Holds LLVM state for the single module this program builds.
pub struct Compiler<'ctx> {
    pub(crate) context: &'ctx Context,
    pub(crate) module: Module<'ctx>,
    pub(crate) builder: Builder<'ctx>,
}

impl<'ctx> Compiler<'ctx> {
    /// Create a new compiler with an empty module named `module_name`.
    pub fn new(context: &'ctx Context, module_name: &str) -> Self {
        let module = context.create_module(module_name);
        let builder = context.create_builder();
        Self { context, module, builder }
    }

    // ── construction & checking ─────────────────────────────────

    /// Emit `fac` into the module.
    pub fn build(&self) -> Result<FunctionValue<'ctx>, FacError> {
        factorial::build_factorial(self.context, &self.module, &self.builder)
    }

    /// Structural verification of the whole module.
    pub fn verify(&self) -> Result<(), FacError> {
        self.module.verify().map_err(|e| {
            FacError::new(Phase::Verify, e.to_string().trim_end().to_string())
        })
    }

    // ── JIT ─────────────────────────────────────────────────────

    /// Hand the module to MCJIT. Code is generated lazily, so passes run
    /// afterwards still shape what gets compiled.
    pub fn create_jit(&self, opt: OptimizationLevel) -> Result<ExecutionEngine<'ctx>, FacError> {
        self.module
            .create_jit_execution_engine(opt)
            .map_err(|e| FacError::new(Phase::Jit, e.to_string()))
    }

    /// Run the fixed pass pipeline over the module.
    pub fn optimize(&self, machine: &TargetMachine) -> Result<(), FacError> {
        passes::optimize(&self.module, machine)
    }

    /// Call the JIT-compiled `fac` with `n` and zero-extend the `i32`
    /// result.
    pub fn run(
        &self,
        engine: &ExecutionEngine<'ctx>,
        fac: FunctionValue<'ctx>,
        n: i32,
    ) -> i64 {
        let arg = self.context.i32_type().create_generic_value(n as u64, true);
        // SAFETY: `fac` is `i32 (i32)` and lives in the engine's module;
        // the single argument is an `i32` generic value.
        let result = unsafe { engine.run_function(fac, &[&arg]) };
        result.as_int(false) as i64
    }

    // ── output helpers ──────────────────────────────────────────

    /// Dump the LLVM IR to stderr.
    pub fn dump_ir(&self) {
        self.module.print_to_stderr();
    }

    /// Return the LLVM IR as a string.
    pub fn ir_string(&self) -> String {
        self.module.print_to_string().to_string()
    }
}

/// The two lines printed after the IR dump, blank separator included.
pub fn result_lines(n: i32, result: i64) -> String {
    format!("\n; Running {}({n}) with JIT...\n; Result: {result}\n", factorial::FAC_NAME)
}
