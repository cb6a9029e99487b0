//! The fixed optimisation pipeline.
//!
//! The set and the order never change at runtime; `--no-opt` skips the
//! whole pipeline rather than picking passes.

use inkwell::module::Module;
use inkwell::passes::PassBuilderOptions;
use inkwell::targets::TargetMachine;

use crate::errors::{FacError, Phase};

/// A single scalar transform in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Sparse conditional constant propagation.
    ConstantPropagation,
    InstructionCombining,
    /// `alloca`/`load`/`store` → SSA registers.
    PromoteMemoryToRegister,
    GlobalValueNumbering,
    CfgSimplification,
}

impl Pass {
    /// The pass name understood by LLVM's new pass manager.
    pub fn llvm_name(self) -> &'static str {
        match self {
            Pass::ConstantPropagation     => "sccp",
            Pass::InstructionCombining    => "instcombine",
            Pass::PromoteMemoryToRegister => "mem2reg",
            Pass::GlobalValueNumbering    => "gvn",
            Pass::CfgSimplification       => "simplifycfg",
        }
    }
}

/// Passes in the order they run.
pub const PIPELINE: [Pass; 5] = [
    Pass::ConstantPropagation,
    Pass::InstructionCombining,
    Pass::PromoteMemoryToRegister,
    Pass::GlobalValueNumbering,
    Pass::CfgSimplification,
];

/// Render [`PIPELINE`] as a pass-builder pipeline string.
pub fn pipeline() -> String {
    PIPELINE
        .iter()
        .map(|p| p.llvm_name())
        .collect::<Vec<_>>()
        .join(",")
}

/// Run the pipeline over every function in `module`.
pub fn optimize(module: &Module<'_>, machine: &TargetMachine) -> Result<(), FacError> {
    let text = pipeline();
    module
        .run_passes(&text, machine, PassBuilderOptions::create())
        .map_err(|e| {
            FacError::new(Phase::Optimize, format!("pass pipeline failed: {e}"))
                .with_hint(format!("pipeline was `{text}`"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_order_is_fixed() {
        assert_eq!(pipeline(), "sccp,instcombine,mem2reg,gvn,simplifycfg");
    }

    #[test]
    fn every_pass_appears_once() {
        for pass in PIPELINE {
            assert_eq!(PIPELINE.iter().filter(|&&p| p == pass).count(), 1, "{pass:?}");
        }
    }
}
