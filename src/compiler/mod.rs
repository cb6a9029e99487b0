/// LLVM-backed JIT pipeline — builds, checks, optimises and runs `fac` via Inkwell.
pub mod compiler;
pub mod factorial;
pub mod passes;
pub mod target;

pub use compiler::{result_lines, Compiler};
