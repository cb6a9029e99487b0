//! fac-jit driver.
//!
//! Usage:
//!   cargo run                      # JIT fac(10) and print the result
//!   cargo run -- 12                # any non-negative i32 input
//!   cargo run -- --emit-ir         # print the final LLVM IR and exit
//!   cargo run -- --no-opt          # skip the pass pipeline
//!
//! Pipeline:  native init → build IR → verify → MCJIT → passes → dump → run

mod compiler;
mod errors;
mod options;

use std::env;

use inkwell::context::Context;
use inkwell::OptimizationLevel;

use compiler::factorial::{FAC_NAME, MODULE_NAME};
use compiler::{passes, result_lines, target, Compiler};
use options::{Options, USAGE};

/// Optimisation level handed to MCJIT (and to the pass pipeline's
/// target machine).
const JIT_OPT: OptimizationLevel = OptimizationLevel::Default;

fn main() {
    // ── CLI argument handling ────────────────────────────────────
    let opts = Options::parse(env::args().skip(1)).unwrap_or_else(|e| errors::usage(e));
    if opts.help {
        println!("{USAGE}");
        return;
    }
    errors::set_quiet(opts.quiet);

    // ── Native backend ──────────────────────────────────────────
    target::initialize_native().unwrap_or_else(|e| errors::fatal(e));
    errors::info(format!("native target {}", target::host_triple()));

    // ── Build & verify ──────────────────────────────────────────
    let context = Context::create();
    let compiler = Compiler::new(&context, MODULE_NAME);
    let fac = compiler.build().unwrap_or_else(|e| errors::fatal(e));
    compiler.verify().unwrap_or_else(|e| errors::fatal(e));
    errors::info(format!("built and verified @{FAC_NAME} in '{MODULE_NAME}'"));

    // ── JIT ─────────────────────────────────────────────────────
    let engine = compiler.create_jit(JIT_OPT).unwrap_or_else(|e| errors::fatal(e));
    errors::info("created MCJIT execution engine");

    // ── Optimise ────────────────────────────────────────────────
    if opts.no_opt {
        errors::info("pass pipeline skipped (--no-opt)");
    } else {
        let machine = target::host_machine(JIT_OPT).unwrap_or_else(|e| errors::fatal(e));
        compiler.optimize(&machine).unwrap_or_else(|e| errors::fatal(e));
        errors::info(format!("ran passes: {}", passes::pipeline()));
    }

    if opts.emit_ir {
        print!("{}", compiler.ir_string());
        return;
    }

    // ── Dump & run ──────────────────────────────────────────────
    compiler.dump_ir();

    let n = opts.input;
    let result = compiler.run(&engine, fac, n);
    eprint!("{}", result_lines(n, result));

    errors::success("done");
}
