#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Single-line and one-shot multi-line entry points.
    let _ = rvasm::assemble_line(data);
    let _ = rvasm::assemble(data);

    // Builder path: keep emitting past the first bad line.
    let mut asm = rvasm::Assembler::new();
    for line in data.lines() {
        let _ = asm.emit(line);
    }
    let _ = asm.finish();
});
