#![no_main]
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};
use ttf_bytecode::parse;
use ttf_hint::{Vm, VmOptions};

#[derive(Debug, Arbitrary)]
struct Input {
    ppem: u16,
    max_stack_depth: Option<u16>,
    max_storage: u8,
    cvt: Vec<i32>,
    /// Run in order on one machine, like a font program followed by the
    /// control value program and a glyph program.
    programs: Vec<Vec<u8>>,
}

fuzz_target!(|input: Input| {
    let mut options = VmOptions::default().with_ppem(input.ppem).with_cvt(input.cvt);
    options.max_stack_depth = input.max_stack_depth.map(usize::from);
    options.max_storage = input.max_storage as usize;
    options.max_instructions = 100_000;
    let programs = input
        .programs
        .iter()
        .filter_map(|bytecode| parse(bytecode).ok())
        .collect::<Vec<_>>();
    let mut vm = Vm::new(options);
    for program in &programs {
        if vm.execute(program).is_err() {
            break;
        }
    }
    let _ = vm.summary();
});
