//! Disassemble and run TrueType hinting programs.
//!
//! Each input is a raw instruction stream, such as the contents of an `fpgm`
//! or `prep` table or the instructions of a single glyph. Inputs are
//! executed in order on one machine so that functions defined by earlier
//! programs can be called by later ones.

use std::{fmt::Write as _, path::PathBuf, process::ExitCode};

use clap::Parser;
use ttf_bytecode::{parse, DecodeError, Instruction};
use ttf_hint::{HintError, RunSummary, Vm, VmOptions, DEFAULT_MAX_STORAGE};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Files containing raw bytecode, executed in the given order.
    #[arg(required_unless_present = "hex")]
    programs: Vec<PathBuf>,

    /// Bytecode given as hex digits instead of a file, run after any files
    #[arg(long)]
    hex: Option<String>,

    /// Print the decoded instructions
    #[arg(short, long)]
    disassemble: bool,

    /// Only decode, don't execute
    #[arg(long)]
    no_run: bool,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,

    /// Pixels per em reported by MPPEM
    #[arg(long, default_value_t = 16)]
    ppem: u16,

    /// Point size in 26.6 reported by MPS. Defaults to the ppem.
    #[arg(long)]
    point_size: Option<i32>,

    /// 16.16 scale factor applied by WCVTF
    #[arg(long, default_value_t = 1 << 16)]
    scale: i32,

    /// Number of variation axes
    #[arg(long, default_value_t = 0)]
    axis_count: u16,

    /// Size of the storage area
    #[arg(long, default_value_t = DEFAULT_MAX_STORAGE)]
    max_storage: usize,

    /// Maximum operand stack depth
    #[arg(long)]
    max_stack: Option<usize>,

    /// Maximum number of instructions dispatched per program
    #[arg(long)]
    max_instructions: Option<usize>,

    /// Initial control values in 26.6, separated by commas
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    cvt: Vec<i32>,
}

impl Args {
    fn vm_options(&self) -> VmOptions {
        let mut options = VmOptions::default()
            .with_ppem(self.ppem)
            .with_cvt(self.cvt.clone());
        options.point_size = self.point_size.unwrap_or(self.ppem as i32 * 64);
        options.scale = self.scale;
        options.axis_count = self.axis_count;
        options.max_storage = self.max_storage;
        options.max_stack_depth = self.max_stack;
        if let Some(max) = self.max_instructions {
            options.max_instructions = max;
        }
        options
    }
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid hex input: {0}")]
    Hex(String),
    #[error("{name}: {source}")]
    Decode { name: String, source: DecodeError },
    #[error("{name}: {source}")]
    Hint { name: String, source: HintError },
    #[error("failed to serialize state: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let inputs = load_inputs(args)?;
    let mut programs = Vec::with_capacity(inputs.len());
    for (name, bytecode) in &inputs {
        let program = parse(bytecode).map_err(|source| Error::Decode {
            name: name.clone(),
            source,
        })?;
        if args.disassemble {
            print!("{}", disassemble(name, &program));
        }
        programs.push((name, program));
    }
    if args.no_run {
        return Ok(());
    }
    let mut vm = Vm::new(args.vm_options());
    let mut failure = None;
    for (name, program) in &programs {
        if let Err(source) = vm.execute(program) {
            log::warn!("{name} failed: {source}");
            failure = Some(Error::Hint {
                name: name.to_string(),
                source,
            });
            break;
        }
    }
    // The state is reported even after a failure since it shows how far
    // the program got.
    let summary = vm.summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }
    failure.map_or(Ok(()), Err)
}

fn load_inputs(args: &Args) -> Result<Vec<(String, Vec<u8>)>, Error> {
    let mut inputs = Vec::new();
    for path in &args.programs {
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        inputs.push((path.display().to_string(), bytes));
    }
    if let Some(hex) = &args.hex {
        inputs.push(("<hex>".to_string(), decode_hex(hex)?));
    }
    Ok(inputs)
}

/// Decodes a string of hex digit pairs, ignoring whitespace.
fn decode_hex(text: &str) -> Result<Vec<u8>, Error> {
    let digits = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| Error::Hex(format!("'{c}' is not a hex digit")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if digits.len() % 2 != 0 {
        return Err(Error::Hex("odd number of digits".into()));
    }
    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

fn disassemble(name: &str, program: &[Instruction]) -> String {
    let mut out = format!("{name}: {} instructions\n", program.len());
    for ins in program {
        let _ = writeln!(out, "{:>6}: {ins}", ins.pc);
    }
    out
}

fn format_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "stack: {:?}", summary.stack);
    for (label, defs) in [
        ("functions", &summary.functions),
        ("instruction definitions", &summary.instruction_defs),
    ] {
        let _ = writeln!(out, "{label}: {}", defs.len());
        for def in defs {
            let state = if def.is_closed { "" } else { " (open)" };
            let _ = writeln!(out, "  {}: {} instructions{state}", def.key, def.len);
        }
    }
    let _ = writeln!(out, "storage: {:?}", summary.storage);
    let _ = writeln!(out, "cvt: {:?}", summary.cvt);
    out
}
