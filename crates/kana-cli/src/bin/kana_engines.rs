// kana-engines: List the cipher engines and their key parameters.
//
// Usage:
//   kana-engines [OPTIONS] [ENGINE...]
//
// Options:
//   --ids         Print engine ids only, one per line
//   -h, --help    Print help

use std::io::{self, Write};

use kana_cipher::{EngineId, EngineInfo, ParamKind};

fn describe_kind(kind: &ParamKind) -> String {
    match kind {
        ParamKind::Number { min, max, default } => format!("number {min}..={max}, default {default}"),
        ParamKind::Text { default } if default.is_empty() => "text, default empty".to_string(),
        ParamKind::Text { default } => format!("text, default {default}"),
        ParamKind::Choice { options, default } => {
            format!("one of {}, default {default}", options.join("|"))
        }
    }
}

fn print_engine(out: &mut impl Write, info: &EngineInfo) -> io::Result<()> {
    writeln!(out, "{} ({} / {})", info.id, info.name, info.name_en)?;
    writeln!(
        out,
        "  category: {}, era: {}, difficulty: {}/3, output: {:?}",
        info.category.id(),
        info.era,
        info.difficulty,
        info.output
    )?;
    writeln!(out, "  {}", info.description)?;
    for param in info.params {
        writeln!(out, "  -k {}=...  {} ({})", param.id, param.label, describe_kind(&param.kind))?;
    }
    if info.generates_key {
        writeln!(out, "  encryption prints the generated key on stderr")?;
    }
    Ok(())
}

fn main() {
    kana_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if kana_cli::wants_help(&args) {
        println!("kana-engines: List the cipher engines and their key parameters.");
        println!();
        println!("Usage: kana-engines [OPTIONS] [ENGINE...]");
        println!();
        println!("Options:");
        println!("  --ids         Print engine ids only, one per line");
        println!("  -h, --help    Print this help");
        return;
    }

    let ids_only = args.iter().any(|a| a == "--ids");
    let selected: Vec<EngineId> = args
        .iter()
        .filter(|a| !a.starts_with('-'))
        .map(|a| {
            EngineId::from_id(a).unwrap_or_else(|| kana_cli::fatal(&format!("unknown engine: {a}")))
        })
        .collect();
    let engines = if selected.is_empty() {
        EngineId::ALL.to_vec()
    } else {
        selected
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for (i, engine) in engines.iter().enumerate() {
        let result = if ids_only {
            writeln!(out, "{}", engine.id())
        } else {
            if i > 0 {
                let _ = writeln!(out);
            }
            print_engine(&mut out, engine.info())
        };
        if let Err(e) = result {
            kana_cli::fatal(&format!("failed to write output: {e}"));
        }
    }
}
