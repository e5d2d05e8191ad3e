// kana-cli: shared utilities for CLI tools.

use std::io::{self, Read};
use std::panic;
use std::path::{Path, PathBuf};
use std::process;

use kana_cipher::{CipherOutput, Codebook, Direction, EngineId, Encryption, KeySet};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (tracing `EnvFilter` syntax).
const LOG_ENV: &str = "KANA_LOG";

/// Environment variable naming a default key file.
const KEY_FILE_ENV: &str = "KANA_KEY_FILE";

/// Install a stderr subscriber filtered by `KANA_LOG` (default `warn`) and
/// route panic reports through it.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
    if let Err(e) = installed {
        // A global subscriber is already set (tests, or a second call).
        tracing::debug!(error = %e, "keeping existing subscriber");
    }
    install_panic_hook();
}

/// Replace the default panic report with a single error event. Engine
/// panics are also returned as errors by the codebook.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        tracing::error!(%info, "panic");
    }));
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Options shared by `kana-encrypt` and `kana-decrypt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CipherArgs {
    pub engine: Option<String>,
    /// `-k NAME=VALUE` pairs in command-line order.
    pub keys: Vec<String>,
    pub key_file: Option<String>,
    pub katakana: bool,
    /// Positional arguments, joined with spaces to form the input text.
    pub text: Vec<String>,
}

fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

/// Parse cipher tool arguments.
///
/// Accepts `-e/--engine ID`, `-k/--key NAME=VALUE` (repeatable),
/// `--key-file PATH` and `--katakana`, each value flag also in `--flag=VALUE`
/// form. `--` ends option parsing.
pub fn parse_cipher_args(args: &[String]) -> Result<CipherArgs, String> {
    let mut parsed = CipherArgs::default();
    let mut i = 0;
    let mut options_done = false;

    while i < args.len() {
        let arg = &args[i];
        if options_done {
            parsed.text.push(arg.clone());
        } else if arg == "--" {
            options_done = true;
        } else if arg == "-e" || arg == "--engine" {
            parsed.engine = Some(take_value(args, &mut i, arg)?.to_string());
        } else if let Some(val) = arg.strip_prefix("--engine=") {
            parsed.engine = Some(val.to_string());
        } else if arg == "-k" || arg == "--key" {
            parsed.keys.push(take_value(args, &mut i, arg)?.to_string());
        } else if let Some(val) = arg.strip_prefix("--key=") {
            parsed.keys.push(val.to_string());
        } else if arg == "--key-file" {
            parsed.key_file = Some(take_value(args, &mut i, arg)?.to_string());
        } else if let Some(val) = arg.strip_prefix("--key-file=") {
            parsed.key_file = Some(val.to_string());
        } else if arg == "--katakana" {
            parsed.katakana = true;
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(format!("unknown option: {arg}"));
        } else {
            parsed.text.push(arg.clone());
        }
        i += 1;
    }

    Ok(parsed)
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Key file to read: the explicit path, else `KANA_KEY_FILE`.
fn key_file_path(explicit: Option<&str>) -> Option<PathBuf> {
    explicit
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(KEY_FILE_ENV).map(PathBuf::from))
}

/// Parse key file contents: one `NAME=VALUE` per line, `#` starts a comment
/// line, blank lines are skipped.
pub fn parse_key_lines(contents: &str, keys: &mut KeySet) -> Result<(), String> {
    for (n, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        keys.insert_pair(line)
            .map_err(|e| format!("line {}: {e}", n + 1))?;
    }
    Ok(())
}

fn read_key_file(path: &Path, keys: &mut KeySet) -> Result<(), String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_key_lines(&contents, keys).map_err(|e| format!("{}: {e}", path.display()))
}

/// Build the key set: key file values first, `-k` pairs override them.
pub fn load_keys(args: &CipherArgs) -> Result<KeySet, String> {
    let mut keys = KeySet::new();
    if let Some(path) = key_file_path(args.key_file.as_deref()) {
        tracing::debug!(path = %path.display(), "reading key file");
        read_key_file(&path, &mut keys)?;
    }
    for pair in &args.keys {
        keys.insert_pair(pair).map_err(|e| e.to_string())?;
    }
    Ok(keys)
}

// ---------------------------------------------------------------------------
// Input and output
// ---------------------------------------------------------------------------

/// Input text: positional arguments if any, else all of stdin.
pub fn read_input(positional: &[String]) -> Result<String, String> {
    if !positional.is_empty() {
        return Ok(positional.join(" "));
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    Ok(input.trim_end_matches(['\n', '\r']).to_string())
}

/// Render a call result for the terminal. Glyph output becomes one
/// `grid-pos-dot` descriptor (or the passed-through character) per symbol.
pub fn render_output(result: &Encryption, katakana: bool) -> String {
    match &result.output {
        CipherOutput::Text(text) if katakana => kana_core::script::to_katakana(text),
        CipherOutput::Text(text) => text.clone(),
        CipherOutput::Glyphs(glyphs) => glyphs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Shared body of `kana-encrypt` and `kana-decrypt`.
pub fn run_cipher(direction: Direction, args: &[String]) -> Result<Encryption, String> {
    let parsed = parse_cipher_args(args)?;
    let engine = parsed
        .engine
        .as_deref()
        .ok_or_else(|| "missing -e/--engine (see kana-engines)".to_string())?;
    if direction == Direction::Decrypt && engine == EngineId::Pigpen.id() {
        return Err("pigpen glyphs cannot be decrypted from text".to_string());
    }
    let keys = load_keys(&parsed)?;
    let text = read_input(&parsed.text)?;

    let book = Codebook::new();
    let result = match direction {
        Direction::Encrypt => book.encrypt(engine, text.as_str(), &keys),
        Direction::Decrypt => book.decrypt(engine, text.as_str(), &keys),
    };
    result.map_err(|e| e.to_string())
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn logging_setup_is_repeatable() {
        init_logging();
        init_logging();
        let caught = panic::catch_unwind(|| -> u8 { panic!("engine failure") });
        assert!(caught.is_err());
    }

    #[test]
    fn parses_all_flags() {
        let parsed = parse_cipher_args(&args(&[
            "-e", "caesar", "-k", "shift=5", "--key=alphabet=seion", "--katakana", "かな", "です",
        ]))
        .unwrap();
        assert_eq!(parsed.engine.as_deref(), Some("caesar"));
        assert_eq!(parsed.keys, vec!["shift=5", "alphabet=seion"]);
        assert!(parsed.katakana);
        assert_eq!(parsed.text, vec!["かな", "です"]);
    }

    #[test]
    fn double_dash_ends_options() {
        let parsed = parse_cipher_args(&args(&["--engine=atbash", "--", "-k", "x"])).unwrap();
        assert_eq!(parsed.engine.as_deref(), Some("atbash"));
        assert!(parsed.keys.is_empty());
        assert_eq!(parsed.text, vec!["-k", "x"]);
    }

    #[test]
    fn missing_value_and_unknown_option() {
        assert!(parse_cipher_args(&args(&["-e"])).is_err());
        assert!(parse_cipher_args(&args(&["--shift", "3"])).is_err());
    }

    #[test]
    fn key_lines_skip_comments() {
        let mut keys = KeySet::new();
        parse_key_lines("# rotors\nrotor1=V\n\n  startPos=ふじさん  \n", &mut keys).unwrap();
        assert_eq!(keys.get("rotor1"), Some("V"));
        assert_eq!(keys.get("startPos"), Some("ふじさん"));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn key_lines_report_line_number() {
        let mut keys = KeySet::new();
        let err = parse_key_lines("shift=3\nnonsense\n", &mut keys).unwrap_err();
        assert!(err.starts_with("line 2"), "{err}");
    }

    #[test]
    fn command_line_keys_override_key_file() {
        let path = std::env::temp_dir().join(format!("kana-cli-keys-{}.txt", process::id()));
        std::fs::write(&path, "shift=4\nalphabet=seion\n").unwrap();
        let parsed = CipherArgs {
            key_file: Some(path.display().to_string()),
            keys: vec!["shift=9".to_string()],
            ..Default::default()
        };
        let keys = load_keys(&parsed).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(keys.get("shift"), Some("9"));
        assert_eq!(keys.get("alphabet"), Some("seion"));
    }

    #[test]
    fn renders_katakana_and_glyphs() {
        let book = Codebook::new();
        let enc = book.encrypt("caesar", "あ", &KeySet::new()).unwrap();
        assert_eq!(render_output(&enc, true), "エ");
        let glyphs = book.encrypt("pigpen", "あ!", &KeySet::new()).unwrap();
        assert_eq!(render_output(&glyphs, false), "0-0-0 !");
    }

    #[test]
    fn pigpen_text_decryption_is_refused() {
        let err = run_cipher(Direction::Decrypt, &args(&["-e", "pigpen", "0-0-0"])).unwrap_err();
        assert!(err.contains("pigpen"));
    }

    #[test]
    fn run_cipher_encrypts_positional_text() {
        let result =
            run_cipher(Direction::Encrypt, &args(&["-e", "caesar", "-k", "shift=1", "あい"])).unwrap();
        assert_eq!(render_output(&result, false), "いう");
        let err = run_cipher(Direction::Encrypt, &args(&["-e", "nope", "あ"])).unwrap_err();
        assert_eq!(err, "unknown engine: nope");
    }
}
