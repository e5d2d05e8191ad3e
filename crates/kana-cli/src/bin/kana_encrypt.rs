// kana-encrypt: Encrypt kana text with one of the cipher engines.
//
// Reads the plaintext from the positional arguments, or from stdin when
// there are none, and prints the ciphertext. Key material generated during
// encryption (one-time pad) is printed on stderr as `key: ...`.
//
// Usage:
//   kana-encrypt -e ENGINE [-k NAME=VALUE]... [OPTIONS] [TEXT...]
//
// Options:
//   -e, --engine ID         Engine id (see kana-engines)
//   -k, --key NAME=VALUE    Key parameter, repeatable
//   --key-file PATH         File of NAME=VALUE lines (default: $KANA_KEY_FILE)
//   --katakana              Print the output in katakana
//   -h, --help              Print help

use kana_cipher::Direction;

fn main() {
    kana_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if kana_cli::wants_help(&args) {
        println!("kana-encrypt: Encrypt kana text with one of the cipher engines.");
        println!();
        println!("Usage: kana-encrypt -e ENGINE [-k NAME=VALUE]... [OPTIONS] [TEXT...]");
        println!();
        println!("Reads TEXT, or stdin when no TEXT is given.");
        println!();
        println!("Options:");
        println!("  -e, --engine ID         Engine id (see kana-engines)");
        println!("  -k, --key NAME=VALUE    Key parameter, repeatable");
        println!("  --key-file PATH         File of NAME=VALUE lines (default: $KANA_KEY_FILE)");
        println!("  --katakana              Print the output in katakana");
        println!("  -h, --help              Print this help");
        println!();
        println!("Logging: KANA_LOG=debug (tracing filter syntax), written to stderr.");
        return;
    }

    let katakana = args.iter().any(|a| a == "--katakana");
    let result = kana_cli::run_cipher(Direction::Encrypt, &args)
        .unwrap_or_else(|e| kana_cli::fatal(&e));

    println!("{}", kana_cli::render_output(&result, katakana));
    if let Some(key) = &result.used_key {
        eprintln!("key: {key}");
    }
}
