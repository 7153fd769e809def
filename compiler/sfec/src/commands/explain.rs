//! The `explain` command: describe an error code.

use sfe_diagnostic::ErrorCode;

/// Print the phase and meaning of an error code such as `E2005`.
pub fn explain_error(code_str: &str) {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("Examples: E0001, E1002, E2005, E3001");
        std::process::exit(1);
    };
    println!("{code}: {}", code.description());
    println!();
    println!("Reported by the {}.", phase(code));
}

fn phase(code: ErrorCode) -> &'static str {
    if code.is_lexer_error() {
        "lexer"
    } else if code.is_parser_error() {
        "parser"
    } else if code.is_binding_error() {
        "binder"
    } else {
        "evaluator"
    }
}
