//! SFE config CLI.

use sfec::commands::{check_file, dump_file, explain_error, lex_file, parse_file};

fn main() {
    sfec::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let file_arg = |usage: &str| -> String {
        if args.len() < 3 {
            eprintln!("Usage: sfec {usage}");
            std::process::exit(1);
        }
        args[2].clone()
    };

    match command.as_str() {
        "lex" => lex_file(&file_arg("lex <file.sfe>")),
        "parse" => parse_file(&file_arg("parse <file.sfe>")),
        "check" => check_file(&file_arg("check <file.sfe>")),
        "dump" => dump_file(&file_arg("dump <file.sfe>")),
        "--explain" | "explain" => explain_error(&file_arg("explain <ERROR_CODE>")),
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("sfec {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("SFE config tool");
    println!();
    println!("Usage: sfec <command> [args]");
    println!();
    println!("Commands:");
    println!("  lex <file.sfe>       Tokenize and display tokens");
    println!("  parse <file.sfe>     Parse (with includes) and display declarations");
    println!("  check <file.sfe>     Parse and bind, report errors only");
    println!("  dump <file.sfe>      Parse, bind and print every var and object");
    println!("  explain <code>       Explain an error code (e.g., E2005)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=sfe_parse=debug sfec check main.sfe");
}
