//! `check` and `dump`: run the whole pipeline.

use super::fail;
use crate::{load_file, Config, Environment, LoadOptions, ScopeId};

fn load(path: &str) -> Config {
    match load_file(path, &Environment::new(), ScopeId::ROOT, &LoadOptions::default()) {
        Ok(config) => config,
        Err(err) => fail(&err),
    }
}

/// Load a file and report whether it binds.
pub fn check_file(path: &str) {
    let config = load(path);
    println!(
        "{path}: ok ({} vars, {} objects)",
        config.vars().count(),
        config.objects().count()
    );
}

/// Load a file and print every bound variable and object.
pub fn dump_file(path: &str) {
    let config = load(path);
    let stdout = std::io::stdout();
    if let Err(err) = config.dump(&mut stdout.lock()) {
        eprintln!("error writing output: {err}");
        std::process::exit(1);
    }
}
