//! Main application entry point.

use ideaboard_app::{AppConfig, AppResult, Session, ShortcutRegistry};
use std::path::PathBuf;

const USAGE: &str = "Usage: ideaboard <session.json> [config.json]";

fn run(script: PathBuf, config: Option<PathBuf>) -> AppResult<()> {
    let config = AppConfig::load(config.as_deref())?;
    let steps = Session::parse_script(&std::fs::read_to_string(&script)?)?;
    log::info!("Replaying {} step(s) from {:?}", steps.len(), script);

    let mut session = Session::new(&config);
    let snapshot = session.run(&steps)?;
    println!("{}", snapshot.to_json()?);
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let Some(script) = args.next() else {
        eprintln!("{}\n\n{}", USAGE, ShortcutRegistry::help());
        std::process::exit(2);
    };
    if script == "--help" || script == "-h" {
        println!("{}\n\n{}", USAGE, ShortcutRegistry::help());
        return;
    }

    if let Err(e) = run(PathBuf::from(script), args.next().map(PathBuf::from)) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
