//! Headless entry point (native): replays a recorded gesture script and
//! prints the resulting drawing as JSON.
//!
//! Usage: `drawpad <script.json> [config.json]`, or `drawpad --shortcuts`.

#[cfg(feature = "native")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use drawpad_app::{Script, ShortcutRegistry, load_config};
    use std::path::PathBuf;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(first) = args.next() else {
        eprintln!("usage: drawpad <script.json> [config.json] | --shortcuts");
        std::process::exit(2);
    };
    if first == "--shortcuts" {
        ShortcutRegistry::print_all();
        return Ok(());
    }

    let script_path = PathBuf::from(first);
    let config = args.next().map(PathBuf::from).map(|p| load_config(&p)).transpose()?;

    log::info!("Replaying {}", script_path.display());
    let script = Script::load(&script_path)?;
    let editor = script.replay(config)?;
    println!("{}", editor.serialized_scene()?);
    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
