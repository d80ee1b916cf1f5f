use std::env;
use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use env_logger::Target;
use log::info;

use clappy_tui::app::{self, Options};
use clappy_tui::audio::Audio;
use clappy_tui::config::{GameConfig, Variant};
use clappy_tui::sprite::Sprite;

const USAGE: &str = "\
clappy-tui: flappy bird in the terminal

USAGE:
    clappy-tui [OPTIONS]

OPTIONS:
    --classic        Play the classic variant without the menu
    --sideways       Play the sideways variant without the menu
    --sprite <PATH>  Load a pixmap sprite instead of the built-in bird
    --seed <N>       Seed the obstacle generator for reproducible runs
    --mute           Disable sound
    -h, --help       Show this help
    -V, --version    Show the version

KEYS:
    any key / click  flap
    up / down / tab  choose a variant in the menu
    enter / space    confirm
    q / esc          quit

Set RUST_LOG to write diagnostics to clappy-tui.log.
";

fn main() -> ExitCode {
    let mut variant = None;
    let mut sprite_path = None;
    let mut seed = None;
    let mut mute = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--classic" => variant = Some(Variant::Classic),
            "--sideways" => variant = Some(Variant::Sideways),
            "--sprite" => match args.next() {
                Some(path) => sprite_path = Some(path),
                None => return usage_error("--sprite needs a file path"),
            },
            "--seed" => match args.next().map(|value| value.parse::<u64>()) {
                Some(Ok(value)) => seed = Some(value),
                _ => return usage_error("--seed needs an unsigned integer"),
            },
            "--mute" => mute = true,
            "-h" | "--help" => {
                print!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            "-V" | "--version" => {
                println!("clappy-tui {}", env!("CARGO_PKG_VERSION"));
                return ExitCode::SUCCESS;
            }
            other => return usage_error(&format!("unknown option {other:?}")),
        }
    }

    init_logging();
    info!("clappy-tui {} starting", env!("CARGO_PKG_VERSION"));

    for preset in [Variant::Classic, Variant::Sideways] {
        if let Err(err) = GameConfig::for_variant(preset).validate() {
            eprintln!("clappy-tui: bad {} preset: {err}", preset.label());
            return ExitCode::FAILURE;
        }
    }

    let sprite = match &sprite_path {
        Some(path) => match Sprite::load(Path::new(path)) {
            Ok(sprite) => sprite,
            Err(err) => {
                eprintln!("clappy-tui: cannot load sprite {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Sprite::builtin(),
    };

    let opts = Options {
        variant,
        sprite,
        // Opened before the terminal goes raw so driver chatter stays
        // off the game screen.
        audio: Audio::open(mute),
        seed: seed.unwrap_or_else(time_seed),
    };

    match app::run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("clappy-tui: {err}");
            ExitCode::FAILURE
        }
    }
}

fn usage_error(msg: &str) -> ExitCode {
    eprintln!("clappy-tui: {msg}");
    eprintln!("try: clappy-tui --help");
    ExitCode::from(2)
}

/// Route log output to a file, and only when the user asked for it.
/// Anything written to stderr during play would tear the game screen.
fn init_logging() {
    if env::var_os("RUST_LOG").is_none() {
        return;
    }
    match File::create("clappy-tui.log") {
        Ok(file) => {
            env_logger::Builder::from_default_env()
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        Err(err) => eprintln!("clappy-tui: cannot open log file: {err}"),
    }
}

fn time_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => u64::from(elapsed.subsec_nanos()) ^ elapsed.as_secs(),
        Err(_) => 0xC1A9,
    }
}
