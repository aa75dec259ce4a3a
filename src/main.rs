use clap::{Arg, Command};
use vesselcalc::app_logic;

fn main() {
    env_logger::init();
    let matches = Command::new("Vesselcalc")
        .version("0.1.0")
        .about("Safe and Fast Pressure Vessel Rating as Code in Rust")
        .arg(
            Arg::new("run")
                .short('r')
                .long("run")
                .help("Run a rating job from a YAML configuration file")
                .required(true),
        )
        .after_help(
            "The configuration file describes the vessel geometry, the load \
             case, the material allowables, and an optional diameter sweep",
        )
        .get_matches();
    if let Some(path) = matches.get_one::<String>("run") {
        if let Err(err) = app_logic::run(path) {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
