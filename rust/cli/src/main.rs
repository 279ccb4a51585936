use std::io;

fn main() {
    tilt_cli::logging::init_logging();
    let code = tilt_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
