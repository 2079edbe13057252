use std::process;

fn main() {
    if let Err(e) = zcomp::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
