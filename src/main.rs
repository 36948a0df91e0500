fn main() {
    if let Err(e) = game_core::run() {
        eprintln!("TacoCat stopped: {}", e);
        std::process::exit(1);
    }
}
