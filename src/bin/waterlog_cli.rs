use waterlog::cli;

fn main() {
    waterlog::init();
    if let Err(err) = cli::run_cli() {
        cli::output::error(err);
        std::process::exit(1);
    }
}
