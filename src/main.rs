use phio::cli::{Cli, run};

fn main() {
    let cli = Cli::parse_args();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}
