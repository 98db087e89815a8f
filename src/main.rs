use ghbar::cli::Cli;
use ghbar::output::failure_line;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        log::error!("{err:#}");
        println!("{}", failure_line(&err));
        std::process::exit(1);
    }
}
