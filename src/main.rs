mod archive;
mod assets;
mod cli;
mod commands;
mod env_loader;
mod error;

fn main() {
    let dotenv_file = env_loader::load_dotenv();

    if let Err(err) = cli::run(dotenv_file) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
