use colored::Colorize;
use osscli::cli::start;
use std::process;

// one operation per process, every storage call is awaited in order
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let executor = match start() {
        Ok(executor) => executor,
        Err(err) => {
            eprintln!("{} {err:#}", "[Error]".red());
            process::exit(1);
        }
    };

    if !executor.execute().await {
        process::exit(1);
    }
}
