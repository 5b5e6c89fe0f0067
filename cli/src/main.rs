use cft_cli::cmd::GlobalArgs;
use clap::Parser;

#[tokio::main]
async fn main() {
    let app = GlobalArgs::try_parse().unwrap_or_else(|e| {
        // --help and --version are not errors
        let code = if e.use_stderr() { 1 } else { 0 };
        let _ = e.print();
        std::process::exit(code);
    });
    cft_cli::init_logger(app.verbose);

    app.exec_subcmd().await.unwrap_or_else(|e| {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    });
}
