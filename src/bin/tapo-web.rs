use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = tapoctl::cli::web::WebCli::parse();
    let exit_code = tapoctl::run_web(cli).await;
    std::process::exit(exit_code);
}
