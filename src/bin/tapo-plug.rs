use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = tapoctl::cli::plug::PlugCli::parse();
    let exit_code = tapoctl::run_plug(cli).await;
    std::process::exit(exit_code);
}
