use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = tapoctl::cli::bulb::BulbCli::parse();
    let exit_code = tapoctl::run_bulb(cli).await;
    std::process::exit(exit_code);
}
