mod cli;

#[tokio::main]
async fn main() {
    if let Err(err) = cli::run().await {
        eprintln!("paystub-underwriter error: {err}");
        std::process::exit(1);
    }
}
