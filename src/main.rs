#[tokio::main]
async fn main() {
    if let Err(e) = oncegate::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
