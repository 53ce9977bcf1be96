use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    certinfo::cli::start().await
}
