use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    unordinary::cli::run().await
}
