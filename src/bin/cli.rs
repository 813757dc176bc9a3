use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    itwin_browser::cli::run().await
}
