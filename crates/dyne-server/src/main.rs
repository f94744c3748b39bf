#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dyne_server::start_server().await
}
