#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rehber_lib::run().await
}
