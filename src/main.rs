#[tokio::main]
async fn main() -> rollcall::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("rollcall=info,serenity=warn"),
    )
    .init();
    log::info!("Starting rollcall Discord bot");

    match rollcall::run().await {
        Ok(_) => {
            log::info!("Bot shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Bot encountered an error: {}", e);
            Err(e)
        }
    }
}
