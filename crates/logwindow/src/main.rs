use logwindow::runtime::{boot, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let (cli, config) = boot::boot()?;
    let failures = run::run(cli, config).await?;
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
