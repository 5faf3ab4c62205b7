use anyhow::Result;
use clap::Parser;
use tracing::error;

use paper_scraper::cli::Cli;
use paper_scraper::config::AppConfig;
use paper_scraper::utils::logging;
use paper_scraper::App;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置（环境变量 < 命令行）
    let mut config = AppConfig::from_env();
    cli.apply_to(&mut config);

    // 初始化日志
    let _guard = logging::init(&config.log_dir, config.verbose_logging)?;

    // 初始化并运行应用
    let result = async move {
        let app = App::initialize(config, cli.start_date).await?;
        app.run().await
    }
    .await;

    if let Err(err) = result {
        error!("❌ 抓取失败: {}", err);
        return Err(err.into());
    }

    Ok(())
}
