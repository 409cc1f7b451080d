use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tradeflow_build::{AccountMode, BuildRequest, DockerCli, run_pipeline};

#[derive(Parser)]
#[command(name = "tradeflow")]
#[command(
    about = "trading-app の設定と認証情報をステージングして Docker イメージをビルドする",
    long_about = None
)]
struct Cli {
    /// イメージ名
    #[arg(long)]
    name: String,

    /// イメージタグ
    #[arg(long)]
    tag: String,

    /// trading-app の設定ファイル [json]
    #[arg(long)]
    settings: PathBuf,

    /// Google 認証情報の service-key json ファイル
    #[arg(long = "service-key")]
    service_key: PathBuf,

    /// ブローカー API キー
    #[arg(long, env = "TRADEFLOW_BROKER_KEY")]
    key: String,

    /// ブローカー API シークレット
    #[arg(long, env = "TRADEFLOW_BROKER_SECRET")]
    secret: String,

    /// ブローカーアカウント種別 [paper|live]
    #[arg(long, default_value = "paper")]
    account: AccountMode,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ログはオーケストレーション開始前に初期化し、stderr に出力する
    // （stdout はビルド出力のストリームに使う）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let request = BuildRequest {
        image_name: cli.name,
        image_tag: cli.tag,
        settings_path: cli.settings,
        credential_path: cli.service_key,
        broker_key: cli.key,
        broker_secret: cli.secret,
        account_mode: cli.account,
    };

    let project_root = std::env::current_dir()?;

    // テストや CI ではスタブに差し替えられるようにしておく
    let builder = match std::env::var("TRADEFLOW_DOCKER") {
        Ok(program) => DockerCli::with_program(program),
        Err(_) => DockerCli::new(),
    };

    println!("{}", "trading-app イメージをビルドします".green());
    println!("  → イメージ: {}", request.image_ref().cyan());
    println!(
        "  → アカウント: {}",
        request.account_mode.to_string().cyan()
    );

    // 失敗はここで受け止めて1度だけログに記録し、プロセスは正常終了させる
    if let Err(e) = run_pipeline(&request, &project_root, &builder).await {
        tracing::error!("ビルド処理でエラーが発生しました [{}] {}", e.phase(), e);
    }

    Ok(())
}
