use crate::error::BuildError;
use crate::request::BuildRequest;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;

/// デフォルトで呼び出す外部ビルドツール
const DEFAULT_PROGRAM: &str = "docker";

/// `docker build` に渡す引数列を組み立てる
///
/// 引数の順序は下流との互換性のため固定: key / secret / settings / account の
/// --build-arg ペア、-t name:tag、最後にコンテキストディレクトリ。
/// settings の値はリクエストに与えられたパス文字列をそのまま渡す
/// （ファイル内容は読まない）。
pub fn docker_build_args(request: &BuildRequest, context_directory: &Path) -> Vec<String> {
    vec![
        "build".to_string(),
        "--build-arg".to_string(),
        format!("key={}", request.broker_key),
        "--build-arg".to_string(),
        format!("secret={}", request.broker_secret),
        "--build-arg".to_string(),
        format!("settings={}", request.settings_path.display()),
        "--build-arg".to_string(),
        format!("account={}", request.account_mode),
        "-t".to_string(),
        request.image_ref(),
        context_directory.display().to_string(),
    ]
}

/// イメージビルドを実行する能力
///
/// 本番では docker CLI を呼び出す。テストでは呼び出しを記録するフェイクに
/// 差し替える。
#[async_trait]
pub trait ImageBuilder: Send + Sync {
    async fn build(
        &self,
        request: &BuildRequest,
        context_directory: &Path,
    ) -> Result<(), BuildError>;
}

/// docker CLI を呼び出す本番実装
///
/// 子プロセスの標準出力を1行ずつ遅延読みし、届いた行をそのまま表示する。
/// 出力列は有限・単方向で、プロセス終了とともに尽きる。
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    /// 呼び出すプログラムを差し替える（テスト用スタブなど）
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageBuilder for DockerCli {
    async fn build(
        &self,
        request: &BuildRequest,
        context_directory: &Path,
    ) -> Result<(), BuildError> {
        let args = docker_build_args(request, context_directory);
        tracing::info!("building image: {}", request.image_ref());
        tracing::debug!("{} {}", self.program, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| BuildError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // stderr は診断用に別タスクで回収する（パイプ詰まりを避ける）
        let stderr_pipe = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            if let Some(mut stderr) = stderr_pipe {
                let _ = stderr.read_to_string(&mut buf).await;
            }
            buf
        });

        if let Some(stdout) = child.stdout.take() {
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await? {
                println!("{line}");
            }
        }

        let status = child.wait().await.map_err(BuildError::Stream)?;
        let stderr = stderr_task.await.unwrap_or_default();

        if !status.success() {
            return Err(BuildError::ExitFailure {
                code: status.code().unwrap_or(-1),
                stderr,
            });
        }

        tracing::info!("successfully built: {}", request.image_ref());
        Ok(())
    }
}
