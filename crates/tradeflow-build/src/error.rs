use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("source file not found: {path}")]
    SourceMissing { path: PathBuf },

    #[error("staging target is not writable: {path}")]
    TargetNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to start build process '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("build process exited with code {code}\n{stderr}")]
    ExitFailure { code: i32, stderr: String },

    #[error("failed to read build output: {0}")]
    Stream(#[from] std::io::Error),
}

/// クリーンアップの警告。機密ファイルの削除漏れは致命的エラーとしては
/// 扱わず、呼び出し側がログに記録して処理を続行する
#[derive(Debug, Error)]
#[error("cleanup incomplete: {} already gone, {} not removed", .missing.len(), .failed.len())]
pub struct CleanupWarning {
    /// 削除対象だったが既に存在しなかったパス
    pub missing: Vec<PathBuf>,
    /// 削除を試みたが失敗したパス
    pub failed: Vec<(PathBuf, std::io::Error)>,
}

/// パイプライン全体のエラー。どのフェーズで失敗したかをタグとして持つ
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("staging failed: {0}")]
    Staging(#[from] StagingError),

    #[error("image build failed: {0}")]
    Build(#[from] BuildError),
}

impl PipelineError {
    /// ログ出力に付与するフェーズタグ
    pub fn phase(&self) -> &'static str {
        match self {
            PipelineError::Staging(_) => "stage",
            PipelineError::Build(_) => "build",
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
