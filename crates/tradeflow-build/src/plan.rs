use crate::request::BuildRequest;
use std::path::{Path, PathBuf};

/// ビルドコンテキストのルートディレクトリ名（プロジェクトルート直下）
pub const CONTEXT_DIR: &str = "docker";
/// コンテキスト内のステージング先ディレクトリ名
pub const CONFIG_DIR: &str = "config";

/// ビルドコンテキストが期待する設定ファイルの正規名
pub const SETTINGS_CANONICAL: &str = "settings.json";
/// ビルドコンテキストが期待するサービス認証情報の正規名
pub const CREDENTIAL_CANONICAL: &str = "service_client.json";
/// ステージングするコンパイル済み成果物の名前（リネームされない）
pub const ARTIFACT_NAME: &str = "trading-app";

/// BuildRequest から決定的に導出されるステージング計画
///
/// どのファイルをどこへコピーし、何にリネームし、ビルド後に何を削除するかを
/// 1箇所で決める。クリーンアップ対象は必ずこの計画が配置したファイルに
/// 限られる。
#[derive(Debug, Clone)]
pub struct StagingPlan {
    /// コピーする元ファイル（この順序でコピーされる）
    pub source_files: Vec<PathBuf>,
    /// ビルドコンテキストのルート (<project>/docker)
    pub context_directory: PathBuf,
    /// ステージング先 (<context>/config)
    pub target_directory: PathBuf,
    /// 元の basename から正規名へのリネーム表
    pub rename_map: Vec<(String, String)>,
}

impl StagingPlan {
    pub fn from_request(request: &BuildRequest, project_root: &Path) -> Self {
        let context_directory = project_root.join(CONTEXT_DIR);
        let target_directory = context_directory.join(CONFIG_DIR);

        let artifact_source = project_root
            .join("target")
            .join(request.account_mode.build_profile())
            .join(ARTIFACT_NAME);

        let rename_map = vec![
            (
                basename(&request.settings_path),
                SETTINGS_CANONICAL.to_string(),
            ),
            (
                basename(&request.credential_path),
                CREDENTIAL_CANONICAL.to_string(),
            ),
        ];

        Self {
            source_files: vec![
                request.settings_path.clone(),
                request.credential_path.clone(),
                artifact_source,
            ],
            context_directory,
            target_directory,
            rename_map,
        }
    }

    /// ビルド後に削除するパス
    ///
    /// この計画がステージング先に配置するファイルと正確に一致する。
    pub fn cleanup_set(&self) -> Vec<PathBuf> {
        vec![
            self.target_directory.join(SETTINGS_CANONICAL),
            self.target_directory.join(ARTIFACT_NAME),
            self.target_directory.join(CREDENTIAL_CANONICAL),
        ]
    }

    /// ステージング失敗後のベストエフォート掃除対象
    ///
    /// リネーム前の basename も含める。コピー済み・未リネームのまま残った
    /// 機密ファイルを拾うため。すべてのパスはこの計画から導出される。
    pub fn aborted_cleanup_set(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .source_files
            .iter()
            .filter_map(|src| src.file_name())
            .map(|name| self.target_directory.join(name))
            .collect();
        for path in self.cleanup_set() {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
