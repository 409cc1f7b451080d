use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// ブローカーアカウントの種別
///
/// ステージングするコンパイル済み成果物のバリアントを選択する。
/// paper はデバッグビルド、それ以外はリリースビルドを使用する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountMode {
    /// ペーパートレード口座
    #[default]
    Paper,
    /// 本番口座
    Live,
}

impl AccountMode {
    /// ステージングする成果物のビルドプロファイル名
    pub fn build_profile(&self) -> &'static str {
        match self {
            AccountMode::Paper => "debug",
            _ => "release",
        }
    }
}

impl fmt::Display for AccountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountMode::Paper => write!(f, "paper"),
            AccountMode::Live => write!(f, "live"),
        }
    }
}

impl FromStr for AccountMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "paper" => Ok(AccountMode::Paper),
            "live" => Ok(AccountMode::Live),
            other => Err(format!(
                "invalid account type '{other}' (expected 'paper' or 'live')"
            )),
        }
    }
}

/// 1回のイメージビルドに必要な入力一式
///
/// CLI引数の解決後に構築され、以降は不変。実行ごとに作り直され、
/// 実行をまたいで保持される状態はない。
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub image_name: String,
    pub image_tag: String,
    pub settings_path: PathBuf,
    pub credential_path: PathBuf,
    pub broker_key: String,
    pub broker_secret: String,
    pub account_mode: AccountMode,
}

impl BuildRequest {
    /// `name:tag` 形式のイメージ参照
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.image_name, self.image_tag)
    }
}
