use crate::error::CleanupWarning;
use std::fs;
use std::path::PathBuf;

/// ステージングされたファイルをビルドコンテキストから削除する
///
/// 存在しないパスはエラーにしない（冪等な削除）。削除に失敗しても残りの
/// パスの処理は続行し、拾えなかったものをまとめて警告として返す。
pub fn cleanup(paths: &[PathBuf]) -> Result<(), CleanupWarning> {
    let mut missing = Vec::new();
    let mut failed = Vec::new();

    for path in paths {
        if !path.exists() {
            tracing::warn!("staged file already gone: {}", path.display());
            missing.push(path.clone());
            continue;
        }
        match fs::remove_file(path) {
            Ok(()) => tracing::debug!("removed {}", path.display()),
            Err(source) => {
                tracing::warn!("failed to remove {}: {}", path.display(), source);
                failed.push((path.clone(), source));
            }
        }
    }

    if missing.is_empty() && failed.is_empty() {
        Ok(())
    } else {
        Err(CleanupWarning { missing, failed })
    }
}
