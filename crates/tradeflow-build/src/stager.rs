use crate::error::StagingError;
use std::fs;
use std::path::{Path, PathBuf};

/// 設定・認証ファイルをビルドコンテキストへ配置するステージャ
pub struct ConfigStager;

impl ConfigStager {
    /// 各ソースファイルを basename を保ったまま target_directory へコピーする
    ///
    /// ステージング先ディレクトリは無ければ作成する。コピーは与えられた
    /// 順序で行い、途中で失敗してもロールバックしない。失敗前にコピーされた
    /// ファイルはディスクに残る（後始末はオーケストレータ側が行う）。
    pub fn stage(files: &[PathBuf], target_directory: &Path) -> Result<(), StagingError> {
        fs::create_dir_all(target_directory).map_err(|source| StagingError::TargetNotWritable {
            path: target_directory.to_path_buf(),
            source,
        })?;

        for file in files {
            let name = match file.file_name() {
                Some(name) if file.is_file() => name,
                _ => {
                    return Err(StagingError::SourceMissing { path: file.clone() });
                }
            };
            let dest = target_directory.join(name);
            tracing::debug!("staging {} -> {}", file.display(), dest.display());
            fs::copy(file, &dest).map_err(|source| StagingError::TargetNotWritable {
                path: dest,
                source,
            })?;
        }

        Ok(())
    }

    /// target_directory 内のファイルを元の basename から正規名へリネームする
    ///
    /// 正規名のファイルが既に存在する場合は上書きする。元の名前のファイルが
    /// ステージング先に無い場合はエラー。
    pub fn rename(
        mapping: &[(String, String)],
        target_directory: &Path,
    ) -> Result<(), StagingError> {
        for (from, to) in mapping {
            let src = target_directory.join(from);
            if !src.is_file() {
                return Err(StagingError::SourceMissing { path: src });
            }
            let dest = target_directory.join(to);
            tracing::debug!("renaming {} -> {}", src.display(), dest.display());
            fs::rename(&src, &dest).map_err(|source| StagingError::TargetNotWritable {
                path: dest,
                source,
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_stage_copies_preserving_basename() {
        let src_dir = tempdir().unwrap();
        let target = tempdir().unwrap();

        let a = src_dir.path().join("a.json");
        let b = src_dir.path().join("b.json");
        fs::write(&a, "{}").unwrap();
        fs::write(&b, "{}").unwrap();

        ConfigStager::stage(&[a, b], target.path()).unwrap();

        assert!(target.path().join("a.json").is_file());
        assert!(target.path().join("b.json").is_file());
    }

    #[test]
    fn test_stage_creates_target_directory() {
        let src_dir = tempdir().unwrap();
        let root = tempdir().unwrap();
        let target = root.path().join("docker/config");

        let a = src_dir.path().join("a.json");
        fs::write(&a, "{}").unwrap();

        ConfigStager::stage(&[a], &target).unwrap();
        assert!(target.join("a.json").is_file());
    }

    #[test]
    fn test_stage_missing_source_keeps_earlier_copies() {
        let src_dir = tempdir().unwrap();
        let target = tempdir().unwrap();

        let a = src_dir.path().join("a.json");
        fs::write(&a, "{}").unwrap();
        let missing = src_dir.path().join("nope.json");

        let result = ConfigStager::stage(&[a, missing.clone()], target.path());

        match result {
            Err(StagingError::SourceMissing { path }) => assert_eq!(path, missing),
            other => panic!("unexpected result: {other:?}"),
        }
        // 失敗前にコピーされたファイルはロールバックされない
        assert!(target.path().join("a.json").is_file());
    }

    #[test]
    fn test_rename_to_canonical_overwrites() {
        let target = tempdir().unwrap();
        fs::write(target.path().join("s.json"), "new").unwrap();
        fs::write(target.path().join("settings.json"), "old").unwrap();

        ConfigStager::rename(
            &[("s.json".to_string(), "settings.json".to_string())],
            target.path(),
        )
        .unwrap();

        assert!(!target.path().join("s.json").exists());
        assert_eq!(
            fs::read_to_string(target.path().join("settings.json")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_rename_missing_source_fails() {
        let target = tempdir().unwrap();

        let result = ConfigStager::rename(
            &[("absent.json".to_string(), "settings.json".to_string())],
            target.path(),
        );
        assert!(matches!(result, Err(StagingError::SourceMissing { .. })));
    }

    #[test]
    fn test_stage_rename_twice_is_idempotent() {
        let src_dir = tempdir().unwrap();
        let target = tempdir().unwrap();

        let s = src_dir.path().join("s.json");
        fs::write(&s, "{}").unwrap();
        let mapping = vec![("s.json".to_string(), "settings.json".to_string())];

        for _ in 0..2 {
            ConfigStager::stage(std::slice::from_ref(&s), target.path()).unwrap();
            ConfigStager::rename(&mapping, target.path()).unwrap();
        }

        // 正規名のファイルが1つだけ存在し、重複は作られない
        let entries: Vec<_> = fs::read_dir(target.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("settings.json")]);
    }
}
