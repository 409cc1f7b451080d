use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// ビルド入力一式を持つテスト用プロジェクトルート
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    /// 設定・認証・コンパイル済み成果物の3ファイルを配置する
    pub fn write_build_inputs(&self) {
        fs::write(self.path().join("s.json"), "{}").unwrap();
        fs::write(self.path().join("c.json"), "{}").unwrap();

        let artifact_dir = self.path().join("target/debug");
        fs::create_dir_all(&artifact_dir).unwrap();
        fs::write(artifact_dir.join("trading-app"), "binary").unwrap();
    }

    /// docker の代わりに呼ばれるスタブを作る
    ///
    /// 受け取った引数を1行ずつ docker-args.txt に記録し、1行出力してから
    /// 指定の終了コードで終わる。
    #[cfg(unix)]
    pub fn write_stub_docker(&self, exit_code: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let stub = self.path().join("docker-stub.sh");
        fs::write(
            &stub,
            format!(
                "#!/bin/sh\n\
                 printf '%s\\n' \"$@\" > \"$(dirname \"$0\")/docker-args.txt\"\n\
                 echo \"stub build output\"\n\
                 exit {exit_code}\n"
            ),
        )
        .unwrap();
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();
        stub
    }

    /// スタブが記録した引数列を読み出す
    pub fn recorded_args(&self) -> Vec<String> {
        fs::read_to_string(self.path().join("docker-args.txt"))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn path(&self) -> PathBuf {
        // 子プロセスの current_dir と比較するため正規化しておく
        self.root.path().canonicalize().unwrap()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.path().join("docker/config")
    }
}
