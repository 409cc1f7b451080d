use crate::builder::ImageBuilder;
use crate::cleanup::cleanup;
use crate::error::PipelineError;
use crate::plan::StagingPlan;
use crate::request::BuildRequest;
use crate::stager::ConfigStager;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// ステージング → イメージビルド → クリーンアップを順に実行する
///
/// クリーンアップはステージング完了後であれば、ビルドの成否に関わらず必ず
/// 実行する。機密ファイルがビルド失敗を理由にコンテキストへ残ることはない。
/// ステージング自体が失敗した場合も、途中までコピーされたファイルを
/// ベストエフォートで掃除してから中断する。
pub async fn run_pipeline(
    request: &BuildRequest,
    project_root: &Path,
    builder: &impl ImageBuilder,
) -> Result<(), PipelineError> {
    let plan = StagingPlan::from_request(request, project_root);

    // Init -> Staged
    println!(
        "  {} 設定ファイルをステージング中: {}",
        "→".blue(),
        plan.target_directory.display().to_string().cyan()
    );
    let staged = ConfigStager::stage(&plan.source_files, &plan.target_directory)
        .and_then(|()| ConfigStager::rename(&plan.rename_map, &plan.target_directory));
    if let Err(e) = staged {
        sweep_partial_staging(&plan);
        return Err(e.into());
    }

    // Staged -> Built
    println!(
        "  {} {} をビルド中...",
        "→".blue(),
        request.image_ref().cyan()
    );
    let built = builder.build(request, &plan.context_directory).await;

    // Built -> CleanedUp。ビルドが失敗していても必ず実行する
    println!("  {} ステージングした機密ファイルを削除中...", "→".blue());
    if let Err(warning) = cleanup(&plan.cleanup_set()) {
        tracing::warn!("{warning}");
    }

    // CleanedUp -> Done
    built?;
    println!("  {} ビルド完了: {}", "✓".green(), request.image_ref().cyan());
    Ok(())
}

/// ステージング失敗後の後始末
///
/// 実際に作られたファイルだけを削除対象にする。対象は計画から導出された
/// パスに限られ、ステージングしていないものを消すことはない。
fn sweep_partial_staging(plan: &StagingPlan) {
    let created: Vec<PathBuf> = plan
        .aborted_cleanup_set()
        .into_iter()
        .filter(|path| path.exists())
        .collect();
    if created.is_empty() {
        return;
    }
    if let Err(warning) = cleanup(&created) {
        tracing::warn!("cleanup after failed staging: {warning}");
    }
}
