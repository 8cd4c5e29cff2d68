//! `refine` 명령 실행: 입력 수집, 결과 출력, 산출물 저장.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tokio::io::AsyncReadExt;

use crate::domain::prompt::RefineRequest;
use crate::infrastructure::render::{render_json, report_refinement};
use crate::interface::composition::AppComposition;

use super::command::RefineOptions;

/// 정제를 실행하고 결과를 stdout으로 출력한다.
/// 입력 오류는 `InputError`를 담은 `anyhow::Error`로 반환된다.
pub async fn run_refine(composition: &AppComposition, options: RefineOptions) -> Result<()> {
    let prompt = match options.prompt {
        Some(prompt) => prompt,
        None => read_stdin().await?,
    };

    let request = RefineRequest {
        prompt,
        allow_enhancement: options.enhance && composition.config().enhance_by_default(),
    };
    let result = composition.refine_usecase().execute(request).await?;

    let reporter = composition.reporter();
    if options.json {
        reporter.raw(&render_json(&result)?);
    } else {
        report_refinement(reporter, &result);
    }

    if let Some(output) = options.output {
        let Some(artifact) = composition.download_usecase().execute() else {
            bail!("No refined prompt available");
        };
        let target = artifact_target(&output, &artifact.filename);
        tokio::fs::write(&target, artifact.content)
            .await
            .with_context(|| format!("failed to write {}", target.display()))?;
        if !options.json {
            reporter.kv("Saved to", &target.display().to_string());
        }
    }

    Ok(())
}

async fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("failed to read prompt from stdin")?;
    Ok(buf)
}

/// 디렉터리가 주어지면 생성된 파일 이름을 붙인다.
fn artifact_target(output: &Path, filename: &str) -> PathBuf {
    if output.is_dir() {
        output.join(filename)
    } else {
        output.to_path_buf()
    }
}
