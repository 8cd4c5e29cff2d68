//! `promptrefine` 바이너리 진입점.

use std::sync::Arc;

use promptrefine::domain::prompt::InputError;
use promptrefine::interface::cli::{Cli, CliAction, run_refine};
use promptrefine::interface::composition::AppComposition;
use promptrefine::interface::http;

#[tokio::main]
async fn main() {
    let action = Cli::parse_action();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| action.default_log_filter().into()),
        )
        .init();

    if let Err(err) = run(action).await {
        eprintln!("error: {err:#}");
        // 입력 오류는 사용 오류와 같은 종료 코드를 쓴다.
        let code = if err.downcast_ref::<InputError>().is_some() { 2 } else { 1 };
        std::process::exit(code);
    }
}

async fn run(action: CliAction) -> anyhow::Result<()> {
    match action {
        CliAction::InspectConfig => {
            let composition = AppComposition::default();
            println!("{}", composition.config_usecase().inspect()?);
        }
        CliAction::InitConfig => {
            let composition = AppComposition::default();
            let path = composition.config_usecase().init_template()?;
            println!("config template: {}", path.display());
        }
        CliAction::Refine(options) => {
            let composition = AppComposition::load()?;
            run_refine(&composition, options).await?;
        }
        CliAction::Serve(options) => {
            let composition = AppComposition::load()?;
            let bind = options
                .bind
                .unwrap_or_else(|| composition.config().bind_addr());
            let port = options.port.unwrap_or_else(|| composition.config().port());
            http::serve(Arc::new(composition), &bind, port).await?;
        }
    }
    Ok(())
}
