//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "promptrefine", version)]
#[command(about = "Restructure raw prompts into a seven-section prompt template")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Refine a prompt given as argument or read from stdin
    Refine {
        /// Raw prompt text (stdin when omitted)
        prompt: Option<String>,

        /// Skip AI enhancement even when a provider is configured
        #[arg(long)]
        no_enhance: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Write the refined prompt to a file (or into a directory)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    /// Run the HTTP server
    Serve {
        #[arg(long)]
        bind: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
    /// Show effective merged config, or write a template with --init
    Config {
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineOptions {
    pub prompt: Option<String>,
    pub enhance: bool,
    pub json: bool,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServeOptions {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Refine(RefineOptions),
    Serve(ServeOptions),
    InspectConfig,
    InitConfig,
}

impl CliAction {
    /// `RUST_LOG`가 없을 때 쓰는 기본 로그 필터.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Serve(_) => "promptrefine=info,tower_http=info",
            _ => "warn",
        }
    }
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            Commands::Refine {
                prompt,
                no_enhance,
                json,
                output,
            } => CliAction::Refine(RefineOptions {
                prompt,
                enhance: !no_enhance,
                json,
                output,
            }),
            Commands::Serve { bind, port } => CliAction::Serve(ServeOptions { bind, port }),
            Commands::Config { init: true } => CliAction::InitConfig,
            Commands::Config { init: false } => CliAction::InspectConfig,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        Cli::try_parse_from(args).unwrap().into_action()
    }

    #[test]
    fn refine_defaults_to_enhancement() {
        assert_eq!(
            parse(&["promptrefine", "refine", "write a poem"]),
            CliAction::Refine(RefineOptions {
                prompt: Some("write a poem".to_string()),
                enhance: true,
                json: false,
                output: None,
            })
        );
    }

    #[test]
    fn refine_flags_are_mapped() {
        assert_eq!(
            parse(&["promptrefine", "refine", "--no-enhance", "--json", "-o", "out"]),
            CliAction::Refine(RefineOptions {
                prompt: None,
                enhance: false,
                json: true,
                output: Some(PathBuf::from("out")),
            })
        );
    }

    #[test]
    fn serve_and_config_actions() {
        assert_eq!(
            parse(&["promptrefine", "serve", "--port", "8080"]),
            CliAction::Serve(ServeOptions {
                bind: None,
                port: Some(8080),
            })
        );
        assert_eq!(parse(&["promptrefine", "config"]), CliAction::InspectConfig);
        assert_eq!(parse(&["promptrefine", "config", "--init"]), CliAction::InitConfig);
    }

    #[test]
    fn serve_logs_http_traces_by_default() {
        assert_eq!(
            CliAction::Serve(ServeOptions::default()).default_log_filter(),
            "promptrefine=info,tower_http=info"
        );
        assert_eq!(CliAction::InspectConfig.default_log_filter(), "warn");
    }
}
