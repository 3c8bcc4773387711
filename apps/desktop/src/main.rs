use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, AnalysisBackend, AnalysisClient, AnalysisSession, Resolution, SampleSelector,
};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "nyaya", about = "Suggest legal sections for an incident narrative")]
struct Cli {
    /// Overrides the analysis service url from nyaya.toml / environment.
    #[arg(long)]
    api_base_url: Option<String>,
    /// Print the raw analysis payload as JSON instead of section cards.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze the given incident text.
    Analyze {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Load a sample incident; pass --analyze to submit it.
    Sample {
        index: usize,
        #[arg(long)]
        analyze: bool,
    },
    /// List the sample incidents.
    Samples,
    /// Check that the analysis service is reachable.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings().context("failed to load client settings")?;
    if let Some(url) = cli.api_base_url.as_deref() {
        settings = settings
            .with_api_base_url(url)
            .context("invalid --api-base-url")?;
    }
    let client = AnalysisClient::new(&settings).context("failed to build http client")?;
    tracing::debug!(base_url = client.base_url(), "analysis client ready");

    match cli.command {
        Command::Samples => {
            for (index, sample) in SampleSelector::new().samples().iter().enumerate() {
                println!("[{index}] {sample}");
            }
        }
        Command::Status => {
            let status = client
                .status()
                .await
                .with_context(|| format!("analysis service at {} is unreachable", client.base_url()))?;
            println!("{}", render::status_line(&status));
        }
        Command::Analyze { text } => {
            let mut session = AnalysisSession::new(Arc::new(client));
            session.set_input(text.join(" "));
            run_submit(&mut session, cli.json).await?;
        }
        Command::Sample { index, analyze } => {
            let mut session = AnalysisSession::new(Arc::new(client));
            session.select_sample(index)?;
            println!("{}", session.orchestrator().input());
            if analyze {
                run_submit(&mut session, cli.json).await?;
            }
        }
    }

    Ok(())
}

async fn run_submit(session: &mut AnalysisSession, json: bool) -> Result<()> {
    match session.submit().await {
        None => {
            anyhow::bail!("incident text is empty; nothing to analyze");
        }
        Some(Resolution::Applied(_)) => {}
        Some(other) => {
            tracing::warn!(?other, "analysis outcome was not applied");
        }
    }

    let orchestrator = session.orchestrator();
    if let Some(failure) = orchestrator.failure() {
        anyhow::bail!("{} ({:?})", failure.message, failure.kind);
    }
    let Some(result) = orchestrator.result() else {
        anyhow::bail!("analysis finished without a result");
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(result.as_ref()).context("failed to encode result")?
        );
    } else {
        print!("{}", render::analysis(orchestrator.request_id(), result));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_flag_is_only_read_from_the_command_line() {
        std::env::set_var("NYAYA_API_BASE_URL", "http://from-env:1");

        let cli = Cli::try_parse_from(["nyaya", "status"]).expect("parse");
        assert_eq!(cli.api_base_url, None);

        let cli = Cli::try_parse_from(["nyaya", "--api-base-url", "http://flag:2", "samples"])
            .expect("parse");
        assert_eq!(cli.api_base_url.as_deref(), Some("http://flag:2"));
        assert!(matches!(cli.command, Command::Samples));
    }

    #[test]
    fn analyze_joins_words_and_requires_text() {
        let cli = Cli::try_parse_from(["nyaya", "--json", "analyze", "man", "stole", "phone"])
            .expect("parse");
        assert!(cli.json);
        match cli.command {
            Command::Analyze { text } => assert_eq!(text.join(" "), "man stole phone"),
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["nyaya", "analyze"]).is_err());
    }
}
