// src/main.rs
// =============================================================================
// This is the entry point of the linkpulse CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr) and load the config
// 3. Read the description text (file or stdin)
// 4. Run the checker, showing progress on stderr
// 5. Print results and exit with the right code:
//      0 = nothing proven broken
//      1 = at least one broken/error link
//      2 = we could not run (bad config, unreadable input, ...)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{CheckArgs, Cli, Commands};
use linkpulse::config::ConfigOverrides;
use linkpulse::{
    exit_code, extract_urls, logging, report, split_pasted_url, Config, LinkChecker,
    ReqwestTransport, RunProgress,
};
use std::io::{IsTerminal, Read, Write};
use std::path::Path;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check(args) => handle_check(args).await,
        Commands::Extract { input, json } => handle_extract(input.as_deref(), json),
    }
}

// Handles the 'extract' subcommand: print the URLs, check nothing
fn handle_extract(input: Option<&Path>, json: bool) -> Result<i32> {
    let text = read_input(input)?;
    let urls = extract_urls(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&urls)?);
    } else {
        for url in &urls {
            println!("{}", url);
        }
    }

    Ok(0)
}

// Handles the 'check' subcommand
async fn handle_check(args: CheckArgs) -> Result<i32> {
    let overrides = ConfigOverrides {
        concurrency: args.concurrency,
        timeout_ms: args.timeout_ms,
    };
    let config = Config::load(args.config.as_deref())?.override_with(&overrides)?;

    let raw = read_input(args.input.as_deref())?;

    // An explicit --video-url wins over one found in the pasted text
    let (pasted_video_url, text) = split_pasted_url(&raw);
    let video_url = args.video_url.or(pasted_video_url);

    let transport = ReqwestTransport::new(&config).context("failed to create HTTP client")?;
    let checker = LinkChecker::new(transport, config.check_options());

    let show_progress = std::io::stderr().is_terminal() && !args.json && !args.csv;
    let progress_rx = checker.subscribe_progress();

    let (mut results, ()) = tokio::join!(
        checker.run(&text),
        print_progress(progress_rx, show_progress)
    );

    if results.is_empty() {
        eprintln!("✅ No links found to check");
    }

    if args.recheck {
        // run() has returned, so no run is in flight and rechecks are accepted
        results = checker
            .recheck_inconclusive()
            .await
            .context("recheck of inconclusive links failed")?;
    }

    let output = if args.json {
        report::render_json(&results, video_url.as_deref())?
    } else if args.csv {
        report::render_csv(&results)
    } else {
        report::render_table(&results, video_url.as_deref())
    };
    print!("{}", output);
    std::io::stdout().flush()?;

    Ok(exit_code(&results))
}

// Rewrites a "Checking 3/12" line on stderr until the run completes
async fn print_progress(mut rx: watch::Receiver<RunProgress>, enabled: bool) {
    while rx.changed().await.is_ok() {
        let progress = *rx.borrow_and_update();
        if enabled && progress.total > 0 {
            eprint!("\r🌐 Checking {}/{}", progress.done, progress.total);
        }
        if progress.is_complete() {
            break;
        }
    }
    if enabled {
        eprintln!();
    }
}

// Reads the whole input: a file, or stdin for None / "-"
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
