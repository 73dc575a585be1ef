use anyhow::Context;
use gcodesim::report::USAGE;
use gcodesim::{init_logging, CliOptions, FileReport, BUILD_DATE, VERSION};
use tracing::{debug, error};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let options = match CliOptions::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("gcodesim {} ({})", VERSION, BUILD_DATE);
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };
    let config = options.load_config()?;
    debug!(?config, files = options.files.len(), "Starting");

    // One engine per file on the blocking pool
    let handles: Vec<_> = options
        .files
        .iter()
        .cloned()
        .map(|path| {
            let config = config.clone();
            tokio::task::spawn_blocking(move || {
                FileReport::from_file(&path, config)
                    .with_context(|| format!("Failed to virtualize {}", path.display()))
            })
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    let mut failures = 0usize;
    for handle in handles {
        match handle.await? {
            Ok(report) => reports.push(report),
            Err(e) => {
                error!("{:#}", e);
                eprintln!("{:#}", e);
                failures += 1;
            }
        }
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", report.summary());
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files failed", failures, options.files.len());
    }
    Ok(())
}
