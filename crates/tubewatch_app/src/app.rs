use anyhow::{bail, Context, Result};
use tubewatch_core::WatermarkPolicy;
use tubewatch_engine::{
    ApiSettings, ConfigStore, ReqwestPlatformApi, RunOptions, RunSummary, WatchRun,
};
use tubewatch_logging::{watch_info, FacadeSink};

use crate::cli::Cli;

/// Loads the config, runs every channel once and writes the config back.
///
/// Everything before the first channel is processed is fatal: a missing or
/// malformed config, a missing access token, an unusable API base URL.
pub fn run(cli: &Cli) -> Result<RunSummary> {
    let log = FacadeSink::default();

    let store = ConfigStore::new(&cli.config);
    let mut configs = store
        .load()
        .with_context(|| format!("loading {}", cli.config.display()))?;
    watch_info!(&log, "Loaded {} channel(s) from {:?}", configs.len(), store.path());

    let access_token = match cli.access_token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => bail!("no access token: pass --access-token or set TUBEWATCH_ACCESS_TOKEN"),
    };
    let mut settings = ApiSettings::new(access_token);
    settings.base_url = cli.api_base.clone();
    settings.page_size = cli.page_size;
    let api = ReqwestPlatformApi::new(settings).context("creating platform client")?;

    let options = RunOptions {
        policy: if cli.advance_to_newest {
            WatermarkPolicy::NewestSeen
        } else {
            WatermarkPolicy::LastMatched
        },
        dry_run: cli.dry_run,
    };
    if options.dry_run {
        watch_info!(&log, "Dry run: no playlist items or bulletins will be created");
    }

    // Single thread, one call at a time.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime")?;
    let run = WatchRun::new(&api, &log, options);
    Ok(runtime.block_on(run.run_and_save(&store, &mut configs)))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["tubewatch"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn missing_config_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let cli = cli(&["--config", path.to_str().unwrap(), "--access-token", "t"]);
        let err = run(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("does not exist"));
    }

    #[test]
    fn missing_token_is_fatal_and_leaves_config_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"[{"uploads_list_id":"UU1","actions":[]}]"#).unwrap();
        let cli = cli(&["--config", path.to_str().unwrap(), "--access-token", " "]);

        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("access token"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"[{"uploads_list_id":"UU1","actions":[]}]"#
        );
    }

    #[test]
    fn empty_config_runs_and_saves() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "[]").unwrap();
        let cli = cli(&["--config", path.to_str().unwrap(), "--access-token", "t"]);

        let summary = run(&cli).unwrap();
        assert!(summary.is_success());
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
    }
}
