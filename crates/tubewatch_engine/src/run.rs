use tubewatch_core::{ChannelConfig, WatermarkPolicy};
use tubewatch_logging::{watch_error, watch_info, watch_warn, LogSink};

use crate::{
    ActionExecutor, ChannelReport, ConfigStore, PlatformApi, PlaylistScanner, RuleEngine,
    RunSummary,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub policy: WatermarkPolicy,
    pub dry_run: bool,
}

/// One pass over all configured channels: scan, dispatch, move watermarks.
///
/// Channels are processed one after another. A failure in one channel is
/// recorded in its report and never stops the others.
pub struct WatchRun<'a> {
    api: &'a dyn PlatformApi,
    log: &'a dyn LogSink,
    options: RunOptions,
}

impl<'a> WatchRun<'a> {
    pub fn new(api: &'a dyn PlatformApi, log: &'a dyn LogSink, options: RunOptions) -> Self {
        Self { api, log, options }
    }

    /// Processes every entry in order, then checkpoints all of them through
    /// `store`, whatever happened to the individual channels. A dry run
    /// leaves the stored file untouched.
    pub async fn run_and_save(
        &self,
        store: &ConfigStore,
        configs: &mut [ChannelConfig],
    ) -> RunSummary {
        let mut summary = self.run_all(configs).await;
        if self.options.dry_run {
            watch_info!(self.log, "[dry run] Not saving {:?}", store.path());
            return summary;
        }
        match store.save(configs) {
            Ok(()) => watch_info!(
                self.log,
                "Saved {} channel(s) to {:?}",
                configs.len(),
                store.path()
            ),
            Err(err) => {
                watch_error!(self.log, "Saving config failed: {}", err);
                summary.save_error = Some(err.to_string());
            }
        }
        summary
    }

    pub async fn run_all(&self, configs: &mut [ChannelConfig]) -> RunSummary {
        let mut summary = RunSummary::default();
        for config in configs.iter_mut() {
            summary.channels.push(self.process_channel(config).await);
        }
        watch_info!(
            self.log,
            "Run finished: {} channel(s), {} action(s), {} failure(s)",
            summary.channels.len(),
            summary.actions_executed(),
            summary.failed_channels()
        );
        summary
    }

    /// Scans one channel, dispatches its rules, and writes the resulting
    /// watermark into `config`.
    pub async fn process_channel(&self, config: &mut ChannelConfig) -> ChannelReport {
        let previous_watermark = config.watermark;
        let mut report = ChannelReport {
            playlist_id: config.uploads_list_id.clone(),
            previous_watermark,
            watermark: previous_watermark,
            scanned: 0,
            matches: 0,
            actions_executed: 0,
            skipped: false,
            error: None,
        };

        if config.uploads_list_id.trim().is_empty() {
            watch_warn!(self.log, "Skipping entry without uploads_list_id");
            report.skipped = true;
            return report;
        }

        let scanner = PlaylistScanner::new(self.api, self.log);
        let scan = scanner
            .scan(&config.uploads_list_id, previous_watermark)
            .await;
        report.scanned = scan.items.len();

        let executor = ActionExecutor::new(self.api, self.log).dry_run(self.options.dry_run);
        let engine = RuleEngine::new(&executor, self.log);
        let dispatch = engine.dispatch(&scan.items, &config.rules).await;
        report.matches = dispatch.matches;
        report.actions_executed = dispatch.actions_executed;

        let clean = scan.error.is_none() && dispatch.error.is_none();
        config.watermark = self.options.policy.advance(
            previous_watermark,
            dispatch.watermark,
            scan.newest(),
            clean,
        );
        report.watermark = config.watermark;
        report.error = scan.error.or(dispatch.error);

        watch_info!(
            self.log,
            "Playlist {}: {} new, {} match(es), {} action(s), watermark {} -> {}{}",
            report.playlist_id,
            report.scanned,
            report.matches,
            report.actions_executed,
            report.previous_watermark,
            report.watermark,
            if report.error.is_some() { " (incomplete)" } else { "" }
        );
        report
    }
}
