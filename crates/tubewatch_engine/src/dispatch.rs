use tubewatch_core::{match_in_order, PlaylistItem, Rule};
use tubewatch_logging::{watch_debug, watch_error, LogSink};

use crate::{ActionExecutor, DispatchOutcome};

/// Runs every rule over the new items and fires the actions of each match.
pub struct RuleEngine<'a> {
    executor: &'a ActionExecutor<'a>,
    log: &'a dyn LogSink,
}

impl<'a> RuleEngine<'a> {
    pub fn new(executor: &'a ActionExecutor<'a>, log: &'a dyn LogSink) -> Self {
        Self { executor, log }
    }

    /// Walks rules in order and, per rule, `items` in the given (ascending)
    /// order. After all actions of a match succeed, that item's publish time
    /// becomes the watermark candidate. The first failed action stops the
    /// whole dispatch; the candidate recorded so far is kept.
    pub async fn dispatch(&self, items: &[PlaylistItem], rules: &[Rule]) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        for found in match_in_order(items, rules) {
            outcome.matches += 1;
            watch_debug!(
                self.log,
                "Rule {} ({:?}) matched {} {:?}",
                found.rule_index,
                found.rule.pattern(),
                found.item.video_id,
                found.item.title
            );

            for action in found.rule.actions() {
                if let Err(err) = self.executor.execute(action, &found.item.video_id).await {
                    watch_error!(
                        self.log,
                        "Action {:?} for {} failed: {}",
                        action,
                        found.item.video_id,
                        err
                    );
                    outcome.error = Some(err);
                    return outcome;
                }
                outcome.actions_executed += 1;
            }
            outcome.watermark = Some(found.item.published_at);
        }

        outcome
    }
}
