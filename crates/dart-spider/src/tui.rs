use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress of the company lookups: every attempt, the ones kept, the ones
/// that failed.
pub(crate) struct Progress {
    _multi: Option<MultiProgress>,
    pub(crate) total: ProgressBar,
    pub(crate) kept: ProgressBar,
    pub(crate) failed: ProgressBar,
}

impl Progress {
    pub(crate) fn new(len: usize, tui: bool) -> Self {
        if !tui {
            return Progress::hidden();
        }
        match multi_progress(len) {
            Ok(progress) => progress,
            Err(err) => {
                tracing::error!("failed to build progress bars, error({err})");
                Progress::hidden()
            }
        }
    }

    pub(crate) fn hidden() -> Self {
        Progress {
            _multi: None,
            total: ProgressBar::hidden(),
            kept: ProgressBar::hidden(),
            failed: ProgressBar::hidden(),
        }
    }

    pub(crate) fn finish(&self) {
        self.total.finish();
        self.kept.finish();
        self.failed.finish();
    }
}

/// Lookup counters share one layout: a label, a bar and a count.
const COUNTER: &str = " {prefix:>8} {msg:<7} {bar:40.COLOR/black} {pos:>6}/{len}";

fn counter_style(color: &str) -> Result<ProgressStyle, indicatif::style::TemplateError> {
    Ok(ProgressStyle::default_bar()
        .template(&COUNTER.replace("COLOR", color))?
        .progress_chars("=> "))
}

fn multi_progress(len: usize) -> Result<Progress, indicatif::style::TemplateError> {
    let multi = MultiProgress::new();
    let len = len as u64;

    // every lookup, with timing
    let total = multi.add(ProgressBar::new(len).with_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.cyan} {prefix:>8} {msg:<7} {bar:40.cyan/black} {pos:>6}/{len} \
                 [{elapsed_precise} < {eta_precise}, {per_sec}]",
            )?
            .progress_chars("=> "),
    ));
    total.set_prefix("OpenDART");
    total.set_message("lookups");
    total.enable_steady_tick(Duration::from_millis(120));

    let kept = multi.insert_after(&total, ProgressBar::new(len).with_style(counter_style("green")?));
    kept.set_message("matched");

    let failed = multi.insert_after(&kept, ProgressBar::new(len).with_style(counter_style("red")?));
    failed.set_message("errors");

    Ok(Progress {
        _multi: Some(multi),
        total,
        kept,
        failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_parse() {
        let progress = multi_progress(3).unwrap();
        assert_eq!(progress.total.length(), Some(3));
        assert_eq!(progress.kept.message(), "matched");
        assert_eq!(progress.failed.message(), "errors");
        progress.finish();
    }

    #[test]
    fn hidden_bars_still_count() {
        let progress = Progress::new(2, false);
        progress.total.inc(1);
        progress.failed.inc(1);
        assert_eq!(progress.total.position(), 1);
        assert_eq!(progress.kept.position(), 0);
        assert_eq!(progress.failed.position(), 1);
    }
}
