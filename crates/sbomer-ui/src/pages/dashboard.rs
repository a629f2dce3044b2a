use serde::Serialize;

use crate::model::SbomerStats;
use crate::resource::AsyncState;
use crate::timefmt::timestamp_to_human_readable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: String,
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatLine {
    pub label: String,
    pub value: String,
}

/// The "About" block fed by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum AboutSection {
    Loading,
    Failed { title: String, message: String },
    Loaded { lines: Vec<StatLine> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub heading: String,
    pub notice: Notice,
    pub about: AboutSection,
}

fn line(label: &str, value: impl ToString) -> StatLine {
    StatLine {
        label: label.to_string(),
        value: value.to_string(),
    }
}

fn stat_lines(stats: &SbomerStats) -> Vec<StatLine> {
    let uptime = if stats.uptime_millis > 0 {
        timestamp_to_human_readable(
            i64::try_from(stats.uptime_millis).unwrap_or(i64::MAX),
            false,
            None,
        )
    } else if stats.uptime.is_empty() {
        "N/A".to_string()
    } else {
        stats.uptime.clone()
    };
    let version = if stats.version.is_empty() {
        "N/A"
    } else {
        stats.version.as_str()
    };
    let messaging = &stats.messaging;
    let resources = &stats.resources;

    vec![
        line("Version", version),
        line("Uptime", uptime),
        line("Generations", resources.generations.total),
        line("Generations in progress", resources.generations.in_progress),
        line("Manifests", resources.manifests.total),
        line(
            "PNC messages (received / processed / skipped)",
            format!(
                "{} / {} / {}",
                messaging.pnc_consumer.received,
                messaging.pnc_consumer.processed,
                messaging.pnc_consumer.skipped
            ),
        ),
        line(
            "Errata messages (received / processed / skipped)",
            format!(
                "{} / {} / {}",
                messaging.errata_consumer.received,
                messaging.errata_consumer.processed,
                messaging.errata_consumer.skipped
            ),
        ),
        line(
            "Produced messages (acked / nacked)",
            format!("{} / {}", messaging.producer.acked, messaging.producer.nacked),
        ),
    ]
}

pub fn view(stats: &AsyncState<SbomerStats>) -> DashboardView {
    let about = match (&stats.error, &stats.value) {
        (Some(error), _) => AboutSection::Failed {
            title: "Could not load service statistics".to_string(),
            message: error.to_string(),
        },
        (None, Some(stats)) => AboutSection::Loaded {
            lines: stat_lines(stats),
        },
        (None, None) => AboutSection::Loading,
    };

    DashboardView {
        heading: "SBOMer".to_string(),
        notice: Notice {
            kind: "info".to_string(),
            title: "In Development".to_string(),
            subtitle: "Features are actively being developed and may change.".to_string(),
        },
        about,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_dashboard_notice_and_loading() {
        let view = view(&AsyncState::default());
        assert_eq!(view.heading, "SBOMer");
        assert_eq!(view.notice.title, "In Development");
        assert_eq!(view.about, AboutSection::Loading);
    }

    #[test]
    fn test_stats_lines() {
        let mut stats = SbomerStats {
            version: "1.0.0".to_string(),
            uptime_millis: 90_000,
            ..Default::default()
        };
        stats.resources.generations.total = 12;

        let state = AsyncState {
            value: Some(stats),
            loading: false,
            error: None,
        };
        let AboutSection::Loaded { lines } = view(&state).about else {
            panic!("expected stats");
        };
        assert_eq!(lines[0].value, "1.0.0");
        assert_eq!(lines[1].value, "1 minute");
        assert_eq!(lines[2].value, "12");
    }

    #[test]
    fn test_stats_failure() {
        let state: AsyncState<SbomerStats> = AsyncState {
            value: None,
            loading: false,
            error: Some(ApiError::Transport {
                resource: "stats".to_string(),
                reason: "connection refused".to_string(),
            }),
        };
        assert!(matches!(view(&state).about, AboutSection::Failed { .. }));
    }
}
