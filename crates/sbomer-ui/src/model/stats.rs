use serde::{Deserialize, Serialize};

/// Service statistics shown on the dashboard landing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SbomerStats {
    pub version: String,
    pub uptime: String,
    pub uptime_millis: u64,
    pub messaging: MessagingStats,
    pub resources: ResourceStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessagingStats {
    pub pnc_consumer: ConsumerStats,
    pub errata_consumer: ConsumerStats,
    pub producer: ProducerStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerStats {
    pub received: u64,
    pub processed: u64,
    pub skipped: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerStats {
    pub nacked: u64,
    pub acked: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceStats {
    pub generations: GenerationCounts,
    pub manifests: ManifestCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationCounts {
    pub total: u64,
    pub in_progress: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestCounts {
    pub total: u64,
}
