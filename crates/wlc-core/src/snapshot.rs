//! Analysis snapshots: the durable output of one full WLC computation.
//!
//! A snapshot bundles the project horizon, the aggregate and per-component
//! life-cycle totals, and the stakeholder totals computed at one point in
//! time. Snapshots are immutable once built; the comparison engine takes two
//! of them and never re-derives their numbers from raw facts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

use crate::cashflow::{ComponentTotal, DistributionResult, PhaseTotal};
use crate::component::{ComponentId, CostKind};
use crate::error::{CoreError, CoreResult};
use crate::project::Project;
use crate::stakeholder::StakeholderTotal;

/// An immutable, fully-computed analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    /// Unique id of this snapshot
    pub id: Uuid,

    /// When the analysis was computed
    pub computed_at: DateTime<Utc>,

    /// Project horizon N the analysis was computed over
    pub project_lifespan: u32,

    /// Number of components in the analysis
    pub component_count: usize,

    /// Sum of nominal values across the cash-flow series
    pub total_nominal_wlc: f64,

    /// Sum of discounted values across the cash-flow series
    pub total_discounted_wlc: f64,

    /// Aggregate life-cycle totals per phase
    pub phase_totals: BTreeMap<CostKind, PhaseTotal>,

    /// Life-cycle totals per component
    pub components: BTreeMap<ComponentId, ComponentTotal>,

    /// Attributed totals per stakeholder
    pub stakeholders: BTreeMap<String, StakeholderTotal>,
}

/// On-disk envelope for a snapshot: payload plus integrity checksum.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEnvelope {
    /// SHA-256 of the compact-serialized snapshot payload
    checksum: String,

    snapshot: AnalysisSnapshot,
}

impl AnalysisSnapshot {
    /// Assemble a snapshot from the engines' outputs.
    pub fn build(
        project: &Project,
        distribution: &DistributionResult,
        stakeholders: BTreeMap<String, StakeholderTotal>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            computed_at: Utc::now(),
            project_lifespan: project.lifespan_years,
            component_count: distribution.components.len(),
            total_nominal_wlc: distribution.total_nominal_wlc,
            total_discounted_wlc: distribution.total_discounted_wlc,
            phase_totals: distribution.phase_totals.clone(),
            components: distribution.components.clone(),
            stakeholders,
        }
    }

    /// SHA-256 checksum of the compact-serialized snapshot.
    pub fn checksum(&self) -> CoreResult<String> {
        let json = serde_json::to_string(self)?;
        Ok(compute_checksum(&json))
    }

    /// Load a snapshot from a file, verifying its integrity checksum.
    ///
    /// A checksum mismatch is logged as a warning, not treated as an error:
    /// the payload may still be useful as the "previous" side of a
    /// comparison, and the caller sees the warning in the log.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        let envelope: SnapshotEnvelope =
            serde_json::from_str(&content).map_err(|e| CoreError::SnapshotMalformed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let actual = envelope.snapshot.checksum()?;
        if actual != envelope.checksum {
            log::warn!(
                "snapshot {} failed integrity check (stored {}, computed {})",
                path.display(),
                envelope.checksum,
                actual
            );
        }

        Ok(envelope.snapshot)
    }

    /// Save the snapshot to a file atomically.
    ///
    /// Uses write-to-temp-then-rename to prevent corruption. Temp file
    /// includes PID to avoid races from concurrent processes.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::IoWithPath {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let envelope = SnapshotEnvelope {
            checksum: self.checksum()?,
            snapshot: self.clone(),
        };

        let temp_path = path.with_extension(format!("json.{}.tmp", std::process::id()));
        let json = serde_json::to_string_pretty(&envelope)?;
        std::fs::write(&temp_path, &json).map_err(|e| CoreError::IoWithPath {
            path: temp_path.display().to_string(),
            source: e,
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            }
        })?;
        Ok(())
    }
}

/// Compute SHA-256 checksum of a string.
pub fn compute_checksum(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
