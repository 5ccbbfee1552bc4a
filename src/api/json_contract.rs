use serde::{Deserialize, Serialize};

use crate::core::{TileRect, Viewport};
use crate::error::{TreemapError, TreemapResult};
use crate::interaction::TooltipState;
use crate::render::Renderer;

use super::TreemapChart;

pub const TREEMAP_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub value: f64,
    pub rect: TileRect,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntrySnapshot {
    pub name: String,
    pub color: String,
}

/// Deterministic description of a laid-out chart, for diffing against other
/// implementations or earlier runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapSnapshot {
    pub viewport: Viewport,
    pub legend_viewport: Viewport,
    pub total_value: f64,
    pub tiles: Vec<TileSnapshot>,
    pub legend: Vec<LegendEntrySnapshot>,
    pub tooltip: TooltipState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: TreemapSnapshot,
}

impl TreemapSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> TreemapResult<String> {
        let payload = TreemapSnapshotJsonContractV1 {
            schema_version: TREEMAP_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TreemapError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> TreemapResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<TreemapSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: TreemapSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            TreemapError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != TREEMAP_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(TreemapError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> TreemapChart<R> {
    #[must_use]
    pub fn snapshot(&self) -> TreemapSnapshot {
        let hierarchy = self.hierarchy();
        TreemapSnapshot {
            viewport: self.config().viewport,
            legend_viewport: self.config().legend_viewport,
            total_value: hierarchy.node(hierarchy.root()).value,
            tiles: self
                .treemap_frame()
                .tiles
                .iter()
                .map(|tile| TileSnapshot {
                    id: tile.id.clone(),
                    name: tile.name.clone(),
                    category: tile.category.clone(),
                    value: tile.value,
                    rect: TileRect::new(
                        tile.rect.x,
                        tile.rect.y,
                        tile.rect.x + tile.rect.width,
                        tile.rect.y + tile.rect.height,
                    ),
                    fill: tile.rect.fill_color.to_hex(),
                })
                .collect(),
            legend: self
                .legend_entries()
                .iter()
                .map(|entry| LegendEntrySnapshot {
                    name: entry.name.clone(),
                    color: entry.color.to_hex(),
                })
                .collect(),
            tooltip: self.tooltip_state().clone(),
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> TreemapResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
