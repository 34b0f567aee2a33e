use serde::{Deserialize, Serialize};

/// Which projective layer the mapper integrates depth into. Only `TsdfWithFreespace` maintains a freespace layer.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ProjectiveLayerType {
    Tsdf,
    TsdfWithFreespace,
    Occupancy,
    None,
}

impl ProjectiveLayerType {
    pub fn has_freespace_layer(self) -> bool {
        matches!(self, Self::TsdfWithFreespace)
    }
}

impl Default for ProjectiveLayerType {
    fn default() -> Self {
        Self::Tsdf
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Fixed for the lifetime of a tracker. Determines whether the freespace dirty set is ever populated.
    pub projective_layer_type: ProjectiveLayerType,
}

impl TrackerConfig {
    pub fn new(projective_layer_type: ProjectiveLayerType) -> Self {
        Self {
            projective_layer_type,
        }
    }

    pub fn with_freespace(enabled: bool) -> Self {
        Self::new(if enabled {
            ProjectiveLayerType::TsdfWithFreespace
        } else {
            ProjectiveLayerType::Tsdf
        })
    }

    pub fn has_freespace_layer(&self) -> bool {
        self.projective_layer_type.has_freespace_layer()
    }
}
