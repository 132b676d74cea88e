use foundation::math::{GeoCoord, Vec3};

use crate::config::OnsetConfig;
use crate::onset::OnsetRecord;

/// Stable index of a monitored city within its session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl EntityId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Origin,
    Hub,
    Normal,
}

impl Role {
    /// Origin wins over hub when a record sets both flags.
    pub fn from_flags(is_origin: bool, is_hub: bool) -> Self {
        match (is_origin, is_hub) {
            (true, _) => Role::Origin,
            (false, true) => Role::Hub,
            (false, false) => Role::Normal,
        }
    }

    pub fn base_intensity_scale(self, cfg: &OnsetConfig) -> f64 {
        match self {
            Role::Origin => cfg.origin_scale,
            Role::Hub => cfg.hub_scale,
            Role::Normal => cfg.normal_scale,
        }
    }
}

/// A monitored city. Immutable once its onset has been scheduled.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub coord: GeoCoord,
    pub role: Role,
}

impl Entity {
    pub fn is_origin(&self) -> bool {
        self.role == Role::Origin
    }

    pub fn is_hub(&self) -> bool {
        self.role == Role::Hub
    }
}

/// An entity with everything fixed at load time: globe position and onset.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub entity: Entity,
    pub position: Vec3,
    pub onset: OnsetRecord,
}

impl Marker {
    /// Pulse phase offset; the entity index keeps neighbours out of lockstep.
    pub fn phase_offset(&self) -> f64 {
        self.entity.id.0 as f64
    }
}
