use foundation::math::{GeoCoord, haversine_km};
use rand::Rng;
use tracing::debug;

use crate::config::OnsetConfig;
use crate::entity::{Entity, Role};
use crate::error::LoadError;

/// Onset data frozen for an entity when its session is built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OnsetRecord {
    /// Simulated day after which the entity is active. Includes `jitter_days`.
    pub onset_day: f64,
    /// Random offset drawn once at load. Always 0 for the origin.
    pub jitter_days: f64,
    pub base_intensity_scale: f64,
}

/// Assigns onset days from distance to the origin, role, and a one-off jitter.
#[derive(Debug, Clone)]
pub struct OnsetScheduler {
    cfg: OnsetConfig,
}

impl OnsetScheduler {
    pub fn new(cfg: OnsetConfig) -> Self {
        Self { cfg }
    }

    /// Whole days the wavefront needs to cover the distance from `origin`.
    pub fn raw_delay_days(&self, origin: GeoCoord, coord: GeoCoord) -> f64 {
        if self.cfg.km_per_day <= 0.0 {
            return 0.0;
        }
        (haversine_km(origin, coord) / self.cfg.km_per_day).floor()
    }

    /// Onset day before jitter.
    pub fn base_onset_day(&self, entity: &Entity, origin: GeoCoord) -> f64 {
        let raw = self.raw_delay_days(origin, entity.coord);
        match entity.role {
            Role::Origin => 0.0,
            Role::Hub => (raw * self.cfg.hub_delay_factor).max(self.cfg.hub_min_onset_day),
            Role::Normal => raw,
        }
    }

    /// Builds the record for one entity from an already drawn jitter.
    pub fn record(&self, entity: &Entity, origin: GeoCoord, jitter_days: f64) -> OnsetRecord {
        let jitter_days = if entity.is_origin() { 0.0 } else { jitter_days };
        OnsetRecord {
            onset_day: self.base_onset_day(entity, origin) + jitter_days,
            jitter_days,
            base_intensity_scale: entity.role.base_intensity_scale(&self.cfg),
        }
    }

    /// Draws a whole number of days, uniform over `0..jitter_span_days`.
    pub fn draw_jitter(&self, rng: &mut impl Rng) -> f64 {
        if self.cfg.jitter_span_days == 0 {
            return 0.0;
        }
        rng.random_range(0..self.cfg.jitter_span_days) as f64
    }

    /// Schedules every entity, in order. Runs once per session.
    pub fn schedule(
        &self,
        entities: &[Entity],
        rng: &mut impl Rng,
    ) -> Result<Vec<OnsetRecord>, LoadError> {
        let origin = find_origin(entities)?.coord;

        let records = entities
            .iter()
            .map(|entity| {
                let jitter = if entity.is_origin() {
                    0.0
                } else {
                    self.draw_jitter(rng)
                };
                let record = self.record(entity, origin, jitter);
                debug!(
                    city = %entity.name,
                    role = ?entity.role,
                    onset_day = record.onset_day,
                    jitter_days = record.jitter_days,
                    "scheduled onset"
                );
                record
            })
            .collect();

        Ok(records)
    }
}

/// The unique origin entity.
pub fn find_origin(entities: &[Entity]) -> Result<&Entity, LoadError> {
    let mut origins = entities.iter().filter(|e| e.is_origin());
    let first = origins.next().ok_or(LoadError::MissingOrigin)?;
    let rest: Vec<&Entity> = origins.collect();
    if rest.is_empty() {
        return Ok(first);
    }
    let names = std::iter::once(first)
        .chain(rest)
        .map(|e| e.name.clone())
        .collect();
    Err(LoadError::MultipleOrigins(names))
}
