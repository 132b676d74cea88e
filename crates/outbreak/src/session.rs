use foundation::math::project_to_sphere;
use rand::Rng;
use tracing::info;

use crate::config::OnsetConfig;
use crate::dataset::CityRecord;
use crate::entity::{Entity, EntityId, Marker};
use crate::error::LoadError;
use crate::onset::OnsetScheduler;
use crate::timeline::Timeline;

/// Everything fixed for the lifetime of one visualization: markers with their
/// frozen onsets, and the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    markers: Vec<Marker>,
    timeline: Timeline,
}

impl Session {
    /// Places every city, schedules onsets once, and freezes the result.
    ///
    /// Fails if the cities do not contain exactly one origin.
    pub fn build(
        cities: &[CityRecord],
        timeline: Timeline,
        cfg: &OnsetConfig,
        rng: &mut impl Rng,
    ) -> Result<Self, LoadError> {
        let entities: Vec<Entity> = cities
            .iter()
            .enumerate()
            .map(|(i, city)| Entity {
                id: EntityId(i as u32),
                name: city.name.clone(),
                coord: city.coord(),
                role: city.role(),
            })
            .collect();

        let onsets = OnsetScheduler::new(cfg.clone()).schedule(&entities, rng)?;

        let markers: Vec<Marker> = entities
            .into_iter()
            .zip(onsets)
            .map(|(entity, onset)| Marker {
                position: project_to_sphere(entity.coord, cfg.globe_radius),
                entity,
                onset,
            })
            .collect();

        info!(
            cities = markers.len(),
            days = timeline.len(),
            "outbreak session built"
        );

        Ok(Self { markers, timeline })
    }

    /// Wraps markers whose onsets were fixed elsewhere.
    pub fn from_parts(markers: Vec<Marker>, timeline: Timeline) -> Self {
        Self { markers, timeline }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, id: EntityId) -> Option<&Marker> {
        self.markers.get(id.index())
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::config::OnsetConfig;
    use crate::dataset::{CityRecord, builtin_cities};
    use crate::entity::{EntityId, Role};
    use crate::error::LoadError;
    use crate::timeline::Timeline;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build(cities: &[CityRecord], seed: u64) -> Result<Session, LoadError> {
        Session::build(
            cities,
            Timeline::default(),
            &OnsetConfig::default(),
            &mut StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn builtin_cities_schedule_cleanly() {
        let session = build(&builtin_cities(), 5).unwrap();
        assert_eq!(session.markers().len(), 10);

        let wuhan = session.marker(EntityId(0)).unwrap();
        assert_eq!(wuhan.entity.role, Role::Origin);
        assert_eq!(wuhan.onset.onset_day, 0.0);
        assert!((wuhan.position.length() - 80.0).abs() < 1e-9);

        for m in session.markers() {
            if m.entity.role == Role::Hub {
                assert!(m.onset.onset_day >= 10.0);
            }
        }
    }

    #[test]
    fn onsets_are_frozen_per_build() {
        let a = build(&builtin_cities(), 9).unwrap();
        let b = build(&builtin_cities(), 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_missing_origin() {
        let cities = vec![CityRecord::new("A", 0.0, 0.0), CityRecord::new("B", 1.0, 1.0)];
        assert_eq!(build(&cities, 0), Err(LoadError::MissingOrigin));
    }
}
