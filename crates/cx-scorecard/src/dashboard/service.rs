use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use super::source::{DatasetSource, SourceError};
use crate::dataset::ScorecardDataset;
use crate::scoring::domain::{Entity, EntityId};
use crate::scoring::{EntityScorecard, JourneyTrend, ScorecardEngine, TrendPoint};

/// Composes a dataset source with the scoring engine for the dashboard routes.
pub struct DashboardService<S> {
    source: Arc<S>,
    engine: Arc<ScorecardEngine>,
}

impl<S> DashboardService<S>
where
    S: DatasetSource + 'static,
{
    pub fn new(source: Arc<S>, engine: ScorecardEngine) -> Self {
        Self {
            source,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &ScorecardEngine {
        &self.engine
    }

    pub fn entities(&self) -> Result<Vec<Entity>, DashboardError> {
        let mut entities = self.source.snapshot()?.entities;
        entities.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(entities)
    }

    #[instrument(skip(self), fields(entity = %entity_id))]
    pub fn scorecard(&self, entity_id: &EntityId) -> Result<EntityScorecardView, DashboardError> {
        let (entity, scoped) = self.scoped(entity_id)?;
        let scorecard = self.engine.scorecard(&scoped.input());
        debug!(entity_score = scorecard.entity_score, "scorecard computed");

        Ok(EntityScorecardView { entity, scorecard })
    }

    #[instrument(skip(self), fields(entity = %entity_id))]
    pub fn trend(&self, entity_id: &EntityId) -> Result<EntityTrendView, DashboardError> {
        let (entity, scoped) = self.scoped(entity_id)?;
        let points = self.engine.trend(&scoped.input());

        Ok(EntityTrendView { entity, points })
    }

    pub fn journey_trends(&self) -> Result<Vec<JourneyTrend>, DashboardError> {
        let dataset = self.source.snapshot()?;
        Ok(self.engine.journey_trends(&dataset.input()))
    }

    fn scoped(&self, entity_id: &EntityId) -> Result<(Entity, ScorecardDataset), DashboardError> {
        let dataset = self.source.snapshot()?;
        let entity = dataset
            .entity(entity_id)
            .cloned()
            .ok_or_else(|| DashboardError::UnknownEntity(entity_id.clone()))?;

        Ok((entity, dataset.scoped_to(entity_id)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
    #[error(transparent)]
    Source(#[from] SourceError),
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityScorecardView {
    pub entity: Entity,
    #[serde(flatten)]
    pub scorecard: EntityScorecard,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityTrendView {
    pub entity: Entity,
    pub points: Vec<TrendPoint>,
}
