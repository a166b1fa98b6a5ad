use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::database::models::ReferenceEntity;
use crate::database::{DatabaseError, ReferenceReader};
use crate::types::{Dimension, Predicate, SalaryColumn};

/// Experience-level ids used when the experience_levels table is empty or
/// cannot be read. Matches the labels the seed loader assigns.
pub const EXPERIENCE_LEVEL_FALLBACK: [(&str, i64); 4] = [
    ("Junior", 1),
    ("Semi-Senior", 2),
    ("Senior", 3),
    ("Executive", 4),
];

/// Free-text filters as received from the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub job_title_text: Option<String>,
    pub location_text: Option<String>,
    pub experience_level_text: Option<String>,
}

impl FilterCriteria {
    pub fn new(job_title: Option<&str>, location: Option<&str>, experience_level: Option<&str>) -> Self {
        Self {
            job_title_text: job_title.map(str::to_string),
            location_text: location.map(str::to_string),
            experience_level_text: experience_level.map(str::to_string),
        }
    }
}

/// Resolved ids per filterable dimension. `None` means the dimension is not
/// filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedFilters {
    pub job_title: Option<i64>,
    pub location: Option<i64>,
    pub experience_level: Option<i64>,
}

impl ResolvedFilters {
    pub fn predicates(&self) -> Vec<Predicate> {
        [
            (SalaryColumn::JobTitle, self.job_title),
            (SalaryColumn::Location, self.location),
            (SalaryColumn::ExperienceLevel, self.experience_level),
        ]
        .into_iter()
        .filter_map(|(column, id)| id.map(|id| Predicate::new(column, id)))
        .collect()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.job_title.is_none() && self.location.is_none() && self.experience_level.is_none()
    }
}

/// Exact, case-sensitive label -> id map over one dimension
#[derive(Debug, Default)]
pub struct LabelIndex(HashMap<String, i64>);

impl LabelIndex {
    /// Null and empty labels are skipped; on a repeated label the lowest id wins
    pub fn from_entities(entities: &[ReferenceEntity]) -> Self {
        let mut map = HashMap::with_capacity(entities.len());
        let mut sorted: Vec<&ReferenceEntity> = entities.iter().collect();
        sorted.sort_by_key(|e| e.id);
        for entity in sorted {
            if let Some(label) = entity.usable_label() {
                map.entry(label.to_string()).or_insert(entity.id);
            }
        }
        Self(map)
    }

    pub fn get(&self, label: &str) -> Option<i64> {
        self.0.get(label).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Exact match against `EXPERIENCE_LEVEL_FALLBACK`
pub fn static_experience_level_id(text: &str) -> Option<i64> {
    EXPERIENCE_LEVEL_FALLBACK
        .iter()
        .find(|(label, _)| *label == text)
        .map(|(_, id)| *id)
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.is_empty())
}

/// Turns client filter text into reference ids. Maps are rebuilt from the
/// store on every call.
pub struct FilterResolver {
    references: Arc<dyn ReferenceReader>,
}

impl FilterResolver {
    pub fn new(references: Arc<dyn ReferenceReader>) -> Self {
        Self { references }
    }

    pub async fn resolve(&self, criteria: &FilterCriteria) -> Result<ResolvedFilters, DatabaseError> {
        let job_title = match non_empty(&criteria.job_title_text) {
            Some(text) => self.resolve_dynamic(Dimension::JobTitle, text).await?,
            None => None,
        };
        let location = match non_empty(&criteria.location_text) {
            Some(text) => self.resolve_dynamic(Dimension::Location, text).await?,
            None => None,
        };
        let experience_level = match non_empty(&criteria.experience_level_text) {
            Some(text) => self.resolve_experience_level(text).await,
            None => None,
        };

        let resolved = ResolvedFilters {
            job_title,
            location,
            experience_level,
        };
        debug!(?criteria, ?resolved, "resolved salary filters");
        Ok(resolved)
    }

    async fn resolve_dynamic(&self, dimension: Dimension, text: &str) -> Result<Option<i64>, DatabaseError> {
        let index = LabelIndex::from_entities(&self.references.list_all(dimension).await?);
        let id = index.get(text);
        if id.is_none() {
            debug!(%dimension, text, "no reference match, filter dropped");
        }
        Ok(id)
    }

    /// Dynamic table first; the static table when it is empty or unreadable
    async fn resolve_experience_level(&self, text: &str) -> Option<i64> {
        match self.references.list_all(Dimension::ExperienceLevel).await {
            Ok(rows) => {
                let index = LabelIndex::from_entities(&rows);
                if index.is_empty() {
                    debug!("experience_levels is empty, using static table");
                    static_experience_level_id(text)
                } else {
                    index.get(text)
                }
            }
            Err(e) => {
                warn!("experience_levels unreadable, using static table: {}", e);
                static_experience_level_id(text)
            }
        }
    }

    /// Case-insensitive substring search over a dimension's labels. For
    /// inspection only; filtering never goes through here.
    pub async fn inspect(&self, dimension: Dimension, needle: &str) -> Result<Vec<ReferenceEntity>, DatabaseError> {
        let needle = needle.to_lowercase();
        let rows = self.references.list_all(dimension).await?;
        Ok(rows
            .into_iter()
            .filter(|e| {
                e.usable_label()
                    .map(|l| l.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .collect())
    }
}
