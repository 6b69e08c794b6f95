//! Template catalog
//!
//! Indexes the templates of one level by id and by kind.

use hashbrown::HashMap;

use super::{CorridorAxis, Orientation, RoomKind, RoomTemplate, TemplateId};
use crate::rng::LevelRng;

/// Lookup tables over a level's room templates
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<RoomTemplate>,
    by_id: HashMap<TemplateId, usize>,
    by_kind: HashMap<RoomKind, Vec<usize>>,
}

impl TemplateCatalog {
    /// Build a catalog. When two templates share an id the first one wins.
    pub fn new(templates: impl IntoIterator<Item = RoomTemplate>) -> Self {
        let mut catalog = Self::default();
        for template in templates {
            if catalog.by_id.contains_key(&template.id) {
                log::warn!("duplicate room template id {}, keeping the first", template.id);
                continue;
            }
            let idx = catalog.templates.len();
            catalog.by_id.insert(template.id.clone(), idx);
            catalog
                .by_kind
                .entry(template.kind.clone())
                .or_default()
                .push(idx);
            catalog.templates.push(template);
        }
        catalog
    }

    /// Look a template up by id
    pub fn get(&self, id: &TemplateId) -> Option<&RoomTemplate> {
        self.by_id.get(id).map(|&idx| &self.templates[idx])
    }

    /// All templates of a kind, in catalog order
    pub fn of_kind<'a>(&'a self, kind: &RoomKind) -> impl Iterator<Item = &'a RoomTemplate> + 'a {
        self.by_kind
            .get(kind)
            .into_iter()
            .flatten()
            .map(|&idx| &self.templates[idx])
    }

    /// Check if any template has this kind
    pub fn has_kind(&self, kind: &RoomKind) -> bool {
        self.by_kind.get(kind).is_some_and(|v| !v.is_empty())
    }

    /// Pick a template of the given kind, uniformly
    pub fn random_of_kind(&self, kind: &RoomKind, rng: &mut LevelRng) -> Option<&RoomTemplate> {
        let candidates = self.by_kind.get(kind)?;
        rng.choose(candidates).map(|&idx| &self.templates[idx])
    }

    /// Pick a template for a node that hangs off a parent doorway facing
    /// `parent_facing`
    ///
    /// Corridor nodes get a corridor template running along the doorway's
    /// axis; every other node gets a template of its own kind.
    pub fn consistent_with_parent(
        &self,
        kind: &RoomKind,
        parent_facing: Orientation,
        rng: &mut LevelRng,
    ) -> Option<&RoomTemplate> {
        if kind.is_corridor() {
            let axis = CorridorAxis::for_orientation(parent_facing)?;
            self.random_of_kind(&RoomKind::Corridor(Some(axis)), rng)
        } else {
            self.random_of_kind(kind, rng)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
