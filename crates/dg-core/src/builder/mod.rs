//! Dungeon builder
//!
//! Turns a layout graph into placed rooms. A build attempt walks the graph
//! breadth-first from the entrance; every non-entrance node is attached to
//! its already-placed parent through a pair of facing doorways, retrying
//! other parent doorways until a candidate fits without overlapping anything.
//! Nothing is ever backtracked: one node that cannot be placed fails the
//! whole attempt, and the attempt is rebuilt from an empty room table.
//!
//! Two loops bound the search:
//! - the outer loop picks a random layout graph, up to
//!   `max_build_attempts` times;
//! - the inner loop rebuilds that graph, up to
//!   `max_rebuild_attempts_per_graph` times.

pub mod placement;

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use log::{debug, info, warn};

use crate::config::BuildSettings;
use crate::dungeon::DungeonLayout;
use crate::error::GenerationError;
use crate::instantiate::{NoopInstantiator, RoomInstance, RoomInstantiator};
use crate::layout::{LayoutGraph, LayoutNode, RoomId};
use crate::level::DungeonLevel;
use crate::rng::LevelRng;
use crate::room::{
    find_opposite, DoorwayLink, PlacedRoom, RoomKind, RoomTemplate, TemplateCatalog,
};

/// Result of placing a single node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed,
    /// No template of the node's kind (entrance only; other nodes fall
    /// through to [`PlacementOutcome::DoorwaysExhausted`])
    NoTemplate,
    /// Every parent doorway was tried and rejected
    DoorwaysExhausted,
}

/// Result of one attempt at building a whole graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    MissingEntrance,
    NoEntranceTemplate,
    /// This node could not be attached to its parent
    NodeExhausted(RoomId),
    /// This node's parent is not in the room table
    MissingParent(RoomId),
}

impl AttemptOutcome {
    /// Rebuilding the same graph cannot change this outcome
    fn is_deterministic_failure(&self) -> bool {
        matches!(
            self,
            AttemptOutcome::MissingEntrance | AttemptOutcome::NoEntranceTemplate
        )
    }
}

/// Why one parent doorway was rejected for a node
#[derive(Debug)]
enum CandidateOutcome {
    Accepted { room: PlacedRoom, link: DoorwayLink },
    NoTemplate,
    NoMatchingDoorway,
    Overlap(RoomId),
}

/// Owns the catalog, the room table and the RNG for a build
#[derive(Debug, Clone)]
pub struct DungeonBuilder {
    settings: BuildSettings,
    catalog: TemplateCatalog,
    rooms: Vec<PlacedRoom>,
    room_index: HashMap<RoomId, usize>,
    rng: LevelRng,
}

impl DungeonBuilder {
    pub fn new(settings: BuildSettings, rng: LevelRng) -> Self {
        Self {
            settings,
            catalog: TemplateCatalog::default(),
            rooms: Vec::new(),
            room_index: HashMap::new(),
            rng,
        }
    }

    /// A builder with default settings and a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(BuildSettings::default(), LevelRng::new(seed))
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Seed of the builder's RNG
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Restart the RNG; the next build is then reproducible from `seed`
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Replace the catalog. [`DungeonBuilder::generate`] does this itself;
    /// call it before driving [`DungeonBuilder::attempt_build`] directly.
    pub fn load_templates(&mut self, templates: &[RoomTemplate]) {
        self.catalog = TemplateCatalog::new(templates.iter().cloned());
    }

    /// Templates of the level currently being built
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Rooms placed so far by the current attempt, in placement order
    ///
    /// Empty after [`DungeonBuilder::generate`] returns: a successful build
    /// hands its rooms to the returned layout, a failed one discards them.
    pub fn rooms(&self) -> &[PlacedRoom] {
        &self.rooms
    }

    /// Look up a placed room by id
    pub fn room(&self, id: &RoomId) -> Option<&PlacedRoom> {
        self.room_index.get(id).map(|&i| &self.rooms[i])
    }

    /// Build a layout for `level` and commit it through the no-op instantiator
    pub fn generate_dungeon(&mut self, level: &DungeonLevel) -> Result<DungeonLayout, GenerationError> {
        self.generate(level, &mut NoopInstantiator)
    }

    /// Build a layout for `level`
    ///
    /// On success every placed room is passed to `instantiator` in placement
    /// order before the layout is returned.
    pub fn generate<I: RoomInstantiator + ?Sized>(
        &mut self,
        level: &DungeonLevel,
        instantiator: &mut I,
    ) -> Result<DungeonLayout, GenerationError> {
        if level.graphs.is_empty() {
            warn!("level '{}' has no layout graphs", level.name);
            return Err(GenerationError::NoLayoutGraphs);
        }
        self.load_templates(&level.templates);

        let seed = self.rng.seed();
        let mut rebuild_attempts = 0;

        for graph_attempt in 1..=self.settings.max_build_attempts {
            let Some(graph) = self.rng.choose(&level.graphs) else {
                return Err(GenerationError::NoLayoutGraphs);
            };
            debug!("graph attempt {}: using layout graph '{}'", graph_attempt, graph.name());

            for rebuild in 1..=self.settings.max_rebuild_attempts_per_graph {
                rebuild_attempts += 1;
                let outcome = self.attempt_build(graph);
                if outcome == AttemptOutcome::Success {
                    info!(
                        "built level '{}' from graph '{}' with {} rooms ({} attempts)",
                        level.name,
                        graph.name(),
                        self.rooms.len(),
                        rebuild_attempts
                    );
                    return Ok(self.commit(level, graph, seed, instantiator));
                }

                debug!("graph '{}' rebuild {} failed: {:?}", graph.name(), rebuild, outcome);
                if outcome.is_deterministic_failure() {
                    break;
                }
            }
        }

        self.clear_rooms();
        warn!(
            "could not build level '{}' after {} graph attempts",
            level.name, self.settings.max_build_attempts
        );
        Err(GenerationError::AttemptsExhausted {
            graph_attempts: self.settings.max_build_attempts,
            rebuild_attempts,
        })
    }

    /// One breadth-first pass over `graph`, starting from an empty room table
    pub fn attempt_build(&mut self, graph: &LayoutGraph) -> AttemptOutcome {
        self.clear_rooms();

        let Some(entrance) = graph.entrance() else {
            return AttemptOutcome::MissingEntrance;
        };

        let mut queue = VecDeque::new();
        let mut queued = HashSet::new();
        queue.push_back(entrance);
        queued.insert(&entrance.id);

        while let Some(node) = queue.pop_front() {
            for child in graph.children(node) {
                if queued.insert(&child.id) {
                    queue.push_back(child);
                }
            }

            if node.kind.is_entrance() {
                if self.place_entrance(node) != PlacementOutcome::Placed {
                    return AttemptOutcome::NoEntranceTemplate;
                }
                continue;
            }

            let Some(&parent_idx) = node.parent_id().and_then(|id| self.room_index.get(id)) else {
                return AttemptOutcome::MissingParent(node.id.clone());
            };
            if self.place_child(node, parent_idx) != PlacementOutcome::Placed {
                return AttemptOutcome::NodeExhausted(node.id.clone());
            }
        }

        AttemptOutcome::Success
    }

    fn place_entrance(&mut self, node: &LayoutNode) -> PlacementOutcome {
        let Some(template) = self.catalog.random_of_kind(&RoomKind::Entrance, &mut self.rng) else {
            return PlacementOutcome::NoTemplate;
        };
        let mut room = PlacedRoom::from_template(template, node);
        room.mark_positioned(None);
        self.insert_room(room);
        PlacementOutcome::Placed
    }

    /// Attach `node` to the room at `parent_idx`
    ///
    /// Each rejected parent doorway is marked unavailable, so the loop ends
    /// once the parent runs out of doorways.
    fn place_child(&mut self, node: &LayoutNode, parent_idx: usize) -> PlacementOutcome {
        loop {
            let available = self.rooms[parent_idx].available_doorways();
            let Some(&door_idx) = self.rng.choose(&available) else {
                return PlacementOutcome::DoorwaysExhausted;
            };

            match self.try_candidate(node, parent_idx, door_idx) {
                CandidateOutcome::Accepted { mut room, link } => {
                    self.rooms[parent_idx].doorways_mut()[link.parent_doorway].mark_connected();
                    room.doorways_mut()[link.doorway].mark_connected();
                    room.mark_positioned(Some(link));
                    self.insert_room(room);
                    return PlacementOutcome::Placed;
                }
                rejected => {
                    debug!(
                        "{}: doorway {} of {} rejected: {:?}",
                        node.id, door_idx, self.rooms[parent_idx].id, rejected
                    );
                    self.rooms[parent_idx].doorways_mut()[door_idx].mark_unavailable();
                }
            }
        }
    }

    fn try_candidate(&mut self, node: &LayoutNode, parent_idx: usize, door_idx: usize) -> CandidateOutcome {
        let parent = &self.rooms[parent_idx];
        let parent_door = parent.doorways()[door_idx];
        let Some(parent_door_world) = parent.doorway_world_position(door_idx) else {
            return CandidateOutcome::NoMatchingDoorway;
        };

        let Some(template) =
            self.catalog
                .consistent_with_parent(&node.kind, parent_door.orientation, &mut self.rng)
        else {
            return CandidateOutcome::NoTemplate;
        };

        let mut room = PlacedRoom::from_template(template, node);
        let Some(doorway) = find_opposite(&parent_door, room.doorways()) else {
            return CandidateOutcome::NoMatchingDoorway;
        };

        let lower = placement::candidate_lower(
            parent_door_world,
            &room.doorways()[doorway],
            room.template_bounds.lower,
        );
        room.set_world_lower(lower);

        if let Some(hit) = placement::first_overlap(&room.bounds, &room.id, &self.rooms) {
            return CandidateOutcome::Overlap(hit.id.clone());
        }

        CandidateOutcome::Accepted {
            room,
            link: DoorwayLink {
                parent_doorway: door_idx,
                doorway,
            },
        }
    }

    fn insert_room(&mut self, room: PlacedRoom) {
        self.room_index.insert(room.id.clone(), self.rooms.len());
        self.rooms.push(room);
    }

    fn clear_rooms(&mut self) {
        self.rooms.clear();
        self.room_index.clear();
    }

    /// Hand the finished rooms to the instantiator and move them into a layout
    fn commit<I: RoomInstantiator + ?Sized>(
        &mut self,
        level: &DungeonLevel,
        graph: &LayoutGraph,
        seed: u64,
        instantiator: &mut I,
    ) -> DungeonLayout {
        for room in &self.rooms {
            instantiator.instantiate(room, &RoomInstance::for_room(room));
        }
        self.room_index.clear();
        DungeonLayout {
            level_name: level.name.clone(),
            graph_name: graph.name().to_string(),
            seed,
            rooms: std::mem::take(&mut self.rooms),
        }
    }
}
