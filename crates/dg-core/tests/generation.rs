use dg_core::{
    AttemptOutcome, BuildSettings, CorridorAxis, Doorway, DungeonBuilder, DungeonLayout,
    DungeonLevel, GenerationError, GridPos, LayoutGraph, LevelRng, Orientation, PlacedRoom,
    RoomId, RoomInstance, RoomKind, RoomTemplate, DEMO_LEVEL_JSON,
};

fn demo_level() -> DungeonLevel {
    DungeonLevel::from_json_str(DEMO_LEVEL_JSON).expect("demo level should load")
}

fn ns_corridor() -> RoomTemplate {
    RoomTemplate::new(
        "ns",
        RoomKind::Corridor(Some(CorridorAxis::NorthSouth)),
        GridPos::ZERO,
        GridPos::new(2, 4),
    )
    .with_doorway(Doorway::new(GridPos::new(1, 4), Orientation::North))
    .with_doorway(Doorway::new(GridPos::new(1, 0), Orientation::South))
}

fn ew_corridor() -> RoomTemplate {
    RoomTemplate::new(
        "ew",
        RoomKind::Corridor(Some(CorridorAxis::EastWest)),
        GridPos::ZERO,
        GridPos::new(4, 2),
    )
    .with_doorway(Doorway::new(GridPos::new(4, 1), Orientation::East))
    .with_doorway(Doorway::new(GridPos::new(0, 1), Orientation::West))
}

fn level(templates: Vec<RoomTemplate>, graphs: Vec<LayoutGraph>) -> DungeonLevel {
    DungeonLevel {
        name: "test".into(),
        templates,
        graphs,
    }
}

fn assert_no_overlaps(layout: &DungeonLayout) {
    for (i, a) in layout.rooms.iter().enumerate() {
        for b in &layout.rooms[i + 1..] {
            assert!(
                !a.bounds.intersects(&b.bounds),
                "{} {:?} overlaps {} {:?}",
                a.id,
                a.bounds,
                b.id,
                b.bounds
            );
        }
    }
}

fn assert_doorways_adjacent(layout: &DungeonLayout) {
    for child in layout.rooms.iter().filter(|r| r.parent_id.is_some()) {
        let link = child.entry().expect("non-entrance room has an entry link");
        let parent = layout.room(child.parent_id.as_ref().unwrap()).unwrap();

        let parent_door = parent.doorways()[link.parent_doorway];
        let child_door = child.doorways()[link.doorway];
        assert!(parent_door.is_connected() && child_door.is_connected());
        assert_eq!(child_door.orientation, parent_door.orientation.opposite());

        let p = parent.doorway_world_position(link.parent_doorway).unwrap();
        let c = child.doorway_world_position(link.doorway).unwrap();
        let expected = match parent_door.orientation {
            Orientation::North => GridPos::new(p.x, p.y + 1),
            Orientation::South => GridPos::new(p.x, p.y - 1),
            Orientation::East => GridPos::new(p.x + 1, p.y),
            Orientation::West => GridPos::new(p.x - 1, p.y),
            Orientation::None => panic!("connected doorway without a facing"),
        };
        assert_eq!(c, expected, "{} -> {}", parent.id, child.id);
    }
}

#[test]
fn test_demo_level_builds() {
    let lvl = demo_level();
    assert!(lvl.validate(&BuildSettings::default()).is_empty());

    let mut builder = DungeonBuilder::with_seed(42);
    let layout = builder.generate_dungeon(&lvl).unwrap();

    let graph = lvl
        .graphs
        .iter()
        .find(|g| g.name() == layout.graph_name)
        .unwrap();
    assert_eq!(layout.len(), graph.len());
    assert_no_overlaps(&layout);
    assert_doorways_adjacent(&layout);
}

#[test]
fn test_entrance_and_parents() {
    let lvl = demo_level();
    let layout = DungeonBuilder::with_seed(9).generate_dungeon(&lvl).unwrap();

    let entrance = &layout.rooms[0];
    assert_eq!(entrance.kind, RoomKind::Entrance);
    assert!(entrance.parent_id.is_none());
    assert!(entrance.is_previously_visited());
    assert_eq!(entrance.world_position(), GridPos::ZERO);

    // breadth-first: a parent is always placed before its children
    for (i, room) in layout.rooms.iter().enumerate().skip(1) {
        assert!(!room.is_previously_visited());
        let parent_id = room.parent_id.as_ref().unwrap();
        let parent_pos = layout.rooms.iter().position(|r| &r.id == parent_id).unwrap();
        assert!(parent_pos < i);
    }
}

#[test]
fn test_corridors_follow_doorway_axis() {
    let lvl = demo_level();
    let layout = DungeonBuilder::with_seed(5).generate_dungeon(&lvl).unwrap();

    for room in layout.rooms.iter().filter(|r| r.kind.is_corridor()) {
        let parent = layout.room(room.parent_id.as_ref().unwrap()).unwrap();
        let facing = parent.doorways()[room.entry().unwrap().parent_doorway].orientation;
        assert_eq!(
            room.kind,
            RoomKind::Corridor(CorridorAxis::for_orientation(facing))
        );
    }
}

#[test]
fn test_same_seed_same_layout() {
    let lvl = demo_level();
    let a = DungeonBuilder::with_seed(1234).generate_dungeon(&lvl).unwrap();
    let b = DungeonBuilder::with_seed(1234).generate_dungeon(&lvl).unwrap();
    assert_eq!(a, b);

    let mut builder = DungeonBuilder::with_seed(0);
    builder.reseed(1234);
    let c = builder.generate_dungeon(&lvl).unwrap();
    assert_eq!(a, c);
}

#[test]
fn test_templates_untouched_by_build() {
    let lvl = demo_level();
    let before = lvl.templates.clone();
    let layout = DungeonBuilder::with_seed(77).generate_dungeon(&lvl).unwrap();

    assert!(layout.rooms.iter().any(|r| r.doorways().iter().any(Doorway::is_connected)));
    assert_eq!(lvl.templates, before);
    assert!(lvl
        .templates
        .iter()
        .all(|t| t.doorways().iter().all(Doorway::is_available)));
}

#[test]
fn test_entrance_only_graph() {
    let entrance = RoomTemplate::new("hall", RoomKind::Entrance, GridPos::ZERO, GridPos::new(6, 6))
        .with_doorway(Doorway::new(GridPos::new(3, 6), Orientation::North))
        .with_doorway(Doorway::new(GridPos::new(6, 3), Orientation::East));
    let mut graph = LayoutGraph::new("lonely");
    graph.add_node("entrance", RoomKind::Entrance).unwrap();

    let lvl = level(vec![entrance], vec![graph]);
    let layout = DungeonBuilder::with_seed(42).generate_dungeon(&lvl).unwrap();

    assert_eq!(layout.len(), 1);
    assert!(layout.rooms[0].doorways().iter().all(|d| !d.is_connected()));
    assert!(layout.connections().is_empty());

    let (_, plan) = layout.instances().next().unwrap();
    assert_eq!(plan.seals.len(), 2);
}

#[test]
fn test_missing_room_template_fails() {
    let entrance = RoomTemplate::new("hall", RoomKind::Entrance, GridPos::ZERO, GridPos::new(6, 6))
        .with_doorway(Doorway::new(GridPos::new(3, 6), Orientation::North));
    let mut graph = LayoutGraph::new("needs-a-vault");
    graph.add_node("entrance", RoomKind::Entrance).unwrap();
    graph.add_node("c1", RoomKind::Corridor(None)).unwrap();
    graph.add_node("vault", RoomKind::standard("vault")).unwrap();
    graph.connect(&"entrance".into(), &"c1".into(), 3).unwrap();
    graph.connect(&"c1".into(), &"vault".into(), 3).unwrap();

    let lvl = level(vec![entrance, ns_corridor(), ew_corridor()], vec![graph]);
    let settings = BuildSettings {
        max_build_attempts: 2,
        max_rebuild_attempts_per_graph: 5,
        ..BuildSettings::default()
    };
    let mut builder = DungeonBuilder::new(settings, LevelRng::new(42));
    builder.load_templates(&lvl.templates);
    assert_eq!(
        builder.attempt_build(&lvl.graphs[0]),
        AttemptOutcome::NodeExhausted(RoomId::from("vault"))
    );
    assert_eq!(
        builder.generate_dungeon(&lvl).unwrap_err(),
        GenerationError::AttemptsExhausted {
            graph_attempts: 2,
            rebuild_attempts: 10,
        }
    );
    assert!(builder.rooms().is_empty());
}

#[test]
fn test_colliding_siblings_exhaust_attempts() {
    // a single doorway on the entrance cannot carry two corridors
    let entrance = RoomTemplate::new("hall", RoomKind::Entrance, GridPos::ZERO, GridPos::new(4, 4))
        .with_doorway(Doorway::new(GridPos::new(2, 4), Orientation::North));
    let mut graph = LayoutGraph::new("crowded");
    graph.add_node("entrance", RoomKind::Entrance).unwrap();
    graph.add_node("c1", RoomKind::Corridor(None)).unwrap();
    graph.add_node("c2", RoomKind::Corridor(None)).unwrap();
    graph.connect(&"entrance".into(), &"c1".into(), 3).unwrap();
    graph.connect(&"entrance".into(), &"c2".into(), 3).unwrap();

    let lvl = level(vec![entrance, ns_corridor(), ew_corridor()], vec![graph]);
    let settings = BuildSettings {
        max_build_attempts: 3,
        max_rebuild_attempts_per_graph: 4,
        ..BuildSettings::default()
    };
    let mut builder = DungeonBuilder::new(settings, LevelRng::new(42));
    builder.load_templates(&lvl.templates);
    assert_eq!(
        builder.attempt_build(&lvl.graphs[0]),
        AttemptOutcome::NodeExhausted(RoomId::from("c2"))
    );
    assert_eq!(
        builder.generate_dungeon(&lvl).unwrap_err(),
        GenerationError::AttemptsExhausted {
            graph_attempts: 3,
            rebuild_attempts: 12,
        }
    );
}

#[test]
fn test_overlapping_candidates_are_rejected() {
    // the entrance doorways are too close for two corridors side by side
    let entrance = RoomTemplate::new("hall", RoomKind::Entrance, GridPos::ZERO, GridPos::new(4, 4))
        .with_doorway(Doorway::new(GridPos::new(1, 4), Orientation::North))
        .with_doorway(Doorway::new(GridPos::new(3, 4), Orientation::North));
    let tall = RoomTemplate::new(
        "tall",
        RoomKind::Corridor(Some(CorridorAxis::NorthSouth)),
        GridPos::ZERO,
        GridPos::new(2, 4),
    )
    .with_doorway(Doorway::new(GridPos::new(1, 0), Orientation::South));

    let mut graph = LayoutGraph::new("twins");
    graph.add_node("entrance", RoomKind::Entrance).unwrap();
    graph.add_node("c1", RoomKind::Corridor(None)).unwrap();
    graph.add_node("c2", RoomKind::Corridor(None)).unwrap();
    graph.connect(&"entrance".into(), &"c1".into(), 3).unwrap();
    graph.connect(&"entrance".into(), &"c2".into(), 3).unwrap();

    let lvl = level(vec![entrance, tall], vec![graph]);
    let mut builder = DungeonBuilder::with_seed(42);
    builder.load_templates(&lvl.templates);
    assert_eq!(
        builder.attempt_build(&lvl.graphs[0]),
        AttemptOutcome::NodeExhausted(RoomId::from("c2"))
    );
    let entrance_room = builder.room(&"entrance".into()).unwrap();
    assert_eq!(
        entrance_room.doorways().iter().filter(|d| d.is_connected()).count(),
        1
    );
    assert!(entrance_room.available_doorways().is_empty());
}

#[test]
fn test_east_doorway_mates_with_west() {
    let entrance = RoomTemplate::new("hall", RoomKind::Entrance, GridPos::ZERO, GridPos::new(4, 4))
        .with_doorway(Doorway::new(GridPos::new(4, 2), Orientation::East));
    let mut graph = LayoutGraph::new("east");
    graph.add_node("entrance", RoomKind::Entrance).unwrap();
    graph.add_node("c1", RoomKind::Corridor(None)).unwrap();
    graph.connect(&"entrance".into(), &"c1".into(), 3).unwrap();

    let lvl = level(vec![entrance, ns_corridor(), ew_corridor()], vec![graph]);
    let layout = DungeonBuilder::with_seed(42).generate_dungeon(&lvl).unwrap();

    let corridor = layout.room(&"c1".into()).unwrap();
    let link = corridor.entry().unwrap();
    assert_eq!(corridor.template_id.0, "ew");
    assert_eq!(corridor.doorways()[link.doorway].orientation, Orientation::West);
    assert_eq!(corridor.bounds.lower, GridPos::new(5, 1));
    assert_eq!(
        layout.connections()[0].child_doorway,
        GridPos::new(5, 2)
    );
}

#[test]
fn test_instantiator_gets_seal_plans() {
    let lvl = demo_level();
    let mut plans: Vec<(RoomId, RoomInstance)> = Vec::new();
    let layout = DungeonBuilder::with_seed(11)
        .generate(&lvl, &mut |room: &PlacedRoom, plan: &RoomInstance| {
            plans.push((room.id.clone(), plan.clone()));
        })
        .unwrap();

    assert_eq!(plans.len(), layout.len());
    for ((id, plan), room) in plans.iter().zip(&layout.rooms) {
        assert_eq!(id, &room.id);
        assert_eq!(plan.world_position, room.world_position());
        assert_eq!(plan.seals.len(), room.unconnected_doorways().count());
    }
}
