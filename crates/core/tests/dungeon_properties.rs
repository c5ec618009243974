use proptest::prelude::*;
use warren_core::{
    Direction, DungeonConfig, DungeonError, MapGenerator, RoomGraph, RoomId, RoomTag, find_path,
};

fn scenario_config() -> DungeonConfig {
    DungeonConfig {
        width: 20,
        height: 20,
        room_size: 1,
        branch_lengths: vec![7, 5, 5],
        max_same_direction: 2,
        collectibles: 3,
    }
}

fn assert_door_pairs(graph: &RoomGraph) {
    for room in graph.rooms() {
        for direction in room.doors().iter() {
            let neighbor = graph
                .try_get(graph.step(room.pos(), direction))
                .unwrap_or_else(|| panic!("door {direction:?} of {:?} leads nowhere", room.pos()));
            assert!(
                neighbor.has_door(direction.opposite()),
                "door {direction:?} of {:?} has no reciprocal",
                room.pos()
            );
        }
    }
    assert_eq!(graph.first_door_violation(), None);
}

fn assert_connected_from_home(graph: &RoomGraph) {
    let home = graph.home().expect("generated dungeons have a Home");
    for room in graph.rooms() {
        assert!(
            find_path(graph, home, room.id()).is_some(),
            "room at {:?} is unreachable from Home",
            room.pos()
        );
    }
}

#[test]
fn reference_scenario_builds_one_exit_per_grown_branch() {
    let mut full_layouts = 0;
    for seed in 0..32 {
        let dungeon = MapGenerator::new(scenario_config(), seed).generate().expect("feasible");
        let graph = &dungeon.graph;

        let grown = dungeon.branches.iter().filter(|branch| branch.built > 0).count();
        assert_eq!(graph.count_tagged(RoomTag::Exit), grown, "seed={seed}");
        assert_eq!(dungeon.exits().count(), grown);
        assert_eq!(graph.count_tagged(RoomTag::Home), 1);
        for branch in &dungeon.branches {
            assert!(branch.built <= branch.requested, "seed={seed}: {branch:?} overgrew");
        }
        assert!(dungeon.branches[0].built >= 1, "the first branch always leaves an empty Home");

        let home = graph.home().expect("Home exists");
        assert!(!graph[home].doors().is_empty(), "Home must have at least one door");
        assert_eq!(graph.len(), 1 + dungeon.branches.iter().map(|b| b.built).sum::<usize>());
        if grown == 3 {
            full_layouts += 1;
        }
    }
    assert!(full_layouts > 0, "three exits should be the common case");
}

#[test]
fn generated_dungeons_are_connected_and_door_paired() {
    for seed in [1_u64, 2, 3, 40, 99, 321, 1_024, 999_999] {
        let graph = warren_core::build_dungeon(&scenario_config(), seed).expect("feasible");
        assert_door_pairs(&graph);
        assert_connected_from_home(&graph);
    }
}

#[test]
fn collectibles_match_config_and_skip_home_and_exits() {
    for seed in 0..16 {
        let dungeon = MapGenerator::new(scenario_config(), seed).generate().expect("feasible");
        let graph = &dungeon.graph;
        assert_eq!(graph.count_tagged(RoomTag::Collectible), 3, "seed={seed}");
        assert_eq!(dungeon.collectibles.len(), 3);
        let home = graph.home().expect("Home exists");
        assert_eq!(graph[home].tag(), RoomTag::Home);
        for exit in dungeon.exits() {
            assert_eq!(graph[exit].tag(), RoomTag::Exit, "seed={seed}: exit was retagged");
        }
    }
}

#[test]
fn paths_are_symmetric_in_length() {
    let graph = warren_core::build_dungeon(&scenario_config(), 77).expect("feasible");
    let ids: Vec<RoomId> = graph.room_ids();
    for &a in ids.iter().step_by(3) {
        for &b in ids.iter().step_by(4) {
            let forward = find_path(&graph, a, b).expect("connected");
            let backward = find_path(&graph, b, a).expect("connected");
            assert_eq!(forward.len(), backward.len());
        }
    }
}

#[test]
fn path_rooms_are_linked_by_doors() {
    let graph = warren_core::build_dungeon(&scenario_config(), 5).expect("feasible");
    let home = graph.home().expect("Home exists");
    for room in graph.rooms() {
        let path = find_path(&graph, home, room.id()).expect("connected");
        assert_eq!(path.start(), home);
        assert_eq!(path.target(), room.id());
        for pair in path.rooms().windows(2) {
            let linked = Direction::ALL
                .into_iter()
                .any(|direction| graph.neighbor(pair[0], direction) == Some(pair[1]));
            assert!(linked, "consecutive path rooms must share a door");
        }
    }
}

#[test]
fn oversized_request_is_refused_without_a_graph() {
    let config = DungeonConfig {
        width: 4,
        height: 4,
        branch_lengths: vec![8, 8],
        collectibles: 0,
        ..DungeonConfig::default()
    };
    let err = MapGenerator::new(config, 1).generate().expect_err("16 rooms do not fit in 16 cells");
    assert!(matches!(err, DungeonError::InfeasibleConfiguration(_)), "got {err}");
}

#[test]
fn scaled_rooms_keep_the_same_topology_rules() {
    let config = DungeonConfig { room_size: 4, ..scenario_config() };
    let graph = warren_core::build_dungeon(&config, 31).expect("feasible");
    for room in graph.rooms() {
        assert_eq!(room.pos().x % 4, 0);
        assert_eq!(room.pos().y % 4, 0);
        assert!(room.pos().x < 80 && room.pos().y < 80);
    }
    assert_door_pairs(&graph);
    assert_connected_from_home(&graph);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]
    #[test]
    fn random_seeds_keep_dungeons_connected(
        seed in any::<u64>(),
        lengths in proptest::collection::vec(1_usize..12, 1..=4),
        max_same in 1_u32..4,
    ) {
        let interior = lengths.iter().sum::<usize>() - lengths.len();
        let config = DungeonConfig {
            width: 16,
            height: 16,
            room_size: 1,
            branch_lengths: lengths,
            max_same_direction: max_same,
            collectibles: 0,
        };
        let dungeon = MapGenerator::new(config, seed).generate();
        let dungeon = match dungeon {
            Ok(dungeon) => dungeon,
            Err(err) => return Err(TestCaseError::fail(format!("seed={seed} failed: {err}"))),
        };
        prop_assert!(dungeon.graph.first_door_violation().is_none());
        let home = dungeon.graph.home().expect("Home exists");
        let reachable = warren_core::reachable_rooms(&dungeon.graph, home);
        prop_assert_eq!(reachable.len(), dungeon.graph.len());
        prop_assert!(dungeon.graph.count_tagged(RoomTag::Normal) <= interior);
    }
}
