//! Built-in sample level content.
//!
//! A small authored template library and two room graphs, enough to
//! exercise the builder end to end. Real content ships as JSON level
//! files; this set backs the demo front-end and the integration tests.

use super::graph::{RoomNodeGraph, RoomNodeType};
use super::level::LevelDescriptor;
use super::template::RoomTemplate;
use crate::geometry::{GridPos, Orientation};

fn entrance_hall() -> RoomTemplate {
    RoomTemplate::new(
        "entrance_hall",
        RoomNodeType::Entrance,
        GridPos::new(0, 0),
        GridPos::new(7, 5),
    )
    .with_doorway(GridPos::new(3, 5), Orientation::North)
    .with_doorway(GridPos::new(7, 2), Orientation::East)
    .with_doorway(GridPos::new(3, 0), Orientation::South)
    .with_doorway(GridPos::new(0, 3), Orientation::West)
    .with_spawn_point(GridPos::new(3, 2))
}

fn corridor_ns() -> RoomTemplate {
    RoomTemplate::new(
        "corridor_ns",
        RoomNodeType::CorridorNs,
        GridPos::new(0, 0),
        GridPos::new(2, 4),
    )
    .with_doorway(GridPos::new(1, 4), Orientation::North)
    .with_doorway(GridPos::new(1, 0), Orientation::South)
}

fn corridor_ns_short() -> RoomTemplate {
    RoomTemplate::new(
        "corridor_ns_short",
        RoomNodeType::CorridorNs,
        GridPos::new(0, 0),
        GridPos::new(2, 2),
    )
    .with_doorway(GridPos::new(1, 2), Orientation::North)
    .with_doorway(GridPos::new(1, 0), Orientation::South)
}

fn corridor_ew() -> RoomTemplate {
    RoomTemplate::new(
        "corridor_ew",
        RoomNodeType::CorridorEw,
        GridPos::new(0, 0),
        GridPos::new(4, 2),
    )
    .with_doorway(GridPos::new(4, 1), Orientation::East)
    .with_doorway(GridPos::new(0, 1), Orientation::West)
}

fn corridor_ew_short() -> RoomTemplate {
    RoomTemplate::new(
        "corridor_ew_short",
        RoomNodeType::CorridorEw,
        GridPos::new(0, 0),
        GridPos::new(2, 2),
    )
    .with_doorway(GridPos::new(2, 1), Orientation::East)
    .with_doorway(GridPos::new(0, 1), Orientation::West)
}

fn content_small() -> RoomTemplate {
    RoomTemplate::new(
        "content_small",
        RoomNodeType::Content,
        GridPos::new(0, 0),
        GridPos::new(5, 5),
    )
    .with_doorway(GridPos::new(2, 5), Orientation::North)
    .with_doorway(GridPos::new(5, 3), Orientation::East)
    .with_doorway(GridPos::new(3, 0), Orientation::South)
    .with_doorway(GridPos::new(0, 2), Orientation::West)
    .with_spawn_point(GridPos::new(2, 2))
    .with_spawn_point(GridPos::new(3, 3))
}

fn content_large() -> RoomTemplate {
    RoomTemplate::new(
        "content_large",
        RoomNodeType::Content,
        GridPos::new(0, 0),
        GridPos::new(8, 6),
    )
    .with_doorway(GridPos::new(4, 6), Orientation::North)
    .with_doorway(GridPos::new(8, 3), Orientation::East)
    .with_doorway(GridPos::new(4, 0), Orientation::South)
    .with_doorway(GridPos::new(0, 3), Orientation::West)
    .with_spawn_point(GridPos::new(2, 2))
    .with_spawn_point(GridPos::new(4, 3))
    .with_spawn_point(GridPos::new(6, 4))
}

fn boss_lair() -> RoomTemplate {
    RoomTemplate::new(
        "boss_lair",
        RoomNodeType::Boss,
        GridPos::new(0, 0),
        GridPos::new(11, 9),
    )
    .with_doorway(GridPos::new(5, 9), Orientation::North)
    .with_doorway(GridPos::new(11, 4), Orientation::East)
    .with_doorway(GridPos::new(6, 0), Orientation::South)
    .with_doorway(GridPos::new(0, 5), Orientation::West)
    .with_spawn_point(GridPos::new(5, 5))
}

/// Entrance, two content rooms, and a boss room on a single spine
fn spine_graph() -> RoomNodeGraph {
    let mut g = RoomNodeGraph::new("spine");
    let entrance = g.add_node(RoomNodeType::Entrance);
    let c1 = g.add_node(RoomNodeType::Corridor);
    let content = g.add_node(RoomNodeType::Content);
    let c2 = g.add_node(RoomNodeType::Corridor);
    let boss = g.add_node(RoomNodeType::Boss);

    g.add_edge(entrance, c1);
    g.add_edge(c1, content);
    g.add_edge(content, c2);
    g.add_edge(c2, boss);
    g
}

/// Entrance fanning out to three content rooms, boss beyond one of them
fn branching_graph() -> RoomNodeGraph {
    let mut g = RoomNodeGraph::new("branching");
    let entrance = g.add_node(RoomNodeType::Entrance);

    let mut contents = Vec::new();
    for _ in 0..3 {
        let corridor = g.add_node(RoomNodeType::Corridor);
        let content = g.add_node(RoomNodeType::Content);
        g.add_edge(entrance, corridor);
        g.add_edge(corridor, content);
        contents.push(content);
    }

    let corridor = g.add_node(RoomNodeType::Corridor);
    let boss = g.add_node(RoomNodeType::Boss);
    g.add_edge(contents[1], corridor);
    g.add_edge(corridor, boss);
    g
}

/// The built-in sample level
pub fn sample_level() -> LevelDescriptor {
    let mut level = LevelDescriptor::new("sample");
    level.templates = vec![
        entrance_hall(),
        corridor_ns(),
        corridor_ns_short(),
        corridor_ew(),
        corridor_ew_short(),
        content_small(),
        content_large(),
        boss_lair(),
    ];
    level.graphs = vec![spine_graph(), branching_graph()];
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_well_formed() {
        for template in sample_level().templates {
            assert!(template.is_well_formed(), "template {}", template.id);
        }
    }

    #[test]
    fn test_graphs_validate() {
        for graph in sample_level().graphs {
            assert!(graph.validate().is_ok(), "graph {}", graph.id);
        }
    }

    #[test]
    fn test_doorways_sit_on_template_perimeter() {
        for template in sample_level().templates {
            let rect = template.rect();
            for doorway in &template.doorways {
                let p = doorway.local_position;
                assert!(rect.contains(p), "doorway off template {}", template.id);
                let on_edge = p.x == rect.lower.x
                    || p.x == rect.upper.x
                    || p.y == rect.lower.y
                    || p.y == rect.upper.y;
                assert!(on_edge, "doorway inside template {}", template.id);
            }
        }
    }
}
