//! Nodle layout - prints the computed node layouts of a sample graph
//!
//! Builds a small graph with a regular node and a group node holding a
//! nested graph, expands the group and prints the layout of every graph as
//! JSON. Set `RUST_LOG=debug` to follow the graph edits.

use egui::{Pos2, Vec2};
use nodle_layout::layout_dump::LayoutDump;
use nodle_layout::nodes::{Connection, GraphArena, Node, NodeState, Orientation, SimpleMetrics};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let metrics = SimpleMetrics::default();
    let mut arena = GraphArena::new();
    let root = arena.root();

    let mut source = Node::new(0, "Constant", Pos2::new(0.0, 0.0));
    source.add_output("value").add_widget("value", Vec2::new(60.0, 20.0));
    source.measure(&metrics);
    let source_id = arena.add_node(root, source)?;

    let (group_id, contents) =
        arena.create_group(root, "Shading", Pos2::new(200.0, 0.0), Orientation::Vertical)?;
    if let Some(group) = arena.graph_mut(root).and_then(|graph| graph.node_mut(group_id)) {
        group.add_input("color").add_input("roughness").add_output("surface");
        group.icon = Some("group".to_string());
        group.measure(&metrics);
        group.state = NodeState::Selected;
    }
    arena.connect(root, Connection::new(source_id, 0, group_id, 0))?;

    let mut mix = Node::new(0, "Mix", Pos2::new(0.0, 0.0)).with_orientation(Orientation::Horizontal);
    mix.add_input("a").add_input("b").add_output("out");
    mix.measure(&metrics);
    arena.add_node(contents, mix)?;

    let mut hidden = Node::new(0, "Unused", Pos2::new(0.0, 120.0));
    hidden.add_input("in").add_input("debug").add_output("out");
    hidden.set_port_visible(nodle_layout::PortType::Input, 1, false);
    hidden.state = NodeState::Disabled;
    hidden.measure(&metrics);
    arena.add_node(contents, hidden)?;

    arena.expand(root, group_id);
    log::info!("Active view: {}", arena.breadcrumb());

    for graph_id in arena.graph_ids() {
        let dump = LayoutDump::from_graph(&arena, graph_id)?;
        println!("{}", dump.to_json()?);
    }

    Ok(())
}
