use egui::{Pos2, Vec2};
use nodle_layout::nodes::port_layout::layout_ports;
use nodle_layout::nodes::{
    compute_layout, resolve_treatment, ContentDescriptor, ElementId, GraphArena, Node, NodeState,
    Orientation, Port, PortType, RegionKind, SimpleMetrics, Treatment,
};

#[test]
fn test_label_only_node() {
    let content = ContentDescriptor::new(Vec2::new(10.0, 14.0));
    for orientation in [Orientation::Vertical, Orientation::Horizontal] {
        let layout = compute_layout(&content, NodeState::Normal, orientation);

        assert_eq!(layout.width(), 10.0 + 8.0);
        assert_eq!(layout.height(), 14.0 + 10.0);
        assert!(!layout
            .placements
            .iter()
            .any(|p| matches!(p.element, ElementId::Port(..) | ElementId::PortLabel(..))));
    }
}

#[test]
fn test_three_inputs_from_offset() {
    let ports: Vec<Port> = (0..3)
        .map(|i| Port::new(i, format!("in{}", i), PortType::Input).with_size(Vec2::new(10.0, 10.0)))
        .collect();
    let placed = layout_ports(&ports, PortType::Input, 20.0, 80.0);

    let ys: Vec<f32> = placed.iter().map(|p| p.position.y).collect();
    assert_eq!(ys, vec![20.0, 31.0, 42.0]);
}

#[test]
fn test_visible_ports_never_overlap() {
    let metrics = SimpleMetrics::default();
    for count in 1..6 {
        let mut node = Node::new(0, "Stack", Pos2::ZERO);
        for i in 0..count {
            node.add_input(format!("in{}", i));
        }
        for i in 0..count + 1 {
            node.add_output(format!("out{}", i));
        }
        node.measure(&metrics);
        node.set_port_visible(PortType::Input, 0, count % 2 == 0);

        let layout = node.layout();
        for port_type in [PortType::Input, PortType::Output] {
            let positions = layout.port_positions(port_type);
            for pair in positions.windows(2) {
                let height = node.port(port_type, pair[0].0).unwrap().size.y;
                assert!(pair[1].1.y > pair[0].1.y + height);
            }
        }
    }
}

#[test]
fn test_selected_and_disabled_treatments() {
    let mut node = Node::new(0, "Selected", Pos2::ZERO);
    node.measure(&SimpleMetrics::default());

    node.state = NodeState::Selected;
    let layout = node.layout();
    assert_eq!(layout.region(RegionKind::Body).unwrap().treatment, Treatment::Highlight);
    assert_eq!(
        layout.region(RegionKind::LabelBacking).unwrap().treatment,
        Treatment::Highlight
    );

    node.state = NodeState::Disabled;
    let layout = node.layout();
    assert_eq!(layout.region(RegionKind::Body).unwrap().treatment, Treatment::Intrinsic);
    assert!(layout.show_disabled_overlay);
    assert_eq!(
        resolve_treatment(NodeState::Disabled).body,
        resolve_treatment(NodeState::Normal).body
    );
}

#[test]
fn test_group_expand_keeps_nested_graph() {
    let mut arena = GraphArena::new();
    let root = arena.root();
    let (group, contents) = arena
        .create_group(root, "group", Pos2::ZERO, Orientation::Vertical)
        .unwrap();

    assert!(!arena.is_expanded(root, group));
    assert!(arena.nested_graph(root, group).unwrap().is_empty());

    arena.expand(root, group);
    assert!(arena.is_expanded(root, group));
    assert!(arena.nested_graph(root, group).unwrap().is_empty());

    arena
        .add_node(contents, Node::new(0, "inside", Pos2::ZERO))
        .unwrap();
    arena.expand(root, group);
    arena.collapse(root, group);
    arena.collapse(root, group);
    assert!(!arena.is_expanded(root, group));
    assert_eq!(arena.nested_graph(root, group).unwrap().len(), 1);
    assert_eq!(arena.active_graph_id(), root);
}
