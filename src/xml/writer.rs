//! Writer für Board-Dateien.

use super::node::XmlNode;
use crate::core::{
    Board, Device, NetPointAttachment, NetSegment, PadTechnology, Path, Point, StrokeText, Via,
};

/// Schreibt ein Board als XML-Dokument.
///
/// Nur Netzsegmente, die aktuell Teil des Boards sind, werden geschrieben.
/// Längen werden als exakte Millimeter-Dezimalzahlen ausgegeben.
pub fn write_board(board: &Board) -> String {
    let mut root = XmlNode::new("board")
        .with_attr("uuid", board.uuid())
        .with_attr("name", board.name())
        .with_attr("inner_copper_layers", board.layer_stack().inner_copper_layers)
        .with_attr("grid", board.grid_interval().to_mm_string());

    for signal in board.net_signals() {
        root = root.with_child(
            XmlNode::new("netsignal")
                .with_attr("uuid", signal.uuid)
                .with_attr("name", &signal.name),
        );
    }
    for device in board.devices() {
        root = root.with_child(device_node(device));
    }
    for via in board.vias() {
        root = root.with_child(via_node(via));
    }
    for plane in board.planes() {
        let node = XmlNode::new("plane")
            .with_attr("uuid", plane.uuid)
            .with_attr("netsignal", plane.net_signal)
            .with_attr("layer", plane.layer.name());
        root = root.with_child(with_path(node, &plane.outline));
    }
    for polygon in board.polygons() {
        let node = XmlNode::new("polygon")
            .with_attr("uuid", polygon.uuid)
            .with_attr("layer", polygon.layer.name())
            .with_attr("width", polygon.line_width.to_mm_string())
            .with_attr("filled", polygon.filled);
        root = root.with_child(with_path(node, &polygon.path));
    }
    for text in board.stroke_texts() {
        root = root.with_child(stroke_text_node(text));
    }
    for hole in board.holes() {
        let node = with_position(XmlNode::new("hole").with_attr("uuid", hole.uuid), hole.position)
            .with_attr("diameter", hole.diameter.get().to_mm_string());
        root = root.with_child(node);
    }
    for segment in board.net_segments() {
        root = root.with_child(net_segment_node(segment));
    }

    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    root.write_to(&mut output, 0);
    output
}

/// Serialisiert ein Netzsegment mit allen Punkten und Linien.
pub fn net_segment_node(segment: &NetSegment) -> XmlNode {
    let mut node = XmlNode::new("netsegment")
        .with_attr("uuid", segment.uuid())
        .with_attr("netsignal", segment.net_signal());
    for point in segment.net_points() {
        let mut child = with_position(
            XmlNode::new("netpoint")
                .with_attr("uuid", point.uuid())
                .with_attr("layer", point.layer().name()),
            point.position(),
        );
        child = match point.attachment() {
            NetPointAttachment::None => child,
            NetPointAttachment::Via(via) => child.with_attr("via", via),
            NetPointAttachment::Pad { device, pad } => {
                child.with_attr("device", device).with_attr("pad", pad)
            }
        };
        node = node.with_child(child);
    }
    for line in segment.net_lines() {
        node = node.with_child(
            XmlNode::new("netline")
                .with_attr("uuid", line.uuid())
                .with_attr("layer", line.layer().name())
                .with_attr("width", line.width().get().to_mm_string())
                .with_attr("p1", line.start_point())
                .with_attr("p2", line.end_point()),
        );
    }
    node
}

fn device_node(device: &Device) -> XmlNode {
    let mut node = with_position(
        XmlNode::new("device")
            .with_attr("uuid", device.uuid)
            .with_attr("name", &device.name),
        device.position,
    )
    .with_attr("rotation", device.rotation.to_deg_string())
    .with_attr("mirrored", device.mirrored);

    for pad in device.pads.values() {
        let mut child = with_position(
            XmlNode::new("pad")
                .with_attr("uuid", pad.uuid)
                .with_attr("name", &pad.name),
            pad.position,
        );
        child = match pad.technology {
            PadTechnology::Tht => child.with_attr("technology", "tht"),
            PadTechnology::Smt(layer) => child
                .with_attr("technology", "smt")
                .with_attr("layer", layer.name()),
        };
        child = child.with_attr("size", pad.size.get().to_mm_string());
        if let Some(signal) = pad.net_signal {
            child = child.with_attr("netsignal", signal);
        }
        node = node.with_child(child);
    }
    for text in device.stroke_texts.values() {
        node = node.with_child(stroke_text_node(text));
    }
    node
}

fn via_node(via: &Via) -> XmlNode {
    with_position(XmlNode::new("via").with_attr("uuid", via.uuid), via.position)
        .with_attr("shape", via.shape.name())
        .with_attr("size", via.size.get().to_mm_string())
        .with_attr("drill", via.drill.get().to_mm_string())
}

fn stroke_text_node(text: &StrokeText) -> XmlNode {
    with_position(
        XmlNode::new("stroke_text")
            .with_attr("uuid", text.uuid)
            .with_attr("layer", text.layer.name())
            .with_attr("text", &text.text),
        text.position,
    )
    .with_attr("rotation", text.rotation.to_deg_string())
    .with_attr("height", text.height.get().to_mm_string())
    .with_attr("mirrored", text.mirrored)
}

fn with_position(node: XmlNode, position: Point) -> XmlNode {
    node.with_attr("x", position.x.to_mm_string())
        .with_attr("y", position.y.to_mm_string())
}

fn with_path(mut node: XmlNode, path: &Path) -> XmlNode {
    for vertex in path.vertices() {
        node = node.with_child(
            with_position(XmlNode::new("vertex"), vertex.pos)
                .with_attr("angle", vertex.angle.to_deg_string()),
        );
    }
    node
}
