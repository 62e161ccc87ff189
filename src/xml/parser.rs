//! Parser für Board-Dateien.

use super::node::XmlNode;
use crate::core::{
    Board, BoardError, BoardResult, Device, FootprintPad, Hole, LayerStack, NetLine, NetPoint,
    NetPointAttachment, NetSegment, NetSignal, PadTechnology, Path, Plane, Point, Polygon,
    StrokeText, Vertex, Via, ViaShape,
};
use indexmap::IndexMap;
use uuid::Uuid;

/// Parsed ein Board aus einem XML-String.
///
/// Netzsegmente werden zuletzt geladen, damit ihre Anker (Vias, Pads)
/// bereits existieren und vollständig validiert werden können.
pub fn parse_board(xml_content: &str) -> BoardResult<Board> {
    let root = XmlNode::parse(xml_content)?;
    if root.name != "board" {
        return Err(BoardError::Xml(format!(
            "Wurzelelement <board> erwartet, gefunden <{}>",
            root.name
        )));
    }

    let inner_copper_layers = match root.opt_attr("inner_copper_layers") {
        Some(_) => root.attr_parsed::<u8>("inner_copper_layers")?,
        None => 0,
    };
    let layer_stack = LayerStack::new(inner_copper_layers);
    let mut board = Board::with_uuid(
        root.attr_uuid("uuid")?,
        root.opt_attr("name").unwrap_or_default(),
        layer_stack,
    );
    if root.opt_attr("grid").is_some() {
        board.set_grid_interval(root.attr_positive_length("grid")?);
    }

    for node in root.children_named("netsignal") {
        board.add_net_signal(NetSignal {
            uuid: node.attr_uuid("uuid")?,
            name: node.attr("name")?.to_string(),
        })?;
    }
    for node in root.children_named("device") {
        board.add_device(parse_device(node, &layer_stack)?)?;
    }
    for node in root.children_named("via") {
        board.add_via(parse_via(node)?)?;
    }
    for node in root.children_named("plane") {
        board.add_plane(Plane {
            uuid: node.attr_uuid("uuid")?,
            net_signal: node.attr_uuid("netsignal")?,
            layer: node.attr_layer("layer", &layer_stack)?,
            outline: parse_path(node)?,
        })?;
    }
    for node in root.children_named("polygon") {
        board.add_polygon(Polygon {
            uuid: node.attr_uuid("uuid")?,
            layer: node.attr_layer("layer", &layer_stack)?,
            line_width: node.attr_length("width")?,
            filled: node.attr_bool("filled")?,
            path: parse_path(node)?,
        })?;
    }
    for node in root.children_named("stroke_text") {
        board.add_stroke_text(parse_stroke_text(node, &layer_stack)?)?;
    }
    for node in root.children_named("hole") {
        board.add_hole(Hole {
            uuid: node.attr_uuid("uuid")?,
            position: parse_position(node)?,
            diameter: node.attr_positive_length("diameter")?,
        })?;
    }
    for node in root.children_named("netsegment") {
        let segment = parse_net_segment(node, &layer_stack)?;
        if !segment.are_all_net_points_connected_together() {
            log::warn!(
                "Netzsegment {} ist nicht zusammenhaengend",
                segment.uuid()
            );
        }
        board.add_net_segment(segment)?;
    }

    log::info!(
        "Board \"{}\" geladen: {} Netzsegmente, {} Bauteile, {} Vias",
        board.name(),
        board.net_segment_count(),
        board.devices().count(),
        board.vias().count()
    );
    Ok(board)
}

/// Lädt ein Netzsegment; Linien-Endpunkte müssen im selben Segment existieren.
pub fn parse_net_segment(node: &XmlNode, layer_stack: &LayerStack) -> BoardResult<NetSegment> {
    let mut segment = NetSegment::with_uuid(node.attr_uuid("uuid")?, node.attr_uuid("netsignal")?);

    let mut points: IndexMap<Uuid, NetPoint> = IndexMap::new();
    for child in node.children_named("netpoint") {
        let uuid = child.attr_uuid("uuid")?;
        let point = NetPoint::with_uuid(
            uuid,
            segment.uuid(),
            child.attr_layer("layer", layer_stack)?,
            parse_position(child)?,
            parse_attachment(child)?,
        );
        if points.insert(uuid, point).is_some() {
            return Err(BoardError::DuplicateUuid {
                kind: "net point",
                uuid,
            });
        }
    }

    let mut lines = Vec::new();
    for child in node.children_named("netline") {
        let start = endpoint(&points, child, "p1")?;
        let end = endpoint(&points, child, "p2")?;
        lines.push(NetLine::with_uuid(
            child.attr_uuid("uuid")?,
            start,
            end,
            child.attr_layer("layer", layer_stack)?,
            child.attr_positive_length("width")?,
        )?);
    }

    segment.add_elements(points.into_values().collect(), lines)?;
    Ok(segment)
}

/// Löst einen Linien-Endpunkt auf; unbekannte IDs ergeben `Reference`.
fn endpoint<'a>(
    points: &'a IndexMap<Uuid, NetPoint>,
    node: &XmlNode,
    key: &str,
) -> BoardResult<&'a NetPoint> {
    let uuid = node.attr_uuid(key)?;
    points.get(&uuid).ok_or(BoardError::Reference {
        kind: "net point",
        uuid,
    })
}

fn parse_attachment(node: &XmlNode) -> BoardResult<NetPointAttachment> {
    if let Some(via) = node.opt_attr_uuid("via")? {
        return Ok(NetPointAttachment::Via(via));
    }
    match (node.opt_attr_uuid("device")?, node.opt_attr_uuid("pad")?) {
        (Some(device), Some(pad)) => Ok(NetPointAttachment::Pad { device, pad }),
        (None, None) => Ok(NetPointAttachment::None),
        _ => Err(BoardError::malformed(
            "netpoint.device/pad",
            "device und pad muessen gemeinsam angegeben werden",
        )),
    }
}

fn parse_device(node: &XmlNode, layer_stack: &LayerStack) -> BoardResult<Device> {
    let mut device = Device::new(node.attr("name")?, parse_position(node)?);
    device.uuid = node.attr_uuid("uuid")?;
    device.rotation = node.attr_angle("rotation")?;
    device.mirrored = node.attr_bool("mirrored")?;

    for child in node.children_named("pad") {
        let technology = match child.attr("technology")? {
            "tht" => PadTechnology::Tht,
            "smt" => PadTechnology::Smt(child.attr_layer("layer", layer_stack)?),
            other => return Err(BoardError::malformed("pad.technology", other)),
        };
        let uuid = child.attr_uuid("uuid")?;
        let pad = FootprintPad {
            uuid,
            name: child.attr("name")?.to_string(),
            position: parse_position(child)?,
            technology,
            size: child.attr_positive_length("size")?,
            net_signal: child.opt_attr_uuid("netsignal")?,
        };
        if device.pads.insert(uuid, pad).is_some() {
            return Err(BoardError::DuplicateUuid { kind: "pad", uuid });
        }
    }
    for child in node.children_named("stroke_text") {
        let text = parse_stroke_text(child, layer_stack)?;
        device.stroke_texts.insert(text.uuid, text);
    }
    Ok(device)
}

fn parse_via(node: &XmlNode) -> BoardResult<Via> {
    let shape = node.attr("shape")?;
    Ok(Via {
        uuid: node.attr_uuid("uuid")?,
        position: parse_position(node)?,
        shape: ViaShape::from_name(shape)
            .ok_or_else(|| BoardError::malformed("via.shape", shape))?,
        size: node.attr_positive_length("size")?,
        drill: node.attr_positive_length("drill")?,
    })
}

fn parse_stroke_text(node: &XmlNode, layer_stack: &LayerStack) -> BoardResult<StrokeText> {
    Ok(StrokeText {
        uuid: node.attr_uuid("uuid")?,
        layer: node.attr_layer("layer", layer_stack)?,
        text: node.attr("text")?.to_string(),
        position: parse_position(node)?,
        rotation: node.attr_angle("rotation")?,
        height: node.attr_positive_length("height")?,
        mirrored: node.attr_bool("mirrored")?,
    })
}

fn parse_path(node: &XmlNode) -> BoardResult<Path> {
    let vertices = node
        .children_named("vertex")
        .map(|v| Ok(Vertex::new(parse_position(v)?, v.attr_angle("angle")?)))
        .collect::<BoardResult<Vec<_>>>()?;
    Ok(Path::new(vertices))
}

fn parse_position(node: &XmlNode) -> BoardResult<Point> {
    Ok(Point::new(node.attr_length("x")?, node.attr_length("y")?))
}

#[cfg(test)]
mod tests;
