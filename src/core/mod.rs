//! Core-Domänentypen: Geometrie, Layer, Verbindungsgraph und Board-Aggregat.

pub mod board;
pub mod board_items;
pub mod device;
pub mod error;
pub mod geometry;
pub mod layer;
/// Verbindungsgraph eines Netzsignals
///
/// - NetSegment: besitzt Punkte und Linien exklusiv
/// - NetPoint: Knoten, frei oder an Via/Pad angeheftet
/// - NetLine: Kupferverbindung zwischen zwei Punkten
pub mod net_line;
pub mod net_point;
pub mod net_segment;
pub mod via;

pub use board::{Board, BoardItemRef, StrokeTextRef, DEFAULT_GRID_INTERVAL};
pub use board_items::{Hole, NetSignal, Plane, Polygon, StrokeText, StrokeTextPlacement};
pub use device::{Device, DevicePlacement, FootprintPad, PadTechnology};
pub use error::{BoardError, BoardResult};
pub use geometry::{Angle, Length, Orientation, Path, Point, PositiveLength, Vertex};
pub use layer::{BoardLayer, LayerStack};
pub use net_line::NetLine;
pub use net_point::{NetPoint, NetPointAttachment};
pub use net_segment::{NetSegment, RemovedElements};
pub use via::{Via, ViaShape};
