//! Elementare, reversible Board-Commands.
//!
//! Jeder Edit-Command liest beim Erstellen die aktuellen Werte als
//! Ausgangszustand; Setter ändern nur den Zielzustand.

mod device_instance_edit;
mod hole_edit;
mod net_line_edit;
mod net_point_edit;
mod net_segment;
mod plane_edit;
mod polygon_edit;
mod stroke_text_edit;
mod via_edit;

pub use device_instance_edit::CmdDeviceInstanceEdit;
pub use hole_edit::CmdHoleEdit;
pub use net_line_edit::CmdNetLineEdit;
pub use net_point_edit::CmdNetPointEdit;
pub use net_segment::{
    CmdNetSegmentAdd, CmdNetSegmentAddElements, CmdNetSegmentRemove, CmdNetSegmentRemoveElements,
};
pub use plane_edit::CmdPlaneEdit;
pub use polygon_edit::CmdPolygonEdit;
pub use stroke_text_edit::CmdStrokeTextEdit;
pub use via_edit::CmdViaEdit;

#[cfg(test)]
mod tests;
