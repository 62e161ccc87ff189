//! Selektion und Abfrage der von einer Operation betroffenen Board-Elemente.
//!
//! Die Abfrage liefert eine Momentaufnahme: nach einer Mutation des Boards
//! ist das Ergebnis veraltet und muss neu berechnet werden.

use crate::core::{Board, NetPoint, StrokeTextRef};
use indexmap::IndexSet;
use uuid::Uuid;

/// Vom Benutzer selektierte Board-Elemente (bereits aufgelöst).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSelection {
    /// Bauteile (Footprints)
    pub devices: IndexSet<Uuid>,
    /// Vias
    pub vias: IndexSet<Uuid>,
    /// Netzlinien
    pub net_lines: IndexSet<Uuid>,
    /// Kupferflächen
    pub planes: IndexSet<Uuid>,
    /// Polygone
    pub polygons: IndexSet<Uuid>,
    /// Board- und Footprint-Texte
    pub stroke_texts: IndexSet<StrokeTextRef>,
    /// Bohrungen
    pub holes: IndexSet<Uuid>,
}

impl BoardSelection {
    /// `true` wenn nichts selektiert ist.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
            && self.vias.is_empty()
            && self.net_lines.is_empty()
            && self.planes.is_empty()
            && self.polygons.is_empty()
            && self.stroke_texts.is_empty()
            && self.holes.is_empty()
    }

    /// Hebt die gesamte Selektion auf.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Selektiert alle Elemente des Boards.
    pub fn select_all(board: &Board) -> Self {
        let mut selection = Self {
            devices: board.devices().map(|d| d.uuid).collect(),
            vias: board.vias().map(|v| v.uuid).collect(),
            net_lines: board
                .net_segments()
                .flat_map(|s| s.net_lines().map(|l| l.uuid()))
                .collect(),
            planes: board.planes().map(|p| p.uuid).collect(),
            polygons: board.polygons().map(|p| p.uuid).collect(),
            stroke_texts: board
                .stroke_texts()
                .map(|t| StrokeTextRef::Board(t.uuid))
                .collect(),
            holes: board.holes().map(|h| h.uuid).collect(),
        };
        for device in board.devices() {
            selection
                .stroke_texts
                .extend(device.stroke_texts.keys().map(|text| StrokeTextRef::Footprint {
                    device: device.uuid,
                    text: *text,
                }));
        }
        selection
    }
}

/// Filter für Netzlinien nach Anheftung ihrer Endpunkte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetLineFilter {
    /// Kein Endpunkt angeheftet
    Floating,
    /// Mindestens ein Endpunkt angeheftet
    Attached,
    /// Alle Linien
    All,
}

/// Filter für Netzpunkte nach Anheftung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetPointFilter {
    /// Freie Punkte
    Floating,
    /// Angeheftete Punkte
    Attached,
    /// An Vias angeheftete Punkte
    AttachedToVia,
    /// An Pads angeheftete Punkte
    AttachedToPad,
    /// Alle Punkte
    All,
}

impl NetPointFilter {
    fn matches(self, point: &NetPoint) -> bool {
        match self {
            Self::Floating => !point.is_attached(),
            Self::Attached => point.is_attached(),
            Self::AttachedToVia => point.is_attached_to_via(),
            Self::AttachedToPad => point.is_attached_to_pad(),
            Self::All => true,
        }
    }
}

/// Ergebnis einer Selektionsabfrage (Momentaufnahme).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedItems {
    /// Bauteile
    pub devices: IndexSet<Uuid>,
    /// Vias
    pub vias: IndexSet<Uuid>,
    /// Netzlinien als `(Segment, Linie)`
    pub net_lines: IndexSet<(Uuid, Uuid)>,
    /// Netzpunkte als `(Segment, Punkt)`
    pub net_points: IndexSet<(Uuid, Uuid)>,
    /// Netzsegmente
    pub net_segments: IndexSet<Uuid>,
    /// Kupferflächen
    pub planes: IndexSet<Uuid>,
    /// Polygone
    pub polygons: IndexSet<Uuid>,
    /// Texte
    pub stroke_texts: IndexSet<StrokeTextRef>,
    /// Bohrungen
    pub holes: IndexSet<Uuid>,
}

impl SelectedItems {
    /// `true` wenn keine Kategorie Elemente enthält.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
            && self.vias.is_empty()
            && self.net_lines.is_empty()
            && self.net_points.is_empty()
            && self.net_segments.is_empty()
            && self.planes.is_empty()
            && self.polygons.is_empty()
            && self.stroke_texts.is_empty()
            && self.holes.is_empty()
    }
}

/// Sammelt die Hülle der betroffenen Elemente für eine Operation.
///
/// Jede `add_*`-Methode ist idempotent; nicht (mehr) existierende UUIDs der
/// Selektion werden ignoriert.
pub struct BoardSelectionQuery<'a> {
    board: &'a Board,
    selection: &'a BoardSelection,
    result: SelectedItems,
}

impl<'a> BoardSelectionQuery<'a> {
    /// Neue Abfrage über `selection` auf `board`.
    pub fn new(board: &'a Board, selection: &'a BoardSelection) -> Self {
        Self {
            board,
            selection,
            result: SelectedItems::default(),
        }
    }

    /// Selektierte Bauteile.
    pub fn add_selected_footprints(&mut self) {
        for uuid in &self.selection.devices {
            if self.board.device(*uuid).is_ok() {
                self.result.devices.insert(*uuid);
            }
        }
    }

    /// Selektierte Vias.
    pub fn add_selected_vias(&mut self) {
        for uuid in &self.selection.vias {
            if self.board.via(*uuid).is_ok() {
                self.result.vias.insert(*uuid);
            }
        }
    }

    /// Selektierte Netzlinien aktiver Segmente, gefiltert nach Anheftung.
    pub fn add_selected_net_lines(&mut self, filter: NetLineFilter) {
        for uuid in &self.selection.net_lines {
            let Some((segment, line)) = self.board.find_net_line(*uuid) else {
                continue;
            };
            let attached = segment.is_net_line_attached(line);
            let accepted = match filter {
                NetLineFilter::Floating => !attached,
                NetLineFilter::Attached => attached,
                NetLineFilter::All => true,
            };
            if accepted {
                self.result.net_lines.insert((segment.uuid(), line.uuid()));
            }
        }
    }

    /// Endpunkte der bereits gesammelten Netzlinien.
    pub fn add_net_points_of_net_lines(
        &mut self,
        line_filter: NetLineFilter,
        point_filter: NetPointFilter,
    ) {
        for (segment_id, line_id) in &self.result.net_lines {
            let Ok(segment) = self.board.net_segment(*segment_id) else {
                continue;
            };
            let Ok(line) = segment.get_net_line_by_uuid(*line_id) else {
                continue;
            };
            let attached = segment.is_net_line_attached(line);
            let line_accepted = match line_filter {
                NetLineFilter::Floating => !attached,
                NetLineFilter::Attached => attached,
                NetLineFilter::All => true,
            };
            if !line_accepted {
                continue;
            }
            for point_id in [line.start_point(), line.end_point()] {
                if let Ok(point) = segment.get_net_point_by_uuid(point_id) {
                    if point_filter.matches(point) {
                        self.result.net_points.insert((*segment_id, point_id));
                    }
                }
            }
        }
    }

    /// Segmente aller gesammelten Netzpunkte und Netzlinien.
    pub fn add_net_segments_of_selected_items(&mut self) {
        let segments = self
            .result
            .net_points
            .iter()
            .chain(self.result.net_lines.iter())
            .map(|(segment, _)| *segment);
        self.result.net_segments.extend(segments.collect::<Vec<_>>());
    }

    /// Selektierte Kupferflächen.
    pub fn add_selected_planes(&mut self) {
        for uuid in &self.selection.planes {
            if self.board.plane(*uuid).is_ok() {
                self.result.planes.insert(*uuid);
            }
        }
    }

    /// Selektierte Polygone.
    pub fn add_selected_polygons(&mut self) {
        for uuid in &self.selection.polygons {
            if self.board.polygon(*uuid).is_ok() {
                self.result.polygons.insert(*uuid);
            }
        }
    }

    /// Selektierte Texte direkt auf dem Board.
    pub fn add_selected_board_stroke_texts(&mut self) {
        self.add_selected_stroke_texts(|text| matches!(text, StrokeTextRef::Board(_)));
    }

    /// Selektierte Texte von Footprints.
    pub fn add_selected_footprint_stroke_texts(&mut self) {
        self.add_selected_stroke_texts(|text| matches!(text, StrokeTextRef::Footprint { .. }));
    }

    fn add_selected_stroke_texts(&mut self, kind: impl Fn(&StrokeTextRef) -> bool) {
        for text in &self.selection.stroke_texts {
            if kind(text) && self.board.stroke_text(*text).is_ok() {
                self.result.stroke_texts.insert(*text);
            }
        }
    }

    /// Selektierte Bohrungen.
    pub fn add_selected_holes(&mut self) {
        for uuid in &self.selection.holes {
            if self.board.hole(*uuid).is_ok() {
                self.result.holes.insert(*uuid);
            }
        }
    }

    /// Bisher gesammelte Elemente.
    pub fn items(&self) -> &SelectedItems {
        &self.result
    }

    /// `true` wenn nichts gesammelt wurde.
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    /// Beendet die Abfrage und gibt die Momentaufnahme zurück.
    pub fn finish(self) -> SelectedItems {
        self.result
    }
}
