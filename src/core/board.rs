//! Das Board: Aggregat aller Board-Elemente und des Verbindungsgraphen.
//!
//! Alle Mutationen laufen über Methoden dieses Typs, damit abgeleitete
//! Zustände (Positionen angehefteter Netzpunkte, Linien-Geometrie,
//! Repaint-Anforderungen) konsistent bleiben.

use super::board_items::{Hole, NetSignal, Plane, Polygon, StrokeText, StrokeTextPlacement};
use super::device::{Device, DevicePlacement};
use super::error::{BoardError, BoardResult};
use super::geometry::{Length, Path, Point, PositiveLength};
use super::layer::{BoardLayer, LayerStack};
use super::net_line::NetLine;
use super::net_point::{NetPoint, NetPointAttachment};
use super::net_segment::{NetSegment, RemovedElements};
use super::via::{Via, ViaShape};
use indexmap::{IndexMap, IndexSet};
use uuid::Uuid;

/// Standard-Rasterweite (2.54mm).
pub const DEFAULT_GRID_INTERVAL: Length = Length::from_nm(2_540_000);

/// Adresse eines Texts: direkt auf dem Board oder Teil eines Footprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokeTextRef {
    /// Text direkt auf dem Board
    Board(Uuid),
    /// Text eines Bauteil-Footprints
    Footprint {
        /// Bauteil-UUID
        device: Uuid,
        /// Text-UUID
        text: Uuid,
    },
}

/// Referenz auf ein Board-Element für Repaint-Anforderungen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardItemRef {
    /// Ganzes Netzsegment
    NetSegment(Uuid),
    /// Netzpunkt
    NetPoint {
        /// Segment
        segment: Uuid,
        /// Punkt
        point: Uuid,
    },
    /// Netzlinie
    NetLine {
        /// Segment
        segment: Uuid,
        /// Linie
        line: Uuid,
    },
    /// Durchkontaktierung
    Via(Uuid),
    /// Bauteil
    Device(Uuid),
    /// Kupferfläche
    Plane(Uuid),
    /// Polygon
    Polygon(Uuid),
    /// Text
    StrokeText(StrokeTextRef),
    /// Bohrung
    Hole(Uuid),
}

/// Ein Board mit allen Elementen.
#[derive(Debug, Clone)]
pub struct Board {
    uuid: Uuid,
    name: String,
    layer_stack: LayerStack,
    grid_interval: Length,
    net_signals: IndexMap<Uuid, NetSignal>,
    devices: IndexMap<Uuid, Device>,
    vias: IndexMap<Uuid, Via>,
    net_segments: IndexMap<Uuid, NetSegment>,
    planes: IndexMap<Uuid, Plane>,
    polygons: IndexMap<Uuid, Polygon>,
    stroke_texts: IndexMap<Uuid, StrokeText>,
    holes: IndexMap<Uuid, Hole>,
    invalidated: IndexSet<BoardItemRef>,
}

impl Board {
    /// Erstellt ein leeres Board ohne Innenlagen.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_uuid(Uuid::new_v4(), name, LayerStack::default())
    }

    /// Erstellt ein leeres Board mit vorgegebener UUID und Lagenaufbau.
    pub fn with_uuid(uuid: Uuid, name: impl Into<String>, layer_stack: LayerStack) -> Self {
        Self {
            uuid,
            name: name.into(),
            layer_stack,
            grid_interval: DEFAULT_GRID_INTERVAL,
            net_signals: IndexMap::new(),
            devices: IndexMap::new(),
            vias: IndexMap::new(),
            net_segments: IndexMap::new(),
            planes: IndexMap::new(),
            polygons: IndexMap::new(),
            stroke_texts: IndexMap::new(),
            holes: IndexMap::new(),
            invalidated: IndexSet::new(),
        }
    }

    // ── Eigenschaften ───────────────────────────────────────────────

    /// UUID des Boards.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Name des Boards.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lagenaufbau.
    pub fn layer_stack(&self) -> &LayerStack {
        &self.layer_stack
    }

    /// Rasterweite für das Einrasten berechneter Positionen.
    pub fn grid_interval(&self) -> Length {
        self.grid_interval
    }

    /// Setzt die Rasterweite.
    pub fn set_grid_interval(&mut self, interval: PositiveLength) {
        self.grid_interval = interval.get();
    }

    // ── Repaint-Hook ────────────────────────────────────────────────

    /// Fordert ein Neuzeichnen des Elements an.
    pub fn invalidate(&mut self, item: BoardItemRef) {
        self.invalidated.insert(item);
    }

    /// Liefert und leert alle seit dem letzten Aufruf angeforderten Repaints.
    pub fn take_invalidated(&mut self) -> Vec<BoardItemRef> {
        self.invalidated.drain(..).collect()
    }

    // ── Netzsignale und einfache Elemente ───────────────────────────

    /// Alle Netzsignale.
    pub fn net_signals(&self) -> impl Iterator<Item = &NetSignal> {
        self.net_signals.values()
    }

    /// Sucht ein Netzsignal.
    pub fn net_signal(&self, uuid: Uuid) -> BoardResult<&NetSignal> {
        self.net_signals.get(&uuid).ok_or(BoardError::Reference {
            kind: "net signal",
            uuid,
        })
    }

    /// Fügt ein Netzsignal hinzu.
    pub fn add_net_signal(&mut self, signal: NetSignal) -> BoardResult<()> {
        insert_unique(&mut self.net_signals, "net signal", signal.uuid, signal)
    }

    /// Alle Bauteile.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Sucht ein Bauteil.
    pub fn device(&self, uuid: Uuid) -> BoardResult<&Device> {
        self.devices.get(&uuid).ok_or(BoardError::Reference {
            kind: "device",
            uuid,
        })
    }

    /// Fügt ein Bauteil hinzu.
    pub fn add_device(&mut self, device: Device) -> BoardResult<()> {
        let uuid = device.uuid;
        insert_unique(&mut self.devices, "device", uuid, device)?;
        self.invalidate(BoardItemRef::Device(uuid));
        Ok(())
    }

    /// Alle Vias.
    pub fn vias(&self) -> impl Iterator<Item = &Via> {
        self.vias.values()
    }

    /// Sucht ein Via.
    pub fn via(&self, uuid: Uuid) -> BoardResult<&Via> {
        self.vias
            .get(&uuid)
            .ok_or(BoardError::Reference { kind: "via", uuid })
    }

    /// Fügt ein Via hinzu.
    pub fn add_via(&mut self, via: Via) -> BoardResult<()> {
        let uuid = via.uuid;
        insert_unique(&mut self.vias, "via", uuid, via)?;
        self.invalidate(BoardItemRef::Via(uuid));
        Ok(())
    }

    /// Alle Kupferflächen.
    pub fn planes(&self) -> impl Iterator<Item = &Plane> {
        self.planes.values()
    }

    /// Sucht eine Kupferfläche.
    pub fn plane(&self, uuid: Uuid) -> BoardResult<&Plane> {
        self.planes
            .get(&uuid)
            .ok_or(BoardError::Reference { kind: "plane", uuid })
    }

    /// Fügt eine Kupferfläche hinzu; Layer muss eine vorhandene Kupferlage sein.
    pub fn add_plane(&mut self, plane: Plane) -> BoardResult<()> {
        self.check_copper_layer(plane.layer)?;
        self.net_signal(plane.net_signal)?;
        let uuid = plane.uuid;
        insert_unique(&mut self.planes, "plane", uuid, plane)?;
        self.invalidate(BoardItemRef::Plane(uuid));
        Ok(())
    }

    /// Alle Polygone.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.polygons.values()
    }

    /// Sucht ein Polygon.
    pub fn polygon(&self, uuid: Uuid) -> BoardResult<&Polygon> {
        self.polygons.get(&uuid).ok_or(BoardError::Reference {
            kind: "polygon",
            uuid,
        })
    }

    /// Fügt ein Polygon hinzu.
    pub fn add_polygon(&mut self, polygon: Polygon) -> BoardResult<()> {
        self.layer_stack.check(polygon.layer)?;
        let uuid = polygon.uuid;
        insert_unique(&mut self.polygons, "polygon", uuid, polygon)?;
        self.invalidate(BoardItemRef::Polygon(uuid));
        Ok(())
    }

    /// Alle Board-Texte (ohne Footprint-Texte).
    pub fn stroke_texts(&self) -> impl Iterator<Item = &StrokeText> {
        self.stroke_texts.values()
    }

    /// Sucht einen Text auf dem Board oder in einem Footprint.
    pub fn stroke_text(&self, text: StrokeTextRef) -> BoardResult<&StrokeText> {
        let (item, uuid) = match text {
            StrokeTextRef::Board(uuid) => (self.stroke_texts.get(&uuid), uuid),
            StrokeTextRef::Footprint { device, text } => {
                (self.device(device)?.stroke_texts.get(&text), text)
            }
        };
        item.ok_or(BoardError::Reference {
            kind: "stroke text",
            uuid,
        })
    }

    /// Fügt einen Board-Text hinzu.
    pub fn add_stroke_text(&mut self, text: StrokeText) -> BoardResult<()> {
        self.layer_stack.check(text.layer)?;
        let uuid = text.uuid;
        insert_unique(&mut self.stroke_texts, "stroke text", uuid, text)?;
        self.invalidate(BoardItemRef::StrokeText(StrokeTextRef::Board(uuid)));
        Ok(())
    }

    /// Alle Bohrungen.
    pub fn holes(&self) -> impl Iterator<Item = &Hole> {
        self.holes.values()
    }

    /// Sucht eine Bohrung.
    pub fn hole(&self, uuid: Uuid) -> BoardResult<&Hole> {
        self.holes
            .get(&uuid)
            .ok_or(BoardError::Reference { kind: "hole", uuid })
    }

    /// Fügt eine Bohrung hinzu.
    pub fn add_hole(&mut self, hole: Hole) -> BoardResult<()> {
        let uuid = hole.uuid;
        insert_unique(&mut self.holes, "hole", uuid, hole)?;
        self.invalidate(BoardItemRef::Hole(uuid));
        Ok(())
    }

    // ── Netzsegmente ────────────────────────────────────────────────

    /// Alle Netzsegmente, die aktuell Teil des Boards sind.
    pub fn net_segments(&self) -> impl Iterator<Item = &NetSegment> {
        self.net_segments
            .values()
            .filter(|segment| segment.is_added_to_board())
    }

    /// Anzahl der aktiven Netzsegmente.
    pub fn net_segment_count(&self) -> usize {
        self.net_segments().count()
    }

    /// Sucht ein Netzsegment (auch vorübergehend entfernte).
    pub fn net_segment(&self, uuid: Uuid) -> BoardResult<&NetSegment> {
        self.net_segments.get(&uuid).ok_or(BoardError::Reference {
            kind: "net segment",
            uuid,
        })
    }

    fn net_segment_mut(&mut self, uuid: Uuid) -> BoardResult<&mut NetSegment> {
        self.net_segments.get_mut(&uuid).ok_or(BoardError::Reference {
            kind: "net segment",
            uuid,
        })
    }

    /// Sucht eine Netzlinie in allen aktiven Segmenten.
    pub fn find_net_line(&self, line: Uuid) -> Option<(&NetSegment, &NetLine)> {
        self.net_segments().find_map(|segment| {
            segment
                .get_net_line_by_uuid(line)
                .ok()
                .map(|l| (segment, l))
        })
    }

    /// Nimmt ein neues Segment in die Arena auf und fügt es dem Board hinzu.
    pub fn add_net_segment(&mut self, segment: NetSegment) -> BoardResult<()> {
        let uuid = segment.uuid();
        if self.net_segments.contains_key(&uuid) {
            return Err(BoardError::DuplicateUuid {
                kind: "net segment",
                uuid,
            });
        }
        self.validate_net_segment(&segment)?;
        let mut segment = segment;
        segment.set_added_to_board(false);
        self.net_segments.insert(uuid, segment);
        self.attach_net_segment(uuid)
    }

    /// Fügt ein vorübergehend entferntes Segment wieder dem Board hinzu.
    ///
    /// Das Segment wird vollständig validiert; angeheftete Punkte übernehmen
    /// danach die aktuellen Anker-Positionen.
    pub fn attach_net_segment(&mut self, uuid: Uuid) -> BoardResult<()> {
        let segment = self.net_segment(uuid)?;
        if segment.is_added_to_board() {
            return Err(BoardError::logic(format!(
                "Netzsegment {uuid} ist bereits Teil des Boards"
            )));
        }
        self.validate_net_segment(segment)?;
        self.sync_segment_points(uuid);
        let segment = self.net_segment_mut(uuid)?;
        segment.set_added_to_board(true);
        segment.refresh_all_lines();
        self.invalidate(BoardItemRef::NetSegment(uuid));
        Ok(())
    }

    /// Entfernt ein Segment vorübergehend aus dem Board (bleibt in der Arena).
    pub fn detach_net_segment(&mut self, uuid: Uuid) -> BoardResult<()> {
        let segment = self.net_segment_mut(uuid)?;
        if !segment.is_added_to_board() {
            return Err(BoardError::logic(format!(
                "Netzsegment {uuid} ist nicht Teil des Boards"
            )));
        }
        segment.set_added_to_board(false);
        self.invalidate(BoardItemRef::NetSegment(uuid));
        Ok(())
    }

    /// Nimmt ein entferntes Segment endgültig aus der Arena und gibt es zurück.
    pub fn take_net_segment(&mut self, uuid: Uuid) -> BoardResult<NetSegment> {
        if self.net_segment(uuid)?.is_added_to_board() {
            return Err(BoardError::logic(format!(
                "Netzsegment {uuid} muss vor dem Herausnehmen entfernt werden"
            )));
        }
        self.net_segments
            .shift_remove(&uuid)
            .ok_or(BoardError::Reference {
                kind: "net segment",
                uuid,
            })
    }

    /// Fügt Punkte und Linien einem Segment atomar hinzu.
    pub fn add_net_segment_elements(
        &mut self,
        segment: Uuid,
        points: Vec<NetPoint>,
        lines: Vec<NetLine>,
    ) -> BoardResult<()> {
        self.validate_new_elements(segment, &points, &lines)?;
        let point_ids: Vec<Uuid> = points.iter().map(NetPoint::uuid).collect();
        let line_ids: Vec<Uuid> = lines.iter().map(NetLine::uuid).collect();
        self.net_segment_mut(segment)?.add_elements(points, lines)?;
        self.elements_added(segment, point_ids, line_ids);
        Ok(())
    }

    /// Entfernt Punkte und Linien eines Segments atomar und gibt sie zurück.
    pub fn remove_net_segment_elements(
        &mut self,
        segment: Uuid,
        point_ids: &[Uuid],
        line_ids: &[Uuid],
    ) -> BoardResult<RemovedElements> {
        let removed = self
            .net_segment_mut(segment)?
            .remove_elements(point_ids, line_ids)?;
        self.invalidate(BoardItemRef::NetSegment(segment));
        Ok(removed)
    }

    /// Stellt entfernte Elemente an ihren alten Positionen wieder her.
    pub fn restore_net_segment_elements(
        &mut self,
        segment: Uuid,
        removed: &RemovedElements,
    ) -> BoardResult<()> {
        let points: Vec<NetPoint> = removed.net_points().cloned().collect();
        let lines: Vec<NetLine> = removed.net_lines().cloned().collect();
        self.validate_new_elements(segment, &points, &lines)?;
        self.net_segment_mut(segment)?.restore_elements(removed)?;
        self.elements_added(
            segment,
            points.iter().map(NetPoint::uuid).collect(),
            lines.iter().map(NetLine::uuid).collect(),
        );
        Ok(())
    }

    fn validate_new_elements(
        &self,
        segment: Uuid,
        points: &[NetPoint],
        lines: &[NetLine],
    ) -> BoardResult<()> {
        let seg = self.net_segment(segment)?;
        if seg.is_added_to_board() {
            let net_signal = seg.net_signal();
            for point in points {
                self.validate_net_point(net_signal, point)?;
            }
            for line in lines {
                self.check_copper_layer(line.layer())?;
            }
        }
        Ok(())
    }

    fn elements_added(&mut self, segment: Uuid, point_ids: Vec<Uuid>, line_ids: Vec<Uuid>) {
        for point in point_ids {
            self.sync_point(segment, point);
            self.invalidate(BoardItemRef::NetPoint { segment, point });
        }
        for line in line_ids {
            self.invalidate(BoardItemRef::NetLine { segment, line });
        }
    }

    // ── Netzpunkte / Netzlinien ─────────────────────────────────────

    /// Setzt den Layer eines Netzpunkts.
    pub fn set_net_point_layer(
        &mut self,
        segment: Uuid,
        point: Uuid,
        layer: BoardLayer,
    ) -> BoardResult<bool> {
        self.check_copper_layer(layer)?;
        let seg = self.net_segment(segment)?;
        let mut candidate = seg.get_net_point_by_uuid(point)?.clone();
        if !candidate.set_layer(layer) {
            return Ok(false);
        }
        if seg.is_added_to_board() {
            self.validate_net_point(seg.net_signal(), &candidate)?;
        }
        self.net_segment_mut(segment)?
            .net_point_mut(point)?
            .set_layer(layer);
        self.invalidate(BoardItemRef::NetPoint { segment, point });
        Ok(true)
    }

    /// Setzt die Position eines freien Netzpunkts und führt die Linien nach.
    pub fn set_net_point_position(
        &mut self,
        segment: Uuid,
        point: Uuid,
        position: Point,
    ) -> BoardResult<bool> {
        let seg = self.net_segment_mut(segment)?;
        if !seg.net_point_mut(point)?.set_position(position)? {
            return Ok(false);
        }
        let lines = seg.refresh_lines_of_point(point);
        self.invalidate_point_and_lines(segment, point, lines);
        Ok(true)
    }

    /// Setzt die Anheftung eines Netzpunkts.
    ///
    /// Der Anker muss existieren; in aktiven Segmenten wird zusätzlich
    /// Layer und Netzsignal gegen den Anker geprüft.
    pub fn set_net_point_attachment(
        &mut self,
        segment: Uuid,
        point: Uuid,
        attachment: NetPointAttachment,
    ) -> BoardResult<bool> {
        let seg = self.net_segment(segment)?;
        let mut candidate = seg.get_net_point_by_uuid(point)?.clone();
        if !candidate.set_attachment(attachment) {
            return Ok(false);
        }
        if seg.is_added_to_board() {
            self.validate_net_point(seg.net_signal(), &candidate)?;
        } else {
            self.check_anchor_exists(attachment)?;
        }
        self.net_segment_mut(segment)?
            .net_point_mut(point)?
            .set_attachment(attachment);
        self.sync_point(segment, point);
        self.invalidate(BoardItemRef::NetPoint { segment, point });
        Ok(true)
    }

    /// Setzt die Kupferlage einer Netzlinie.
    pub fn set_net_line_layer(
        &mut self,
        segment: Uuid,
        line: Uuid,
        layer: BoardLayer,
    ) -> BoardResult<bool> {
        self.check_copper_layer(layer)?;
        let changed = self
            .net_segment_mut(segment)?
            .net_line_mut(line)?
            .set_layer(layer)?;
        if changed {
            self.invalidate(BoardItemRef::NetLine { segment, line });
        }
        Ok(changed)
    }

    /// Setzt die Breite einer Netzlinie.
    pub fn set_net_line_width(
        &mut self,
        segment: Uuid,
        line: Uuid,
        width: PositiveLength,
    ) -> BoardResult<bool> {
        let changed = self
            .net_segment_mut(segment)?
            .net_line_mut(line)?
            .set_width(width);
        if changed {
            self.invalidate(BoardItemRef::NetLine { segment, line });
        }
        Ok(changed)
    }

    /// Alle Netzpunkte (auch in entfernten Segmenten), die am Pad hängen.
    pub fn net_points_at_pad(&self, device: Uuid, pad: Uuid) -> Vec<(Uuid, Uuid)> {
        let attachment = NetPointAttachment::Pad { device, pad };
        self.net_segments
            .values()
            .flat_map(|segment| {
                segment
                    .net_points()
                    .filter(move |p| p.attachment() == attachment)
                    .map(move |p| (segment.uuid(), p.uuid()))
            })
            .collect()
    }

    // ── Anker und weitere Elemente ──────────────────────────────────

    /// Verschiebt ein Via; angeheftete Punkte aktiver Segmente folgen.
    pub fn set_via_position(&mut self, uuid: Uuid, position: Point) -> BoardResult<bool> {
        let via = self.via_mut(uuid)?;
        if via.position == position {
            return Ok(false);
        }
        via.position = position;
        self.invalidate(BoardItemRef::Via(uuid));
        self.sync_attached_points(|a| a == NetPointAttachment::Via(uuid));
        Ok(true)
    }

    /// Setzt den Außendurchmesser eines Vias.
    pub fn set_via_size(&mut self, uuid: Uuid, size: PositiveLength) -> BoardResult<bool> {
        let via = self.via_mut(uuid)?;
        if via.size == size {
            return Ok(false);
        }
        via.size = size;
        self.invalidate(BoardItemRef::Via(uuid));
        Ok(true)
    }

    /// Setzt die Form eines Vias.
    pub fn set_via_shape(&mut self, uuid: Uuid, shape: ViaShape) -> BoardResult<bool> {
        let via = self.via_mut(uuid)?;
        if via.shape == shape {
            return Ok(false);
        }
        via.shape = shape;
        self.invalidate(BoardItemRef::Via(uuid));
        Ok(true)
    }

    /// Setzt die Platzierung eines Bauteils; angeheftete Punkte aktiver Segmente folgen.
    ///
    /// Spiegeln ist nur erlaubt, solange kein Punkt eines aktiven Segments an
    /// einem SMT-Pad des Bauteils hängt, da sich dessen Kupferlage ändert.
    pub fn set_device_placement(
        &mut self,
        uuid: Uuid,
        placement: DevicePlacement,
    ) -> BoardResult<bool> {
        let device = self.device(uuid)?;
        if device.placement() == placement {
            return Ok(false);
        }
        if device.mirrored != placement.mirrored {
            let blocked = self.net_segments().any(|segment| {
                segment.net_points().any(|p| match p.pad() {
                    Some((d, pad)) if d == uuid => device
                        .pads
                        .get(&pad)
                        .is_some_and(|pad| device.pad_layer(pad).is_some()),
                    _ => false,
                })
            });
            if blocked {
                return Err(BoardError::validation(format!(
                    "Bauteil {}: Netzpunkte an SMT-Pads muessen vor dem Spiegeln geloest werden",
                    device.name
                )));
            }
        }
        self.device_mut(uuid)?.apply_placement(placement);
        self.invalidate(BoardItemRef::Device(uuid));
        self.sync_attached_points(|a| matches!(a, NetPointAttachment::Pad { device, .. } if device == uuid));
        Ok(true)
    }

    /// Setzt Layer und Umriss einer Kupferfläche.
    pub fn set_plane_geometry(
        &mut self,
        uuid: Uuid,
        layer: BoardLayer,
        outline: Path,
    ) -> BoardResult<bool> {
        self.check_copper_layer(layer)?;
        let plane = self
            .planes
            .get_mut(&uuid)
            .ok_or(BoardError::Reference { kind: "plane", uuid })?;
        if plane.layer == layer && plane.outline == outline {
            return Ok(false);
        }
        plane.layer = layer;
        plane.outline = outline;
        self.invalidate(BoardItemRef::Plane(uuid));
        Ok(true)
    }

    /// Setzt Layer und Pfad eines Polygons.
    pub fn set_polygon_geometry(
        &mut self,
        uuid: Uuid,
        layer: BoardLayer,
        path: Path,
    ) -> BoardResult<bool> {
        self.layer_stack.check(layer)?;
        let polygon = self.polygons.get_mut(&uuid).ok_or(BoardError::Reference {
            kind: "polygon",
            uuid,
        })?;
        if polygon.layer == layer && polygon.path == path {
            return Ok(false);
        }
        polygon.layer = layer;
        polygon.path = path;
        self.invalidate(BoardItemRef::Polygon(uuid));
        Ok(true)
    }

    /// Setzt die Platzierung eines Texts.
    pub fn set_stroke_text_placement(
        &mut self,
        text: StrokeTextRef,
        placement: StrokeTextPlacement,
    ) -> BoardResult<bool> {
        self.layer_stack.check(placement.layer)?;
        let changed = self.stroke_text_mut(text)?.apply_placement(placement);
        if changed {
            self.invalidate(BoardItemRef::StrokeText(text));
        }
        Ok(changed)
    }

    /// Setzt den Inhalt eines Texts.
    pub fn set_stroke_text_content(
        &mut self,
        text: StrokeTextRef,
        content: &str,
    ) -> BoardResult<bool> {
        let item = self.stroke_text_mut(text)?;
        if item.text == content {
            return Ok(false);
        }
        item.text = content.to_string();
        self.invalidate(BoardItemRef::StrokeText(text));
        Ok(true)
    }

    /// Verschiebt eine Bohrung.
    pub fn set_hole_position(&mut self, uuid: Uuid, position: Point) -> BoardResult<bool> {
        let hole = self
            .holes
            .get_mut(&uuid)
            .ok_or(BoardError::Reference { kind: "hole", uuid })?;
        if hole.position == position {
            return Ok(false);
        }
        hole.position = position;
        self.invalidate(BoardItemRef::Hole(uuid));
        Ok(true)
    }

    // ── Validierung ─────────────────────────────────────────────────

    /// Prüft ein Segment gegen den aktuellen Board-Zustand.
    pub fn validate_net_segment(&self, segment: &NetSegment) -> BoardResult<()> {
        self.net_signal(segment.net_signal())?;
        for point in segment.net_points() {
            self.validate_net_point(segment.net_signal(), point)?;
        }
        for line in segment.net_lines() {
            self.check_copper_layer(line.layer())?;
        }
        Ok(())
    }

    fn validate_net_point(&self, net_signal: Uuid, point: &NetPoint) -> BoardResult<()> {
        self.check_copper_layer(point.layer())?;
        match point.attachment() {
            NetPointAttachment::None => Ok(()),
            NetPointAttachment::Via(via) => self.via(via).map(|_| ()),
            NetPointAttachment::Pad { device, pad } => {
                let dev = self.device(device)?;
                let footprint_pad = dev
                    .pads
                    .get(&pad)
                    .ok_or(BoardError::Reference { kind: "pad", uuid: pad })?;
                if let Some(pad_layer) = dev.pad_layer(footprint_pad) {
                    if pad_layer != point.layer() {
                        return Err(BoardError::validation(format!(
                            "invalid board layer: Netzpunkt {} liegt auf \"{}\", Pad {}:{} auf \"{}\"",
                            point.uuid(),
                            point.layer(),
                            dev.name,
                            footprint_pad.name,
                            pad_layer
                        )));
                    }
                }
                if footprint_pad.net_signal != Some(net_signal) {
                    return Err(BoardError::validation(format!(
                        "Netzsignal von Pad {}:{} passt nicht zum Netzsegment von Netzpunkt {}",
                        dev.name,
                        footprint_pad.name,
                        point.uuid()
                    )));
                }
                Ok(())
            }
        }
    }

    fn check_anchor_exists(&self, attachment: NetPointAttachment) -> BoardResult<()> {
        match attachment {
            NetPointAttachment::None => Ok(()),
            NetPointAttachment::Via(via) => self.via(via).map(|_| ()),
            NetPointAttachment::Pad { device, pad } => self
                .device(device)?
                .pads
                .get(&pad)
                .map(|_| ())
                .ok_or(BoardError::Reference { kind: "pad", uuid: pad }),
        }
    }

    fn check_copper_layer(&self, layer: BoardLayer) -> BoardResult<()> {
        let layer = self.layer_stack.check(layer)?;
        if !layer.is_copper() {
            return Err(BoardError::validation(format!(
                "invalid board layer: \"{layer}\" ist keine Kupferlage"
            )));
        }
        Ok(())
    }

    // ── Interne Hilfen ──────────────────────────────────────────────

    fn via_mut(&mut self, uuid: Uuid) -> BoardResult<&mut Via> {
        self.vias
            .get_mut(&uuid)
            .ok_or(BoardError::Reference { kind: "via", uuid })
    }

    fn device_mut(&mut self, uuid: Uuid) -> BoardResult<&mut Device> {
        self.devices.get_mut(&uuid).ok_or(BoardError::Reference {
            kind: "device",
            uuid,
        })
    }

    fn stroke_text_mut(&mut self, text: StrokeTextRef) -> BoardResult<&mut StrokeText> {
        let (item, uuid) = match text {
            StrokeTextRef::Board(uuid) => (self.stroke_texts.get_mut(&uuid), uuid),
            StrokeTextRef::Footprint { device, text } => {
                (self.device_mut(device)?.stroke_texts.get_mut(&text), text)
            }
        };
        item.ok_or(BoardError::Reference {
            kind: "stroke text",
            uuid,
        })
    }

    fn invalidate_point_and_lines(&mut self, segment: Uuid, point: Uuid, lines: Vec<Uuid>) {
        self.invalidate(BoardItemRef::NetPoint { segment, point });
        for line in lines {
            self.invalidate(BoardItemRef::NetLine { segment, line });
        }
    }

    /// Übernimmt die Anker-Position eines einzelnen Punkts.
    fn sync_point(&mut self, segment: Uuid, point: Uuid) {
        let Self {
            vias,
            devices,
            net_segments,
            invalidated,
            ..
        } = self;
        let Some(seg) = net_segments.get_mut(&segment) else {
            return;
        };
        let Ok(p) = seg.get_net_point_by_uuid(point) else {
            return;
        };
        let Some(position) = anchor_position(vias, devices, p.attachment()) else {
            return;
        };
        let moved = match seg.net_point_mut(point) {
            Ok(p) => p.sync_position(position),
            Err(_) => false,
        };
        if moved {
            for line in seg.refresh_lines_of_point(point) {
                invalidated.insert(BoardItemRef::NetLine { segment, line });
            }
            invalidated.insert(BoardItemRef::NetPoint { segment, point });
        }
    }

    /// Übernimmt die Anker-Positionen aller angehefteten Punkte eines Segments.
    fn sync_segment_points(&mut self, segment: Uuid) {
        let points: Vec<Uuid> = match self.net_segments.get(&segment) {
            Some(seg) => seg
                .net_points()
                .filter(|p| p.is_attached())
                .map(NetPoint::uuid)
                .collect(),
            None => return,
        };
        for point in points {
            self.sync_point(segment, point);
        }
    }

    /// Führt alle angehefteten Punkte aktiver Segmente nach, deren Anker `filter` erfüllt.
    fn sync_attached_points(&mut self, filter: impl Fn(NetPointAttachment) -> bool) {
        let targets: Vec<(Uuid, Uuid)> = self
            .net_segments()
            .flat_map(|segment| {
                segment
                    .net_points()
                    .filter(|p| filter(p.attachment()))
                    .map(move |p| (segment.uuid(), p.uuid()))
                    .collect::<Vec<_>>()
            })
            .collect();
        for (segment, point) in targets {
            self.sync_point(segment, point);
        }
    }
}

/// Absolute Position des Ankers; `None` für freie Punkte oder fehlende Anker.
fn anchor_position(
    vias: &IndexMap<Uuid, Via>,
    devices: &IndexMap<Uuid, Device>,
    attachment: NetPointAttachment,
) -> Option<Point> {
    match attachment {
        NetPointAttachment::None => None,
        NetPointAttachment::Via(via) => vias.get(&via).map(|v| v.position),
        NetPointAttachment::Pad { device, pad } => {
            let device = devices.get(&device)?;
            device.pads.get(&pad).map(|p| device.pad_position(p))
        }
    }
}

fn insert_unique<T>(
    map: &mut IndexMap<Uuid, T>,
    kind: &'static str,
    uuid: Uuid,
    value: T,
) -> BoardResult<()> {
    if map.contains_key(&uuid) {
        return Err(BoardError::DuplicateUuid { kind, uuid });
    }
    map.insert(uuid, value);
    Ok(())
}
