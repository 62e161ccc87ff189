//! Use-Case: Selektierte Board-Elemente auf die andere Seite spiegeln.
//!
//! Die Operation läuft als eine transaktionale Command-Gruppe: Segmente der
//! Selektion werden vom Board gelöst, alle Elemente gespiegelt, doppelte
//! Via-Punkte zusammengeführt und die Segmente zuletzt wieder hinzugefügt.
//! Schlägt ein Schritt fehl, wird alles bereits Ausgeführte zurückgerollt.

use crate::app::cmd::{
    CmdDeviceInstanceEdit, CmdHoleEdit, CmdNetLineEdit, CmdNetPointEdit, CmdNetSegmentAdd,
    CmdNetSegmentAddElements, CmdNetSegmentRemove, CmdNetSegmentRemoveElements, CmdPlaneEdit,
    CmdPolygonEdit, CmdStrokeTextEdit, CmdViaEdit,
};
use crate::app::selection_query::{
    BoardSelection, BoardSelectionQuery, NetLineFilter, NetPointFilter, SelectedItems,
};
use crate::app::undo::{Command, UndoCommandGroup};
use crate::core::{
    Board, BoardError, BoardLayer, BoardResult, NetLine, NetPointAttachment, Orientation, Point,
    StrokeTextRef,
};
use uuid::Uuid;

const FLIP_TEXT: &str = "Elemente spiegeln";

/// Spiegelt die Selektion um ihren (auf das Raster gerasteten) Schwerpunkt.
pub struct CmdFlipSelectedBoardItems {
    selection: BoardSelection,
    orientation: Orientation,
    group: UndoCommandGroup,
}

impl CmdFlipSelectedBoardItems {
    /// Neuer Flip-Command für `selection` an der Achse `orientation`.
    pub fn new(selection: BoardSelection, orientation: Orientation) -> Self {
        Self {
            selection,
            orientation,
            group: UndoCommandGroup::new(FLIP_TEXT),
        }
    }

    /// Anzahl der ausgeführten Kind-Commands.
    pub fn child_count(&self) -> usize {
        self.group.child_count()
    }

    fn exec(&mut self, board: &mut Board, command: impl Command + 'static) -> BoardResult<bool> {
        self.group.exec_new_child_cmd(board, command)
    }

    /// Baut und führt alle Kind-Commands aus; `false` wenn nichts zu spiegeln ist.
    fn flip(&mut self, board: &mut Board) -> BoardResult<bool> {
        let items = query_items(board, &self.selection);
        let Some(center) = selection_center(board, &items) else {
            log::debug!("Spiegeln: leere Selektion");
            return Ok(false);
        };
        let center = center.mapped_to_grid(board.grid_interval());
        let orientation = self.orientation;
        log::debug!("Spiegeln um {center} ({orientation:?})");

        // Segmente lösen, damit Punkte und Linien die Seite wechseln können
        for segment in &items.net_segments {
            self.exec(board, CmdNetSegmentRemove::new(*segment))?;
        }

        for (segment, point) in &items.net_points {
            let p = board.net_segment(*segment)?.get_net_point_by_uuid(*point)?;
            let (layer, position, attached) = (p.layer(), p.position(), p.is_attached());
            let mut cmd = CmdNetPointEdit::new(board, *segment, *point)?;
            cmd.set_layer(layer.mirrored());
            if !attached {
                cmd.set_position(position.mirrored(orientation, center));
            }
            self.exec(board, cmd)?;
        }

        for (segment, line) in &items.net_lines {
            let layer = board.net_segment(*segment)?.get_net_line_by_uuid(*line)?.layer();
            let mut cmd = CmdNetLineEdit::new(board, *segment, *line)?;
            cmd.set_layer(layer.mirrored());
            self.exec(board, cmd)?;
        }

        self.merge_via_points(board, &items)?;

        for via in &items.vias {
            let mut cmd = CmdViaEdit::new(board, *via)?;
            cmd.mirror(center, orientation);
            self.exec(board, cmd)?;
        }

        for device in &items.devices {
            self.flip_device(board, *device, center)?;
        }

        for plane in &items.planes {
            let mut cmd = CmdPlaneEdit::new(board, *plane)?;
            cmd.mirror(center, orientation);
            self.exec(board, cmd)?;
        }

        for polygon in &items.polygons {
            let mut cmd = CmdPolygonEdit::new(board, *polygon)?;
            cmd.mirror(center, orientation);
            self.exec(board, cmd)?;
        }

        for text in &items.stroke_texts {
            let mut cmd = CmdStrokeTextEdit::new(board, *text)?;
            cmd.mirror(center, orientation);
            self.exec(board, cmd)?;
        }

        for hole in &items.holes {
            let mut cmd = CmdHoleEdit::new(board, *hole)?;
            cmd.mirror(center, orientation);
            self.exec(board, cmd)?;
        }

        // Wieder hinzufügen validiert die Segmente und synchronisiert angeheftete Punkte
        for segment in &items.net_segments {
            self.exec(board, CmdNetSegmentAdd::re_add(*segment))?;
        }

        Ok(self.group.child_count() > 0)
    }

    /// Führt Punkte zusammen, die nach dem Spiegeln am selben Via auf demselben Layer hängen.
    ///
    /// Arbeitet auf einer Momentaufnahme der IDs; bereits entfernte Punkte
    /// werden übersprungen.
    fn merge_via_points(&mut self, board: &mut Board, items: &SelectedItems) -> BoardResult<()> {
        let candidates: Vec<(Uuid, Uuid)> = items.net_points.iter().copied().collect();
        for (segment, kept) in candidates {
            loop {
                let seg = board.net_segment(segment)?;
                let Ok(kept_point) = seg.get_net_point_by_uuid(kept) else {
                    break;
                };
                let Some(via) = kept_point.via() else {
                    break;
                };
                let layer = kept_point.layer();
                let redundant = seg.net_points().find(|p| {
                    p.uuid() != kept && p.via() == Some(via) && p.layer() == layer
                });
                let Some(redundant) = redundant else {
                    break;
                };
                let redundant = redundant.uuid();
                log::debug!("Netzpunkt {redundant} wird mit {kept} an Via {via} zusammengefuehrt");
                self.merge_point_into(board, segment, kept, redundant)?;
            }
        }
        Ok(())
    }

    /// Ersetzt alle Linien an `redundant` durch Linien an `kept` und entfernt `redundant`.
    fn merge_point_into(
        &mut self,
        board: &mut Board,
        segment: Uuid,
        kept: Uuid,
        redundant: Uuid,
    ) -> BoardResult<()> {
        let seg = board.net_segment(segment)?;
        let kept_point = seg.get_net_point_by_uuid(kept)?;
        let touching: Vec<&NetLine> = seg
            .net_lines()
            .filter(|line| line.touches(redundant))
            .collect();

        let mut remove = CmdNetSegmentRemoveElements::new(segment);
        let mut add = CmdNetSegmentAddElements::new(segment);
        for line in touching {
            remove.remove_net_line(line.uuid());
            let Some(other) = line.other_point(redundant) else {
                continue;
            };
            if other == kept {
                // Linie zwischen den beiden Punkten entfällt
                continue;
            }
            let other_point = seg.get_net_point_by_uuid(other)?;
            let replacement = if line.start_point() == redundant {
                line.copy_between(kept_point, other_point)?
            } else {
                line.copy_between(other_point, kept_point)?
            };
            add.add_net_line(replacement);
        }
        remove.remove_net_point(redundant);

        self.exec(board, remove)?;
        self.exec(board, add)?;
        Ok(())
    }

    /// Spiegelt ein Bauteil samt Anheftungen seiner Pads.
    ///
    /// Punkte aktiver Segmente werden vor dem Spiegeln gelöst und danach mit
    /// dem neuen Pad-Layer wieder angeheftet. Punkte gelöster Segmente, die
    /// nicht selbst gespiegelt wurden, übernehmen den neuen Layer von SMT-Pads.
    fn flip_device(&mut self, board: &mut Board, device: Uuid, center: Point) -> BoardResult<()> {
        let pads: Vec<Uuid> = board.device(device)?.pads.keys().copied().collect();
        let mut attached = Vec::new();
        let mut detached = Vec::new();
        for pad in &pads {
            for (segment, point) in board.net_points_at_pad(device, *pad) {
                if board.net_segment(segment)?.is_added_to_board() {
                    attached.push((segment, point, *pad));
                } else {
                    detached.push((segment, point, *pad));
                }
            }
        }

        for (segment, point, _) in &attached {
            let mut cmd = CmdNetPointEdit::new(board, *segment, *point)?;
            cmd.set_attachment(NetPointAttachment::None);
            self.exec(board, cmd)?;
        }

        let mut cmd = CmdDeviceInstanceEdit::new(board, device)?;
        cmd.mirror(center, self.orientation);
        self.exec(board, cmd)?;

        for (segment, point, pad) in attached {
            let new_layer = pad_layer(board, device, pad)?;
            let mut cmd = CmdNetPointEdit::new(board, segment, point)?;
            if let Some(layer) = new_layer {
                cmd.set_layer(layer);
            }
            cmd.set_attachment(NetPointAttachment::Pad { device, pad });
            self.exec(board, cmd)?;
        }

        for (segment, point, pad) in detached {
            let Some(layer) = pad_layer(board, device, pad)? else {
                continue;
            };
            let mut cmd = CmdNetPointEdit::new(board, segment, point)?;
            cmd.set_layer(layer);
            self.exec(board, cmd)?;
        }
        Ok(())
    }
}

impl Command for CmdFlipSelectedBoardItems {
    fn text(&self) -> &str {
        FLIP_TEXT
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        match self.flip(board) {
            Ok(modified) => Ok(modified),
            Err(err) => {
                log::warn!("Spiegeln fehlgeschlagen, wird zurueckgerollt: {err}");
                self.group.rollback(board);
                self.group = UndoCommandGroup::new(FLIP_TEXT);
                Err(err)
            }
        }
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        self.group.perform_undo(board)
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        self.group.perform_redo(board)
    }
}

/// Hülle aller von einem Flip betroffenen Elemente.
fn query_items(board: &Board, selection: &BoardSelection) -> SelectedItems {
    let mut query = BoardSelectionQuery::new(board, selection);
    query.add_selected_footprints();
    query.add_selected_vias();
    query.add_selected_net_lines(NetLineFilter::All);
    query.add_net_points_of_net_lines(NetLineFilter::All, NetPointFilter::All);
    query.add_net_segments_of_selected_items();
    query.add_selected_planes();
    query.add_selected_polygons();
    query.add_selected_board_stroke_texts();
    query.add_selected_footprint_stroke_texts();
    query.add_selected_holes();
    query.finish()
}

/// Ganzzahliger Mittelwert aller Positionen; `None` wenn keine Position zählt.
///
/// Texte eines ebenfalls selektierten Bauteils zählen nicht extra.
fn selection_center(board: &Board, items: &SelectedItems) -> Option<Point> {
    let mut sum = Point::ORIGIN;
    let mut count: i64 = 0;
    let mut add = |position: Point| {
        sum += position;
        count += 1;
    };

    for device in items.devices.iter().filter_map(|d| board.device(*d).ok()) {
        add(device.position);
    }
    for via in items.vias.iter().filter_map(|v| board.via(*v).ok()) {
        add(via.position);
    }
    for (segment, point) in &items.net_points {
        if let Ok(p) = board
            .net_segment(*segment)
            .and_then(|s| s.get_net_point_by_uuid(*point))
        {
            add(p.position());
        }
    }
    for plane in items.planes.iter().filter_map(|p| board.plane(*p).ok()) {
        plane.outline.vertices().iter().for_each(|v| add(v.pos));
    }
    for polygon in items.polygons.iter().filter_map(|p| board.polygon(*p).ok()) {
        polygon.path.vertices().iter().for_each(|v| add(v.pos));
    }
    for text in &items.stroke_texts {
        if let StrokeTextRef::Footprint { device, .. } = text {
            if items.devices.contains(device) {
                continue;
            }
        }
        if let Ok(text) = board.stroke_text(*text) {
            add(text.position);
        }
    }
    for hole in items.holes.iter().filter_map(|h| board.hole(*h).ok()) {
        add(hole.position);
    }

    (count > 0).then(|| sum / count)
}

/// Aktuelle Kupferlage eines Pads; `None` für THT.
fn pad_layer(board: &Board, device: Uuid, pad: Uuid) -> BoardResult<Option<BoardLayer>> {
    let dev = board.device(device)?;
    let footprint_pad = dev.pads.get(&pad).ok_or(BoardError::Reference {
        kind: "pad",
        uuid: pad,
    })?;
    Ok(dev.pad_layer(footprint_pad))
}
