//! Commands für Netzsegmente und deren Elemente.

use crate::app::undo::Command;
use crate::core::{Board, BoardError, BoardResult, NetLine, NetPoint, NetSegment, RemovedElements};
use uuid::Uuid;

/// Fügt ein Netzsegment dem Board hinzu.
///
/// Entweder ein neues (vom Command besessenes) Segment oder ein vorübergehend
/// entferntes Segment aus der Arena.
pub struct CmdNetSegmentAdd {
    segment: Uuid,
    staged: Option<NetSegment>,
    owns_segment: bool,
}

impl CmdNetSegmentAdd {
    /// Neues Segment; nach Undo besitzt der Command es wieder.
    pub fn new(segment: NetSegment) -> Self {
        Self {
            segment: segment.uuid(),
            staged: Some(segment),
            owns_segment: true,
        }
    }

    /// Fügt ein entferntes Segment wieder hinzu.
    pub fn re_add(segment: Uuid) -> Self {
        Self {
            segment,
            staged: None,
            owns_segment: false,
        }
    }

    /// UUID des Segments.
    pub fn segment_uuid(&self) -> Uuid {
        self.segment
    }

    fn add(&mut self, board: &mut Board) -> BoardResult<()> {
        if !self.owns_segment {
            return board.attach_net_segment(self.segment);
        }
        let segment = self
            .staged
            .as_ref()
            .ok_or_else(|| BoardError::logic("Netzsegment ist nicht mehr im Command"))?;
        board.add_net_segment(segment.clone())?;
        self.staged = None;
        Ok(())
    }
}

impl Command for CmdNetSegmentAdd {
    fn text(&self) -> &str {
        "Netzsegment hinzufuegen"
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        self.add(board)?;
        Ok(true)
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        board.detach_net_segment(self.segment)?;
        if self.owns_segment {
            self.staged = Some(board.take_net_segment(self.segment)?);
        }
        Ok(())
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        self.add(board)
    }
}

/// Entfernt ein Netzsegment vorübergehend aus dem Board.
pub struct CmdNetSegmentRemove {
    segment: Uuid,
}

impl CmdNetSegmentRemove {
    /// Command für das Segment `segment`.
    pub fn new(segment: Uuid) -> Self {
        Self { segment }
    }
}

impl Command for CmdNetSegmentRemove {
    fn text(&self) -> &str {
        "Netzsegment entfernen"
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        board.detach_net_segment(self.segment)?;
        Ok(true)
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        board.attach_net_segment(self.segment)
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        board.detach_net_segment(self.segment)
    }
}

/// Fügt Netzpunkte und Netzlinien atomar einem Segment hinzu.
pub struct CmdNetSegmentAddElements {
    segment: Uuid,
    points: Vec<NetPoint>,
    lines: Vec<NetLine>,
}

impl CmdNetSegmentAddElements {
    /// Leerer Command für das Segment `segment`.
    pub fn new(segment: Uuid) -> Self {
        Self {
            segment,
            points: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Merkt einen Netzpunkt zum Hinzufügen vor.
    pub fn add_net_point(&mut self, point: NetPoint) -> Uuid {
        let uuid = point.uuid();
        self.points.push(point);
        uuid
    }

    /// Merkt eine Netzlinie zum Hinzufügen vor.
    pub fn add_net_line(&mut self, line: NetLine) -> Uuid {
        let uuid = line.uuid();
        self.lines.push(line);
        uuid
    }

    /// `true` wenn nichts vorgemerkt ist.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty()
    }

    fn add(&self, board: &mut Board) -> BoardResult<()> {
        board.add_net_segment_elements(self.segment, self.points.clone(), self.lines.clone())
    }
}

impl Command for CmdNetSegmentAddElements {
    fn text(&self) -> &str {
        "Netzsegment-Elemente hinzufuegen"
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        if self.is_empty() {
            return Ok(false);
        }
        self.add(board)?;
        Ok(true)
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        let point_ids: Vec<Uuid> = self.points.iter().map(NetPoint::uuid).collect();
        let line_ids: Vec<Uuid> = self.lines.iter().map(NetLine::uuid).collect();
        let removed = board.remove_net_segment_elements(self.segment, &point_ids, &line_ids)?;
        (self.points, self.lines) = removed.into_elements();
        Ok(())
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        self.add(board)
    }
}

/// Entfernt Netzpunkte und Netzlinien atomar aus einem Segment.
pub struct CmdNetSegmentRemoveElements {
    segment: Uuid,
    point_ids: Vec<Uuid>,
    line_ids: Vec<Uuid>,
    removed: Option<RemovedElements>,
}

impl CmdNetSegmentRemoveElements {
    /// Leerer Command für das Segment `segment`.
    pub fn new(segment: Uuid) -> Self {
        Self {
            segment,
            point_ids: Vec::new(),
            line_ids: Vec::new(),
            removed: None,
        }
    }

    /// Merkt einen Netzpunkt zum Entfernen vor.
    pub fn remove_net_point(&mut self, point: Uuid) {
        if !self.point_ids.contains(&point) {
            self.point_ids.push(point);
        }
    }

    /// Merkt eine Netzlinie zum Entfernen vor.
    pub fn remove_net_line(&mut self, line: Uuid) {
        if !self.line_ids.contains(&line) {
            self.line_ids.push(line);
        }
    }

    fn remove(&mut self, board: &mut Board) -> BoardResult<()> {
        self.removed =
            Some(board.remove_net_segment_elements(self.segment, &self.point_ids, &self.line_ids)?);
        Ok(())
    }
}

impl Command for CmdNetSegmentRemoveElements {
    fn text(&self) -> &str {
        "Netzsegment-Elemente entfernen"
    }

    fn perform_execute(&mut self, board: &mut Board) -> BoardResult<bool> {
        if self.point_ids.is_empty() && self.line_ids.is_empty() {
            return Ok(false);
        }
        self.remove(board)?;
        Ok(true)
    }

    fn perform_undo(&mut self, board: &mut Board) -> BoardResult<()> {
        let removed = self
            .removed
            .as_ref()
            .ok_or_else(|| BoardError::logic("Keine entfernten Elemente zum Wiederherstellen"))?;
        board.restore_net_segment_elements(self.segment, removed)?;
        self.removed = None;
        Ok(())
    }

    fn perform_redo(&mut self, board: &mut Board) -> BoardResult<()> {
        self.remove(board)
    }
}
