//! Netzsegment: zusammenhängender Verbund aus Netzpunkten und Netzlinien eines Signals.

use super::error::{BoardError, BoardResult};
use super::geometry::Point;
use super::net_line::NetLine;
use super::net_point::NetPoint;
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;
use uuid::Uuid;

/// Aus einem Netzsegment entfernte Punkte und Linien mit ihren früheren
/// Indizes in der Einfügereihenfolge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemovedElements {
    points: Vec<NetPoint>,
    point_indices: Vec<usize>,
    lines: Vec<(usize, NetLine)>,
    /// (Netzpunkt, Index in dessen Registrierungen, Netzlinie)
    registrations: Vec<(Uuid, usize, Uuid)>,
}

impl RemovedElements {
    /// Entfernte Netzpunkte.
    pub fn net_points(&self) -> impl Iterator<Item = &NetPoint> {
        self.points.iter()
    }

    /// Entfernte Netzlinien.
    pub fn net_lines(&self) -> impl Iterator<Item = &NetLine> {
        self.lines.iter().map(|(_, line)| line)
    }

    /// Verwirft die Indizes und gibt die Elemente zurück.
    pub fn into_elements(self) -> (Vec<NetPoint>, Vec<NetLine>) {
        let lines = self.lines.into_iter().map(|(_, line)| line).collect();
        (self.points, lines)
    }
}

/// Ein Netzsegment besitzt seine Netzpunkte und Netzlinien exklusiv.
#[derive(Debug, Clone, PartialEq)]
pub struct NetSegment {
    uuid: Uuid,
    net_signal: Uuid,
    net_points: IndexMap<Uuid, NetPoint>,
    net_lines: IndexMap<Uuid, NetLine>,
    added_to_board: bool,
}

impl NetSegment {
    /// Erstellt ein leeres Segment mit zufälliger UUID.
    pub fn new(net_signal: Uuid) -> Self {
        Self::with_uuid(Uuid::new_v4(), net_signal)
    }

    /// Erstellt ein leeres Segment mit vorgegebener UUID.
    pub fn with_uuid(uuid: Uuid, net_signal: Uuid) -> Self {
        Self {
            uuid,
            net_signal,
            net_points: IndexMap::new(),
            net_lines: IndexMap::new(),
            added_to_board: false,
        }
    }

    /// UUID des Segments.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// UUID des Netzsignals.
    pub fn net_signal(&self) -> Uuid {
        self.net_signal
    }

    /// `true` solange das Segment Teil des aktiven Board-Graphen ist.
    pub fn is_added_to_board(&self) -> bool {
        self.added_to_board
    }

    pub(crate) fn set_added_to_board(&mut self, added: bool) {
        self.added_to_board = added;
    }

    /// `true` wenn das Segment weder Punkte noch Linien enthält.
    pub fn is_empty(&self) -> bool {
        self.net_points.is_empty() && self.net_lines.is_empty()
    }

    /// Alle Netzpunkte in Einfügereihenfolge.
    pub fn net_points(&self) -> impl Iterator<Item = &NetPoint> {
        self.net_points.values()
    }

    /// Alle Netzlinien in Einfügereihenfolge.
    pub fn net_lines(&self) -> impl Iterator<Item = &NetLine> {
        self.net_lines.values()
    }

    /// Anzahl der Netzpunkte.
    pub fn net_point_count(&self) -> usize {
        self.net_points.len()
    }

    /// Anzahl der Netzlinien.
    pub fn net_line_count(&self) -> usize {
        self.net_lines.len()
    }

    /// `true` wenn der Punkt existiert.
    pub fn contains_net_point(&self, uuid: Uuid) -> bool {
        self.net_points.contains_key(&uuid)
    }

    /// `true` wenn die Linie existiert.
    pub fn contains_net_line(&self, uuid: Uuid) -> bool {
        self.net_lines.contains_key(&uuid)
    }

    /// Sucht einen Netzpunkt; fehlende UUIDs werden im Fehler benannt.
    pub fn get_net_point_by_uuid(&self, uuid: Uuid) -> BoardResult<&NetPoint> {
        self.net_points.get(&uuid).ok_or(BoardError::Reference {
            kind: "net point",
            uuid,
        })
    }

    /// Sucht eine Netzlinie; fehlende UUIDs werden im Fehler benannt.
    pub fn get_net_line_by_uuid(&self, uuid: Uuid) -> BoardResult<&NetLine> {
        self.net_lines.get(&uuid).ok_or(BoardError::Reference {
            kind: "net line",
            uuid,
        })
    }

    pub(crate) fn net_point_mut(&mut self, uuid: Uuid) -> BoardResult<&mut NetPoint> {
        self.net_points.get_mut(&uuid).ok_or(BoardError::Reference {
            kind: "net point",
            uuid,
        })
    }

    pub(crate) fn net_line_mut(&mut self, uuid: Uuid) -> BoardResult<&mut NetLine> {
        self.net_lines.get_mut(&uuid).ok_or(BoardError::Reference {
            kind: "net line",
            uuid,
        })
    }

    /// `true` wenn mindestens ein Endpunkt der Linie angeheftet ist.
    pub fn is_net_line_attached(&self, line: &NetLine) -> bool {
        [line.start_point(), line.end_point()]
            .iter()
            .filter_map(|id| self.net_points.get(id))
            .any(NetPoint::is_attached)
    }

    /// Fügt Punkte und Linien atomar hinzu.
    ///
    /// Es wird zuerst alles geprüft und erst dann mutiert: doppelte UUIDs,
    /// fremde Segmente, unbekannte Endpunkte und ungültige Linien führen zu
    /// einem Fehler ohne Änderung am Segment.
    pub fn add_elements(&mut self, points: Vec<NetPoint>, lines: Vec<NetLine>) -> BoardResult<()> {
        let mut new_points: IndexSet<Uuid> = IndexSet::new();
        for point in &points {
            if point.segment() != self.uuid {
                return Err(BoardError::validation(format!(
                    "Netzpunkt {} gehoert nicht zu Netzsegment {}",
                    point.uuid(),
                    self.uuid
                )));
            }
            if point.is_used() {
                return Err(BoardError::logic(format!(
                    "Netzpunkt {} hat noch registrierte Netzlinien",
                    point.uuid()
                )));
            }
            if self.net_points.contains_key(&point.uuid()) || !new_points.insert(point.uuid()) {
                return Err(BoardError::DuplicateUuid {
                    kind: "net point",
                    uuid: point.uuid(),
                });
            }
        }

        let mut new_lines: IndexSet<Uuid> = IndexSet::new();
        for line in &lines {
            if self.net_lines.contains_key(&line.uuid()) || !new_lines.insert(line.uuid()) {
                return Err(BoardError::DuplicateUuid {
                    kind: "net line",
                    uuid: line.uuid(),
                });
            }
            if line.segment() != self.uuid {
                return Err(BoardError::validation(format!(
                    "Netzlinie {} gehoert nicht zu Netzsegment {}",
                    line.uuid(),
                    self.uuid
                )));
            }
            for endpoint in [line.start_point(), line.end_point()] {
                if !self.net_points.contains_key(&endpoint) && !new_points.contains(&endpoint) {
                    return Err(BoardError::Reference {
                        kind: "net point",
                        uuid: endpoint,
                    });
                }
            }
        }

        for point in points {
            self.net_points.insert(point.uuid(), point);
        }
        let mut added_lines = Vec::with_capacity(lines.len());
        for mut line in lines {
            if let Err(err) = self.register_net_line(&line) {
                self.rollback_add(&new_points, &added_lines);
                return Err(err);
            }
            let (start, end) = self.endpoint_positions(&line);
            line.update_geometry(start, end);
            added_lines.push(line.uuid());
            self.net_lines.insert(line.uuid(), line);
        }
        Ok(())
    }

    /// Entfernt Punkte und Linien atomar und gibt sie samt ihrer bisherigen
    /// Positionen zurück.
    ///
    /// Ein Punkt darf nur entfernt werden, wenn alle seine Linien im selben
    /// Aufruf mit entfernt werden.
    pub fn remove_elements(
        &mut self,
        point_ids: &[Uuid],
        line_ids: &[Uuid],
    ) -> BoardResult<RemovedElements> {
        let mut lines: IndexSet<Uuid> = IndexSet::new();
        for &id in line_ids {
            self.get_net_line_by_uuid(id)?;
            if !lines.insert(id) {
                return Err(BoardError::logic(format!(
                    "Netzlinie {id} mehrfach zum Entfernen angegeben"
                )));
            }
        }
        let mut points: IndexSet<Uuid> = IndexSet::new();
        for &id in point_ids {
            let point = self.get_net_point_by_uuid(id)?;
            if let Some(line) = point.net_lines().iter().find(|l| !lines.contains(*l)) {
                return Err(BoardError::validation(format!(
                    "Netzpunkt {id} wird noch von Netzlinie {line} verwendet"
                )));
            }
            if !points.insert(id) {
                return Err(BoardError::logic(format!(
                    "Netzpunkt {id} mehrfach zum Entfernen angegeben"
                )));
            }
        }

        // Positionen vor jeder Mutation erfassen
        let mut removed = RemovedElements::default();
        for id in &lines {
            let line = self.get_net_line_by_uuid(*id)?;
            for endpoint in [line.start_point(), line.end_point()] {
                if let Some(index) = self
                    .net_points
                    .get(&endpoint)
                    .and_then(|p| p.net_lines().get_index_of(id))
                {
                    removed.registrations.push((endpoint, index, *id));
                }
            }
        }

        for id in &lines {
            let index = self.net_lines.get_index_of(id).unwrap_or_default();
            let line = self.get_net_line_by_uuid(*id)?.clone();
            removed.lines.push((index, line));
        }
        for id in &points {
            let index = self.net_points.get_index_of(id).unwrap_or_default();
            removed.point_indices.push(index);
        }

        for (_, line) in &removed.lines {
            self.unregister_net_line(line)?;
            self.net_lines.shift_remove(&line.uuid());
        }
        removed.points = points
            .iter()
            .filter_map(|id| self.net_points.shift_remove(id))
            .collect();
        Ok(removed)
    }

    /// Fügt zuvor entfernte Elemente wieder an ihren alten Positionen ein.
    ///
    /// Die Reihenfolge der Punkte, der Linien und der Linienregistrierungen
    /// an den Punkten entspricht danach wieder dem Stand vor dem Entfernen.
    pub fn restore_elements(&mut self, removed: &RemovedElements) -> BoardResult<()> {
        let (points, lines) = removed.clone().into_elements();
        self.add_elements(points, lines)?;

        let mut point_targets: Vec<(usize, Uuid)> = removed
            .point_indices
            .iter()
            .zip(&removed.points)
            .map(|(index, point)| (*index, point.uuid()))
            .collect();
        point_targets.sort_unstable_by_key(|(index, _)| *index);
        for (index, id) in point_targets {
            if let Some(from) = self.net_points.get_index_of(&id) {
                let to = index.min(self.net_points.len() - 1);
                self.net_points.move_index(from, to);
            }
        }

        let mut line_targets: Vec<(usize, Uuid)> = removed
            .lines
            .iter()
            .map(|(index, line)| (*index, line.uuid()))
            .collect();
        line_targets.sort_unstable_by_key(|(index, _)| *index);
        for (index, id) in line_targets {
            if let Some(from) = self.net_lines.get_index_of(&id) {
                let to = index.min(self.net_lines.len() - 1);
                self.net_lines.move_index(from, to);
            }
        }

        let mut registrations = removed.registrations.clone();
        registrations.sort_unstable_by_key(|(_, index, _)| *index);
        for (point, index, line) in registrations {
            if let Some(point) = self.net_points.get_mut(&point) {
                point.move_net_line_to(line, index);
            }
        }
        Ok(())
    }

    /// Prüft ob alle Netzpunkte über Netzlinien zusammenhängen.
    pub fn are_all_net_points_connected_together(&self) -> bool {
        let Some(first) = self.net_points.keys().next() else {
            return true;
        };
        let mut visited: IndexSet<Uuid> = IndexSet::new();
        let mut queue = VecDeque::from([*first]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(point) = self.net_points.get(&current) else {
                continue;
            };
            for line_id in point.net_lines() {
                if let Some(next) = self
                    .net_lines
                    .get(line_id)
                    .and_then(|line| line.other_point(current))
                {
                    if !visited.contains(&next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        visited.len() == self.net_points.len()
    }

    /// Führt die gecachte Geometrie aller Linien an `point` nach.
    ///
    /// Gibt die UUIDs der betroffenen Linien zurück.
    pub(crate) fn refresh_lines_of_point(&mut self, point: Uuid) -> Vec<Uuid> {
        let line_ids: Vec<Uuid> = match self.net_points.get(&point) {
            Some(p) => p.net_lines().iter().copied().collect(),
            None => return Vec::new(),
        };
        for id in &line_ids {
            let Some(line) = self.net_lines.get(id) else {
                continue;
            };
            let (start, end) = self.endpoint_positions(line);
            if let Some(line) = self.net_lines.get_mut(id) {
                line.update_geometry(start, end);
            }
        }
        line_ids
    }

    /// Führt die Geometrie aller Linien nach.
    pub(crate) fn refresh_all_lines(&mut self) {
        let ids: Vec<Uuid> = self.net_lines.keys().copied().collect();
        for id in ids {
            let Some(line) = self.net_lines.get(&id) else {
                continue;
            };
            let (start, end) = self.endpoint_positions(line);
            if let Some(line) = self.net_lines.get_mut(&id) {
                line.update_geometry(start, end);
            }
        }
    }

    fn endpoint_positions(&self, line: &NetLine) -> (Point, Point) {
        let position = |id: Uuid| {
            self.net_points
                .get(&id)
                .map(NetPoint::position)
                .unwrap_or_default()
        };
        (position(line.start_point()), position(line.end_point()))
    }

    /// Registriert die Linie zweiphasig an Start- und Endpunkt.
    ///
    /// Scheitert der Endpunkt, wird die Registrierung am Startpunkt zurückgenommen.
    fn register_net_line(&mut self, line: &NetLine) -> BoardResult<()> {
        self.net_point_mut(line.start_point())?
            .register_net_line(line.uuid())?;
        let end_result = self
            .net_point_mut(line.end_point())
            .and_then(|end| end.register_net_line(line.uuid()));
        if let Err(err) = end_result {
            if let Err(rollback_err) = self
                .net_point_mut(line.start_point())
                .and_then(|start| start.unregister_net_line(line.uuid()))
            {
                log::error!(
                    "Registrierung von Netzlinie {} am Startpunkt nicht zurueckgenommen: {rollback_err}",
                    line.uuid()
                );
            }
            return Err(err);
        }
        Ok(())
    }

    fn unregister_net_line(&mut self, line: &NetLine) -> BoardResult<()> {
        self.net_point_mut(line.start_point())?
            .unregister_net_line(line.uuid())?;
        let end_result = self
            .net_point_mut(line.end_point())
            .and_then(|end| end.unregister_net_line(line.uuid()));
        if let Err(err) = end_result {
            if let Err(rollback_err) = self
                .net_point_mut(line.start_point())
                .and_then(|start| start.register_net_line(line.uuid()))
            {
                log::error!(
                    "Abmeldung von Netzlinie {} am Startpunkt nicht zurueckgenommen: {rollback_err}",
                    line.uuid()
                );
            }
            return Err(err);
        }
        Ok(())
    }

    fn rollback_add(&mut self, points: &IndexSet<Uuid>, lines: &[Uuid]) {
        for id in lines.iter().rev() {
            if let Some(line) = self.net_lines.shift_remove(id) {
                if let Err(err) = self.unregister_net_line(&line) {
                    log::error!("Rollback von Netzlinie {id} fehlgeschlagen: {err}");
                }
            }
        }
        for id in points {
            self.net_points.shift_remove(id);
        }
    }
}
