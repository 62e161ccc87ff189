//! Unveränderliche Geometrie-Werttypen: Längen, Punkte, Winkel und Pfade.
//!
//! Alle Koordinaten sind ganzzahlige Nanometer, damit Addition, Mittelwert und
//! Spiegelung exakt und deterministisch bleiben. Gleitkomma (`glam::DVec2`)
//! wird nur für Outlines und nicht-orthogonale Rotationen verwendet.

use super::error::{BoardError, BoardResult};
use glam::DVec2;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Nanometer pro Millimeter.
const NM_PER_MM: i64 = 1_000_000;

// ── Length ──────────────────────────────────────────────────────────

/// Vorzeichenbehaftete Länge in Nanometern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length(i64);

impl Length {
    /// Länge 0.
    pub const ZERO: Length = Length(0);

    /// Erstellt eine Länge aus Nanometern.
    pub const fn from_nm(nm: i64) -> Self {
        Self(nm)
    }

    /// Erstellt eine Länge aus Millimetern (auf ganze Nanometer gerundet).
    pub fn from_mm(mm: f64) -> Self {
        Self((mm * NM_PER_MM as f64).round() as i64)
    }

    /// Wert in Nanometern.
    pub const fn to_nm(self) -> i64 {
        self.0
    }

    /// Wert in Millimetern.
    pub fn to_mm(self) -> f64 {
        self.0 as f64 / NM_PER_MM as f64
    }

    /// Betrag der Länge.
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Rastet die Länge auf das Grid ein (Hälfte rundet vom Nullpunkt weg).
    ///
    /// Ein Grid-Intervall von 0 lässt den Wert unverändert.
    pub fn mapped_to_grid(self, interval: Length) -> Self {
        let grid = interval.0.abs();
        if grid == 0 {
            return self;
        }
        if self.0 >= 0 {
            Self((self.0 + grid / 2) / grid * grid)
        } else {
            Self(-((-self.0 + grid / 2) / grid * grid))
        }
    }

    /// Exakte Millimeter-Darstellung (max. 6 Nachkommastellen, ohne Nullen am Ende).
    pub fn to_mm_string(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let int = abs / NM_PER_MM as u64;
        let frac = abs % NM_PER_MM as u64;
        if frac == 0 {
            format!("{sign}{int}")
        } else {
            let digits = format!("{frac:06}");
            format!("{sign}{int}.{}", digits.trim_end_matches('0'))
        }
    }

    /// Parst eine exakte Millimeter-Darstellung, z.B. `"-2.54"`.
    ///
    /// Gibt `None` zurück bei mehr als 6 Nachkommastellen, fremden Zeichen oder Überlauf.
    pub fn from_mm_str(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if frac_part.len() > 6
            || !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let int: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };
        let frac: i64 = if frac_part.is_empty() {
            0
        } else {
            format!("{frac_part:0<6}").parse().ok()?
        };
        let nm = int.checked_mul(NM_PER_MM)?.checked_add(frac)?;
        Some(Self(if negative { -nm } else { nm }))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.to_mm_string())
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<i64> for Length {
    type Output = Length;
    fn mul(self, rhs: i64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<i64> for Length {
    type Output = Length;
    fn div(self, rhs: i64) -> Length {
        Length(self.0 / rhs)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

/// Länge, die garantiert größer als 0 ist (z.B. Leiterbahnbreite).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositiveLength(Length);

impl PositiveLength {
    /// Prüft die Länge und schlägt bei Werten <= 0 mit `MalformedValue` fehl.
    pub fn new(length: Length) -> BoardResult<Self> {
        if length.to_nm() > 0 {
            Ok(Self(length))
        } else {
            Err(BoardError::malformed("positive length", length.to_mm_string()))
        }
    }

    /// Kurzform für Nanometer-Werte.
    pub fn from_nm(nm: i64) -> BoardResult<Self> {
        Self::new(Length::from_nm(nm))
    }

    /// Kurzform für Millimeter-Werte.
    pub fn from_mm(mm: f64) -> BoardResult<Self> {
        Self::new(Length::from_mm(mm))
    }

    /// Die eingeschlossene Länge.
    pub fn get(self) -> Length {
        self.0
    }

    /// Wert in Nanometern.
    pub fn to_nm(self) -> i64 {
        self.0.to_nm()
    }
}

impl From<PositiveLength> for Length {
    fn from(value: PositiveLength) -> Self {
        value.0
    }
}

// ── Angle / Orientation ─────────────────────────────────────────────

const MICRODEG_PER_DEG: i64 = 1_000_000;
const FULL_TURN: i64 = 360 * MICRODEG_PER_DEG;

/// Winkel in Mikrograd (gegen den Uhrzeigersinn positiv).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Angle(i64);

impl Angle {
    /// Erstellt einen Winkel aus Mikrograd.
    pub const fn from_microdeg(microdeg: i64) -> Self {
        Self(microdeg)
    }

    /// Erstellt einen Winkel aus Grad (auf Mikrograd gerundet).
    pub fn from_deg(deg: f64) -> Self {
        Self((deg * MICRODEG_PER_DEG as f64).round() as i64)
    }

    /// 0°
    pub const fn deg0() -> Self {
        Self(0)
    }

    /// 90°
    pub const fn deg90() -> Self {
        Self(90 * MICRODEG_PER_DEG)
    }

    /// 180°
    pub const fn deg180() -> Self {
        Self(180 * MICRODEG_PER_DEG)
    }

    /// 270°
    pub const fn deg270() -> Self {
        Self(270 * MICRODEG_PER_DEG)
    }

    /// Wert in Mikrograd.
    pub const fn to_microdeg(self) -> i64 {
        self.0
    }

    /// Wert in Grad.
    pub fn to_deg(self) -> f64 {
        self.0 as f64 / MICRODEG_PER_DEG as f64
    }

    /// Wert in Radiant.
    pub fn to_rad(self) -> f64 {
        self.to_deg().to_radians()
    }

    /// Exakte Grad-Darstellung (max. 6 Nachkommastellen).
    pub fn to_deg_string(self) -> String {
        // Mikrograd und Nanometer teilen die Skalierung 10^6
        Length::from_nm(self.0).to_mm_string()
    }

    /// Parst eine exakte Grad-Darstellung, z.B. `"-90.5"`.
    pub fn from_deg_str(text: &str) -> Option<Self> {
        Length::from_mm_str(text).map(|l| Self(l.to_nm()))
    }

    /// Normalisiert den Winkel auf `[0°, 360°)`.
    pub fn mapped_to_0_360(self) -> Self {
        Self(self.0.rem_euclid(FULL_TURN))
    }

    /// Rotation eines gespiegelten Objekts (Bauteil, Text) an der gegebenen Achse.
    ///
    /// Horizontal: `-a`, vertikal: `180° - a`, jeweils normalisiert. Zweimal
    /// angewendet ergibt sich wieder der normalisierte Ausgangswinkel.
    pub fn mirrored(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => (-self).mapped_to_0_360(),
            Orientation::Vertical => (Self::deg180() - self).mapped_to_0_360(),
        }
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

/// Spiegelachse einer Flip-Operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Horizontal spiegeln (x-Koordinaten werden an der senkrechten Achse gespiegelt)
    Horizontal,
    /// Vertikal spiegeln (y-Koordinaten werden an der waagrechten Achse gespiegelt)
    Vertical,
}

// ── Point ───────────────────────────────────────────────────────────

/// 2D-Koordinate in Nanometern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// X-Koordinate
    pub x: Length,
    /// Y-Koordinate
    pub y: Length,
}

impl Point {
    /// Ursprung.
    pub const ORIGIN: Point = Point {
        x: Length::ZERO,
        y: Length::ZERO,
    };

    /// Erstellt einen Punkt aus zwei Längen.
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// Erstellt einen Punkt aus Nanometern.
    pub const fn from_nm(x: i64, y: i64) -> Self {
        Self::new(Length::from_nm(x), Length::from_nm(y))
    }

    /// Erstellt einen Punkt aus Millimetern.
    pub fn from_mm(x: f64, y: f64) -> Self {
        Self::new(Length::from_mm(x), Length::from_mm(y))
    }

    /// Spiegelt den Punkt an der Achse durch `center`.
    pub fn mirrored(self, orientation: Orientation, center: Point) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(center.x * 2 - self.x, self.y),
            Orientation::Vertical => Self::new(self.x, center.y * 2 - self.y),
        }
    }

    /// Rotiert den Punkt um `center` (exakt für Vielfache von 90°).
    pub fn rotated(self, angle: Angle, center: Point) -> Self {
        let d = self - center;
        let rotated = match angle.mapped_to_0_360().to_microdeg() {
            0 => d,
            a if a == Angle::deg90().to_microdeg() => Self::new(-d.y, d.x),
            a if a == Angle::deg180().to_microdeg() => Self::new(-d.x, -d.y),
            a if a == Angle::deg270().to_microdeg() => Self::new(d.y, -d.x),
            _ => {
                let v = d.to_dvec2();
                let (sin, cos) = angle.to_rad().sin_cos();
                Self::from_dvec2(DVec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos))
            }
        };
        center + rotated
    }

    /// Rastet beide Koordinaten auf das Grid ein.
    pub fn mapped_to_grid(self, interval: Length) -> Self {
        Self::new(
            self.x.mapped_to_grid(interval),
            self.y.mapped_to_grid(interval),
        )
    }

    /// Umwandlung in einen Gleitkomma-Vektor (Nanometer).
    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.x.to_nm() as f64, self.y.to_nm() as f64)
    }

    /// Umwandlung aus einem Gleitkomma-Vektor (Nanometer, gerundet).
    pub fn from_dvec2(v: DVec2) -> Self {
        Self::from_nm(v.x.round() as i64, v.y.round() as i64)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Div<i64> for Point {
    type Output = Point;
    fn div(self, rhs: i64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

// ── Path ────────────────────────────────────────────────────────────

/// Stützpunkt eines Pfads; `angle` ist der Bogenwinkel bis zum nächsten Stützpunkt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    /// Position des Stützpunkts
    pub pos: Point,
    /// Bogenwinkel zum nächsten Stützpunkt (0° = gerade Linie)
    pub angle: Angle,
}

impl Vertex {
    /// Erstellt einen Stützpunkt.
    pub fn new(pos: Point, angle: Angle) -> Self {
        Self { pos, angle }
    }
}

/// Polylinie mit optionalen Kreisbögen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    vertices: Vec<Vertex>,
}

impl Path {
    /// Erstellt einen Pfad aus Stützpunkten.
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Alle Stützpunkte.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// `true` wenn der Pfad keine Stützpunkte hat.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// `true` wenn erster und letzter Stützpunkt zusammenfallen.
    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => self.vertices.len() > 1 && first.pos == last.pos,
            _ => false,
        }
    }

    /// Hängt einen Stützpunkt an.
    pub fn add_vertex(&mut self, pos: Point, angle: Angle) {
        self.vertices.push(Vertex::new(pos, angle));
    }

    /// Spiegelt alle Stützpunkte; Bogenwinkel kehren ihre Richtung um.
    pub fn mirrored(&self, orientation: Orientation, center: Point) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| Vertex::new(v.pos.mirrored(orientation, center), -v.angle))
                .collect(),
        }
    }

    /// Geschlossener Kreis mit dem gegebenen Durchmesser.
    pub fn circle(center: Point, diameter: PositiveLength) -> Self {
        let r = diameter.get() / 2;
        let right = Point::new(center.x + r, center.y);
        let left = Point::new(center.x - r, center.y);
        Self::new(vec![
            Vertex::new(right, Angle::deg180()),
            Vertex::new(left, Angle::deg180()),
            Vertex::new(right, Angle::deg0()),
        ])
    }

    /// Geschlossene Langloch-Kontur um die Strecke `p1`–`p2` mit der gegebenen Breite.
    pub fn obround(p1: Point, p2: Point, width: PositiveLength) -> Self {
        let a = p1.to_dvec2();
        let b = p2.to_dvec2();
        let dir = b - a;
        if dir.length_squared() == 0.0 {
            return Self::circle(p1, width);
        }
        let offset = dir.perp().normalize() * (width.to_nm() as f64 / 2.0);
        let start_left = Point::from_dvec2(a + offset);
        Self::new(vec![
            Vertex::new(start_left, Angle::deg0()),
            Vertex::new(Point::from_dvec2(b + offset), -Angle::deg180()),
            Vertex::new(Point::from_dvec2(b - offset), Angle::deg0()),
            Vertex::new(Point::from_dvec2(a - offset), -Angle::deg180()),
            Vertex::new(start_left, Angle::deg0()),
        ])
    }
}
