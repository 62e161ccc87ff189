//! Fehlertaxonomie des Board-Modells.

use thiserror::Error;
use uuid::Uuid;

/// Alle Fehler, die beim Aufbau oder Mutieren des Board-Graphen auftreten können.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Fehlerhafte Konstruktion eines Elements (z.B. Netzlinie mit identischen Endpunkten)
    #[error("Ungueltiges Element: {0}")]
    Validation(String),

    /// Eine UUID ist innerhalb ihres Containers bereits vergeben
    #[error("Doppelte UUID fuer {kind}: \"{uuid}\"")]
    DuplicateUuid {
        /// Art des Elements
        kind: &'static str,
        /// Bereits vorhandene UUID
        uuid: Uuid,
    },

    /// Ein referenziertes Element existiert nicht
    #[error("Ungueltige {kind} UUID: \"{uuid}\"")]
    Reference {
        /// Art des fehlenden Elements
        kind: &'static str,
        /// Fehlende UUID
        uuid: Uuid,
    },

    /// Ein persistierter Wert ist ungültig oder außerhalb des erlaubten Bereichs
    #[error("Ungueltiger Wert fuer \"{field}\": \"{value}\"")]
    MalformedValue {
        /// Name des Feldes
        field: String,
        /// Roher Wert
        value: String,
    },

    /// Programmierfehler: verletzte interne Invariante (nicht wiederholbar)
    #[error("Interner Fehler: {0}")]
    Logic(String),

    /// Syntaxfehler im persistierten Dokument
    #[error("XML-Fehler: {0}")]
    Xml(String),
}

impl BoardError {
    /// Kurzform für einen Validierungsfehler.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Kurzform für einen Programmierfehler.
    pub fn logic(msg: impl Into<String>) -> Self {
        Self::Logic(msg.into())
    }

    /// Kurzform für einen ungültigen Wert.
    pub fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Prüft ob der Fehler einen Programmierfehler signalisiert.
    pub fn is_logic_error(&self) -> bool {
        matches!(self, Self::Logic(_))
    }
}

/// Ergebnistyp des Board-Modells.
pub type BoardResult<T> = Result<T, BoardError>;
