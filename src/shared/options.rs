//! Zentrale Konfiguration für den Board-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{Length, PositiveLength, DEFAULT_GRID_INTERVAL};
use serde::{Deserialize, Serialize};

// ── Raster ──────────────────────────────────────────────────────────

/// Standard-Rasterweite in Millimetern.
pub const GRID_INTERVAL_MM: f64 = 2.54;

// ── Historie ────────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const MAX_UNDO_DEPTH: usize = 200;
/// Maximale Anzahl Einträge im Command-Log.
pub const COMMAND_LOG_CAPACITY: usize = 1000;

// ── Lagenaufbau ─────────────────────────────────────────────────────

/// Standard-Anzahl innerer Kupferlagen für neue Boards.
pub const INNER_COPPER_LAYERS: u8 = 0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `pcb_board_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorOptions {
    /// Rasterweite in Millimetern (für Schwerpunkt-Rasterung)
    pub grid_interval_mm: f64,
    /// Maximale Undo-Tiefe (0 = unbegrenzt)
    pub max_undo_depth: usize,
    /// Innere Kupferlagen neuer Boards
    #[serde(default)]
    pub inner_copper_layers: u8,
    /// Maximale Einträge im Command-Log
    #[serde(default = "default_command_log_capacity")]
    pub command_log_capacity: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            grid_interval_mm: GRID_INTERVAL_MM,
            max_undo_depth: MAX_UNDO_DEPTH,
            inner_copper_layers: INNER_COPPER_LAYERS,
            command_log_capacity: COMMAND_LOG_CAPACITY,
        }
    }
}

/// Serde-Default für `command_log_capacity` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_command_log_capacity() -> usize {
    COMMAND_LOG_CAPACITY
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Rasterweite als Länge; `None` (mit Warnung) bei Werten <= 0.
    pub fn grid_interval(&self) -> Option<PositiveLength> {
        match PositiveLength::new(Length::from_mm(self.grid_interval_mm)) {
            Ok(interval) => Some(interval),
            Err(e) => {
                log::warn!(
                    "Ungueltige Rasterweite, Board behaelt {}: {}",
                    DEFAULT_GRID_INTERVAL,
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip_keeps_values() {
        let options = EditorOptions {
            grid_interval_mm: 0.5,
            max_undo_depth: 10,
            inner_copper_layers: 2,
            command_log_capacity: 50,
        };
        let text = toml::to_string_pretty(&options).expect("TOML erwartet");
        let parsed: EditorOptions = toml::from_str(&text).expect("Optionen erwartet");
        assert_eq!(parsed, options);
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let parsed: EditorOptions =
            toml::from_str("grid_interval_mm = 1.0\nmax_undo_depth = 5\n").expect("Optionen erwartet");
        assert_eq!(parsed.inner_copper_layers, 0);
        assert_eq!(parsed.command_log_capacity, COMMAND_LOG_CAPACITY);
    }

    #[test]
    fn invalid_grid_interval_is_rejected() {
        let options = EditorOptions {
            grid_interval_mm: -1.0,
            ..EditorOptions::default()
        };
        assert!(options.grid_interval().is_none());
        assert_eq!(
            EditorOptions::default().grid_interval().map(PositiveLength::get),
            Some(DEFAULT_GRID_INTERVAL)
        );
    }

    #[test]
    fn load_from_broken_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("Temp-Verzeichnis erwartet");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "grid_interval_mm = [").expect("Schreiben erwartet");
        assert_eq!(EditorOptions::load_from_file(&path), EditorOptions::default());
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().expect("Temp-Verzeichnis erwartet");
        let path = dir.path().join("options.toml");
        let options = EditorOptions {
            max_undo_depth: 3,
            ..EditorOptions::default()
        };
        options.save_to_file(&path).expect("Speichern erwartet");
        assert_eq!(EditorOptions::load_from_file(&path), options);
    }
}
