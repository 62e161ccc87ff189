//! XML Import/Export für Board-Dateien.
//!
//! Jedes Element wird als eigenes XML-Element mit Attributen abgebildet;
//! Netzsegmente enthalten ihre Netzpunkte und Netzlinien als Kinder.

mod node;
pub mod parser;
pub mod writer;

pub use node::XmlNode;
pub use parser::{parse_board, parse_net_segment};
pub use writer::{net_segment_node, write_board};
