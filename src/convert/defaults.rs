//! Calculator defaults derivation.
//!
//! Picks the slowest and fastest belt and pipe from the transport list.
//! Only flat conveyors count as belts; U-shape and loose-material conveyors
//! have no FactorioLab equivalent and are left out. Everything beyond the
//! four belt/pipe extremes stays an empty or null placeholder.

use crate::model::Defaults;
use crate::slug::id_to_slug;
use crate::source::Transport;

/// Derive defaults from the transport list.
pub fn derive_defaults(transports: &[Transport]) -> Defaults {
    let mut belts: Vec<(String, f64)> = Vec::new();
    let mut pipes: Vec<(String, f64)> = Vec::new();

    for transport in transports {
        let id_lower = transport.id.to_lowercase();
        let entry = (id_to_slug(&transport.id), transport.throughput_per_second);
        if id_lower.contains("flatconveyor") {
            belts.push(entry);
        } else if id_lower.contains("pipe") {
            pipes.push(entry);
        }
    }

    belts.sort_by(|a, b| a.1.total_cmp(&b.1));
    pipes.sort_by(|a, b| a.1.total_cmp(&b.1));

    Defaults {
        min_belt: belts.first().map(|(slug, _)| slug.clone()),
        max_belt: belts.last().map(|(slug, _)| slug.clone()),
        min_pipe: pipes.first().map(|(slug, _)| slug.clone()),
        max_pipe: pipes.last().map(|(slug, _)| slug.clone()),
        ..Defaults::default()
    }
}
