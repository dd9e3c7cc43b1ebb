// Layered path graph over per-note candidate states.
//
// One layer per input pitch, filled by enumerate.rs in ascending partial
// order. Edges run only between consecutive layers, as a full cross product
// weighted by the active objective. The virtual START and END endpoints are
// implicit: every first-layer state is a zero-cost entry and every
// last-layer state a zero-cost exit, so they never need materializing.
//
// The direction objective doubles each layer into In/Out variants of every
// state. Its edge rules are a pure function of the two positions' ordering:
// a retraction must land on an In state (costing 1 only when it reverses an
// outward slide), an extension mirrors that onto Out, and a repeated
// position keeps whatever direction the slide already had.
//
// Graphs are built fresh per call and owned by the caller; nothing here is
// shared or cached.

use crate::enumerate::{CandidateState, Direction, enumerate_candidates};
use crate::error::OptimizeError;
use crate::instrument::InstrumentConfig;
use serde::{Deserialize, Serialize};
use slidepath_pitch::Pitch;
use std::str::FromStr;

/// The optimization objective for a pitch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptimizationMode {
    /// Minimize total slide travel.
    Distance,
    /// Minimize slide direction reversals.
    Direction,
    /// Minimize partial switches, favoring continuous glissando.
    Gliss,
    /// Maximize partial switches, favoring natural slide legato.
    Legato,
}

impl OptimizationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OptimizationMode::Distance => "distance",
            OptimizationMode::Direction => "direction",
            OptimizationMode::Gliss => "gliss",
            OptimizationMode::Legato => "legato",
        }
    }
}

impl FromStr for OptimizationMode {
    type Err = OptimizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(OptimizationMode::Distance),
            "direction" => Ok(OptimizationMode::Direction),
            "gliss" => Ok(OptimizationMode::Gliss),
            "legato" => Ok(OptimizationMode::Legato),
            other => Err(OptimizeError::UnknownMode(other.to_string())),
        }
    }
}

/// A weighted edge to a node in the next layer.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// Index into the next layer.
    pub to: usize,
    pub weight: f64,
}

/// The layered DAG for one optimization call.
///
/// Invariant: `layers` is non-empty, every layer is non-empty, and
/// `edges[i][j]` holds the outgoing edges of `layers[i][j]` into layer i+1
/// (`edges` has one entry per adjacent layer pair).
#[derive(Debug, Clone)]
pub struct PathGraph {
    pub layers: Vec<Vec<CandidateState>>,
    pub edges: Vec<Vec<Vec<Edge>>>,
}

/// Build the layered graph for `pitches` under `mode`.
pub fn build_graph(
    pitches: &[Pitch],
    instrument: &InstrumentConfig,
    mode: OptimizationMode,
) -> crate::error::Result<PathGraph> {
    if pitches.is_empty() {
        return Err(OptimizeError::EmptySequence);
    }

    let mut layers = Vec::with_capacity(pitches.len());
    for (index, &pitch) in pitches.iter().enumerate() {
        let mut layer = enumerate_candidates(index, pitch, instrument)?;
        if mode == OptimizationMode::Direction {
            layer = double_with_directions(&layer);
        }
        layers.push(layer);
    }

    let mut edges = Vec::with_capacity(layers.len().saturating_sub(1));
    for pair in layers.windows(2) {
        let mut layer_edges = Vec::with_capacity(pair[0].len());
        for from in &pair[0] {
            let mut outgoing = Vec::new();
            for (to, next) in pair[1].iter().enumerate() {
                if let Some(weight) = edge_weight(from, next, mode) {
                    outgoing.push(Edge { to, weight });
                }
            }
            layer_edges.push(outgoing);
        }
        edges.push(layer_edges);
    }

    log::debug!(
        "built {} graph: {} layers, {} states",
        mode.as_str(),
        layers.len(),
        layers.iter().map(Vec::len).sum::<usize>()
    );
    Ok(PathGraph { layers, edges })
}

/// In/Out variants of each state, In first so tie-breaking stays aligned
/// with enumeration order.
fn double_with_directions(layer: &[CandidateState]) -> Vec<CandidateState> {
    let mut doubled = Vec::with_capacity(layer.len() * 2);
    for state in layer {
        doubled.push(CandidateState {
            direction: Some(Direction::In),
            ..*state
        });
        doubled.push(CandidateState {
            direction: Some(Direction::Out),
            ..*state
        });
    }
    doubled
}

/// Weight of the edge `from -> to` under `mode`, or None where the mode
/// forbids the move entirely (direction mode only).
fn edge_weight(from: &CandidateState, to: &CandidateState, mode: OptimizationMode) -> Option<f64> {
    match mode {
        OptimizationMode::Distance => Some((from.position - to.position).abs()),
        OptimizationMode::Gliss => Some(if from.partial == to.partial { 0.0 } else { 1.0 }),
        OptimizationMode::Legato => Some(if from.partial == to.partial { 1.0 } else { 0.0 }),
        OptimizationMode::Direction => direction_weight(from, to),
    }
}

fn direction_weight(from: &CandidateState, to: &CandidateState) -> Option<f64> {
    let start = from.direction?;
    let end = to.direction?;
    if from.position > to.position {
        // Slide must retract: only In is a valid arrival.
        match (start, end) {
            (Direction::In, Direction::In) => Some(0.0),
            (Direction::Out, Direction::In) => Some(1.0),
            _ => None,
        }
    } else if from.position < to.position {
        // Slide must extend: only Out is a valid arrival.
        match (start, end) {
            (Direction::Out, Direction::Out) => Some(0.0),
            (Direction::In, Direction::Out) => Some(1.0),
            _ => None,
        }
    } else {
        // No movement: direction carries through unchanged.
        if start == end { Some(0.0) } else { None }
    }
}
