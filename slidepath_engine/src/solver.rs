// Shortest path through the layered graph, plus the public `optimize` entry.
//
// The graph is acyclic, layered, and non-negatively weighted, so a single
// forward dynamic-programming sweep finds the optimum: accumulate the
// cheapest cost-to-reach for every state layer by layer, then backtrack
// predecessor links from the cheapest final state. Relaxation uses strict
// `<` and scans states in enumeration order, which makes tie-breaking
// deterministic: among equal-cost paths, the earliest-enumerated
// (lowest-partial) predecessor wins, matching the reference outputs.

use crate::enumerate::CandidateState;
use crate::error::Result;
use crate::graph::{OptimizationMode, PathGraph, build_graph};
use crate::instrument::InstrumentConfig;
use slidepath_pitch::Pitch;

/// Cost-to-reach and predecessor link for one node during the sweep.
#[derive(Clone, Copy)]
struct NodeCost {
    cost: f64,
    pred: Option<usize>,
}

/// Minimum-total-weight path through the graph: one state per layer.
pub fn shortest_path(graph: &PathGraph) -> Vec<CandidateState> {
    let mut table: Vec<Vec<NodeCost>> = Vec::with_capacity(graph.layers.len());
    // Every first-layer state is a zero-cost entry point.
    table.push(vec![
        NodeCost {
            cost: 0.0,
            pred: None
        };
        graph.layers[0].len()
    ]);

    for (i, layer_edges) in graph.edges.iter().enumerate() {
        let mut next = vec![
            NodeCost {
                cost: f64::INFINITY,
                pred: None
            };
            graph.layers[i + 1].len()
        ];
        for (j, outgoing) in layer_edges.iter().enumerate() {
            let from = table[i][j];
            if !from.cost.is_finite() {
                // Unreachable direction variant.
                continue;
            }
            for edge in outgoing {
                let cost = from.cost + edge.weight;
                if cost < next[edge.to].cost {
                    next[edge.to] = NodeCost {
                        cost,
                        pred: Some(j),
                    };
                }
            }
        }
        table.push(next);
    }

    // Cheapest exit from the last layer; strict `<` keeps the earliest.
    let last = table.len() - 1;
    let mut best = 0;
    for (j, node) in table[last].iter().enumerate() {
        if node.cost < table[last][best].cost {
            best = j;
        }
    }
    log::debug!("optimal path cost {}", table[last][best].cost);

    let mut path = Vec::with_capacity(graph.layers.len());
    let mut layer = last;
    let mut index = best;
    loop {
        path.push(graph.layers[layer][index]);
        match table[layer][index].pred {
            Some(previous) if layer > 0 => {
                layer -= 1;
                index = previous;
            }
            _ => break,
        }
    }
    path.reverse();
    path
}

/// Choose the ergonomically best playable state for each pitch, in order.
///
/// `round_positions` rounds each returned position to the nearest integer
/// position after the optimal path is found; rounding never influences the
/// weights used during optimization.
pub fn optimize(
    pitches: &[Pitch],
    instrument: &InstrumentConfig,
    mode: OptimizationMode,
    round_positions: bool,
) -> Result<Vec<CandidateState>> {
    let graph = build_graph(pitches, instrument, mode)?;
    let mut path = shortest_path(&graph);
    if round_positions {
        for state in &mut path {
            state.position = state.position.round();
        }
    }
    Ok(path)
}
