// Slidepath engine: trombone slide-position optimization.
//
// Given an ordered sequence of pitches, the engine enumerates every
// physically valid (slide position, harmonic partial) state for each pitch
// and picks the single best path through those choices under a selected
// objective: minimal slide travel, minimal direction reversals, minimal
// partial switching (glissando), or maximal partial switching (legato).
//
// Architecture:
// - instrument.rs: immutable instrument config (fundamental pitch + slide
//   length), presets and JSON loading, physical slide-extension geometry
// - enumerate.rs: per-pitch candidate states via the harmonic series, with
//   the slide-length feasibility bound
// - graph.rs: layered DAG over candidate states, four objective weightings,
//   direction-tagged state doubling
// - solver.rs: forward layered-DP shortest path and the `optimize` entry
// - error.rs: deterministic failure conditions
//
// The whole pipeline is a pure synchronous computation: each call builds
// its own graph and returns a fresh result, so identical inputs always
// produce identical outputs (including tie-breaks among equal-cost paths).

pub mod enumerate;
pub mod error;
pub mod graph;
pub mod instrument;
pub mod solver;

pub use enumerate::{CandidateState, Direction, enumerate_candidates, position_for_partial};
pub use error::{OptimizeError, Result};
pub use graph::{OptimizationMode, PathGraph, build_graph};
pub use instrument::InstrumentConfig;
pub use solver::{optimize, shortest_path};
