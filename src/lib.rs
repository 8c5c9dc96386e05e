// Grift: multi-signal scam and fraud risk scanner.
//
// This is the library root. Each module corresponds to a major subsystem
// of the risk assessment pipeline.

pub mod config;
pub mod detect;
pub mod graph;
pub mod osint;
pub mod output;
pub mod pipeline;
pub mod scoring;
