//! Heap graph analysis service
//!
//! Chains decode → branch enumeration → retained size.
//!
//! ## Example
//! ```rust,ignore
//! use heapgraph_ir::config::{HeapGraphConfig, Preset};
//! use heapgraph_ir::pipeline::HeapGraphService;
//!
//! let service = HeapGraphService::new(HeapGraphConfig::preset(Preset::Fast))?;
//! let report = service.analyze_nodes(&raw, &[0, 42])?;
//! ```

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::config::HeapGraphConfig;
use crate::errors::Result;
use crate::features::branch_enumeration::{BranchEnumerator, EnumerationOutcome, HeapGraph};
use crate::features::retained_size::RetainedSizeCalculator;
use crate::features::snapshot_decoding::{RawSnapshot, SnapshotDecoder, SnapshotDecoderPort};
use crate::pipeline::report::{GraphSummary, RetainedSizeEntry, RetainedSizeReport};
use crate::shared::models::{HeapNode, NodeIndex};

pub struct HeapGraphService {
    config: HeapGraphConfig,
    decoder: Box<dyn SnapshotDecoderPort>,
    enumerator: BranchEnumerator,
    calculator: RetainedSizeCalculator,
}

impl HeapGraphService {
    /// Build the stages from a validated configuration
    pub fn new(config: HeapGraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            decoder: Box::new(SnapshotDecoder::new(config.decoder.clone())),
            enumerator: BranchEnumerator::new(config.enumeration.clone()),
            calculator: RetainedSizeCalculator::from_config(&config.retained_size),
            config,
        })
    }

    /// Replace the decoder (builder pattern)
    pub fn with_decoder(mut self, decoder: Box<dyn SnapshotDecoderPort>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Replace the retained-size calculator (builder pattern)
    pub fn with_calculator(mut self, calculator: RetainedSizeCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn config(&self) -> &HeapGraphConfig {
        &self.config
    }

    pub fn decode(&self, raw: &RawSnapshot) -> Result<HeapGraph> {
        let nodes = self.decoder.decode(raw)?;
        debug!(decoder = self.decoder.name(), nodes = nodes.len(), "Snapshot decoded");
        Ok(HeapGraph::new(nodes))
    }

    pub fn summarize(&self, raw: &RawSnapshot) -> Result<GraphSummary> {
        Ok(GraphSummary::of(&self.decode(raw)?))
    }

    /// Global enumeration plus a retained size for every node
    pub fn analyze_all(&self, raw: &RawSnapshot) -> Result<RetainedSizeReport> {
        Ok(self.analyze_graph(&self.decode(raw)?))
    }

    /// Subset enumeration plus retained sizes for the requested nodes only
    pub fn analyze_nodes(&self, raw: &RawSnapshot, indexes: &[NodeIndex]) -> Result<RetainedSizeReport> {
        Ok(self.analyze_graph_nodes(&self.decode(raw)?, indexes))
    }

    pub fn analyze_graph(&self, graph: &HeapGraph) -> RetainedSizeReport {
        let outcome = self.enumerator.enumerate_all(graph);
        self.report(graph.nodes().iter(), outcome)
    }

    /// Repeated indexes are analyzed once, at their first position
    pub fn analyze_graph_nodes(&self, graph: &HeapGraph, indexes: &[NodeIndex]) -> RetainedSizeReport {
        let mut seen = FxHashSet::default();
        let starts: Vec<NodeIndex> = indexes.iter().copied().filter(|i| seen.insert(*i)).collect();

        let outcome = self.enumerator.enumerate_subset(graph, &starts);
        let nodes = starts.iter().filter_map(|&i| graph.node(i));
        self.report(nodes, outcome)
    }

    fn report<'a, I>(&self, nodes: I, outcome: EnumerationOutcome) -> RetainedSizeReport
    where
        I: Iterator<Item = &'a HeapNode> + Clone,
    {
        let sizes = self.calculator.retained_sizes(nodes.clone(), &outcome.branches);
        let entries: Vec<RetainedSizeEntry> = nodes
            .zip(sizes)
            .map(|(node, retained)| RetainedSizeEntry::new(node, retained))
            .collect();

        info!(
            strategy = %self.config.retained_size.strategy,
            entries = entries.len(),
            branches = outcome.branches.len(),
            complete = outcome.is_complete(),
            "Retained-size analysis finished"
        );

        RetainedSizeReport {
            strategy: self.config.retained_size.strategy,
            entries,
            branch_count: outcome.branches.len(),
            truncation: outcome.truncation,
            skipped_starts: outcome.skipped_starts,
        }
    }
}

impl std::fmt::Debug for HeapGraphService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeapGraphService")
            .field("config", &self.config)
            .field("decoder", &self.decoder.name())
            .field("calculator", &self.calculator)
            .finish()
    }
}
