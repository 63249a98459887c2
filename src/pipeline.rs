//! Orchestrates reader/generator → builder → squisher → (optional)
//! relabeler, emitting phase timings along the way.
//!
//! The reader, generator, and CLI-driven configuration are out-of-scope
//! external collaborators; this module expresses their contracts as traits
//! ([`Reader`], [`Generator`]) plus a builder-style [`PipelineConfig`] rather
//! than implementing file/text parsing or Kronecker/uniform generation.

use std::time::Instant;

use crate::csr::{build_csr, CsrGraph};
use crate::edge::EdgeList;
use crate::error::IngestError;
use crate::relabel::relabel_by_degree;
use crate::squish::squish;

/// Reports elapsed wall time for a named phase, the in-core stand-in for
/// the external `PrintTime` side-effecting reporter.
pub trait PhaseTimer {
    /// Called once a phase has completed, with its label and elapsed time.
    fn report(&self, label: &str, elapsed: std::time::Duration);
}

/// Times a phase via `tracing::info!`, matching the rest of the lineage's
/// `tracing`-based observability.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingPhaseTimer;

impl PhaseTimer for TracingPhaseTimer {
    fn report(&self, label: &str, elapsed: std::time::Duration) {
        tracing::info!(phase = label, seconds = elapsed.as_secs_f64(), "phase complete");
    }
}

/// An out-of-core edge source: a file reader in the full system, supplying
/// an already-parsed [`EdgeList`]. Parsing text/binary edge-list formats is
/// not this crate's concern; only the contract is declared here.
pub trait Reader<W> {
    /// File suffix this reader was constructed for (e.g. `"el"`, `"wel"`).
    fn suffix(&self) -> &str;

    /// Reads the configured file into an edge list.
    fn read_file(&self, needs_weights: bool) -> Result<EdgeList<W>, IngestError>;

    /// Reads a pre-serialized CSR graph directly, bypassing the builder
    /// entirely (the `.sg`/`.wsg` fast path described by the orchestrator).
    fn read_serialized_graph(&self) -> Result<CsrGraph<W>, IngestError>;
}

/// A synthetic graph source (Kronecker/uniform generators in the full
/// system). Only the contract is declared here; generation itself is out of
/// scope.
pub trait Generator<W> {
    /// Produces an edge list of `2^scale` vertices and
    /// `edge_factor * 2^scale` edges.
    fn generate(&self, scale: u32, edge_factor: u32, uniform: bool) -> EdgeList<W>;
}

/// Fluent configuration for [`make_graph`], standing in for the
/// out-of-scope CLI-driven `Configuration` collaborator.
#[derive(Clone, Debug, Default)]
pub struct PipelineConfig {
    filename: Option<String>,
    scale: Option<u32>,
    edge_factor: u32,
    uniform: bool,
    symmetrize: bool,
    invert: bool,
    threads: Option<usize>,
}

impl PipelineConfig {
    /// Starts a config with defaults: no file, no synthetic scale,
    /// `edge_factor = 16`, `uniform = false`, `symmetrize = false`,
    /// `invert = false`.
    #[must_use]
    pub fn new() -> Self {
        PipelineConfig {
            filename: None,
            scale: None,
            edge_factor: 16,
            uniform: false,
            symmetrize: false,
            invert: false,
            threads: None,
        }
    }

    /// Sets the input filename (mutually exclusive with a synthetic scale,
    /// checked at [`make_graph`] time).
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Sets the synthetic graph scale (`2^scale` vertices).
    #[must_use]
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Overrides the default edge factor (`16`) used for synthetic generation.
    #[must_use]
    pub fn with_edge_factor(mut self, edge_factor: u32) -> Self {
        self.edge_factor = edge_factor;
        self
    }

    /// Requests the uniform-random generator instead of Kronecker.
    #[must_use]
    pub fn with_uniform(mut self, uniform: bool) -> Self {
        self.uniform = uniform;
        self
    }

    /// Requests an undirected (symmetrized) build.
    #[must_use]
    pub fn with_symmetrize(mut self, symmetrize: bool) -> Self {
        self.symmetrize = symmetrize;
        self
    }

    /// Requests an independently-built in-adjacency (transpose) side for a
    /// directed graph. Ignored when `symmetrize` is set.
    #[must_use]
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Overrides the thread count used for the parallel build/squish/relabel
    /// phases: [`make_graph`]/[`make_graph_from_edges`] build a dedicated
    /// `rayon::ThreadPool` with this many threads and run those phases via
    /// [`rayon::ThreadPool::install`] instead of the ambient global pool.
    /// `None` (the default) uses rayon's own global default pool.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn scale(&self) -> i64 {
        self.scale.map_or(-1, i64::from)
    }

    #[must_use]
    pub fn uniform(&self) -> bool {
        self.uniform
    }

    #[must_use]
    pub fn symmetrize(&self) -> bool {
        self.symmetrize
    }
}

/// Runs `f` (the build/squish/relabel phases) on a dedicated `rayon`
/// thread pool sized to `threads`, or on the ambient global pool when
/// `threads` is `None`. This is what makes [`PipelineConfig::with_threads`]
/// actually take effect.
fn with_thread_pool<R, F>(threads: Option<usize>, f: F) -> Result<R, IngestError>
where
    F: FnOnce() -> Result<R, IngestError> + Send,
    R: Send,
{
    match threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|_| IngestError::Allocation {
                    what: "rayon thread pool",
                    len: n,
                })?;
            pool.install(f)
        }
        None => f(),
    }
}

/// Drives the full pipeline: obtain an edge list (from a reader or
/// generator), build a raw CSR graph, squish it, and optionally relabel it.
///
/// The `.sg`/`.wsg` serialized-graph fast path is the caller's
/// responsibility: if `reader.suffix()` indicates a serialized graph, call
/// [`Reader::read_serialized_graph`] directly instead of this function.
pub fn make_graph<W, R, G, T>(
    config: &PipelineConfig,
    reader: Option<&R>,
    generator: Option<&G>,
    timer: &T,
) -> Result<CsrGraph<W>, IngestError>
where
    W: Copy + Send + Sync,
    R: Reader<W>,
    G: Generator<W>,
    T: PhaseTimer + Sync,
{
    let start = Instant::now();
    let edges: EdgeList<W> = if let Some(reader) = reader {
        reader.read_file(false)?
    } else if let Some(generator) = generator {
        let scale = config.scale.unwrap_or(0);
        generator.generate(scale, config.edge_factor, config.uniform)
    } else {
        Vec::new()
    };
    timer.report("load", start.elapsed());

    with_thread_pool(config.threads, || {
        let start = Instant::now();
        let raw = build_csr(&edges, None, config.symmetrize, config.invert)?;
        timer.report("build", start.elapsed());

        let start = Instant::now();
        let clean = squish(&raw);
        timer.report("squish", start.elapsed());

        Ok(clean)
    })
}

/// Builds directly from an in-memory edge list, skipping the reader/
/// generator collaborators entirely. The common entry point for callers
/// that already have edges (tests, embedders, the serialized-graph fast
/// path's inverse).
pub fn make_graph_from_edges<W, T>(
    edges: &EdgeList<W>,
    config: &PipelineConfig,
    timer: &T,
) -> Result<CsrGraph<W>, IngestError>
where
    W: Copy + Send + Sync,
    T: PhaseTimer + Sync,
{
    with_thread_pool(config.threads, || {
        let start = Instant::now();
        let raw = build_csr(edges, None, config.symmetrize, config.invert)?;
        timer.report("build", start.elapsed());

        let start = Instant::now();
        let clean = squish(&raw);
        timer.report("squish", start.elapsed());

        if config.symmetrize {
            let start = Instant::now();
            let relabeled = relabel_by_degree(&clean)?;
            timer.report("relabel", start.elapsed());
            Ok(relabeled)
        } else {
            Ok(clean)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use crate::node::NodeId;

    struct NullTimer;
    impl PhaseTimer for NullTimer {
        fn report(&self, _label: &str, _elapsed: std::time::Duration) {}
    }

    fn e(u: usize, v: usize) -> Edge<()> {
        Edge::new(NodeId(u), NodeId(v))
    }

    #[test]
    fn builds_and_squishes_from_edges() {
        let edges = vec![e(0, 1), e(1, 2), e(0, 1), e(2, 0), e(1, 1)];
        let config = PipelineConfig::new().with_symmetrize(true);
        let g = make_graph_from_edges(&edges, &config, &NullTimer).expect("pipeline");
        assert_eq!(g.num_nodes(), 3);
        let n0: Vec<usize> = g.out_neigh(NodeId(0)).iter().map(|d| d.target.0).collect();
        assert_eq!(n0, vec![1, 2]);
    }

    #[test]
    fn empty_input_yields_empty_graph() {
        let edges: Vec<Edge<()>> = vec![];
        let config = PipelineConfig::new();
        let g = make_graph_from_edges(&edges, &config, &NullTimer).expect("pipeline");
        assert_eq!(g.num_nodes(), 0);
        assert_eq!(g.num_edges_directed(), 0);
    }

    #[test]
    fn with_threads_runs_on_a_dedicated_pool_of_that_size() {
        let edges = vec![e(0, 1), e(1, 2), e(0, 1), e(2, 0), e(1, 1)];
        let config = PipelineConfig::new().with_symmetrize(true).with_threads(2);
        let g = make_graph_from_edges(&edges, &config, &NullTimer).expect("pipeline");
        assert_eq!(g.num_nodes(), 3);
        let n0: Vec<usize> = g.out_neigh(NodeId(0)).iter().map(|d| d.target.0).collect();
        assert_eq!(n0, vec![1, 2]);
    }

    #[test]
    fn config_defaults_match_documented_contract() {
        let config = PipelineConfig::new();
        assert_eq!(config.filename(), "");
        assert_eq!(config.scale(), -1);
        assert!(!config.uniform());
        assert!(!config.symmetrize());
    }
}
