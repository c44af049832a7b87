use fnv::{FnvHashMap, FnvHashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

use crate::fastg::{EdgeName, EdgeTable};

/// The dual representation of an assembly graph: the assembly edges
/// of an EdgeTable become graph nodes, and their overlap adjacencies
/// become directed graph edges. The graph owns the table it was
/// built from; subgraphs own newly filtered tables of their own.
///
/// Neighbor names absent from the table still become nodes, as
/// opaque labels with no record behind them.
#[derive(Debug, Clone)]
pub struct AssemblyGraph {
    graph: DiGraph<EdgeName, ()>,
    indices: FnvHashMap<EdgeName, NodeIndex>,
    table: EdgeTable,
}

impl AssemblyGraph {
    /// Build the dual graph from an edge table. Never fails on
    /// well-formed input; a table with duplicate names produces
    /// undefined adjacency for the duplicated node (uniqueness is
    /// the parser's concern, not re-validated here).
    pub fn new(table: EdgeTable) -> Self {
        let mut graph = DiGraph::new();
        let mut indices: FnvHashMap<EdgeName, NodeIndex> =
            FnvHashMap::default();

        for record in table.iter() {
            let ix = graph.add_node(record.name.clone());
            indices.insert(record.name.clone(), ix);
        }

        for record in table.iter() {
            let from = indices[&record.name];
            for neighbor in &record.neighbors {
                let to = match indices.get(neighbor) {
                    Some(&ix) => ix,
                    None => {
                        let ix = graph.add_node(neighbor.clone());
                        indices.insert(neighbor.clone(), ix);
                        ix
                    }
                };
                // update_edge keeps repeated adjacencies as one edge
                graph.update_edge(from, to, ());
            }
        }

        AssemblyGraph {
            graph,
            indices,
            table,
        }
    }

    /// The table this graph was built from
    pub fn table(&self) -> &EdgeTable {
        &self.table
    }

    /// The underlying directed graph, nodes labeled by edge name
    pub fn graph(&self) -> &DiGraph<EdgeName, ()> {
        &self.graph
    }

    /// Node count, including dangling neighbor nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, name: &EdgeName) -> bool {
        self.indices.contains_key(name)
    }

    /// Filters the stored table to the rows named in `names`,
    /// preserving row order
    pub fn select(&self, names: &FnvHashSet<EdgeName>) -> EdgeTable {
        self.table.select(names)
    }

    /// A fresh graph over exactly the requested node set, with the
    /// adjacency implied by those rows' own neighbor lists. No state
    /// is shared with this graph.
    pub fn subgraph(&self, names: &FnvHashSet<EdgeName>) -> AssemblyGraph {
        AssemblyGraph::new(self.select(names))
    }

    /// The weakly connected components of the graph, largest first
    /// (ties broken by discovery order), each as a fresh subgraph.
    /// Connectivity ignores edge direction; the yielded subgraphs
    /// keep their directed structure. Every call re-derives the
    /// decomposition from one full union-find pass.
    pub fn components(&self) -> impl Iterator<Item = AssemblyGraph> + '_ {
        let mut vertex_sets = UnionFind::new(self.graph.node_count());
        for edge in self.graph.edge_references() {
            vertex_sets.union(edge.source().index(), edge.target().index());
        }

        let mut sets: Vec<FnvHashSet<EdgeName>> = Vec::new();
        let mut slots: FnvHashMap<usize, usize> = FnvHashMap::default();
        for ix in self.graph.node_indices() {
            let root = vertex_sets.find(ix.index());
            let slot = *slots.entry(root).or_insert_with(|| {
                sets.push(FnvHashSet::default());
                sets.len() - 1
            });
            sets[slot].insert(self.graph[ix].clone());
        }

        // stable sort: equal-sized components stay in discovery order
        sets.sort_by_key(|set| std::cmp::Reverse(set.len()));
        sets.into_iter().map(move |set| self.subgraph(&set))
    }
}
