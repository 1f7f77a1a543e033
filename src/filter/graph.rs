//! Undirected table adjacency built from relations.
//!
//! Every relation contributes an edge `table ↔ parent_table`. Expansion is a
//! breadth-first walk bounded by hop count.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};

use crate::schema::Schema;

/// Relation graph over table positions.
#[derive(Debug, Clone)]
pub struct RelationGraph {
    /// Node weight: table position. Edge weight: relation position.
    graph: UnGraph<usize, usize>,
    node_index: HashMap<usize, NodeIndex>,
}

impl RelationGraph {
    /// Build the graph leaving out the `removed` tables and any relation
    /// touching them.
    pub fn build_without(schema: &Schema, removed: &HashSet<usize>) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut node_index = HashMap::new();

        for position in 0..schema.tables().len() {
            if removed.contains(&position) {
                continue;
            }
            node_index.insert(position, graph.add_node(position));
        }

        for (position, relation) in schema.relations().iter().enumerate() {
            let (Some(&a), Some(&b)) = (
                node_index.get(&relation.table),
                node_index.get(&relation.parent_table),
            ) else {
                continue;
            };
            graph.add_edge(a, b, position);
        }

        Self { graph, node_index }
    }

    /// All tables within `distance` hops of any seed. Seeds not in the graph
    /// are ignored.
    pub fn expand(&self, seeds: &HashSet<usize>, distance: usize) -> HashSet<usize> {
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();

        for seed in seeds {
            if let Some(&idx) = self.node_index.get(seed) {
                if visited.insert(idx) {
                    queue.push_back((idx, 0));
                }
            }
        }

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= distance {
                continue;
            }
            for neighbor in self.graph.neighbors(current) {
                if visited.insert(neighbor) {
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }

        visited.into_iter().map(|idx| self.graph[idx]).collect()
    }
}
