//! Community analysis module

pub mod detection;
pub mod metrics;

use serde::{Serialize, Deserialize};

pub use detection::{louvain, CommunityDetection};
pub use metrics::{modularity, summarize_communities};

/// Assignment of every node to exactly one community.
///
/// Community ids are dense (`0..community_count`) and numbered in order of
/// first appearance when nodes are scanned by ascending id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    assignment: Vec<usize>,
    community_count: usize,
}

impl Partition {
    /// Every node in its own community
    pub fn singletons(node_count: usize) -> Self {
        Self {
            assignment: (0..node_count).collect(),
            community_count: node_count,
        }
    }

    /// Build from arbitrary community labels, renumbering them densely
    pub fn from_assignment(labels: &[usize]) -> Self {
        let mut renumber = std::collections::HashMap::new();
        let assignment = labels
            .iter()
            .map(|&label| {
                let next = renumber.len();
                *renumber.entry(label).or_insert(next)
            })
            .collect();

        Self {
            assignment,
            community_count: renumber.len(),
        }
    }

    /// Number of nodes covered
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    pub fn community_count(&self) -> usize {
        self.community_count
    }

    pub fn community_of(&self, node: usize) -> usize {
        self.assignment[node]
    }

    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Members of each community, indexed by community id, ascending node ids
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.community_count];
        for (node, &community) in self.assignment.iter().enumerate() {
            members[community].push(node);
        }
        members
    }

    /// Size of each community, indexed by community id
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.community_count];
        for &community in &self.assignment {
            sizes[community] += 1;
        }
        sizes
    }
}

/// Summary of one detected community
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    /// Community id from the partition
    pub id: usize,

    /// Members of this community (node ids)
    pub members: Vec<usize>,

    /// Size of the community
    pub size: usize,

    /// Density: directed edges inside / potential directed edges
    pub density: f64,

    /// Mean total degree (in + out) of members in the directed graph
    pub average_degree: f64,

    /// Highest-degree members, most connected first
    pub central_members: Vec<usize>,
}
