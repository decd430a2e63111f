use log::{debug, warn};

use crate::error::{CliqueError, Result};
use crate::graph::{VertexId, WeightedGraph};

/** Candidate clique: assignment[i] = 1 iff vertex i is in the clique */
pub type Assignment = Vec<u8>;

/// largest number of vertices the exhaustive enumeration accepts
pub const MAX_BRUTE_FORCE_VERTICES: usize = 63;

/** result of the clique checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// the assignment is a valid clique of the given size
    Ok(usize),
    /// the assignment does not have one entry per vertex
    WrongLength {
        /// number of vertices
        expected: usize,
        /// length of the assignment
        got: usize,
    },
    /// the assignment contains a value other than 0 or 1 at this index
    InvalidValue(usize),
    /// the assignment does not select the right number of vertices
    WrongSize {
        /// required clique size
        expected: usize,
        /// number of selected vertices
        got: usize,
    },
    /// two selected vertices are not adjacent
    MissingEdge(VertexId, VertexId),
}

impl CheckerResult {
    /// true iff the checked assignment is a valid clique
    pub fn is_ok(&self) -> bool { matches!(self, CheckerResult::Ok(_)) }
}

/**
checks that the assignment selects exactly k vertices that are pairwise adjacent.
Returns the first violation found (pairs are checked in lexicographic order).
*/
pub fn check_clique(assignment:&[u8], graph:&WeightedGraph, k:usize) -> CheckerResult {
    let n = graph.nb_vertices();
    if assignment.len() != n {
        return CheckerResult::WrongLength { expected: n, got: assignment.len() };
    }
    if let Some(i) = assignment.iter().position(|x| *x > 1) {
        return CheckerResult::InvalidValue(i);
    }
    let chosen = clique_vertices(assignment);
    if chosen.len() != k {
        return CheckerResult::WrongSize { expected: k, got: chosen.len() };
    }
    for (pos,u) in chosen.iter().enumerate() {
        for v in &chosen[pos+1..] {
            if !graph.are_adjacent(*u, *v) {
                return CheckerResult::MissingEdge(*u, *v);
            }
        }
    }
    CheckerResult::Ok(k)
}

/** returns true iff the assignment represents a clique of size k */
pub fn is_valid_clique(assignment:&[u8], graph:&WeightedGraph, k:usize) -> bool {
    check_clique(assignment, graph, k).is_ok()
}

/// vertices selected by the assignment (increasing order)
pub fn clique_vertices(assignment:&[u8]) -> Vec<VertexId> {
    assignment.iter().enumerate()
        .filter(|(_,x)| **x == 1)
        .map(|(i,_)| i)
        .collect()
}

/** n-bit binary representation of x. The most significant bit is vertex 0. */
pub fn assignment_from_index(x:u64, n:usize) -> Assignment {
    (0..n).map(|i| ((x >> (n-1-i)) & 1) as u8).collect()
}

/**
enumerates all 2^n assignments in increasing integer order and returns the first
clique of size k. Returns None if there is no such clique.

# Errors
 - if the graph has more than `MAX_BRUTE_FORCE_VERTICES` vertices
*/
pub fn try_find_clique(graph:&WeightedGraph, k:usize) -> Result<Option<Assignment>> {
    let n = graph.nb_vertices();
    if n > MAX_BRUTE_FORCE_VERTICES {
        return Err(CliqueError::TooManyVertices { n, max: MAX_BRUTE_FORCE_VERTICES });
    }
    if k > n { // no assignment has more than n ones
        return Ok(None);
    }
    let nb_candidates:u64 = 1 << n;
    for x in 0..nb_candidates {
        // cheap filter before building the candidate
        if x.count_ones() as usize != k { continue; }
        let candidate = assignment_from_index(x, n);
        if is_valid_clique(&candidate, graph, k) {
            debug!("brute force: clique found after {} candidates", x+1);
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/**
brute force search (see `try_find_clique`).

A graph with more than `MAX_BRUTE_FORCE_VERTICES` vertices is not enumerated: the error is
logged and None is returned, although such a graph may contain a clique of size k.
Use `try_find_clique` to tell both cases apart.
*/
pub fn find_clique(graph:&WeightedGraph, k:usize) -> Option<Assignment> {
    match try_find_clique(graph, k) {
        Ok(res) => res,
        Err(e) => {
            warn!("brute force skipped: {}", e);
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    /// 0-1-2 triangle, 2-3 edge, 4 isolated
    fn small_graph() -> WeightedGraph {
        WeightedGraph::from_edges(5, &[(0,1,3.), (1,2,-1.), (0,2,2.5), (2,3,7.)]).unwrap()
    }

    #[test]
    fn test_valid_clique() {
        let g = small_graph();
        assert!(is_valid_clique(&[1,1,1,0,0], &g, 3));
        assert!(is_valid_clique(&[0,0,1,1,0], &g, 2));
        assert!(is_valid_clique(&[0,0,0,0,1], &g, 1));
    }

    #[test]
    fn test_negative_weights_are_edges() {
        let g = small_graph();
        assert!(is_valid_clique(&[0,1,1,0,0], &g, 2));
    }

    #[test]
    fn test_wrong_size_is_rejected() {
        let g = small_graph();
        assert_eq!(check_clique(&[1,1,1,0,0], &g, 2), CheckerResult::WrongSize { expected: 2, got: 3 });
        assert!(!is_valid_clique(&[1,1,0,0,0], &g, 3));
        assert!(!is_valid_clique(&[0,0,0,0,0], &g, 1));
    }

    #[test]
    fn test_missing_edge_is_rejected() {
        let g = small_graph();
        assert_eq!(check_clique(&[1,0,1,1,0], &g, 3), CheckerResult::MissingEdge(0,3));
        assert_eq!(check_clique(&[0,0,0,1,1], &g, 2), CheckerResult::MissingEdge(3,4));
    }

    #[test]
    fn test_malformed_assignments() {
        let g = small_graph();
        assert_eq!(check_clique(&[1,1,1], &g, 3), CheckerResult::WrongLength { expected: 5, got: 3 });
        assert_eq!(check_clique(&[1,2,0,0,0], &g, 2), CheckerResult::InvalidValue(1));
    }

    #[test]
    fn test_empty_clique() {
        let g = small_graph();
        assert!(is_valid_clique(&[0,0,0,0,0], &g, 0));
        assert_eq!(find_clique(&g, 0), Some(vec![0,0,0,0,0]));
    }

    #[test]
    fn test_k_larger_than_n() {
        let g = small_graph();
        assert!(!is_valid_clique(&[1,1,1,1,1], &g, 6));
        assert_eq!(find_clique(&g, 6), None);
        assert_eq!(find_clique(&g, 100), None);
    }

    #[test]
    fn test_assignment_index_bijection() {
        assert_eq!(assignment_from_index(0b10011, 5), vec![1,0,0,1,1]);
        assert_eq!(assignment_from_index(1, 3), vec![0,0,1]);
        for x in 0..32 {
            let a = assignment_from_index(x, 5);
            let back = a.iter().fold(0, |acc, b| (acc << 1) | u64::from(*b));
            assert_eq!(back, x);
        }
    }

    #[test]
    fn test_brute_force_returns_first_in_integer_order() {
        let g = small_graph();
        // size 2 cliques in increasing integer order: 00011 (3-4) is not a clique,
        // the first valid one is 00110 (2-3)
        assert_eq!(find_clique(&g, 2), Some(vec![0,0,1,1,0]));
        assert_eq!(find_clique(&g, 3), Some(vec![1,1,1,0,0]));
        assert_eq!(find_clique(&g, 1), Some(vec![0,0,0,0,1]));
        assert_eq!(find_clique(&g, 4), None);
    }

    #[test]
    fn test_brute_force_on_random_graph() {
        let g = WeightedGraph::random(5, 0.8, 10., 100).unwrap();
        for k in 0..=5 {
            if let Some(a) = find_clique(&g, k) {
                assert_eq!(a.iter().filter(|x| **x == 1).count(), k);
                assert!(is_valid_clique(&a, &g, k));
                let chosen = clique_vertices(&a);
                for u in &chosen {
                    for v in &chosen {
                        if u != v { assert!(g.weight(*u,*v) != 0.); }
                    }
                }
            }
        }
    }

    #[test]
    fn test_reference_instance_has_triangle() {
        let g = WeightedGraph::random(5, 0.8, 10., 100).unwrap();
        let a = find_clique(&g, 3).expect("a clique of size 3 should exist");
        assert_eq!(clique_vertices(&a).len(), 3);
        assert!(is_valid_clique(&a, &g, 3));
    }

    #[test]
    fn test_brute_force_on_complete_graph() {
        let g = WeightedGraph::random(5, 1., 10., 100).unwrap();
        // the first size-3 candidate in integer order is 00111
        assert_eq!(find_clique(&g, 3), Some(vec![0,0,1,1,1]));
        assert_eq!(find_clique(&g, 5), Some(vec![1,1,1,1,1]));
    }

    #[test]
    fn test_too_many_vertices_is_not_a_missing_clique() {
        let g = WeightedGraph::from_edges(64, &[(0,1,1.)]).unwrap();
        assert!(matches!(try_find_clique(&g, 2), Err(CliqueError::TooManyVertices { n: 64, max: 63 })));
        assert_eq!(find_clique(&g, 2), None);
    }
}
