use bit_set::BitSet;
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::{CliqueError, Result};

/** Vertex Id */
pub type VertexId = usize;

/** Edge weight */
pub type Weight = f64;

/** models a weighted undirected graph given by its (symmetric) adjacency matrix.
A nonzero entry, positive or negative, denotes an edge.
*/
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    /// nb vertices
    n: usize,
    /// matrix[i][j]: weight of the edge (i,j), 0 if no edge
    matrix: Vec<Vec<Weight>>,
    /// edges of the graph (i < j)
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Vec<BitSet>,
}

impl WeightedGraph {

    /** constructor using an adjacency matrix.

    # Errors
    - if the matrix is empty, not square, not symmetric, has a nonzero diagonal or a non-finite entry
    */
    pub fn from_matrix(matrix:Vec<Vec<Weight>>) -> Result<Self> {
        let n = matrix.len();
        if n == 0 {
            return Err(CliqueError::InvalidGraph("the graph has no vertex".to_string()));
        }
        for (i,row) in matrix.iter().enumerate() {
            if row.len() != n {
                return Err(CliqueError::DimensionMismatch { expected: n, got: row.len() });
            }
            if row[i] != 0. {
                return Err(CliqueError::InvalidGraph(format!("nonzero diagonal entry at {}", i)));
            }
            for (j,w) in row.iter().enumerate() {
                if !w.is_finite() {
                    return Err(CliqueError::InvalidGraph(format!("non-finite weight at ({},{})", i, j)));
                }
            }
        }
        for i in 0..n {
            for j in (i+1)..n {
                if matrix[i][j] != matrix[j][i] {
                    return Err(CliqueError::InvalidGraph(
                        format!("asymmetric weights at ({},{}): {} != {}", i, j, matrix[i][j], matrix[j][i])
                    ));
                }
            }
        }
        Ok(Self::build(matrix))
    }

    /** constructor using an edge list (u,v,w). Zero weights are ignored.

    # Errors
    - if n = 0, if an edge is a loop or refers to a vertex ≥ n, or if a weight is not finite
    */
    pub fn from_edges(n:usize, edges:&[(VertexId,VertexId,Weight)]) -> Result<Self> {
        if n == 0 {
            return Err(CliqueError::InvalidGraph("the graph has no vertex".to_string()));
        }
        let mut matrix = vec![vec![0. ; n] ; n];
        for &(u,v,w) in edges {
            if u >= n || v >= n {
                return Err(CliqueError::InvalidGraph(format!("edge ({},{}) out of range", u, v)));
            }
            if u == v {
                return Err(CliqueError::InvalidGraph(format!("loop on vertex {}", u)));
            }
            if !w.is_finite() {
                return Err(CliqueError::InvalidGraph(format!("non-finite weight on ({},{})", u, v)));
            }
            matrix[u][v] = w;
            matrix[v][u] = w;
        }
        Ok(Self::build(matrix))
    }

    /** random graph generator.
    Each pair (i,j), i<j, has an edge with probability p. If so, its weight is drawn
    uniformly from [-w,w] (resampled until nonzero). Same parameters produce the same graph.

    # Errors
    - if n < 1, p ∉ [0,1], or w is not a positive finite number while p > 0
    */
    pub fn random(n:usize, p:f64, w:Weight, seed:u64) -> Result<Self> {
        if n < 1 {
            return Err(CliqueError::InvalidConfiguration("the number of vertices must be ≥ 1".to_string()));
        }
        if !(0. ..=1.).contains(&p) {
            return Err(CliqueError::InvalidConfiguration(
                format!("edge probability must be in [0,1] (got {})", p)
            ));
        }
        if p > 0. && !(w.is_finite() && w > 0.) {
            return Err(CliqueError::InvalidConfiguration(
                format!("weight bound must be a positive number (got {})", w)
            ));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let mut matrix = vec![vec![0. ; n] ; n];
        for i in 0..n {
            for j in (i+1)..n {
                if rng.gen_bool(p) {
                    let weight = loop {
                        // scaled after drawing: a range of width 2w may overflow
                        let x:Weight = w * rng.gen_range(-1. ..=1.);
                        if x != 0. { break x; }
                    };
                    matrix[i][j] = weight;
                    matrix[j][i] = weight;
                }
            }
        }
        let res = Self::build(matrix);
        debug!("random graph: n={} p={} w={} seed={} -> {} edges", n, p, w, seed, res.nb_edges());
        Ok(res)
    }

    /// builds the derived data-structures (edges, adjacency lists and bitsets)
    fn build(matrix:Vec<Vec<Weight>>) -> Self {
        let n = matrix.len();
        let mut adj_list = vec![Vec::new() ; n];
        let mut adj_matrix = vec![BitSet::with_capacity(n) ; n];
        let mut edges = Vec::new();
        for (i,row) in matrix.iter().enumerate() {
            for (j,w) in row.iter().enumerate() {
                if i != j && *w != 0. {
                    adj_list[i].push(j);
                    adj_matrix[i].insert(j);
                    if i < j { edges.push((i,j)); }
                }
            }
        }
        Self { n, matrix, edges, adj_list, adj_matrix }
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// iterator over the vertices
    pub fn vertices(&self) -> std::ops::Range<VertexId> { 0..self.n }

    /// weight of the edge (u,v) (0 if no edge)
    pub fn weight(&self, u:VertexId, v:VertexId) -> Weight { self.matrix[u][v] }

    /// adjacency matrix
    pub fn matrix(&self) -> &[Vec<Weight>] { &self.matrix }

    /// edge list (u < v)
    pub fn edges(&self) -> &[(VertexId,VertexId)] { &self.edges }

    /// list of vertices adjacent to u
    pub fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    /// degree of u
    pub fn degree(&self, u:VertexId) -> usize { self.adj_list[u].len() }

    /// returns true iff u and v are adjacent. O(1)
    pub fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool {
        self.adj_matrix[u].contains(v)
    }

    /// print statistics of the instance
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        let degrees:Vec<usize> = self.vertices().map(|i| self.degree(i)).collect();
        println!("\t{} \t min degree", degrees.iter().min().unwrap_or(&0));
        println!("\t{} \t max degree", degrees.iter().max().unwrap_or(&0));
    }

    /** writes a string encoding the adjacency matrix (one row per line) */
    pub fn matrix_to_string(&self) -> String {
        let mut res = String::default();
        for row in &self.matrix {
            let cells:Vec<String> = row.iter().map(|w| format!("{:8.3}", w)).collect();
            res += cells.join(" ").as_str();
            res += "\n";
        }
        res
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_is_deterministic() {
        let g1 = WeightedGraph::random(8, 0.5, 10., 42).unwrap();
        let g2 = WeightedGraph::random(8, 0.5, 10., 42).unwrap();
        assert_eq!(g1.matrix(), g2.matrix());
        assert_eq!(g1.edges(), g2.edges());
    }

    #[test]
    fn test_random_is_symmetric_with_zero_diagonal() {
        let g = WeightedGraph::random(10, 0.7, 5., 3).unwrap();
        for i in g.vertices() {
            assert_eq!(g.weight(i,i), 0.);
            for j in g.vertices() {
                assert_eq!(g.weight(i,j), g.weight(j,i));
                assert!(g.weight(i,j).abs() <= 5.);
                assert_eq!(g.are_adjacent(i,j), g.weight(i,j) != 0.);
            }
        }
    }

    #[test]
    fn test_random_extreme_probabilities() {
        let empty = WeightedGraph::random(6, 0., 10., 1).unwrap();
        assert_eq!(empty.nb_edges(), 0);
        let complete = WeightedGraph::random(6, 1., 10., 1).unwrap();
        assert_eq!(complete.nb_edges(), 15);
        for v in complete.vertices() {
            assert_eq!(complete.degree(v), 5);
        }
    }

    #[test]
    fn test_random_rejects_invalid_configuration() {
        assert!(matches!(WeightedGraph::random(0, 0.5, 10., 1), Err(CliqueError::InvalidConfiguration(_))));
        assert!(matches!(WeightedGraph::random(4, 1.5, 10., 1), Err(CliqueError::InvalidConfiguration(_))));
        assert!(matches!(WeightedGraph::random(4, -0.1, 10., 1), Err(CliqueError::InvalidConfiguration(_))));
        assert!(matches!(WeightedGraph::random(4, f64::NAN, 10., 1), Err(CliqueError::InvalidConfiguration(_))));
        assert!(matches!(WeightedGraph::random(4, 0.5, 0., 1), Err(CliqueError::InvalidConfiguration(_))));
        assert!(matches!(WeightedGraph::random(4, 0.5, f64::INFINITY, 1), Err(CliqueError::InvalidConfiguration(_))));
        // no edge is drawn: the weight bound is unused
        assert!(WeightedGraph::random(4, 0., 0., 1).is_ok());
    }

    #[test]
    fn test_random_with_huge_weight_bound() {
        let g = WeightedGraph::random(5, 0.8, f64::MAX, 100).unwrap();
        assert_eq!(g.nb_edges(), WeightedGraph::random(5, 0.8, 10., 100).unwrap().nb_edges());
        for (u,v) in g.edges() {
            assert!(g.weight(*u,*v).is_finite());
            assert!(g.weight(*u,*v) != 0.);
        }
    }

    #[test]
    fn test_from_matrix() {
        let g = WeightedGraph::from_matrix(vec![
            vec![0., -2., 0.],
            vec![-2., 0., 3.],
            vec![0., 3., 0.],
        ]).unwrap();
        assert_eq!(g.nb_vertices(), 3);
        assert_eq!(g.nb_edges(), 2);
        assert_eq!(g.edges(), &[(0,1),(1,2)]);
        assert_eq!(g.neighbors(1), &[0,2]);
        assert!(g.are_adjacent(0,1)); // negative weights are edges too
        assert!(!g.are_adjacent(0,2));
    }

    #[test]
    fn test_from_matrix_rejects_invalid() {
        assert!(WeightedGraph::from_matrix(vec![]).is_err());
        assert!(WeightedGraph::from_matrix(vec![vec![0., 1.], vec![2., 0.]]).is_err());
        assert!(WeightedGraph::from_matrix(vec![vec![1., 1.], vec![1., 0.]]).is_err());
        assert!(matches!(
            WeightedGraph::from_matrix(vec![vec![0., 1.], vec![1.]]),
            Err(CliqueError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_from_edges() {
        let g = WeightedGraph::from_edges(4, &[(0,1,1.), (2,1,-4.), (3,0,0.)]).unwrap();
        assert_eq!(g.nb_edges(), 2);
        assert_eq!(g.weight(1,2), -4.);
        assert!(!g.are_adjacent(0,3));
        assert!(WeightedGraph::from_edges(2, &[(0,2,1.)]).is_err());
        assert!(WeightedGraph::from_edges(2, &[(1,1,1.)]).is_err());
    }
}
