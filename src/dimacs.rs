use std::fs;

use log::warn;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until};
use nom::character::complete::{digit1, line_ending, multispace0, space0, space1};
use nom::combinator::{map_res, opt};
use nom::multi::many0;
use nom::sequence::{preceded, separated_pair, terminated};

use crate::clique::MAX_BRUTE_FORCE_VERTICES;
use crate::error::{CliqueError, Result};
use crate::graph::{VertexId, WeightedGraph};

/** reads an unweighted DIMACS graph. Every edge gets weight 1. */
pub fn read_graph(filename:&str) -> Result<WeightedGraph> {
    let content = fs::read_to_string(filename)?;
    parse_graph(&content)
}

/** parses an unweighted DIMACS graph from a string. Every edge gets weight 1. */
pub fn parse_graph(content:&str) -> Result<WeightedGraph> {
    let (n, _, edges) = read_from_str(content)?;
    let weighted:Vec<(VertexId,VertexId,f64)> = edges.into_iter().map(|(u,v)| (u, v, 1.)).collect();
    WeightedGraph::from_edges(n, &weighted)
}

/// reads an instance, returns (n,m,edges) with 0-based vertex ids
pub fn read_from_str(content:&str) -> Result<(usize, usize, Vec<(VertexId,VertexId)>)> {
    let content = content.replace('\r', "") + "\n";
    let (mut s, (n,m)) = preceded(skip_comments, read_header)(content.as_str())
        .map_err(|e| CliqueError::Parse(format!("unable to read the header: {:?}", e)))?;
    // the graph is stored as a dense matrix
    if n > MAX_BRUTE_FORCE_VERTICES {
        return Err(CliqueError::TooManyVertices { n, max: MAX_BRUTE_FORCE_VERTICES });
    }
    let mut edges = Vec::new();
    while let Ok((remaining,(a,b))) = preceded(skip_comments, read_edge)(s) {
        s = remaining;
        if a == 0 || b == 0 || a > n || b > n {
            return Err(CliqueError::Parse(format!("edge ({},{}) out of range (n={})", a, b, n)));
        }
        if a != b { // DIMACS indices start at 1
            edges.push((a-1, b-1));
        }
    }
    let (rest, _) = skip_comments(s)
        .map_err(|e| CliqueError::Parse(format!("{:?}", e)))?;
    if !rest.trim().is_empty() {
        let line = rest.lines().next().unwrap_or_default();
        return Err(CliqueError::Parse(format!("unexpected line: {}", line)));
    }
    if edges.len() != m && 2*edges.len() != m {
        warn!("DIMACS header announces {} edges, {} were read", m, edges.len());
    }
    Ok((n, m, edges))
}

/// skips a single comment line
fn skip_comment(s:&str) -> IResult<&str, &str> {
    let (s, _) = tag("c")(s)?;
    let (s, comment) = take_until("\n")(s)?;
    let (s, _) = line_ending(s)?;
    Ok((s, comment))
}

/// skips blank lines and comments
pub fn skip_comments(s:&str) -> IResult<&str, Vec<&str>> {
    let (s, _) = multispace0(s)?;
    many0(terminated(skip_comment, multispace0))(s)
}

/// reads a positive integer
fn integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by spaces, and the end of the line
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    terminated(
        separated_pair(integer, space1, integer),
        preceded(space0, opt(line_ending))
    )(s)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        terminated(alt((tag("p edge"), tag("p col"))), space1),
        read_two_integers
    )(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(terminated(tag("e"), space1), read_two_integers)(s)
}
