//! DIMACS CNF format parser.
//!
//! Standard format used in SAT competitions. Comment lines start with `c`,
//! a line starting with `%` terminates the input, the header is
//! `p cnf <vars> <clauses>`, and clause literals may span lines; a clause
//! ends at the literal `0`.

use satori_base::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A DIMACS CNF formula.
#[derive(Debug, Clone)]
pub struct DimacsCnf {
    /// Number of variables declared in the header.
    pub num_vars: u32,
    /// Number of clauses declared in the header.
    pub num_clauses: usize,
    /// Clauses as vectors of signed DIMACS literals.
    pub clauses: Vec<Vec<i64>>,
}

impl DimacsCnf {
    /// Parses DIMACS CNF from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Parses DIMACS CNF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = BufReader::new(reader);
        let mut num_vars = 0u32;
        let mut num_clauses = 0usize;
        let mut clauses = Vec::new();
        let mut current = Vec::new();
        let mut header_found = false;

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('c') {
                continue;
            }

            // Terminator line halts parsing
            if line.starts_with('%') {
                break;
            }

            // Parse header
            if line.starts_with('p') {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() < 4 || parts[1] != "cnf" {
                    return Err(Error::MalformedInput(format!("bad header line: {line}")));
                }
                num_vars = parts[2]
                    .parse()
                    .map_err(|e| Error::MalformedInput(format!("bad variable count: {e}")))?;
                num_clauses = parts[3]
                    .parse()
                    .map_err(|e| Error::MalformedInput(format!("bad clause count: {e}")))?;
                header_found = true;
                clauses.reserve(num_clauses);
                continue;
            }

            if !header_found {
                return Err(Error::MalformedInput(
                    "DIMACS header 'p cnf ...' not found".to_string(),
                ));
            }

            // Clause tokens; a clause ends at 0 and may continue on the next line
            for token in line.split_whitespace() {
                let lit: i64 = token
                    .parse()
                    .map_err(|_| Error::MalformedInput(format!("bad literal token: {token}")))?;
                if lit == 0 {
                    clauses.push(std::mem::take(&mut current));
                } else {
                    current.push(lit);
                }
            }
        }

        // A clause left open at end of input
        if !current.is_empty() {
            clauses.push(current);
        }

        Ok(Self {
            num_vars,
            num_clauses,
            clauses,
        })
    }

    /// Parses DIMACS CNF from a string.
    pub fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}
