//! Test fixture helpers for creating workspace reports
//!
//! Reports are built with [`WorkspaceBuilder`] and written as JSON in the
//! layout produced by the circuit compiler's `info --json` output.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Builder of workspace report JSON documents
#[derive(Debug, Default, Clone)]
pub struct WorkspaceBuilder {
    programs: Vec<Value>,
    contracts: Vec<Value>,
}

impl WorkspaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program with a `main` circuit and no unconstrained functions
    pub fn program(mut self, name: &str, opcodes: u64, circuit_size: u64) -> Self {
        self.programs.push(json!({
            "package_name": name,
            "functions": [{"name": "main", "opcodes": opcodes, "circuit_size": circuit_size}],
            "unconstrained_functions": []
        }));
        self
    }

    /// Program compiled to Brillig: an empty `main` circuit and an unconstrained `main`
    pub fn brillig_program(mut self, name: &str, opcodes: u64) -> Self {
        self.programs.push(json!({
            "package_name": name,
            "functions": [{"name": "main", "opcodes": 0, "circuit_size": 0}],
            "unconstrained_functions": [{"name": "main", "opcodes": opcodes}]
        }));
        self
    }

    /// Program without any circuit
    pub fn program_without_main(mut self, name: &str) -> Self {
        self.programs.push(json!({
            "package_name": name,
            "functions": [],
            "unconstrained_functions": []
        }));
        self
    }

    /// Contract with `(name, opcodes, circuit_size)` functions
    pub fn contract(mut self, name: &str, functions: &[(&str, u64, u64)]) -> Self {
        let functions: Vec<Value> = functions
            .iter()
            .map(|(function, opcodes, circuit_size)| {
                json!({"name": function, "opcodes": opcodes, "circuit_size": circuit_size})
            })
            .collect();
        self.contracts.push(json!({"name": name, "functions": functions}));
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&json!({
            "programs": self.programs,
            "contracts": self.contracts,
        }))
        .unwrap()
    }

    /// Write the report to `dir/file_name`
    pub fn write(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        fs::write(&path, self.to_json()).unwrap();
        path
    }
}

/// Reference snapshot shared by the scenario tests
pub fn reference_workspace() -> WorkspaceBuilder {
    WorkspaceBuilder::new()
        .program("hash", 100, 1000)
        .program("merkle", 50, 400)
        .program("sig", 10, 80)
        .contract("Token", &[("transfer", 20, 200), ("mint", 10, 100)])
}

/// Current snapshot: `hash` doubles, `merkle` shrinks, `sig` is unchanged,
/// `Token::transfer` grows and a new program appears
pub fn current_workspace() -> WorkspaceBuilder {
    WorkspaceBuilder::new()
        .program("hash", 200, 2000)
        .program("merkle", 40, 300)
        .program("sig", 10, 80)
        .program("fresh", 5, 50)
        .contract("Token", &[("transfer", 30, 250), ("mint", 10, 100)])
}
