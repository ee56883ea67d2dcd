//! Hierarchy tables: the built-in Lox set plus JSON-file loading.
//!
//! A table is a list of raw hierarchies, each carrying its base name, an
//! optional `use` prologue, and its variant lines still in DSL form. The
//! lines are validated later by [`crate::parse::resolve`], so a table loaded
//! from disk and the built-in one go through the same checks.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHierarchy {
    pub base: String,
    #[serde(default)]
    pub uses: Vec<String>,
    pub variants: Vec<String>,
}

/// The default table: the Lox `Expr` and `Stmt` hierarchies.
pub fn builtin() -> Vec<RawHierarchy> {
    vec![
        RawHierarchy {
            base: "Expr".to_string(),
            uses: vec![
                "crate::token::Token".to_string(),
                "crate::value::LiteralValue".to_string(),
            ],
            variants: vec![
                "Assign : Token name, Box<Expr> value".to_string(),
                "Ternary : Box<Expr> condition, Box<Expr> left, Box<Expr> right".to_string(),
                "Binary : Box<Expr> left, Token operator, Box<Expr> right".to_string(),
                "Grouping : Box<Expr> expression".to_string(),
                "Literal : LiteralValue value".to_string(),
                "Unary : Token operator, Box<Expr> right".to_string(),
                "Variable : Token name".to_string(),
            ],
        },
        RawHierarchy {
            base: "Stmt".to_string(),
            uses: vec![
                "crate::ast::Expr".to_string(),
                "crate::token::Token".to_string(),
            ],
            variants: vec![
                "Break :".to_string(),
                "Continue :".to_string(),
                "While : Expr condition, Box<Stmt> body, bool is_for_loop".to_string(),
                "If : Expr condition, Box<Stmt> then_branch, Option<Box<Stmt>> else_branch"
                    .to_string(),
                "Block : Vec<Stmt> statements".to_string(),
                "Expression : Expr expression".to_string(),
                "Print : Expr expression".to_string(),
                "Var : Token name, Option<Expr> initializer".to_string(),
            ],
        },
    ]
}

/// Parse a JSON table. Deserialization failures carry the JSON path of the
/// offending element.
pub fn from_json_str(source: &str) -> anyhow::Result<Vec<RawHierarchy>> {
    let mut de = serde_json::Deserializer::from_str(source);
    let table: Vec<RawHierarchy> =
        serde_path_to_error::deserialize(&mut de).context("invalid hierarchy table")?;
    Ok(table)
}

pub fn load_file(path: &Path) -> anyhow::Result<Vec<RawHierarchy>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file `{}`", path.display()))?;
    from_json_str(&source)
        .with_context(|| format!("failed to parse config file `{}`", path.display()))
}

// ------------------------------- Tests ------------------------------------ //
