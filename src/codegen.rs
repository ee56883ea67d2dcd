//! Render a [`HierarchySpec`] as Rust source.
//!
//! One hierarchy becomes one file: a visitor trait (one method per variant,
//! generic over the result type `R`), the base type as an enum with a
//! pattern-matching `accept` dispatcher, then one struct per variant with
//! ordered fields, a `new` constructor, and its own `accept`.
//!
//! Everything in here is a pure function of the model: the same hierarchy
//! always renders to byte-identical text.

use crate::model::{GeneratorConfig, HierarchySpec, VariantSpec};
use crate::sink::{Sink, SinkError};

const HEADER: &str = "// Generated by generate_ast. Do not edit by hand.\n";

pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    /// Append one complete hierarchy in fixed order: header, `use` prologue,
    /// visitor trait, base enum, variants in declaration order.
    pub fn emit(&mut self, hierarchy: &HierarchySpec) {
        let mut blocks: Vec<String> = Vec::new();
        blocks.push(HEADER.to_string());

        if !hierarchy.uses.is_empty() {
            let mut prologue = String::new();
            for import in &hierarchy.uses {
                prologue.push_str(&format!("use {import};\n"));
            }
            blocks.push(prologue);
        }

        blocks.push(render_visitor(hierarchy));
        blocks.push(render_base(hierarchy));
        for variant in &hierarchy.variants {
            blocks.push(render_variant(&hierarchy.base_name, variant));
        }

        self.out.push_str(&blocks.join("\n"));
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

/// Render every hierarchy in table order and hand each finished file to the
/// sink. The first sink failure aborts the run; nothing is retried.
pub fn emit_all(config: &GeneratorConfig, sink: &mut dyn Sink) -> Result<(), SinkError> {
    for hierarchy in &config.hierarchies {
        let mut cg = Codegen::new();
        cg.emit(hierarchy);
        sink.persist(&hierarchy.base_name, &cg.into_string())?;
    }
    Ok(())
}

pub fn visit_method_name(variant: &str, base: &str) -> String {
    format!("visit_{}_{}", snake_case(variant), snake_case(base))
}

/// `ExprStmt` → `expr_stmt`. Good enough for the CamelCase names the DSL
/// uses; consecutive capitals each get their own underscore.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

// --------------------------- rendering helpers ----------------------------- //

fn visitor_trait_name(base: &str) -> String {
    format!("{base}Visitor")
}

fn render_visitor(hierarchy: &HierarchySpec) -> String {
    let trait_name = visitor_trait_name(&hierarchy.base_name);
    if hierarchy.variants.is_empty() {
        return format!("pub trait {trait_name}<R> {{}}\n");
    }

    let arg = snake_case(&hierarchy.base_name);
    let mut out = format!("pub trait {trait_name}<R> {{\n");
    for variant in &hierarchy.variants {
        out.push_str(&format!(
            "    fn {}(&mut self, {arg}: &{}) -> R;\n",
            visit_method_name(&variant.name, &hierarchy.base_name),
            variant.name,
        ));
    }
    out.push_str("}\n");
    out
}

fn render_base(hierarchy: &HierarchySpec) -> String {
    let base = &hierarchy.base_name;
    let trait_name = visitor_trait_name(base);

    if hierarchy.variants.is_empty() {
        // Degenerate but well-formed: an uninhabited enum still dispatches.
        let mut out = format!("pub enum {base} {{}}\n\n");
        out.push_str(&format!("impl {base} {{\n"));
        out.push_str(&format!(
            "    pub fn accept<R, V: {trait_name}<R>>(&self, _visitor: &mut V) -> R {{\n"
        ));
        out.push_str("        match *self {}\n    }\n}\n");
        return out;
    }

    let mut out = String::from("#[derive(Debug, Clone)]\n");
    out.push_str(&format!("pub enum {base} {{\n"));
    for variant in &hierarchy.variants {
        out.push_str(&format!("    {0}({0}),\n", variant.name));
    }
    out.push_str("}\n\n");

    out.push_str(&format!("impl {base} {{\n"));
    out.push_str(&format!(
        "    pub fn accept<R, V: {trait_name}<R>>(&self, visitor: &mut V) -> R {{\n"
    ));
    out.push_str("        match self {\n");
    for variant in &hierarchy.variants {
        out.push_str(&format!(
            "            {base}::{}(node) => node.accept(visitor),\n",
            variant.name,
        ));
    }
    out.push_str("        }\n    }\n}\n");
    out
}

fn render_variant(base: &str, variant: &VariantSpec) -> String {
    let name = &variant.name;
    let trait_name = visitor_trait_name(base);
    let method = visit_method_name(name, base);

    let mut out = String::from("#[derive(Debug, Clone)]\n");
    if variant.fields.is_empty() {
        out.push_str(&format!("pub struct {name};\n"));
    } else {
        out.push_str(&format!("pub struct {name} {{\n"));
        for field in &variant.fields {
            out.push_str(&format!(
                "    pub {}: {},\n",
                field.field_name, field.type_name
            ));
        }
        out.push_str("}\n");
    }
    out.push('\n');

    out.push_str(&format!("impl {name} {{\n"));
    if variant.fields.is_empty() {
        out.push_str("    pub fn new() -> Self {\n        Self\n    }\n");
    } else {
        let params = variant
            .fields
            .iter()
            .map(|f| format!("{}: {}", f.field_name, f.type_name))
            .collect::<Vec<_>>()
            .join(", ");
        let inits = variant
            .fields
            .iter()
            .map(|f| f.field_name.clone())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("    pub fn new({params}) -> Self {{\n"));
        out.push_str(&format!("        Self {{ {inits} }}\n"));
        out.push_str("    }\n");
    }
    out.push('\n');
    out.push_str(&format!(
        "    pub fn accept<R, V: {trait_name}<R>>(&self, visitor: &mut V) -> R {{\n"
    ));
    out.push_str(&format!("        visitor.{method}(self)\n"));
    out.push_str("    }\n}\n");
    out
}

// ------------------------------- Tests ------------------------------------ //
