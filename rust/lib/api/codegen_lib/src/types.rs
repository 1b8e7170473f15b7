/// Go type → schema field mapping

use goa_ir::*;
use tracing::warn;

use crate::error::MapError;

/// Shape of a Go type as far as the schema is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape<'a> {
    /// Plain identifier type.
    Scalar(&'a str),
    /// Array or slice; carries the element type.
    Array(&'a TypeExpr),
    /// Anything else (pointer, qualified, map, func, ...).
    Other,
}

impl<'a> TypeShape<'a> {
    pub fn of(ty: &'a TypeExpr) -> Self {
        match ty {
            TypeExpr::Ident(name) => TypeShape::Scalar(name),
            TypeExpr::Array { elem, .. } => TypeShape::Array(elem),
            _ => TypeShape::Other,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapOptions {
    /// Reject `<unsupported>` fields instead of emitting the sentinel.
    pub strict: bool,
}

/// Map a Go identifier to a schema type.
///
/// `int` is platform-sized in Go, so it widens to `int64`. The predeclared
/// `error` interface has no schema counterpart.
pub fn scalar_type(name: &str) -> SchemaType {
    match name {
        "int" => SchemaType::named("int64"),
        "error" => SchemaType::Unsupported,
        other => SchemaType::named(other),
    }
}

/// Classify one Go type into cardinality and schema type.
pub fn classify(ty: &TypeExpr) -> (Cardinality, SchemaType) {
    match TypeShape::of(ty) {
        TypeShape::Scalar(name) => (Cardinality::Required, scalar_type(name)),
        TypeShape::Array(elem) => match TypeShape::of(elem) {
            TypeShape::Scalar(name) => (Cardinality::Repeated, scalar_type(name)),
            _ => (Cardinality::Repeated, SchemaType::Malformed(ty.to_string())),
        },
        TypeShape::Other => (Cardinality::Required, SchemaType::Unsupported),
    }
}

/// Map a parameter or result list to schema fields.
///
/// Ids start at 2 and increase by one per emitted field. Each name in a
/// name group gets its own field; an anonymous field gets one field named
/// `f_<id>`.
pub fn map_fields(list: &FieldList) -> Vec<FieldSpec> {
    map_with_sources(list).into_iter().map(|(spec, _)| spec).collect()
}

fn map_with_sources(list: &FieldList) -> Vec<(FieldSpec, &TypeExpr)> {
    let mut specs = Vec::with_capacity(list.arity());
    let mut id = FIRST_FIELD_ID;

    for field in &list.fields {
        let (cardinality, schema_type) = classify(&field.ty);
        if field.is_anonymous() {
            specs.push((
                FieldSpec {
                    id,
                    cardinality,
                    schema_type,
                    name: format!("f_{}", id),
                },
                &field.ty,
            ));
            id += 1;
        } else {
            for name in &field.names {
                specs.push((
                    FieldSpec {
                        id,
                        cardinality,
                        schema_type: schema_type.clone(),
                        name: name.clone(),
                    },
                    &field.ty,
                ));
                id += 1;
            }
        }
    }

    specs
}

/// Resolve an export declaration into an `ExportRecord`.
pub fn map_export(decl: &ExportDecl, options: &MapOptions) -> Result<ExportRecord, MapError> {
    let params = check_list(decl, &decl.params, options)?;
    let results = check_list(decl, &decl.results, options)?;
    Ok(ExportRecord {
        source_name: decl.source_name.clone(),
        exported_name: decl.exported_name.clone(),
        params,
        results,
    })
}

fn check_list(
    decl: &ExportDecl,
    list: &FieldList,
    options: &MapOptions,
) -> Result<Vec<FieldSpec>, MapError> {
    let mut specs = Vec::new();
    for (spec, ty) in map_with_sources(list) {
        if spec.schema_type.is_unsupported() {
            if options.strict {
                return Err(MapError {
                    export: decl.exported_name.clone(),
                    field: spec.name,
                    go_type: ty.to_string(),
                });
            }
            warn!(
                export = %decl.exported_name,
                field = %spec.name,
                go_type = %ty,
                "unsupported type, emitting {}",
                SchemaType::UNSUPPORTED
            );
        }
        specs.push(spec);
    }
    Ok(specs)
}
