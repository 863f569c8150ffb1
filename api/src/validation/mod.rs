//! Input Validation Module
//!
//! Request payloads are checked against declarative schemas before any
//! handler sees them.
//!
//! # Overview
//!
//! 1. **Schemas** - [`Schema`] rule tables, one per [`SchemaName`], held by
//!    the [`SchemaRegistry`]
//! 2. **Interpreter** - [`validate`] walks a schema over a JSON payload,
//!    collecting every violation in one pass
//! 3. **Extractors** - `ValidatedJson<T>`, `ValidatedQuery<T>`,
//!    `ValidatedPath<T>` wire the interpreter into axum handlers
//! 4. **Validators / Sanitizers** - the reusable checks and string
//!    normalizers behind individual constraints
//!
//! # Usage
//!
//! ```ignore
//! #[derive(Deserialize)]
//! pub struct IdParam { pub id: String }
//!
//! impl SchemaBound for IdParam {
//!     const SCHEMA: SchemaName = SchemaName::IdParam;
//! }
//!
//! pub async fn get_product(ValidatedPath(params): ValidatedPath<IdParam>) -> impl IntoResponse {
//!     // params.id is a well-formed object id
//! }
//! ```
//!
//! # Validation Error Response
//!
//! ```json
//! {
//!   "status": "error",
//!   "message": "Validation failed",
//!   "errors": [
//!     {"field": "maximumOrder", "message": "must be greater than or equal to minimumOrder"},
//!     {"field": "items[0].quantity", "message": "must be greater than or equal to 1"}
//!   ]
//! }
//! ```
//!
//! Bodies fail with 422; query strings (`"Invalid query parameters"`) and
//! path parameters (`"Invalid parameters"`) fail with 400.

pub mod definitions;
pub mod evaluate;
pub mod extractors;
pub mod registry;
pub mod sanitizers;
pub mod schema;
pub mod validators;

// Re-export commonly used items
pub use evaluate::{validate, ValidationResult};
pub use extractors::{
    FieldError, SchemaBound, ValidatedJson, ValidatedPath, ValidatedQuery, ValidationBuilder,
    ValidationError,
};
pub use registry::SchemaRegistry;
pub use schema::{
    Constraint, CrossFieldRule, FieldKind, FieldRule, Location, Schema, SchemaError, SchemaName,
};
