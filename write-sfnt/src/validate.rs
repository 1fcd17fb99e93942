//! The pre-serialization validation pass

use std::fmt::{Debug, Display};

/// Pre-serialization validation of tables.
///
/// The file format imposes requirements that are awkward to encode in the
/// type system, such as parallel arrays having equal lengths or counts
/// fitting in a `uint16`. These are enforced by a validation pass that runs
/// before any bytes are emitted; [`dump_table`](crate::dump_table) refuses
/// to serialize a table whose validation fails.
pub trait Validate {
    /// Ensure that this table is well-formed, reporting any errors.
    fn validate(&self) -> Result<(), ValidationReport> {
        let mut ctx = ValidationCtx::default();
        self.validate_impl(&mut ctx);
        if ctx.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationReport { errors: ctx.errors })
        }
    }

    /// Validate this table, reporting errors into `ctx`.
    fn validate_impl(&self, ctx: &mut ValidationCtx);
}

/// A context for collecting validation errors.
///
/// The context tracks a path through the object tree (tables and fields)
/// so that a reported error identifies the value it refers to.
#[derive(Clone, Debug, Default)]
pub struct ValidationCtx {
    cur_location: Vec<LocationElem>,
    errors: Vec<ValidationError>,
}

#[derive(Debug, Clone)]
struct ValidationError {
    error: String,
    location: Vec<LocationElem>,
}

/// One or more validation errors.
#[derive(Clone)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

#[derive(Debug, Clone, Copy)]
enum LocationElem {
    Table(&'static str),
    Field(&'static str),
}

impl ValidationCtx {
    /// Run the provided closure in the context of a new table.
    pub fn in_table(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Table(name), f);
    }

    /// Run the provided closure in the context of a new field.
    pub fn in_field(&mut self, name: &'static str, f: impl FnOnce(&mut ValidationCtx)) {
        self.with_elem(LocationElem::Field(name), f);
    }

    fn with_elem(&mut self, elem: LocationElem, f: impl FnOnce(&mut ValidationCtx)) {
        self.cur_location.push(elem);
        f(self);
        self.cur_location.pop();
    }

    /// Report an error at the current location.
    pub fn report(&mut self, msg: impl Into<String>) {
        self.errors.push(ValidationError {
            error: msg.into(),
            location: self.cur_location.clone(),
        });
    }

    /// Report an error if `len` cannot be stored in a `uint16` count field.
    pub fn array_too_long(&mut self, len: usize) {
        if u16::try_from(len).is_err() {
            self.report(format!("array of length {len} exceeds u16::MAX"));
        }
    }
}

impl ValidationReport {
    /// The number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{} validation failures:", self.errors.len())?;
        for error in &self.errors {
            let mut first = true;
            for elem in &error.location {
                let (prefix, name) = match elem {
                    LocationElem::Table(name) => ("", *name),
                    LocationElem::Field(name) => (".", *name),
                };
                if !first || !prefix.is_empty() {
                    write!(f, "{prefix}")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
            writeln!(f, ": {}", error.error)?;
        }
        Ok(())
    }
}

impl Debug for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for ValidationReport {}
