// src/schema/types.rs

/// Declared primitive type of one accident field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Fixed-width text; longer values are cut to the width (in characters).
    Str(usize),
    Int8,
    Int16,
    Int32,
    Int64,
    /// Calendar day, `YYYY-MM-DD` in the source.
    Date,
    Float64,
}

/// A single column of the fixed accident schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    pub name: &'static str,
    pub ty: FieldType,
}

impl Column {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}
