// src/schema/fields.rs

use super::types::{Column, FieldType::*};

/// Name of the synthetic column appended to every parsed region.
pub const REGION_FIELD: &str = "region";

/// Name of the accident identifier, used as the dedup key.
pub const ID_FIELD: &str = "p1";

/// Every column of a regional CSV file, in file order. The files carry no
/// header row, so this order is the only thing naming the fields.
pub const COLUMNS: [Column; 64] = [
    Column::new("p1", Str(12)),
    Column::new("p36", Int8),
    Column::new("p37", Int32),
    Column::new("p2a", Date),
    Column::new("weekday(p2a)", Int8),
    Column::new("p2b", Str(4)),
    Column::new("p6", Int8),
    Column::new("p7", Int8),
    Column::new("p8", Int8),
    Column::new("p9", Int8),
    Column::new("p10", Int8),
    Column::new("p11", Int8),
    Column::new("p12", Int16),
    Column::new("p13a", Int16),
    Column::new("p13b", Int16),
    Column::new("p13c", Int16),
    Column::new("p14", Int64),
    Column::new("p15", Int8),
    Column::new("p16", Int8),
    Column::new("p17", Int8),
    Column::new("p18", Int8),
    Column::new("p19", Int8),
    Column::new("p20", Int8),
    Column::new("p21", Int8),
    Column::new("p22", Int8),
    Column::new("p23", Int8),
    Column::new("p24", Int8),
    Column::new("p27", Int8),
    Column::new("p28", Int8),
    Column::new("p34", Int16),
    Column::new("p35", Int8),
    Column::new("p39", Int8),
    Column::new("p44", Int8),
    Column::new("p45a", Int8),
    Column::new("p47", Str(2)),
    Column::new("p48a", Int8),
    Column::new("p49", Int8),
    Column::new("p50a", Int8),
    Column::new("p50b", Int8),
    Column::new("p51", Int8),
    Column::new("p52", Int8),
    Column::new("p53", Int64),
    Column::new("p55a", Int8),
    Column::new("p57", Int8),
    Column::new("p58", Int8),
    Column::new("a", Float64),
    Column::new("b", Float64),
    Column::new("d", Float64),
    Column::new("e", Float64),
    Column::new("f", Float64),
    Column::new("g", Float64),
    Column::new("h", Str(32)),
    Column::new("i", Str(32)),
    Column::new("j", Str(32)),
    Column::new("k", Str(32)),
    Column::new("l", Str(32)),
    Column::new("n", Str(32)),
    Column::new("o", Str(32)),
    Column::new("p", Str(32)),
    Column::new("q", Str(32)),
    Column::new("r", Str(32)),
    Column::new("s", Str(32)),
    Column::new("t", Str(32)),
    Column::new("p5a", Int8),
];

/// Position of `name` in [`COLUMNS`].
pub fn column_index(name: &str) -> Option<usize> {
    COLUMNS.iter().position(|c| c.name == name)
}
