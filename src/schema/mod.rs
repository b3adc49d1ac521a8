pub mod arrow;
pub mod describe;
pub mod fields;
pub mod regions;
pub mod types;

pub use arrow::{build_arrow_schema, csv_schema, map_to_arrow_type, region_schema};
pub use fields::{column_index, COLUMNS, ID_FIELD, REGION_FIELD};
pub use regions::Region;
pub use types::{Column, FieldType};
