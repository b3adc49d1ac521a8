pub mod store;

pub use store::{read_batch, write_batch, RegionStore};
