pub mod cyclic_loader;
pub mod data_loader;
pub mod rows;
pub mod shuffled_loader;
pub mod simulate;
