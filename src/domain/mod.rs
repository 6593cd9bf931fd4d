pub mod account;
pub mod instruction;
pub mod ports;
pub mod verdict;
