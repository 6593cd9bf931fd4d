pub mod account_reader;
