pub mod result_reader;
