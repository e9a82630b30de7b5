pub mod match_table;
