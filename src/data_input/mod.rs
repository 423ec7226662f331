// src/data_input/mod.rs

pub mod series_table;
