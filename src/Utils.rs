// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! different utility modules used throughout the project
/// logger set up and a tiny module to save results into csv file
pub mod logger;
/// parse a session document with structure like "title1 key1: value1 key2: value2 title2 key3: value3"
/// into the expressions, missing-variable values, solver and logging settings of a calculator session
pub mod task_parser;
mod task_parser_tests;
