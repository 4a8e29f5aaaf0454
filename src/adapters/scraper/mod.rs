pub mod calendar_parser;
