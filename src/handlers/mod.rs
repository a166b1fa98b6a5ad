// handlers/mod.rs - HTTP handlers grouped by resource
//
// Each resource directory holds one file per route; the router in
// `crate::server` wires them up.
pub mod salaries;
