pub mod db;
pub mod salary;
pub mod server;
