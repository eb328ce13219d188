pub mod clinic;
pub mod cnic;
pub mod coordinator;
pub mod sigml;
pub mod speech;
