pub mod reference;
pub mod salary;

pub use reference::ReferenceEntity;
pub use salary::{NewSalary, SalaryPatch, SalaryRecord, SalaryView};
