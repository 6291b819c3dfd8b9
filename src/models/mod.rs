pub mod parameter;
pub mod project;
pub mod timesheet;
pub mod user;

pub use parameter::Parameter;
pub use project::Project;
pub use timesheet::Timesheet;
pub use user::User;
