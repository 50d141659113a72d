pub mod report;
pub mod task;
pub mod user;

pub use report::DailyReport;
pub use task::{Subject, Task, TaskStatus};
pub use user::{TargetExam, User, MOODS, USERS};
