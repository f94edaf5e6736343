pub mod status;
pub mod task;

pub use status::TaskStatus;
pub use task::{CreateTaskRequest, NewTask, Task, TaskId, TaskView, UpdateTaskRequest};
