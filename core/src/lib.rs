pub mod input;
pub mod model;
pub mod storage;
pub mod store;
pub mod time;

pub use input::{parse_input, FieldKey, ParsedInput};
pub use model::task::{Priority, Task, TaskPatch};
pub use storage::{FileTaskStorage, TaskStorage};
pub use store::{sort_for_display, TaskStore, MAX_TASKS};
pub use time::parse_due_date;
