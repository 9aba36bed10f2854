pub mod id;
pub mod response;
pub mod schema;
pub mod task;
pub mod user;
pub mod validation;

pub use id::{IdGenerator, TimeOrdered};
pub use response::{filter_task_record, filter_user_record, TaskResponse, UserResponse};
pub use schema::{Entity, TableSchema};
pub use task::{Task, TaskInput, TASKS};
pub use user::{ForgotPasswordInput, ResetPasswordInput, SignInInput, SignUpInput, User, USERS};
pub use validation::{ensure_valid, validate_struct, Validated, Violation};
