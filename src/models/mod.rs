pub mod todo;
pub mod user;

pub use todo::{page_count, page_offset, Todo, TodoInput, TodoPage, TodoQuery, TodoUpdate, PAGE_SIZE};
pub use user::User;
