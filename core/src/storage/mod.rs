pub mod file;
pub mod traits;

pub use file::FileTaskStorage;
pub use traits::TaskStorage;
