pub mod classes;

pub mod teachers;

pub mod files;

pub mod system;

pub use classes::configure_classes_routes;
pub use files::configure_file_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;
