//! Top-level pages, one per route.

mod create;
mod dashboard;
mod detail;
mod edit;
mod shared;

pub use create::CreatePage;
pub use dashboard::DashboardPage;
pub use detail::DetailPage;
pub use edit::EditPage;
pub use shared::SharedPage;
