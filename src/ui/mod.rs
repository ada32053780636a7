/// Rendering only: every number shown here comes from `AppState`.
pub mod panels;
pub mod plot;
pub mod table;
