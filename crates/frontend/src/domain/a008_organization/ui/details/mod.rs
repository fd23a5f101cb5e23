//! Карточка организации:
//! - view_model.rs: форма, сводка и журнал событий
//! - view.rs: компонент

mod view;
mod view_model;

pub use view::OrganizationDetail;
