//! Карточка локации:
//! - view_model.rs: состояние формы и команды
//! - view.rs: компонент

mod view;
mod view_model;

pub use view::LocationDetail;
