//! Карточка бригады: форма, состав и наряды участников

mod view;
mod view_model;

pub use view::TeamDetail;
