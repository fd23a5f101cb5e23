use contracts::domain::a001_equipment::{Equipment, EquipmentFilter};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct EquipmentListState {
    /// Отфильтрованные и отсортированные строки
    pub items: Vec<Equipment>,
    pub total_count: usize,
    pub filter: EquipmentFilter,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub is_loaded: bool,
}

impl Default for EquipmentListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            filter: EquipmentFilter::default(),
            sort_field: "name".to_string(),
            sort_ascending: true,
            is_loaded: false,
        }
    }
}

impl EquipmentListState {
    /// "3 of 4" при активном фильтре
    pub fn counter_label(&self) -> String {
        if self.filter.is_active() {
            format!("{} of {}", self.items.len(), self.total_count)
        } else {
            self.total_count.to_string()
        }
    }
}

pub fn create_state() -> RwSignal<EquipmentListState> {
    RwSignal::new(EquipmentListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_label() {
        let mut state = EquipmentListState {
            total_count: 4,
            ..Default::default()
        };
        assert_eq!(state.counter_label(), "4");

        state.filter.status = "down".into();
        assert_eq!(state.counter_label(), "0 of 4");
    }
}
