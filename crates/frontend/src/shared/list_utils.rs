/// Утилиты списков: сортировка по колонкам и подсветка совпадений поиска
use leptos::prelude::*;
use std::cmp::Ordering;

/// Строка таблицы, которую можно сортировать по имени колонки
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Текущая сортировка таблицы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub ascending: bool,
}

impl SortState {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            ascending: true,
        }
    }

    /// Повторный клик по колонке меняет направление, клик по другой сбрасывает на ASC
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            self.field = field.to_string();
            self.ascending = true;
        }
    }
}

/// Сортирует список по указанному полю (стабильно)
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Сравнение строк без учёта регистра
pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Разбить текст на части (фрагмент, совпадение?) по запросу без учёта регистра
pub fn split_matches(text: &str, query: &str) -> Vec<(String, bool)> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return vec![(text.to_string(), false)];
    }
    let lower = text.to_lowercase();
    // to_lowercase может менять длину в байтах; тогда подсветку не делаем
    if lower.len() != text.len() {
        return vec![(text.to_string(), false)];
    }

    let mut parts = Vec::new();
    let mut last = 0;
    while let Some(pos) = lower[last..].find(&query) {
        let start = last + pos;
        let end = start + query.len();
        if start > last {
            parts.push((text[last..start].to_string(), false));
        }
        parts.push((text[start..end].to_string(), true));
        last = end;
    }
    if last < text.len() || parts.is_empty() {
        parts.push((text[last..].to_string(), false));
    }
    parts
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, query: &str) -> AnyView {
    let parts = split_matches(text, query)
        .into_iter()
        .map(|(chunk, hit)| {
            if hit {
                view! { <mark class="search-highlight">{chunk}</mark> }.into_any()
            } else {
                view! { <span>{chunk}</span> }.into_any()
            }
        })
        .collect::<Vec<_>>();
    view! { <>{parts}</> }.into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        qty: u32,
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "qty" => self.qty.cmp(&other.qty),
                _ => cmp_text(self.name, other.name),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "valve", qty: 25 },
            Row { name: "Belt", qty: 8 },
            Row { name: "filter", qty: 40 },
        ]
    }

    #[test]
    fn test_sort_list_both_directions() {
        let mut items = rows();
        sort_list(&mut items, "name", true);
        let names: Vec<_> = items.iter().map(|r| r.name).collect();
        assert_eq!(names, ["Belt", "filter", "valve"]);

        sort_list(&mut items, "qty", false);
        let qty: Vec<_> = items.iter().map(|r| r.qty).collect();
        assert_eq!(qty, [40, 25, 8]);
    }

    #[test]
    fn test_sort_state_toggle() {
        let mut s = SortState::new("name");
        s.toggle("name");
        assert!(!s.ascending);
        s.toggle("qty");
        assert_eq!(s, SortState::new("qty"));
        assert_eq!(get_sort_indicator(&s.field, "qty", s.ascending), " ▲");
        assert_eq!(get_sort_indicator(&s.field, "name", s.ascending), " ⇅");
    }

    #[test]
    fn test_split_matches() {
        assert_eq!(
            split_matches("HVAC-2023-hvac", "hvac"),
            vec![
                ("HVAC".to_string(), true),
                ("-2023-".to_string(), false),
                ("hvac".to_string(), true),
            ]
        );
        assert_eq!(split_matches("Motor", ""), vec![("Motor".to_string(), false)]);
        assert_eq!(split_matches("Motor", "x"), vec![("Motor".to_string(), false)]);
    }
}
