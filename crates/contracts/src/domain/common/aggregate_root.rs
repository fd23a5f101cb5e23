use super::AggregateId;

/// Трейт для корня агрегата
///
/// Определяет идентификатор и статические метаданные агрегата: индекс,
/// имя коллекции, подписи для UI и путь ресурса в REST API.
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id: AggregateId;

    /// Получить ID записи
    fn id(&self) -> &Self::Id;

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции (например, "equipment")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    /// Корневой путь ресурса в REST API (например, "/equipment")
    fn api_path() -> &'static str;

    /// Полное имя агрегата (например, "a001_equipment"), оно же ключ таба списка
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Ключ таба карточки записи
    fn detail_key(id: &str) -> String {
        format!("{}_detail_{}", Self::full_name(), id)
    }
}
